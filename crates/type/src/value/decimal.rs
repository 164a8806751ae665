// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::{borrow::Cow, str::FromStr};

use bigdecimal::BigDecimal;

use crate::{Error, Result};

pub(crate) fn parse_decimal(raw: &str) -> Result<BigDecimal> {
	let needs_trimming = raw.as_bytes().first().is_some_and(u8::is_ascii_whitespace)
		|| raw.as_bytes().last().is_some_and(u8::is_ascii_whitespace);
	let has_underscores = raw.as_bytes().contains(&b'_');

	let value = match (needs_trimming, has_underscores) {
		(false, false) => Cow::Borrowed(raw),
		(true, false) => Cow::Borrowed(raw.trim()),
		(false, true) => Cow::Owned(raw.replace('_', "")),
		(true, true) => Cow::Owned(raw.trim().replace('_', "")),
	};

	if value.is_empty() {
		return Err(Error::parse(raw, "DECIMAL"));
	}

	BigDecimal::from_str(&value).map_err(|_| Error::parse(raw, "DECIMAL"))
}

/// Decimals travel as their canonical string so non self-describing formats
/// can carry them.
pub(crate) mod serde_string {
	use std::str::FromStr;

	use bigdecimal::BigDecimal;
	use serde::{Deserialize, Deserializer, Serializer, de};

	pub fn serialize<S: Serializer>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(value)
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigDecimal, D::Error> {
		let text = String::deserialize(deserializer)?;
		BigDecimal::from_str(&text).map_err(de::Error::custom)
	}
}
