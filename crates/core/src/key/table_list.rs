// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use super::{EncodableKey, KeyKind};
use crate::EncodedKey;

/// The single row mapping table names to table identifiers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TableListKey;

impl EncodableKey for TableListKey {
	const KIND: KeyKind = KeyKind::TableList;

	fn encode(&self) -> EncodedKey {
		EncodedKey::new(vec![Self::KIND as u8])
	}

	fn decode(key: &EncodedKey) -> Option<Self> {
		match key.as_slice() {
			[tag] if *tag == Self::KIND as u8 => Some(TableListKey),
			_ => None,
		}
	}
}
