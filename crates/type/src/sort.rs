// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Physical ordering of an index row variant.
///
/// The backing store only yields natural byte order, so descending order is
/// produced by storing a second, bit-complemented copy of every index entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
	Ascending,
	Descending,
}

impl SortOrder {
	pub fn reverse(self) -> Self {
		match self {
			SortOrder::Ascending => SortOrder::Descending,
			SortOrder::Descending => SortOrder::Ascending,
		}
	}

	pub fn is_descending(self) -> bool {
		matches!(self, SortOrder::Descending)
	}
}

impl Display for SortOrder {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			SortOrder::Ascending => f.write_str("ASC"),
			SortOrder::Descending => f.write_str("DESC"),
		}
	}
}
