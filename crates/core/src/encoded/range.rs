// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::ops::{Bound, RangeBounds};

use crate::EncodedKey;

/// A range of encoded keys, scanned in ascending byte order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedKeyRange {
	pub start: Bound<EncodedKey>,
	pub end: Bound<EncodedKey>,
}

impl EncodedKeyRange {
	pub fn new(start: Bound<EncodedKey>, end: Bound<EncodedKey>) -> Self {
		Self {
			start,
			end,
		}
	}

	/// Inclusive `start`, exclusive `end`. `None` leaves that side unbounded.
	pub fn start_end(start: Option<EncodedKey>, end: Option<EncodedKey>) -> Self {
		let start = match start {
			Some(s) => Bound::Included(s),
			None => Bound::Unbounded,
		};

		let end = match end {
			Some(e) => Bound::Excluded(e),
			None => Bound::Unbounded,
		};

		Self {
			start,
			end,
		}
	}

	/// Every key starting with `prefix`.
	pub fn prefix(prefix: &EncodedKey) -> Self {
		Self::start_end(Some(prefix.clone()), prefix.prefix_successor())
	}
}

impl RangeBounds<EncodedKey> for EncodedKeyRange {
	fn start_bound(&self) -> Bound<&EncodedKey> {
		self.start.as_ref()
	}

	fn end_bound(&self) -> Bound<&EncodedKey> {
		self.end.as_ref()
	}
}
