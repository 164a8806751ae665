// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use keyhive_core::ScanStrategy;
use keyhive_type::{Error, Result, Row};
use tracing::trace;

use crate::backend::{KvStore, Qualifier, Stored};

/// Reads the row a data row or index row carries.
pub(crate) fn read_row(stored: &Stored, qualifier: &Qualifier) -> Result<Row> {
	let bytes =
		stored.cells.get(qualifier).ok_or_else(|| Error::corrupted(format!("{:?} carries no row", stored.key)))?;
	Row::deserialize(bytes)
}

/// Rows of a table in data row key order.
pub struct TableScanner<'a, S>
where
	S: KvStore + 'a,
{
	rows: S::Range<'a>,
	qualifier: Qualifier,
}

impl<'a, S> TableScanner<'a, S>
where
	S: KvStore + 'a,
{
	pub(crate) fn new(rows: S::Range<'a>, qualifier: Qualifier) -> Self {
		Self {
			rows,
			qualifier,
		}
	}
}

impl<'a, S> Iterator for TableScanner<'a, S>
where
	S: KvStore + 'a,
{
	type Item = Result<Row>;

	fn next(&mut self) -> Option<Self::Item> {
		let stored = self.rows.next()?;
		Some(read_row(&stored, &self.qualifier))
	}
}

/// A caller-owned cursor over one index scan.
///
/// Rows at the head of the scan that the strategy skips are dropped, which
/// turns the inclusive start of the range into a strict bound for AFTER and
/// BEFORE reads.
pub struct IndexScanner<'a, S>
where
	S: KvStore + 'a,
{
	rows: S::Range<'a>,
	strategy: ScanStrategy,
	qualifier: Qualifier,
	at_head: bool,
}

impl<'a, S> IndexScanner<'a, S>
where
	S: KvStore + 'a,
{
	pub(crate) fn new(rows: S::Range<'a>, strategy: ScanStrategy, qualifier: Qualifier) -> Self {
		Self {
			rows,
			strategy,
			qualifier,
			at_head: true,
		}
	}

	pub fn strategy(&self) -> &ScanStrategy {
		&self.strategy
	}
}

impl<'a, S> Iterator for IndexScanner<'a, S>
where
	S: KvStore + 'a,
{
	type Item = Result<Row>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			let stored = self.rows.next()?;
			if self.at_head {
				if self.strategy.skips(stored.key.as_slice()) {
					trace!(key = ?stored.key, "skipped row matching the search key");
					continue;
				}
				self.at_head = false;
			}
			return Some(read_row(&stored, &self.qualifier));
		}
	}
}
