// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use keyhive_core::{ScanStrategySelector, key::DataRowKey};
use keyhive_type::{Error, QueryKey, Result, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{IndexScanner, Table, TableScanner, scanner::read_row};
use crate::backend::{KvStore, Stored};

// Reads flush the write buffer first, so a table always sees its own writes.
impl<S: KvStore> Table<S> {
	#[instrument(name = "store::table::get_row", level = "trace", skip(self), fields(table = %self.name))]
	pub fn get_row(&self, uuid: Uuid) -> Result<Row> {
		self.flush()?;

		let key = DataRowKey::encoded(self.id, uuid);
		let Some(cells) = self.store().get(&key)? else {
			return Err(Error::RowNotFound(uuid));
		};
		read_row(
			&Stored {
				key,
				cells,
			},
			&self.row_qualifier(),
		)
	}

	/// Every row of the table, ordered by UUID.
	#[instrument(name = "store::table::table_scan", level = "debug", skip(self), fields(table = %self.name))]
	pub fn table_scan(&self) -> Result<TableScanner<'_, S>> {
		self.flush()?;
		let rows = self.store().range(DataRowKey::full_scan(self.id))?;
		Ok(TableScanner::new(rows, self.row_qualifier()))
	}

	/// Opens a cursor over the rows an index read selects.
	#[instrument(name = "store::table::index_scan", level = "debug", skip(self, query), fields(table = %self.name, index = %query.index, query_type = %query.query_type))]
	pub fn index_scan(&self, query: &QueryKey) -> Result<IndexScanner<'_, S>> {
		let builder = self.builder(&query.index)?;
		let strategy = ScanStrategySelector::new(&builder).select(query.query_type, &query.values)?;
		debug!(order = ?strategy.order, skip = strategy.skip.is_some(), "opening index scan");

		self.flush()?;
		let rows = self.store().range(strategy.range.clone())?;
		Ok(IndexScanner::new(rows, strategy, self.row_qualifier()))
	}
}
