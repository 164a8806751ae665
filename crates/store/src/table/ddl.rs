// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use keyhive_core::key::{DataRowKey, IndexRowKey};
use keyhive_type::{IndexId, IndexSchema, Result};
use tracing::{debug, instrument};

use super::{Table, scanner::read_row, write::ORDERS};
use crate::backend::{KvStore, Mutation};

impl<S: KvStore> Table<S> {
	/// Adds an index and fills it from the rows already stored.
	#[instrument(name = "store::table::insert_table_index", level = "debug", skip(self, index), fields(table = %self.name, index = index.name()))]
	pub fn insert_table_index(&mut self, index: IndexSchema) -> Result<IndexId> {
		let name = index.name().to_string();
		let id = self.catalog.add_index(&self.name, index)?;
		self.refresh()?;
		self.flush()?;

		let builder = self.builder(&name)?;
		let qualifier = self.row_qualifier();
		let mut mutations = Vec::new();
		for stored in self.store().range(DataRowKey::full_scan(self.id))? {
			let row = read_row(&stored, &qualifier)?;
			let Some(payload) = stored.cells.get(&qualifier) else {
				continue;
			};
			for order in ORDERS {
				mutations.push(self.put_row(builder.build_row(order, &row)?.encode(), payload.clone()));
			}
		}

		debug!(entries = mutations.len(), "backfilled index");
		self.store().apply(mutations)?;
		Ok(id)
	}

	/// Removes an index with all of its index rows.
	#[instrument(name = "store::table::delete_table_index", level = "debug", skip(self), fields(table = %self.name))]
	pub fn delete_table_index(&mut self, index: &str) -> Result<()> {
		let id = self.index_id(index)?;
		self.flush()?;

		let mut mutations = Vec::new();
		for order in ORDERS {
			mutations.extend(self.store().range(IndexRowKey::index_range(self.id, id, order))?.map(|stored| {
				Mutation::Delete {
					key: stored.key,
				}
			}));
		}

		debug!(entries = mutations.len(), "dropping index rows");
		self.store().apply(mutations)?;
		self.catalog.drop_index(&self.name, index)?;
		self.refresh()
	}
}
