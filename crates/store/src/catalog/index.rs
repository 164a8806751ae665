// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use keyhive_core::key::IndexListKey;
use keyhive_type::{Error, IndexId, IndexSchema, Result, return_error};
use tracing::{debug, instrument};

use super::{Catalog, VALUE};
use crate::backend::{KvStore, Mutation};

impl<S: KvStore> Catalog<S> {
	/// Adds an index to a table's schema and allocates its identifier.
	///
	/// Only metadata changes. Populating the index is up to the caller.
	#[instrument(name = "store::catalog::add_index", level = "debug", skip(self, index), fields(index = index.name()))]
	pub fn add_index(&self, table: &str, index: IndexSchema) -> Result<IndexId> {
		let _guard = self.lock.lock();
		let table_id = self.require_table(table)?;

		let mut schema = self.read_schema(table_id, table)?;
		let name = index.name().to_string();
		schema.add_index(index)?;

		let list = IndexListKey::encoded(table_id);
		let id = IndexId(self.read_u64(&list, VALUE)?.unwrap_or(0) + 1);

		self.store.apply(vec![
			self.put_u64(list.clone(), name.as_str(), id.0),
			self.put_u64(list, VALUE, id.0),
			self.write_schema(table_id, &schema)?,
		])?;
		self.cache.invalidate(table);

		debug!(table, index = name, id = %id, "added index");
		Ok(id)
	}

	/// Removes an index from a table's schema. Its index rows are left to the
	/// caller.
	#[instrument(name = "store::catalog::drop_index", level = "debug", skip(self))]
	pub fn drop_index(&self, table: &str, index: &str) -> Result<()> {
		let _guard = self.lock.lock();
		let table_id = self.require_table(table)?;

		let mut schema = self.read_schema(table_id, table)?;
		if schema.remove_index(index).is_none() {
			return_error!(Error::IndexNotFound {
				table: table.to_string(),
				index: index.to_string(),
			});
		}

		self.store.apply(vec![
			Mutation::DeleteCell {
				key: IndexListKey::encoded(table_id),
				qualifier: self.qualifier(index),
			},
			self.write_schema(table_id, &schema)?,
		])?;
		self.cache.invalidate(table);

		debug!(table, index, "dropped index");
		Ok(())
	}

	pub fn index_id(&self, table: &str, index: &str) -> Result<IndexId> {
		let table_id = self.require_table(table)?;
		self.read_u64(&IndexListKey::encoded(table_id), index.as_bytes())?.map(IndexId).ok_or_else(|| {
			Error::IndexNotFound {
				table: table.to_string(),
				index: index.to_string(),
			}
		})
	}
}
