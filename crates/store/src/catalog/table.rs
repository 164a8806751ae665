// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::sync::Arc;

use keyhive_core::key::{
	AutoIncrementKey, ColumnListKey, DataRowKey, EncodableKey, IndexListKey, IndexRowKey, RowCountKey, SchemaKey,
	TableListKey,
};
use keyhive_type::{Error, Result, SortOrder, TableId, TableSchema, return_error};
use tracing::{debug, instrument};

use super::{Catalog, VALUE};
use crate::backend::{KvStore, Mutation};

impl<S: KvStore> Catalog<S> {
	/// Registers a table and allocates identifiers for the table, its
	/// columns and its indices.
	#[instrument(name = "store::catalog::create_table", level = "debug", skip(self, schema))]
	pub fn create_table(&self, name: &str, schema: &TableSchema) -> Result<TableId> {
		if name.is_empty() {
			return_error!(Error::invalid_argument("table name must not be empty"));
		}

		let _guard = self.lock.lock();
		if self.lookup_table(name)?.is_some() {
			return_error!(Error::TableExists(name.to_string()));
		}

		let list = TableListKey.encode();
		let table = TableId(self.read_u64(&list, VALUE)?.unwrap_or(0) + 1);

		let mut batch = vec![self.put_u64(list.clone(), name, table.0), self.put_u64(list, VALUE, table.0)];

		let columns = ColumnListKey::encoded(table);
		for (id, column) in (1u64..).zip(schema.columns()) {
			batch.push(self.put_u64(columns.clone(), column.name.as_str(), id));
		}
		batch.push(self.put_u64(columns, VALUE, schema.columns().len() as u64));

		let indices = IndexListKey::encoded(table);
		for (id, index) in (1u64..).zip(schema.indices()) {
			batch.push(self.put_u64(indices.clone(), index.name(), id));
		}
		batch.push(self.put_u64(indices, VALUE, schema.indices().len() as u64));

		batch.push(self.write_schema(table, schema)?);
		batch.push(self.put_u64(RowCountKey::encoded(table), VALUE, 0));
		batch.push(self.put_u64(AutoIncrementKey::encoded(table), VALUE, 0));

		self.store.apply(batch)?;
		self.cache.invalidate(name);

		debug!(table = name, id = %table, "created table");
		Ok(table)
	}

	/// Removes a table with all of its metadata, data rows and index rows.
	#[instrument(name = "store::catalog::delete_table", level = "debug", skip(self))]
	pub fn delete_table(&self, name: &str) -> Result<()> {
		let _guard = self.lock.lock();
		let table = self.require_table(name)?;

		let mut batch = vec![Mutation::DeleteCell {
			key: TableListKey.encode(),
			qualifier: self.qualifier(name),
		}];

		for key in [
			ColumnListKey::encoded(table),
			IndexListKey::encoded(table),
			RowCountKey::encoded(table),
			AutoIncrementKey::encoded(table),
			SchemaKey::encoded(table),
		] {
			batch.push(Mutation::Delete {
				key,
			});
		}

		for range in [
			DataRowKey::full_scan(table),
			IndexRowKey::table_range(table, SortOrder::Ascending),
			IndexRowKey::table_range(table, SortOrder::Descending),
		] {
			batch.extend(self.store.range(range)?.map(|stored| Mutation::Delete {
				key: stored.key,
			}));
		}

		let rows = batch.len();
		self.store.apply(batch)?;
		self.cache.invalidate(name);

		debug!(table = name, id = %table, rows, "deleted table");
		Ok(())
	}

	/// Moves a table to a new name. The table keeps its identifier, so no
	/// data row or index row is touched.
	#[instrument(name = "store::catalog::rename_table", level = "debug", skip(self))]
	pub fn rename_table(&self, from: &str, to: &str) -> Result<()> {
		if to.is_empty() {
			return_error!(Error::invalid_argument("table name must not be empty"));
		}

		let _guard = self.lock.lock();
		let table = self.require_table(from)?;
		if self.lookup_table(to)?.is_some() {
			return_error!(Error::TableExists(to.to_string()));
		}

		let list = TableListKey.encode();
		self.store.apply(vec![
			Mutation::DeleteCell {
				key: list.clone(),
				qualifier: self.qualifier(from),
			},
			self.put_u64(list, to, table.0),
		])?;
		self.cache.invalidate(from);
		self.cache.invalidate(to);

		debug!(from, to, id = %table, "renamed table");
		Ok(())
	}

	pub fn table_id(&self, name: &str) -> Result<TableId> {
		self.require_table(name)
	}

	pub fn table_exists(&self, name: &str) -> Result<bool> {
		Ok(self.lookup_table(name)?.is_some())
	}

	/// Every table name with its identifier, in name order.
	pub fn tables(&self) -> Result<Vec<(String, TableId)>> {
		let list = TableListKey.encode();
		let mut tables = Vec::new();
		for (qualifier, value) in self.cells(&list)? {
			if qualifier.family != self.config.column_family || qualifier.name == VALUE {
				continue;
			}
			let name = String::from_utf8(qualifier.name)
				.map_err(|_| Error::corrupted("table list holds a non UTF-8 table name"))?;
			tables.push((name, TableId(super::decode_u64(&list, &value)?)));
		}
		Ok(tables)
	}

	/// The table's schema, served from the schema cache.
	pub fn schema(&self, name: &str) -> Result<Arc<TableSchema>> {
		if let Some(schema) = self.cache.get(name) {
			return Ok(schema);
		}

		let _guard = self.lock.lock();
		if let Some(schema) = self.cache.get(name) {
			return Ok(schema);
		}

		let table = self.require_table(name)?;
		let schema = self.read_schema(table, name)?;
		Ok(self.cache.insert(name, schema))
	}

	pub(super) fn lookup_table(&self, name: &str) -> Result<Option<TableId>> {
		Ok(self.read_u64(&TableListKey.encode(), name.as_bytes())?.map(TableId))
	}

	pub(super) fn require_table(&self, name: &str) -> Result<TableId> {
		self.lookup_table(name)?.ok_or_else(|| Error::TableNotFound(name.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use keyhive_type::{ColumnSchema, ColumnType, IndexSchema};

	use super::*;
	use crate::{MemoryStore, StoreConfig};

	fn catalog() -> Catalog<MemoryStore> {
		Catalog::new(MemoryStore::new(), StoreConfig::default())
	}

	fn schema() -> TableSchema {
		TableSchema::new(
			vec![ColumnSchema::new("c1", ColumnType::Long).unwrap(), ColumnSchema::new("c2", ColumnType::Double).unwrap()],
			vec![IndexSchema::new("i1", ["c1"], false).unwrap()],
		)
		.unwrap()
	}

	#[test]
	fn test_create_allocates_ids() {
		let catalog = catalog();
		assert_eq!(catalog.create_table("t1", &schema()).unwrap(), TableId(1));
		assert_eq!(catalog.create_table("t2", &schema()).unwrap(), TableId(2));
		assert_eq!(catalog.table_id("t2").unwrap(), TableId(2));
		assert_eq!(catalog.tables().unwrap(), vec![("t1".to_string(), TableId(1)), ("t2".to_string(), TableId(2))]);
	}

	#[test]
	fn test_create_existing() {
		let catalog = catalog();
		catalog.create_table("t1", &schema()).unwrap();
		assert_eq!(catalog.create_table("t1", &schema()), Err(Error::TableExists("t1".to_string())));
	}

	#[test]
	fn test_create_empty_name() {
		assert!(matches!(catalog().create_table("", &schema()), Err(Error::InvalidArgument(_))));
	}

	#[test]
	fn test_schema_roundtrip() {
		let catalog = catalog();
		catalog.create_table("t1", &schema()).unwrap();
		let loaded = catalog.schema("t1").unwrap();
		assert_eq!(*loaded, schema());
		assert!(Arc::ptr_eq(&loaded, &catalog.schema("t1").unwrap()));
	}

	#[test]
	fn test_unknown_table() {
		let catalog = catalog();
		assert_eq!(catalog.table_id("nope"), Err(Error::TableNotFound("nope".to_string())));
		assert!(matches!(catalog.schema("nope"), Err(Error::TableNotFound(_))));
		assert!(!catalog.table_exists("nope").unwrap());
	}

	#[test]
	fn test_rename() {
		let catalog = catalog();
		let id = catalog.create_table("t1", &schema()).unwrap();
		catalog.schema("t1").unwrap();

		catalog.rename_table("t1", "t2").unwrap();
		assert!(catalog.cache().get("t1").is_none());
		assert_eq!(catalog.table_id("t2").unwrap(), id);
		assert!(matches!(catalog.table_id("t1"), Err(Error::TableNotFound(_))));
		assert_eq!(*catalog.schema("t2").unwrap(), schema());
	}

	#[test]
	fn test_rename_onto_existing() {
		let catalog = catalog();
		catalog.create_table("t1", &schema()).unwrap();
		catalog.create_table("t2", &schema()).unwrap();
		assert_eq!(catalog.rename_table("t1", "t2"), Err(Error::TableExists("t2".to_string())));
	}

	#[test]
	fn test_delete_removes_metadata() {
		let catalog = catalog();
		let id = catalog.create_table("t1", &schema()).unwrap();
		catalog.schema("t1").unwrap();

		catalog.delete_table("t1").unwrap();
		assert!(!catalog.table_exists("t1").unwrap());
		assert!(catalog.cache().is_empty());
		assert!(catalog.store().get(&SchemaKey::encoded(id)).unwrap().is_none());
		assert!(catalog.store().get(&RowCountKey::encoded(id)).unwrap().is_none());

		assert_eq!(catalog.create_table("t1", &schema()).unwrap(), TableId(2));
	}
}
