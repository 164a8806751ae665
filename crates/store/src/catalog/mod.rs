// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

//! Table metadata kept in the store next to the data.
//!
//! The TableList row maps table names to identifiers, the ColumnList and
//! IndexList rows of a table map column and index names to identifiers.
//! Each of these rows also holds the last identifier handed out in its
//! [`VALUE`] cell. RowCount, AutoIncrement and Schema rows hold a single
//! [`VALUE`] cell.

pub use cache::SchemaCache;
use keyhive_core::{EncodedKey, key::SchemaKey};
use keyhive_type::{Error, Result, TableId, TableSchema};
use parking_lot::Mutex;

use crate::{
	StoreConfig,
	backend::{Cells, KvStore, Mutation, Qualifier},
};

mod cache;
mod counter;
mod index;
mod table;

/// Qualifier of the single-valued cell of a metadata row. Table, column and
/// index names are never empty, so it cannot collide with a name mapping.
pub const VALUE: &[u8] = b"";

pub struct Catalog<S> {
	store: S,
	config: StoreConfig,
	cache: SchemaCache,
	lock: Mutex<()>,
}

impl<S: KvStore> Catalog<S> {
	pub fn new(store: S, config: StoreConfig) -> Self {
		Self {
			store,
			config,
			cache: SchemaCache::new(),
			lock: Mutex::new(()),
		}
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn config(&self) -> &StoreConfig {
		&self.config
	}

	pub fn cache(&self) -> &SchemaCache {
		&self.cache
	}

	pub(crate) fn qualifier(&self, name: impl Into<Vec<u8>>) -> Qualifier {
		Qualifier::new(self.config.column_family.as_str(), name)
	}

	pub(crate) fn put(&self, key: EncodedKey, name: impl Into<Vec<u8>>, value: Vec<u8>) -> Mutation {
		Mutation::Put {
			key,
			qualifier: self.qualifier(name),
			value,
		}
	}

	pub(crate) fn put_u64(&self, key: EncodedKey, name: impl Into<Vec<u8>>, value: u64) -> Mutation {
		self.put(key, name, value.to_be_bytes().to_vec())
	}

	fn cells(&self, key: &EncodedKey) -> Result<Cells> {
		Ok(self.store.get(key)?.unwrap_or_default())
	}

	/// Reads a big-endian `u64` cell, `None` when the cell does not exist.
	fn read_u64(&self, key: &EncodedKey, name: &[u8]) -> Result<Option<u64>> {
		let cells = self.cells(key)?;
		cells.get(&self.qualifier(name)).map(|bytes| decode_u64(key, bytes)).transpose()
	}

	fn read_schema(&self, table: TableId, name: &str) -> Result<TableSchema> {
		let key = SchemaKey::encoded(table);
		let cells = self.cells(&key)?;
		let Some(bytes) = cells.get(&self.qualifier(VALUE)) else {
			return Err(Error::corrupted(format!("table `{name}` has no schema row")));
		};
		Ok(serde_json::from_slice(bytes)?)
	}

	fn write_schema(&self, table: TableId, schema: &TableSchema) -> Result<Mutation> {
		Ok(self.put(SchemaKey::encoded(table), VALUE, serde_json::to_vec(schema)?))
	}
}

fn decode_u64(key: &EncodedKey, bytes: &[u8]) -> Result<u64> {
	let bytes: [u8; 8] =
		bytes.try_into().map_err(|_| Error::corrupted(format!("{key:?} holds a {} byte counter", bytes.len())))?;
	Ok(u64::from_be_bytes(bytes))
}
