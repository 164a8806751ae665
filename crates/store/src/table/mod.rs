// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

//! One open table: row writes with index maintenance, and reads through
//! the data rows or through an index.
//!
//! Every row is stored once under its DataRow key and, per index, once under
//! its ascending and once under its descending index key. All copies carry
//! the serialized row, so an index scan never goes back to the data rows.

use std::{collections::BTreeMap, sync::Arc};

use keyhive_core::{CompoundIndexKeyBuilder, EncodedKey};
use keyhive_type::{Error, IndexId, Result, TableId, TableSchema};
use parking_lot::Mutex;
pub use scanner::{IndexScanner, TableScanner};

use crate::{
	Catalog,
	backend::{KvStore, Mutation, Qualifier},
};

mod buffer;
mod ddl;
mod read;
mod scanner;
mod write;

use buffer::WriteBuffer;

/// Qualifier of the cell holding the serialized row.
pub const ROW: &[u8] = b"row";

pub struct Table<S> {
	catalog: Arc<Catalog<S>>,
	name: String,
	id: TableId,
	schema: Arc<TableSchema>,
	indices: BTreeMap<String, IndexId>,
	buffer: Mutex<WriteBuffer>,
}

impl<S: KvStore> Table<S> {
	pub fn open(catalog: Arc<Catalog<S>>, name: &str) -> Result<Self> {
		let id = catalog.table_id(name)?;
		let schema = catalog.schema(name)?;
		let indices = index_ids(&catalog, name, &schema)?;
		let buffer = WriteBuffer::new(catalog.config().write_buffer_size);

		Ok(Self {
			catalog,
			name: name.to_string(),
			id,
			schema,
			indices,
			buffer: Mutex::new(buffer),
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn id(&self) -> TableId {
		self.id
	}

	pub fn schema(&self) -> &TableSchema {
		&self.schema
	}

	pub fn catalog(&self) -> &Catalog<S> {
		&self.catalog
	}

	pub fn row_count(&self) -> Result<u64> {
		self.catalog.row_count(&self.name)
	}

	/// Sends every queued mutation to the store.
	pub fn flush(&self) -> Result<()> {
		let mut buffer = self.buffer.lock();
		if buffer.is_empty() {
			return Ok(());
		}
		self.store().apply(buffer.take())
	}

	fn store(&self) -> &S {
		self.catalog.store()
	}

	/// Reloads the schema and index identifiers after index DDL.
	fn refresh(&mut self) -> Result<()> {
		let schema = self.catalog.schema(&self.name)?;
		self.indices = index_ids(&self.catalog, &self.name, &schema)?;
		self.schema = schema;
		Ok(())
	}

	fn index_id(&self, index: &str) -> Result<IndexId> {
		self.indices.get(index).copied().ok_or_else(|| Error::IndexNotFound {
			table: self.name.clone(),
			index: index.to_string(),
		})
	}

	fn builder(&self, index: &str) -> Result<CompoundIndexKeyBuilder<'_>> {
		let id = self.index_id(index)?;
		let schema = self.schema.index(index).ok_or_else(|| Error::IndexNotFound {
			table: self.name.clone(),
			index: index.to_string(),
		})?;
		CompoundIndexKeyBuilder::new(self.id, id, &self.schema, schema)
	}

	fn builders(&self) -> Result<Vec<CompoundIndexKeyBuilder<'_>>> {
		self.schema.indices().iter().map(|index| self.builder(index.name())).collect()
	}

	fn row_qualifier(&self) -> Qualifier {
		self.catalog.qualifier(ROW)
	}

	fn put_row(&self, key: EncodedKey, payload: Vec<u8>) -> Mutation {
		Mutation::Put {
			key,
			qualifier: self.row_qualifier(),
			value: payload,
		}
	}

	/// Whether a row exists under `key`, counting queued mutations.
	fn contains(&self, key: &EncodedKey) -> Result<bool> {
		let buffer = self.buffer.lock();
		match buffer.pending(key) {
			Some(exists) => Ok(exists),
			None => Ok(self.store().get(key)?.is_some()),
		}
	}

	/// Queues mutations, flushing once the write buffer is full.
	fn write(&self, mutations: Vec<Mutation>) -> Result<()> {
		let mut buffer = self.buffer.lock();
		buffer.extend(mutations);
		if buffer.is_full() {
			return self.store().apply(buffer.take());
		}
		Ok(())
	}
}

fn index_ids<S: KvStore>(catalog: &Catalog<S>, table: &str, schema: &TableSchema) -> Result<BTreeMap<String, IndexId>> {
	schema
		.indices()
		.iter()
		.map(|index| Ok((index.name().to_string(), catalog.index_id(table, index.name())?)))
		.collect()
}
