// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::{collections::HashMap, sync::Arc};

use keyhive_type::TableSchema;
use parking_lot::RwLock;

/// Table schemas by table name, shared by every reader of the catalog.
#[derive(Debug, Default)]
pub struct SchemaCache {
	schemas: RwLock<HashMap<String, Arc<TableSchema>>>,
}

impl SchemaCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, table: &str) -> Option<Arc<TableSchema>> {
		self.schemas.read().get(table).cloned()
	}

	pub fn insert(&self, table: impl Into<String>, schema: TableSchema) -> Arc<TableSchema> {
		let schema = Arc::new(schema);
		self.schemas.write().insert(table.into(), schema.clone());
		schema
	}

	pub fn invalidate(&self, table: &str) {
		self.schemas.write().remove(table);
	}

	pub fn len(&self) -> usize {
		self.schemas.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.schemas.read().is_empty()
	}
}
