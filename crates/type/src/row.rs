// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, TableSchema, Value, return_error};

/// A table row: its identity plus the non-null column values.
///
/// A column missing from `values` is NULL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
	pub uuid: Uuid,
	pub values: BTreeMap<String, Value>,
}

impl Row {
	pub fn new(values: BTreeMap<String, Value>) -> Self {
		Self {
			uuid: Uuid::new_v4(),
			values,
		}
	}

	pub fn with_uuid(uuid: Uuid, values: BTreeMap<String, Value>) -> Self {
		Self {
			uuid,
			values,
		}
	}

	pub fn get(&self, column: &str) -> Option<&Value> {
		self.values.get(column)
	}

	pub fn set(&mut self, column: impl Into<String>, value: Option<Value>) {
		let column = column.into();
		match value {
			Some(value) => {
				self.values.insert(column, value);
			}
			None => {
				self.values.remove(&column);
			}
		}
	}

	/// Checks the row against a table schema: no unknown columns, value
	/// types agree with their column, non-null columns are present.
	pub fn validate(&self, schema: &TableSchema) -> Result<()> {
		for (name, value) in &self.values {
			let Some(column) = schema.column(name) else {
				return_error!(Error::SchemaMismatch(format!("row carries unknown column `{name}`")));
			};
			if !value.is_compatible(&column.column_type) {
				return_error!(Error::SchemaMismatch(format!(
					"column `{name}` of type {} cannot hold a {} value",
					column.column_type,
					value.type_name()
				)));
			}
		}

		for column in schema.columns() {
			if !column.nullable && !self.values.contains_key(&column.name) {
				return_error!(Error::SchemaMismatch(format!(
					"non-null column `{}` has no value",
					column.name
				)));
			}
		}

		Ok(())
	}

	pub fn serialize(&self) -> Result<Vec<u8>> {
		Ok(postcard::to_stdvec(self)?)
	}

	pub fn deserialize(bytes: &[u8]) -> Result<Self> {
		Ok(postcard::from_bytes(bytes)?)
	}
}
