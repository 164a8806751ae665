// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{ColumnSchema, Error, IndexSchema, Result, return_error};

/// Columns and secondary indices of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
	columns: Vec<ColumnSchema>,
	indices: Vec<IndexSchema>,
}

impl TableSchema {
	pub fn new(columns: Vec<ColumnSchema>, indices: Vec<IndexSchema>) -> Result<Self> {
		if columns.is_empty() {
			return_error!(Error::invalid_argument("a table needs at least one column"));
		}

		let mut names = HashSet::with_capacity(columns.len());
		for column in &columns {
			if !names.insert(column.name.as_str()) {
				return_error!(Error::invalid_argument(format!("duplicate column `{}`", column.name)));
			}
		}

		if columns.iter().filter(|c| c.auto_increment).count() > 1 {
			return_error!(Error::invalid_argument("a table can have at most one auto increment column"));
		}

		let mut schema = Self {
			columns,
			indices: Vec::with_capacity(indices.len()),
		};
		for index in indices {
			schema.add_index(index)?;
		}
		Ok(schema)
	}

	pub fn columns(&self) -> &[ColumnSchema] {
		&self.columns
	}

	pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
		self.columns.iter().find(|c| c.name == name)
	}

	pub fn indices(&self) -> &[IndexSchema] {
		&self.indices
	}

	pub fn index(&self, name: &str) -> Option<&IndexSchema> {
		self.indices.iter().find(|i| i.name() == name)
	}

	pub fn auto_increment_column(&self) -> Option<&ColumnSchema> {
		self.columns.iter().find(|c| c.auto_increment)
	}

	pub fn add_index(&mut self, index: IndexSchema) -> Result<()> {
		if self.index(index.name()).is_some() {
			return_error!(Error::invalid_argument(format!("index `{}` already exists", index.name())));
		}

		for column in index.columns() {
			if self.column(column).is_none() {
				return_error!(Error::invalid_argument(format!(
					"index `{}` references unknown column `{column}`",
					index.name()
				)));
			}
		}

		self.indices.push(index);
		Ok(())
	}

	pub fn remove_index(&mut self, name: &str) -> Option<IndexSchema> {
		let position = self.indices.iter().position(|i| i.name() == name)?;
		Some(self.indices.remove(position))
	}
}
