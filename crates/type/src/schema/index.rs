// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, return_error};

/// A secondary index over an ordered list of table columns.
///
/// The column list fixes the compound key layout and never changes once the
/// index exists; altering it means creating a new index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexSchema {
	name: String,
	columns: Vec<String>,
	unique: bool,
}

impl IndexSchema {
	pub fn new<I, S>(name: impl Into<String>, columns: I, unique: bool) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let name = name.into();
		if name.is_empty() {
			return_error!(Error::invalid_argument("index name must not be empty"));
		}

		let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
		let mut seen = HashSet::with_capacity(columns.len());
		for column in &columns {
			if !seen.insert(column.as_str()) {
				return_error!(Error::invalid_argument(format!(
					"index `{name}` lists column `{column}` more than once"
				)));
			}
		}

		Ok(Self {
			name,
			columns,
			unique,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	pub fn is_unique(&self) -> bool {
		self.unique
	}

	pub fn contains_column(&self, column: &str) -> bool {
		self.columns.iter().any(|c| c == column)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_column_order_preserved() {
		let index = IndexSchema::new("idx", ["b", "a", "c"], false).unwrap();
		assert_eq!(index.columns(), &["b".to_string(), "a".to_string(), "c".to_string()]);
		assert!(!index.is_unique());
		assert!(index.contains_column("a"));
		assert!(!index.contains_column("d"));
	}

	#[test]
	fn test_zero_columns_allowed() {
		let index = IndexSchema::new("empty", Vec::<String>::new(), false).unwrap();
		assert!(index.columns().is_empty());
	}

	#[test]
	fn test_duplicate_column_rejected() {
		assert!(IndexSchema::new("idx", ["a", "a"], true).is_err());
	}
}
