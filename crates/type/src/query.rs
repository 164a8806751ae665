// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::{
	collections::BTreeMap,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

use crate::Value;

/// How an index read positions itself relative to the search key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryType {
	/// Rows whose leading columns equal the key.
	Exact,
	/// Rows strictly after the key in ascending order.
	AfterKey,
	/// Rows at or after the key in ascending order.
	KeyOrNext,
	/// Rows strictly before the key, walking backwards.
	BeforeKey,
	/// Rows at or before the key, walking backwards.
	KeyOrPrevious,
	IndexFirst,
	IndexLast,
}

impl QueryType {
	/// Whether the query is positioned by key values.
	pub fn requires_values(self) -> bool {
		!matches!(self, QueryType::IndexFirst | QueryType::IndexLast)
	}

	/// Whether rows equal to the key are excluded from the result.
	pub fn skips_equal(self) -> bool {
		matches!(self, QueryType::AfterKey | QueryType::BeforeKey)
	}
}

impl Display for QueryType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			QueryType::Exact => f.write_str("EXACT_KEY"),
			QueryType::AfterKey => f.write_str("AFTER_KEY"),
			QueryType::KeyOrNext => f.write_str("KEY_OR_NEXT"),
			QueryType::BeforeKey => f.write_str("BEFORE_KEY"),
			QueryType::KeyOrPrevious => f.write_str("KEY_OR_PREVIOUS"),
			QueryType::IndexFirst => f.write_str("INDEX_FIRST"),
			QueryType::IndexLast => f.write_str("INDEX_LAST"),
		}
	}
}

/// A search key against one index.
///
/// `values` holds the leading index columns that take part in the search. A
/// column mapped to `None` searches for NULL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryKey {
	pub index: String,
	pub query_type: QueryType,
	pub values: BTreeMap<String, Option<Value>>,
}

impl QueryKey {
	pub fn new(index: impl Into<String>, query_type: QueryType) -> Self {
		Self {
			index: index.into(),
			query_type,
			values: BTreeMap::new(),
		}
	}

	pub fn with_value(mut self, column: impl Into<String>, value: Option<Value>) -> Self {
		self.values.insert(column.into(), value);
		self
	}
}
