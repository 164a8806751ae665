// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

//! Schemas and rows shared by integration tests.

use std::collections::BTreeMap;

use keyhive_type::{ColumnSchema, ColumnType, IndexSchema, Row, TableSchema, Value};
use uuid::Uuid;

/// A nullable LONG column `c1` indexed by `i1`, plus a nullable
/// STRING(16) column `c2`.
pub fn long_table() -> TableSchema {
	TableSchema::new(
		vec![
			long_column("c1"),
			ColumnSchema::new(
				"c2",
				ColumnType::String {
					max_length: 16,
				},
			)
			.unwrap(),
		],
		vec![IndexSchema::new("i1", ["c1"], false).unwrap()],
	)
	.unwrap()
}

/// A non-null auto increment LONG column `id` indexed by `pk`, plus a
/// nullable LONG column `c1`.
pub fn auto_increment_table() -> TableSchema {
	TableSchema::new(
		vec![
			ColumnSchema::builder("id", ColumnType::Long).nullable(false).auto_increment(true).build().unwrap(),
			long_column("c1"),
		],
		vec![IndexSchema::new("pk", ["id"], true).unwrap()],
	)
	.unwrap()
}

pub fn long_column(name: &str) -> ColumnSchema {
	ColumnSchema::new(name, ColumnType::Long).unwrap()
}

pub fn values(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
	entries.iter().map(|(column, value)| (column.to_string(), value.clone())).collect()
}

pub fn row(entries: &[(&str, Value)]) -> Row {
	Row::new(values(entries))
}

pub fn row_with_uuid(uuid: u128, entries: &[(&str, Value)]) -> Row {
	Row::with_uuid(Uuid::from_u128(uuid), values(entries))
}
