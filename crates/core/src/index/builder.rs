// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::collections::BTreeMap;

use keyhive_type::{
	ColumnSchema, Error, IndexId, IndexSchema, Result, Row, SortOrder, TableId, TableSchema, Value, return_error,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
	EncodedKey, EncodedKeyRange,
	encoding::value::{encode, key_width},
	key::IndexRowKey,
};

/// Builds compound keys for one index of one table.
#[derive(Debug, Clone)]
pub struct CompoundIndexKeyBuilder<'a> {
	table_id: TableId,
	index_id: IndexId,
	index: &'a IndexSchema,
	columns: Vec<&'a ColumnSchema>,
}

impl<'a> CompoundIndexKeyBuilder<'a> {
	/// Resolves the index columns against the table schema.
	pub fn new(table_id: TableId, index_id: IndexId, table: &'a TableSchema, index: &'a IndexSchema) -> Result<Self> {
		let columns = index
			.columns()
			.iter()
			.map(|name| {
				table.column(name).ok_or_else(|| {
					Error::SchemaMismatch(format!("index `{}` names unknown column `{name}`", index.name()))
				})
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(Self {
			table_id,
			index_id,
			index,
			columns,
		})
	}

	pub fn table_id(&self) -> TableId {
		self.table_id
	}

	pub fn index_id(&self) -> IndexId {
		self.index_id
	}

	pub fn index(&self) -> &'a IndexSchema {
		self.index
	}

	/// Key width of every index column, in index order.
	pub fn widths(&self) -> Vec<usize> {
		self.columns.iter().map(|c| key_width(&c.column_type)).collect()
	}

	/// Builds a key from explicit column values.
	///
	/// A column mapped to `None` is NULL. Columns missing from `values` end
	/// the key, producing a prefix usable as a scan bound; they must all
	/// trail the supplied ones. A `uuid` is only accepted once every index
	/// column has been supplied.
	#[instrument(name = "core::index::build", level = "trace", skip(self, values), fields(index = %self.index.name()))]
	pub fn build(
		&self,
		order: SortOrder,
		values: &BTreeMap<String, Option<Value>>,
		uuid: Option<Uuid>,
	) -> Result<IndexRowKey> {
		if let Some(unknown) = values.keys().find(|name| !self.index.contains_column(name)) {
			return_error!(Error::SchemaMismatch(format!(
				"column `{unknown}` is not part of index `{}`",
				self.index.name()
			)));
		}

		let mut columns = Vec::with_capacity(self.columns.len());
		for (position, column) in self.columns.iter().enumerate() {
			let Some(value) = values.get(&column.name) else {
				continue;
			};
			if columns.len() != position {
				return_error!(Error::invalid_argument(format!(
					"values for index `{}` must bind a leading run of its columns, `{}` follows a gap",
					self.index.name(),
					column.name
				)));
			}
			columns.push(value.as_ref().map(|v| encode_column(v, column)).transpose()?);
		}

		if uuid.is_some() && columns.len() != self.columns.len() {
			return_error!(Error::invalid_argument(format!(
				"a row identifier needs all {} columns of index `{}`, got {}",
				self.columns.len(),
				self.index.name(),
				columns.len()
			)));
		}

		Ok(self.key(order, columns, uuid))
	}

	/// Builds the full key of a stored row. Columns the row has no value for
	/// are NULL.
	#[instrument(name = "core::index::build_row", level = "trace", skip(self, row), fields(index = %self.index.name(), uuid = %row.uuid))]
	pub fn build_row(&self, order: SortOrder, row: &Row) -> Result<IndexRowKey> {
		let columns = self
			.columns
			.iter()
			.map(|column| row.get(&column.name).map(|v| encode_column(v, column)).transpose())
			.collect::<Result<Vec<_>>>()?;

		Ok(self.key(order, columns, Some(row.uuid)))
	}

	/// The zero-column key of this index.
	pub fn prefix(&self, order: SortOrder) -> EncodedKey {
		IndexRowKey::prefix(self.table_id, self.index_id, order)
	}

	pub fn index_range(&self, order: SortOrder) -> EncodedKeyRange {
		IndexRowKey::index_range(self.table_id, self.index_id, order)
	}

	fn key(&self, order: SortOrder, columns: Vec<Option<Vec<u8>>>, uuid: Option<Uuid>) -> IndexRowKey {
		IndexRowKey {
			table: self.table_id,
			index: self.index_id,
			order,
			columns,
			uuid,
		}
	}
}

/// Encodes a value for a compound key, right-padding variable length values
/// with zero bytes to the column's maximum length.
///
/// Padding erases trailing zero bytes: `[0x01]` and `[0x01, 0x00]` in a
/// BINARY(4) column share one key, so an EXACT query on a String or Binary
/// column also returns rows whose value differs only by trailing zero bytes.
fn encode_column(value: &Value, column: &ColumnSchema) -> Result<Vec<u8>> {
	let mut bytes = encode(value, column)?;
	if let Some(max_length) = column.column_type.max_length() {
		bytes.resize(max_length as usize, 0x00);
	}
	Ok(bytes)
}

#[cfg(test)]
mod tests {
	use keyhive_type::ColumnType;

	use super::*;

	fn table() -> TableSchema {
		TableSchema::new(
			vec![
				ColumnSchema::new("c1", ColumnType::Long).unwrap(),
				ColumnSchema::new(
					"c2",
					ColumnType::String {
						max_length: 4,
					},
				)
				.unwrap(),
				ColumnSchema::new("c3", ColumnType::ULong).unwrap(),
			],
			vec![
				IndexSchema::new("i1", ["c1", "c2"], false).unwrap(),
				IndexSchema::new("empty", Vec::<String>::new(), false).unwrap(),
			],
		)
		.unwrap()
	}

	fn values(entries: Vec<(&str, Option<Value>)>) -> BTreeMap<String, Option<Value>> {
		entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
	}

	#[test]
	fn test_build_full_key() {
		let table = table();
		let builder = CompoundIndexKeyBuilder::new(TableId(1), IndexId(1), &table, table.index("i1").unwrap()).unwrap();
		let uuid = Uuid::from_u128(0xff);
		let key = builder
			.build(
				SortOrder::Ascending,
				&values(vec![("c1", Some(Value::Long(5))), ("c2", Some(Value::String("ab".to_string())))]),
				Some(uuid),
			)
			.unwrap();

		assert_eq!(key.columns, vec![Some(vec![0x80, 0, 0, 0, 0, 0, 0, 5]), Some(vec![b'a', b'b', 0, 0])]);
		assert_eq!(key.uuid, Some(uuid));
	}

	#[test]
	fn test_build_prefix_key() {
		let table = table();
		let builder = CompoundIndexKeyBuilder::new(TableId(1), IndexId(1), &table, table.index("i1").unwrap()).unwrap();
		let prefix = builder.build(SortOrder::Ascending, &values(vec![("c1", Some(Value::Long(5)))]), None).unwrap();
		let full = builder
			.build(
				SortOrder::Ascending,
				&values(vec![("c1", Some(Value::Long(5))), ("c2", None)]),
				Some(Uuid::from_u128(1)),
			)
			.unwrap();

		assert_eq!(prefix.columns.len(), 1);
		assert!(full.encode().starts_with(prefix.encode().as_slice()));
	}

	#[test]
	fn test_explicit_null_is_not_absent() {
		let table = table();
		let builder = CompoundIndexKeyBuilder::new(TableId(1), IndexId(1), &table, table.index("i1").unwrap()).unwrap();
		let key = builder.build(SortOrder::Ascending, &values(vec![("c1", None)]), None).unwrap();
		assert_eq!(key.columns, vec![None]);
	}

	#[test]
	fn test_gap_is_rejected() {
		let table = table();
		let builder = CompoundIndexKeyBuilder::new(TableId(1), IndexId(1), &table, table.index("i1").unwrap()).unwrap();
		let result = builder.build(SortOrder::Ascending, &values(vec![("c2", Some("ab".into()))]), None);
		assert!(matches!(result, Err(Error::InvalidArgument(_))));
	}

	#[test]
	fn test_uuid_needs_full_key() {
		let table = table();
		let builder = CompoundIndexKeyBuilder::new(TableId(1), IndexId(1), &table, table.index("i1").unwrap()).unwrap();
		let result =
			builder.build(SortOrder::Ascending, &values(vec![("c1", Some(Value::Long(1)))]), Some(Uuid::from_u128(1)));
		assert!(matches!(result, Err(Error::InvalidArgument(_))));
	}

	#[test]
	fn test_unknown_column_is_rejected() {
		let table = table();
		let builder = CompoundIndexKeyBuilder::new(TableId(1), IndexId(1), &table, table.index("i1").unwrap()).unwrap();
		let result = builder.build(SortOrder::Ascending, &values(vec![("c3", Some(Value::ULong(1)))]), None);
		assert!(matches!(result, Err(Error::SchemaMismatch(_))));
	}

	#[test]
	fn test_value_too_long() {
		let table = table();
		let builder = CompoundIndexKeyBuilder::new(TableId(1), IndexId(1), &table, table.index("i1").unwrap()).unwrap();
		let result = builder.build(
			SortOrder::Ascending,
			&values(vec![("c1", Some(Value::Long(1))), ("c2", Some("abcde".into()))]),
			None,
		);
		assert!(matches!(result, Err(Error::InvalidValue { .. })));
	}

	#[test]
	fn test_build_row() {
		let table = table();
		let builder = CompoundIndexKeyBuilder::new(TableId(1), IndexId(1), &table, table.index("i1").unwrap()).unwrap();
		let row = Row::new([("c1".to_string(), Value::Long(-1))].into_iter().collect());
		let key = builder.build_row(SortOrder::Descending, &row).unwrap();
		assert_eq!(key.columns, vec![Some(vec![0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]), None]);
		assert_eq!(key.uuid, Some(row.uuid));
	}

	#[test]
	fn test_zero_column_index() {
		let table = table();
		let builder =
			CompoundIndexKeyBuilder::new(TableId(1), IndexId(2), &table, table.index("empty").unwrap()).unwrap();
		let key = builder.build(SortOrder::Ascending, &BTreeMap::new(), Some(Uuid::from_u128(3))).unwrap();
		assert!(key.columns.is_empty());
		assert_eq!(key.encode().as_slice()[..5], builder.prefix(SortOrder::Ascending).as_slice()[..]);
	}

	#[test]
	fn test_descending_complements_values() {
		let table = table();
		let builder = CompoundIndexKeyBuilder::new(TableId(1), IndexId(1), &table, table.index("i1").unwrap()).unwrap();
		let low = builder.build(SortOrder::Descending, &values(vec![("c1", Some(Value::Long(1)))]), None).unwrap();
		let high = builder.build(SortOrder::Descending, &values(vec![("c1", Some(Value::Long(2)))]), None).unwrap();
		assert!(high.encode() < low.encode());
	}

	#[test]
	fn test_unknown_index_column() {
		let table = table();
		let index = IndexSchema::new("bad", ["nope"], false).unwrap();
		assert!(matches!(
			CompoundIndexKeyBuilder::new(TableId(1), IndexId(9), &table, &index),
			Err(Error::SchemaMismatch(_))
		));
	}

	#[test]
	fn test_padding_merges_trailing_zeros() {
		let table = TableSchema::new(
			vec![
				ColumnSchema::new(
					"c1",
					ColumnType::Binary {
						max_length: 4,
					},
				)
				.unwrap(),
			],
			vec![IndexSchema::new("i1", ["c1"], false).unwrap()],
		)
		.unwrap();
		let builder = CompoundIndexKeyBuilder::new(TableId(1), IndexId(1), &table, table.index("i1").unwrap()).unwrap();
		let key = |bytes: Vec<u8>| {
			builder.build(SortOrder::Ascending, &values(vec![("c1", Some(Value::Binary(bytes)))]), None).unwrap().encode()
		};

		assert_eq!(key(vec![0x01]), key(vec![0x01, 0x00]));
		assert_ne!(key(vec![0x01]), key(vec![0x01, 0x01]));
	}
}
