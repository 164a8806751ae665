// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::cmp::Ordering;

use keyhive_type::{Error, IndexId, Result, SortOrder, TableId};

use super::CompoundIndexKeyBuilder;
use crate::{
	EncodedKey,
	encoding::KeyDeserializer,
	key::{DataRowKey, EncodableKey, IndexRowHeader, IndexRowKey, KeyKind},
};

/// The logical total order over row keys.
///
/// Keys are ordered by tag, then table, then index, then column by column:
/// NULL first in ascending keys and last in descending keys, non-null values
/// by their encoded bytes (reversed for descending keys). A key that runs out
/// of columns first sorts first, and a key without a UUID sorts before one
/// with a UUID. This agrees with unsigned byte comparison of the encoded keys.
///
/// Index row columns of the configured index are decoded with its schema;
/// keys of any other index are only compared up to their index identifier.
#[derive(Debug, Clone)]
pub struct KeyComparator {
	table: TableId,
	index: IndexId,
	widths: Vec<usize>,
}

impl KeyComparator {
	pub fn new(builder: &CompoundIndexKeyBuilder<'_>) -> Self {
		Self {
			table: builder.table_id(),
			index: builder.index_id(),
			widths: builder.widths(),
		}
	}

	pub fn compare(&self, left: &EncodedKey, right: &EncodedKey) -> Result<Ordering> {
		let left_tag = tag(left)?;
		let right_tag = tag(right)?;
		if left_tag != right_tag {
			return Ok(left_tag.cmp(&right_tag));
		}

		match left_tag {
			KeyKind::TableList => Ok(Ordering::Equal),
			KeyKind::ColumnList
			| KeyKind::IndexList
			| KeyKind::RowCount
			| KeyKind::AutoIncrement
			| KeyKind::Schema => Ok(table_of(left)?.cmp(&table_of(right)?)),
			KeyKind::DataRow => {
				let left = DataRowKey::decode(left).ok_or_else(|| corrupted(left))?;
				let right = DataRowKey::decode(right).ok_or_else(|| corrupted(right))?;
				Ok(left.table.cmp(&right.table).then_with(|| left.uuid.cmp(&right.uuid)))
			}
			KeyKind::AscendingIndexRow | KeyKind::DescendingIndexRow => self.compare_index_rows(left, right),
		}
	}

	fn compare_index_rows(&self, left: &EncodedKey, right: &EncodedKey) -> Result<Ordering> {
		let left_header = IndexRowHeader::decode(left)?;
		let right_header = IndexRowHeader::decode(right)?;

		let ordering = left_header
			.table
			.cmp(&right_header.table)
			.then_with(|| left_header.index.cmp(&right_header.index));
		if ordering != Ordering::Equal {
			return Ok(ordering);
		}

		if left_header.table != self.table || left_header.index != self.index {
			return Err(Error::invalid_argument(format!(
				"comparator for table {} index {} cannot order keys of table {} index {}",
				self.table, self.index, left_header.table, left_header.index
			)));
		}

		let left = IndexRowKey::decode_with(left, &self.widths)?;
		let right = IndexRowKey::decode_with(right, &self.widths)?;
		Ok(compare_columns(left_header.order, &left, &right))
	}
}

fn compare_columns(order: SortOrder, left: &IndexRowKey, right: &IndexRowKey) -> Ordering {
	for (l, r) in left.columns.iter().zip(&right.columns) {
		let ordering = match (l, r) {
			(None, None) => Ordering::Equal,
			(None, Some(_)) => null_ordering(order),
			(Some(_), None) => null_ordering(order).reverse(),
			(Some(l), Some(r)) => match order {
				SortOrder::Ascending => l.cmp(r),
				SortOrder::Descending => r.cmp(l),
			},
		};
		if ordering != Ordering::Equal {
			return ordering;
		}
	}

	left.columns.len().cmp(&right.columns.len()).then_with(|| left.uuid.cmp(&right.uuid))
}

/// Where a NULL sorts relative to a non-null value.
fn null_ordering(order: SortOrder) -> Ordering {
	match order {
		SortOrder::Ascending => Ordering::Less,
		SortOrder::Descending => Ordering::Greater,
	}
}

fn tag(key: &EncodedKey) -> Result<KeyKind> {
	let first = *key.first().ok_or_else(|| Error::corrupted("empty key"))?;
	KeyKind::try_from(first).map_err(|tag| Error::corrupted(format!("unknown key tag {tag:#04x}")))
}

fn table_of(key: &EncodedKey) -> Result<TableId> {
	let mut de = KeyDeserializer::from_bytes(key.as_slice());
	de.read_u8()?;
	let table = de.read_table_id()?;
	de.expect_end()?;
	Ok(table)
}

fn corrupted(key: &EncodedKey) -> Error {
	Error::corrupted(format!("undecodable key {key:?}"))
}
