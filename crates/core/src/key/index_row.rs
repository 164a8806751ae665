// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use keyhive_type::{Error, IndexId, Result, SortOrder, TableId};
use uuid::Uuid;

use super::KeyKind;
use crate::{
	EncodedKey, EncodedKeyRange,
	encoding::{KeyDeserializer, KeySerializer, keycode::UUID_LEN, varint},
};

/// Marker preceding a NULL column. NULL sorts first in ascending keys and
/// last in descending keys.
pub const fn null_marker(order: SortOrder) -> u8 {
	match order {
		SortOrder::Ascending => 0x00,
		SortOrder::Descending => 0x01,
	}
}

/// Marker preceding a non-null column, followed by the column bytes.
pub const fn not_null_marker(order: SortOrder) -> u8 {
	match order {
		SortOrder::Ascending => 0x01,
		SortOrder::Descending => 0x00,
	}
}

/// The part of an index row key readable without the index schema.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IndexRowHeader {
	pub table: TableId,
	pub index: IndexId,
	pub order: SortOrder,
}

impl IndexRowHeader {
	pub fn decode(key: &[u8]) -> Result<Self> {
		Self::read(&mut KeyDeserializer::from_bytes(key))
	}

	fn read(de: &mut KeyDeserializer<'_>) -> Result<Self> {
		let tag = de.read_u8()?;
		let order = match KeyKind::try_from(tag) {
			Ok(KeyKind::AscendingIndexRow) => SortOrder::Ascending,
			Ok(KeyKind::DescendingIndexRow) => SortOrder::Descending,
			_ => return Err(Error::corrupted(format!("tag {tag:#04x} is not an index row"))),
		};

		let table = de.read_table_id()?;
		let index = de.read_index_id()?;

		Ok(Self {
			table,
			index,
			order,
		})
	}
}

/// A compound index key.
///
/// `columns` holds one entry per leading index column, `None` for NULL, and
/// otherwise the column's encoded bytes in ascending form. Descending keys
/// complement the column bytes when encoded. A key with fewer columns than
/// the index is a scan bound and never carries a UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRowKey {
	pub table: TableId,
	pub index: IndexId,
	pub order: SortOrder,
	pub columns: Vec<Option<Vec<u8>>>,
	pub uuid: Option<Uuid>,
}

impl IndexRowKey {
	pub fn kind(order: SortOrder) -> KeyKind {
		match order {
			SortOrder::Ascending => KeyKind::AscendingIndexRow,
			SortOrder::Descending => KeyKind::DescendingIndexRow,
		}
	}

	pub fn header(&self) -> IndexRowHeader {
		IndexRowHeader {
			table: self.table,
			index: self.index,
			order: self.order,
		}
	}

	pub fn encode(&self) -> EncodedKey {
		let columns: usize = self.columns.iter().map(|c| 1 + c.as_ref().map_or(0, Vec::len)).sum();
		let mut serializer = header_serializer(self.table, self.index, self.order, columns + UUID_LEN);

		for column in &self.columns {
			match column {
				None => {
					serializer.extend_u8(null_marker(self.order));
				}
				Some(bytes) => {
					serializer.extend_u8(not_null_marker(self.order));
					match self.order {
						SortOrder::Ascending => serializer.extend_raw(bytes),
						SortOrder::Descending => serializer.extend_complemented(bytes),
					};
				}
			}
		}

		if let Some(uuid) = &self.uuid {
			serializer.extend_uuid(uuid);
		}

		serializer.to_encoded_key()
	}

	/// Decodes an index row key given the key width of every index column, in
	/// index order.
	pub fn decode_with(key: &[u8], widths: &[usize]) -> Result<Self> {
		let mut de = KeyDeserializer::from_bytes(key);
		let header = IndexRowHeader::read(&mut de)?;
		let order = header.order;

		let mut columns = Vec::with_capacity(widths.len());
		for width in widths {
			if de.is_empty() {
				break;
			}

			let marker = de.read_u8()?;
			if marker == null_marker(order) {
				columns.push(None);
			} else if marker == not_null_marker(order) {
				let bytes = de.read_raw(*width)?;
				let bytes = match order {
					SortOrder::Ascending => bytes.to_vec(),
					SortOrder::Descending => bytes.iter().map(|b| !b).collect(),
				};
				columns.push(Some(bytes));
			} else {
				return Err(Error::corrupted(format!("invalid null marker {marker:#04x}")));
			}
		}

		let uuid = if columns.len() == widths.len() {
			de.read_optional_uuid()?
		} else {
			de.expect_end()?;
			None
		};

		Ok(Self {
			table: header.table,
			index: header.index,
			order,
			columns,
			uuid,
		})
	}

	/// The key of an index with no columns bound, a prefix of every key of
	/// that index and direction.
	pub fn prefix(table: TableId, index: IndexId, order: SortOrder) -> EncodedKey {
		header_serializer(table, index, order, 0).to_encoded_key()
	}

	/// Every row of one index in one direction.
	pub fn index_range(table: TableId, index: IndexId, order: SortOrder) -> EncodedKeyRange {
		EncodedKeyRange::prefix(&Self::prefix(table, index, order))
	}

	/// Every index row of `table` in one direction, across all its indices.
	pub fn table_range(table: TableId, order: SortOrder) -> EncodedKeyRange {
		let mut serializer = KeySerializer::with_capacity(1 + varint::encoded_len(table.0));
		serializer.extend_u8(Self::kind(order) as u8).extend_table_id(table);
		EncodedKeyRange::prefix(&serializer.to_encoded_key())
	}
}

fn header_serializer(table: TableId, index: IndexId, order: SortOrder, extra: usize) -> KeySerializer {
	let capacity = 1 + varint::encoded_len(table.0) + varint::encoded_len(index.0) + extra;
	let mut serializer = KeySerializer::with_capacity(capacity);
	serializer.extend_u8(IndexRowKey::kind(order) as u8).extend_table_id(table).extend_index_id(index);
	serializer
}
