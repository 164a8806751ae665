// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

//! Row keys. Every key starts with a one byte [`KeyKind`] tag, so all keys of
//! one kind sort contiguously and the tag order is the primary sort order.

pub use data_row::DataRowKey;
pub use index_row::{IndexRowHeader, IndexRowKey, not_null_marker, null_marker};
pub use table::{AutoIncrementKey, ColumnListKey, IndexListKey, RowCountKey, SchemaKey};
pub use table_list::TableListKey;

use crate::EncodedKey;

mod data_row;
mod index_row;
mod table;
mod table_list;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum KeyKind {
	TableList = 0x00,
	ColumnList = 0x01,
	IndexList = 0x02,
	RowCount = 0x03,
	AutoIncrement = 0x04,
	Schema = 0x05,
	DataRow = 0x06,
	AscendingIndexRow = 0x07,
	DescendingIndexRow = 0x08,
}

impl TryFrom<u8> for KeyKind {
	type Error = u8;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			0x00 => Ok(KeyKind::TableList),
			0x01 => Ok(KeyKind::ColumnList),
			0x02 => Ok(KeyKind::IndexList),
			0x03 => Ok(KeyKind::RowCount),
			0x04 => Ok(KeyKind::AutoIncrement),
			0x05 => Ok(KeyKind::Schema),
			0x06 => Ok(KeyKind::DataRow),
			0x07 => Ok(KeyKind::AscendingIndexRow),
			0x08 => Ok(KeyKind::DescendingIndexRow),
			other => Err(other),
		}
	}
}

pub trait EncodableKey {
	const KIND: KeyKind;

	fn encode(&self) -> EncodedKey;

	fn decode(key: &EncodedKey) -> Option<Self>
	where
		Self: Sized;
}

/// Any row key, decoded far enough to tell what it addresses. Index row
/// columns need the index schema and are left to [`IndexRowKey::decode_with`].
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
	TableList(TableListKey),
	ColumnList(ColumnListKey),
	IndexList(IndexListKey),
	RowCount(RowCountKey),
	AutoIncrement(AutoIncrementKey),
	Schema(SchemaKey),
	DataRow(DataRowKey),
	IndexRow(IndexRowHeader),
}

impl Key {
	pub fn decode(key: &EncodedKey) -> Option<Self> {
		let kind = KeyKind::try_from(*key.first()?).ok()?;
		let decoded = match kind {
			KeyKind::TableList => Key::TableList(TableListKey::decode(key)?),
			KeyKind::ColumnList => Key::ColumnList(ColumnListKey::decode(key)?),
			KeyKind::IndexList => Key::IndexList(IndexListKey::decode(key)?),
			KeyKind::RowCount => Key::RowCount(RowCountKey::decode(key)?),
			KeyKind::AutoIncrement => Key::AutoIncrement(AutoIncrementKey::decode(key)?),
			KeyKind::Schema => Key::Schema(SchemaKey::decode(key)?),
			KeyKind::DataRow => Key::DataRow(DataRowKey::decode(key)?),
			KeyKind::AscendingIndexRow | KeyKind::DescendingIndexRow => {
				Key::IndexRow(IndexRowHeader::decode(key.as_slice()).ok()?)
			}
		};
		Some(decoded)
	}

	pub fn kind(&self) -> KeyKind {
		match self {
			Key::TableList(_) => KeyKind::TableList,
			Key::ColumnList(_) => KeyKind::ColumnList,
			Key::IndexList(_) => KeyKind::IndexList,
			Key::RowCount(_) => KeyKind::RowCount,
			Key::AutoIncrement(_) => KeyKind::AutoIncrement,
			Key::Schema(_) => KeyKind::Schema,
			Key::DataRow(_) => KeyKind::DataRow,
			Key::IndexRow(header) => IndexRowKey::kind(header.order),
		}
	}
}
