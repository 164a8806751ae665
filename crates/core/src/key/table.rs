// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

//! Per-table metadata rows, each addressed by the tag and the table identifier.

use keyhive_type::TableId;

use super::{EncodableKey, KeyKind};
use crate::{
	EncodedKey,
	encoding::{KeyDeserializer, KeySerializer, varint},
};

macro_rules! table_key {
	($(#[$meta:meta])* $name:ident, $kind:expr) => {
		$(#[$meta])*
		#[derive(Debug, Copy, Clone, PartialEq, Eq)]
		pub struct $name {
			pub table: TableId,
		}

		impl $name {
			pub fn new(table: TableId) -> Self {
				Self {
					table,
				}
			}

			pub fn encoded(table: TableId) -> EncodedKey {
				Self::new(table).encode()
			}
		}

		impl EncodableKey for $name {
			const KIND: KeyKind = $kind;

			fn encode(&self) -> EncodedKey {
				let mut serializer = KeySerializer::with_capacity(1 + varint::encoded_len(self.table.0));
				serializer.extend_u8(Self::KIND as u8).extend_table_id(self.table);
				serializer.to_encoded_key()
			}

			fn decode(key: &EncodedKey) -> Option<Self> {
				let mut de = KeyDeserializer::from_bytes(key.as_slice());

				let kind: KeyKind = de.read_u8().ok()?.try_into().ok()?;
				if kind != Self::KIND {
					return None;
				}

				let table = de.read_table_id().ok()?;
				de.expect_end().ok()?;

				Some(Self {
					table,
				})
			}
		}
	};
}

table_key!(
	/// Column name to column identifier map of a table, plus its column counter.
	ColumnListKey,
	KeyKind::ColumnList
);

table_key!(
	/// Index name to index identifier map of a table, plus its index counter.
	IndexListKey,
	KeyKind::IndexList
);

table_key!(RowCountKey, KeyKind::RowCount);

table_key!(AutoIncrementKey, KeyKind::AutoIncrement);

table_key!(
	/// The serialized table schema.
	SchemaKey,
	KeyKind::Schema
);
