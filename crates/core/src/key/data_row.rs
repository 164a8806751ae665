// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use keyhive_type::TableId;
use uuid::Uuid;

use super::{EncodableKey, KeyKind};
use crate::{
	EncodedKey, EncodedKeyRange,
	encoding::{KeyDeserializer, KeySerializer, keycode::UUID_LEN, varint},
};

/// The primary copy of a row, addressed by its UUID. Without a UUID the key
/// is the prefix shared by every row of the table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DataRowKey {
	pub table: TableId,
	pub uuid: Option<Uuid>,
}

impl EncodableKey for DataRowKey {
	const KIND: KeyKind = KeyKind::DataRow;

	fn encode(&self) -> EncodedKey {
		let mut serializer = KeySerializer::with_capacity(1 + varint::encoded_len(self.table.0) + UUID_LEN);
		serializer.extend_u8(Self::KIND as u8).extend_table_id(self.table);
		if let Some(uuid) = &self.uuid {
			serializer.extend_uuid(uuid);
		}
		serializer.to_encoded_key()
	}

	fn decode(key: &EncodedKey) -> Option<Self> {
		let mut de = KeyDeserializer::from_bytes(key.as_slice());

		let kind: KeyKind = de.read_u8().ok()?.try_into().ok()?;
		if kind != Self::KIND {
			return None;
		}

		let table = de.read_table_id().ok()?;
		let uuid = de.read_optional_uuid().ok()?;

		Some(Self {
			table,
			uuid,
		})
	}
}

impl DataRowKey {
	pub fn encoded(table: TableId, uuid: Uuid) -> EncodedKey {
		Self {
			table,
			uuid: Some(uuid),
		}
		.encode()
	}

	pub fn table_start(table: TableId) -> EncodedKey {
		Self {
			table,
			uuid: None,
		}
		.encode()
	}

	/// Every data row of `table`.
	pub fn full_scan(table: TableId) -> EncodedKeyRange {
		EncodedKeyRange::prefix(&Self::table_start(table))
	}
}
