// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

//! Builders and readers for the flat, tagged byte layout of row keys.
//!
//! The layout is not self-describing: the reader must know which fields to
//! expect in which order.

use keyhive_type::{Error, IndexId, Result, TableId};
use uuid::Uuid;

use super::varint;
use crate::EncodedKey;

pub const UUID_LEN: usize = 16;

pub struct KeySerializer {
	buffer: Vec<u8>,
}

impl KeySerializer {
	pub fn new() -> Self {
		Self {
			buffer: Vec::new(),
		}
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			buffer: Vec::with_capacity(capacity),
		}
	}

	pub fn extend_u8(&mut self, value: u8) -> &mut Self {
		self.buffer.push(value);
		self
	}

	/// Appends raw bytes with no framing.
	pub fn extend_raw(&mut self, bytes: &[u8]) -> &mut Self {
		self.buffer.extend_from_slice(bytes);
		self
	}

	/// Appends `bytes` with every byte complemented.
	pub fn extend_complemented(&mut self, bytes: &[u8]) -> &mut Self {
		self.buffer.extend(bytes.iter().map(|b| !b));
		self
	}

	pub fn extend_varint(&mut self, value: u64) -> &mut Self {
		varint::encode(value, &mut self.buffer);
		self
	}

	pub fn extend_table_id(&mut self, table: TableId) -> &mut Self {
		self.extend_varint(table.0)
	}

	pub fn extend_index_id(&mut self, index: IndexId) -> &mut Self {
		self.extend_varint(index.0)
	}

	pub fn extend_uuid(&mut self, uuid: &Uuid) -> &mut Self {
		self.buffer.extend_from_slice(uuid.as_bytes());
		self
	}

	pub fn len(&self) -> usize {
		self.buffer.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buffer.is_empty()
	}

	pub fn finish(self) -> Vec<u8> {
		self.buffer
	}

	pub fn to_encoded_key(self) -> EncodedKey {
		EncodedKey::new(self.buffer)
	}
}

impl Default for KeySerializer {
	fn default() -> Self {
		Self::new()
	}
}

pub struct KeyDeserializer<'a> {
	input: &'a [u8],
}

impl<'a> KeyDeserializer<'a> {
	pub fn from_bytes(input: &'a [u8]) -> Self {
		Self {
			input,
		}
	}

	pub fn read_u8(&mut self) -> Result<u8> {
		let (first, rest) =
			self.input.split_first().ok_or_else(|| Error::corrupted("unexpected end of key"))?;
		self.input = rest;
		Ok(*first)
	}

	pub fn read_raw(&mut self, len: usize) -> Result<&'a [u8]> {
		if self.input.len() < len {
			return Err(Error::corrupted(format!(
				"expected {len} more key bytes, found {}",
				self.input.len()
			)));
		}
		let (bytes, rest) = self.input.split_at(len);
		self.input = rest;
		Ok(bytes)
	}

	pub fn read_varint(&mut self) -> Result<u64> {
		let (value, consumed) = varint::decode(self.input)
			.ok_or_else(|| Error::corrupted(format!("invalid varint at {:02x?}", self.input)))?;
		self.input = &self.input[consumed..];
		Ok(value)
	}

	pub fn read_table_id(&mut self) -> Result<TableId> {
		self.read_varint().map(TableId)
	}

	pub fn read_index_id(&mut self) -> Result<IndexId> {
		self.read_varint().map(IndexId)
	}

	pub fn read_uuid(&mut self) -> Result<Uuid> {
		let bytes = self.read_raw(UUID_LEN)?;
		Uuid::from_slice(bytes).map_err(|err| Error::corrupted(err.to_string()))
	}

	/// Reads a trailing UUID if one is left, otherwise expects the end of the key.
	pub fn read_optional_uuid(&mut self) -> Result<Option<Uuid>> {
		match self.input.len() {
			0 => Ok(None),
			UUID_LEN => self.read_uuid().map(Some),
			n => Err(Error::corrupted(format!("{n} trailing key bytes cannot be a uuid"))),
		}
	}

	pub fn remaining(&self) -> &'a [u8] {
		self.input
	}

	pub fn is_empty(&self) -> bool {
		self.input.is_empty()
	}

	pub fn expect_end(&self) -> Result<()> {
		if self.input.is_empty() {
			Ok(())
		} else {
			Err(Error::corrupted(format!("unexpected trailing bytes {:02x?} at end of key", self.input)))
		}
	}
}
