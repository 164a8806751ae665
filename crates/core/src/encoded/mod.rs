// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::{
	fmt::{Debug, Formatter},
	ops::Deref,
};

pub use range::EncodedKeyRange;

mod range;

/// An order-preserving binary key as laid out in the store.
#[derive(Clone, PartialOrd, Ord, Hash, PartialEq, Eq)]
pub struct EncodedKey(pub Vec<u8>);

impl Deref for EncodedKey {
	type Target = Vec<u8>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl EncodedKey {
	pub fn new(key: impl Into<Vec<u8>>) -> Self {
		Self(key.into())
	}

	/// The smallest key greater than every key starting with `self`, or `None`
	/// when no such key exists (the key is empty or all `0xff`).
	pub fn prefix_successor(&self) -> Option<EncodedKey> {
		let mut bytes = self.as_slice().to_vec();
		while let Some(last) = bytes.pop() {
			if last < 0xff {
				bytes.push(last + 1);
				return Some(EncodedKey::new(bytes));
			}
		}
		None
	}

	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}
}

impl Debug for EncodedKey {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("EncodedKey(0x")?;
		for byte in self.as_slice() {
			write!(f, "{byte:02x}")?;
		}
		f.write_str(")")
	}
}

impl From<Vec<u8>> for EncodedKey {
	fn from(bytes: Vec<u8>) -> Self {
		Self::new(bytes)
	}
}

impl From<&[u8]> for EncodedKey {
	fn from(bytes: &[u8]) -> Self {
		Self::new(bytes.to_vec())
	}
}
