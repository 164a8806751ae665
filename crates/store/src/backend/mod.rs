// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

//! The sorted key-value store rows are kept in.
//!
//! A stored row is a set of cells addressed by column family and qualifier.
//! Rows are returned in unsigned byte order of their key.

use std::collections::BTreeMap;

use keyhive_core::{EncodedKey, EncodedKeyRange};
pub use memory::MemoryStore;

use crate::Result;

mod memory;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Qualifier {
	pub family: String,
	pub name: Vec<u8>,
}

impl Qualifier {
	pub fn new(family: impl Into<String>, name: impl Into<Vec<u8>>) -> Self {
		Self {
			family: family.into(),
			name: name.into(),
		}
	}
}

pub type Cells = BTreeMap<Qualifier, Vec<u8>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Stored {
	pub key: EncodedKey,
	pub cells: Cells,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
	Put {
		key: EncodedKey,
		qualifier: Qualifier,
		value: Vec<u8>,
	},
	/// Removes one cell. A row left without cells disappears.
	DeleteCell {
		key: EncodedKey,
		qualifier: Qualifier,
	},
	/// Removes the whole row.
	Delete {
		key: EncodedKey,
	},
}

impl Mutation {
	pub fn key(&self) -> &EncodedKey {
		match self {
			Mutation::Put {
				key,
				..
			}
			| Mutation::DeleteCell {
				key,
				..
			}
			| Mutation::Delete {
				key,
			} => key,
		}
	}

	/// Approximate number of bytes the mutation sends to the store.
	pub fn size(&self) -> usize {
		match self {
			Mutation::Put {
				key,
				qualifier,
				value,
			} => key.len() + qualifier.family.len() + qualifier.name.len() + value.len(),
			Mutation::DeleteCell {
				key,
				qualifier,
			} => key.len() + qualifier.family.len() + qualifier.name.len(),
			Mutation::Delete {
				key,
			} => key.len(),
		}
	}
}

pub trait KvStore: Send + Sync {
	type Range<'a>: Iterator<Item = Stored>
	where
		Self: 'a;

	type RangeRev<'a>: Iterator<Item = Stored>
	where
		Self: 'a;

	fn get(&self, key: &EncodedKey) -> Result<Option<Cells>>;

	/// Applies the mutations in order. Each row changes atomically.
	fn apply(&self, mutations: Vec<Mutation>) -> Result<()>;

	fn put(&self, key: EncodedKey, qualifier: Qualifier, value: Vec<u8>) -> Result<()> {
		self.apply(vec![Mutation::Put {
			key,
			qualifier,
			value,
		}])
	}

	fn delete(&self, key: EncodedKey) -> Result<()> {
		self.apply(vec![Mutation::Delete {
			key,
		}])
	}

	fn range(&self, range: EncodedKeyRange) -> Result<Self::Range<'_>>;

	fn range_rev(&self, range: EncodedKeyRange) -> Result<Self::RangeRev<'_>>;

	fn prefix(&self, prefix: &EncodedKey) -> Result<Self::Range<'_>> {
		self.range(EncodedKeyRange::prefix(prefix))
	}
}
