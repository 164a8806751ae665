// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use crossbeam_skiplist::map::Range as MapRange;
use keyhive_core::{EncodedKey, EncodedKeyRange};

use super::MemoryStore;
use crate::{
	Result,
	backend::{Cells, KvStore, Mutation, Stored},
};

impl KvStore for MemoryStore {
	type Range<'a> = Range<'a>;
	type RangeRev<'a> = RangeRev<'a>;

	fn get(&self, key: &EncodedKey) -> Result<Option<Cells>> {
		self.get_cells(key)
	}

	fn apply(&self, mutations: Vec<Mutation>) -> Result<()> {
		self.apply_mutations(mutations)
	}

	fn range(&self, range: EncodedKeyRange) -> Result<Self::Range<'_>> {
		Ok(Range {
			range: self.rows.range(range),
		})
	}

	fn range_rev(&self, range: EncodedKeyRange) -> Result<Self::RangeRev<'_>> {
		Ok(RangeRev {
			range: self.rows.range(range),
		})
	}
}

pub struct Range<'a> {
	pub(crate) range: MapRange<'a, EncodedKey, EncodedKeyRange, EncodedKey, Cells>,
}

impl Iterator for Range<'_> {
	type Item = Stored;

	fn next(&mut self) -> Option<Self::Item> {
		let entry = self.range.next()?;
		Some(Stored {
			key: entry.key().clone(),
			cells: entry.value().clone(),
		})
	}
}

pub struct RangeRev<'a> {
	pub(crate) range: MapRange<'a, EncodedKey, EncodedKeyRange, EncodedKey, Cells>,
}

impl Iterator for RangeRev<'_> {
	type Item = Stored;

	fn next(&mut self) -> Option<Self::Item> {
		let entry = self.range.next_back()?;
		Some(Stored {
			key: entry.key().clone(),
			cells: entry.value().clone(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::backend::Qualifier;

	fn key(bytes: &[u8]) -> EncodedKey {
		EncodedKey::new(bytes.to_vec())
	}

	fn qualifier(name: &str) -> Qualifier {
		Qualifier::new("nic", name)
	}

	fn store() -> MemoryStore {
		let store = MemoryStore::new();
		for k in [[0x06, 0x01], [0x06, 0x02], [0x06, 0x03], [0x07, 0x01]] {
			store.put(key(&k), qualifier("row"), k.to_vec()).unwrap();
		}
		store
	}

	#[test]
	fn test_put_get() {
		let store = MemoryStore::new();
		assert_eq!(store.get(&key(&[1])).unwrap(), None);

		store.put(key(&[1]), qualifier("a"), vec![1]).unwrap();
		store.put(key(&[1]), qualifier("b"), vec![2]).unwrap();
		store.put(key(&[1]), qualifier("a"), vec![3]).unwrap();

		let cells = store.get(&key(&[1])).unwrap().unwrap();
		assert_eq!(cells.len(), 2);
		assert_eq!(cells[&qualifier("a")], vec![3]);
		assert_eq!(cells[&qualifier("b")], vec![2]);
	}

	#[test]
	fn test_delete_cell() {
		let store = MemoryStore::new();
		store.put(key(&[1]), qualifier("a"), vec![1]).unwrap();
		store.put(key(&[1]), qualifier("b"), vec![2]).unwrap();

		store
			.apply(vec![Mutation::DeleteCell {
				key: key(&[1]),
				qualifier: qualifier("a"),
			}])
			.unwrap();
		assert_eq!(store.get(&key(&[1])).unwrap().unwrap().len(), 1);

		store
			.apply(vec![Mutation::DeleteCell {
				key: key(&[1]),
				qualifier: qualifier("b"),
			}])
			.unwrap();
		assert_eq!(store.get(&key(&[1])).unwrap(), None);
		assert!(store.is_empty());
	}

	#[test]
	fn test_delete() {
		let store = store();
		store.delete(key(&[0x06, 0x02])).unwrap();
		assert_eq!(store.get(&key(&[0x06, 0x02])).unwrap(), None);
		assert_eq!(store.len(), 3);
	}

	#[test]
	fn test_prefix() {
		let store = store();
		let keys: Vec<_> = store.prefix(&key(&[0x06])).unwrap().map(|s| s.key).collect();
		assert_eq!(keys, vec![key(&[0x06, 0x01]), key(&[0x06, 0x02]), key(&[0x06, 0x03])]);
	}

	#[test]
	fn test_range_rev() {
		let store = store();
		let range = EncodedKeyRange::start_end(Some(key(&[0x06, 0x02])), Some(key(&[0x07])));
		let keys: Vec<_> = store.range_rev(range).unwrap().map(|s| s.key).collect();
		assert_eq!(keys, vec![key(&[0x06, 0x03]), key(&[0x06, 0x02])]);
	}

	#[test]
	fn test_clones_share_rows() {
		let store = MemoryStore::new();
		let clone = store.clone();
		clone.put(key(&[9]), qualifier("a"), vec![]).unwrap();
		assert!(store.get(&key(&[9])).unwrap().is_some());
	}
}
