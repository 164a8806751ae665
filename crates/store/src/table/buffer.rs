// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::mem;

use keyhive_core::EncodedKey;

use crate::backend::Mutation;

/// Mutations queued by a table until they are sent to the store in one batch.
#[derive(Debug)]
pub(crate) struct WriteBuffer {
	mutations: Vec<Mutation>,
	size: usize,
	limit: usize,
}

impl WriteBuffer {
	pub(crate) fn new(limit: usize) -> Self {
		Self {
			mutations: Vec::new(),
			size: 0,
			limit,
		}
	}

	pub(crate) fn extend(&mut self, mutations: impl IntoIterator<Item = Mutation>) {
		for mutation in mutations {
			self.size += mutation.size();
			self.mutations.push(mutation);
		}
	}

	/// Whether the queued bytes reached the configured limit.
	pub(crate) fn is_full(&self) -> bool {
		self.size >= self.limit
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.mutations.is_empty()
	}

	/// Whether the last queued put or delete of `key` leaves a row behind,
	/// `None` when no queued mutation decides it.
	pub(crate) fn pending(&self, key: &EncodedKey) -> Option<bool> {
		self.mutations.iter().rev().filter(|m| m.key() == key).find_map(|m| match m {
			Mutation::Put {
				..
			} => Some(true),
			Mutation::Delete {
				..
			} => Some(false),
			Mutation::DeleteCell {
				..
			} => None,
		})
	}

	pub(crate) fn take(&mut self) -> Vec<Mutation> {
		self.size = 0;
		mem::take(&mut self.mutations)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::backend::Qualifier;

	fn put(value: usize) -> Mutation {
		Mutation::Put {
			key: EncodedKey::new(vec![0x06]),
			qualifier: Qualifier::new("nic", "row"),
			value: vec![0; value],
		}
	}

	#[test]
	fn test_fills_up() {
		let mut buffer = WriteBuffer::new(20);
		assert!(buffer.is_empty());

		buffer.extend([put(4)]);
		assert!(!buffer.is_full());

		buffer.extend([put(12)]);
		assert!(buffer.is_full());
	}

	#[test]
	fn test_take_resets() {
		let mut buffer = WriteBuffer::new(10);
		buffer.extend([put(8), put(8)]);
		let mutations = buffer.take();
		assert_eq!(mutations.len(), 2);
		assert!(buffer.is_empty());
		assert!(!buffer.is_full());
	}

	#[test]
	fn test_pending() {
		let mut buffer = WriteBuffer::new(100);
		let key = EncodedKey::new(vec![0x06]);
		assert_eq!(buffer.pending(&key), None);

		buffer.extend([put(1)]);
		assert_eq!(buffer.pending(&key), Some(true));

		buffer.extend([Mutation::Delete {
			key: key.clone(),
		}]);
		assert_eq!(buffer.pending(&key), Some(false));
		assert_eq!(buffer.pending(&EncodedKey::new(vec![0x07])), None);
	}
}
