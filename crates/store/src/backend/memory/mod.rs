// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::{ops::Deref, sync::Arc};

use crossbeam_skiplist::SkipMap;
use keyhive_core::EncodedKey;
use parking_lot::Mutex;
pub use range::{Range, RangeRev};

use super::Cells;

mod apply;
mod get;
mod range;

/// A process local store on a lock-free skip list.
///
/// Readers never block. Writers are serialized so that read-modify-write of
/// a row's cells cannot lose concurrent updates.
#[derive(Clone)]
pub struct MemoryStore(Arc<MemoryStoreInner>);

pub struct MemoryStoreInner {
	rows: SkipMap<EncodedKey, Cells>,
	writer: Mutex<()>,
}

impl Deref for MemoryStore {
	type Target = MemoryStoreInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryStore {
	pub fn new() -> Self {
		Self(Arc::new(MemoryStoreInner {
			rows: SkipMap::new(),
			writer: Mutex::new(()),
		}))
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}
