// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use super::MemoryStore;
use crate::{Result, backend::Mutation};

impl MemoryStore {
	pub(crate) fn apply_mutations(&self, mutations: Vec<Mutation>) -> Result<()> {
		let _guard = self.writer.lock();

		for mutation in mutations {
			match mutation {
				Mutation::Put {
					key,
					qualifier,
					value,
				} => {
					let mut cells = self.rows.get(&key).map(|entry| entry.value().clone()).unwrap_or_default();
					cells.insert(qualifier, value);
					self.rows.insert(key, cells);
				}
				Mutation::DeleteCell {
					key,
					qualifier,
				} => {
					let Some(entry) = self.rows.get(&key) else {
						continue;
					};
					let mut cells = entry.value().clone();
					cells.remove(&qualifier);
					if cells.is_empty() {
						self.rows.remove(&key);
					} else {
						self.rows.insert(key, cells);
					}
				}
				Mutation::Delete {
					key,
				} => {
					self.rows.remove(&key);
				}
			}
		}

		Ok(())
	}
}
