// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use keyhive_core::EncodedKey;

use super::MemoryStore;
use crate::{Result, backend::Cells};

impl MemoryStore {
	pub(crate) fn get_cells(&self, key: &EncodedKey) -> Result<Option<Cells>> {
		Ok(self.rows.get(key).map(|entry| entry.value().clone()))
	}
}
