// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use encoded::{EncodedKey, EncodedKeyRange};
pub use index::{CompoundIndexKeyBuilder, KeyComparator, ScanStrategy, ScanStrategySelector};
pub use keyhive_type::{Error, Result};

mod encoded;
pub mod encoding;
pub mod index;
pub mod key;
