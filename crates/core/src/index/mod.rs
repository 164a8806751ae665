// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

pub use builder::CompoundIndexKeyBuilder;
pub use compare::KeyComparator;
pub use scan::{ScanStrategy, ScanStrategySelector};

mod builder;
mod compare;
mod scan;
