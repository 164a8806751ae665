// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use backend::{Cells, KvStore, MemoryStore, Mutation, Qualifier, Stored};
pub use catalog::{Catalog, SchemaCache};
pub use config::StoreConfig;
pub use keyhive_type::{Error, Result};
pub use table::{IndexScanner, Table, TableScanner};

pub mod backend;
pub mod catalog;
pub mod config;
pub mod table;
