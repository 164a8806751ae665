// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use error::{Error, Result};
pub use id::{IndexId, TableId};
pub use query::{QueryKey, QueryType};
pub use row::Row;
pub use schema::{ColumnSchema, ColumnType, IndexSchema, TableSchema};
pub use sort::SortOrder;
pub use value::Value;

mod error;
mod id;
mod query;
mod row;
pub mod schema;
mod sort;
pub mod value;
