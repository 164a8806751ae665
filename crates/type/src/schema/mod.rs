// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

pub use column::{ColumnSchema, ColumnSchemaBuilder, ColumnType};
pub use index::IndexSchema;
pub use table::TableSchema;

mod column;
mod index;
mod table;
