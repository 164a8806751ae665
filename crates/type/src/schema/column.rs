// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, return_error};

/// The closed set of column types a row key can carry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
	/// Signed 64-bit integer.
	Long,
	/// Unsigned 64-bit integer.
	ULong,
	Double,
	Date,
	Time,
	DateTime,
	Decimal {
		precision: u32,
		scale: u32,
	},
	/// Variable length UTF-8 text, `max_length` counted in bytes.
	String {
		max_length: u32,
	},
	Binary {
		max_length: u32,
	},
}

impl ColumnType {
	pub fn is_variable_length(&self) -> bool {
		matches!(self, ColumnType::String { .. } | ColumnType::Binary { .. })
	}

	pub fn max_length(&self) -> Option<u32> {
		match self {
			ColumnType::String {
				max_length,
			}
			| ColumnType::Binary {
				max_length,
			} => Some(*max_length),
			_ => None,
		}
	}

	fn supports_auto_increment(&self) -> bool {
		matches!(self, ColumnType::Long | ColumnType::ULong | ColumnType::Double)
	}
}

impl Display for ColumnType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ColumnType::Long => f.write_str("LONG"),
			ColumnType::ULong => f.write_str("ULONG"),
			ColumnType::Double => f.write_str("DOUBLE"),
			ColumnType::Date => f.write_str("DATE"),
			ColumnType::Time => f.write_str("TIME"),
			ColumnType::DateTime => f.write_str("DATETIME"),
			ColumnType::Decimal {
				precision,
				scale,
			} => write!(f, "DECIMAL({precision}, {scale})"),
			ColumnType::String {
				max_length,
			} => write!(f, "STRING({max_length})"),
			ColumnType::Binary {
				max_length,
			} => write!(f, "BINARY({max_length})"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnSchema {
	pub name: String,
	pub column_type: ColumnType,
	pub nullable: bool,
	pub auto_increment: bool,
}

impl ColumnSchema {
	/// Starts a nullable, non auto-increment column definition.
	pub fn builder(name: impl Into<String>, column_type: ColumnType) -> ColumnSchemaBuilder {
		ColumnSchemaBuilder {
			name: name.into(),
			column_type,
			nullable: true,
			auto_increment: false,
		}
	}

	pub fn new(name: impl Into<String>, column_type: ColumnType) -> Result<Self> {
		Self::builder(name, column_type).build()
	}

	fn validate(&self) -> Result<()> {
		if self.name.is_empty() {
			return_error!(Error::invalid_argument("column name must not be empty"));
		}

		if self.auto_increment && !self.column_type.supports_auto_increment() {
			return_error!(Error::invalid_argument(format!(
				"column `{}` of type {} cannot be auto increment",
				self.name, self.column_type
			)));
		}

		if let ColumnType::Decimal {
			precision,
			scale,
		} = self.column_type
		{
			if precision < 2 || (precision == 2 && scale == 0) {
				return_error!(Error::invalid_argument(format!(
					"decimal column `{}` needs precision > 2 or a non-zero scale, got ({precision}, {scale})",
					self.name
				)));
			}
			if scale > precision {
				return_error!(Error::invalid_argument(format!(
					"decimal column `{}` has scale {scale} larger than precision {precision}",
					self.name
				)));
			}
		}

		Ok(())
	}
}

pub struct ColumnSchemaBuilder {
	name: String,
	column_type: ColumnType,
	nullable: bool,
	auto_increment: bool,
}

impl ColumnSchemaBuilder {
	pub fn nullable(mut self, nullable: bool) -> Self {
		self.nullable = nullable;
		self
	}

	pub fn auto_increment(mut self, auto_increment: bool) -> Self {
		self.auto_increment = auto_increment;
		self
	}

	pub fn build(self) -> Result<ColumnSchema> {
		let schema = ColumnSchema {
			name: self.name,
			column_type: self.column_type,
			nullable: self.nullable,
			auto_increment: self.auto_increment,
		};
		schema.validate()?;
		Ok(schema)
	}
}
