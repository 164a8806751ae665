// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::fmt::{Display, Formatter};

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::ColumnType;

pub use temporal::{
	DATE_FORMATS, DATETIME_FORMATS, TIME_FORMATS, format_date, format_datetime, format_time, parse_date,
	parse_datetime, parse_time,
};

mod decimal;
mod parse;
mod temporal;

/// A typed column value. SQL NULL is represented by the absence of a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
	Long(i64),
	ULong(u64),
	Double(f64),
	Date(NaiveDate),
	Time(NaiveTime),
	DateTime(NaiveDateTime),
	Decimal(#[serde(with = "decimal::serde_string")] BigDecimal),
	String(String),
	Binary(#[serde(with = "serde_bytes")] Vec<u8>),
}

impl Value {
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Long(_) => "LONG",
			Value::ULong(_) => "ULONG",
			Value::Double(_) => "DOUBLE",
			Value::Date(_) => "DATE",
			Value::Time(_) => "TIME",
			Value::DateTime(_) => "DATETIME",
			Value::Decimal(_) => "DECIMAL",
			Value::String(_) => "STRING",
			Value::Binary(_) => "BINARY",
		}
	}

	/// Whether the value may be stored in a column of the given type.
	///
	/// Unsigned columns also accept non-negative signed values; the codec
	/// rejects negative ones.
	pub fn is_compatible(&self, column_type: &ColumnType) -> bool {
		matches!(
			(self, column_type),
			(Value::Long(_), ColumnType::Long)
				| (Value::ULong(_), ColumnType::ULong)
				| (Value::Long(_), ColumnType::ULong)
				| (Value::Double(_), ColumnType::Double)
				| (Value::Date(_), ColumnType::Date)
				| (Value::Time(_), ColumnType::Time)
				| (Value::DateTime(_), ColumnType::DateTime)
				| (Value::Decimal(_), ColumnType::Decimal { .. })
				| (Value::String(_), ColumnType::String { .. })
				| (Value::Binary(_), ColumnType::Binary { .. })
		)
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Long(v) => Display::fmt(v, f),
			Value::ULong(v) => Display::fmt(v, f),
			Value::Double(v) => Display::fmt(v, f),
			Value::Date(v) => f.write_str(&format_date(v)),
			Value::Time(v) => f.write_str(&format_time(v)),
			Value::DateTime(v) => f.write_str(&format_datetime(v)),
			Value::Decimal(v) => Display::fmt(v, f),
			Value::String(v) => f.write_str(v),
			Value::Binary(v) => {
				for byte in v {
					write!(f, "{byte:02x}")?;
				}
				Ok(())
			}
		}
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Long(value)
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		Value::ULong(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Double(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<BigDecimal> for Value {
	fn from(value: BigDecimal) -> Self {
		Value::Decimal(value)
	}
}

impl From<NaiveDate> for Value {
	fn from(value: NaiveDate) -> Self {
		Value::Date(value)
	}
}

impl From<NaiveTime> for Value {
	fn from(value: NaiveTime) -> Self {
		Value::Time(value)
	}
}

impl From<NaiveDateTime> for Value {
	fn from(value: NaiveDateTime) -> Self {
		Value::DateTime(value)
	}
}

#[cfg(test)]
mod tests {
	use std::str::FromStr;

	use super::*;

	#[test]
	fn test_display() {
		assert_eq!(Value::Long(-5).to_string(), "-5");
		assert_eq!(Value::Binary(vec![0x00, 0xab]).to_string(), "00ab");
		assert_eq!(Value::Date(NaiveDate::from_ymd_opt(1989, 5, 13).unwrap()).to_string(), "1989-05-13");
		assert_eq!(Value::Decimal(BigDecimal::from_str("123.45").unwrap()).to_string(), "123.45");
	}

	#[test]
	fn test_postcard_roundtrip() {
		let values = vec![
			Value::Long(i64::MIN),
			Value::ULong(u64::MAX),
			Value::Double(-12.12),
			Value::Date(NaiveDate::from_ymd_opt(2000, 2, 29).unwrap()),
			Value::Time(NaiveTime::from_hms_opt(7, 32, 15).unwrap()),
			Value::DateTime(NaiveDate::from_ymd_opt(1989, 5, 13).unwrap().and_hms_opt(7, 32, 15).unwrap()),
			Value::Decimal(BigDecimal::from_str("-999.99").unwrap()),
			Value::String("honey".to_string()),
			Value::Binary(vec![0, 1, 2, 255]),
		];

		for value in values {
			let bytes = postcard::to_stdvec(&value).unwrap();
			let decoded: Value = postcard::from_bytes(&bytes).unwrap();
			assert_eq!(decoded, value);
		}
	}
}
