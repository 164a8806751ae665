// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::Signed;

use super::{decimal::parse_decimal, parse_date, parse_datetime, parse_time};
use crate::{ColumnSchema, ColumnType, Error, Result, Value};

impl Value {
	/// Parses the textual form of a field for the given column.
	///
	/// Empty input means NULL for every type except String and Binary, where
	/// it is the empty value.
	pub fn parse(text: &str, column: &ColumnSchema) -> Result<Option<Value>> {
		let ty = column.column_type;

		if text.is_empty() && !ty.is_variable_length() {
			if column.nullable {
				return Ok(None);
			}
			return Err(Error::invalid_value(
				&column.name,
				"expected a value for a non-null column, but no value was given",
			));
		}

		let value = match ty {
			ColumnType::Long => Value::Long(i64::from_str(text).map_err(|_| Error::parse(text, ty.to_string()))?),
			ColumnType::ULong => Value::ULong(parse_unsigned(text, column)?),
			ColumnType::Double => {
				Value::Double(f64::from_str(text).map_err(|_| Error::parse(text, ty.to_string()))?)
			}
			ColumnType::Date => Value::Date(parse_date(text)?),
			ColumnType::Time => Value::Time(parse_time(text)?),
			ColumnType::DateTime => Value::DateTime(parse_datetime(text)?),
			ColumnType::Decimal {
				..
			} => Value::Decimal(parse_decimal(text)?),
			ColumnType::String {
				..
			} => Value::String(text.to_string()),
			ColumnType::Binary {
				..
			} => Value::Binary(text.as_bytes().to_vec()),
		};

		Ok(Some(value))
	}
}

fn parse_unsigned(text: &str, column: &ColumnSchema) -> Result<u64> {
	let number = BigInt::from_str(text).map_err(|_| Error::parse(text, ColumnType::ULong.to_string()))?;
	if number.is_negative() {
		return Err(Error::invalid_value(
			&column.name,
			format!("negative value provided for unsigned column: {text}"),
		));
	}
	u64::try_from(&number)
		.map_err(|_| Error::invalid_value(&column.name, format!("value {text} exceeds the unsigned 64-bit range")))
}

#[cfg(test)]
mod tests {
	use bigdecimal::BigDecimal;
	use chrono::{NaiveDate, NaiveTime};

	use super::*;

	fn column(ty: ColumnType) -> ColumnSchema {
		ColumnSchema::new("c1", ty).unwrap()
	}

	#[test]
	fn test_parse_empty_nullable_long() {
		assert_eq!(Value::parse("", &column(ColumnType::Long)).unwrap(), None);
	}

	#[test]
	fn test_parse_empty_non_nullable_long() {
		let schema = ColumnSchema::builder("c1", ColumnType::Long).nullable(false).build().unwrap();
		assert!(matches!(Value::parse("", &schema), Err(Error::InvalidValue { .. })));
	}

	#[test]
	fn test_parse_empty_string_is_value() {
		let schema = column(ColumnType::String {
			max_length: 4,
		});
		assert_eq!(Value::parse("", &schema).unwrap(), Some(Value::String(String::new())));
	}

	#[test]
	fn test_parse_long() {
		let schema = column(ColumnType::Long);
		assert_eq!(Value::parse("-123", &schema).unwrap(), Some(Value::Long(-123)));
		assert_eq!(Value::parse("9223372036854775807", &schema).unwrap(), Some(Value::Long(i64::MAX)));
		assert_eq!(Value::parse("-9223372036854775808", &schema).unwrap(), Some(Value::Long(i64::MIN)));
		assert!(matches!(Value::parse("12a", &schema), Err(Error::Parse { .. })));
	}

	#[test]
	fn test_parse_ulong() {
		let schema = column(ColumnType::ULong);
		assert_eq!(Value::parse("18446744073709551615", &schema).unwrap(), Some(Value::ULong(u64::MAX)));
		assert_eq!(Value::parse("123", &schema).unwrap(), Some(Value::ULong(123)));
	}

	#[test]
	fn test_parse_ulong_negative_input() {
		let schema = column(ColumnType::ULong);
		assert!(matches!(Value::parse("-123", &schema), Err(Error::InvalidValue { .. })));
		assert!(matches!(Value::parse("18446744073709551616", &schema), Err(Error::InvalidValue { .. })));
	}

	#[test]
	fn test_parse_double() {
		let schema = column(ColumnType::Double);
		assert_eq!(Value::parse("-12.12", &schema).unwrap(), Some(Value::Double(-12.12)));
	}

	#[test]
	fn test_parse_temporal() {
		assert_eq!(
			Value::parse("1989/05/13", &column(ColumnType::Date)).unwrap(),
			Some(Value::Date(NaiveDate::from_ymd_opt(1989, 5, 13).unwrap()))
		);
		assert_eq!(
			Value::parse("073215", &column(ColumnType::Time)).unwrap(),
			Some(Value::Time(NaiveTime::from_hms_opt(7, 32, 15).unwrap()))
		);
		assert!(matches!(Value::parse("1989_05_13", &column(ColumnType::Date)), Err(Error::Parse { .. })));
	}

	#[test]
	fn test_parse_decimal() {
		let schema = column(ColumnType::Decimal {
			precision: 5,
			scale: 2,
		});
		assert_eq!(
			Value::parse("123.45", &schema).unwrap(),
			Some(Value::Decimal(BigDecimal::from_str("123.45").unwrap()))
		);
	}
}
