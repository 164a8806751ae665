// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

//! Order-preserving encoding of a single column value.
//!
//! * `Long`: big-endian, sign bit flipped.
//! * `ULong`: big-endian.
//! * `Double`: big-endian IEEE-754 bits, sign bit flipped, all bits flipped if negative.
//! * `Date`, `DateTime`: ASCII of the canonical `yyyy-MM-dd` / `yyyy-MM-dd HH:mm:ss` text.
//! * `Time`: the 8 ASCII bytes of the canonical `HH:mm:ss` text read as a
//!   big-endian signed integer, then encoded like `Long`.
//! * `Decimal`: packed fixed-width sign and magnitude, see [`bytes_from_digits`].
//! * `String`, `Binary`: raw bytes, at most `max_length` of them.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use keyhive_type::{
	ColumnSchema, ColumnType, Error, Result, Value,
	value::{format_date, format_datetime, format_time},
};

pub use super::decimal::bytes_from_digits;
use super::decimal;

const SIGN_MASK: u64 = 1 << 63;

const DATE_WIDTH: usize = 10;
const TIME_WIDTH: usize = 8;
const DATETIME_WIDTH: usize = 19;

/// Fixed number of bytes a value of `column_type` occupies inside a compound
/// key. Variable length types are padded up to their maximum length.
pub fn key_width(column_type: &ColumnType) -> usize {
	match column_type {
		ColumnType::Long | ColumnType::ULong | ColumnType::Double => 8,
		ColumnType::Time => TIME_WIDTH,
		ColumnType::Date => DATE_WIDTH,
		ColumnType::DateTime => DATETIME_WIDTH,
		ColumnType::Decimal {
			precision,
			scale,
		} => decimal::packed_width(*precision, *scale),
		ColumnType::String {
			max_length,
		}
		| ColumnType::Binary {
			max_length,
		} => *max_length as usize,
	}
}

pub fn encode(value: &Value, column: &ColumnSchema) -> Result<Vec<u8>> {
	let bytes = match (&column.column_type, value) {
		(ColumnType::Long, Value::Long(v)) => encode_i64(*v).to_vec(),
		(ColumnType::ULong, Value::ULong(v)) => v.to_be_bytes().to_vec(),
		(ColumnType::ULong, Value::Long(v)) => {
			let v = u64::try_from(*v).map_err(|_| {
				Error::invalid_value(&column.name, format!("negative value {v} for an unsigned column"))
			})?;
			v.to_be_bytes().to_vec()
		}
		(ColumnType::Double, Value::Double(v)) => {
			if v.is_nan() {
				return Err(Error::invalid_value(&column.name, "NaN has no position in the key order"));
			}
			encode_f64(*v).to_vec()
		}
		(ColumnType::Date, Value::Date(v)) => {
			check_year(v.year(), column)?;
			format_date(v).into_bytes()
		}
		(ColumnType::Time, Value::Time(v)) => {
			check_whole_seconds(v.nanosecond(), column)?;
			encode_time(v).to_vec()
		}
		(ColumnType::DateTime, Value::DateTime(v)) => {
			check_year(v.year(), column)?;
			check_whole_seconds(v.nanosecond(), column)?;
			format_datetime(v).into_bytes()
		}
		(
			ColumnType::Decimal {
				precision,
				scale,
			},
			Value::Decimal(v),
		) => decimal::encode(v, *precision, *scale, &column.name)?,
		(
			ColumnType::String {
				max_length,
			},
			Value::String(v),
		) => check_length(v.as_bytes(), *max_length, column)?.to_vec(),
		(
			ColumnType::Binary {
				max_length,
			},
			Value::Binary(v),
		) => check_length(v, *max_length, column)?.to_vec(),
		(column_type, value) => {
			return Err(Error::SchemaMismatch(format!(
				"column `{}` of type {column_type} cannot encode a {} value",
				column.name,
				value.type_name()
			)));
		}
	};

	Ok(bytes)
}

pub fn decode(bytes: &[u8], column: &ColumnSchema) -> Result<Value> {
	let value = match &column.column_type {
		ColumnType::Long => Value::Long(decode_i64(fixed(bytes)?)),
		ColumnType::ULong => Value::ULong(u64::from_be_bytes(fixed(bytes)?)),
		ColumnType::Double => Value::Double(decode_f64(fixed(bytes)?)),
		ColumnType::Date => {
			let text = ascii(bytes, DATE_WIDTH)?;
			Value::Date(NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| corrupted(bytes, "DATE"))?)
		}
		ColumnType::Time => {
			let raw = (decode_i64(fixed(bytes)?)).to_be_bytes();
			let text = ascii(&raw, TIME_WIDTH)?;
			Value::Time(NaiveTime::parse_from_str(text, "%H:%M:%S").map_err(|_| corrupted(bytes, "TIME"))?)
		}
		ColumnType::DateTime => {
			let text = ascii(bytes, DATETIME_WIDTH)?;
			Value::DateTime(
				NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
					.map_err(|_| corrupted(bytes, "DATETIME"))?,
			)
		}
		ColumnType::Decimal {
			precision,
			scale,
		} => Value::Decimal(decimal::decode(bytes, *precision, *scale)?),
		ColumnType::String {
			..
		} => Value::String(String::from_utf8(bytes.to_vec()).map_err(|_| corrupted(bytes, "STRING"))?),
		ColumnType::Binary {
			..
		} => Value::Binary(bytes.to_vec()),
	};

	Ok(value)
}

fn encode_i64(value: i64) -> [u8; 8] {
	((value as u64) ^ SIGN_MASK).to_be_bytes()
}

fn decode_i64(bytes: [u8; 8]) -> i64 {
	(u64::from_be_bytes(bytes) ^ SIGN_MASK) as i64
}

fn encode_f64(value: f64) -> [u8; 8] {
	let bits = value.to_bits();
	let bits = if value.is_sign_negative() {
		!bits
	} else {
		bits ^ SIGN_MASK
	};
	bits.to_be_bytes()
}

fn decode_f64(bytes: [u8; 8]) -> f64 {
	let bits = u64::from_be_bytes(bytes);
	let bits = if bits & SIGN_MASK != 0 {
		bits ^ SIGN_MASK
	} else {
		!bits
	};
	f64::from_bits(bits)
}

fn encode_time(time: &NaiveTime) -> [u8; 8] {
	let mut raw = [0u8; TIME_WIDTH];
	raw.copy_from_slice(format_time(time).as_bytes());
	encode_i64(i64::from_be_bytes(raw))
}

fn fixed(bytes: &[u8]) -> Result<[u8; 8]> {
	bytes.try_into().map_err(|_| Error::corrupted(format!("expected 8 value bytes, found {}", bytes.len())))
}

fn ascii(bytes: &[u8], width: usize) -> Result<&str> {
	if bytes.len() != width {
		return Err(Error::corrupted(format!("expected {width} value bytes, found {}", bytes.len())));
	}
	std::str::from_utf8(bytes).map_err(|_| Error::corrupted(format!("value bytes {bytes:02x?} are not ascii")))
}

fn corrupted(bytes: &[u8], target: &str) -> Error {
	Error::corrupted(format!("value bytes {bytes:02x?} do not decode as {target}"))
}

fn check_year(year: i32, column: &ColumnSchema) -> Result<()> {
	if (0..=9999).contains(&year) {
		Ok(())
	} else {
		Err(Error::invalid_value(&column.name, format!("year {year} is outside 0000..=9999")))
	}
}

fn check_whole_seconds(nanosecond: u32, column: &ColumnSchema) -> Result<()> {
	if nanosecond == 0 {
		Ok(())
	} else {
		Err(Error::invalid_value(&column.name, "fractional seconds are not supported"))
	}
}

fn check_length<'a>(bytes: &'a [u8], max_length: u32, column: &ColumnSchema) -> Result<&'a [u8]> {
	if bytes.len() > max_length as usize {
		return Err(Error::invalid_value(
			&column.name,
			format!("{} bytes exceed the maximum length of {max_length}", bytes.len()),
		));
	}
	Ok(bytes)
}
