// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

//! Packed fixed-width decimals.
//!
//! A `DECIMAL(precision, scale)` is split into an integer part of up to
//! `precision - 2` digits and a fractional part of exactly `scale` digits.
//! Each part is stored as a big-endian magnitude right-justified in a slot of
//! `bytes_from_digits(digits)` bytes. The top bit of the first byte is then
//! set for non-negative values, and negative values have every byte
//! complemented.

use bigdecimal::BigDecimal;
use keyhive_type::{Error, Result};
use num_bigint::{BigInt, Sign};
use num_traits::{Signed, Zero};

const SIGN_BIT: u8 = 0x80;

/// Bytes needed to hold `digits` decimal digits, 4 bytes for every full group
/// of 9 digits plus one byte per two remaining digits.
pub fn bytes_from_digits(digits: u32) -> usize {
	let digits = digits as usize;
	4 * (digits / 9) + (digits % 9 + 1) / 2
}

/// Digits available to the integer part of a `DECIMAL(precision, scale)`.
fn integer_digits(precision: u32) -> u32 {
	precision.saturating_sub(2)
}

pub fn packed_width(precision: u32, scale: u32) -> usize {
	bytes_from_digits(integer_digits(precision)) + bytes_from_digits(scale)
}

pub fn encode(value: &BigDecimal, precision: u32, scale: u32, column: &str) -> Result<Vec<u8>> {
	let left_digits = integer_digits(precision);
	let left_width = bytes_from_digits(left_digits);
	let right_width = bytes_from_digits(scale);

	let magnitude = value.abs();
	let (_, exponent) = magnitude.normalized().as_bigint_and_exponent();
	if exponent > i64::from(scale) {
		return Err(Error::invalid_value(
			column,
			format!("{value} has more than {scale} fractional digits"),
		));
	}

	let (scaled, _) = magnitude.with_scale(i64::from(scale)).as_bigint_and_exponent();
	let divisor = BigInt::from(10u32).pow(scale);
	let left = &scaled / &divisor;
	let right = &scaled % &divisor;

	if left >= BigInt::from(10u32).pow(left_digits) {
		return Err(Error::invalid_value(
			column,
			format!("{value} needs more than {left_digits} integer digits"),
		));
	}

	let mut buffer = vec![0u8; left_width + right_width];
	right_justify(&left, &mut buffer[..left_width], column)?;
	right_justify(&right, &mut buffer[left_width..], column)?;

	if let Some(first) = buffer.first_mut() {
		*first ^= SIGN_BIT;
	}

	if value.is_negative() {
		buffer.iter_mut().for_each(|byte| *byte = !*byte);
	}

	Ok(buffer)
}

pub fn decode(bytes: &[u8], precision: u32, scale: u32) -> Result<BigDecimal> {
	let left_width = bytes_from_digits(integer_digits(precision));
	let right_width = bytes_from_digits(scale);
	if bytes.len() != left_width + right_width {
		return Err(Error::corrupted(format!(
			"packed DECIMAL({precision}, {scale}) needs {} bytes, found {}",
			left_width + right_width,
			bytes.len()
		)));
	}

	let mut buffer = bytes.to_vec();
	let negative = buffer.first().is_some_and(|first| first & SIGN_BIT == 0);
	if negative {
		buffer.iter_mut().for_each(|byte| *byte = !*byte);
	}
	if let Some(first) = buffer.first_mut() {
		*first ^= SIGN_BIT;
	}

	let left = BigInt::from_bytes_be(Sign::Plus, &buffer[..left_width]);
	let right = BigInt::from_bytes_be(Sign::Plus, &buffer[left_width..]);
	let mut digits = left * BigInt::from(10u32).pow(scale) + right;
	if negative {
		digits = -digits;
	}

	Ok(BigDecimal::new(digits, i64::from(scale)))
}

fn right_justify(magnitude: &BigInt, slot: &mut [u8], column: &str) -> Result<()> {
	if magnitude.is_zero() {
		return Ok(());
	}

	let (_, bytes) = magnitude.to_bytes_be();
	if bytes.len() > slot.len() {
		return Err(Error::invalid_value(column, format!("{magnitude} does not fit in {} bytes", slot.len())));
	}

	let offset = slot.len() - bytes.len();
	slot[offset..].copy_from_slice(&bytes);
	Ok(())
}
