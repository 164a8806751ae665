// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

//! Length-prefixed unsigned integers.
//!
//! A value is written as one length byte `n` in `1..=8` followed by the `n`
//! significant big-endian bytes of the value. Zero is `[0x01, 0x00]`.
//!
//! The encoding is monotonic: a value with fewer significant bytes is smaller
//! and has a smaller length byte, and values of equal length compare by their
//! big-endian bytes.

/// Number of bytes `value` occupies once encoded.
pub fn encoded_len(value: u64) -> usize {
	1 + significant_bytes(value)
}

pub fn encode(value: u64, output: &mut Vec<u8>) {
	let len = significant_bytes(value);
	output.push(len as u8);
	output.extend_from_slice(&value.to_be_bytes()[8 - len..]);
}

/// Decodes a value from the front of `input`, returning it together with the
/// number of bytes consumed. Rejects truncated and non-canonical input.
pub fn decode(input: &[u8]) -> Option<(u64, usize)> {
	let len = *input.first()? as usize;
	if !(1..=8).contains(&len) || input.len() < 1 + len {
		return None;
	}

	let digits = &input[1..1 + len];
	if len > 1 && digits[0] == 0 {
		return None;
	}

	let mut bytes = [0u8; 8];
	bytes[8 - len..].copy_from_slice(digits);
	Some((u64::from_be_bytes(bytes), 1 + len))
}

fn significant_bytes(value: u64) -> usize {
	let bits = 64 - value.leading_zeros() as usize;
	bits.div_ceil(8).max(1)
}
