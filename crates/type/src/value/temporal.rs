// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

//! Strict parsing of the textual date and time layouts accepted on input.
//!
//! Patterns use `yyyy`, `MM`, `dd`, `HH`, `mm`, `ss` for zero-padded digit
//! groups; every other character must match literally. The first pattern of
//! each list is the canonical layout used when a value is rendered back to
//! text.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::{Error, Result};

pub const DATE_FORMATS: [&str; 4] = ["yyyy-MM-dd", "yyyy/MM/dd", "yyyy.MM.dd", "yyyyMMdd"];

pub const TIME_FORMATS: [&str; 2] = ["HH:mm:ss", "HHmmss"];

pub const DATETIME_FORMATS: [&str; 4] =
	["yyyy-MM-dd HH:mm:ss", "yyyy/MM/dd HH:mm:ss", "yyyy.MM.dd HH:mm:ss", "yyyyMMdd HHmmss"];

#[derive(Debug, Default, Clone, Copy)]
struct Fields {
	year: Option<i32>,
	month: Option<u32>,
	day: Option<u32>,
	hour: Option<u32>,
	minute: Option<u32>,
	second: Option<u32>,
}

impl Fields {
	fn date(&self) -> Option<NaiveDate> {
		NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
	}

	fn time(&self) -> Option<NaiveTime> {
		NaiveTime::from_hms_opt(self.hour?, self.minute?, self.second?)
	}
}

/// Matches `input` against a single pattern. Returns `None` on any deviation.
fn match_pattern(pattern: &str, input: &str) -> Option<Fields> {
	let pattern = pattern.as_bytes();
	let input = input.as_bytes();
	if pattern.len() != input.len() {
		return None;
	}

	let mut fields = Fields::default();
	let mut pos = 0;
	while pos < pattern.len() {
		let token = Token::at(&pattern[pos..]);
		let width = token.width();
		let chunk = &input[pos..pos + width];

		if let Token::Literal(expected) = token {
			if chunk[0] != expected {
				return None;
			}
		} else {
			if !chunk.iter().all(u8::is_ascii_digit) {
				return None;
			}
			let value = chunk.iter().fold(0u32, |acc, d| acc * 10 + u32::from(d - b'0'));
			match token {
				Token::Year => fields.year = Some(value as i32),
				Token::Month => fields.month = Some(value),
				Token::Day => fields.day = Some(value),
				Token::Hour => fields.hour = Some(value),
				Token::Minute => fields.minute = Some(value),
				Token::Second => fields.second = Some(value),
				Token::Literal(_) => unreachable!(),
			}
		}
		pos += width;
	}

	Some(fields)
}

#[derive(Debug, Clone, Copy)]
enum Token {
	Year,
	Month,
	Day,
	Hour,
	Minute,
	Second,
	Literal(u8),
}

impl Token {
	fn at(pattern: &[u8]) -> Self {
		const TOKENS: [(&[u8], Token); 6] = [
			(b"yyyy", Token::Year),
			(b"MM", Token::Month),
			(b"dd", Token::Day),
			(b"HH", Token::Hour),
			(b"mm", Token::Minute),
			(b"ss", Token::Second),
		];

		TOKENS.iter()
			.find(|(text, _)| pattern.starts_with(text))
			.map(|(_, token)| *token)
			.unwrap_or(Token::Literal(pattern[0]))
	}

	fn width(self) -> usize {
		match self {
			Token::Year => 4,
			Token::Literal(_) => 1,
			_ => 2,
		}
	}
}

fn first_match<T>(input: &str, patterns: &[&str], target: &str, build: impl Fn(&Fields) -> Option<T>) -> Result<T> {
	patterns
		.iter()
		.find_map(|pattern| match_pattern(pattern, input).and_then(|fields| build(&fields)))
		.ok_or_else(|| Error::parse(input, target))
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
	first_match(input, &DATE_FORMATS, "DATE", Fields::date)
}

pub fn parse_time(input: &str) -> Result<NaiveTime> {
	first_match(input, &TIME_FORMATS, "TIME", Fields::time)
}

pub fn parse_datetime(input: &str) -> Result<NaiveDateTime> {
	first_match(input, &DATETIME_FORMATS, "DATETIME", |fields| Some(fields.date()?.and_time(fields.time()?)))
}

/// Renders `yyyy-MM-dd`.
pub fn format_date(date: &NaiveDate) -> String {
	date.format("%Y-%m-%d").to_string()
}

/// Renders `HH:mm:ss`. Sub-second precision is not representable.
pub fn format_time(time: &NaiveTime) -> String {
	debug_assert_eq!(time.nanosecond(), 0);
	time.format("%H:%M:%S").to_string()
}

/// Renders `yyyy-MM-dd HH:mm:ss`.
pub fn format_datetime(datetime: &NaiveDateTime) -> String {
	datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}
