// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure raised while encoding keys or talking to the backing store.
///
/// Codec failures (`InvalidArgument`, `InvalidValue`, `Parse`,
/// `SchemaMismatch`) point at a programming or data-quality defect and are
/// never retried or coerced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	#[error("invalid value for column `{column}`: {reason}")]
	InvalidValue {
		column: String,
		reason: String,
	},

	#[error("cannot parse `{input}` as {target}")]
	Parse {
		input: String,
		target: String,
	},

	#[error("schema mismatch: {0}")]
	SchemaMismatch(String),

	#[error("table `{0}` not found")]
	TableNotFound(String),

	#[error("table `{0}` already exists")]
	TableExists(String),

	#[error("index `{index}` not found on table `{table}`")]
	IndexNotFound {
		table: String,
		index: String,
	},

	#[error("row {0} not found")]
	RowNotFound(Uuid),

	#[error("corrupted data: {0}")]
	Corrupted(String),

	#[error("serialization failed: {0}")]
	Serialization(String),
}

impl Error {
	pub fn invalid_argument(message: impl Into<String>) -> Self {
		Self::InvalidArgument(message.into())
	}

	pub fn invalid_value(column: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::InvalidValue {
			column: column.into(),
			reason: reason.into(),
		}
	}

	pub fn parse(input: impl Into<String>, target: impl Into<String>) -> Self {
		Self::Parse {
			input: input.into(),
			target: target.into(),
		}
	}

	pub fn corrupted(message: impl Into<String>) -> Self {
		Self::Corrupted(message.into())
	}
}

impl From<postcard::Error> for Error {
	fn from(err: postcard::Error) -> Self {
		Self::Serialization(err.to_string())
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Serialization(err.to_string())
	}
}

#[macro_export]
macro_rules! return_error {
	($err:expr) => {
		return Err($err)
	};
}
