// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use serde::Deserialize;

use crate::Result;

pub const DEFAULT_COLUMN_FAMILY: &str = "nic";
pub const DEFAULT_WRITE_BUFFER_SIZE: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
	/// Column family every cell is written to.
	pub column_family: String,
	/// Bytes of queued mutations a table holds before flushing on its own.
	pub write_buffer_size: usize,
}

impl Default for StoreConfig {
	fn default() -> Self {
		Self {
			column_family: DEFAULT_COLUMN_FAMILY.to_string(),
			write_buffer_size: DEFAULT_WRITE_BUFFER_SIZE,
		}
	}
}

impl StoreConfig {
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = StoreConfig::from_json("{}").unwrap();
		assert_eq!(config.column_family, "nic");
		assert_eq!(config.write_buffer_size, 5 * 1024 * 1024);
	}

	#[test]
	fn test_override() {
		let config = StoreConfig::from_json(r#"{"write_buffer_size": 1024}"#).unwrap();
		assert_eq!(config.column_family, DEFAULT_COLUMN_FAMILY);
		assert_eq!(config.write_buffer_size, 1024);
	}

	#[test]
	fn test_malformed() {
		assert!(StoreConfig::from_json(r#"{"write_buffer_size": "big"}"#).is_err());
	}
}
