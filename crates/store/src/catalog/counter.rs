// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use keyhive_core::{
	EncodedKey,
	key::{AutoIncrementKey, RowCountKey},
};
use keyhive_type::{Error, Result};
use tracing::{instrument, trace};

use super::{Catalog, VALUE};
use crate::backend::KvStore;

impl<S: KvStore> Catalog<S> {
	pub fn auto_inc(&self, table: &str) -> Result<u64> {
		let table = self.require_table(table)?;
		self.counter(&AutoIncrementKey::encoded(table))
	}

	/// Moves the auto increment value up to `value`. A lower value leaves it
	/// unchanged. Returns the value in effect afterwards.
	#[instrument(name = "store::catalog::set_auto_inc", level = "trace", skip(self))]
	pub fn set_auto_inc(&self, table: &str, value: u64) -> Result<u64> {
		let _guard = self.lock.lock();
		let key = AutoIncrementKey::encoded(self.require_table(table)?);
		let current = self.counter(&key)?;
		if value <= current {
			return Ok(current);
		}
		self.store.apply(vec![self.put_u64(key, VALUE, value)])?;
		Ok(value)
	}

	/// Adds `amount` to the auto increment value and returns the new value.
	#[instrument(name = "store::catalog::increment_auto_inc", level = "trace", skip(self))]
	pub fn increment_auto_inc(&self, table: &str, amount: u64) -> Result<u64> {
		let _guard = self.lock.lock();
		let key = AutoIncrementKey::encoded(self.require_table(table)?);
		let value = self.counter(&key)?.checked_add(amount).ok_or_else(|| {
			Error::invalid_argument(format!("auto increment of table `{table}` overflows"))
		})?;
		self.store.apply(vec![self.put_u64(key, VALUE, value)])?;
		trace!(value, "incremented auto increment");
		Ok(value)
	}

	#[instrument(name = "store::catalog::truncate_auto_inc", level = "debug", skip(self))]
	pub fn truncate_auto_inc(&self, table: &str) -> Result<()> {
		let _guard = self.lock.lock();
		let table = self.require_table(table)?;
		self.store.apply(vec![self.put_u64(AutoIncrementKey::encoded(table), VALUE, 0)])
	}

	pub fn row_count(&self, table: &str) -> Result<u64> {
		let table = self.require_table(table)?;
		self.counter(&RowCountKey::encoded(table))
	}

	/// Adjusts the row count by `delta`, never below zero, and returns the
	/// new count.
	#[instrument(name = "store::catalog::increment_row_count", level = "trace", skip(self))]
	pub fn increment_row_count(&self, table: &str, delta: i64) -> Result<u64> {
		let _guard = self.lock.lock();
		let key = RowCountKey::encoded(self.require_table(table)?);
		let count = self.counter(&key)?.saturating_add_signed(delta);
		self.store.apply(vec![self.put_u64(key, VALUE, count)])?;
		Ok(count)
	}

	#[instrument(name = "store::catalog::truncate_row_count", level = "debug", skip(self))]
	pub fn truncate_row_count(&self, table: &str) -> Result<()> {
		let _guard = self.lock.lock();
		let table = self.require_table(table)?;
		self.store.apply(vec![self.put_u64(RowCountKey::encoded(table), VALUE, 0)])
	}

	fn counter(&self, key: &EncodedKey) -> Result<u64> {
		Ok(self.read_u64(key, VALUE)?.unwrap_or(0))
	}
}

#[cfg(test)]
mod tests {
	use keyhive_type::{ColumnSchema, ColumnType, TableSchema};

	use super::*;
	use crate::{MemoryStore, StoreConfig};

	fn catalog() -> Catalog<MemoryStore> {
		let catalog = Catalog::new(MemoryStore::new(), StoreConfig::default());
		let schema = TableSchema::new(vec![ColumnSchema::new("c1", ColumnType::Long).unwrap()], vec![]).unwrap();
		catalog.create_table("t1", &schema).unwrap();
		catalog
	}

	#[test]
	fn test_auto_inc() {
		let catalog = catalog();
		assert_eq!(catalog.auto_inc("t1").unwrap(), 0);
		assert_eq!(catalog.increment_auto_inc("t1", 1).unwrap(), 1);
		assert_eq!(catalog.increment_auto_inc("t1", 10).unwrap(), 11);
		assert_eq!(catalog.auto_inc("t1").unwrap(), 11);
	}

	#[test]
	fn test_set_auto_inc_moves_forward_only() {
		let catalog = catalog();
		assert_eq!(catalog.set_auto_inc("t1", 50).unwrap(), 50);
		assert_eq!(catalog.set_auto_inc("t1", 20).unwrap(), 50);
		assert_eq!(catalog.auto_inc("t1").unwrap(), 50);
	}

	#[test]
	fn test_auto_inc_overflow() {
		let catalog = catalog();
		catalog.set_auto_inc("t1", u64::MAX).unwrap();
		assert!(matches!(catalog.increment_auto_inc("t1", 1), Err(Error::InvalidArgument(_))));
	}

	#[test]
	fn test_truncate_auto_inc() {
		let catalog = catalog();
		catalog.increment_auto_inc("t1", 7).unwrap();
		catalog.truncate_auto_inc("t1").unwrap();
		assert_eq!(catalog.auto_inc("t1").unwrap(), 0);
	}

	#[test]
	fn test_row_count() {
		let catalog = catalog();
		assert_eq!(catalog.increment_row_count("t1", 3).unwrap(), 3);
		assert_eq!(catalog.increment_row_count("t1", -1).unwrap(), 2);
		assert_eq!(catalog.increment_row_count("t1", -5).unwrap(), 0);
		catalog.increment_row_count("t1", 4).unwrap();
		catalog.truncate_row_count("t1").unwrap();
		assert_eq!(catalog.row_count("t1").unwrap(), 0);
	}

	#[test]
	fn test_unknown_table() {
		let catalog = catalog();
		assert!(matches!(catalog.row_count("t2"), Err(Error::TableNotFound(_))));
		assert!(matches!(catalog.increment_auto_inc("t2", 1), Err(Error::TableNotFound(_))));
	}
}
