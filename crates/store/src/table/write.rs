// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::collections::BTreeMap;

use keyhive_core::{
	encoding::value::encode,
	key::{DataRowKey, IndexRowKey},
};
use keyhive_type::{ColumnType, Error, Result, Row, SortOrder, Value, return_error};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::Table;
use crate::backend::{KvStore, Mutation};

pub(super) const ORDERS: [SortOrder; 2] = [SortOrder::Ascending, SortOrder::Descending];

impl<S: KvStore> Table<S> {
	/// Stores a new row under its DataRow key and under both keys of every
	/// index. A missing auto increment value is assigned from the table's
	/// counter; an explicit one moves the counter forward.
	///
	/// The row's UUID must not identify a stored row yet.
	#[instrument(name = "store::table::insert_row", level = "debug", skip(self, row), fields(table = %self.name, uuid = %row.uuid))]
	pub fn insert_row(&self, mut row: Row) -> Result<Row> {
		let key = DataRowKey::encoded(self.id, row.uuid);
		if self.contains(&key)? {
			return_error!(Error::invalid_argument(format!(
				"row {} already exists in table `{}`",
				row.uuid, self.name
			)));
		}

		self.assign_auto_increment(&mut row)?;
		self.check(&row)?;

		let payload = row.serialize()?;
		let mut mutations = vec![self.put_row(key, payload.clone())];
		for builder in self.builders()? {
			for order in ORDERS {
				mutations.push(self.put_row(builder.build_row(order, &row)?.encode(), payload.clone()));
			}
		}

		self.write(mutations)?;
		self.catalog.increment_row_count(&self.name, 1)?;
		Ok(row)
	}

	/// Replaces the values of a stored row, keeping its UUID.
	///
	/// Only the UUID of `old` is used; the index entries to replace are
	/// derived from the row as currently stored. Entries of the indices named
	/// in `changed_indices`, and of any index whose key the new values
	/// change, are moved to their new key. The remaining index entries are
	/// rewritten in place.
	#[instrument(name = "store::table::update_row", level = "debug", skip(self, old, values), fields(table = %self.name, uuid = %old.uuid))]
	pub fn update_row(&self, old: &Row, values: BTreeMap<String, Value>, changed_indices: &[&str]) -> Result<Row> {
		for index in changed_indices {
			self.index_id(index)?;
		}
		let stored = self.get_row(old.uuid)?;

		let row = Row::with_uuid(old.uuid, values);
		self.check(&row)?;
		self.advance_auto_increment(&row)?;

		let payload = row.serialize()?;
		let mut mutations = vec![self.put_row(DataRowKey::encoded(self.id, row.uuid), payload.clone())];
		for builder in self.builders()? {
			let changed = changed_indices.contains(&builder.index().name());
			for order in ORDERS {
				let old_key = builder.build_row(order, &stored)?.encode();
				let new_key = builder.build_row(order, &row)?.encode();
				if changed || old_key != new_key {
					mutations.push(Mutation::Delete {
						key: old_key,
					});
				}
				mutations.push(self.put_row(new_key, payload.clone()));
			}
		}

		self.write(mutations)?;
		Ok(row)
	}

	/// Removes a row with all of its index entries and returns it.
	#[instrument(name = "store::table::delete_row", level = "debug", skip(self), fields(table = %self.name))]
	pub fn delete_row(&self, uuid: Uuid) -> Result<Row> {
		let row = self.get_row(uuid)?;

		let mut mutations = vec![Mutation::Delete {
			key: DataRowKey::encoded(self.id, uuid),
		}];
		for builder in self.builders()? {
			for order in ORDERS {
				mutations.push(Mutation::Delete {
					key: builder.build_row(order, &row)?.encode(),
				});
			}
		}

		self.write(mutations)?;
		self.catalog.increment_row_count(&self.name, -1)?;
		Ok(row)
	}

	/// Removes every data row and index row of the table. The auto
	/// increment value is kept.
	#[instrument(name = "store::table::delete_all_rows", level = "debug", skip(self), fields(table = %self.name))]
	pub fn delete_all_rows(&self) -> Result<()> {
		self.flush()?;

		let mut mutations = Vec::new();
		for range in [
			DataRowKey::full_scan(self.id),
			IndexRowKey::table_range(self.id, SortOrder::Ascending),
			IndexRowKey::table_range(self.id, SortOrder::Descending),
		] {
			mutations.extend(self.store().range(range)?.map(|stored| Mutation::Delete {
				key: stored.key,
			}));
		}

		debug!(rows = mutations.len(), "deleting all rows");
		self.store().apply(mutations)?;
		self.catalog.truncate_row_count(&self.name)
	}

	/// Checks the row against the schema, including the value domain of
	/// columns no index covers.
	fn check(&self, row: &Row) -> Result<()> {
		row.validate(&self.schema)?;
		for (name, value) in &row.values {
			if let Some(column) = self.schema.column(name) {
				encode(value, column)?;
			}
		}
		Ok(())
	}

	fn assign_auto_increment(&self, row: &mut Row) -> Result<()> {
		let Some(column) = self.schema.auto_increment_column() else {
			return Ok(());
		};
		if row.get(&column.name).is_some() {
			return self.advance_auto_increment(row);
		}

		let next = self.catalog.increment_auto_inc(&self.name, 1)?;
		let value = match column.column_type {
			ColumnType::Long => Value::Long(i64::try_from(next).map_err(|_| {
				Error::invalid_value(column.name.as_str(), format!("auto increment value {next} exceeds LONG"))
			})?),
			ColumnType::ULong => Value::ULong(next),
			ColumnType::Double => Value::Double(next as f64),
			other => {
				return_error!(Error::SchemaMismatch(format!(
					"auto increment column `{}` has type {other}",
					column.name
				)))
			}
		};
		row.set(column.name.as_str(), Some(value));
		Ok(())
	}

	/// Moves the auto increment counter past an explicitly supplied value.
	fn advance_auto_increment(&self, row: &Row) -> Result<()> {
		let Some(column) = self.schema.auto_increment_column() else {
			return Ok(());
		};

		let floor = match row.get(&column.name) {
			Some(Value::Long(v)) if *v > 0 => *v as u64,
			Some(Value::ULong(v)) => *v,
			Some(Value::Double(v)) if v.is_finite() && *v >= 1.0 => *v as u64,
			_ => return Ok(()),
		};
		self.catalog.set_auto_inc(&self.name, floor)?;
		Ok(())
	}
}
