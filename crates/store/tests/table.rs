// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::sync::Arc;

use keyhive_core::key::{DataRowKey, IndexRowKey};
use keyhive_store::{Catalog, KvStore, MemoryStore, StoreConfig, Table};
use keyhive_testing::{
	fixture::{auto_increment_table, long_table, row, values},
	init_tracing,
};
use keyhive_type::{Error, IndexSchema, QueryKey, QueryType, Result, Row, SortOrder, Value};

fn open(schema: keyhive_type::TableSchema, config: StoreConfig) -> Table<MemoryStore> {
	init_tracing();
	let catalog = Arc::new(Catalog::new(MemoryStore::new(), config));
	catalog.create_table("t1", &schema).unwrap();
	Table::open(catalog, "t1").unwrap()
}

fn table() -> Table<MemoryStore> {
	open(long_table(), StoreConfig::default())
}

fn exact(table: &Table<MemoryStore>, index: &str, column: &str, value: Value) -> Vec<Row> {
	let query = QueryKey::new(index, QueryType::Exact).with_value(column, Some(value));
	table.index_scan(&query).unwrap().collect::<Result<Vec<_>>>().unwrap()
}

fn first(table: &Table<MemoryStore>, index: &str) -> Vec<Row> {
	let query = QueryKey::new(index, QueryType::IndexFirst);
	table.index_scan(&query).unwrap().collect::<Result<Vec<_>>>().unwrap()
}

#[test]
fn test_insert_and_get() {
	let table = table();
	let inserted = table.insert_row(row(&[("c1", Value::Long(1)), ("c2", "bee".into())])).unwrap();

	assert_eq!(table.get_row(inserted.uuid).unwrap(), inserted);
	assert_eq!(table.row_count().unwrap(), 1);
}

#[test]
fn test_insert_invalid_row() {
	let table = table();
	let result = table.insert_row(row(&[("c9", Value::Long(1))]));
	assert!(matches!(result, Err(Error::SchemaMismatch(_))));

	let result = table.insert_row(row(&[("c2", "this value is far too long".into())]));
	assert!(matches!(result, Err(Error::InvalidValue { .. })));

	assert_eq!(table.row_count().unwrap(), 0);
	assert_eq!(table.table_scan().unwrap().count(), 0);
}

#[test]
fn test_get_missing_row() {
	let table = table();
	let uuid = uuid::Uuid::from_u128(7);
	assert_eq!(table.get_row(uuid), Err(Error::RowNotFound(uuid)));
}

#[test]
fn test_table_scan() {
	let table = table();
	for value in 0..4 {
		table.insert_row(row(&[("c1", Value::Long(value))])).unwrap();
	}

	let rows = table.table_scan().unwrap().collect::<Result<Vec<_>>>().unwrap();
	assert_eq!(rows.len(), 4);
	assert!(rows.windows(2).all(|pair| pair[0].uuid < pair[1].uuid));
}

#[test]
fn test_update_moves_index_entries() {
	let table = table();
	let old = table.insert_row(row(&[("c1", Value::Long(1))])).unwrap();

	let new = table.update_row(&old, values(&[("c1", Value::Long(2)), ("c2", "wasp".into())]), &["i1"]).unwrap();
	assert_eq!(new.uuid, old.uuid);

	assert!(exact(&table, "i1", "c1", Value::Long(1)).is_empty());
	assert_eq!(exact(&table, "i1", "c1", Value::Long(2)), vec![new.clone()]);
	assert_eq!(table.get_row(old.uuid).unwrap(), new);
	assert_eq!(table.row_count().unwrap(), 1);
}

#[test]
fn test_update_rewrites_unchanged_index_entries() {
	let table = table();
	let old = table.insert_row(row(&[("c1", Value::Long(1))])).unwrap();

	let new = table.update_row(&old, values(&[("c1", Value::Long(1)), ("c2", "moth".into())]), &[]).unwrap();
	assert_eq!(exact(&table, "i1", "c1", Value::Long(1)), vec![new]);
}

#[test]
fn test_update_with_stale_old_row() {
	let table = table();
	let inserted = table.insert_row(row(&[("c1", Value::Long(1))])).unwrap();

	let stale = Row::with_uuid(inserted.uuid, values(&[("c1", Value::Long(7))]));
	let new = table.update_row(&stale, values(&[("c1", Value::Long(2))]), &[]).unwrap();

	assert!(exact(&table, "i1", "c1", Value::Long(1)).is_empty());
	assert!(exact(&table, "i1", "c1", Value::Long(7)).is_empty());
	assert_eq!(exact(&table, "i1", "c1", Value::Long(2)), vec![new.clone()]);
	assert_eq!(table.get_row(inserted.uuid).unwrap(), new);
}

#[test]
fn test_insert_duplicate_uuid() {
	let table = table();
	let inserted = table.insert_row(row(&[("c1", Value::Long(1))])).unwrap();

	let duplicate = Row::with_uuid(inserted.uuid, values(&[("c1", Value::Long(2))]));
	let result = table.insert_row(duplicate);
	assert!(matches!(result, Err(Error::InvalidArgument(_))));

	assert_eq!(table.row_count().unwrap(), 1);
	assert_eq!(table.get_row(inserted.uuid).unwrap(), inserted);
	assert!(exact(&table, "i1", "c1", Value::Long(2)).is_empty());
}

#[test]
fn test_insert_duplicate_uuid_after_delete() {
	let table = table();
	let inserted = table.insert_row(row(&[("c1", Value::Long(1))])).unwrap();
	table.delete_row(inserted.uuid).unwrap();

	let again = table.insert_row(Row::with_uuid(inserted.uuid, values(&[("c1", Value::Long(3))]))).unwrap();
	assert_eq!(table.get_row(inserted.uuid).unwrap(), again);
	assert_eq!(table.row_count().unwrap(), 1);
}

#[test]
fn test_update_unlisted_key_change() {
	let table = table();
	let old = table.insert_row(row(&[("c1", Value::Long(1))])).unwrap();

	table.update_row(&old, values(&[("c1", Value::Long(9))]), &[]).unwrap();
	assert!(exact(&table, "i1", "c1", Value::Long(1)).is_empty());
	assert_eq!(exact(&table, "i1", "c1", Value::Long(9)).len(), 1);
}

#[test]
fn test_update_errors() {
	let table = table();
	let old = table.insert_row(row(&[("c1", Value::Long(1))])).unwrap();

	let result = table.update_row(&old, values(&[("c1", Value::Long(2))]), &["nope"]);
	assert!(matches!(result, Err(Error::IndexNotFound { .. })));

	let missing = row(&[("c1", Value::Long(1))]);
	let result = table.update_row(&missing, values(&[("c1", Value::Long(2))]), &[]);
	assert_eq!(result, Err(Error::RowNotFound(missing.uuid)));
}

#[test]
fn test_delete_row() {
	let table = table();
	let kept = table.insert_row(row(&[("c1", Value::Long(1))])).unwrap();
	let deleted = table.insert_row(row(&[("c1", Value::Long(1))])).unwrap();

	assert_eq!(table.delete_row(deleted.uuid).unwrap(), deleted);
	assert_eq!(table.get_row(deleted.uuid), Err(Error::RowNotFound(deleted.uuid)));
	assert_eq!(exact(&table, "i1", "c1", Value::Long(1)), vec![kept]);
	assert_eq!(table.row_count().unwrap(), 1);
	assert_eq!(table.delete_row(deleted.uuid), Err(Error::RowNotFound(deleted.uuid)));
}

#[test]
fn test_delete_all_rows() {
	let table = table();
	for value in 0..3 {
		table.insert_row(row(&[("c1", Value::Long(value))])).unwrap();
	}

	table.delete_all_rows().unwrap();
	assert_eq!(table.table_scan().unwrap().count(), 0);
	assert!(first(&table, "i1").is_empty());
	assert_eq!(table.row_count().unwrap(), 0);
}

#[test]
fn test_insert_table_index_backfills() {
	let mut table = table();
	for name in ["wasp", "ant", "bee"] {
		table.insert_row(row(&[("c1", Value::Long(1)), ("c2", name.into())])).unwrap();
	}

	table.insert_table_index(IndexSchema::new("i2", ["c2"], false).unwrap()).unwrap();
	let names: Vec<_> = first(&table, "i2").into_iter().map(|row| row.get("c2").cloned()).collect();
	assert_eq!(names, vec![Some("ant".into()), Some("bee".into()), Some("wasp".into())]);

	table.insert_row(row(&[("c2", "adder".into())])).unwrap();
	assert_eq!(first(&table, "i2")[0].get("c2"), Some(&Value::from("adder")));
}

#[test]
fn test_delete_table_index() {
	let mut table = table();
	table.insert_row(row(&[("c1", Value::Long(1))])).unwrap();
	let index = table.catalog().index_id("t1", "i1").unwrap();

	table.delete_table_index("i1").unwrap();
	assert!(matches!(
		table.index_scan(&QueryKey::new("i1", QueryType::IndexFirst)),
		Err(Error::IndexNotFound { .. })
	));
	for order in [SortOrder::Ascending, SortOrder::Descending] {
		let prefix = IndexRowKey::prefix(table.id(), index, order);
		assert_eq!(table.catalog().store().prefix(&prefix).unwrap().count(), 0);
	}
	assert_eq!(table.table_scan().unwrap().count(), 1);
}

#[test]
fn test_auto_increment() {
	let table = open(auto_increment_table(), StoreConfig::default());

	let first = table.insert_row(row(&[("c1", Value::Long(0))])).unwrap();
	let second = table.insert_row(row(&[])).unwrap();
	assert_eq!(first.get("id"), Some(&Value::Long(1)));
	assert_eq!(second.get("id"), Some(&Value::Long(2)));

	table.insert_row(row(&[("id", Value::Long(10))])).unwrap();
	let next = table.insert_row(row(&[])).unwrap();
	assert_eq!(next.get("id"), Some(&Value::Long(11)));

	table.insert_row(row(&[("id", Value::Long(3))])).unwrap();
	assert_eq!(table.catalog().auto_inc("t1").unwrap(), 11);
}

#[test]
fn test_write_buffer() {
	let table = table();
	let inserted = table.insert_row(row(&[("c1", Value::Long(1))])).unwrap();
	let key = DataRowKey::encoded(table.id(), inserted.uuid);

	assert!(table.catalog().store().get(&key).unwrap().is_none());
	table.flush().unwrap();
	assert!(table.catalog().store().get(&key).unwrap().is_some());
}

#[test]
fn test_write_buffer_flushes_when_full() {
	let config = StoreConfig {
		write_buffer_size: 1,
		..StoreConfig::default()
	};
	let table = open(long_table(), config);
	let inserted = table.insert_row(row(&[("c1", Value::Long(1))])).unwrap();
	assert!(table.catalog().store().get(&DataRowKey::encoded(table.id(), inserted.uuid)).unwrap().is_some());
}

#[test]
fn test_delete_table_removes_rows() {
	let table = table();
	table.insert_row(row(&[("c1", Value::Long(1))])).unwrap();
	table.flush().unwrap();

	table.catalog().delete_table("t1").unwrap();
	// only the table list row with its identifier counter remains
	assert_eq!(table.catalog().store().len(), 1);
}
