// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::{collections::BTreeMap, ops::Bound};

use keyhive_type::{Error, QueryType, Result, SortOrder, Value, return_error};
use tracing::{instrument, trace};

use super::CompoundIndexKeyBuilder;
use crate::{EncodedKey, EncodedKeyRange};

/// How to serve an index read with a single forward scan.
///
/// Walking backwards is served by scanning the descending copy of the index
/// forwards, so `order` selects which copy `range` covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStrategy {
	pub range: EncodedKeyRange,
	pub order: SortOrder,
	/// Leading rows whose key starts with this prefix are dropped.
	pub skip: Option<EncodedKey>,
}

impl ScanStrategy {
	/// Whether the scan walks the index from high to low values.
	pub fn is_backward(&self) -> bool {
		self.order.is_descending()
	}

	/// Whether a row with `key`, reached while still at the head of the
	/// scan, falls under the skip-first policy.
	pub fn skips(&self, key: &[u8]) -> bool {
		self.skip.as_ref().is_some_and(|prefix| key.starts_with(prefix.as_slice()))
	}
}

/// Maps an index access pattern and a search key onto a [`ScanStrategy`].
pub struct ScanStrategySelector<'a> {
	builder: &'a CompoundIndexKeyBuilder<'a>,
}

impl<'a> ScanStrategySelector<'a> {
	pub fn new(builder: &'a CompoundIndexKeyBuilder<'a>) -> Self {
		Self {
			builder,
		}
	}

	#[instrument(name = "core::index::scan::select", level = "trace", skip(self, values), fields(index = %self.builder.index().name()))]
	pub fn select(&self, query_type: QueryType, values: &BTreeMap<String, Option<Value>>) -> Result<ScanStrategy> {
		if query_type.requires_values() && values.is_empty() {
			return_error!(Error::invalid_argument(format!(
				"{query_type} on index `{}` needs key values",
				self.builder.index().name()
			)));
		}

		let strategy = match query_type {
			QueryType::Exact => {
				let key = self.build(SortOrder::Ascending, values)?;
				ScanStrategy {
					range: EncodedKeyRange::prefix(&key),
					order: SortOrder::Ascending,
					skip: None,
				}
			}
			QueryType::AfterKey | QueryType::KeyOrNext => {
				self.from_key(SortOrder::Ascending, values, query_type.skips_equal())?
			}
			QueryType::BeforeKey | QueryType::KeyOrPrevious => {
				self.from_key(SortOrder::Descending, values, query_type.skips_equal())?
			}
			QueryType::IndexFirst => self.whole_index(SortOrder::Ascending),
			QueryType::IndexLast => self.whole_index(SortOrder::Descending),
		};

		trace!(?strategy, "selected scan");
		Ok(strategy)
	}

	fn build(&self, order: SortOrder, values: &BTreeMap<String, Option<Value>>) -> Result<EncodedKey> {
		Ok(self.builder.build(order, values, None)?.encode())
	}

	/// Starts at the search key and runs to the end of the index copy.
	fn from_key(
		&self,
		order: SortOrder,
		values: &BTreeMap<String, Option<Value>>,
		skip_equal: bool,
	) -> Result<ScanStrategy> {
		let key = self.build(order, values)?;
		let end = self.builder.index_range(order).end;

		Ok(ScanStrategy {
			range: EncodedKeyRange::new(Bound::Included(key.clone()), end),
			order,
			skip: skip_equal.then_some(key),
		})
	}

	fn whole_index(&self, order: SortOrder) -> ScanStrategy {
		ScanStrategy {
			range: self.builder.index_range(order),
			order,
			skip: None,
		}
	}
}
