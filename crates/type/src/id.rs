// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::{
	fmt::{Display, Formatter},
	ops::Deref,
};

use serde::{Deserialize, Serialize};

use crate::Error;

macro_rules! id_type {
	($(#[$meta:meta])* $name:ident, $label:literal) => {
		$(#[$meta])*
		#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
		pub struct $name(pub u64);

		impl $name {
			/// The identifier directly following this one. Used as the
			/// exclusive end of ranges scoped to this identifier.
			pub fn next(self) -> Self {
				Self(self.0 + 1)
			}
		}

		impl Deref for $name {
			type Target = u64;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}

		impl PartialEq<u64> for $name {
			fn eq(&self, other: &u64) -> bool {
				self.0.eq(other)
			}
		}

		impl From<u64> for $name {
			fn from(value: u64) -> Self {
				Self(value)
			}
		}

		impl TryFrom<i64> for $name {
			type Error = Error;

			fn try_from(value: i64) -> Result<Self, Self::Error> {
				u64::try_from(value).map(Self).map_err(|_| {
					Error::invalid_argument(format!(
						"{} must be greater than or equal to zero, got {value}",
						$label
					))
				})
			}
		}

		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
				Display::fmt(&self.0, f)
			}
		}
	};
}

id_type!(
	/// Identifier of a table, allocated by the catalog.
	TableId,
	"table id"
);

id_type!(
	/// Identifier of an index, unique within its table.
	IndexId,
	"index id"
);
