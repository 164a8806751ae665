// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

//! Order-preserving binary encodings: every byte string produced here sorts,
//! under unsigned lexicographic comparison, the same way as the value it
//! encodes.

pub use keycode::{KeyDeserializer, KeySerializer};

mod decimal;
pub mod keycode;
pub mod value;
pub mod varint;
