// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

pub use logging::init_tracing;

pub mod fixture;
pub mod logging;
