// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 keyhive contributors

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Installs a test writer subscriber filtered by `RUST_LOG`, `warn` when
/// unset. Safe to call from every test.
pub fn init_tracing() {
	INIT.call_once(|| {
		let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
		let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
	});
}
