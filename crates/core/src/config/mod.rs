// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration modules

mod app;

pub use app::{config_path, AlertsConfig, AppConfig, ConfigError, CONFIG_ENV, DEFAULT_CONFIG_FILE};
