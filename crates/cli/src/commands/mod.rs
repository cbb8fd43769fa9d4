// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod alerts;
pub mod employee;
pub mod init;
pub mod lock;
pub mod records;
