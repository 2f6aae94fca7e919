// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for SkyGraph
//!
//! Provides schema installation, bulk loading, deletion, the fixed query
//! catalog, ad hoc queries and drop-all against a Dgraph alpha.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
