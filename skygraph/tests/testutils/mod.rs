// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Shared helpers for tests that talk to a live Dgraph alpha

use serde_json::Value;
use skygraph::{Client, ClientConfig, Schema};
use std::io::Write;
use tempfile::NamedTempFile;

/// Endpoint of the alpha used by ignored integration tests
pub fn endpoint() -> String {
    std::env::var("SKYGRAPH_ENDPOINT").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Connect, wipe the database and install the default schema
pub fn fresh_client() -> Client {
    let _ = env_logger::builder().is_test(true).try_init();
    let client = Client::connect(&ClientConfig::new(endpoint()))
        .expect("Dgraph alpha must be running for ignored tests");
    skygraph::maintenance::drop_all(&client).expect("Failed to drop all");
    skygraph::schema::install(&client, &Schema::flights_and_music())
        .expect("Failed to install schema");
    client
}

/// Write `json` to a temporary fixture file
pub fn fixture(json: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create fixture");
    write!(file, "{}", json).expect("Failed to write fixture");
    file
}

/// Unique name so reruns against a dirty database do not collide
pub fn unique(prefix: &str) -> String {
    format!("{} {}", prefix, uuid::Uuid::new_v4())
}
