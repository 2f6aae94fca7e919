// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Read-only query execution
//!
//! - [`vars`] - Parameter binding for query templates
//! - [`catalog`] - The fixed analytical queries
//!
//! Every query runs in its own read-only transaction and returns the decoded
//! JSON envelope as a [`QueryResponse`]; formatting is left to the caller.

pub mod catalog;
pub mod vars;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::{Client, Request};
use crate::error::{DgraphError, Error, Result};

pub use catalog::{
    longest_song_per_artist, rank_airlines, user_liked_songs, AirlineRank, AlbumLongestSong,
    ArtistLongestSong, RankOrder, UserLikes, DEFAULT_RANK_LIMIT,
};
pub use vars::{Template, VarType, VarValue, Vars};

/// Decoded query result envelope; top-level keys are query block names
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    json: Value,
}

impl QueryResponse {
    pub fn new(json: Value) -> Self {
        Self { json }
    }

    pub fn json(&self) -> &Value {
        &self.json
    }

    pub fn into_json(self) -> Value {
        self.json
    }

    /// Entities returned by a named block; empty when the block is absent
    pub fn block(&self, name: &str) -> &[Value] {
        self.json
            .get(name)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Deserialize a named block into typed rows
    pub fn rows<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        self.block(name)
            .iter()
            .map(|row| serde_json::from_value(row.clone()))
            .collect::<std::result::Result<Vec<T>, _>>()
            .map_err(|e| Error::Query(e.into()))
    }

    /// Pretty-printed JSON
    pub fn to_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.json).unwrap_or_else(|_| self.json.to_string())
    }
}

/// Execute a bound template in a fresh read-only transaction
pub fn run(client: &Client, template: &Template, vars: &Vars) -> Result<QueryResponse> {
    let request = template.bind(vars).map_err(Error::Query)?;
    execute(client, &request)
}

/// Execute ad hoc DQL with optional variables
///
/// Variable types are inferred from the values; the DQL text is expected to
/// declare matching `$name: type` parameters itself.
pub fn run_raw(client: &Client, dql: &str, vars: &Vars) -> Result<QueryResponse> {
    if dql.trim().is_empty() {
        return Err(Error::Query(DgraphError::invalid("query text is empty")));
    }
    let request = Request {
        query: dql.to_string(),
        vars: vars.to_wire(),
    };
    execute(client, &request)
}

fn execute(client: &Client, request: &Request) -> Result<QueryResponse> {
    let mut txn = client.read_only_txn();
    let response = txn.query(request).map_err(Error::Query)?;
    Ok(QueryResponse::new(response.json))
}
