// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Bulk loading of JSON entity batches
//!
//! A batch is parsed and validated completely before a transaction is
//! opened, then submitted as a single set mutation and committed. Any
//! failure leaves the transaction to its guard, which discards it.

use log::{debug, info};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::client::{Client, Mutation};
use crate::error::{DgraphError, Error, Result};

/// Validated list of entity objects
///
/// Each object is either a new entity (attributes, usually with
/// `dgraph.type`) or a reference update (an existing `uid` plus the
/// attributes to set).
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    entities: Vec<Value>,
}

impl Batch {
    /// Accepts a JSON array of objects or a single object
    pub fn from_json(json: Value) -> std::result::Result<Self, DgraphError> {
        let entities = match json {
            Value::Array(items) => items,
            obj @ Value::Object(_) => vec![obj],
            other => {
                return Err(DgraphError::invalid(format!(
                    "expected a list of entity objects, found {}",
                    json_kind(&other)
                )))
            }
        };
        if entities.is_empty() {
            return Err(DgraphError::invalid("batch is empty"));
        }
        if let Some((i, item)) = entities.iter().enumerate().find(|(_, v)| !v.is_object()) {
            return Err(DgraphError::invalid(format!(
                "entry {} is {}, expected an object",
                i,
                json_kind(item)
            )));
        }
        Ok(Self { entities })
    }

    pub fn parse(text: &str) -> std::result::Result<Self, DgraphError> {
        Self::from_json(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> std::result::Result<Self, DgraphError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entries that reference an existing node by uid
    pub fn reference_updates(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.get("uid").and_then(Value::as_str).is_some_and(|u| !u.starts_with("_:")))
            .count()
    }

    fn into_payload(self) -> Value {
        Value::Array(self.entities)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Outcome of a committed load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Entities submitted
    pub entities: usize,
    /// Blank-node name to newly assigned uid
    pub uids: BTreeMap<String, String>,
}

/// Load the JSON file at `path` in one transaction
pub fn load_file(client: &Client, path: &Path) -> Result<LoadReport> {
    debug!("loading batch from {}", path.display());
    let batch = Batch::from_path(path).map_err(Error::Load)?;
    load_batch(client, batch)
}

/// Submit an already parsed batch in one transaction
pub fn load_batch(client: &Client, batch: Batch) -> Result<LoadReport> {
    let entities = batch.len();
    let updates = batch.reference_updates();

    let mut txn = client.txn();
    let response = txn
        .mutate(Mutation::set(batch.into_payload()))
        .map_err(Error::Load)?;
    txn.commit().map_err(Error::Load)?;

    info!(
        "Loaded {} entities ({} updates, {} new uids)",
        entities,
        updates,
        response.uids.len()
    );
    Ok(LoadReport {
        entities,
        uids: response.uids,
    })
}
