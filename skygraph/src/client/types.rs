// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Request and response types shared by the transport and transactions

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::DgraphError;

/// Dgraph node identifier, e.g. `0x2a`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    pub fn new(uid: impl Into<String>) -> Self {
        Uid(uid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Alter request body
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Schema text: type and predicate declarations
    Schema(String),
    /// Remove all data and schema
    DropAll,
}

/// Query text with its bound variables
///
/// Variables travel beside the query in the request body; values are
/// strings on the wire and typed by the query's parameter declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    pub query: String,
    pub vars: BTreeMap<String, String>,
}

impl Request {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            vars: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Set,
    Delete,
}

impl MutationKind {
    /// Key of the JSON mutation body
    pub fn as_key(self) -> &'static str {
        match self {
            MutationKind::Set => "set",
            MutationKind::Delete => "delete",
        }
    }
}

/// A set or delete payload of entity attribute assignments
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub kind: MutationKind,
    pub payload: Value,
    pub commit_now: bool,
}

impl Mutation {
    pub fn set(payload: Value) -> Self {
        Self {
            kind: MutationKind::Set,
            payload,
            commit_now: false,
        }
    }

    pub fn delete(payload: Value) -> Self {
        Self {
            kind: MutationKind::Delete,
            payload,
            commit_now: false,
        }
    }

    /// Delete every predicate of a node
    pub fn delete_node(uid: &Uid) -> Self {
        Self::delete(serde_json::json!({ "uid": uid.as_str() }))
    }
}

/// Server-side transaction bookkeeping returned in response extensions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxnContext {
    #[serde(default)]
    pub start_ts: u64,
    #[serde(default)]
    pub commit_ts: u64,
    #[serde(default)]
    pub aborted: bool,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub preds: Vec<String>,
}

impl TxnContext {
    /// Fold a response context into this transaction's context
    pub fn merge(&mut self, other: &TxnContext) -> Result<(), DgraphError> {
        if other.start_ts != 0 {
            if self.start_ts == 0 {
                self.start_ts = other.start_ts;
            } else if self.start_ts != other.start_ts {
                return Err(DgraphError::invalid(format!(
                    "start timestamp mismatch: {} != {}",
                    self.start_ts, other.start_ts
                )));
            }
        }
        for key in &other.keys {
            if !self.keys.contains(key) {
                self.keys.push(key.clone());
            }
        }
        for pred in &other.preds {
            if !self.preds.contains(pred) {
                self.preds.push(pred.clone());
            }
        }
        Ok(())
    }
}

/// Decoded query response
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub json: Value,
    pub txn: TxnContext,
}

/// Decoded mutation response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationResponse {
    /// Blank-node name to newly assigned uid
    pub uids: BTreeMap<String, String>,
    pub txn: TxnContext,
}
