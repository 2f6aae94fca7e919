// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Deletion of entities matched by an indexed attribute

use log::{debug, info};
use serde::Deserialize;

use crate::client::{Client, Mutation, Uid};
use crate::error::{DgraphError, Error, Result};
use crate::query::{Template, VarType, Vars};
use crate::schema::is_identifier;

const MATCHES_BLOCK: &str = "all";

#[derive(Debug, Deserialize)]
struct Match {
    uid: Uid,
}

/// Outcome of a committed deletion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteReport {
    pub deleted: Vec<Uid>,
}

impl DeleteReport {
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty()
    }
}

/// Lookup template for `predicate == $value`. Predicate names cannot be
/// bound as variables, so callers validate them before building the text.
fn lookup_template(predicate: &str) -> Template {
    Template::new(
        "lookup",
        format!(
            "{{\n  {}(func: eq({}, $value)) {{\n    uid\n  }}\n}}",
            MATCHES_BLOCK, predicate
        ),
    )
    .param("value", VarType::String)
}

/// Uids of entities whose `predicate` equals `value`, read in a read-only
/// transaction
pub fn find_uids(client: &Client, predicate: &str, value: &str) -> Result<Vec<Uid>> {
    lookup(client, predicate, value).map_err(Error::Delete)
}

fn lookup(
    client: &Client,
    predicate: &str,
    value: &str,
) -> std::result::Result<Vec<Uid>, DgraphError> {
    if !is_identifier(predicate) {
        return Err(DgraphError::invalid(format!(
            "'{}' is not a valid predicate name",
            predicate
        )));
    }
    let request = lookup_template(predicate).bind(&Vars::new().with("value", value))?;
    let mut txn = client.read_only_txn();
    let response = txn.query(&request)?;

    let matches: Vec<Match> = match response.json.get(MATCHES_BLOCK) {
        Some(block) => serde_json::from_value(block.clone())?,
        None => Vec::new(),
    };
    Ok(matches.into_iter().map(|m| m.uid).collect())
}

/// Delete every entity whose `predicate` equals `value`.
///
/// One delete mutation is staged per match inside a single read-write
/// transaction and committed once. Zero matches is a successful no-op.
pub fn delete_by(client: &Client, predicate: &str, value: &str) -> Result<DeleteReport> {
    let uids = find_uids(client, predicate, value)?;
    if uids.is_empty() {
        info!("No entities with {} == {:?}; nothing deleted", predicate, value);
    }

    let mut txn = client.txn();
    for uid in &uids {
        debug!("staging delete of {}", uid);
        txn.mutate(Mutation::delete_node(uid)).map_err(Error::Delete)?;
    }
    txn.commit().map_err(Error::Delete)?;

    if !uids.is_empty() {
        info!("Deleted {} entities with {} == {:?}", uids.len(), predicate, value);
    }
    Ok(DeleteReport { deleted: uids })
}

/// Delete every entity whose `name` equals `name`
pub fn delete_by_name(client: &Client, name: &str) -> Result<DeleteReport> {
    delete_by(client, "name", name)
}
