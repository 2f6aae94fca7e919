// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Scripted transport for unit tests
//!
//! Records every call and answers from queued responses. Start timestamps
//! are handed out the way an alpha would: on the first query or mutation of a
//! transaction.

use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use super::transport::Transport;
use super::types::{
    Mutation, MutationKind, MutationResponse, Operation, Request, Response, TxnContext,
};
use crate::error::DgraphError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Health,
    Alter(Operation),
    Query {
        query: String,
        vars: BTreeMap<String, String>,
        start_ts: u64,
        read_only: bool,
    },
    Mutate {
        kind: MutationKind,
        payload: Value,
        start_ts: u64,
    },
    Commit {
        start_ts: u64,
        keys: Vec<String>,
    },
    Abort {
        start_ts: u64,
    },
}

#[derive(Default)]
struct Script {
    calls: Vec<Call>,
    query_results: VecDeque<Value>,
    mutation_uids: VecDeque<BTreeMap<String, String>>,
    health_error: Option<DgraphError>,
    alter_error: Option<DgraphError>,
    query_error: Option<DgraphError>,
    mutate_errors: BTreeMap<usize, DgraphError>,
    mutate_count: usize,
    commit_error: Option<DgraphError>,
    next_ts: u64,
    next_key: u64,
}

impl Script {
    fn assign_ts(&mut self, ctx: &TxnContext) -> u64 {
        if ctx.start_ts != 0 {
            return ctx.start_ts;
        }
        self.next_ts += 1;
        self.next_ts
    }
}

#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    inner: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue the `data` object of the next query response
    pub(crate) fn push_query_result(&self, data: Value) {
        self.inner.lock().query_results.push_back(data);
    }

    /// Queue the uid map of the next mutation response
    pub(crate) fn push_mutation_uids(&self, uids: &[(&str, &str)]) {
        let map = uids
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.inner.lock().mutation_uids.push_back(map);
    }

    pub(crate) fn fail_health(&self, err: DgraphError) {
        self.inner.lock().health_error = Some(err);
    }

    pub(crate) fn fail_next_alter(&self, err: DgraphError) {
        self.inner.lock().alter_error = Some(err);
    }

    pub(crate) fn fail_next_query(&self, err: DgraphError) {
        self.inner.lock().query_error = Some(err);
    }

    pub(crate) fn fail_next_mutate(&self, err: DgraphError) {
        let mut script = self.inner.lock();
        let n = script.mutate_count + 1;
        script.mutate_errors.insert(n, err);
    }

    /// Fail the `n`th mutate call (1-based, counted over the whole script)
    pub(crate) fn fail_mutate_at(&self, n: usize, err: DgraphError) {
        self.inner.lock().mutate_errors.insert(n, err);
    }

    pub(crate) fn fail_next_commit(&self, err: DgraphError) {
        self.inner.lock().commit_error = Some(err);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.inner.lock().calls.clone()
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.inner.lock().calls.iter().filter(|c| pred(c)).count()
    }
}

impl Transport for ScriptedTransport {
    fn health(&self) -> Result<(), DgraphError> {
        let mut script = self.inner.lock();
        script.calls.push(Call::Health);
        match script.health_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn alter(&self, op: &Operation) -> Result<(), DgraphError> {
        let mut script = self.inner.lock();
        script.calls.push(Call::Alter(op.clone()));
        match script.alter_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn query(
        &self,
        request: &Request,
        ctx: &TxnContext,
        read_only: bool,
    ) -> Result<Response, DgraphError> {
        let mut script = self.inner.lock();
        script.calls.push(Call::Query {
            query: request.query.clone(),
            vars: request.vars.clone(),
            start_ts: ctx.start_ts,
            read_only,
        });
        if let Some(err) = script.query_error.take() {
            return Err(err);
        }
        let start_ts = script.assign_ts(ctx);
        let json = script.query_results.pop_front().unwrap_or_else(|| json!({}));
        Ok(Response {
            json,
            txn: TxnContext {
                start_ts,
                ..Default::default()
            },
        })
    }

    fn mutate(
        &self,
        mutation: &Mutation,
        ctx: &TxnContext,
    ) -> Result<MutationResponse, DgraphError> {
        let mut script = self.inner.lock();
        script.calls.push(Call::Mutate {
            kind: mutation.kind,
            payload: mutation.payload.clone(),
            start_ts: ctx.start_ts,
        });
        script.mutate_count += 1;
        let n = script.mutate_count;
        if let Some(err) = script.mutate_errors.remove(&n) {
            return Err(err);
        }
        let start_ts = script.assign_ts(ctx);
        script.next_key += 1;
        let key = format!("key-{}", script.next_key);
        let uids = script.mutation_uids.pop_front().unwrap_or_default();
        Ok(MutationResponse {
            uids,
            txn: TxnContext {
                start_ts,
                keys: vec![key],
                preds: vec!["1-0-name".to_string()],
                ..Default::default()
            },
        })
    }

    fn commit(&self, ctx: &TxnContext) -> Result<TxnContext, DgraphError> {
        let mut script = self.inner.lock();
        script.calls.push(Call::Commit {
            start_ts: ctx.start_ts,
            keys: ctx.keys.clone(),
        });
        if let Some(err) = script.commit_error.take() {
            return Err(err);
        }
        script.next_ts += 1;
        Ok(TxnContext {
            start_ts: ctx.start_ts,
            commit_ts: script.next_ts,
            ..Default::default()
        })
    }

    fn abort(&self, ctx: &TxnContext) -> Result<(), DgraphError> {
        let mut script = self.inner.lock();
        script.calls.push(Call::Abort {
            start_ts: ctx.start_ts,
        });
        Ok(())
    }
}
