// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Transport seam between transactions and the Dgraph alpha

use super::types::{Mutation, MutationResponse, Operation, Request, Response, TxnContext};
use crate::error::DgraphError;

/// Wire operations a Dgraph alpha exposes to clients.
///
/// Every call is a blocking request/response. Implemented by
/// [`HttpTransport`](super::http::HttpTransport) for real servers; tests
/// provide a scripted implementation.
pub trait Transport: Send + Sync {
    /// Liveness probe
    fn health(&self) -> Result<(), DgraphError>;

    /// Schema change or drop operation
    fn alter(&self, op: &Operation) -> Result<(), DgraphError>;

    /// Run a query inside the transaction described by `ctx`
    fn query(
        &self,
        request: &Request,
        ctx: &TxnContext,
        read_only: bool,
    ) -> Result<Response, DgraphError>;

    /// Stage a mutation inside the transaction described by `ctx`
    fn mutate(
        &self,
        mutation: &Mutation,
        ctx: &TxnContext,
    ) -> Result<MutationResponse, DgraphError>;

    /// Commit staged mutations; returns the context with `commit_ts` set
    fn commit(&self, ctx: &TxnContext) -> Result<TxnContext, DgraphError>;

    /// Abort the transaction on the server
    fn abort(&self, ctx: &TxnContext) -> Result<(), DgraphError>;
}
