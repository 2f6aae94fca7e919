// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Transactions
//!
//! A read-write transaction moves through
//! `Open -> Mutating* -> (Committed | Discarded)`. `Discarded` is reachable
//! from every state, and discarding a committed transaction is a no-op.
//! Dropping a transaction that is still open discards it, so cleanup happens
//! on every exit path of the code that owns it.

use log::{debug, info, warn};

use super::types::{Mutation, MutationResponse, Request, Response, TxnContext};
use super::Client;
use crate::error::DgraphError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnState {
    Open,
    Mutating,
    Committed,
    Discarded,
}

impl TxnState {
    fn is_finished(self) -> bool {
        matches!(self, TxnState::Committed | TxnState::Discarded)
    }

    fn label(self) -> &'static str {
        match self {
            TxnState::Open => "open",
            TxnState::Mutating => "mutating",
            TxnState::Committed => "committed",
            TxnState::Discarded => "discarded",
        }
    }
}

/// A unit of work against the alpha
pub struct Txn<'c> {
    client: &'c Client,
    ctx: TxnContext,
    read_only: bool,
    state: TxnState,
    mutated: bool,
}

impl<'c> Txn<'c> {
    pub(crate) fn new(client: &'c Client, read_only: bool) -> Self {
        Self {
            client,
            ctx: TxnContext::default(),
            read_only,
            state: TxnState::Open,
            mutated: false,
        }
    }

    pub fn state(&self) -> TxnState {
        self.state
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn context(&self) -> &TxnContext {
        &self.ctx
    }

    /// Run a query at this transaction's snapshot
    pub fn query(&mut self, request: &Request) -> Result<Response, DgraphError> {
        self.ensure_active()?;
        let response = self
            .client
            .transport()
            .query(request, &self.ctx, self.read_only)?;
        self.ctx.merge(&response.txn)?;
        Ok(response)
    }

    /// Stage a mutation; mutations apply in submission order
    pub fn mutate(&mut self, mutation: Mutation) -> Result<MutationResponse, DgraphError> {
        if self.read_only {
            return Err(DgraphError::ReadOnly);
        }
        self.ensure_active()?;
        self.state = TxnState::Mutating;
        self.mutated = true;

        debug!(
            "staging {} mutation (start_ts {})",
            mutation.kind.as_key(),
            self.ctx.start_ts
        );
        let response = self.client.transport().mutate(&mutation, &self.ctx)?;
        self.ctx.merge(&response.txn)?;
        if mutation.commit_now {
            self.state = TxnState::Committed;
        }
        Ok(response)
    }

    /// Commit staged mutations. Allowed exactly once.
    pub fn commit(&mut self) -> Result<(), DgraphError> {
        if self.read_only {
            return Err(DgraphError::ReadOnly);
        }
        self.ensure_active()?;

        if !self.mutated {
            self.state = TxnState::Committed;
            return Ok(());
        }

        match self.client.transport().commit(&self.ctx) {
            Ok(committed) => {
                self.state = TxnState::Committed;
                self.ctx.commit_ts = committed.commit_ts;
                info!(
                    "committed transaction start_ts {} at commit_ts {}",
                    self.ctx.start_ts, self.ctx.commit_ts
                );
                Ok(())
            }
            Err(DgraphError::Aborted(msg)) => {
                // The server already rolled this transaction back.
                self.state = TxnState::Discarded;
                self.ctx.aborted = true;
                Err(DgraphError::Aborted(msg))
            }
            Err(e) => Err(e),
        }
    }

    /// Abort the transaction. No-op once committed or discarded.
    pub fn discard(&mut self) -> Result<(), DgraphError> {
        if self.state.is_finished() {
            return Ok(());
        }
        self.state = TxnState::Discarded;
        if self.read_only || !self.mutated || self.ctx.start_ts == 0 {
            return Ok(());
        }
        debug!("discarding transaction start_ts {}", self.ctx.start_ts);
        self.client.transport().abort(&self.ctx)
    }

    fn ensure_active(&self) -> Result<(), DgraphError> {
        if self.state.is_finished() {
            return Err(DgraphError::Finished(self.state.label()));
        }
        Ok(())
    }
}

impl Drop for Txn<'_> {
    fn drop(&mut self) {
        if self.state.is_finished() {
            return;
        }
        if let Err(e) = self.discard() {
            warn!(
                "failed to discard transaction start_ts {}: {}",
                self.ctx.start_ts, e
            );
        }
    }
}
