// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Connection management
//!
//! [`Client`] is the process-scoped handle every operation receives by
//! reference. It owns a [`Transport`] and hands out [`Txn`]s that borrow it.

pub mod http;
pub mod transport;
pub mod txn;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

use log::info;

use crate::config::ClientConfig;
use crate::error::{DgraphError, Error, Result};

pub use http::HttpTransport;
pub use transport::Transport;
pub use txn::{Txn, TxnState};
pub use types::{
    Mutation, MutationKind, MutationResponse, Operation, Request, Response, TxnContext, Uid,
};

/// Handle to a Dgraph alpha
pub struct Client {
    transport: Box<dyn Transport>,
    endpoint: String,
}

impl Client {
    /// Open a client against `config.endpoint`.
    ///
    /// Fails immediately with [`Error::Connection`] when the transport cannot
    /// be built or the health probe does not answer; there is no retry.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config).map_err(Error::Connection)?;
        let client = Self {
            transport: Box::new(transport),
            endpoint: config.base_url().to_string(),
        };
        if config.verify_health {
            client.ping()?;
        }
        info!("Connected to Dgraph alpha at {}", client.endpoint);
        Ok(client)
    }

    /// Wrap an arbitrary transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            endpoint: "custom".to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Probe the alpha's health endpoint
    pub fn ping(&self) -> Result<()> {
        self.transport.health().map_err(Error::Connection)
    }

    /// New read-write transaction
    pub fn txn(&self) -> Txn<'_> {
        Txn::new(self, false)
    }

    /// New read-only transaction; it is never committed
    pub fn read_only_txn(&self) -> Txn<'_> {
        Txn::new(self, true)
    }

    pub(crate) fn alter(&self, op: &Operation) -> std::result::Result<(), DgraphError> {
        self.transport.alter(op)
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}
