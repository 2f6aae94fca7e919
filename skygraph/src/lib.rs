// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! SkyGraph - transactional bulk-load and query client for Dgraph
//!
//! # Quick Start
//!
//! ```no_run
//! use skygraph::{Client, ClientConfig, RankOrder, Schema};
//!
//! # fn main() -> skygraph::Result<()> {
//! let client = Client::connect(&ClientConfig::new("http://localhost:8080"))?;
//! skygraph::schema::install(&client, &Schema::flights_and_music())?;
//!
//! let report = skygraph::loader::load_file(&client, "data/airlines.json".as_ref())?;
//! println!("new uids: {:?}", report.uids);
//!
//! let fastest = skygraph::query::rank_airlines(&client, RankOrder::Fastest, 5)?;
//! println!("{}", fastest.to_pretty());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`] - Connection, transport and transactions
//! - [`schema`] - Schema declaration and installation
//! - [`loader`] - Bulk loading of JSON batches
//! - [`delete`] - Deletion by indexed attribute
//! - [`query`] - Parameter binding and the fixed query catalog
//! - [`maintenance`] - Drop-all
//! - [`config`] - Client configuration
//! - [`error`] - Error types

pub mod client;
pub mod config;
pub mod delete;
pub mod error;
pub mod loader;
pub mod maintenance;
pub mod query;
pub mod schema;

pub use client::{Client, Mutation, Operation, Request, Transport, Txn, TxnContext, TxnState, Uid};
pub use config::ClientConfig;
pub use delete::DeleteReport;
pub use error::{DgraphError, Error, Result};
pub use loader::{Batch, LoadReport};
pub use query::{QueryResponse, RankOrder, Template, VarType, VarValue, Vars};
pub use schema::Schema;
