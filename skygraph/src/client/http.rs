// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Dgraph HTTP API transport
//!
//! Endpoints used:
//! - `GET  /health`
//! - `POST /alter` (schema text or `{"drop_all": true}`)
//! - `POST /query?startTs=N&ro=true` with `{"query", "variables"}`
//! - `POST /mutate?startTs=N` with `{"set": ...}` or `{"delete": ...}`
//! - `POST /commit?startTs=N` with `{"keys", "preds"}`, or `&abort=true`

use log::debug;
use reqwest::blocking::{Client as HttpClient, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

use super::transport::Transport;
use super::types::{Mutation, MutationResponse, Operation, Request, Response, TxnContext};
use crate::config::ClientConfig;
use crate::error::DgraphError;

const ABORTED_MARKER: &str = "Transaction has been aborted";

/// Response envelope shared by every endpoint
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Value,
    #[serde(default)]
    errors: Vec<ServerError>,
    #[serde(default)]
    extensions: Extensions,
}

#[derive(Debug, Default, Deserialize)]
struct Extensions {
    #[serde(default)]
    txn: TxnContext,
}

#[derive(Debug, Deserialize)]
struct ServerError {
    message: String,
    #[serde(default)]
    extensions: Option<ServerErrorExtensions>,
}

#[derive(Debug, Deserialize)]
struct ServerErrorExtensions {
    #[serde(default)]
    code: String,
}

#[derive(Debug, Default, Deserialize)]
struct MutationData {
    #[serde(default)]
    uids: Option<BTreeMap<String, String>>,
}

/// Blocking HTTP transport with per-call timeouts
pub struct HttpTransport {
    http: HttpClient,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, DgraphError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    fn post(&self, path: &str, params: &[(&str, String)]) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {} {:?}", url, params);
        self.http.post(url).query(params)
    }

    fn send(&self, request: RequestBuilder) -> Result<Envelope, DgraphError> {
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        decode_envelope(status.as_u16(), status.is_success(), &body)
    }

    fn txn_params(ctx: &TxnContext) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if ctx.start_ts != 0 {
            params.push(("startTs", ctx.start_ts.to_string()));
        }
        params
    }
}

impl Transport for HttpTransport {
    fn health(&self) -> Result<(), DgraphError> {
        let url = format!("{}/health", self.base_url);
        debug!("GET {}", url);
        let response = self.http.get(url).send()?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DgraphError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            })
        }
    }

    fn alter(&self, op: &Operation) -> Result<(), DgraphError> {
        let request = match op {
            Operation::Schema(schema) => self.post("/alter", &[]).body(schema.clone()),
            Operation::DropAll => self.post("/alter", &[]).json(&json!({ "drop_all": true })),
        };
        self.send(request).map(|_| ())
    }

    fn query(
        &self,
        request: &Request,
        ctx: &TxnContext,
        read_only: bool,
    ) -> Result<Response, DgraphError> {
        let mut params = Self::txn_params(ctx);
        if read_only {
            params.push(("ro", "true".to_string()));
        }
        let body = json!({ "query": request.query, "variables": request.vars });
        let envelope = self.send(self.post("/query", &params).json(&body))?;
        Ok(Response {
            json: envelope.data,
            txn: envelope.extensions.txn,
        })
    }

    fn mutate(
        &self,
        mutation: &Mutation,
        ctx: &TxnContext,
    ) -> Result<MutationResponse, DgraphError> {
        let mut params = Self::txn_params(ctx);
        if mutation.commit_now {
            params.push(("commitNow", "true".to_string()));
        }
        let mut body = serde_json::Map::new();
        body.insert(mutation.kind.as_key().to_string(), mutation.payload.clone());
        let request = self
            .post("/mutate", &params)
            .header(CONTENT_TYPE, "application/json")
            .body(Value::Object(body).to_string());
        let envelope = self.send(request)?;
        let data: MutationData = if envelope.data.is_null() {
            MutationData::default()
        } else {
            serde_json::from_value(envelope.data)?
        };
        Ok(MutationResponse {
            uids: data.uids.unwrap_or_default(),
            txn: envelope.extensions.txn,
        })
    }

    fn commit(&self, ctx: &TxnContext) -> Result<TxnContext, DgraphError> {
        let body = json!({ "keys": ctx.keys, "preds": ctx.preds });
        let envelope = self.send(self.post("/commit", &Self::txn_params(ctx)).json(&body))?;
        let committed = envelope.extensions.txn;
        if committed.aborted {
            return Err(DgraphError::Aborted(format!(
                "commit of start_ts {} was aborted by the server",
                ctx.start_ts
            )));
        }
        Ok(committed)
    }

    fn abort(&self, ctx: &TxnContext) -> Result<(), DgraphError> {
        let mut params = Self::txn_params(ctx);
        params.push(("abort", "true".to_string()));
        self.send(self.post("/commit", &params)).map(|_| ())
    }
}

fn decode_envelope(status: u16, success: bool, body: &str) -> Result<Envelope, DgraphError> {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !success => {
            return Err(DgraphError::Status {
                status,
                body: body.to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(first) = envelope.errors.first() {
        if first.message.contains(ABORTED_MARKER) {
            return Err(DgraphError::Aborted(first.message.clone()));
        }
        let code = first
            .extensions
            .as_ref()
            .map(|ext| ext.code.clone())
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| "Error".to_string());
        return Err(DgraphError::Server {
            code,
            message: first.message.clone(),
        });
    }

    if !success {
        return Err(DgraphError::Status {
            status,
            body: body.to_string(),
        });
    }
    Ok(envelope)
}
