// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Destructive maintenance operations
//!
//! Nothing here asks for confirmation; callers guard invocation.

use log::warn;

use crate::client::{Client, Operation};
use crate::error::{Error, Result};

/// Irreversibly remove all data and schema from the alpha
pub fn drop_all(client: &Client) -> Result<()> {
    warn!("Dropping all data at {}", client.endpoint());
    client
        .alter(&Operation::DropAll)
        .map_err(Error::Maintenance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{Call, ScriptedTransport};
    use crate::error::DgraphError;

    #[test]
    fn test_drop_all_sends_alter() {
        let script = ScriptedTransport::new();
        let client = Client::with_transport(script.clone());

        drop_all(&client).unwrap();
        assert_eq!(script.calls(), vec![Call::Alter(Operation::DropAll)]);
    }

    #[test]
    fn test_rejection_is_maintenance_error() {
        let script = ScriptedTransport::new();
        script.fail_next_alter(DgraphError::Server {
            code: "ErrorUnauthorized".into(),
            message: "only guardians are allowed to drop all data".into(),
        });
        let client = Client::with_transport(script);

        assert!(matches!(
            drop_all(&client),
            Err(Error::Maintenance(DgraphError::Server { .. }))
        ));
    }
}
