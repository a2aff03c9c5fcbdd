// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tokio_postgres::{GenericClient, Row};
use tracing::{debug, error, instrument};

use crate::{
    database_error::{DatabaseError, WithContext},
    sql::statement::Statement,
};

/// Runs compiled statements through a caller-supplied client (a connection, a pooled
/// connection, or an open transaction). Retries and transaction boundaries are left to the caller.
#[derive(Debug, Default)]
pub struct DatabaseExecutor {}

impl DatabaseExecutor {
    /// Execute the statement and return the rows it produced (empty unless the statement has a
    /// `RETURNING` clause or is a select).
    #[instrument(
        name = "DatabaseExecutor::execute",
        level = "trace",
        skip_all,
        fields(sql = %statement.sql)
        )]
    pub async fn execute(
        &self,
        statement: &Statement,
        client: &impl GenericClient,
    ) -> Result<Vec<Row>, DatabaseError> {
        let params = statement.params_for_pg();

        debug!("Executing SQL operation: {}", statement.sql);

        client
            .query(statement.sql.as_str(), &params[..])
            .await
            .map_err(|e| {
                error!("Failed to execute query: {e:?}");
                DatabaseError::Delegate(e)
            })
            .with_context("Database operation failed".into())
    }
}
