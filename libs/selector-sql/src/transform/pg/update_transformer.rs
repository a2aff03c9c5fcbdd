// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tracing::instrument;

use crate::{
    asql::{
        options::{ensure_no_upsert, validate_limit},
        update::AbstractUpdate,
    },
    database_error::DatabaseError,
    sql::{column::Column, update::Update},
    transform::transformer::{ModifierTransformer, PredicateTransformer, UpdateTransformer},
};

use super::{Postgres, restrict_to_locked_rows};

impl UpdateTransformer for Postgres {
    /// Transform an abstract update into a single update statement of the form:
    /// ```sql
    /// UPDATE "posts" SET "title" = $1, "viewCount" = "viewCount" + $2 WHERE <predicate> RETURNING *
    /// ```
    /// With a limit, the predicate targets a locked candidate set instead (see
    /// [`restrict_to_locked_rows`]).
    #[instrument(
        name = "UpdateTransformer::to_update for Postgres",
        skip_all,
        fields(table = ?abstract_update.table)
        )]
    fn to_update(&self, abstract_update: &AbstractUpdate) -> Result<Update, DatabaseError> {
        let options = &abstract_update.options;

        ensure_no_upsert(options)?;
        validate_limit(options.limit)?;

        let column_values = self.to_column_values(&abstract_update.modifier)?;

        let predicate = restrict_to_locked_rows(
            &abstract_update.table,
            self.to_predicate(&abstract_update.selector),
            options.limit,
        );

        let returning = if options.return_updated {
            vec![Column::Star]
        } else {
            vec![]
        };

        Ok(abstract_update
            .table
            .update(column_values, predicate, returning))
    }
}
