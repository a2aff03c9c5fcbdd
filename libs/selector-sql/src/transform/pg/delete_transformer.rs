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
    asql::{delete::AbstractDelete, options::validate_limit},
    database_error::DatabaseError,
    sql::{column::Column, delete::Delete},
    transform::transformer::{DeleteTransformer, PredicateTransformer},
};

use super::{Postgres, restrict_to_locked_rows};

impl DeleteTransformer for Postgres {
    #[instrument(
        name = "DeleteTransformer::to_delete for Postgres",
        skip_all,
        fields(table = ?abstract_delete.table)
        )]
    fn to_delete(&self, abstract_delete: &AbstractDelete) -> Result<Delete, DatabaseError> {
        let options = &abstract_delete.options;
        validate_limit(options.limit)?;

        // Same row selection as an update: a direct predicate, or a locked candidate set when
        // limited
        let predicate = restrict_to_locked_rows(
            &abstract_delete.table,
            self.to_predicate(&abstract_delete.selector),
            options.limit,
        );

        let returning = if options.return_deleted {
            vec![Column::Star]
        } else {
            vec![]
        };

        Ok(abstract_delete.table.delete(predicate, returning))
    }
}
