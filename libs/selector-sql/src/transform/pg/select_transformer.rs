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
    asql::{field_path::FieldPath, options::validate_limit, select::AbstractSelect},
    database_error::DatabaseError,
    sql::{column::Column, limit::Limit, select::Select},
    transform::transformer::{PredicateTransformer, SelectTransformer},
};

use super::Postgres;

impl SelectTransformer for Postgres {
    #[instrument(
        name = "SelectTransformer::to_select for Postgres",
        skip_all,
        fields(table = ?abstract_select.table)
        )]
    fn to_select(&self, abstract_select: &AbstractSelect) -> Result<Select, DatabaseError> {
        let options = &abstract_select.options;
        validate_limit(options.limit)?;

        let columns = if options.projection.is_empty() {
            vec![Column::Star]
        } else {
            options
                .projection
                .iter()
                .map(|field| FieldPath::parse(field).map(|path| path.to_column()))
                .collect::<Result<_, _>>()?
        };

        Ok(abstract_select.table.select(
            columns,
            self.to_predicate(&abstract_select.selector),
            options.limit.map(Limit),
            options.for_update,
        ))
    }
}
