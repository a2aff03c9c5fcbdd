// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::sql::{
    column::Column, limit::Limit, physical_table::PhysicalTable, predicate::ConcretePredicate,
};

mod delete_transformer;
mod modifier_transformer;
mod predicate_transformer;
mod select_transformer;
mod update_transformer;

pub struct Postgres {}

/// Restrict a predicate to at most `limit` rows.
///
/// Postgres has no `LIMIT` on `UPDATE`/`DELETE`, so a limited operation first picks (and locks)
/// the candidate rows and then targets them by primary key:
/// ```sql
/// "_id" IN (SELECT "_id" FROM "posts" WHERE <predicate> LIMIT $n FOR UPDATE)
/// ```
/// The lock keeps concurrent writers from changing the candidate set between the inner select
/// and the outer statement. Without a limit, the predicate is returned unchanged.
fn restrict_to_locked_rows(
    table: &PhysicalTable,
    predicate: ConcretePredicate,
    limit: Option<i64>,
) -> ConcretePredicate {
    match limit {
        None => predicate,
        Some(limit) => {
            let candidates =
                table.select(vec![table.id_column()], predicate, Some(Limit(limit)), true);
            ConcretePredicate::In(table.id_column(), Column::SubSelect(Box::new(candidates)))
        }
    }
}
