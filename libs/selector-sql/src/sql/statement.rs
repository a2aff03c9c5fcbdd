// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tokio_postgres::types::ToSql;

use super::{ExpressionBuilder, SQLBuilder, SQLParamContainer};

/// A compiled statement: SQL text with positional placeholders (`$1`, `$2`, ...) and the
/// parameters bound to them, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SQLParamContainer>,
}

impl Statement {
    pub fn from_expression(expression: &impl ExpressionBuilder) -> Self {
        let mut builder = SQLBuilder::new();
        expression.build(&mut builder);
        let (sql, params) = builder.into_sql();
        Self { sql, params }
    }

    /// The parameters in the shape `tokio_postgres` query methods expect. Each one goes through
    /// [`SQLParamContainer`]'s encoding, so numbers adapt to the type Postgres infers for their
    /// placeholder.
    pub fn params_for_pg(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;
    use tokio_postgres::types::Type;

    use crate::sql::{column::Column, physical_table::PhysicalTable, predicate::ConcretePredicate};

    use super::*;

    #[test]
    fn increment_binds_to_int4_column() {
        let table = PhysicalTable::new("Posts");
        let update = table.update(
            vec![(
                "count".to_string(),
                Column::Add(
                    Box::new(Column::physical("count")),
                    Box::new(Column::param(3i64)),
                ),
            )],
            ConcretePredicate::Gt(Column::physical("baseScore"), Column::param(10i64)),
            vec![],
        );
        let statement = Statement::from_expression(&update);
        let params = statement.params_for_pg();

        let mut count = BytesMut::new();
        params[0].to_sql_checked(&Type::INT4, &mut count).unwrap();
        assert_eq!(&count[..], &3i32.to_be_bytes()[..]);

        let mut score = BytesMut::new();
        params[1].to_sql_checked(&Type::FLOAT8, &mut score).unwrap();
        assert_eq!(&score[..], &10f64.to_be_bytes()[..]);
    }
}
