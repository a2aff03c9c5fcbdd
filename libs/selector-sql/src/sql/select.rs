// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{
    ExpressionBuilder, SQLBuilder, column::Column, limit::Limit, physical_table::PhysicalTable,
    predicate::ConcretePredicate,
};

/// A select statement
#[derive(Debug, PartialEq)]
pub struct Select {
    /// The table to select from
    pub table: PhysicalTable,
    /// The columns to select
    pub columns: Vec<Column>,
    /// The predicate to filter the rows
    pub predicate: ConcretePredicate,
    /// The limit clause
    pub limit: Option<Limit>,
    /// Lock the selected rows (`FOR UPDATE`) until the enclosing transaction ends
    pub for_update: bool,
}

impl ExpressionBuilder for Select {
    /// Build the select statement for the form `SELECT <columns> FROM <table> WHERE <predicate>
    /// LIMIT <limit> FOR UPDATE`. The `WHERE` is omitted if the predicate is `True`.
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_str("SELECT ");
        builder.push_elems(&self.columns, ", ");

        builder.push_str(" FROM ");
        self.table.build(builder);

        // Avoid correct, but inelegant "WHERE TRUE" clause
        if self.predicate != ConcretePredicate::True {
            builder.push_str(" WHERE ");
            self.predicate.build(builder);
        }
        if let Some(limit) = &self.limit {
            builder.push_space();
            limit.build(builder);
        }
        if self.for_update {
            builder.push_str(" FOR UPDATE");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locking_select() {
        let table = PhysicalTable::new("Posts");
        let select = table.select(
            vec![table.id_column()],
            ConcretePredicate::Eq(Column::physical("status"), Column::param("open".to_string())),
            Some(Limit(5)),
            true,
        );

        assert_binding!(
            select.to_sql(),
            r#"SELECT "_id" FROM "Posts" WHERE "status" = $1 LIMIT $2 FOR UPDATE"#,
            "open".to_string(),
            5i64
        );
    }

    #[test]
    fn unrestricted_select() {
        let table = PhysicalTable::new("Posts");
        let select = table.select(vec![Column::Star], ConcretePredicate::True, None, false);

        assert_binding!(select.to_sql(), r#"SELECT * FROM "Posts""#);
    }
}
