// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{
    ExpressionBuilder, SQLBuilder, column::Column, physical_table::PhysicalTable,
    predicate::ConcretePredicate,
};

/// An update operation.
#[derive(Debug, PartialEq)]
pub struct Update {
    /// The table to update.
    pub table: PhysicalTable,
    /// The predicate to filter rows to update.
    pub predicate: ConcretePredicate,
    /// The columns to update and their values.
    pub column_values: Vec<(String, Column)>,
    /// The columns to return.
    pub returning: Vec<Column>,
}

impl ExpressionBuilder for Update {
    /// Build the update statement for the form `UPDATE <table> SET <column = value, ...> WHERE
    /// <predicate> RETURNING <returning-columns>`. The `WHERE` is omitted if the predicate is
    /// `True` and `RETURNING` is omitted if the list of columns to return is empty.
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_str("UPDATE ");
        self.table.build(builder);

        builder.push_str(" SET ");
        builder.push_iter(
            self.column_values.iter(),
            ", ",
            |builder, (column, value)| {
                builder.push_identifier(column);
                builder.push_str(" = ");
                value.build(builder);
            },
        );

        if self.predicate != ConcretePredicate::True {
            builder.push_str(" WHERE ");
            self.predicate.build(builder);
        }

        if !self.returning.is_empty() {
            builder.push_str(" RETURNING ");
            builder.push_elems(&self.returning, ", ");
        }
    }
}
