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

/// A delete operation.
#[derive(Debug, PartialEq)]
pub struct Delete {
    /// The table to delete from.
    pub table: PhysicalTable,
    /// The predicate to filter rows to delete.
    pub predicate: ConcretePredicate,
    /// The columns to return.
    pub returning: Vec<Column>,
}

impl ExpressionBuilder for Delete {
    /// Build the delete statement for the form `DELETE FROM <table> WHERE <predicate> RETURNING
    /// <returning-columns>`.
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_str("DELETE FROM ");
        self.table.build(builder);

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_with_predicate() {
        let table = PhysicalTable::new("Votes");
        let delete = table.delete(
            ConcretePredicate::Eq(Column::physical("userId"), Column::param("u1".to_string())),
            vec![],
        );

        assert_binding!(
            delete.to_sql(),
            r#"DELETE FROM "Votes" WHERE "userId" = $1"#,
            "u1".to_string()
        );
    }
}
