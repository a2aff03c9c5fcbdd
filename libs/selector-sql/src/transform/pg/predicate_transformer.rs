// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{
    asql::selector::{Condition, Selector, SelectorClause},
    sql::{
        column::{ArrayParamWrapper, Column},
        predicate::ConcretePredicate,
    },
    transform::transformer::PredicateTransformer,
};

use super::Postgres;

impl PredicateTransformer for Postgres {
    /// Clauses of a selector are ANDed together in their given order. `$and` of no selectors is
    /// `TRUE` and `$or` of no selectors is `FALSE`, matching the identities of the operators.
    fn to_predicate(&self, selector: &Selector) -> ConcretePredicate {
        selector
            .clauses
            .iter()
            .fold(ConcretePredicate::True, |acc, clause| {
                ConcretePredicate::and(acc, self.clause_predicate(clause))
            })
    }
}

impl Postgres {
    fn clause_predicate(&self, clause: &SelectorClause) -> ConcretePredicate {
        match clause {
            SelectorClause::Field(field, condition) => {
                condition_predicate(field.to_column(), condition)
            }
            SelectorClause::And(selectors) => {
                selectors
                    .iter()
                    .fold(ConcretePredicate::True, |acc, selector| {
                        ConcretePredicate::and(acc, self.to_predicate(selector))
                    })
            }
            SelectorClause::Or(selectors) => {
                selectors
                    .iter()
                    .fold(ConcretePredicate::False, |acc, selector| {
                        ConcretePredicate::or(acc, self.to_predicate(selector))
                    })
            }
        }
    }
}

fn condition_predicate(column: Column, condition: &Condition) -> ConcretePredicate {
    match condition {
        Condition::Eq(value) => ConcretePredicate::eq(column, value.clone().into()),
        Condition::Ne(value) => ConcretePredicate::neq(column, value.clone().into()),
        Condition::Gt(value) => ConcretePredicate::Gt(column, value.clone().into()),
        Condition::Gte(value) => ConcretePredicate::Gte(column, value.clone().into()),
        Condition::Lt(value) => ConcretePredicate::Lt(column, value.clone().into()),
        Condition::Lte(value) => ConcretePredicate::Lte(column, value.clone().into()),
        Condition::In(values) => ConcretePredicate::Eq(
            column,
            Column::ArrayParam {
                param: values.clone(),
                wrapper: ArrayParamWrapper::Any,
            },
        ),
        Condition::Nin(values) => ConcretePredicate::Neq(
            column,
            Column::ArrayParam {
                param: values.clone(),
                wrapper: ArrayParamWrapper::All,
            },
        ),
        Condition::Exists(true) => ConcretePredicate::Neq(column, Column::Null),
        Condition::Exists(false) => ConcretePredicate::Eq(column, Column::Null),
    }
}
