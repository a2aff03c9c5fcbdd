// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{
    asql::{
        delete::AbstractDelete, modifier::Modifier, select::AbstractSelect, selector::Selector,
        update::AbstractUpdate,
    },
    database_error::DatabaseError,
    sql::{
        column::Column, delete::Delete, predicate::ConcretePredicate, select::Select,
        update::Update,
    },
};

pub trait PredicateTransformer {
    /// Transform a selector into a predicate. An empty selector yields `Predicate::True`.
    fn to_predicate(&self, selector: &Selector) -> ConcretePredicate;
}

pub trait ModifierTransformer {
    /// Normalize a modifier into the ordered `column = value` assignments of an `UPDATE`.
    fn to_column_values(&self, modifier: &Modifier)
    -> Result<Vec<(String, Column)>, DatabaseError>;
}

pub trait SelectTransformer {
    fn to_select(&self, abstract_select: &AbstractSelect) -> Result<Select, DatabaseError>;
}

pub trait DeleteTransformer {
    fn to_delete(&self, abstract_delete: &AbstractDelete) -> Result<Delete, DatabaseError>;
}

pub trait UpdateTransformer {
    fn to_update(&self, abstract_update: &AbstractUpdate) -> Result<Update, DatabaseError>;
}
