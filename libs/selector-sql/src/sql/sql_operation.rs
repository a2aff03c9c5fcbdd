// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{
    ExpressionBuilder, SQLBuilder, delete::Delete, select::Select, statement::Statement,
    update::Update,
};

/// A concrete SQL operation ready to be rendered into a [`Statement`].
#[derive(Debug)]
pub enum SQLOperation {
    Select(Select),
    Delete(Delete),
    Update(Update),
}

impl SQLOperation {
    pub fn into_statement(self) -> Statement {
        Statement::from_expression(&self)
    }
}

impl ExpressionBuilder for SQLOperation {
    fn build(&self, builder: &mut SQLBuilder) {
        match self {
            SQLOperation::Select(select) => select.build(builder),
            SQLOperation::Delete(delete) => delete.build(builder),
            SQLOperation::Update(update) => update.build(builder),
        }
    }
}
