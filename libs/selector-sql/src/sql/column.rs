// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, SQLBuilder, SQLParamContainer, select::Select};
use crate::ParamEquality;

/// A column-like concept covering any usage where a database table column could be used. For
/// example, in a predicate you can say `status = 'open'` or `score > base_score`. Here, `status`,
/// `score`, `base_score`, and `'open'` all serve as columns from our perspective. The variants
/// encode the exact semantics of each kind.
#[derive(Debug, PartialEq)]
pub enum Column {
    /// An actual physical column in a table such as `"status"`
    Physical(String),
    /// A value nested inside a JSON column, addressed by a list of keys. Rendered as
    /// `"column" #> $n`, where the key list is bound as a `text[]` parameter.
    JsonPath {
        column: String,
        path: SQLParamContainer,
    },
    /// A literal value such as a string or number e.g. 'open'. This will be mapped to a
    /// placeholder to avoid SQL injection.
    Param(SQLParamContainer),
    /// An array parameter with a wrapping such as ANY() or ALL()
    ArrayParam {
        param: SQLParamContainer,
        wrapper: ArrayParamWrapper,
    },
    /// The sum of two columns, as in `"vote_count" + $1`
    Add(Box<Column>, Box<Column>),
    /// A sub-select query.
    SubSelect(Box<Select>),
    /// All columns (`*`)
    Star,
    /// A null value
    Null,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ArrayParamWrapper {
    Any,
    All,
}

impl Column {
    pub fn physical(name: impl Into<String>) -> Self {
        Self::Physical(name.into())
    }

    pub fn param<T: crate::SQLParam + 'static>(value: T) -> Self {
        Self::Param(SQLParamContainer::new(value))
    }
}

impl ExpressionBuilder for Column {
    fn build(&self, builder: &mut SQLBuilder) {
        match self {
            Column::Physical(name) => builder.push_identifier(name),
            Column::JsonPath { column, path } => {
                builder.push_identifier(column);
                builder.push_str(" #> ");
                builder.push_param(path.clone());
            }
            Column::Param(value) => builder.push_param(value.clone()),
            Column::ArrayParam { param, wrapper } => {
                builder.push_str(match wrapper {
                    ArrayParamWrapper::Any => "ANY",
                    ArrayParamWrapper::All => "ALL",
                });
                builder.push('(');
                builder.push_param(param.clone());
                builder.push(')');
            }
            Column::Add(lhs, rhs) => {
                lhs.build(builder);
                builder.push_str(" + ");
                rhs.build(builder);
            }
            Column::SubSelect(select) => {
                builder.push('(');
                select.build(builder);
                builder.push(')');
            }
            Column::Star => builder.push('*'),
            Column::Null => builder.push_str("NULL"),
        }
    }
}

impl ParamEquality for Column {
    fn param_eq(&self, other: &Self) -> Option<bool> {
        match (self, other) {
            (Column::Param(v1), Column::Param(v2)) => Some(v1 == v2),
            _ => None,
        }
    }
}
