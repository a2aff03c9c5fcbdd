// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{any::Any, fmt::Debug, sync::Arc};

use tokio_postgres::types::{ToSql, Type, to_sql_checked};

#[macro_use]
#[cfg(test)]
mod test_util;

mod coercion;

pub(crate) mod column;
pub(crate) mod delete;
pub(crate) mod expression_builder;
pub(crate) mod limit;
pub(crate) mod physical_table;
pub(crate) mod predicate;
pub(crate) mod select;
pub(crate) mod sql_builder;
pub(crate) mod sql_operation;
pub(crate) mod statement;
pub(crate) mod update;

pub use expression_builder::ExpressionBuilder;
pub use sql_builder::SQLBuilder;

/// A value that can be bound to a placeholder in a prepared statement.
pub trait SQLParam: ToSql + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn eq(&self, other: &dyn SQLParam) -> bool;
}

impl<T: ToSql + Send + Sync + Any + PartialEq> SQLParam for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq(&self, other: &dyn SQLParam) -> bool {
        if let Some(other) = other.as_any().downcast_ref::<T>() {
            self == other
        } else {
            false
        }
    }
}

impl PartialEq for dyn SQLParam {
    fn eq(&self, other: &Self) -> bool {
        SQLParam::eq(self, other)
    }
}

/// Newtype for SQL parameters that can be used in a prepared statement. We would have been fine
/// with just using `Arc<dyn SQLParam>` but we need to implement `ToSql` for it and since `Arc`
/// (unlike `Box`) is not a `#[fundamental]` type, we have to wrap it in a newtype.
#[derive(Clone)]
pub struct SQLParamContainer(Arc<dyn SQLParam>);

impl SQLParamContainer {
    pub fn new<T: SQLParam + 'static>(param: T) -> Self {
        Self(Arc::new(param))
    }
}

impl ToSql for SQLParamContainer {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut bytes::BytesMut,
    ) -> Result<tokio_postgres::types::IsNull, Box<dyn std::error::Error + Sync + Send>> {
        coercion::to_sql_coerced(self.0.as_ref(), ty, out)
    }

    fn accepts(_ty: &Type) -> bool {
        // The wrapped parameter performs the real check in `to_sql_coerced`
        true
    }

    to_sql_checked!();
}

impl PartialEq for SQLParamContainer {
    fn eq(&self, other: &Self) -> bool {
        SQLParam::eq(self.0.as_ref(), other.0.as_ref())
    }
}

impl AsRef<dyn SQLParam> for SQLParamContainer {
    fn as_ref(&self) -> &(dyn SQLParam + 'static) {
        self.0.as_ref()
    }
}

impl Debug for SQLParamContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self.0.as_ref(), f)
    }
}
