// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Compile Mongo-style selectors and modifiers into parameterized Postgres statements.
//!
//! A caller describes *which rows* with a [`Selector`] (a conjunction of field conditions such as
//! `{ "status": "open", "score": { "$gte": 3 } }`, or a bare primary key), and *what changes*
//! with a [`Modifier`] (`$set`, `$unset`, `$inc`). [`compile_update`] turns these, along with
//! [`UpdateOptions`], into a single [`Statement`]:
//!
//! ```sql
//! UPDATE "Posts" SET "title" = $1, "viewCount" = "viewCount" + $2 WHERE "status" = $3 RETURNING *
//! ```
//!
//! Every caller-supplied value, including limits and JSON path keys, is bound as a parameter; the
//! SQL text only ever contains keywords and quoted identifiers. A limited update first picks and
//! locks its candidate rows with `SELECT "_id" ... LIMIT $n FOR UPDATE` and then updates those
//! rows by primary key. Deletes and selects share the same selector machinery.
//!
//! Internally, the abstract input (`asql`) is transformed (`transform`) into typed SQL
//! operations (`sql`), each of which renders itself through an `ExpressionBuilder`. Compilation
//! is pure; [`DatabaseExecutor`] is an optional helper to run a statement through
//! `tokio-postgres`.
#[macro_use]
mod sql;
mod asql;
mod compile;
mod database_executor;
mod transform;

pub mod database_error;

/// Public types at the root level of this crate
pub use asql::{
    delete::AbstractDelete,
    field_path::FieldPath,
    modifier::{Modifier, ModifierOperation},
    options::{DeleteOptions, SelectOptions, UpdateOptions},
    select::AbstractSelect,
    selector::{Condition, Selector, SelectorClause},
    update::AbstractUpdate,
    value::Value,
};

pub use compile::{
    compile_delete, compile_delete_json, compile_select, compile_select_json, compile_update,
    compile_update_json,
};

pub use database_executor::DatabaseExecutor;

pub use sql::{
    SQLParam, SQLParamContainer,
    physical_table::{ID_COLUMN, PhysicalTable},
    predicate::ParamEquality,
    statement::Statement,
};
