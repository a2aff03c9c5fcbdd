// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use super::{
    ExpressionBuilder, SQLBuilder, column::Column, delete::Delete, limit::Limit,
    predicate::ConcretePredicate, select::Select, update::Update,
};

/// The primary-key column every table is expected to carry.
pub const ID_COLUMN: &str = "_id";

/// A physical table in the database such as "Posts" or "Comments".
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhysicalTable {
    /// The name of the table.
    pub name: String,
    /// The schema of the table (`None` means the search path decides, typically "public").
    #[serde(default)]
    pub schema: Option<String>,
}

/// The derived implementation of `Debug` is quite verbose, so we implement it manually
/// to print the table name only.
impl std::fmt::Debug for PhysicalTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Table: ")?;
        if let Some(schema) = &self.schema {
            f.write_str(schema)?;
            f.write_str(".")?;
        }
        f.write_str(&self.name)
    }
}

impl PhysicalTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
        }
    }

    pub fn with_schema(name: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: Some(schema.into()),
        }
    }

    pub fn id_column(&self) -> Column {
        Column::physical(ID_COLUMN)
    }

    pub fn select(
        &self,
        columns: Vec<Column>,
        predicate: ConcretePredicate,
        limit: Option<Limit>,
        for_update: bool,
    ) -> Select {
        Select {
            table: self.clone(),
            columns,
            predicate,
            limit,
            for_update,
        }
    }

    pub fn update(
        &self,
        column_values: Vec<(String, Column)>,
        predicate: ConcretePredicate,
        returning: Vec<Column>,
    ) -> Update {
        Update {
            table: self.clone(),
            column_values,
            predicate,
            returning,
        }
    }

    pub fn delete(&self, predicate: ConcretePredicate, returning: Vec<Column>) -> Delete {
        Delete {
            table: self.clone(),
            predicate,
            returning,
        }
    }
}

impl ExpressionBuilder for PhysicalTable {
    /// Build a table reference for the `<table>`.
    fn build(&self, builder: &mut SQLBuilder) {
        if let Some(schema) = &self.schema {
            builder.push_identifier(schema);
            builder.push('.');
        }
        builder.push_identifier(&self.name);
    }
}
