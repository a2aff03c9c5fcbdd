// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{SQLParamContainer, database_error::DatabaseError, sql::column::Column};

/// A (possibly dotted) reference to a field. `"status"` names a column; `"meta.votes.up"` names
/// the value at keys `votes` then `up` inside the `meta` JSON column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    pub column: String,
    pub path: Vec<String>,
}

impl FieldPath {
    pub fn column(name: impl Into<String>) -> Self {
        Self {
            column: name.into(),
            path: vec![],
        }
    }

    pub fn parse(field: &str) -> Result<Self, DatabaseError> {
        let mut segments = field.split('.');
        let column = segments.next().unwrap_or_default();
        let path: Vec<String> = segments.map(str::to_owned).collect();

        if column.is_empty() || path.iter().any(String::is_empty) {
            return Err(DatabaseError::InvalidSelector(format!(
                "Invalid field path '{field}'"
            )));
        }

        Ok(Self {
            column: column.to_owned(),
            path,
        })
    }

    pub fn is_nested(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn to_column(&self) -> Column {
        if self.is_nested() {
            Column::JsonPath {
                column: self.column.clone(),
                path: SQLParamContainer::new(self.path.clone()),
            }
        } else {
            Column::physical(&self.column)
        }
    }
}
