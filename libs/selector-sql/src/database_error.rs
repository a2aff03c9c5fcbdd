// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    /// A modifier used an operation kind other than `$set`, `$unset`, or `$inc`.
    #[error("Unimplemented update operation: {0}")]
    UnsupportedOperation(String),

    /// An option that belongs to a different statement family (such as `upsert` on an update).
    #[error("Conflicting options: {0}")]
    ConflictingOptions(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Delegate: {0}")]
    Delegate(#[from] tokio_postgres::Error),

    #[error("{0} {1}")]
    WithContext(String, #[source] Box<DatabaseError>),
}

impl DatabaseError {
    pub fn with_context(self, context: String) -> DatabaseError {
        DatabaseError::WithContext(context, Box::new(self))
    }
}

pub trait WithContext {
    fn with_context(self, context: String) -> Self;
}

impl<T> WithContext for Result<T, DatabaseError> {
    fn with_context(self, context: String) -> Result<T, DatabaseError> {
        self.map_err(|e| e.with_context(context))
    }
}
