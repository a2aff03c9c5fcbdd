// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Deserialize;

use crate::database_error::DatabaseError;

/// Options for an update. Deserializes from `{ "limit": 5, "returnUpdated": true }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateOptions {
    /// Update at most this many rows (chosen and locked by a `FOR UPDATE` subquery)
    pub limit: Option<i64>,
    /// Return the updated rows (`RETURNING *`)
    pub return_updated: bool,
    /// Never honored on this path; an upsert must be expressed as an insert with a conflict
    /// strategy. Present so that callers passing it get an error instead of a silent update.
    pub upsert: bool,
}

/// Options for a delete. Deserializes from `{ "limit": 5, "returnDeleted": true }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteOptions {
    pub limit: Option<i64>,
    pub return_deleted: bool,
}

/// Options for a select. Deserializes from `{ "limit": 5, "projection": ["_id"], "forUpdate": true }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectOptions {
    pub limit: Option<i64>,
    /// Columns to return; empty means all columns
    pub projection: Vec<String>,
    pub for_update: bool,
}

/// Reject an upsert on the update path before anything else is looked at.
pub(crate) fn ensure_no_upsert(options: &UpdateOptions) -> Result<(), DatabaseError> {
    if options.upsert {
        Err(DatabaseError::ConflictingOptions(
            "To create an upserting update use an insert with an 'upsert' conflict strategy"
                .into(),
        ))
    } else {
        Ok(())
    }
}

pub(crate) fn validate_limit(limit: Option<i64>) -> Result<(), DatabaseError> {
    match limit {
        Some(limit) if limit < 0 => Err(DatabaseError::Validation(format!(
            "Limit must not be negative, found {limit}"
        ))),
        _ => Ok(()),
    }
}
