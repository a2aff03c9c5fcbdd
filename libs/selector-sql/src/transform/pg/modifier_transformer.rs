// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexMap;

use crate::{
    asql::{
        modifier::{Modifier, ModifierOperation},
        value::Value,
    },
    database_error::DatabaseError,
    sql::column::Column,
    transform::transformer::ModifierTransformer,
};

use super::Postgres;

impl ModifierTransformer for Postgres {
    /// Operations apply in a fixed order: all `$set`s, then all `$unset`s, then all `$inc`s. When
    /// a field appears under more than one operation, the later one wins, and the field keeps the
    /// position where it first appeared.
    fn to_column_values(
        &self,
        modifier: &Modifier,
    ) -> Result<Vec<(String, Column)>, DatabaseError> {
        let mut sets = vec![];
        let mut unsets = vec![];
        let mut increments = vec![];

        for operation in &modifier.operations {
            match operation {
                ModifierOperation::Set(fields) => sets.push(fields),
                ModifierOperation::Unset(fields) => unsets.push(fields),
                ModifierOperation::Increment(fields) => increments.push(fields),
            }
        }

        let mut column_values: IndexMap<String, Column> = IndexMap::new();

        for (field, value) in sets.into_iter().flatten() {
            column_values.insert(column_name(field)?, value.clone().into());
        }

        for field in unsets.into_iter().flatten() {
            column_values.insert(column_name(field)?, Column::Null);
        }

        for (field, delta) in increments.into_iter().flatten() {
            let column = column_name(field)?;
            let delta = delta.clone().unwrap_or_else(|| Value::param(1i64));
            let sum = Column::Add(
                Box::new(Column::physical(&column)),
                Box::new(delta.into()),
            );
            column_values.insert(column, sum);
        }

        if column_values.is_empty() {
            return Err(DatabaseError::Validation(
                "An update must modify at least one field".into(),
            ));
        }

        Ok(column_values.into_iter().collect())
    }
}

/// Modifiers address whole columns; nested (dotted) fields cannot be assigned.
fn column_name(field: &str) -> Result<String, DatabaseError> {
    if field.is_empty() || field.contains('.') {
        Err(DatabaseError::Validation(format!(
            "Cannot modify field '{field}': only top-level columns can be modified"
        )))
    } else {
        Ok(field.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn column_values(modifier: serde_json::Value) -> Result<Vec<(String, Column)>, DatabaseError> {
        Postgres {}.to_column_values(&Modifier::from_json(&modifier).unwrap())
    }

    #[test]
    fn set_values_are_params() {
        assert_eq!(
            column_values(json!({"$set": {"title": "a", "score": 2}})).unwrap(),
            vec![
                ("title".to_string(), Column::param("a".to_string())),
                ("score".to_string(), Column::param(2i64)),
            ]
        );
    }

    #[test]
    fn unset_is_null_not_the_given_value() {
        assert_eq!(
            column_values(json!({"$unset": {"x": 1}})).unwrap(),
            vec![("x".to_string(), Column::Null)]
        );
    }

    #[test]
    fn increment_adds_delta() {
        assert_eq!(
            column_values(json!({"$inc": {"count": 3, "views": null}})).unwrap(),
            vec![
                (
                    "count".to_string(),
                    Column::Add(
                        Box::new(Column::physical("count")),
                        Box::new(Column::param(3i64))
                    )
                ),
                (
                    "views".to_string(),
                    Column::Add(
                        Box::new(Column::physical("views")),
                        Box::new(Column::param(1i64))
                    )
                ),
            ]
        );
    }

    #[test]
    fn later_operation_kinds_win_regardless_of_input_order() {
        let values = column_values(json!({
            "$inc": {"a": 1},
            "$unset": {"a": 1, "b": 1},
            "$set": {"a": "x", "b": "y", "c": "z"},
        }))
        .unwrap();

        assert_eq!(
            values,
            vec![
                (
                    "a".to_string(),
                    Column::Add(Box::new(Column::physical("a")), Box::new(Column::param(1i64)))
                ),
                ("b".to_string(), Column::Null),
                ("c".to_string(), Column::param("z".to_string())),
            ]
        );
    }

    #[test]
    fn empty_modifier_is_rejected() {
        assert!(matches!(
            column_values(json!({})),
            Err(DatabaseError::Validation(_))
        ));
        assert!(matches!(
            column_values(json!({"$set": {}})),
            Err(DatabaseError::Validation(_))
        ));
    }

    #[test]
    fn nested_fields_are_rejected() {
        assert!(matches!(
            column_values(json!({"$set": {"meta.votes": 1}})),
            Err(DatabaseError::Validation(_))
        ));
    }
}
