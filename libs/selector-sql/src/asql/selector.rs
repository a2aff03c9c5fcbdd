// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Mongo-style row selectors.
//!
//! A selector such as
//!
//! ```json
//! { "status": "open", "meta.votes": { "$gte": 10 }, "$or": [{ "pinned": true }, { "score": { "$gt": 5 } }] }
//! ```
//!
//! is a conjunction of clauses. Each clause either constrains a field (plain column or dotted
//! path into a JSON column) or combines nested selectors with `$and`/`$or`. A selector given as a
//! bare string is shorthand for `{ "_id": <string> }`.

use serde_json::{Map, Value as JsonValue};

use crate::{
    SQLParamContainer, database_error::DatabaseError, sql::physical_table::ID_COLUMN,
};

use super::{
    field_path::FieldPath,
    value::{Value, array_param_from_json},
};

/// A condition on a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    /// Membership in an array parameter (`$in`)
    In(SQLParamContainer),
    /// Non-membership in an array parameter (`$nin`)
    Nin(SQLParamContainer),
    /// Presence (`true`) or absence (`false`) of a non-null value
    Exists(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorClause {
    Field(FieldPath, Condition),
    And(Vec<Selector>),
    Or(Vec<Selector>),
}

/// A conjunction of clauses. An empty selector matches every row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selector {
    pub clauses: Vec<SelectorClause>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a single row by its primary key.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self::new().with(FieldPath::column(ID_COLUMN), Condition::Eq(Value::param(id.into())))
    }

    pub fn with(mut self, field: FieldPath, condition: Condition) -> Self {
        self.clauses.push(SelectorClause::Field(field, condition));
        self
    }

    /// Add an equality clause on a (possibly dotted) field (`{ field: value }`).
    pub fn with_eq(self, field: &str, value: Value) -> Result<Self, DatabaseError> {
        Ok(self.with(FieldPath::parse(field)?, Condition::Eq(value)))
    }

    pub fn and(mut self, selectors: Vec<Selector>) -> Self {
        self.clauses.push(SelectorClause::And(selectors));
        self
    }

    pub fn or(mut self, selectors: Vec<Selector>) -> Self {
        self.clauses.push(SelectorClause::Or(selectors));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Parse a selector document. Accepts a string (primary-key shorthand), `null` (match all),
    /// or an object.
    pub fn from_json(value: &JsonValue) -> Result<Self, DatabaseError> {
        match value {
            JsonValue::String(id) => Ok(Self::by_id(id.clone())),
            JsonValue::Null => Ok(Self::new()),
            JsonValue::Object(map) => Self::from_json_object(map),
            other => Err(DatabaseError::InvalidSelector(format!(
                "Expected a string or an object, found {other}"
            ))),
        }
    }

    fn from_json_object(map: &Map<String, JsonValue>) -> Result<Self, DatabaseError> {
        let mut selector = Self::new();

        for (key, value) in map {
            match key.as_str() {
                "$and" => {
                    let selectors = Self::from_json_array(key, value)?;
                    selector = selector.and(selectors);
                }
                "$or" => {
                    let selectors = Self::from_json_array(key, value)?;
                    selector = selector.or(selectors);
                }
                operator if operator.starts_with('$') => {
                    return Err(DatabaseError::InvalidSelector(format!(
                        "Unknown selector operator '{operator}'"
                    )));
                }
                field => {
                    let field = FieldPath::parse(field)?;
                    for condition in Condition::from_json(&field, value)? {
                        selector = selector.with(field.clone(), condition);
                    }
                }
            }
        }

        Ok(selector)
    }

    fn from_json_array(operator: &str, value: &JsonValue) -> Result<Vec<Self>, DatabaseError> {
        match value {
            JsonValue::Array(items) => items
                .iter()
                .map(|item| match item {
                    JsonValue::Object(map) => Self::from_json_object(map),
                    other => Err(DatabaseError::InvalidSelector(format!(
                        "'{operator}' expects an array of objects, found {other}"
                    ))),
                })
                .collect(),
            other => Err(DatabaseError::InvalidSelector(format!(
                "'{operator}' expects an array, found {other}"
            ))),
        }
    }
}

impl From<&str> for Selector {
    fn from(id: &str) -> Self {
        Self::by_id(id)
    }
}

impl From<String> for Selector {
    fn from(id: String) -> Self {
        Self::by_id(id)
    }
}

impl Condition {
    /// Parse the value side of `{ field: <value> }`. An object whose keys all start with `$` is
    /// an operator object and may yield several conditions (`{ "$gt": 1, "$lt": 5 }`); anything
    /// else is an equality.
    fn from_json(field: &FieldPath, value: &JsonValue) -> Result<Vec<Self>, DatabaseError> {
        let to_value = |value: &JsonValue| {
            if field.is_nested() {
                Value::from_json_nested(value)
            } else {
                Value::from_json(value)
            }
        };

        let operators = match value {
            JsonValue::Object(map) if map.keys().any(|key| key.starts_with('$')) => map,
            JsonValue::Object(map) if map.is_empty() => {
                return Err(DatabaseError::InvalidSelector(format!(
                    "Empty condition for field '{}'",
                    field.column
                )));
            }
            _ => return Ok(vec![Condition::Eq(to_value(value))]),
        };

        operators
            .iter()
            .map(|(operator, operand)| match operator.as_str() {
                "$eq" => Ok(Condition::Eq(to_value(operand))),
                "$ne" => Ok(Condition::Ne(to_value(operand))),
                "$gt" => Ok(Condition::Gt(to_value(operand))),
                "$gte" => Ok(Condition::Gte(to_value(operand))),
                "$lt" => Ok(Condition::Lt(to_value(operand))),
                "$lte" => Ok(Condition::Lte(to_value(operand))),
                "$in" | "$nin" => {
                    let JsonValue::Array(items) = operand else {
                        return Err(DatabaseError::InvalidSelector(format!(
                            "'{operator}' expects an array, found {operand}"
                        )));
                    };
                    let param = array_param_from_json(items, field.is_nested());
                    Ok(if operator == "$in" {
                        Condition::In(param)
                    } else {
                        Condition::Nin(param)
                    })
                }
                "$exists" => match operand {
                    JsonValue::Bool(exists) => Ok(Condition::Exists(*exists)),
                    other => Err(DatabaseError::InvalidSelector(format!(
                        "'$exists' expects a boolean, found {other}"
                    ))),
                },
                other => Err(DatabaseError::InvalidSelector(format!(
                    "Unknown condition operator '{other}'"
                ))),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn string_is_id_shorthand() {
        let selector = Selector::from_json(&json!("abc123")).unwrap();
        assert_eq!(selector, Selector::by_id("abc123"));
        assert_eq!(
            selector,
            Selector::from_json(&json!({"_id": "abc123"})).unwrap()
        );
        assert_eq!(Selector::from("abc123"), selector);
    }

    #[test]
    fn null_and_empty_match_everything() {
        assert!(Selector::from_json(&json!(null)).unwrap().is_empty());
        assert!(Selector::from_json(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn operator_object_yields_one_condition_per_operator() {
        let selector = Selector::from_json(&json!({"score": {"$gt": 1, "$lte": 5}})).unwrap();

        assert_eq!(
            selector.clauses,
            vec![
                SelectorClause::Field(FieldPath::column("score"), Condition::Gt(Value::param(1i64))),
                SelectorClause::Field(
                    FieldPath::column("score"),
                    Condition::Lte(Value::param(5i64))
                ),
            ]
        );
    }

    #[test]
    fn plain_object_is_equality() {
        let selector = Selector::from_json(&json!({"meta": {"a": 1}})).unwrap();

        assert_eq!(
            selector.clauses,
            vec![SelectorClause::Field(
                FieldPath::column("meta"),
                Condition::Eq(Value::param(json!({"a": 1})))
            )]
        );
    }

    #[test]
    fn logical_operators() {
        let selector =
            Selector::from_json(&json!({"$or": [{"pinned": true}, {"score": 5}]})).unwrap();

        assert_eq!(
            selector.clauses,
            vec![SelectorClause::Or(vec![
                Selector::new().with(FieldPath::column("pinned"), Condition::Eq(Value::param(true))),
                Selector::new().with(FieldPath::column("score"), Condition::Eq(Value::param(5i64))),
            ])]
        );
    }

    #[test]
    fn malformed_selectors_are_rejected() {
        let cases = [
            json!(42),
            json!({"score": {"$near": 1}}),
            json!({"score": {}}),
            json!({"tags": {"$in": "a"}}),
            json!({"deletedAt": {"$exists": 1}}),
            json!({"$or": {"a": 1}}),
            json!({"$or": [1]}),
            json!({"$where": "1 = 1"}),
            json!({"a..b": 1}),
        ];

        for case in cases {
            assert!(
                matches!(
                    Selector::from_json(&case),
                    Err(DatabaseError::InvalidSelector(_))
                ),
                "{case} should be rejected"
            );
        }
    }
}
