// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Mongo-style modifiers, describing the changes an update applies to each matched row.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::database_error::DatabaseError;

use super::value::Value;

/// One kind of field operation along with the fields it applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum ModifierOperation {
    /// `$set`: assign a value to each field
    Set(IndexMap<String, Value>),
    /// `$unset`: clear each field to `NULL`
    Unset(Vec<String>),
    /// `$inc`: add a delta to each field (`None` means 1)
    Increment(IndexMap<String, Option<Value>>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Modifier {
    pub operations: Vec<ModifierOperation>,
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        match self.operations.iter_mut().find_map(|operation| match operation {
            ModifierOperation::Set(fields) => Some(fields),
            _ => None,
        }) {
            Some(fields) => {
                fields.insert(field.into(), value);
            }
            None => self
                .operations
                .push(ModifierOperation::Set(IndexMap::from([(field.into(), value)]))),
        }
        self
    }

    pub fn unset(mut self, field: impl Into<String>) -> Self {
        match self.operations.iter_mut().find_map(|operation| match operation {
            ModifierOperation::Unset(fields) => Some(fields),
            _ => None,
        }) {
            Some(fields) => fields.push(field.into()),
            None => self
                .operations
                .push(ModifierOperation::Unset(vec![field.into()])),
        }
        self
    }

    /// Increment a field by 1.
    pub fn increment(self, field: impl Into<String>) -> Self {
        self.push_increment(field.into(), None)
    }

    pub fn increment_by(self, field: impl Into<String>, delta: Value) -> Self {
        self.push_increment(field.into(), Some(delta))
    }

    fn push_increment(mut self, field: String, delta: Option<Value>) -> Self {
        match self.operations.iter_mut().find_map(|operation| match operation {
            ModifierOperation::Increment(fields) => Some(fields),
            _ => None,
        }) {
            Some(fields) => {
                fields.insert(field, delta);
            }
            None => self
                .operations
                .push(ModifierOperation::Increment(IndexMap::from([(field, delta)]))),
        }
        self
    }

    /// Parse a modifier document such as `{ "$set": { "title": "x" }, "$inc": { "viewCount": 1 } }`.
    ///
    /// Every top-level key is checked before anything else is parsed, so an unknown operation
    /// kind is always reported as [`DatabaseError::UnsupportedOperation`].
    pub fn from_json(value: &JsonValue) -> Result<Self, DatabaseError> {
        let JsonValue::Object(map) = value else {
            return Err(DatabaseError::Validation(format!(
                "Expected the modifier to be an object, found {value}"
            )));
        };

        if let Some(unsupported) = map
            .keys()
            .find(|key| !matches!(key.as_str(), "$set" | "$unset" | "$inc"))
        {
            return Err(DatabaseError::UnsupportedOperation(unsupported.clone()));
        }

        let operations = map
            .iter()
            .map(|(operation, fields)| {
                let fields = match fields {
                    JsonValue::Object(fields) => fields,
                    other => {
                        return Err(DatabaseError::Validation(format!(
                            "'{operation}' expects an object, found {other}"
                        )));
                    }
                };

                match operation.as_str() {
                    "$set" => Ok(ModifierOperation::Set(
                        fields
                            .iter()
                            .map(|(field, value)| (field.clone(), Value::from_json(value)))
                            .collect(),
                    )),
                    "$unset" => Ok(ModifierOperation::Unset(fields.keys().cloned().collect())),
                    _ => fields
                        .iter()
                        .map(|(field, delta)| match delta {
                            JsonValue::Null => Ok((field.clone(), None)),
                            JsonValue::Number(_) => {
                                Ok((field.clone(), Some(Value::from_json(delta))))
                            }
                            other => Err(DatabaseError::Validation(format!(
                                "'$inc' expects a numeric delta for '{field}', found {other}"
                            ))),
                        })
                        .collect::<Result<_, _>>()
                        .map(ModifierOperation::Increment),
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { operations })
    }
}
