// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::Value as JsonValue;

use crate::{SQLParam, SQLParamContainer, sql::column::Column};

/// A literal supplied by the caller. Anything other than `NULL` is bound as a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Param(SQLParamContainer),
}

impl Value {
    pub fn param<T: SQLParam + 'static>(value: T) -> Self {
        Value::Param(SQLParamContainer::new(value))
    }

    /// Map a JSON literal onto the closest native parameter type: strings bind as `text`,
    /// integers as `i64`, other numbers as `f64`, booleans as `bool`, and arrays and objects as
    /// `jsonb`. Numbers are converted to whichever numeric type Postgres infers for the
    /// placeholder when the statement runs.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::param(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::param(i),
                None => Value::param(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => Value::param(s.clone()),
            JsonValue::Array(_) | JsonValue::Object(_) => Value::param(value.clone()),
        }
    }

    /// Map a JSON literal for comparison against a value nested inside a `jsonb` column. The
    /// column side is `jsonb`, so the literal is always bound as `jsonb` as well.
    pub fn from_json_nested(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            _ => Value::param(value.clone()),
        }
    }
}

impl From<SQLParamContainer> for Value {
    fn from(param: SQLParamContainer) -> Self {
        Value::Param(param)
    }
}

impl From<Value> for Column {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Column::Null,
            Value::Param(param) => Column::Param(param),
        }
    }
}

/// Bind a JSON array for `= ANY(..)`/`<> ALL(..)` comparisons. Homogeneous arrays of strings,
/// integers, numbers, or booleans bind as the corresponding Postgres array type; anything else
/// (and every array compared against a nested path) binds as `jsonb[]`. When the inferred array
/// type differs (`int4[]` for an `int4` column, or any type for an empty array), elements are
/// encoded one by one against it.
pub fn array_param_from_json(items: &[JsonValue], nested: bool) -> SQLParamContainer {
    if !nested {
        if let Some(strings) = items
            .iter()
            .map(|item| item.as_str().map(str::to_owned))
            .collect::<Option<Vec<_>>>()
        {
            return SQLParamContainer::new(strings);
        }
        if let Some(ints) = items
            .iter()
            .map(JsonValue::as_i64)
            .collect::<Option<Vec<_>>>()
        {
            return SQLParamContainer::new(ints);
        }
        if let Some(floats) = items
            .iter()
            .map(JsonValue::as_f64)
            .collect::<Option<Vec<_>>>()
        {
            return SQLParamContainer::new(floats);
        }
        if let Some(bools) = items
            .iter()
            .map(JsonValue::as_bool)
            .collect::<Option<Vec<_>>>()
        {
            return SQLParamContainer::new(bools);
        }
    }

    SQLParamContainer::new(items.to_vec())
}
