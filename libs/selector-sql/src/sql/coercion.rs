// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Encoding of bound parameters against the type Postgres infers for their placeholder.
//!
//! Statements are prepared without parameter types, so Postgres picks each placeholder's type
//! from its context: in `"count" = "count" + $1` on an `int4` column, `$1` is an `int4`; in
//! `"score" = ANY($1)` on a `float8` column, `$1` is a `float8[]`. Literals from selector and
//! modifier documents arrive as `i64`/`f64` (and arrays of them), so they are converted to the
//! inferred numeric type here. Arrays that don't match the inferred array type natively are
//! encoded element by element, which also lets an empty array bind to any array type.

use bytes::{BufMut, BytesMut};
use serde_json::Value as JsonValue;
use tokio_postgres::types::{IsNull, Kind, ToSql, Type};

use super::{SQLParam, SQLParamContainer};

type BoxError = Box<dyn std::error::Error + Sync + Send>;

const NUMERIC_POSITIVE: u16 = 0x0000;
const NUMERIC_NEGATIVE: u16 = 0x4000;

pub(super) fn to_sql_coerced(
    param: &dyn SQLParam,
    ty: &Type,
    out: &mut BytesMut,
) -> Result<IsNull, BoxError> {
    let any = param.as_any();

    if let Some(value) = any.downcast_ref::<i64>() {
        return int_to_sql(*value, ty, out);
    }
    if let Some(value) = any.downcast_ref::<f64>() {
        return float_to_sql(*value, ty, out);
    }

    if let Kind::Array(_) = ty.kind() {
        if let Some(values) = any.downcast_ref::<Vec<i64>>() {
            return array_to_sql(values, ty, out);
        }
        if let Some(values) = any.downcast_ref::<Vec<f64>>() {
            return array_to_sql(values, ty, out);
        }
        if let Some(values) = any.downcast_ref::<Vec<String>>() {
            return array_to_sql(values, ty, out);
        }
        if let Some(values) = any.downcast_ref::<Vec<bool>>() {
            return array_to_sql(values, ty, out);
        }
        if let Some(values) = any.downcast_ref::<Vec<JsonValue>>() {
            if <Vec<JsonValue> as ToSql>::accepts(ty) {
                return values.to_sql(ty, out);
            }
            return values
                .iter()
                .map(json_element)
                .collect::<Vec<_>>()
                .to_sql(ty, out);
        }
    }

    param.to_sql_checked(ty, out)
}

fn int_to_sql(value: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 => i16::try_from(value)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(value)?.to_sql(ty, out),
        Type::FLOAT4 => (value as f32).to_sql(ty, out),
        Type::FLOAT8 => (value as f64).to_sql(ty, out),
        Type::NUMERIC => numeric_to_sql(&value.to_string(), out),
        _ => value.to_sql_checked(ty, out),
    }
}

fn float_to_sql(value: f64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::FLOAT4 => (value as f32).to_sql(ty, out),
        Type::INT2 | Type::INT4 | Type::INT8 => {
            if value.fract() != 0.0 || value < i64::MIN as f64 || value >= i64::MAX as f64 {
                return Err(format!("{value} cannot be bound to a {ty} parameter").into());
            }
            int_to_sql(value as i64, ty, out)
        }
        Type::NUMERIC => {
            if !value.is_finite() {
                return Err(format!("{value} cannot be bound to a numeric parameter").into());
            }
            numeric_to_sql(&value.to_string(), out)
        }
        _ => value.to_sql_checked(ty, out),
    }
}

/// Arrays the element type accepts natively are encoded as is; otherwise each element is encoded
/// through [`SQLParamContainer`] against the array's member type.
fn array_to_sql<T>(values: &[T], ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError>
where
    T: SQLParam + Clone + 'static,
{
    if <&[T] as ToSql>::accepts(ty) {
        return ToSql::to_sql(&values, ty, out);
    }

    values
        .iter()
        .cloned()
        .map(SQLParamContainer::new)
        .collect::<Vec<_>>()
        .to_sql(ty, out)
}

fn json_element(value: &JsonValue) -> Option<SQLParamContainer> {
    match value {
        JsonValue::Null => None,
        JsonValue::Bool(b) => Some(SQLParamContainer::new(*b)),
        JsonValue::Number(n) => Some(match n.as_i64() {
            Some(i) => SQLParamContainer::new(i),
            None => SQLParamContainer::new(n.as_f64().unwrap_or(f64::NAN)),
        }),
        JsonValue::String(s) => Some(SQLParamContainer::new(s.clone())),
        JsonValue::Array(_) | JsonValue::Object(_) => Some(SQLParamContainer::new(value.clone())),
    }
}

/// Write a plain decimal (`-?[0-9]+(\.[0-9]+)?`, as produced by `Display` for `i64` and `f64`)
/// in the binary `numeric` format: digit count, weight, sign, and display scale, followed by
/// base-10000 digits.
fn numeric_to_sql(decimal: &str, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    let (negative, unsigned) = match decimal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, decimal),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let integer_padding = (4 - integer.len() % 4) % 4;
    let fraction_padding = (4 - fraction.len() % 4) % 4;
    let padded = "0".repeat(integer_padding) + integer + fraction + &"0".repeat(fraction_padding);

    let mut digits = padded
        .as_bytes()
        .chunks(4)
        .map(|chunk| {
            chunk
                .iter()
                .fold(0i16, |acc, digit| acc * 10 + i16::from(digit - b'0'))
        })
        .collect::<Vec<_>>();
    let mut weight = ((integer_padding + integer.len()) / 4) as i16 - 1;

    let leading_zeros = digits.iter().take_while(|digit| **digit == 0).count();
    digits.drain(..leading_zeros);
    weight -= leading_zeros as i16;
    while digits.last() == Some(&0) {
        digits.pop();
    }
    if digits.is_empty() {
        weight = 0;
    }

    let sign = if negative && !digits.is_empty() {
        NUMERIC_NEGATIVE
    } else {
        NUMERIC_POSITIVE
    };

    out.put_i16(i16::try_from(digits.len())?);
    out.put_i16(weight);
    out.put_u16(sign);
    out.put_u16(u16::try_from(fraction.len())?);
    for digit in digits {
        out.put_i16(digit);
    }

    Ok(IsNull::No)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn encoded(param: SQLParamContainer, ty: &Type) -> BytesMut {
        let mut out = BytesMut::new();
        param.to_sql_checked(ty, &mut out).unwrap();
        out
    }

    fn native<T: ToSql>(value: T, ty: &Type) -> BytesMut {
        let mut out = BytesMut::new();
        value.to_sql_checked(ty, &mut out).unwrap();
        out
    }

    #[test]
    fn integers_follow_the_inferred_type() {
        assert_eq!(
            encoded(SQLParamContainer::new(3i64), &Type::INT4),
            native(3i32, &Type::INT4)
        );
        assert_eq!(
            encoded(SQLParamContainer::new(3i64), &Type::INT2),
            native(3i16, &Type::INT2)
        );
        assert_eq!(
            encoded(SQLParamContainer::new(3i64), &Type::INT8),
            native(3i64, &Type::INT8)
        );
        assert_eq!(
            encoded(SQLParamContainer::new(3i64), &Type::FLOAT8),
            native(3.0f64, &Type::FLOAT8)
        );
    }

    #[test]
    fn out_of_range_integer_is_rejected() {
        let mut out = BytesMut::new();
        assert!(
            SQLParamContainer::new(70_000i64)
                .to_sql_checked(&Type::INT2, &mut out)
                .is_err()
        );
    }

    #[test]
    fn floats_follow_the_inferred_type() {
        assert_eq!(
            encoded(SQLParamContainer::new(1.5f64), &Type::FLOAT4),
            native(1.5f32, &Type::FLOAT4)
        );
        assert_eq!(
            encoded(SQLParamContainer::new(2.0f64), &Type::INT4),
            native(2i32, &Type::INT4)
        );

        let mut out = BytesMut::new();
        assert!(
            SQLParamContainer::new(2.5f64)
                .to_sql_checked(&Type::INT4, &mut out)
                .is_err()
        );
    }

    #[test]
    fn numeric_encoding() {
        assert_eq!(
            encoded(SQLParamContainer::new(123456.789f64), &Type::NUMERIC).as_ref(),
            &[0, 3, 0, 1, 0, 0, 0, 3, 0, 12, 0x0D, 0x80, 0x1E, 0xD2]
        );
        assert_eq!(
            encoded(SQLParamContainer::new(-42i64), &Type::NUMERIC).as_ref(),
            &[0, 1, 0, 0, 0x40, 0, 0, 0, 0, 42]
        );
        assert_eq!(
            encoded(SQLParamContainer::new(0i64), &Type::NUMERIC).as_ref(),
            &[0, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            encoded(SQLParamContainer::new(0.5f64), &Type::NUMERIC).as_ref(),
            &[0, 1, 0xFF, 0xFF, 0, 0, 0, 1, 0x13, 0x88]
        );
    }

    #[test]
    fn arrays_are_encoded_per_element_when_needed() {
        assert_eq!(
            encoded(SQLParamContainer::new(vec![1i64, 2]), &Type::INT4_ARRAY),
            native(vec![1i32, 2], &Type::INT4_ARRAY)
        );
        assert_eq!(
            encoded(SQLParamContainer::new(vec![1i64, 2]), &Type::INT8_ARRAY),
            native(vec![1i64, 2], &Type::INT8_ARRAY)
        );
        assert_eq!(
            encoded(SQLParamContainer::new(vec![1.0f64, 2.5]), &Type::FLOAT4_ARRAY),
            native(vec![1.0f32, 2.5], &Type::FLOAT4_ARRAY)
        );
    }

    #[test]
    fn empty_array_binds_to_any_array_type() {
        assert_eq!(
            encoded(
                SQLParamContainer::new(Vec::<String>::new()),
                &Type::INT4_ARRAY
            ),
            native(Vec::<i32>::new(), &Type::INT4_ARRAY)
        );
    }

    #[test]
    fn json_arrays_against_scalar_arrays() {
        assert_eq!(
            encoded(
                SQLParamContainer::new(vec![json!(1), json!(null)]),
                &Type::INT4_ARRAY
            ),
            native(vec![Some(1i32), None], &Type::INT4_ARRAY)
        );
        assert_eq!(
            encoded(
                SQLParamContainer::new(vec![json!("a")]),
                &Type::JSONB_ARRAY
            ),
            native(vec![json!("a")], &Type::JSONB_ARRAY)
        );

        let mut out = BytesMut::new();
        assert!(
            SQLParamContainer::new(vec![json!(1), json!("a")])
                .to_sql_checked(&Type::INT4_ARRAY, &mut out)
                .is_err()
        );
    }

    #[test]
    fn other_types_must_match() {
        assert_eq!(
            encoded(SQLParamContainer::new("open".to_string()), &Type::TEXT),
            native("open", &Type::TEXT)
        );

        let mut out = BytesMut::new();
        assert!(
            SQLParamContainer::new("open".to_string())
                .to_sql_checked(&Type::INT4, &mut out)
                .is_err()
        );
    }
}
