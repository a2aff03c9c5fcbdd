#![cfg(test)]

//! Test assertion to check SQL statements and parameters.

/// Assert that the given parameters match the expected ones.
///
/// # Usage:
/// ```no_run
/// assert_params!(actual_params, expected_param1, expected_param2, ...);`
/// ```
///
/// Parameters are compared by type as well as value, so `5i64` does not match a bound `5i32`
/// and `"open"` does not match a bound `String`.
macro_rules! assert_params {
    ($actual_params:expr) => {
        assert!($actual_params.is_empty(), "Extra actual parameters");
    };
    ($actual_params:expr, $($expected_param:expr),+) => {{
        let actual_params = &$actual_params;
        let mut actual_iter = actual_params.iter();
        $(
            let actual = actual_iter.next().expect("Too few actual parameters");
            let expected = $expected_param;
            assert!(
                $crate::sql::SQLParam::eq(actual.as_ref(), &expected),
                "Parameter mismatch: actual {:?}, expected {:?}",
                actual,
                expected
            );
        )+
        assert!(actual_iter.next().is_none(), "Extra actual parameters");
    }};
}

macro_rules! assert_binding {
    ($actual:expr, $expected_stmt:expr) => {{
        let (actual_stmt, actual_params) = $actual;
        assert_eq!(actual_stmt, $expected_stmt);
        assert_params!(actual_params);
    }};
    ($actual:expr, $expected_stmt:expr, $($rest:expr),+) => {{
        let (actual_stmt, actual_params) = $actual;
        assert_eq!(actual_stmt, $expected_stmt);
        assert_params!(actual_params, $($rest),+);
    }};
}
