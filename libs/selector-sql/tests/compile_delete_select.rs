// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use selector_sql::{
    DeleteOptions, PhysicalTable, SQLParamContainer, SelectOptions, compile_delete,
    compile_delete_json, compile_select_json,
};
use serde_json::json;
use test_log::test;

#[test]
fn delete_by_id() {
    let statement = compile_delete(
        &PhysicalTable::new("Comments"),
        "c1",
        DeleteOptions::default(),
    )
    .unwrap();

    assert_eq!(statement.sql, r#"DELETE FROM "Comments" WHERE "_id" = $1"#);
    assert_eq!(statement.params, vec![SQLParamContainer::new("c1".to_string())]);
}

#[test]
fn limited_delete_without_selector() {
    let options = DeleteOptions {
        limit: Some(100),
        return_deleted: false,
    };
    let statement =
        compile_delete_json(&PhysicalTable::new("Comments"), &json!(null), options).unwrap();

    assert_eq!(
        statement.sql,
        r#"DELETE FROM "Comments" WHERE "_id" IN (SELECT "_id" FROM "Comments" LIMIT $1 FOR UPDATE)"#
    );
}

#[test]
fn schema_qualified_locking_select() {
    let options = SelectOptions {
        limit: Some(1),
        projection: vec![],
        for_update: true,
    };
    let statement = compile_select_json(
        &PhysicalTable::with_schema("Posts", "forum"),
        &json!({"status": {"$in": ["open"]}, "score": {"$exists": true}}),
        options,
    )
    .unwrap();

    assert_eq!(
        statement.sql,
        r#"SELECT * FROM "forum"."Posts" WHERE ("status" = ANY($1) AND "score" IS NOT NULL) LIMIT $2 FOR UPDATE"#
    );
    assert_eq!(
        statement.params,
        vec![
            SQLParamContainer::new(vec!["open".to_string()]),
            SQLParamContainer::new(1i64),
        ]
    );
}

#[test]
fn options_from_json() {
    let options: SelectOptions =
        serde_json::from_value(json!({"projection": ["meta.votes"], "limit": 2})).unwrap();
    let statement =
        compile_select_json(&PhysicalTable::new("Posts"), &json!({}), options).unwrap();

    assert_eq!(statement.sql, r#"SELECT "meta" #> $1 FROM "Posts" LIMIT $2"#);
}
