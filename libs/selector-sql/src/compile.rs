// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Entry points that turn a table, selector, modifier, and options into a [`Statement`].
//!
//! Each statement family has a typed entry point (`compile_update`, ...) and a `_json` variant
//! taking Mongo-style documents. Compilation is pure: nothing here touches the database.

use serde_json::Value as JsonValue;
use tracing::{debug, instrument};

use crate::{
    asql::{
        delete::AbstractDelete,
        modifier::Modifier,
        options::{DeleteOptions, SelectOptions, UpdateOptions, ensure_no_upsert},
        select::AbstractSelect,
        selector::Selector,
        update::AbstractUpdate,
    },
    database_error::DatabaseError,
    sql::{physical_table::PhysicalTable, sql_operation::SQLOperation, statement::Statement},
    transform::{
        pg::Postgres,
        transformer::{DeleteTransformer, SelectTransformer, UpdateTransformer},
    },
};

/// Compile an update of the rows matched by `selector`.
///
/// `selector` may be a [`Selector`] or a primary key (`&str`/`String`).
pub fn compile_update(
    table: &PhysicalTable,
    selector: impl Into<Selector>,
    modifier: Modifier,
    options: UpdateOptions,
) -> Result<Statement, DatabaseError> {
    AbstractUpdate {
        table: table.clone(),
        selector: selector.into(),
        modifier,
        options,
    }
    .compile()
}

/// Compile an update from a selector document (object, primary-key string, or `null`) and a
/// modifier document (`$set`, `$unset`, `$inc`).
///
/// An upsert request is rejected before either document is inspected.
pub fn compile_update_json(
    table: &PhysicalTable,
    selector: &JsonValue,
    modifier: &JsonValue,
    options: UpdateOptions,
) -> Result<Statement, DatabaseError> {
    ensure_no_upsert(&options)?;

    let modifier = Modifier::from_json(modifier)?;
    let selector = Selector::from_json(selector)?;

    compile_update(table, selector, modifier, options)
}

pub fn compile_delete(
    table: &PhysicalTable,
    selector: impl Into<Selector>,
    options: DeleteOptions,
) -> Result<Statement, DatabaseError> {
    AbstractDelete {
        table: table.clone(),
        selector: selector.into(),
        options,
    }
    .compile()
}

pub fn compile_delete_json(
    table: &PhysicalTable,
    selector: &JsonValue,
    options: DeleteOptions,
) -> Result<Statement, DatabaseError> {
    compile_delete(table, Selector::from_json(selector)?, options)
}

pub fn compile_select(
    table: &PhysicalTable,
    selector: impl Into<Selector>,
    options: SelectOptions,
) -> Result<Statement, DatabaseError> {
    AbstractSelect {
        table: table.clone(),
        selector: selector.into(),
        options,
    }
    .compile()
}

pub fn compile_select_json(
    table: &PhysicalTable,
    selector: &JsonValue,
    options: SelectOptions,
) -> Result<Statement, DatabaseError> {
    compile_select(table, Selector::from_json(selector)?, options)
}

impl AbstractUpdate {
    #[instrument(name = "AbstractUpdate::compile", level = "trace", skip_all)]
    pub fn compile(&self) -> Result<Statement, DatabaseError> {
        let update = Postgres {}.to_update(self)?;
        let statement = SQLOperation::Update(update).into_statement();
        debug!("Compiled update: {}", statement.sql);
        Ok(statement)
    }
}

impl AbstractDelete {
    #[instrument(name = "AbstractDelete::compile", level = "trace", skip_all)]
    pub fn compile(&self) -> Result<Statement, DatabaseError> {
        let delete = Postgres {}.to_delete(self)?;
        let statement = SQLOperation::Delete(delete).into_statement();
        debug!("Compiled delete: {}", statement.sql);
        Ok(statement)
    }
}

impl AbstractSelect {
    #[instrument(name = "AbstractSelect::compile", level = "trace", skip_all)]
    pub fn compile(&self) -> Result<Statement, DatabaseError> {
        let select = Postgres {}.to_select(self)?;
        let statement = SQLOperation::Select(select).into_statement();
        debug!("Compiled select: {}", statement.sql);
        Ok(statement)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::asql::value::Value;

    use super::*;

    fn posts() -> PhysicalTable {
        PhysicalTable::new("Posts")
    }

    fn set_x() -> Modifier {
        Modifier::new().set("x", Value::param(1i64))
    }

    #[test]
    fn update_by_id() {
        let statement =
            compile_update(&posts(), "abc123", set_x(), UpdateOptions::default()).unwrap();

        assert_binding!(
            (statement.sql, statement.params),
            r#"UPDATE "Posts" SET "x" = $1 WHERE "_id" = $2"#,
            1i64,
            "abc123".to_string()
        );
    }

    #[test]
    fn update_everything() {
        let statement =
            compile_update(&posts(), Selector::new(), set_x(), UpdateOptions::default()).unwrap();

        assert_binding!(
            (statement.sql, statement.params),
            r#"UPDATE "Posts" SET "x" = $1"#,
            1i64
        );
    }

    #[test]
    fn limited_update_without_selector() {
        let options = UpdateOptions {
            limit: Some(5),
            ..Default::default()
        };
        let statement = compile_update(&posts(), Selector::new(), set_x(), options).unwrap();

        assert_binding!(
            (statement.sql, statement.params),
            r#"UPDATE "Posts" SET "x" = $1 WHERE "_id" IN (SELECT "_id" FROM "Posts" LIMIT $2 FOR UPDATE)"#,
            1i64,
            5i64
        );
    }

    #[test]
    fn limited_update_with_selector_and_returning() {
        let options = UpdateOptions {
            limit: Some(5),
            return_updated: true,
            upsert: false,
        };
        let statement = compile_update_json(
            &posts(),
            &json!({"status": "open"}),
            &json!({"$set": {"x": 1}}),
            options,
        )
        .unwrap();

        assert_binding!(
            (statement.sql, statement.params),
            r#"UPDATE "Posts" SET "x" = $1 WHERE "_id" IN (SELECT "_id" FROM "Posts" WHERE "status" = $2 LIMIT $3 FOR UPDATE) RETURNING *"#,
            1i64,
            "open".to_string(),
            5i64
        );
    }

    #[test]
    fn upsert_is_rejected_before_documents_are_parsed() {
        let options = UpdateOptions {
            upsert: true,
            ..Default::default()
        };
        let result = compile_update_json(&posts(), &json!(42), &json!({"$push": {}}), options);

        assert!(matches!(result, Err(DatabaseError::ConflictingOptions(_))));
    }

    #[test]
    fn delete_with_limit() {
        let options = DeleteOptions {
            limit: Some(10),
            return_deleted: true,
        };
        let statement = compile_delete_json(&posts(), &json!({"draft": true}), options).unwrap();

        assert_binding!(
            (statement.sql, statement.params),
            r#"DELETE FROM "Posts" WHERE "_id" IN (SELECT "_id" FROM "Posts" WHERE "draft" = $1 LIMIT $2 FOR UPDATE) RETURNING *"#,
            true,
            10i64
        );
    }

    #[test]
    fn select_with_projection() {
        let options = SelectOptions {
            limit: Some(20),
            projection: vec!["_id".to_string(), "title".to_string()],
            for_update: false,
        };
        let statement =
            compile_select_json(&posts(), &json!({"score": {"$gte": 3}}), options).unwrap();

        assert_binding!(
            (statement.sql, statement.params),
            r#"SELECT "_id", "title" FROM "Posts" WHERE "score" >= $1 LIMIT $2"#,
            3i64,
            20i64
        );
    }

    #[test]
    fn negative_limit_is_rejected() {
        let options = UpdateOptions {
            limit: Some(-1),
            ..Default::default()
        };
        assert!(matches!(
            compile_update(&posts(), Selector::new(), set_x(), options),
            Err(DatabaseError::Validation(_))
        ));
    }
}
