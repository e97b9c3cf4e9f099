//! Tests for INSERT, UPDATE, and DELETE interpretation.

mod common;
use common::*;

use vellum_sql_core::ast::{
    ConflictAction, DeleteStatement, Expr, InsertSource, InsertStatement, OnConflict, OrderBy,
    SelectColumn, Statement, TableRef, UpdateAssignment, UpdateStatement,
};
use vellum_sql_core::value::SqlValue;

fn insert_users(columns: &[&str], rows: Vec<Vec<Expr>>) -> InsertStatement {
    InsertStatement {
        columns: columns.iter().map(|c| String::from(*c)).collect(),
        source: InsertSource::Values(rows),
        ..InsertStatement::new("users")
    }
}

// ===================================================================
// INSERT
// ===================================================================

#[test]
fn insert_single_row() {
    let statement = Statement::Insert(insert_users(
        &["name", "age"],
        vec![vec![Expr::text("Alice"), Expr::integer(30)]],
    ));
    let compiled = compile(&statement);

    assert_eq!(compiled.sql, "INSERT INTO users (name, age) VALUES (?, 30)");
    assert_eq!(compiled.params, vec![SqlValue::Text(String::from("Alice"))]);
}

#[test]
fn insert_multiple_rows() {
    let statement = Statement::Insert(insert_users(
        &["name"],
        vec![vec![Expr::text("Alice")], vec![Expr::text("Bob")]],
    ));
    let compiled = compile(&statement);

    assert_eq!(compiled.sql, "INSERT INTO users (name) VALUES (?), (?)");
    assert_eq!(compiled.params.len(), 2);
}

#[test]
fn insert_default_values() {
    let statement = Statement::Insert(InsertStatement::new("audit_log"));
    assert_eq!(sql(&statement), "INSERT INTO audit_log DEFAULT VALUES");
}

#[test]
fn insert_from_query() {
    let statement = Statement::Insert(InsertStatement {
        columns: vec![String::from("name")],
        source: InsertSource::Query(Box::new(select("candidates", &["name"]))),
        ..InsertStatement::new("users")
    });
    assert_eq!(
        sql(&statement),
        "INSERT INTO users (name) SELECT name FROM candidates"
    );
}

#[test]
fn insert_schema_qualified() {
    let statement = Statement::Insert(InsertStatement {
        schema: Some(String::from("staging")),
        ..insert_users(&["name"], vec![vec![Expr::text("Alice")]])
    });
    assert_eq!(
        compile(&statement).sql,
        "INSERT INTO staging.users (name) VALUES (?)"
    );
}

#[test]
fn insert_on_conflict_do_nothing() {
    let statement = Statement::Insert(InsertStatement {
        on_conflict: Some(OnConflict {
            columns: vec![String::from("id")],
            action: ConflictAction::DoNothing,
        }),
        ..insert_users(&["id", "name"], vec![vec![
            Expr::integer(1),
            Expr::text("Alice"),
        ]])
    });
    assert_eq!(
        compile(&statement).sql,
        "INSERT INTO users (id, name) VALUES (1, ?) ON CONFLICT (id) DO NOTHING"
    );
}

#[test]
fn insert_on_conflict_do_update() {
    let statement = Statement::Insert(InsertStatement {
        on_conflict: Some(OnConflict {
            columns: vec![String::from("id")],
            action: ConflictAction::DoUpdate(vec![UpdateAssignment::new(
                "name",
                Expr::text("Alice"),
            )]),
        }),
        ..insert_users(&["id", "name"], vec![vec![
            Expr::integer(1),
            Expr::text("Alice"),
        ]])
    });
    let compiled = compile(&statement);

    assert_eq!(
        compiled.sql,
        "INSERT INTO users (id, name) VALUES (1, ?) \
         ON CONFLICT (id) DO UPDATE SET name = ?"
    );
    assert_eq!(compiled.params.len(), 2);
}

#[test]
fn insert_returning() {
    let statement = Statement::Insert(InsertStatement {
        returning: vec![SelectColumn::new(Expr::column("id"))],
        ..insert_users(&["name"], vec![vec![Expr::text("Alice")]])
    });
    assert_eq!(
        compile(&statement).sql,
        "INSERT INTO users (name) VALUES (?) RETURNING id"
    );
}

// ===================================================================
// UPDATE
// ===================================================================

#[test]
fn update_single_set() {
    let statement = Statement::Update(UpdateStatement {
        assignments: vec![UpdateAssignment::new("name", Expr::text("Bob"))],
        where_clause: Some(Expr::column("id").eq(Expr::integer(1))),
        ..UpdateStatement::new("users")
    });
    let compiled = compile(&statement);

    assert_eq!(compiled.sql, "UPDATE users SET name = ? WHERE id = 1");
    assert_eq!(compiled.params, vec![SqlValue::Text(String::from("Bob"))]);
}

#[test]
fn update_multiple_set_parameter_order() {
    let statement = Statement::Update(UpdateStatement {
        assignments: vec![
            UpdateAssignment::new("name", Expr::text("Bob")),
            UpdateAssignment::new("email", Expr::text("bob@x.com")),
        ],
        where_clause: Some(Expr::column("id").eq(Expr::integer(1))),
        ..UpdateStatement::new("users")
    });
    let compiled = compile(&statement);

    assert_eq!(
        compiled.sql,
        "UPDATE users SET name = ?, email = ? WHERE id = 1"
    );
    assert_eq!(
        compiled.params,
        vec![
            SqlValue::Text(String::from("Bob")),
            SqlValue::Text(String::from("bob@x.com")),
        ]
    );
}

#[test]
fn update_schema_qualified_with_alias() {
    let statement = Statement::Update(UpdateStatement {
        schema: Some(String::from("staging")),
        alias: Some(String::from("u")),
        assignments: vec![UpdateAssignment::new("active", Expr::boolean(false))],
        ..UpdateStatement::new("users")
    });
    assert_eq!(
        sql(&statement),
        "UPDATE staging.users AS u SET active = 0"
    );
}

#[test]
fn update_with_from_clause() {
    let statement = Statement::Update(UpdateStatement {
        assignments: vec![UpdateAssignment::new(
            "total",
            Expr::qualified_column("p", "price"),
        )],
        from: Some(TableRef::table("products").alias("p")),
        where_clause: Some(
            Expr::qualified_column("orders", "product_id").eq(Expr::qualified_column("p", "id")),
        ),
        ..UpdateStatement::new("orders")
    });
    assert_eq!(
        sql(&statement),
        "UPDATE orders SET total = p.price FROM products AS p \
         WHERE orders.product_id = p.id"
    );
}

#[test]
fn update_with_order_by_and_limit() {
    let statement = Statement::Update(UpdateStatement {
        assignments: vec![UpdateAssignment::new("retries", Expr::integer(0))],
        order_by: vec![OrderBy::asc(Expr::column("created_at"))],
        limit: Some(Expr::integer(100)),
        ..UpdateStatement::new("jobs")
    });
    assert_eq!(
        sql(&statement),
        "UPDATE jobs SET retries = 0 ORDER BY created_at ASC LIMIT 100"
    );
}

#[test]
fn update_returning() {
    let statement = Statement::Update(UpdateStatement {
        assignments: vec![UpdateAssignment::new("active", Expr::boolean(true))],
        returning: vec![SelectColumn::new(Expr::column("id"))],
        ..UpdateStatement::new("users")
    });
    assert_eq!(sql(&statement), "UPDATE users SET active = 1 RETURNING id");
}

// ===================================================================
// DELETE
// ===================================================================

#[test]
fn delete_with_where() {
    let statement = Statement::Delete(DeleteStatement {
        where_clause: Some(Expr::column("id").eq(Expr::integer(1))),
        ..DeleteStatement::new("users")
    });
    assert_eq!(sql(&statement), "DELETE FROM users WHERE id = 1");
}

#[test]
fn delete_without_where() {
    let statement = Statement::Delete(DeleteStatement::new("users"));
    assert_eq!(sql(&statement), "DELETE FROM users");
}

#[test]
fn delete_with_order_by_and_limit() {
    let statement = Statement::Delete(DeleteStatement {
        order_by: vec![OrderBy::asc(Expr::column("created_at"))],
        limit: Some(Expr::integer(10)),
        ..DeleteStatement::new("sessions")
    });
    assert_eq!(
        sql(&statement),
        "DELETE FROM sessions ORDER BY created_at ASC LIMIT 10"
    );
}

#[test]
fn delete_schema_qualified_with_alias() {
    let statement = Statement::Delete(DeleteStatement {
        schema: Some(String::from("staging")),
        alias: Some(String::from("u")),
        where_clause: Some(Expr::qualified_column("u", "expired").eq(Expr::boolean(true))),
        ..DeleteStatement::new("users")
    });
    assert_eq!(
        sql(&statement),
        "DELETE FROM staging.users AS u WHERE u.expired = 1"
    );
}

#[test]
fn blob_literal_binds_parameter() {
    let statement = Statement::Insert(insert_users(
        &["avatar"],
        vec![vec![Expr::blob(vec![0xDE, 0xAD])]],
    ));
    let compiled = compile(&statement);

    assert_eq!(compiled.sql, "INSERT INTO users (avatar) VALUES (?)");
    assert_eq!(compiled.params, vec![SqlValue::Blob(vec![0xDE, 0xAD])]);
}
