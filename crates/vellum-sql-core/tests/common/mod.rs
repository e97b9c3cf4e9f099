#![allow(dead_code)]

use vellum_sql_core::ast::{Expr, SelectColumn, SelectStatement, Statement, TableRef};
use vellum_sql_core::dialect::SqliteDialect;
use vellum_sql_core::error::InterpretError;
use vellum_sql_core::interpret::{CompiledStatement, InterpreterOptions, interpret};
use vellum_sql_core::types::TypeDefinitionRegistry;

pub fn compile(statement: &Statement) -> CompiledStatement {
    compile_with(statement, &InterpreterOptions::default())
        .unwrap_or_else(|e| panic!("Failed to interpret {statement:?}\nError: {e}"))
}

pub fn compile_with(
    statement: &Statement,
    options: &InterpreterOptions,
) -> Result<CompiledStatement, InterpretError> {
    let registry = TypeDefinitionRegistry::sqlite_defaults();
    interpret(&SqliteDialect::new(), statement, options, Some(&registry))
}

pub fn compile_err(statement: &Statement, options: &InterpreterOptions) -> InterpretError {
    compile_with(statement, options)
        .expect_err(&format!("Expected interpretation error for {statement:?}"))
}

pub fn sql(statement: &Statement) -> String {
    compile(statement).sql
}

/// A one-table SELECT over the given columns, the shape most tests start
/// from.
pub fn select(table: &str, columns: &[&str]) -> SelectStatement {
    SelectStatement {
        columns: columns
            .iter()
            .map(|name| SelectColumn::new(Expr::column(*name)))
            .collect(),
        from: Some(TableRef::table(table)),
        ..SelectStatement::new()
    }
}
