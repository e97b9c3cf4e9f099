//! # vellum-sql-core
//!
//! A vendor-agnostic SQL construction toolkit: statements and expressions
//! are represented as a dialect-independent tree, and the node interpreter
//! compiles that tree into dialect-specific SQL text plus an ordered
//! parameter list.
//!
//! Interpretation is governed by two registries:
//!
//! - [`types::TypeDefinitionRegistry`] maps logical value types to the
//!   dialect's column types, literal rendering, and parameter binding rules.
//! - [`interpret::InterpreterOptions`] toggles dialect capabilities: strict
//!   mode (reject extension constructs), UPDATE…FROM, and UPDATE/DELETE row
//!   limits. Disabled capabilities fail interpretation before any SQL text
//!   escapes, so an unsupported statement never reaches a connection.
//!
//! ```
//! use vellum_sql_core::ast::{Expr, SelectColumn, SelectStatement, Statement, TableRef};
//! use vellum_sql_core::dialect::SqliteDialect;
//! use vellum_sql_core::interpret::{InterpreterOptions, interpret};
//! use vellum_sql_core::types::TypeDefinitionRegistry;
//!
//! let statement = Statement::Select(SelectStatement {
//!     columns: vec![SelectColumn::new(Expr::column("name"))],
//!     from: Some(TableRef::table("users")),
//!     where_clause: Some(Expr::column("id").eq(Expr::integer(7))),
//!     ..SelectStatement::new()
//! });
//!
//! let registry = TypeDefinitionRegistry::sqlite_defaults();
//! let compiled = interpret(
//!     &SqliteDialect::new(),
//!     &statement,
//!     &InterpreterOptions::default(),
//!     Some(&registry),
//! )
//! .unwrap();
//!
//! assert_eq!(compiled.sql, "SELECT name FROM users WHERE id = 7");
//! assert!(compiled.params.is_empty());
//! ```

pub mod ast;
pub mod dialect;
pub mod error;
pub mod interpret;
pub mod types;
pub mod value;

pub use ast::{Expr, Statement};
pub use error::InterpretError;
pub use interpret::{CompiledStatement, InterpreterOptions, NodeInterpreter, interpret};
pub use types::{LogicalType, TypeDefinition, TypeDefinitionRegistry};
pub use value::SqlValue;
