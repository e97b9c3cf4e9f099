//! Database instances and their connection lifecycle.
//!
//! An ephemeral (in-memory) target's storage exists only while a connection
//! is open, so the database owns exactly one lazily-opened connection and
//! hands the same instance to every caller. Persistent targets share one
//! lazily-opened pool but return distinct connection handles.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use vellum_sql_core::ast::Statement;
use vellum_sql_core::dialect::SqliteDialect;
use vellum_sql_core::interpret::{CompiledStatement, InterpreterOptions, interpret};
use vellum_sql_core::types::TypeDefinitionRegistry;
use vellum_sql_core::value::SqlValue;

use crate::error::{DbError, Result};
use crate::schema::SchemaCollection;

/// The connection strategy chosen at creation, frozen for the database's
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Target {
    /// Ephemeral in-memory instance.
    Memory,
    /// Persistent file-backed instance.
    File(String),
}

impl Target {
    const fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File(_) => "file",
        }
    }
}

/// A handle on an open connection (or pool) to the database.
///
/// Identity is the handle allocation: for ephemeral databases every
/// [`Database::connect`] call returns the same instance, observable via
/// [`Connection::same_as`].
#[derive(Debug, Clone)]
pub struct Connection {
    inner: Arc<ConnectionInner>,
}

#[derive(Debug)]
struct ConnectionInner {
    pool: SqlitePool,
}

impl Connection {
    fn new(pool: SqlitePool) -> Self {
        Self {
            inner: Arc::new(ConnectionInner { pool }),
        }
    }

    /// The underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Returns whether both handles refer to the same connection instance.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns whether the underlying connection has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.pool.is_closed()
    }
}

/// A database instance: schema metadata, the ambient type-definition
/// registry, and the connection lifecycle.
///
/// State machine: `Created → Connected(±) → Disposed`. Disposal is terminal;
/// metadata accessors stay valid afterwards but `connect` fails with
/// [`DbError::InvalidState`].
#[derive(Debug)]
pub struct Database {
    target: Target,
    schemas: SchemaCollection,
    type_definitions: Arc<TypeDefinitionRegistry>,
    slot: OnceCell<Connection>,
    disposed: AtomicBool,
}

impl Database {
    pub(crate) fn new(
        target: Target,
        schemas: SchemaCollection,
        type_definitions: Arc<TypeDefinitionRegistry>,
    ) -> Self {
        Self {
            target,
            schemas,
            type_definitions,
            slot: OnceCell::new(),
            disposed: AtomicBool::new(false),
        }
    }

    /// The database's schemas.
    #[must_use]
    pub fn schemas(&self) -> &SchemaCollection {
        &self.schemas
    }

    /// The ambient type-definition registry.
    #[must_use]
    pub fn type_definitions(&self) -> &TypeDefinitionRegistry {
        &self.type_definitions
    }

    /// Returns whether this database targets an ephemeral in-memory
    /// instance.
    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        self.target == Target::Memory
    }

    /// Returns whether the database has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// An options template with this database's registry bound, for callers
    /// that interpret trees themselves.
    #[must_use]
    pub fn interpreter_options(&self) -> InterpreterOptions {
        InterpreterOptions::default().type_definitions(Some(Arc::clone(&self.type_definitions)))
    }

    /// Interprets a statement tree against this database's ambient registry.
    pub fn compile(&self, statement: &Statement) -> Result<CompiledStatement> {
        self.compile_with(statement, &InterpreterOptions::default())
    }

    /// Interprets a statement tree with caller-supplied options. An options
    /// value without a bound registry falls back to this database's ambient
    /// one.
    pub fn compile_with(
        &self,
        statement: &Statement,
        options: &InterpreterOptions,
    ) -> Result<CompiledStatement> {
        let compiled = interpret(
            &SqliteDialect::new(),
            statement,
            options,
            Some(&self.type_definitions),
        )?;
        Ok(compiled)
    }

    /// Returns a connection, opening it lazily on first call.
    ///
    /// For an ephemeral target every call returns the same connection
    /// instance; the open/cache transition happens exactly once even under
    /// concurrent first calls. Persistent targets share one pool but get
    /// distinct handles. Fails with [`DbError::InvalidState`] once disposal
    /// has begun.
    pub async fn connect(&self) -> Result<Connection> {
        if self.is_disposed() {
            return Err(DbError::InvalidState("connect on a disposed database"));
        }

        let shared = self.slot.get_or_try_init(|| self.open()).await?;

        // Disposal may have raced the lazy open; never hand out a connection
        // that is already closing.
        if self.is_disposed() {
            shared.pool().close().await;
            return Err(DbError::InvalidState("database disposed during connect"));
        }

        match &self.target {
            Target::Memory => Ok(shared.clone()),
            Target::File(_) => Ok(Connection::new(shared.pool().clone())),
        }
    }

    async fn open(&self) -> Result<Connection> {
        match &self.target {
            Target::Memory => {
                debug!("opening ephemeral in-memory connection");
                // A single pooled connection that never retires: the
                // in-memory store exists only while it stays open.
                let pool = SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None::<Duration>)
                    .max_lifetime(None::<Duration>)
                    .connect(":memory:")
                    .await?;
                Ok(Connection::new(pool))
            }
            Target::File(path) => {
                debug!(path = %path, "opening connection pool");
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true);
                let pool = SqlitePoolOptions::new().connect_with(options).await?;
                Ok(Connection::new(pool))
            }
        }
    }

    /// Disposes the database, closing any opened connection.
    ///
    /// Idempotent. Afterwards `connect` fails with
    /// [`DbError::InvalidState`]; already-materialized metadata (schemas,
    /// type registry) stays readable.
    pub async fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(connection) = self.slot.get() {
            connection.pool().close().await;
        }
        info!(kind = self.target.name(), "database disposed");
    }
}

/// Binds a compiled statement's parameters, in order, onto an executable
/// query.
#[must_use]
pub fn bind_statement(compiled: &CompiledStatement) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    let mut query = sqlx::query(&compiled.sql);
    for param in &compiled.params {
        query = match param {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Bool(b) => query.bind(*b),
            SqlValue::Int(n) => query.bind(*n),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Text(s) => query.bind(s.as_str()),
            SqlValue::Blob(b) => query.bind(b.as_slice()),
        };
    }
    query
}
