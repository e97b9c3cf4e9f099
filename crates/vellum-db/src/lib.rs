//! # vellum-db
//!
//! Database metadata and connection lifecycle for the vellum SQL toolkit.
//!
//! A [`Database`] is created by the [`DatabaseFactory`] from a connection
//! string and a [`VersionHistory`] describing the declared schema set. It
//! owns the [`SchemaCollection`], the ambient type-definition registry
//! consulted during statement interpretation, and the connection lifecycle:
//!
//! - ephemeral targets (`DataSource=:memory:`) keep their storage alive
//!   through a single lazily-opened connection, returned identically from
//!   every [`Database::connect`] call until [`Database::dispose`];
//! - persistent targets share one lazily-opened pool and hand out distinct
//!   connection handles.
//!
//! ```no_run
//! use vellum_db::{DatabaseFactory, VersionHistory};
//!
//! # async fn demo() -> vellum_db::Result<()> {
//! let database = DatabaseFactory::create("DataSource=:memory:", &VersionHistory::new())?;
//! let connection = database.connect().await?;
//! assert!(connection.same_as(&database.connect().await?));
//! database.dispose().await;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod error;
pub mod factory;
pub mod history;
pub mod schema;

pub use database::{Connection, Database, bind_statement};
pub use error::{DbError, Result};
pub use factory::{ConnectionSettings, DatabaseFactory, MEMORY_DATA_SOURCE};
pub use history::{Version, VersionHistory};
pub use schema::{DEFAULT_SCHEMA_NAME, Schema, SchemaCollection};
