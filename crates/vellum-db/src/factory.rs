//! Database construction from connection strings and version histories.

use std::sync::Arc;

use tracing::info;
use vellum_sql_core::types::TypeDefinitionRegistry;

use crate::database::{Database, Target};
use crate::error::{DbError, Result};
use crate::history::VersionHistory;
use crate::schema::SchemaCollection;

/// The `DataSource` value selecting an ephemeral in-memory target.
pub const MEMORY_DATA_SOURCE: &str = ":memory:";

/// Parsed connection settings.
///
/// Connection strings are `Key=Value` pairs separated by `;`. The recognized
/// key is `DataSource` (case-insensitive, spaces in the key ignored);
/// unrecognized keys are passed over as transport concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    data_source: String,
}

impl ConnectionSettings {
    /// Parses a connection string.
    pub fn parse(connection_string: &str) -> Result<Self> {
        let mut data_source = None;
        for pair in connection_string.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let Some((key, value)) = pair.split_once('=') else {
                return Err(DbError::ConnectionString(format!(
                    "expected 'Key=Value', got '{pair}'"
                )));
            };
            let normalized: String = key
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_lowercase();
            if normalized == "datasource" {
                data_source = Some(String::from(value.trim()));
            }
        }
        let data_source = data_source.ok_or_else(|| {
            DbError::ConnectionString(String::from("missing 'DataSource' entry"))
        })?;
        if data_source.is_empty() {
            return Err(DbError::ConnectionString(String::from(
                "'DataSource' must not be empty",
            )));
        }
        Ok(Self { data_source })
    }

    /// The configured data source.
    #[must_use]
    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    /// Returns whether the target is an ephemeral in-memory instance.
    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        self.data_source == MEMORY_DATA_SOURCE
    }

    pub(crate) fn into_target(self) -> Target {
        if self.is_ephemeral() {
            Target::Memory
        } else {
            Target::File(self.data_source)
        }
    }
}

/// Builds ready-to-use [`Database`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatabaseFactory;

impl DatabaseFactory {
    /// Creates a database for the given connection string, seeding its
    /// schema collection from the version history.
    ///
    /// No connection is opened here; the first
    /// [`connect`](Database::connect) call opens lazily.
    pub fn create(connection_string: &str, history: &VersionHistory) -> Result<Database> {
        let settings = ConnectionSettings::parse(connection_string)?;
        let schemas = SchemaCollection::from_names(history.declared_schemas());
        let type_definitions = Arc::new(TypeDefinitionRegistry::sqlite_defaults());

        info!(
            data_source = %settings.data_source(),
            ephemeral = settings.is_ephemeral(),
            schemas = schemas.len(),
            "creating database"
        );
        Ok(Database::new(
            settings.into_target(),
            schemas,
            type_definitions,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Version;

    #[test]
    fn parses_memory_data_source() {
        let settings = ConnectionSettings::parse("DataSource=:memory:").unwrap();
        assert_eq!(settings.data_source(), ":memory:");
        assert!(settings.is_ephemeral());
    }

    #[test]
    fn parses_file_data_source_with_extra_keys() {
        let settings =
            ConnectionSettings::parse("Data Source = app.db; Cache=Shared; Timeout=5").unwrap();
        assert_eq!(settings.data_source(), "app.db");
        assert!(!settings.is_ephemeral());
    }

    #[test]
    fn key_match_is_case_insensitive() {
        let settings = ConnectionSettings::parse("datasource=:memory:").unwrap();
        assert!(settings.is_ephemeral());
    }

    #[test]
    fn last_data_source_entry_wins() {
        let settings =
            ConnectionSettings::parse("DataSource=a.db;DataSource=:memory:").unwrap();
        assert!(settings.is_ephemeral());
    }

    #[test]
    fn malformed_pair_is_rejected() {
        let err = ConnectionSettings::parse("DataSource=:memory:;garbage").unwrap_err();
        assert!(matches!(err, DbError::ConnectionString(_)));
    }

    #[test]
    fn missing_data_source_is_rejected() {
        let err = ConnectionSettings::parse("Cache=Shared").unwrap_err();
        assert!(matches!(err, DbError::ConnectionString(_)));

        let err = ConnectionSettings::parse("DataSource=  ").unwrap_err();
        assert!(matches!(err, DbError::ConnectionString(_)));
    }

    #[test]
    fn create_seeds_schemas_from_history() {
        let history = VersionHistory::new()
            .version(Version::new(1).schema("audit"))
            .version(Version::new(2).schema("archive"));
        let database = DatabaseFactory::create("DataSource=:memory:", &history).unwrap();

        let names: Vec<&str> = database.schemas().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["", "audit", "archive"]);
        assert!(database.is_ephemeral());
    }

    #[test]
    fn create_with_empty_history_has_only_default_schema() {
        let database =
            DatabaseFactory::create("DataSource=:memory:", &VersionHistory::new()).unwrap();
        assert_eq!(database.schemas().len(), 1);
        assert!(database.schemas().contains(""));
    }
}
