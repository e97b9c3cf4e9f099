//! Named schemas and the per-database schema collection.

use crate::error::{DbError, Result};

/// Name of the default schema every database carries.
pub const DEFAULT_SCHEMA_NAME: &str = "";

/// A named container of database objects.
///
/// The schema with the empty name is the default schema; exactly one exists
/// per database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
}

impl Schema {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The schema name; empty for the default schema.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether this is the default schema.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }
}

/// Insertion-ordered, name-keyed collection of a database's schemas.
///
/// Fixed at database construction; always contains the default schema as its
/// first entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCollection {
    schemas: Vec<Schema>,
}

impl SchemaCollection {
    /// Builds the collection from declared schema names, preserving first
    /// occurrence order and always seeding the default schema first.
    pub(crate) fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut schemas = vec![Schema::new(DEFAULT_SCHEMA_NAME)];
        for name in names {
            if !schemas.iter().any(|schema| schema.name() == name) {
                schemas.push(Schema::new(name));
            }
        }
        Self { schemas }
    }

    /// Returns whether a schema with exactly this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.iter().any(|schema| schema.name() == name)
    }

    /// Returns the schema with this name, failing if absent.
    pub fn get(&self, name: &str) -> Result<&Schema> {
        self.try_get(name)
            .ok_or_else(|| DbError::SchemaNotFound(String::from(name)))
    }

    /// Non-throwing lookup variant.
    #[must_use]
    pub fn try_get(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|schema| schema.name() == name)
    }

    /// The default schema; guaranteed to exist.
    #[must_use]
    pub fn default_schema(&self) -> &Schema {
        // Seeded first in from_names and never removed.
        &self.schemas[0]
    }

    /// Iterates schemas in insertion order, default schema first.
    pub fn iter(&self) -> std::slice::Iter<'_, Schema> {
        self.schemas.iter()
    }

    /// Number of schemas, including the default.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Always false: the default schema is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl<'a> IntoIterator for &'a SchemaCollection {
    type Item = &'a Schema;
    type IntoIter = std::slice::Iter<'a, Schema>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
