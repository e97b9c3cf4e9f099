//! Version history descriptors.
//!
//! A [`VersionHistory`] is the ordered, declarative description of the
//! schema/object set a database is created with. The factory folds it into
//! the initial [`SchemaCollection`](crate::schema::SchemaCollection);
//! executing the migrations themselves is a separate concern handled outside
//! this crate.

use serde::{Deserialize, Serialize};

/// One version in a database's history, declaring the schemas it introduces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    number: i64,
    #[serde(default)]
    schemas: Vec<String>,
}

impl Version {
    /// Creates a version with no declared schemas.
    #[must_use]
    pub const fn new(number: i64) -> Self {
        Self {
            number,
            schemas: Vec::new(),
        }
    }

    /// Declares a schema introduced by this version.
    #[must_use]
    pub fn schema(mut self, name: impl Into<String>) -> Self {
        self.schemas.push(name.into());
        self
    }

    /// The version number.
    #[must_use]
    pub const fn number(&self) -> i64 {
        self.number
    }

    /// The schemas this version declares.
    #[must_use]
    pub fn schemas(&self) -> &[String] {
        &self.schemas
    }
}

/// Ordered sequence of versions describing a database's declared shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionHistory {
    versions: Vec<Version>,
}

impl VersionHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            versions: Vec::new(),
        }
    }

    /// Appends a version.
    #[must_use]
    pub fn version(mut self, version: Version) -> Self {
        self.versions.push(version);
        self
    }

    /// The versions in declaration order.
    #[must_use]
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// All declared schema names in first-occurrence order, deduplicated.
    #[must_use]
    pub fn declared_schemas(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for version in &self.versions {
            for name in version.schemas() {
                if !names.iter().any(|seen| seen == name) {
                    names.push(name.clone());
                }
            }
        }
        names
    }
}
