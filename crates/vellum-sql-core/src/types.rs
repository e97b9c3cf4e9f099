//! Logical value types and their dialect-specific definitions.
//!
//! A [`TypeDefinition`] records how one logical type is encoded by the target
//! dialect: the column type keyword, how inline literals are rendered, and
//! whether literal values are rendered inline or bound as parameters. The
//! immutable [`TypeDefinitionRegistry`] maps logical types to definitions and
//! is consulted by the interpreter for every literal and CAST target.

use std::collections::HashMap;
use std::fmt;

use crate::value::SqlValue;

/// A logical value type, independent of any dialect encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    /// Boolean values.
    Boolean,
    /// 64-bit signed integers.
    Integer,
    /// 64-bit floats.
    Float,
    /// Character strings.
    Text,
    /// Binary blobs.
    Blob,
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Blob => "blob",
        };
        f.write_str(name)
    }
}

/// How inline literals of a type are rendered into SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralFormat {
    /// Rendered as-is (`42`, `2.5`, `TRUE`).
    Bare,
    /// Booleans rendered as `1` / `0` (dialects without a boolean type).
    NumericBool,
    /// Single-quoted with doubled-quote escaping (`'O''Brien'`).
    SingleQuoted,
    /// Hex blob syntax (`X'48454C4C4F'`).
    HexBlob,
}

/// Whether literal values of a type render inline or bind as parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingMode {
    /// The value is rendered directly into the SQL text.
    Inline,
    /// A placeholder is emitted and the value joins the ordered parameter
    /// list.
    Parameter,
}

/// The dialect-specific encoding of one logical type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    column_type: String,
    literal_format: LiteralFormat,
    binding: BindingMode,
}

impl TypeDefinition {
    /// Creates a new type definition.
    #[must_use]
    pub fn new(
        column_type: impl Into<String>,
        literal_format: LiteralFormat,
        binding: BindingMode,
    ) -> Self {
        Self {
            column_type: column_type.into(),
            literal_format,
            binding,
        }
    }

    /// The dialect column type keyword (e.g. `INTEGER`).
    #[must_use]
    pub fn column_type(&self) -> &str {
        &self.column_type
    }

    /// How inline literals of this type are rendered.
    #[must_use]
    pub const fn literal_format(&self) -> LiteralFormat {
        self.literal_format
    }

    /// Whether literals of this type render inline or bind as parameters.
    #[must_use]
    pub const fn binding(&self) -> BindingMode {
        self.binding
    }

    /// Renders a value as inline SQL literal text per this definition's
    /// literal format. NULL always renders as `NULL`.
    #[must_use]
    pub fn render_literal(&self, value: &SqlValue) -> String {
        if matches!(value, SqlValue::Null) {
            return String::from("NULL");
        }
        match self.literal_format {
            LiteralFormat::Bare => bare(value),
            LiteralFormat::NumericBool => match value {
                SqlValue::Bool(b) => String::from(if *b { "1" } else { "0" }),
                other => bare(other),
            },
            LiteralFormat::SingleQuoted => {
                let raw = match value {
                    SqlValue::Text(s) => s.clone(),
                    other => bare(other),
                };
                format!("'{}'", raw.replace('\'', "''"))
            }
            LiteralFormat::HexBlob => match value {
                SqlValue::Blob(bytes) => {
                    let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
                    format!("X'{hex}'")
                }
                other => bare(other),
            },
        }
    }
}

fn bare(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => String::from("NULL"),
        SqlValue::Bool(b) => String::from(if *b { "TRUE" } else { "FALSE" }),
        SqlValue::Int(n) => format!("{n}"),
        SqlValue::Float(f) => format!("{f}"),
        SqlValue::Text(s) => s.clone(),
        SqlValue::Blob(bytes) => bytes.iter().map(|b| format!("{b:02X}")).collect(),
    }
}

/// Immutable mapping from logical types to dialect type definitions.
///
/// Built once via [`TypeDefinitionRegistry::builder`] and then frozen; shared
/// read-only between the database and any number of concurrent
/// interpretation calls. Lookup is lazy: an unregistered type only fails when
/// interpretation actually encounters it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeDefinitionRegistry {
    definitions: HashMap<LogicalType, TypeDefinition>,
}

impl TypeDefinitionRegistry {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> TypeDefinitionRegistryBuilder {
        TypeDefinitionRegistryBuilder::default()
    }

    /// The SQLite vendor defaults installed by the database factory.
    ///
    /// Numerics and booleans render inline; text and blobs bind as
    /// parameters. Column types follow SQLite's affinity keywords.
    #[must_use]
    pub fn sqlite_defaults() -> Self {
        Self::builder()
            .register(
                LogicalType::Boolean,
                TypeDefinition::new("INTEGER", LiteralFormat::NumericBool, BindingMode::Inline),
            )
            .register(
                LogicalType::Integer,
                TypeDefinition::new("INTEGER", LiteralFormat::Bare, BindingMode::Inline),
            )
            .register(
                LogicalType::Float,
                TypeDefinition::new("REAL", LiteralFormat::Bare, BindingMode::Inline),
            )
            .register(
                LogicalType::Text,
                TypeDefinition::new("TEXT", LiteralFormat::SingleQuoted, BindingMode::Parameter),
            )
            .register(
                LogicalType::Blob,
                TypeDefinition::new("BLOB", LiteralFormat::HexBlob, BindingMode::Parameter),
            )
            .build()
    }

    /// Looks up the definition for a logical type.
    #[must_use]
    pub fn get(&self, ty: LogicalType) -> Option<&TypeDefinition> {
        self.definitions.get(&ty)
    }

    /// Returns whether a definition is registered for a logical type.
    #[must_use]
    pub fn contains(&self, ty: LogicalType) -> bool {
        self.definitions.contains_key(&ty)
    }

    /// Returns the number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Accumulates type definitions before freezing them into a registry.
///
/// The last registration for a given logical type wins.
#[derive(Debug, Clone, Default)]
pub struct TypeDefinitionRegistryBuilder {
    definitions: HashMap<LogicalType, TypeDefinition>,
}

impl TypeDefinitionRegistryBuilder {
    /// Registers a definition for a logical type, replacing any earlier
    /// registration for the same type.
    #[must_use]
    pub fn register(mut self, ty: LogicalType, definition: TypeDefinition) -> Self {
        self.definitions.insert(ty, definition);
        self
    }

    /// Freezes the accumulated definitions into an immutable registry.
    #[must_use]
    pub fn build(self) -> TypeDefinitionRegistry {
        TypeDefinitionRegistry {
            definitions: self.definitions,
        }
    }
}
