//! Error types for tree interpretation.

use crate::types::LogicalType;

/// Errors that can occur while interpreting a statement tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterpretError {
    /// The tree uses a construct disabled by the active interpreter options.
    #[error("'{construct}' requires a dialect extension disabled by the active options")]
    DialectCapability {
        /// The offending construct.
        construct: &'static str,
    },

    /// A literal or CAST target has no registered type definition.
    #[error("no type definition registered for logical type '{0}'")]
    UnsupportedType(LogicalType),

    /// No type definition registry was bound to the options and no ambient
    /// registry was supplied.
    #[error("no type definition registry available for interpretation")]
    MissingTypeRegistry,
}

/// Result type for interpretation.
pub type Result<T> = std::result::Result<T, InterpretError>;
