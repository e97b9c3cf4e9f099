//! Interpreter configuration.

use std::sync::Arc;

use crate::error::{InterpretError, Result};
use crate::types::TypeDefinitionRegistry;

/// Immutable configuration for a tree interpretation call.
///
/// Every setter consumes the value and returns a sibling with exactly one
/// field changed, so a single default instance can serve as a template:
///
/// ```
/// use vellum_sql_core::interpret::InterpreterOptions;
///
/// let template = InterpreterOptions::default();
/// let strict = template.clone().strict(true);
/// assert!(!template.is_strict());
/// assert!(strict.is_strict());
/// ```
#[derive(Debug, Clone)]
pub struct InterpreterOptions {
    type_definitions: Option<Arc<TypeDefinitionRegistry>>,
    strict: bool,
    update_from: bool,
    update_or_delete_limit: bool,
}

impl Default for InterpreterOptions {
    /// No bound type registry, strict mode off, UPDATE…FROM and
    /// UPDATE/DELETE LIMIT enabled.
    fn default() -> Self {
        Self {
            type_definitions: None,
            strict: false,
            update_from: true,
            update_or_delete_limit: true,
        }
    }
}

impl InterpreterOptions {
    /// Binds a type-definition registry, overriding the ambient one.
    /// Passing `None` clears the override.
    #[must_use]
    pub fn type_definitions(mut self, registry: Option<Arc<TypeDefinitionRegistry>>) -> Self {
        self.type_definitions = registry;
        self
    }

    /// Enables or disables strict mode. When enabled, constructs relying on
    /// dialect extensions fail instead of being emitted in extension syntax.
    #[must_use]
    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Enables or disables the UPDATE…FROM extension.
    #[must_use]
    pub fn update_from(mut self, enabled: bool) -> Self {
        self.update_from = enabled;
        self
    }

    /// Enables or disables the UPDATE/DELETE row-limit extension.
    #[must_use]
    pub fn update_or_delete_limit(mut self, enabled: bool) -> Self {
        self.update_or_delete_limit = enabled;
        self
    }

    /// Returns whether a type-definition registry override is bound.
    #[must_use]
    pub const fn has_type_definitions(&self) -> bool {
        self.type_definitions.is_some()
    }

    /// Returns whether strict mode is enabled.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Returns whether the UPDATE…FROM extension is enabled.
    #[must_use]
    pub const fn is_update_from_enabled(&self) -> bool {
        self.update_from
    }

    /// Returns whether the UPDATE/DELETE row-limit extension is enabled.
    #[must_use]
    pub const fn is_update_or_delete_limit_enabled(&self) -> bool {
        self.update_or_delete_limit
    }

    /// Resolves the registry interpretation will read from: the bound
    /// override if present, else the ambient registry of the database the
    /// statement targets.
    pub fn effective_registry<'a>(
        &'a self,
        ambient: Option<&'a TypeDefinitionRegistry>,
    ) -> Result<&'a TypeDefinitionRegistry> {
        self.type_definitions
            .as_deref()
            .or(ambient)
            .ok_or(InterpretError::MissingTypeRegistry)
    }
}
