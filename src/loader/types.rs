//! Loader types
//!
//! Declarative settings for YAML parsing: process-wide pagination defaults
//! plus a catalog of per-resource and per-operation overrides.

use crate::config::{PaginationConfig, PaginationOverrides, ResourceOverrides};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Settings
// ============================================================================

/// Top-level settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    /// Process-wide defaults
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Resource catalog keyed by resource name
    #[serde(default)]
    pub resources: HashMap<String, ResourceDefinition>,
}

impl Settings {
    /// Override layers for a resource operation
    ///
    /// Unknown resources or operations simply contribute empty layers.
    pub fn overrides_for(&self, resource: &str, operation: &str) -> ResourceOverrides {
        let Some(definition) = self.resources.get(resource) else {
            return ResourceOverrides::none();
        };

        ResourceOverrides::new(
            definition.pagination.clone(),
            definition
                .operations
                .get(operation)
                .cloned()
                .unwrap_or_default(),
        )
    }
}

// ============================================================================
// Resource Definition
// ============================================================================

/// Pagination overrides for one resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ResourceDefinition {
    /// Resource-level overrides
    #[serde(default)]
    pub pagination: PaginationOverrides,
    /// Operation-level overrides keyed by operation name
    #[serde(default)]
    pub operations: HashMap<String, PaginationOverrides>,
}
