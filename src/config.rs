//! Pagination configuration layers
//!
//! `PaginationConfig` holds the process-wide defaults and is built once at
//! startup. `PaginationOverrides` is a single override layer (resource or
//! operation level) where every field is optional and absent means "inherit".

use crate::types::SqlDialect;
use serde::{Deserialize, Serialize};

/// Page size used when no layer configures one
pub const DEFAULT_ITEMS_PER_PAGE: i64 = 30;

// ============================================================================
// Process-wide Defaults
// ============================================================================

/// Process-wide pagination defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PaginationConfig {
    /// Paginate collections unless told otherwise
    pub enabled: bool,

    /// Default page size
    pub items_per_page: Option<i64>,

    /// Upper bound for the page size
    pub maximum_items_per_page: Option<i64>,

    /// Client may toggle pagination with the enabled parameter
    pub client_enabled: bool,

    /// Client may choose the page size
    pub client_items_per_page: bool,

    /// Use partial pagination (no total count) by default
    pub partial: bool,

    /// Client may toggle partial pagination
    pub client_partial: bool,

    /// Query parameter carrying the page number
    pub page_parameter_name: String,

    /// Query parameter carrying the page size
    pub items_per_page_parameter_name: String,

    /// Query parameter toggling pagination
    pub enabled_parameter_name: String,

    /// Query parameter toggling partial pagination
    pub partial_parameter_name: String,

    /// Dialect used to parse base queries
    pub dialect: SqlDialect,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            items_per_page: Some(DEFAULT_ITEMS_PER_PAGE),
            maximum_items_per_page: None,
            client_enabled: false,
            client_items_per_page: false,
            partial: false,
            client_partial: false,
            page_parameter_name: "page".to_string(),
            items_per_page_parameter_name: "itemsPerPage".to_string(),
            enabled_parameter_name: "pagination".to_string(),
            partial_parameter_name: "partial".to_string(),
            dialect: SqlDialect::Generic,
        }
    }
}

impl PaginationConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default page size
    #[must_use]
    pub fn with_items_per_page(mut self, items_per_page: i64) -> Self {
        self.items_per_page = Some(items_per_page);
        self
    }

    /// Set the maximum page size
    #[must_use]
    pub fn with_maximum_items_per_page(mut self, maximum: i64) -> Self {
        self.maximum_items_per_page = Some(maximum);
        self
    }

    /// Let clients pick the page size
    #[must_use]
    pub fn with_client_items_per_page(mut self, allowed: bool) -> Self {
        self.client_items_per_page = allowed;
        self
    }

    /// Let clients toggle pagination
    #[must_use]
    pub fn with_client_enabled(mut self, allowed: bool) -> Self {
        self.client_enabled = allowed;
        self
    }

    /// Enable partial pagination by default
    #[must_use]
    pub fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Let clients toggle partial pagination
    #[must_use]
    pub fn with_client_partial(mut self, allowed: bool) -> Self {
        self.client_partial = allowed;
        self
    }

    /// Set the parse dialect
    #[must_use]
    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// The base layer every override folds onto
    pub fn policy(&self) -> EffectivePolicy {
        EffectivePolicy {
            enabled: self.enabled,
            items_per_page: self.items_per_page,
            maximum_items_per_page: self.maximum_items_per_page,
            client_enabled: self.client_enabled,
            client_items_per_page: self.client_items_per_page,
            partial: self.partial,
            client_partial: self.client_partial,
        }
    }
}

// ============================================================================
// Override Layers
// ============================================================================

/// One override layer; `None` inherits from the layer below
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PaginationOverrides {
    pub enabled: Option<bool>,
    pub items_per_page: Option<i64>,
    pub maximum_items_per_page: Option<i64>,
    pub client_enabled: Option<bool>,
    pub client_items_per_page: Option<bool>,
    pub partial: Option<bool>,
    pub client_partial: Option<bool>,
}

impl PaginationOverrides {
    /// Create an empty layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Override whether pagination is enabled
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Override the page size
    #[must_use]
    pub fn items_per_page(mut self, items_per_page: i64) -> Self {
        self.items_per_page = Some(items_per_page);
        self
    }

    /// Override the maximum page size
    #[must_use]
    pub fn maximum_items_per_page(mut self, maximum: i64) -> Self {
        self.maximum_items_per_page = Some(maximum);
        self
    }

    /// Override whether clients may toggle pagination
    #[must_use]
    pub fn client_enabled(mut self, allowed: bool) -> Self {
        self.client_enabled = Some(allowed);
        self
    }

    /// Override whether clients may pick the page size
    #[must_use]
    pub fn client_items_per_page(mut self, allowed: bool) -> Self {
        self.client_items_per_page = Some(allowed);
        self
    }

    /// Override partial pagination
    #[must_use]
    pub fn partial(mut self, partial: bool) -> Self {
        self.partial = Some(partial);
        self
    }

    /// Override whether clients may toggle partial pagination
    #[must_use]
    pub fn client_partial(mut self, allowed: bool) -> Self {
        self.client_partial = Some(allowed);
        self
    }

    /// Check if this layer overrides nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Resource-level and operation-level overrides for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceOverrides {
    /// Applies to every operation of the resource
    pub resource: PaginationOverrides,
    /// Applies to this operation only; wins over `resource`
    pub operation: PaginationOverrides,
}

impl ResourceOverrides {
    /// No overrides at all
    pub fn none() -> Self {
        Self::default()
    }

    /// Create overrides from both layers
    pub fn new(resource: PaginationOverrides, operation: PaginationOverrides) -> Self {
        Self {
            resource,
            operation,
        }
    }

    /// Layers in precedence order, lowest first
    pub fn layers(&self) -> [&PaginationOverrides; 2] {
        [&self.resource, &self.operation]
    }
}

// ============================================================================
// Folded Policy
// ============================================================================

/// Policy after folding every configuration layer, before client input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectivePolicy {
    pub enabled: bool,
    pub items_per_page: Option<i64>,
    pub maximum_items_per_page: Option<i64>,
    pub client_enabled: bool,
    pub client_items_per_page: bool,
    pub partial: bool,
    pub client_partial: bool,
}

impl EffectivePolicy {
    /// Apply one override layer on top of this policy
    #[must_use]
    pub fn apply(self, layer: &PaginationOverrides) -> Self {
        Self {
            enabled: layer.enabled.unwrap_or(self.enabled),
            items_per_page: layer.items_per_page.or(self.items_per_page),
            maximum_items_per_page: layer
                .maximum_items_per_page
                .or(self.maximum_items_per_page),
            client_enabled: layer.client_enabled.unwrap_or(self.client_enabled),
            client_items_per_page: layer
                .client_items_per_page
                .unwrap_or(self.client_items_per_page),
            partial: layer.partial.unwrap_or(self.partial),
            client_partial: layer.client_partial.unwrap_or(self.client_partial),
        }
    }

    /// Fold the process defaults with every override layer, left to right
    pub fn fold(config: &PaginationConfig, overrides: &ResourceOverrides) -> Self {
        overrides
            .layers()
            .into_iter()
            .fold(config.policy(), EffectivePolicy::apply)
    }

    /// Page size, falling back to the built-in default
    pub fn items_per_page_or_default(&self) -> i64 {
        self.items_per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE)
    }
}
