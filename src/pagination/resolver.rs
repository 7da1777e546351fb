//! Pagination policy resolution
//!
//! Folds the process defaults, the resource layer and the operation layer,
//! then lets client parameters win for the fields the folded policy marks as
//! client-overridable. Resolution never fails: a client value that cannot be
//! coerced is ignored and the folded value stays in place.

use super::types::{PaginationDecision, RequestParameters};
use crate::config::{EffectivePolicy, PaginationConfig, ResourceOverrides};
use crate::types::JsonValue;

/// Resolve the pagination decision for one request
pub fn resolve(
    config: &PaginationConfig,
    overrides: &ResourceOverrides,
    params: &RequestParameters,
) -> PaginationDecision {
    let policy = EffectivePolicy::fold(config, overrides);

    let enabled = client_bool(
        policy.client_enabled,
        params.enabled.as_ref(),
        policy.enabled,
        &config.enabled_parameter_name,
    );
    let partial = client_bool(
        policy.client_partial,
        params.partial.as_ref(),
        policy.partial,
        &config.partial_parameter_name,
    );

    let default_items_per_page = policy.items_per_page_or_default();
    let items_per_page = if policy.client_items_per_page {
        client_int(
            params.items_per_page.as_ref(),
            default_items_per_page,
            &config.items_per_page_parameter_name,
        )
    } else {
        default_items_per_page
    };

    let page = client_int(params.page.as_ref(), 1, &config.page_parameter_name);

    let decision = PaginationDecision {
        enabled,
        partial,
        page,
        items_per_page,
        maximum_items_per_page: policy.maximum_items_per_page,
    };

    tracing::trace!(?decision, "Resolved pagination decision");
    decision
}

/// Whether the request is paginated at all (full or partial)
pub fn is_enabled(
    config: &PaginationConfig,
    overrides: &ResourceOverrides,
    params: &RequestParameters,
) -> bool {
    resolve(config, overrides, params).is_paginated()
}

fn client_bool(
    overridable: bool,
    raw: Option<&JsonValue>,
    fallback: bool,
    parameter: &str,
) -> bool {
    if !overridable {
        return fallback;
    }
    match raw {
        None => fallback,
        Some(value) => parse_bool(value).unwrap_or_else(|| {
            tracing::debug!(parameter, %value, "Ignoring non-boolean pagination parameter");
            fallback
        }),
    }
}

fn client_int(raw: Option<&JsonValue>, fallback: i64, parameter: &str) -> i64 {
    match raw {
        None => fallback,
        Some(value) => parse_int(value).unwrap_or_else(|| {
            tracing::debug!(parameter, %value, "Ignoring non-integer pagination parameter");
            fallback
        }),
    }
}

// ============================================================================
// Coercion
// ============================================================================

/// Parse a boolean-like client value
///
/// Returns `None` for values that are neither truthy nor falsy.
pub fn parse_bool(value: &JsonValue) -> Option<bool> {
    match value {
        JsonValue::Null => Some(false),
        JsonValue::Bool(b) => Some(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Some(true),
            "0" | "false" | "off" | "no" | "" => Some(false),
            _ => None,
        },
        JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

/// Coerce an optional client value to a boolean; absent is false
pub fn coerce_bool(value: Option<&JsonValue>) -> bool {
    value.and_then(parse_bool).unwrap_or(false)
}

/// Parse an integer client value (JSON integer or decimal string)
pub fn parse_int(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
