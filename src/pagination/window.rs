//! Query windowing
//!
//! Turns a decision into a validated `(limit, offset)` pair.

use super::types::{PaginationDecision, Window};
use crate::error::{Error, Result};

/// Cap the page size at the configured maximum
pub fn clamp(decision: PaginationDecision) -> PaginationDecision {
    match decision.maximum_items_per_page {
        Some(maximum) if decision.items_per_page > maximum => PaginationDecision {
            items_per_page: maximum,
            ..decision
        },
        _ => decision,
    }
}

/// Validate a decision and compute its window
pub fn window(decision: &PaginationDecision) -> Result<Window> {
    let PaginationDecision {
        page,
        items_per_page,
        ..
    } = *decision;

    if items_per_page < 0 {
        return Err(Error::invalid_parameter(
            "items per page must not be negative",
        ));
    }
    if page < 1 {
        return Err(Error::invalid_parameter("page must be at least 1"));
    }
    if items_per_page == 0 && page > 1 {
        return Err(Error::invalid_parameter(
            "page must be 1 when items per page is 0",
        ));
    }

    let offset = (page - 1)
        .checked_mul(items_per_page)
        .ok_or_else(|| Error::invalid_parameter("page is out of range"))?;

    Ok(Window {
        limit: items_per_page as u64,
        offset: offset as u64,
    })
}
