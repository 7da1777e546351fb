//! Pagination module
//!
//! Policy resolution and query windowing.
//!
//! # Overview
//!
//! A request's pagination settings come from four layers: process defaults,
//! resource overrides, operation overrides and client parameters. `resolve`
//! folds them into a `PaginationDecision`; `clamp` and `window` turn the
//! decision into the `LIMIT`/`OFFSET` pair applied to the base query.

mod resolver;
mod types;
mod window;

pub use resolver::{coerce_bool, is_enabled, parse_bool, parse_int, resolve};
pub use types::{PaginatedResult, PaginationDecision, RequestParameters, Window};
pub use window::{clamp, window};
