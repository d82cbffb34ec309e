//! HTTP middleware stack for the storefront API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP context on events)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (accept or mint `x-request-id`, echo it back)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
