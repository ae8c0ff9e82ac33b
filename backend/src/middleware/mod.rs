//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns:
//! trace identifiers and cross-origin access for the browser client.

pub mod cors;
pub mod trace;

pub use cors::CorsPolicy;
pub use trace::Trace;
