//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! correlation and request logging.

pub mod trace;

pub use trace::Trace;
