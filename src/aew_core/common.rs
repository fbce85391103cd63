//! Common utilities module
//!
//! Shared error type and result alias used across the control core.

pub mod error;

pub use error::{AewError, Result};
