//! # Barflow Core
//!
//! Core error types for the Barflow API.
//!
//! - [`errors`]: HTTP-aware [`AppError`] and the typed [`PermissionError`]
//!
//! # Example
//!
//! ```ignore
//! use barflow_core::{AppError, PermissionError};
//!
//! let error = AppError::not_found(PermissionError::UnknownRole("dj".to_string()));
//! ```

pub mod errors;

// Re-export commonly used types at crate root
pub use errors::{AppError, PermissionError};
