//! # Barflow Auth
//!
//! Access-token claims and JWT utilities for the Barflow API.
//!
//! - [`claims`]: The access token claim structure
//! - [`jwt`]: Token creation and verification
//!
//! Tokens are minted by the external user profile service. They carry the
//! employee's role key and, when an administrator customized that employee,
//! the per-user permission override.
//!
//! # Example
//!
//! ```ignore
//! use barflow_auth::{create_access_token, verify_token};
//! use barflow_config::JwtConfig;
//! use barflow_models::EmployeeRole;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "ana@bar.test", EmployeeRole::Waiter, None, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, "waiter");
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
