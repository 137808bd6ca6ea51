//! Middleware modules for request processing.
//!
//! # Modules
//!
//! - [`auth`]: Bearer token extractor that resolves the employee role
//! - [`permission`]: Module-permission extractors, check helpers and route layers
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` validates the JWT and parses the role key
//! 3. Permission extractors consult the preset manager, honouring the token's override
//! 4. Handler executes if all checks pass
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::permission::RequireSettingsAdmin;
//!
//! async fn delete_preset(
//!     RequireSettingsAdmin(auth_user): RequireSettingsAdmin,
//! ) -> impl IntoResponse {
//!     // Only executes if the caller holds "settings:administer"
//! }
//! ```

pub mod auth;
pub mod permission;
