//! # Barflow Config
//!
//! Configuration types for the Barflow API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`presets`]: Custom permission preset storage configuration
//! - [`server`]: Listener address configuration
//!
//! # Example
//!
//! ```ignore
//! use barflow_config::{CorsConfig, JwtConfig, PresetStoreConfig, ServerConfig};
//!
//! // Load all configs from environment
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let preset_store_config = PresetStoreConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod presets;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use presets::PresetStoreConfig;
pub use server::ServerConfig;
