//! Role-based permission engine.
//!
//! - [`service`]: the [`PresetManager`] holding role defaults, role metadata
//!   and custom presets
//! - [`utils`]: stateless checks, validation, sanitization and summaries
//! - [`context`]: a user's resolved permissions
//! - [`store`]: custom preset persistence
//! - [`controller`] / [`router`]: the `/api/permissions` HTTP surface

pub mod context;
pub mod controller;
pub mod model;
pub mod router;
pub mod service;
pub mod store;
pub mod utils;

pub use context::UserPermissionContext;
pub use model::{ConfigurationValidation, PermissionSummary, PermissionValidation};
pub use service::PresetManager;
pub use store::{JsonFilePresetStore, MemoryPresetStore, PresetStore, store_from_config};
