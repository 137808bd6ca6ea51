//! # Barflow API
//!
//! Role-based permission service for a bar and club management application.
//!
//! ## Overview
//!
//! Every employee holds one of five roles. Each role carries a default set of
//! per-module capabilities (view, create, edit, administer), a seniority rank
//! and an explicit list of roles it may manage. Individual employees may carry
//! an override that replaces the defaults module by module, and administrators
//! can save named presets built on top of a base role.
//!
//! ## Role Hierarchy
//!
//! | Role | Rank | Access level | Manages |
//! |------|------|--------------|---------|
//! | Manager | 5 | admin | everyone else |
//! | Cashier Attendant | 3 | manager | waiters |
//! | Bartender | 2 | user | nobody |
//! | Waiter | 1 | user | nobody |
//! | Cook | 1 | user | nobody |
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/        # Bearer token extractor and permission guards
//! ├── modules/
//! │   └── permissions/   # Preset manager, utilities, store, HTTP handlers
//! ├── logging.rs         # Request logging middleware
//! ├── router.rs          # Main application router
//! ├── state.rs           # Shared application state
//! └── validator.rs       # Validated JSON extractor
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! JWT_SECRET=your-secure-secret-key
//! PRESET_STORE_PATH=/var/lib/barflow/presets.json   # optional
//! LOG_LEVEL=info
//! ```
//!
//! ## Modules
//!
//! - [`logging`]: Request logging middleware
//! - [`middleware`]: Authentication and authorization middleware
//! - [`modules`]: Feature modules
//! - [`router`]: Main application router
//! - [`state`]: Shared application state
//! - [`validator`]: Request validation utilities

pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use barflow_auth;
pub use barflow_config;
pub use barflow_core;
pub use barflow_models;
