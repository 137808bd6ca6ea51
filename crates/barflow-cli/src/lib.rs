//! # Barflow CLI
//!
//! Offline inspection of the role table and of permission sets stored as
//! JSON. Everything here runs against a local [`PresetManager`]; no server
//! is contacted.
//!
//! ## Usage
//!
//! ```ignore
//! use barflow_cli::inspect::{check, render_roles};
//!
//! let manager = PresetManager::new();
//! print!("{}", render_roles(&manager));
//! let allowed = check(&manager, "waiter", "orders", "edit", None)?;
//! ```

pub mod inspect;
