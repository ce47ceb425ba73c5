// Stowaway - option validation for the stowaway file backup utility
//
// This is the library crate: the options model, preset catalog, normalization
// and validation. The binary crate (main.rs) provides the command-line entry point.

pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod presets;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ProfileManager;
pub use models::{BackupOptions, ValidatedOptions};
pub use presets::{Preset, PresetInfo};
pub use services::{ConfigurationError, ErrorKind, prepare, preprocess, validate};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
