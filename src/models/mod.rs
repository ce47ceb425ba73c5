//! Data models for stowaway.
//!
//! - [`BackupOptions`]: the options record for one backup run, serializable to YAML profiles
//! - [`ValidatedOptions`]: the frozen form handed to the copy engine once validation passes

pub mod options;
pub mod validated;

pub use options::{AUTO_THREADS, BackupOptions, DEFAULT_MAX_SIZE, MIN_MAX_SIZE};
pub use validated::ValidatedOptions;
