//! Services module - normalization and validation of backup options.
//!
//! Everything here runs synchronously on the caller's thread. The only I/O is
//! the directory-existence check for the source and target.
//!
//! # Components
//!
//! - [`preprocess`]: derives the normalized `id` and expands the preset
//! - [`validate`]: rejects inconsistent options with a [`ConfigurationError`]
//! - [`collect_violations`]: the same rules, reporting every violation
//! - [`prepare`]: raw filter and preset checks, preprocess, validate, then freeze into
//!   [`ValidatedOptions`]
//! - [`fs_checks`]: host OS character rules and directory checks
//!
//! # Usage Example
//!
//! ```ignore
//! use stowaway::{BackupOptions, services::prepare};
//!
//! let options = BackupOptions {
//!     source_directory_current: true,
//!     target_directory: Some("/mnt/backup".into()),
//!     ..Default::default()
//! };
//!
//! let validated = prepare(options)?;
//! println!("{} worker(s)", validated.effective_threads());
//! ```

pub mod fs_checks;
pub mod normalize;
pub mod validation;

pub use normalize::preprocess;
pub use validation::{
    ConfigurationError, ErrorKind, check_preset_conflict, collect_violations, validate,
};

use crate::models::{BackupOptions, ValidatedOptions};

// Rules that must see the user's own filters, before preset expansion
// overwrites the exclusions. Filter conflicts come first, as in `validate`.
const RAW_CHECKS: &[fn(&BackupOptions) -> Result<(), ConfigurationError>] =
    &[validation::check_filter_conflict, check_preset_conflict];

fn check_raw(options: &BackupOptions) -> Result<(), ConfigurationError> {
    for check in RAW_CHECKS {
        check(options)?;
    }
    Ok(())
}

/// Normalize and validate a raw options record.
///
/// The filter and preset conflict rules are checked on the raw record first,
/// since preprocessing overwrites the exclusions they would inspect.
pub fn prepare(mut options: BackupOptions) -> Result<ValidatedOptions, ConfigurationError> {
    let result = check_raw(&options).and_then(|()| {
        preprocess(&mut options);
        validate(&options)
    });

    if let Err(e) = result {
        tracing::warn!("Rejected backup options: {}", e);
        return Err(e);
    }

    tracing::info!(
        "Accepted backup options: preset={}, inclusions={}, exclusions={}, dir_exclusions={}, max_size={}, threads={}",
        options.preset,
        options.file_inclusions.len(),
        options.file_exclusions.len(),
        options.dir_exclusions.len(),
        options.max_size,
        options.threads
    );

    Ok(ValidatedOptions::new(options))
}

/// Like [`prepare`], but report every violated rule instead of the first.
pub fn prepare_all(
    mut options: BackupOptions,
) -> Result<ValidatedOptions, Vec<ConfigurationError>> {
    let mut violations: Vec<ConfigurationError> = RAW_CHECKS
        .iter()
        .filter_map(|check| check(&options).err())
        .collect();

    if !violations.is_empty() {
        violations.extend(collect_violations(&options).into_iter().filter(|v| {
            !matches!(
                v.kind(),
                ErrorKind::ConflictingFilters | ErrorKind::ConflictingPreset
            )
        }));
        tracing::warn!("Rejected backup options: {} problem(s)", violations.len());
        return Err(violations);
    }

    preprocess(&mut options);
    violations = collect_violations(&options);
    if !violations.is_empty() {
        tracing::warn!("Rejected backup options: {} problem(s)", violations.len());
        return Err(violations);
    }

    Ok(ValidatedOptions::new(options))
}
