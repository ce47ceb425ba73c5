//! Consistency checks for [`BackupOptions`].
//!
//! [`validate`] stops at the first violated rule. [`collect_violations`] runs
//! every rule and reports them all, in the same order.
//!
//! Rule order:
//! 1. inclusion and exclusion filters are not both set
//! 2. an active preset is not combined with user filters
//! 3. extensions are bare file-name fragments
//! 4. directory exclusions are bare names
//! 5. the id is path-safe
//! 6. the size threshold is above [`MIN_MAX_SIZE`]
//! 7. exactly one source is given, and an explicit one exists
//! 8. the target exists
//! 9. the thread count is usable

use super::fs_checks::{
    find_invalid_file_name_char, find_invalid_path_char, has_separator, is_existing_dir,
};
use crate::models::{AUTO_THREADS, BackupOptions, MIN_MAX_SIZE};
use crate::presets::{Preset, try_expand};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexSet;
use thiserror::Error;

/// A backup configuration rejected by validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Invalid {field} extension '{value}': {reason}")]
    InvalidExtension {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid directory exclusion '{value}': {reason}")]
    InvalidDirExclusion { value: String, reason: String },

    #[error("Invalid id '{value}': {reason}")]
    InvalidId { value: String, reason: String },

    #[error("Maximum file size must be greater than {min} bytes (got {value})")]
    InvalidMaxSize { value: u64, min: u64 },

    #[error("No source given: specify a source directory or use the current directory")]
    MissingSource,

    #[error("Source directory {0} cannot be combined with the current directory option")]
    ConflictingSource(Utf8PathBuf),

    #[error("Source directory does not exist or is not a directory: {0}")]
    MissingOrInvalidSourceDir(Utf8PathBuf),

    #[error(
        "Target directory is missing or not a directory: {}",
        .0.as_deref().map_or("<not set>", Utf8Path::as_str)
    )]
    MissingOrInvalidTargetDir(Option<Utf8PathBuf>),

    #[error(
        "File inclusions ({inclusions}) and file exclusions ({exclusions}) cannot be used together"
    )]
    ConflictingFilters { inclusions: usize, exclusions: usize },

    #[error("Preset {preset} cannot be combined with file inclusions or exclusions")]
    ConflictingPreset { preset: Preset },

    #[error("Invalid thread count {threads}: {reason}")]
    InvalidThreadCount { threads: i32, reason: String },
}

/// Fieldless discriminant of [`ConfigurationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidExtension,
    InvalidDirExclusion,
    InvalidId,
    InvalidMaxSize,
    MissingSource,
    ConflictingSource,
    MissingOrInvalidSourceDir,
    MissingOrInvalidTargetDir,
    ConflictingFilters,
    ConflictingPreset,
    InvalidThreadCount,
}

impl ConfigurationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidExtension { .. } => ErrorKind::InvalidExtension,
            Self::InvalidDirExclusion { .. } => ErrorKind::InvalidDirExclusion,
            Self::InvalidId { .. } => ErrorKind::InvalidId,
            Self::InvalidMaxSize { .. } => ErrorKind::InvalidMaxSize,
            Self::MissingSource => ErrorKind::MissingSource,
            Self::ConflictingSource(_) => ErrorKind::ConflictingSource,
            Self::MissingOrInvalidSourceDir(_) => ErrorKind::MissingOrInvalidSourceDir,
            Self::MissingOrInvalidTargetDir(_) => ErrorKind::MissingOrInvalidTargetDir,
            Self::ConflictingFilters { .. } => ErrorKind::ConflictingFilters,
            Self::ConflictingPreset { .. } => ErrorKind::ConflictingPreset,
            Self::InvalidThreadCount { .. } => ErrorKind::InvalidThreadCount,
        }
    }
}

type Check = fn(&BackupOptions) -> Result<(), ConfigurationError>;

const CHECKS: &[Check] = &[
    check_filter_conflict,
    check_normalized_preset,
    check_extensions,
    check_dir_exclusions,
    check_id,
    check_max_size,
    check_source,
    check_target,
    check_threads,
];

/// Validate a preprocessed options record, failing on the first violation.
///
/// Reads filesystem metadata for the source and target directories; all
/// other checks inspect the record only.
pub fn validate(options: &BackupOptions) -> Result<(), ConfigurationError> {
    for check in CHECKS {
        check(options)?;
    }
    Ok(())
}

/// Run every rule and return all violations, in rule order.
///
/// Each rule contributes at most one error.
pub fn collect_violations(options: &BackupOptions) -> Vec<ConfigurationError> {
    CHECKS
        .iter()
        .filter_map(|check| check(options).err())
        .collect()
}

/// Reject a preset combined with user-supplied file filters.
///
/// Applies to raw input, before [`preprocess`](super::preprocess) replaces
/// the exclusions with the preset's own.
pub fn check_preset_conflict(options: &BackupOptions) -> Result<(), ConfigurationError> {
    if !options.preset.is_none()
        && (!options.file_inclusions.is_empty() || !options.file_exclusions.is_empty())
    {
        return Err(ConfigurationError::ConflictingPreset {
            preset: options.preset,
        });
    }
    Ok(())
}

pub(super) fn check_filter_conflict(options: &BackupOptions) -> Result<(), ConfigurationError> {
    if !options.file_inclusions.is_empty() && !options.file_exclusions.is_empty() {
        return Err(ConfigurationError::ConflictingFilters {
            inclusions: options.file_inclusions.len(),
            exclusions: options.file_exclusions.len(),
        });
    }
    Ok(())
}

// After expansion the exclusions must be exactly the catalog entry.
fn check_normalized_preset(options: &BackupOptions) -> Result<(), ConfigurationError> {
    let Some(info) = try_expand(options.preset) else {
        return Ok(());
    };

    if !options.file_inclusions.is_empty() || options.file_exclusions != info.exclusion_set() {
        return Err(ConfigurationError::ConflictingPreset {
            preset: options.preset,
        });
    }
    Ok(())
}

fn extension_problem(ext: &str) -> Option<String> {
    if ext.is_empty() {
        return Some("extension is empty".to_string());
    }
    if ext.contains('.') {
        return Some("extensions must not contain '.'".to_string());
    }
    find_invalid_file_name_char(ext).map(|c| format!("contains invalid character {:?}", c))
}

fn check_extension_set(
    field: &'static str,
    extensions: &IndexSet<String>,
) -> Result<(), ConfigurationError> {
    for ext in extensions {
        if let Some(reason) = extension_problem(ext) {
            return Err(ConfigurationError::InvalidExtension {
                field,
                value: ext.clone(),
                reason,
            });
        }
    }
    Ok(())
}

fn check_extensions(options: &BackupOptions) -> Result<(), ConfigurationError> {
    check_extension_set("inclusion", &options.file_inclusions)?;
    check_extension_set("exclusion", &options.file_exclusions)
}

fn name_problem(value: &str) -> Option<String> {
    if has_separator(value) {
        return Some("must not contain a path separator".to_string());
    }
    find_invalid_path_char(value).map(|c| format!("contains invalid character {:?}", c))
}

fn check_dir_exclusions(options: &BackupOptions) -> Result<(), ConfigurationError> {
    for dir in &options.dir_exclusions {
        let reason = if dir.is_empty() {
            Some("directory name is empty".to_string())
        } else {
            name_problem(dir)
        };

        if let Some(reason) = reason {
            return Err(ConfigurationError::InvalidDirExclusion {
                value: dir.clone(),
                reason,
            });
        }
    }
    Ok(())
}

fn check_id(options: &BackupOptions) -> Result<(), ConfigurationError> {
    let id = options.id_suffix();
    if let Some(reason) = name_problem(id) {
        return Err(ConfigurationError::InvalidId {
            value: id.to_string(),
            reason,
        });
    }
    Ok(())
}

fn check_max_size(options: &BackupOptions) -> Result<(), ConfigurationError> {
    if options.max_size <= MIN_MAX_SIZE {
        return Err(ConfigurationError::InvalidMaxSize {
            value: options.max_size,
            min: MIN_MAX_SIZE,
        });
    }
    Ok(())
}

fn check_source(options: &BackupOptions) -> Result<(), ConfigurationError> {
    match (options.explicit_source(), options.source_directory_current) {
        (None, false) => Err(ConfigurationError::MissingSource),
        (Some(source), true) => Err(ConfigurationError::ConflictingSource(source.clone())),
        (Some(source), false) if !is_existing_dir(source) => Err(
            ConfigurationError::MissingOrInvalidSourceDir(source.clone()),
        ),
        _ => Ok(()),
    }
}

fn check_target(options: &BackupOptions) -> Result<(), ConfigurationError> {
    match options.explicit_target() {
        Some(target) if is_existing_dir(target) => Ok(()),
        target => Err(ConfigurationError::MissingOrInvalidTargetDir(
            target.cloned(),
        )),
    }
}

fn check_threads(options: &BackupOptions) -> Result<(), ConfigurationError> {
    let threads = options.threads;

    if threads != AUTO_THREADS && threads < 1 {
        return Err(ConfigurationError::InvalidThreadCount {
            threads,
            reason: format!("must be {} (auto) or at least 1", AUTO_THREADS),
        });
    }

    if options.multithread && threads == 1 {
        return Err(ConfigurationError::InvalidThreadCount {
            threads,
            reason: "multithreading needs more than one thread".to_string(),
        });
    }

    Ok(())
}
