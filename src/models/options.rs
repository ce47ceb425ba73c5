use crate::presets::Preset;
use camino::Utf8PathBuf;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Default file size threshold in bytes (100 MiB)
pub const DEFAULT_MAX_SIZE: u64 = 104_857_600;

/// `max_size` must be strictly greater than this many bytes
pub const MIN_MAX_SIZE: u64 = 100;

/// Thread count meaning "pick automatically"
pub const AUTO_THREADS: i32 = -1;

/// Options for a single backup run.
///
/// Built once per invocation by the command-line front end or loaded from a
/// YAML profile, normalized by [`preprocess`](crate::services::preprocess)
/// and checked by [`validate`](crate::services::validate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackupOptions {
    /// Only copy files with these extensions
    pub file_inclusions: IndexSet<String>,

    /// Skip files with these extensions
    pub file_exclusions: IndexSet<String>,

    /// Skip directories with these names
    pub dir_exclusions: IndexSet<String>,

    pub preset: Preset,

    /// Tag distinguishing several backups of the same source.
    /// Normalized to `""` or `"_<id>"`.
    pub id: Option<String>,

    /// Files larger than this many bytes are skipped
    pub max_size: u64,

    pub source_directory: Option<Utf8PathBuf>,

    /// Use the working directory as the source
    pub source_directory_current: bool,

    pub target_directory: Option<Utf8PathBuf>,

    pub beep: bool,
    pub verbose: bool,
    pub multithread: bool,

    /// Worker count for the copy engine, or [`AUTO_THREADS`]
    pub threads: i32,
}

impl Default for BackupOptions {
    fn default() -> Self {
        Self {
            file_inclusions: IndexSet::new(),
            file_exclusions: IndexSet::new(),
            dir_exclusions: IndexSet::new(),
            preset: Preset::None,
            id: None,
            max_size: DEFAULT_MAX_SIZE,
            source_directory: None,
            source_directory_current: false,
            target_directory: None,
            beep: false,
            verbose: false,
            multithread: false,
            threads: AUTO_THREADS,
        }
    }
}

impl BackupOptions {
    /// Source directory if one was given and is non-empty
    pub fn explicit_source(&self) -> Option<&Utf8PathBuf> {
        self.source_directory
            .as_ref()
            .filter(|p| !p.as_str().trim().is_empty())
    }

    /// Target directory if one was given and is non-empty
    pub fn explicit_target(&self) -> Option<&Utf8PathBuf> {
        self.target_directory
            .as_ref()
            .filter(|p| !p.as_str().trim().is_empty())
    }

    /// Normalized id suffix, or `""` when unset
    pub fn id_suffix(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }
}
