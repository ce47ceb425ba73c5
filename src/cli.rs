//! Command-line front end.
//!
//! Maps flag syntax onto [`BackupOptions`]. Only flags the user actually
//! passed are applied, so a loaded profile keeps every value the command line
//! leaves alone.

use crate::models::BackupOptions;
use crate::presets::Preset;
use camino::Utf8PathBuf;
use clap::Parser;
use indexmap::IndexSet;

/// Profile directory used when `--profile-dir` is not given
pub const DEFAULT_PROFILE_DIR: &str = "stowaway-profiles";

#[derive(Parser, Debug, Default)]
#[command(
    name = "stowaway",
    version,
    about = "Validate backup options before handing them to the copy engine"
)]
pub struct Cli {
    /// Directory to back up
    #[arg(short, long)]
    pub source: Option<Utf8PathBuf>,

    /// Back up the current working directory
    #[arg(short, long)]
    pub current: bool,

    /// Directory the backup is written to
    #[arg(short = 'T', long)]
    pub target: Option<Utf8PathBuf>,

    /// Only copy these extensions (no leading dot)
    #[arg(short, long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Skip these extensions (no leading dot)
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Skip directories with these names
    #[arg(short = 'd', long, value_delimiter = ',')]
    pub exclude_dir: Vec<String>,

    /// Use a preset's default exclusions
    #[arg(short, long)]
    pub preset: Option<Preset>,

    /// Tag distinguishing several backups of the same source
    #[arg(long)]
    pub id: Option<String>,

    /// Skip files larger than this many bytes [default: 104857600]
    #[arg(long)]
    pub max_size: Option<u64>,

    /// Ring the terminal bell when the backup finishes
    #[arg(short, long)]
    pub beep: bool,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Copy with several worker threads
    #[arg(short, long)]
    pub multithread: bool,

    /// Worker thread count, -1 for automatic
    #[arg(short, long, allow_negative_numbers = true)]
    pub threads: Option<i32>,

    /// Start from a saved profile
    #[arg(long)]
    pub profile: Option<String>,

    /// Directory holding saved profiles
    #[arg(long)]
    pub profile_dir: Option<Utf8PathBuf>,

    /// Save the resulting options as a profile
    #[arg(long)]
    pub save_profile: Option<String>,

    /// Also write logs to daily rotating files in this directory
    #[arg(long)]
    pub log_dir: Option<Utf8PathBuf>,

    /// Report every problem instead of stopping at the first one
    #[arg(long)]
    pub all_errors: bool,
}

fn to_set(values: &[String]) -> IndexSet<String> {
    values
        .iter()
        .map(|v| v.trim().to_string())
        .collect()
}

impl Cli {
    /// Whether a profile directory is needed at all
    pub fn uses_profiles(&self) -> bool {
        self.profile.is_some() || self.save_profile.is_some()
    }

    pub fn profile_dir(&self) -> Utf8PathBuf {
        self.profile_dir
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_PROFILE_DIR))
    }

    /// Overlay the flags that were passed onto `options`.
    pub fn apply(&self, options: &mut BackupOptions) {
        if let Some(source) = &self.source {
            options.source_directory = Some(source.clone());
        }
        if let Some(target) = &self.target {
            options.target_directory = Some(target.clone());
        }
        if !self.include.is_empty() {
            options.file_inclusions = to_set(&self.include);
        }
        if !self.exclude.is_empty() {
            options.file_exclusions = to_set(&self.exclude);
        }
        if !self.exclude_dir.is_empty() {
            options.dir_exclusions = to_set(&self.exclude_dir);
        }
        if let Some(preset) = self.preset {
            options.preset = preset;
        }
        if let Some(id) = &self.id {
            options.id = Some(id.clone());
        }
        if let Some(max_size) = self.max_size {
            options.max_size = max_size;
        }
        if let Some(threads) = self.threads {
            options.threads = threads;
        }

        options.source_directory_current |= self.current;
        options.beep |= self.beep;
        options.verbose |= self.verbose;
        options.multithread |= self.multithread;
    }

    /// Options built from these flags on top of the defaults
    pub fn to_options(&self) -> BackupOptions {
        let mut options = BackupOptions::default();
        self.apply(&mut options);
        options
    }
}
