use super::options::{AUTO_THREADS, BackupOptions};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::ops::Deref;

/// Options that passed normalization and validation.
///
/// Only [`prepare`](crate::services::prepare) constructs this type, so
/// holding one means every invariant checked by
/// [`validate`](crate::services::validate) held at construction. No mutable
/// access is offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOptions(BackupOptions);

impl ValidatedOptions {
    pub(crate) fn new(options: BackupOptions) -> Self {
        Self(options)
    }

    /// Worker count the copy engine should use.
    ///
    /// [`AUTO_THREADS`] resolves to the CPU core count when multithreading is
    /// enabled, and to a single worker otherwise.
    pub fn effective_threads(&self) -> usize {
        if self.0.threads != AUTO_THREADS {
            return self.0.threads.max(1) as usize;
        }

        if self.0.multithread {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            1
        }
    }

    /// Directory to back up, resolving `source_directory_current` to the
    /// process working directory.
    pub fn source_path(&self) -> Result<Utf8PathBuf> {
        if let Some(source) = self.0.explicit_source() {
            return Ok(source.clone());
        }

        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Utf8PathBuf::try_from(cwd).context("Current directory is not valid UTF-8")
    }

    /// Target directory. Always present after validation.
    pub fn target_path(&self) -> &Utf8Path {
        self.0
            .explicit_target()
            .map(|p| p.as_path())
            .unwrap_or_else(|| Utf8Path::new(""))
    }

    /// Name of the folder created under the target: the source's final
    /// component followed by the normalized id.
    pub fn backup_folder_name(&self) -> Result<String> {
        let source = self.source_path()?;
        let base = source
            .file_name()
            .with_context(|| format!("Source directory has no final component: {}", source))?;
        Ok(format!("{}{}", base, self.0.id_suffix()))
    }

    pub fn into_inner(self) -> BackupOptions {
        self.0
    }
}

impl Deref for ValidatedOptions {
    type Target = BackupOptions;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
