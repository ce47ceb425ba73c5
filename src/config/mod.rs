use crate::models::BackupOptions;
use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

const PROFILE_EXTENSION: &str = "yaml";

/// Profile manager for loading and saving named backup profiles.
///
/// Each profile is a YAML file `<name>.yaml` in the profile directory holding
/// a serialized [`BackupOptions`]. Profiles are stored raw, before
/// normalization, so loading one and running it through
/// [`prepare`](crate::services::prepare) behaves like passing the same
/// options on the command line.
#[derive(Debug, Clone)]
pub struct ProfileManager {
    profile_dir: Utf8PathBuf,
}

impl ProfileManager {
    /// Create a new ProfileManager rooted at `profile_dir`.
    ///
    /// Nothing touches the filesystem until a profile is saved; the directory
    /// is created then.
    pub fn new<P: AsRef<Utf8Path>>(profile_dir: P) -> Self {
        Self {
            profile_dir: profile_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the file backing profile `name`
    pub fn profile_path(&self, name: &str) -> Result<Utf8PathBuf> {
        if name.is_empty()
            || name.chars().any(std::path::is_separator)
            || name.starts_with('.')
        {
            bail!("Invalid profile name: {:?}", name);
        }
        Ok(self
            .profile_dir
            .join(format!("{}.{}", name, PROFILE_EXTENSION)))
    }

    /// Load profile `name`.
    ///
    /// Unlike the defaults-on-missing behaviour for optional files, a missing
    /// profile is an error: the user asked for it by name.
    pub fn load_profile(&self, name: &str) -> Result<BackupOptions> {
        let path = self.profile_path(name)?;

        if !path.exists() {
            bail!("Profile '{}' not found at {}", name, path);
        }

        let file_contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read profile: {}", path))?;

        let options: BackupOptions = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse profile: {}", path))?;

        tracing::info!("Loaded profile '{}' from {}", name, path);
        Ok(options)
    }

    /// Save `options` as profile `name`, replacing any existing file.
    pub fn save_profile(&self, name: &str, options: &BackupOptions) -> Result<()> {
        let path = self.profile_path(name)?;

        let yaml_string =
            serde_yaml_ng::to_string(options).context("Failed to serialize profile to YAML")?;

        if !self.profile_dir.exists() {
            fs::create_dir_all(&self.profile_dir).with_context(|| {
                format!("Failed to create profile directory: {}", self.profile_dir)
            })?;
        }

        fs::write(&path, yaml_string)
            .with_context(|| format!("Failed to write profile: {}", path))?;

        tracing::info!("Saved profile '{}' to {}", name, path);
        Ok(())
    }

    /// Names of all stored profiles, sorted. Empty if the directory doesn't exist yet.
    pub fn list_profiles(&self) -> Result<Vec<String>> {
        if !self.profile_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = self
            .profile_dir
            .read_dir_utf8()
            .with_context(|| format!("Failed to read profile directory: {}", self.profile_dir))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read profile directory entry")?;
            let path = entry.path();
            if path.extension() == Some(PROFILE_EXTENSION) && path.is_file() {
                if let Some(stem) = path.file_stem() {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Get the profile directory path.
    pub fn profile_dir(&self) -> &Utf8Path {
        &self.profile_dir
    }
}
