//! Preset catalog.
//!
//! A preset is a named bundle of default exclusions covering a common backup
//! use case. Each [`Preset`] variant maps to a static [`PresetInfo`] entry in
//! [`CATALOG`]; the table is built at compile time and never mutated, so it
//! can be read from any thread.
//!
//! # Examples
//!
//! ```
//! use stowaway::presets::{Preset, try_expand};
//!
//! let info = try_expand(Preset::VisualStudio).unwrap();
//! assert!(info.directories.contains(&"obj"));
//! assert!(try_expand(Preset::None).is_none());
//! ```

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named preset selecting a bundle of default exclusions.
///
/// Serialized by name and deserialized through [`FromStr`], so profiles accept
/// the same spellings as the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Preset {
    #[default]
    None,
    Documents,
    Images,
    Music,
    Videos,
    Code,
    VisualStudio,
}

impl Preset {
    /// Every preset, in catalog order
    pub const ALL: [Preset; 7] = [
        Preset::None,
        Preset::Documents,
        Preset::Images,
        Preset::Music,
        Preset::Videos,
        Preset::Code,
        Preset::VisualStudio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::None => "none",
            Preset::Documents => "documents",
            Preset::Images => "images",
            Preset::Music => "music",
            Preset::Videos => "videos",
            Preset::Code => "code",
            Preset::VisualStudio => "visualstudio",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Preset::None)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a preset name is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown preset '{0}' (expected one of: none, documents, images, music, videos, code, visualstudio)")]
pub struct PresetParseError(pub String);

impl FromStr for Preset {
    type Err = PresetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Preset::None),
            "documents" | "docs" => Ok(Preset::Documents),
            "images" => Ok(Preset::Images),
            "music" => Ok(Preset::Music),
            "videos" => Ok(Preset::Videos),
            "code" => Ok(Preset::Code),
            "visualstudio" | "visual-studio" | "vs" => Ok(Preset::VisualStudio),
            _ => Err(PresetParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Preset {
    type Error = PresetParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Preset> for String {
    fn from(preset: Preset) -> Self {
        preset.as_str().to_string()
    }
}

/// Default exclusions contributed by a preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetInfo {
    /// File extensions to skip, without the leading dot
    pub exclusions: &'static [&'static str],
    /// Bare directory names to skip
    pub directories: &'static [&'static str],
}

impl PresetInfo {
    pub fn exclusion_set(&self) -> IndexSet<String> {
        self.exclusions.iter().map(|s| s.to_string()).collect()
    }

    pub fn directory_set(&self) -> IndexSet<String> {
        self.directories.iter().map(|s| s.to_string()).collect()
    }
}

/// Catalog entries keyed by preset. `Preset::None` has no entry.
pub static CATALOG: &[(Preset, PresetInfo)] = &[
    (
        Preset::Documents,
        PresetInfo {
            exclusions: &[
                "doc", "docx", "docm", "dot", "dotx", "xls", "xlsx", "xlsm", "ppt", "pptx", "odt",
                "ods", "odp", "rtf", "pdf", "txt", "csv", "md", "epub",
            ],
            directories: &[],
        },
    ),
    (
        Preset::Images,
        PresetInfo {
            exclusions: &[
                "jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff", "webp", "heic", "raw", "cr2",
                "nef", "psd", "svg", "ico",
            ],
            directories: &[],
        },
    ),
    (
        Preset::Music,
        PresetInfo {
            exclusions: &[
                "mp3", "flac", "wav", "aac", "ogg", "oga", "m4a", "wma", "aiff", "alac", "opus",
                "mid",
            ],
            directories: &[],
        },
    ),
    (
        Preset::Videos,
        PresetInfo {
            exclusions: &[
                "mp4", "m4v", "mkv", "avi", "mov", "wmv", "flv", "webm", "mpg", "mpeg", "3gp",
                "vob", "ts",
            ],
            directories: &[],
        },
    ),
    (
        Preset::Code,
        PresetInfo {
            exclusions: &[
                "c", "h", "cpp", "hpp", "cc", "cs", "rs", "go", "java", "kt", "py", "rb", "js",
                "ts", "jsx", "tsx", "php", "swift", "sh", "ps1", "sql",
            ],
            directories: &[],
        },
    ),
    (
        Preset::VisualStudio,
        PresetInfo {
            exclusions: &[
                "obj", "pdb", "ilk", "idb", "pch", "ipch", "iobj", "ipdb", "tlog", "suo", "user",
                "cache", "vspscc", "vssscc",
            ],
            directories: &["bin", "obj", ".vs", "packages", "TestResults", "ipch"],
        },
    ),
];

/// Look up the catalog entry for a preset.
///
/// Returns `None` for [`Preset::None`], meaning no expansion applies.
pub fn try_expand(preset: Preset) -> Option<&'static PresetInfo> {
    CATALOG
        .iter()
        .find(|(key, _)| *key == preset)
        .map(|(_, info)| info)
}
