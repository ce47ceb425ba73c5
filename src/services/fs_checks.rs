//! Host filesystem rules used by validation.
//!
//! Character sets follow what the host OS refuses in a file name or a path.
//! Directory checks are read-only metadata lookups.

use camino::Utf8Path;

#[cfg(windows)]
const RESERVED_FILE_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

#[cfg(windows)]
const RESERVED_PATH_CHARS: &[char] = &['"', '<', '>', '|'];

#[cfg(not(windows))]
const RESERVED_FILE_NAME_CHARS: &[char] = &['\0', '/'];

#[cfg(not(windows))]
const RESERVED_PATH_CHARS: &[char] = &['\0'];

/// Whether `c` may not appear in a file name on this OS
pub fn is_invalid_file_name_char(c: char) -> bool {
    (cfg!(windows) && c.is_ascii_control()) || RESERVED_FILE_NAME_CHARS.contains(&c)
}

/// Whether `c` may not appear anywhere in a path on this OS
pub fn is_invalid_path_char(c: char) -> bool {
    (cfg!(windows) && c.is_ascii_control()) || RESERVED_PATH_CHARS.contains(&c)
}

/// First character of `value` that is invalid in a file name
pub fn find_invalid_file_name_char(value: &str) -> Option<char> {
    value.chars().find(|c| is_invalid_file_name_char(*c))
}

/// First character of `value` that is invalid in a path
pub fn find_invalid_path_char(value: &str) -> Option<char> {
    value.chars().find(|c| is_invalid_path_char(*c))
}

/// Whether `value` contains a path separator for this OS
pub fn has_separator(value: &str) -> bool {
    value.chars().any(std::path::is_separator)
}

/// Whether `path` names an existing directory.
///
/// Broken symlinks and permission errors count as "not a directory".
pub fn is_existing_dir(path: &Utf8Path) -> bool {
    match path.metadata() {
        Ok(meta) => meta.is_dir(),
        Err(e) => {
            tracing::debug!("Directory check failed for {}: {}", path, e);
            false
        }
    }
}
