//! Path-safety validation for operation fields.
//!
//! Pure functions with no I/O or side effects. Every path an operation holds
//! passes through [`validate_path`], either directly or through [`SafePath`].

use crate::error::{OpError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const SEPARATOR: &str = "/";
const CURRENT_DIR: &str = ".";
const PARENT_DIR: &str = "..";

/// Validates that a path is relative and stays inside the working tree.
///
/// ## Rules
/// - Valid UTF-8 (paths are persisted as text)
/// - Not absolute: no leading `/` or `\`, no drive prefix (`C:`)
/// - No `..` components, in any position
///
/// The check is syntactic: symlinks are not resolved and the path need not
/// exist. Both `/` and `\` separate components. Empty and `.` components are
/// dropped, and the result is joined with `/`. A path with no components left
/// renders as `.`.
///
/// ```
/// use ordo::validate_path;
///
/// assert_eq!(validate_path("dir1/dir2/file.txt").unwrap(), "dir1/dir2/file.txt");
/// assert_eq!(validate_path("./dir//file.txt").unwrap(), "dir/file.txt");
/// assert!(validate_path("/absolute/path.txt").is_err());
/// assert!(validate_path("dir/../file.txt").is_err());
/// ```
pub fn validate_path(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    let raw = path.to_str().ok_or_else(|| {
        reject(
            &path.display().to_string(),
            "Path is not valid UTF-8".to_string(),
        )
    })?;

    if path.has_root() || is_absolute(raw) {
        return Err(reject(raw, format!("Absolute paths are not allowed: {}", raw)));
    }

    let mut parts = Vec::new();
    for component in raw.split(is_separator) {
        match component {
            "" | CURRENT_DIR => continue,
            PARENT_DIR => {
                return Err(reject(
                    raw,
                    format!("Paths containing '..' are not allowed: {}", raw),
                ));
            }
            name => parts.push(name),
        }
    }

    // `./C:/x` normalizes to `C:/x`; the drive must be caught after dropping `.`.
    if parts.first().is_some_and(|first| has_drive_prefix(first)) {
        return Err(reject(raw, format!("Absolute paths are not allowed: {}", raw)));
    }

    if parts.is_empty() {
        return Ok(CURRENT_DIR.to_string());
    }

    Ok(parts.join(SEPARATOR))
}

fn reject(raw: &str, reason: String) -> OpError {
    log::debug!("Rejected path {:?}: {}", raw, reason);
    OpError::InvalidPath(raw.to_string(), reason)
}

fn is_separator(ch: char) -> bool {
    ch == '/' || ch == '\\'
}

/// Rooted (`/x`, `\x`) or drive-prefixed (`C:`, `c:\x`, `C:/x`).
///
/// Checked on the text so a Windows-style path is rejected on every platform.
fn is_absolute(raw: &str) -> bool {
    raw.starts_with(is_separator) || has_drive_prefix(raw)
}

fn has_drive_prefix(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(drive), Some(':')) if drive.is_ascii_alphabetic()
    )
}

/// A relative path that has passed [`validate_path`].
///
/// Holds the normalized `/`-separated form. There is no way to build a
/// `SafePath` without validation, including through serde.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SafePath(String);

impl SafePath {
    /// Validates `path` and wraps the normalized form.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        validate_path(path).map(SafePath)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns true for the empty relative path (`.`).
    pub fn is_current_dir(&self) -> bool {
        self.0 == CURRENT_DIR
    }

    /// Iterates the normalized components.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0
            .split(SEPARATOR)
            .filter(|component| *component != CURRENT_DIR)
    }

    /// Appends a relative segment; the segment is validated too.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<SafePath> {
        let segment = validate_path(segment)?;

        if segment == CURRENT_DIR {
            return Ok(self.clone());
        }
        if self.is_current_dir() {
            return Ok(SafePath(segment));
        }

        SafePath::new(format!("{}{}{}", self.0, SEPARATOR, segment))
    }

    /// Drops the last component.
    ///
    /// Returns `None` for a single-component path and for `.`.
    pub fn parent(&self) -> Option<SafePath> {
        self.0
            .rsplit_once(SEPARATOR)
            .map(|(parent, _)| SafePath(parent.to_string()))
    }

    /// Last component, or `None` for `.`.
    pub fn file_name(&self) -> Option<&str> {
        if self.is_current_dir() {
            return None;
        }
        self.0.rsplit(SEPARATOR).next()
    }
}

impl fmt::Display for SafePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for SafePath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl FromStr for SafePath {
    type Err = OpError;

    fn from_str(s: &str) -> Result<Self> {
        SafePath::new(s)
    }
}

impl TryFrom<String> for SafePath {
    type Error = OpError;

    fn try_from(value: String) -> Result<Self> {
        SafePath::new(value)
    }
}

impl TryFrom<&str> for SafePath {
    type Error = OpError;

    fn try_from(value: &str) -> Result<Self> {
        SafePath::new(value)
    }
}

impl From<SafePath> for String {
    fn from(path: SafePath) -> Self {
        path.0
    }
}
