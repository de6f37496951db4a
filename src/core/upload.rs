//! # Upload Input
//!
//! Everything the upload form needs that isn't keystroke handling:
//! whole-file text reads, the accepted-extension filter, directory listings
//! for the file picker, and recognizing a dropped file.
//!
//! Terminals deliver a file dragged onto the window as a pasted path, so a
//! "drop" is a paste that names an existing file.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

/// Extensions offered by the file picker.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "doc", "docx", "pdf"];

/// Default upper bound on an uploaded file.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug)]
pub enum UploadError {
    Io { path: PathBuf, source: io::Error },
    /// The file is not valid UTF-8 text.
    Decode { path: PathBuf },
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    NotAFile { path: PathBuf },
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Io { path, source } => {
                write!(f, "could not read {}: {source}", path.display())
            }
            UploadError::Decode { path } => {
                write!(f, "{} is not a text file", path.display())
            }
            UploadError::TooLarge { path, size, limit } => write!(
                f,
                "{} is too large ({} bytes, limit {} bytes)",
                path.display(),
                size,
                limit
            ),
            UploadError::NotAFile { path } => write!(f, "{} is not a file", path.display()),
        }
    }
}

impl std::error::Error for UploadError {}

/// Whether the upload form may submit `buffer` right now.
pub fn can_submit(buffer: &str, is_generating: bool) -> bool {
    !is_generating && !buffer.trim().is_empty()
}

/// Read a whole file as text.
///
/// Content must be UTF-8. Document formats pass the picker's filter but
/// fail here with `UploadError::Decode` rather than producing garbage.
pub fn read_text_file(path: &Path, max_bytes: u64) -> Result<String, UploadError> {
    let io_err = |source| UploadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let meta = fs::metadata(path).map_err(io_err)?;
    if !meta.is_file() {
        return Err(UploadError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    if meta.len() > max_bytes {
        return Err(UploadError::TooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            limit: max_bytes,
        });
    }

    let bytes = fs::read(path).map_err(io_err)?;
    let text = String::from_utf8(bytes).map_err(|_| UploadError::Decode {
        path: path.to_path_buf(),
    })?;
    info!("Loaded {} ({} bytes)", path.display(), text.len());
    Ok(text)
}

/// Whether the picker offers this file.
pub fn is_accepted(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext))
        })
}

/// Interpret pasted text as a dropped file.
///
/// Accepts a single path, optionally quoted, `file://`-prefixed, or with
/// backslash-escaped spaces. Returns `None` unless it names an existing file.
pub fn dropped_file(pasted: &str) -> Option<PathBuf> {
    let trimmed = pasted.trim();
    if trimmed.is_empty() || trimmed.contains('\n') {
        return None;
    }

    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(trimmed);
    let unprefixed = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    let unescaped = unprefixed.replace("\\ ", " ");

    let path = PathBuf::from(unescaped);
    if path.is_file() {
        debug!("Paste recognized as dropped file: {}", path.display());
        Some(path)
    } else {
        None
    }
}

/// One row in the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// List `dir` for the file picker: visible subdirectories first, then
/// accepted files, each group sorted by name.
pub fn list_dir(dir: &Path) -> io::Result<Vec<PickerEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        let is_dir = entry.file_type()?.is_dir();
        if is_dir {
            dirs.push(PickerEntry { name, path, is_dir });
        } else if is_accepted(&path) {
            files.push(PickerEntry { name, path, is_dir });
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));
    dirs.extend(files);
    Ok(dirs)
}
