use crate::domain::error::CopyError;
use crate::domain::host::FileClassifier;
use crate::domain::models::Entry;
use anyhow::Context;
use log::{debug, warn};
use std::fs;
use std::io::Read;
use std::path::{self, Component, Path, PathBuf};
use walkdir::WalkDir;

const SNIFF_LEN: u64 = 8000;

/// Absolute form of an existing path with `.` and `..` folded lexically.
/// Symlinks keep the name they were reached by, matching what directory
/// expansion yields for the same file.
pub fn absolutize(path: &Path) -> anyhow::Result<PathBuf> {
    let absolute = path::absolute(path)
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    fs::metadata(&normalized)
        .with_context(|| format!("Path does not exist: {}", path.display()))?;
    Ok(normalized)
}

/// Makes a selected path absolute and tags it as a file or directory.
pub fn to_entry(path: &Path) -> anyhow::Result<Entry> {
    let absolute = absolutize(path)?;
    let metadata = fs::metadata(&absolute)
        .with_context(|| format!("Failed to stat: {}", absolute.display()))?;

    if metadata.is_dir() {
        Ok(Entry::directory(absolute))
    } else {
        Ok(Entry::file(absolute))
    }
}

/// Files below `dir` in pre-order, siblings sorted by name. Directories
/// themselves are not yielded and symlinked directories are not followed.
pub fn walk_files(dir: &Path) -> impl Iterator<Item = PathBuf> + use<> {
    let root = dir.to_path_buf();
    WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Error walking directory {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| !entry.file_type().is_dir() && entry.path().is_file())
        .map(|entry| entry.into_path())
}

pub fn file_size(path: &Path) -> Result<u64, CopyError> {
    fs::metadata(path)
        .map(|metadata| metadata.len())
        .map_err(|source| CopyError::FileRead {
            path: path.to_path_buf(),
            source,
        })
}

pub fn read_file_text(path: &Path) -> Result<String, CopyError> {
    debug!("Reading file contents: {}", path.display());
    let bytes = fs::read(path).map_err(|source| CopyError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        debug!("File is empty: {}", path.display());
        return Ok(String::new());
    }

    let contents =
        String::from_utf8(bytes).map_err(|_| CopyError::InvalidUtf8(path.to_path_buf()))?;
    debug!("Read {} bytes from file", contents.len());
    Ok(contents)
}

/// Classifies by detected MIME type, falling back to a NUL-byte scan of the
/// first few kilobytes.
pub struct SniffingClassifier;

impl SniffingClassifier {
    fn classify(path: &Path) -> std::io::Result<bool> {
        if let Some(kind) = infer::get_from_path(path)? {
            let mime = kind.mime_type();
            if mime.starts_with("text/")
                || matches!(
                    mime,
                    "application/json" | "application/xml" | "application/x-sh"
                )
            {
                return Ok(false);
            }
            if mime.starts_with("image/")
                || mime.starts_with("audio/")
                || mime.starts_with("video/")
                || mime.starts_with("font/")
                || matches!(
                    mime,
                    "application/octet-stream"
                        | "application/pdf"
                        | "application/zip"
                        | "application/gzip"
                        | "application/x-executable"
                        | "application/wasm"
                )
            {
                return Ok(true);
            }
        }

        let mut head = Vec::new();
        fs::File::open(path)?.take(SNIFF_LEN).read_to_end(&mut head)?;
        Ok(head.contains(&0))
    }
}

impl FileClassifier for SniffingClassifier {
    fn is_binary(&self, path: &Path) -> bool {
        match Self::classify(path) {
            Ok(binary) => binary,
            Err(e) => {
                warn!("Could not classify {}: {}", path.display(), e);
                false
            }
        }
    }
}
