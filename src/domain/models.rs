use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A file-system node handed to one copy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Entry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentResult {
    Included(String),
    SkippedBinary,
    SkippedTooLarge { size: u64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub file_count: usize,
    pub chars: usize,
    pub lines: usize,
    pub words: usize,
    pub tokens: usize,
}

/// Outcome of one aggregation pass over a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub document: String,
    pub stats: CopyStats,
    pub limit_reached: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub clipboard_text: String,
    pub summary: Option<String>,
    pub warning: Option<String>,
    pub stats: CopyStats,
    pub limit_reached: bool,
}
