use crate::domain::host::DocumentCache;
use crate::infra::file_system::absolutize;
use anyhow::{Context, anyhow};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Editor state given on the command line: open tabs in order, plus the
/// in-memory text of unsaved or cached documents.
#[derive(Debug, Default)]
pub struct OpenBuffers {
    tabs: Vec<PathBuf>,
    texts: HashMap<PathBuf, String>,
}

impl OpenBuffers {
    pub fn from_args(
        open: &[PathBuf],
        buffers: &[String],
        cached: &[String],
    ) -> anyhow::Result<Self> {
        let mut documents = Self::default();

        for path in open {
            documents.open_tab(absolutize(path)?);
        }
        for spec in buffers {
            let (path, text) = parse_snapshot(spec)?;
            documents.open_buffer(path, text);
        }
        for spec in cached {
            let (path, text) = parse_snapshot(spec)?;
            documents.cache_document(path, text);
        }

        debug!(
            "Editor state: {} open tab(s), {} in-memory document(s)",
            documents.tabs.len(),
            documents.texts.len()
        );
        Ok(documents)
    }

    pub fn open_tab(&mut self, path: PathBuf) {
        if !self.tabs.contains(&path) {
            self.tabs.push(path);
        }
    }

    pub fn open_buffer(&mut self, path: PathBuf, text: String) {
        self.open_tab(path.clone());
        self.texts.insert(path, text);
    }

    pub fn cache_document(&mut self, path: PathBuf, text: String) {
        self.texts.insert(path, text);
    }

    pub fn tabs(&self) -> &[PathBuf] {
        &self.tabs
    }
}

impl DocumentCache for OpenBuffers {
    fn is_open(&self, path: &Path) -> bool {
        self.tabs.iter().any(|tab| tab == path)
    }

    fn cached_text(&self, path: &Path) -> Option<String> {
        self.texts.get(path).cloned()
    }
}

/// Parses `PATH=SNAPSHOT`, reading the snapshot file as the in-memory text of PATH.
fn parse_snapshot(spec: &str) -> anyhow::Result<(PathBuf, String)> {
    let (path, snapshot) = spec
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected PATH=SNAPSHOT, got '{}'", spec))?;
    let text = fs::read_to_string(snapshot)
        .with_context(|| format!("Failed to read snapshot file: {}", snapshot))?;
    Ok((absolutize(Path::new(path))?, text))
}
