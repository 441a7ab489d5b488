use crate::domain::host::{DocumentCache, FileClassifier};
use crate::domain::models::ContentResult;
use crate::domain::settings::Settings;
use crate::infra::file_system::{file_size, read_file_text};
use log::{debug, info, warn};
use std::path::Path;

pub struct ContentReader<'a> {
    settings: &'a Settings,
    classifier: &'a dyn FileClassifier,
    documents: &'a dyn DocumentCache,
}

impl<'a> ContentReader<'a> {
    pub fn new(
        settings: &'a Settings,
        classifier: &'a dyn FileClassifier,
        documents: &'a dyn DocumentCache,
    ) -> Self {
        Self {
            settings,
            classifier,
            documents,
        }
    }

    pub fn read(&self, path: &Path) -> ContentResult {
        if self.classifier.is_binary(path) {
            info!("Skipping binary file: {}", path.display());
            return ContentResult::SkippedBinary;
        }

        match file_size(path) {
            Ok(size) if size > self.settings.max_file_size_bytes() => {
                info!(
                    "Skipping file: {} - {} bytes exceeds the {} KB limit",
                    path.display(),
                    size,
                    self.settings.max_file_size_kb
                );
                return ContentResult::SkippedTooLarge { size };
            }
            Ok(_) => {}
            Err(e) => warn!("{}", e),
        }

        if let Some(text) = self.cached_text(path) {
            debug!("Using in-memory document for {}", path.display());
            return ContentResult::Included(text);
        }

        match read_file_text(path) {
            Ok(text) => ContentResult::Included(text),
            Err(e) => {
                warn!("{}; copying it as empty", e);
                ContentResult::Included(String::new())
            }
        }
    }

    fn cached_text(&self, path: &Path) -> Option<String> {
        if self.settings.strict_memory_read && !self.documents.is_open(path) {
            return None;
        }
        self.documents.cached_text(path)
    }
}
