use std::path::Path;

/// File-type classification supplied by the host.
pub trait FileClassifier {
    fn is_binary(&self, path: &Path) -> bool;
}

/// In-memory documents held by the host editor.
pub trait DocumentCache {
    /// True when the path is currently open in an editor tab.
    fn is_open(&self, path: &Path) -> bool;

    /// The in-memory text of the path, open or not.
    fn cached_text(&self, path: &Path) -> Option<String>;
}

/// Everything the engine borrows from its host for one run.
pub struct Host<'a> {
    pub classifier: &'a dyn FileClassifier,
    pub documents: &'a dyn DocumentCache,
    pub project_root: Option<&'a Path>,
}
