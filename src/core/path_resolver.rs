use std::path::{Component, Path};

/// Path used in headers and as the dedup key: relative to `project_root` with
/// `/` separators when the path lies under it, the full path otherwise.
pub fn resolve(path: &Path, project_root: Option<&Path>) -> String {
    if let Some(relative) = project_root.and_then(|root| path.strip_prefix(root).ok()) {
        if relative.as_os_str().is_empty() {
            return path.to_string_lossy().replace('\\', "/");
        }
        return relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");
    }

    path.to_string_lossy().replace('\\', "/")
}
