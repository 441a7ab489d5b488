use crate::domain::settings::Settings;
use std::path::Path;

/// Filename suffix allow-list. Matching is case-sensitive and literal.
pub fn is_eligible(path: &Path, settings: &Settings) -> bool {
    if !settings.use_filename_filters {
        return true;
    }

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    settings
        .filename_filters
        .iter()
        .any(|suffix| name.ends_with(suffix.as_str()))
}

pub fn has_budget(file_count: usize, settings: &Settings) -> bool {
    !settings.set_max_file_count || file_count < settings.file_count_limit
}
