use crate::domain::error::CopyError;
use log::warn;
use serde::{Deserialize, Serialize};

/// Placeholder in `header_format` replaced by each file's relative path.
pub const FILE_PATH_TOKEN: &str = "$FILE_PATH";

/// Per-project copy settings. Field names on disk are the camelCase forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub header_format: String,
    pub pre_text: String,
    pub post_text: String,
    pub add_extra_line_between_files: bool,
    pub set_max_file_count: bool,
    pub file_count_limit: usize,
    #[serde(rename = "maxFileSizeKB")]
    pub max_file_size_kb: u64,
    pub use_filename_filters: bool,
    pub filename_filters: Vec<String>,
    pub show_copy_notification: bool,
    pub strict_memory_read: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            header_format: format!("// file: {}", FILE_PATH_TOKEN),
            pre_text: String::new(),
            post_text: String::new(),
            add_extra_line_between_files: true,
            set_max_file_count: true,
            file_count_limit: 30,
            max_file_size_kb: 500,
            use_filename_filters: false,
            filename_filters: Vec::new(),
            show_copy_notification: true,
            strict_memory_read: true,
        }
    }
}

impl Settings {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_kb.saturating_mul(1024)
    }

    /// Drops empty filename filters, which would otherwise match every file.
    pub fn normalized(mut self) -> Self {
        let before = self.filename_filters.len();
        self.filename_filters.retain(|filter| !filter.is_empty());
        if self.filename_filters.len() != before {
            warn!(
                "Ignoring {} empty filename filter(s)",
                before - self.filename_filters.len()
            );
        }
        self
    }
}

/// Source of the settings record for one copy run.
pub trait SettingsProvider {
    fn load(&self) -> Result<Settings, CopyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.header_format, "// file: $FILE_PATH");
        assert_eq!(settings.file_count_limit, 30);
        assert_eq!(settings.max_file_size_kb, 500);
        assert!(settings.add_extra_line_between_files);
        assert!(settings.set_max_file_count);
        assert!(settings.show_copy_notification);
        assert!(!settings.use_filename_filters);
        assert!(settings.strict_memory_read);
        assert!(settings.filename_filters.is_empty());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            preText = "START"
            fileCountLimit = 5
            someFutureField = "ignored"
            "#,
        )
        .unwrap();

        assert_eq!(settings.pre_text, "START");
        assert_eq!(settings.file_count_limit, 5);
        assert_eq!(settings.max_file_size_kb, 500);
        assert_eq!(settings.header_format, "// file: $FILE_PATH");
    }

    #[test]
    fn test_max_file_size_key_name() {
        let settings: Settings = toml::from_str("maxFileSizeKB = 2").unwrap();
        assert_eq!(settings.max_file_size_bytes(), 2048);
    }

    #[test]
    fn test_normalized_drops_empty_filters() {
        let settings = Settings {
            filename_filters: vec![".rs".to_string(), String::new(), ".md".to_string()],
            ..Settings::default()
        }
        .normalized();

        assert_eq!(settings.filename_filters, vec![".rs", ".md"]);
    }
}
