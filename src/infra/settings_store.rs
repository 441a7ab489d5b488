use crate::domain::error::CopyError;
use crate::domain::settings::{Settings, SettingsProvider};
use anyhow::Context;
use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

/// One TOML document holding a settings table per project.
pub struct SettingsStore {
    path: PathBuf,
    project: String,
}

impl SettingsStore {
    pub fn new(path: PathBuf, project: impl Into<String>) -> Self {
        Self {
            path,
            project: project.into(),
        }
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home
            .join(".config")
            .join("copy-file-content")
            .join("settings.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    fn unavailable(&self, reason: impl ToString) -> CopyError {
        CopyError::SettingsUnavailable {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn read_document(&self) -> Result<Table, CopyError> {
        if !self.path.exists() {
            debug!("No settings file at {}", self.path.display());
            return Ok(Table::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.unavailable(e))?;
        toml::from_str(&content).map_err(|e| self.unavailable(e))
    }

    fn write_document(&self, document: &Table) -> Result<(), CopyError> {
        let write_error = |source: io::Error| CopyError::SettingsWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        let content =
            toml::to_string_pretty(document).map_err(|e| write_error(io::Error::other(e)))?;
        fs::write(&self.path, content).map_err(write_error)
    }

    fn record(&self, document: &Table) -> Result<Option<Table>, CopyError> {
        match document.get(&self.project) {
            None => Ok(None),
            Some(Value::Table(record)) => Ok(Some(record.clone())),
            Some(_) => Err(self.unavailable(format!(
                "record for project '{}' is not a table",
                self.project
            ))),
        }
    }

    fn defaults_record(&self) -> Result<Table, CopyError> {
        match Value::try_from(Settings::default()) {
            Ok(Value::Table(table)) => Ok(table),
            Ok(other) => Err(self.unavailable(format!(
                "default settings encode as {}, not a table",
                other.type_str()
            ))),
            Err(e) => Err(self.unavailable(e)),
        }
    }

    fn decode(&self, record: Table) -> Result<Settings, CopyError> {
        Value::Table(record)
            .try_into::<Settings>()
            .map_err(|e| self.unavailable(e))
    }

    /// Writes a defaults record for the project unless one exists. Returns
    /// whether anything was written.
    pub fn init(&self) -> Result<bool, CopyError> {
        let mut document = self.read_document()?;
        if self.record(&document)?.is_some() {
            return Ok(false);
        }

        document.insert(self.project.clone(), Value::Table(self.defaults_record()?));
        self.write_document(&document)?;
        info!(
            "Wrote default settings for '{}' to {}",
            self.project,
            self.path.display()
        );
        Ok(true)
    }

    /// Sets one camelCase field of the project's record and persists it.
    pub fn set(&self, key: &str, raw: &str) -> Result<Settings, CopyError> {
        let defaults = self.defaults_record()?;
        let template = defaults
            .get(key)
            .ok_or_else(|| CopyError::UnknownSetting(key.to_string()))?;
        let value = parse_value(key, raw, template)?;

        let mut document = self.read_document()?;
        let mut record = self.record(&document)?.unwrap_or_default();
        record.insert(key.to_string(), value);

        let settings = Value::Table(record.clone())
            .try_into::<Settings>()
            .map_err(|e| CopyError::InvalidSettingValue {
                key: key.to_string(),
                value: raw.to_string(),
                reason: e.to_string(),
            })?;

        document.insert(self.project.clone(), Value::Table(record));
        self.write_document(&document)?;
        info!("Set {} = {} for '{}'", key, raw, self.project);
        Ok(settings.normalized())
    }
}

impl SettingsProvider for SettingsStore {
    fn load(&self) -> Result<Settings, CopyError> {
        let document = self.read_document()?;
        let settings = match self.record(&document)? {
            Some(record) => self.decode(record)?,
            None => {
                debug!("No settings record for '{}', using defaults", self.project);
                Settings::default()
            }
        };
        Ok(settings.normalized())
    }
}

fn parse_value(key: &str, raw: &str, template: &Value) -> Result<Value, CopyError> {
    let invalid = |reason: &str| CopyError::InvalidSettingValue {
        key: key.to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    match template {
        Value::Boolean(_) => raw
            .trim()
            .parse::<bool>()
            .map(Value::Boolean)
            .map_err(|_| invalid("expected true or false")),
        Value::Integer(_) => match raw.trim().parse::<i64>() {
            Ok(n) if n >= 0 => Ok(Value::Integer(n)),
            _ => Err(invalid("expected a non-negative integer")),
        },
        Value::Array(_) => Ok(Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect(),
        )),
        _ => Ok(Value::String(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir, project: &str) -> SettingsStore {
        SettingsStore::new(dir.path().join("settings.toml"), project)
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = store(&temp_dir, "demo").load().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_loads_project_record() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("settings.toml"),
            r#"
            [demo]
            headerFormat = "FILE: $FILE_PATH"
            useFilenameFilters = true
            filenameFilters = [".rs", ""]
            unknownField = 1

            [other]
            preText = "other"
            "#,
        )
        .unwrap();

        let settings = store(&temp_dir, "demo").load().unwrap();

        assert_eq!(settings.header_format, "FILE: $FILE_PATH");
        assert!(settings.use_filename_filters);
        assert_eq!(settings.filename_filters, vec![".rs"]);
        assert_eq!(settings.pre_text, "");
        assert_eq!(settings.file_count_limit, 30);
    }

    #[test]
    fn test_unparsable_file_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("settings.toml"), "[demo\nbroken").unwrap();

        let err = store(&temp_dir, "demo").load().unwrap_err();
        assert!(matches!(err, CopyError::SettingsUnavailable { .. }));
    }

    #[test]
    fn test_mistyped_record_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("settings.toml"),
            "[demo]\nfileCountLimit = \"many\"\n",
        )
        .unwrap();

        let err = store(&temp_dir, "demo").load().unwrap_err();
        assert!(matches!(err, CopyError::SettingsUnavailable { .. }));
    }

    #[test]
    fn test_init_preserves_other_projects() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("settings.toml"),
            "[other]\npreText = \"kept\"\n",
        )
        .unwrap();

        let demo = store(&temp_dir, "demo");
        assert!(demo.init().unwrap());
        assert!(!demo.init().unwrap());

        assert_eq!(demo.load().unwrap(), Settings::default());
        assert_eq!(store(&temp_dir, "other").load().unwrap().pre_text, "kept");
    }

    #[test]
    fn test_set_persists_edits() {
        let temp_dir = TempDir::new().unwrap();
        let demo = store(&temp_dir, "demo");

        demo.set("fileCountLimit", "5").unwrap();
        demo.set("strictMemoryRead", "false").unwrap();
        demo.set("filenameFilters", ".rs, .toml").unwrap();
        demo.set("maxFileSizeKB", "64").unwrap();
        let settings = demo.set("preText", "Review these files:").unwrap();

        assert_eq!(settings, demo.load().unwrap());
        assert_eq!(settings.file_count_limit, 5);
        assert!(!settings.strict_memory_read);
        assert_eq!(settings.filename_filters, vec![".rs", ".toml"]);
        assert_eq!(settings.max_file_size_kb, 64);
        assert_eq!(settings.pre_text, "Review these files:");
    }

    #[test]
    fn test_defaults_record_lists_every_field() {
        let temp_dir = TempDir::new().unwrap();
        let defaults = store(&temp_dir, "demo").defaults_record().unwrap();

        assert_eq!(defaults.len(), 11);
        assert_eq!(defaults["maxFileSizeKB"], Value::Integer(500));
        assert_eq!(
            defaults["headerFormat"],
            Value::String("// file: $FILE_PATH".to_string())
        );
        assert!(!temp_dir.path().join("settings.toml").exists());
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let temp_dir = TempDir::new().unwrap();
        let demo = store(&temp_dir, "demo");

        assert!(matches!(
            demo.set("noSuchKey", "1"),
            Err(CopyError::UnknownSetting(_))
        ));
        assert!(matches!(
            demo.set("fileCountLimit", "-3"),
            Err(CopyError::InvalidSettingValue { .. })
        ));
        assert!(matches!(
            demo.set("showCopyNotification", "yes"),
            Err(CopyError::InvalidSettingValue { .. })
        ));
        assert!(!temp_dir.path().join("settings.toml").exists());
    }
}
