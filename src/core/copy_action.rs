use crate::core::aggregator::Aggregator;
use crate::core::reporter::present;
use crate::domain::error::CopyError;
use crate::domain::host::Host;
use crate::domain::models::{Entry, Report};
use crate::domain::settings::SettingsProvider;
use log::info;

/// Runs one "copy content of selection" action. Settings are loaded once,
/// after the selection check; nothing is delivered on error.
pub fn copy_selection(
    selection: &[Entry],
    provider: &dyn SettingsProvider,
    host: &Host<'_>,
) -> Result<Report, CopyError> {
    if selection.is_empty() {
        return Err(CopyError::NoSelection);
    }

    let settings = provider.load()?;
    info!("Copying content of {} selected entries", selection.len());

    let aggregation = Aggregator::new(&settings, host).aggregate(selection);
    Ok(present(aggregation, &settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::Settings;
    use crate::infra::editor::OpenBuffers;
    use crate::infra::file_system::SniffingClassifier;
    use std::cell::Cell;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct BrokenStore;

    impl SettingsProvider for BrokenStore {
        fn load(&self) -> Result<Settings, CopyError> {
            Err(CopyError::SettingsUnavailable {
                path: PathBuf::from("settings.toml"),
                reason: "unreadable".to_string(),
            })
        }
    }

    struct CountingStore(Cell<usize>);

    impl SettingsProvider for CountingStore {
        fn load(&self) -> Result<Settings, CopyError> {
            self.0.set(self.0.get() + 1);
            Ok(Settings::default())
        }
    }

    fn host(documents: &OpenBuffers) -> Host<'_> {
        Host {
            classifier: &SniffingClassifier,
            documents,
            project_root: None,
        }
    }

    #[test]
    fn test_empty_selection_is_rejected_before_loading_settings() {
        let documents = OpenBuffers::default();
        let store = CountingStore(Cell::new(0));

        let result = copy_selection(&[], &store, &host(&documents));

        assert!(matches!(result, Err(CopyError::NoSelection)));
        assert_eq!(store.0.get(), 0);
    }

    #[test]
    fn test_settings_failure_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.txt");
        fs::write(&path, "a").unwrap();
        let documents = OpenBuffers::default();

        let result = copy_selection(&[Entry::file(path)], &BrokenStore, &host(&documents));

        assert!(matches!(
            result,
            Err(CopyError::SettingsUnavailable { .. })
        ));
    }

    #[test]
    fn test_copy_selection_reports() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.txt");
        fs::write(&path, "one two").unwrap();
        let documents = OpenBuffers::default();
        let store = CountingStore(Cell::new(0));

        let report = copy_selection(&[Entry::file(path)], &store, &host(&documents)).unwrap();

        assert_eq!(store.0.get(), 1);
        assert_eq!(report.stats.file_count, 1);
        assert!(report.clipboard_text.contains("one two"));
        assert!(report.summary.unwrap().starts_with("1 file copied."));
        assert_eq!(report.warning, None);
    }
}
