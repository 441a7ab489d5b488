use crate::core::content_reader::ContentReader;
use crate::core::path_resolver::resolve;
use crate::core::policy::{has_budget, is_eligible};
use crate::domain::host::Host;
use crate::domain::models::{Aggregation, ContentResult, CopyStats, Entry, EntryKind};
use crate::domain::settings::{FILE_PATH_TOKEN, Settings};
use crate::infra::file_system::walk_files;
use log::{debug, info};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Halt,
}

/// State owned by a single aggregation pass.
struct RunState {
    included_paths: HashSet<String>,
    limit_reached: bool,
    document_parts: Vec<String>,
    stats: CopyStats,
}

impl RunState {
    fn new(pre_text: &str) -> Self {
        Self {
            included_paths: HashSet::new(),
            limit_reached: false,
            document_parts: vec![pre_text.to_string()],
            stats: CopyStats::default(),
        }
    }

    fn embed(&mut self, relative_path: String, text: String, settings: &Settings) {
        self.document_parts
            .push(settings.header_format.replace(FILE_PATH_TOKEN, &relative_path));
        self.stats.record(&text);
        self.stats.file_count += 1;

        let separate = settings.add_extra_line_between_files && !text.is_empty();
        self.document_parts.push(text);
        if separate {
            self.document_parts.push(String::new());
        }
        self.included_paths.insert(relative_path);
    }

    fn finish(mut self, post_text: &str) -> Aggregation {
        self.document_parts.push(post_text.to_string());
        Aggregation {
            document: self.document_parts.join("\n"),
            stats: self.stats,
            limit_reached: self.limit_reached,
        }
    }
}

pub struct Aggregator<'a> {
    settings: &'a Settings,
    reader: ContentReader<'a>,
    project_root: Option<&'a Path>,
}

impl<'a> Aggregator<'a> {
    pub fn new(settings: &'a Settings, host: &Host<'a>) -> Self {
        Self {
            settings,
            reader: ContentReader::new(settings, host.classifier, host.documents),
            project_root: host.project_root,
        }
    }

    pub fn aggregate(&self, selection: &[Entry]) -> Aggregation {
        debug!("Aggregating {} selected entries", selection.len());
        let mut run = RunState::new(&self.settings.pre_text);

        for entry in selection {
            let flow = match entry.kind {
                EntryKind::File => self.visit_file(&entry.path, &mut run),
                EntryKind::Directory => self.visit_directory(&entry.path, &mut run),
            };
            if flow == Flow::Halt {
                break;
            }
        }

        info!(
            "Aggregated {} file(s), {} characters",
            run.stats.file_count, run.stats.chars
        );
        run.finish(&self.settings.post_text)
    }

    fn visit_directory(&self, dir: &Path, run: &mut RunState) -> Flow {
        debug!("Expanding directory: {}", dir.display());
        for child in walk_files(dir) {
            if self.visit_file(&child, run) == Flow::Halt {
                return Flow::Halt;
            }
        }
        Flow::Continue
    }

    fn visit_file(&self, path: &Path, run: &mut RunState) -> Flow {
        let relative_path = resolve(path, self.project_root);

        if run.included_paths.contains(&relative_path) {
            debug!("Skipping already copied file: {}", relative_path);
            return Flow::Continue;
        }
        if !is_eligible(path, self.settings) {
            debug!("Skipping file: {} - no filename filter matches", relative_path);
            return Flow::Continue;
        }
        if !has_budget(run.stats.file_count, self.settings) {
            info!(
                "File limit of {} reached at {}",
                self.settings.file_count_limit, relative_path
            );
            run.limit_reached = true;
            return Flow::Halt;
        }

        match self.reader.read(path) {
            ContentResult::Included(text) => {
                debug!("Adding file {} ({} bytes)", relative_path, text.len());
                run.embed(relative_path, text, self.settings);
            }
            ContentResult::SkippedBinary => debug!("Not copied (binary): {}", relative_path),
            ContentResult::SkippedTooLarge { size } => {
                debug!("Not copied ({} bytes): {}", size, relative_path)
            }
        }
        Flow::Continue
    }
}
