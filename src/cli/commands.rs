use crate::core::copy_action::copy_selection;
use crate::domain::error::CopyError;
use crate::domain::host::Host;
use crate::domain::models::Entry;
use crate::domain::settings::SettingsProvider;
use crate::infra::editor::OpenBuffers;
use crate::infra::file_system::{SniffingClassifier, absolutize, to_entry};
use crate::infra::logger::setup_logger;
use crate::infra::output::{NoticeKind, create_writer, deliver, notify};
use crate::infra::settings_store::SettingsStore;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::{debug, info, warn};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "copy-file-content")]
#[command(about = "Copy the content of files and directories to the clipboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,
}

#[derive(Args, Debug)]
pub struct WorkspaceArgs {
    /// Project root that header paths are relative to [default: current directory]
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Key of the settings record [default: name of the project root]
    #[arg(long, global = true)]
    pub project: Option<String>,

    /// Settings file [default: ~/.config/copy-file-content/settings.toml]
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EditorArgs {
    /// Path open in an editor tab
    #[arg(long = "open", value_name = "PATH")]
    pub open: Vec<PathBuf>,

    /// Open path whose in-memory text is read from SNAPSHOT
    #[arg(long = "buffer", value_name = "PATH=SNAPSHOT")]
    pub buffers: Vec<String>,

    /// Cached but closed path whose in-memory text is read from SNAPSHOT
    #[arg(long = "cached", value_name = "PATH=SNAPSHOT")]
    pub cached: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct SinkArgs {
    /// Write to standard output instead of the clipboard
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Write to a file instead of the clipboard
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy the content of the given files and directories
    Copy {
        paths: Vec<PathBuf>,

        #[command(flatten)]
        editor: EditorArgs,

        #[command(flatten)]
        sink: SinkArgs,
    },
    /// Copy the content of every open editor tab
    Tabs {
        #[command(flatten)]
        editor: EditorArgs,

        #[command(flatten)]
        sink: SinkArgs,
    },
    /// Show or edit the project's settings record
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print the effective settings
    Show,
    /// Write a defaults record if the project has none
    Init,
    /// Set one field, e.g. `set fileCountLimit 50`
    Set { key: String, value: String },
}

struct Workspace {
    root: PathBuf,
    store: SettingsStore,
}

impl Workspace {
    fn resolve(args: &WorkspaceArgs) -> anyhow::Result<Self> {
        let root = match &args.root {
            Some(root) => root.clone(),
            None => env::current_dir().context("Failed to get current directory")?,
        };
        let root = absolutize(&root)
            .with_context(|| format!("Invalid project root: {}", root.display()))?;

        let project = match &args.project {
            Some(project) => project.clone(),
            None => root
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "default".to_string()),
        };
        let settings_path = match &args.settings {
            Some(path) => path.clone(),
            None => SettingsStore::default_path()?,
        };
        debug!(
            "Workspace: root={}, project={}, settings={}",
            root.display(),
            project,
            settings_path.display()
        );

        Ok(Self {
            root,
            store: SettingsStore::new(settings_path, project),
        })
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logger(cli.verbose)?;
    let workspace = Workspace::resolve(&cli.workspace)?;

    match cli.command {
        Commands::Copy {
            paths,
            editor,
            sink,
        } => {
            info!("Starting copy command");
            let documents =
                OpenBuffers::from_args(&editor.open, &editor.buffers, &editor.cached)?;
            let selection = resolve_selection(&paths);
            copy_and_deliver(&workspace, &selection, &documents, sink)
        }
        Commands::Tabs { editor, sink } => {
            info!("Starting tabs command");
            let documents =
                OpenBuffers::from_args(&editor.open, &editor.buffers, &editor.cached)?;
            if documents.tabs().is_empty() {
                return notify(NoticeKind::Info, "No open tabs found to copy.");
            }
            let selection = resolve_selection(documents.tabs());
            copy_and_deliver(&workspace, &selection, &documents, sink)
        }
        Commands::Settings { action } => run_settings(&workspace.store, action),
    }
}

/// Turns selected paths into entries, dropping the ones that no longer exist.
fn resolve_selection(paths: &[PathBuf]) -> Vec<Entry> {
    paths
        .iter()
        .filter_map(|path| match to_entry(path) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("{:#}", e);
                None
            }
        })
        .collect()
}

fn copy_and_deliver(
    workspace: &Workspace,
    selection: &[Entry],
    documents: &OpenBuffers,
    sink: SinkArgs,
) -> anyhow::Result<()> {
    let host = Host {
        classifier: &SniffingClassifier,
        documents,
        project_root: Some(workspace.root.as_path()),
    };

    let report = copy_selection(selection, &workspace.store, &host)?;
    info!(
        "Copied {} file(s), limit reached: {}",
        report.stats.file_count, report.limit_reached
    );

    info!("Writing output");
    let writer = create_writer(sink.output, sink.stdout);
    deliver(&report, writer.as_ref())
}

fn run_settings(store: &SettingsStore, action: SettingsAction) -> anyhow::Result<()> {
    debug!("Settings action {:?} for '{}'", action, store.project());
    match action {
        SettingsAction::Show => {
            let settings = store.load()?;
            print!("{}", toml::to_string_pretty(&settings)?);
        }
        SettingsAction::Init => {
            let message = if store.init()? {
                format!("Wrote default settings to {}", store.path().display())
            } else {
                format!(
                    "Settings for '{}' already exist in {}",
                    store.project(),
                    store.path().display()
                )
            };
            notify(NoticeKind::Info, &message)?;
        }
        SettingsAction::Set { key, value } => {
            store.set(&key, &value).map_err(|e| {
                let hint = matches!(e, CopyError::UnknownSetting(_));
                let err = anyhow::Error::new(e);
                if hint {
                    err.context("Valid keys are the camelCase field names shown by `settings show`")
                } else {
                    err
                }
            })?;
            notify(NoticeKind::Info, &format!("{} = {}", key, value))?;
        }
    }
    Ok(())
}
