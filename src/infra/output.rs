use crate::domain::models::Report;
use crossterm::{
    ExecutableCommand,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub trait OutputWriter {
    fn write(&self, content: &str) -> anyhow::Result<()>;
}

pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl OutputWriter for FileWriter {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        debug!("Writing output to file: {}", self.path.display());
        fs::write(&self.path, content)?;
        info!("Output written to file: {}", self.path.display());
        Ok(())
    }
}

/// Writes the document to stdout exactly as it would land on the clipboard.
pub struct ConsoleWriter;

impl ConsoleWriter {
    fn write_to(out: &mut impl Write, content: &str) -> io::Result<()> {
        out.write_all(content.as_bytes())?;
        out.flush()
    }
}

impl OutputWriter for ConsoleWriter {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        debug!("Writing output to console");
        Self::write_to(&mut io::stdout().lock(), content)?;
        Ok(())
    }
}

pub struct ClipboardWriter;

#[cfg(feature = "clipboard-support")]
impl OutputWriter for ClipboardWriter {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        use clipboard::{ClipboardContext, ClipboardProvider};

        debug!("Writing output to clipboard");
        let mut ctx = ClipboardContext::new()
            .map_err(|e| anyhow::anyhow!("Failed to access clipboard: {}", e))?;
        ctx.set_contents(content.to_owned())
            .map_err(|e| anyhow::anyhow!("Failed to copy to clipboard: {}", e))?;
        info!("Output copied to clipboard (size: {} bytes)", content.len());
        Ok(())
    }
}

#[cfg(not(feature = "clipboard-support"))]
impl OutputWriter for ClipboardWriter {
    fn write(&self, _content: &str) -> anyhow::Result<()> {
        anyhow::bail!("Built without clipboard support; use --stdout or --output")
    }
}

pub fn create_writer(output_path: Option<PathBuf>, to_stdout: bool) -> Box<dyn OutputWriter> {
    match output_path {
        Some(path) => Box::new(FileWriter::new(path)),
        None if to_stdout => Box::new(ConsoleWriter),
        None => Box::new(ClipboardWriter),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Summary,
    Warning,
}

/// Prints a user-facing notice on stderr so stdout stays reserved for content.
pub fn notify(kind: NoticeKind, message: &str) -> anyhow::Result<()> {
    let color = match kind {
        NoticeKind::Info => Color::Cyan,
        NoticeKind::Summary => Color::Green,
        NoticeKind::Warning => Color::Yellow,
    };

    let mut stderr = io::stderr();
    stderr.execute(SetForegroundColor(color))?;
    writeln!(stderr, "{}", message)?;
    stderr.execute(ResetColor)?;
    Ok(())
}

/// Writes the clipboard text, then the warning and summary notices.
pub fn deliver(report: &Report, writer: &dyn OutputWriter) -> anyhow::Result<()> {
    writer.write(&report.clipboard_text)?;

    if let Some(warning) = &report.warning {
        notify(NoticeKind::Warning, warning)?;
    }
    if let Some(summary) = &report.summary {
        notify(NoticeKind::Summary, summary)?;
    }
    Ok(())
}
