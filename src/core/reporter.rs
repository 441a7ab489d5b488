use crate::domain::models::{Aggregation, Report};
use crate::domain::settings::Settings;

pub fn present(aggregation: Aggregation, settings: &Settings) -> Report {
    let stats = aggregation.stats;

    let warning = aggregation.limit_reached.then(|| {
        format!(
            "File limit reached: the file limit of {} files was reached.",
            settings.file_count_limit
        )
    });

    let summary = settings.show_copy_notification.then(|| {
        let files = match stats.file_count {
            1 => "1 file copied.".to_string(),
            n => format!("{} files copied.", n),
        };
        format!(
            "{}\nTotal characters: {}\nTotal lines: {}\nTotal words: {}\nEstimated tokens: {}",
            files, stats.chars, stats.lines, stats.words, stats.tokens
        )
    });

    Report {
        clipboard_text: aggregation.document,
        summary,
        warning,
        stats,
        limit_reached: aggregation.limit_reached,
    }
}
