use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

const LOG_LEVEL_ENV: &str = "COPY_CONTENT_LOG_LEVEL";

/// Level used when `COPY_CONTENT_LOG_LEVEL` is unset.
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

pub fn setup_logger(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let level = level_for(verbosity).to_string().to_lowercase();
    let env = env_logger::Env::default().filter_or(LOG_LEVEL_ENV, level);

    Builder::from_env(env)
        .format(|buf, record| {
            let level_color = match record.level() {
                Level::Error => "31", // Red
                Level::Warn => "33",  // Yellow
                Level::Info => "32",  // Green
                Level::Debug => "36", // Cyan
                Level::Trace => "35", // Magenta
            };

            writeln!(
                buf,
                "\x1B[{}m[{}]\x1B[0m [{}] {}",
                level_color,
                record.level(),
                buf.timestamp(),
                record.args()
            )
        })
        .format_timestamp_secs()
        .try_init()
}
