use std::io::Write;

use env_logger::{Builder, Env, fmt::Color};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::{Level, LevelFilter};
use once_cell::sync::OnceCell;
use thiserror::Error;

/// Environment variable overriding the command line verbosity, e.g. `JACKKNIFE_LOG=jackknife=trace`
pub const LOGGER_ENV_FILTER: &str = "JACKKNIFE_LOG";

const PROGRESS_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

static INSTANCE: OnceCell<Logger> = OnceCell::new();

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Failed to register the global logger")]
    SetLogger(#[from] log::SetLoggerError),

    #[error("Logger was already initialized")]
    AlreadyInitialized,

    #[error("Invalid progress bar template")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),
}

/// Global logger: colored `env_logger` output, bridged with `indicatif` so that log records and
/// progress bars do not overwrite each other.
#[derive(Debug)]
pub struct Logger {
    multi_pg: MultiProgress,
}

impl Logger {
    /// Register the global logger.
    ///
    /// # Errors
    /// - `SetLogger` if another global logger was registered.
    /// - `AlreadyInitialized` if this method was already called.
    pub fn init(verbosity: u8) -> Result<(), LoggerError> {
        let log_level = Self::u8_to_loglevel(verbosity);
        let env = Env::default().filter(LOGGER_ENV_FILTER);

        let logger = Builder::new().filter_level(log_level)
            .format(|buf, record| {
                let is_error  = record.level() == Level::Error;
                let traceback = match is_error {
                    true  => format!("(@ {}:{}) ", record.file().unwrap_or("unknown"), record.line().unwrap_or(0)),
                    false => String::new(),
                };

                let mut arg_style = buf.style();
                arg_style.set_intense(is_error);

                let mut level_style = buf.style();
                let color = match record.level() {
                    Level::Error => Color::Red,
                    Level::Warn  => Color::Yellow,
                    Level::Info  => Color::Green,
                    Level::Debug => Color::Blue,
                    Level::Trace => Color::Cyan
                };
                level_style.set_color(color).set_bold(true);

                writeln!(
                    buf,
                    "[{} {: <5} {}] {traceback}{}",
                    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                    level_style.value(record.level()),
                    record.target(),
                    arg_style.value(record.args())
                )
            })
            .parse_env(env)
            .build();

        // env_logger only filters records. The global max level is handled by `log`.
        let max_level = logger.filter();
        let multi_pg = MultiProgress::new();
        LogWrapper::new(multi_pg.clone(), logger).try_init()?;
        log::set_max_level(max_level);
        INSTANCE.set(Self{multi_pg}).map_err(|_| LoggerError::AlreadyInitialized)
    }

    fn u8_to_loglevel(verbosity: u8) -> LevelFilter {
        match verbosity {
            0            => LevelFilter::Error,
            1            => LevelFilter::Warn,
            2            => LevelFilter::Info,
            3            => LevelFilter::Debug,
            4..= u8::MAX => LevelFilter::Trace
        }
    }

    pub fn set_level(verbosity: u8) {
        log::set_max_level(Self::u8_to_loglevel(verbosity));
    }

    /// Progress bar handler, if the logger was initialized.
    pub fn multi() -> Option<&'static MultiProgress> {
        INSTANCE.get().map(|logger| &logger.multi_pg)
    }

    /// Create a new progress bar of length `len`. The bar is hidden when the logger was not initialized,
    /// or when the log level is below `Info`.
    ///
    /// # Errors
    /// - `ProgressTemplate` if the progress bar style cannot be parsed.
    pub fn progress_bar(len: u64, msg: impl Into<String>) -> Result<ProgressBar, LoggerError> {
        let style = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE)?.progress_chars("=>-");
        let pb = match (Self::multi(), log::max_level() >= LevelFilter::Info) {
            (Some(multi), true) => multi.add(ProgressBar::new(len)),
            _                   => ProgressBar::hidden(),
        };
        pb.set_style(style);
        pb.set_message(msg.into());
        Ok(pb)
    }
}
