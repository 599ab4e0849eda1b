use flexi_logger::{
    colored_default_format, opt_format, Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError,
    Logger, LoggerHandle, Naming,
};
use std::path::Path;

/// Starts the global logger. `RUST_LOG` wins over `default_level`.
///
/// Without `log_dir` everything goes to stderr; with it, records are written
/// to a rotating file and mirrored to stderr. Keep the returned handle alive
/// for the whole run.
pub fn setup_logging(
    default_level: &str,
    log_dir: Option<&Path>,
) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(default_level)?;
    match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir))
            .format_for_files(opt_format)
            .format_for_stderr(colored_default_format)
            .duplicate_to_stderr(Duplicate::Info)
            .rotate(
                Criterion::Size(10 * 1024 * 1024), // Rotate logs after they reach 10 MB
                Naming::Numbers,
                Cleanup::KeepLogFiles(7),
            )
            .start(),
        None => logger.format(colored_default_format).start(),
    }
}
