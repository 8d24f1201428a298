//! Logging bootstrap for host binaries.

use flexi_logger::{opt_format, FlexiLoggerError, Logger, LoggerHandle};

/// Initialize logging from the environment, falling back to `default_spec`.
///
/// Keep the returned handle alive for the lifetime of the program; dropping
/// it shuts the logger down.
pub fn setup_logging(default_spec: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(default_spec)?
        .format(opt_format)
        .start()
}
