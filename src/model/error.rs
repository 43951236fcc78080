//! Error types for the monthpick application.
//!
//! Errors are defined with `thiserror` and compose via `?` and `From`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`ConfigError`] - Config file discovery, parsing and validation
//!   - [`LoggingError`] - Log file setup
//!   - [`FormatError`] - Unknown locale or bad month template
//!   - [`TuiError`] - Terminal setup, drawing and input failures
//!
//! Picker operations themselves never fail: out-of-range requests are
//! clamped or ignored and logged, so none of these errors arise once the
//! event loop is running except terminal I/O.

use super::format::FormatError;
use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::view::TuiError;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```no_run
/// use monthpick::model::error::AppError;
/// use monthpick::model::MonthFormatter;
///
/// fn build() -> Result<MonthFormatter, AppError> {
///     Ok(MonthFormatter::new("fr_FR", "%B %Y")?)
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized. Fatal at startup.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Month label formatting could not be set up.
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Terminal or TUI rendering error.
    ///
    /// The terminal is restored before the error reaches the user.
    #[error("Terminal error: {0}")]
    Tui(#[from] TuiError),
}
