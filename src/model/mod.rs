//! Domain model types (pure).
//!
//! Calendar months, the bounded/extendable month window, localized labels,
//! key actions, surface modes and the application error taxonomy.

pub mod date_range;
pub mod error;
pub mod format;
pub mod key_action;
pub mod mode;
pub mod month;

// Re-export for convenience
pub use date_range::{DateRange, Direction};
pub use error::AppError;
pub use format::{FormatError, MonthFormatter, DEFAULT_LOCALE, DEFAULT_MONTH_TEMPLATE};
pub use key_action::KeyAction;
pub use mode::PickerMode;
pub use month::Month;
