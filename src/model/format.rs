//! Localized month labels.

use super::month::Month;
use chrono::format::{Item, StrftimeItems};
use chrono::{Days, Locale, NaiveDate, Weekday};
use std::fmt::Write;
use thiserror::Error;

/// Default strftime template for month labels ("June 2024").
pub const DEFAULT_MONTH_TEMPLATE: &str = "%B %Y";

/// Default locale name.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Errors building a [`MonthFormatter`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Locale name not known to chrono.
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    /// Template contains an invalid strftime specifier, or one that needs a
    /// time of day or an offset (`%H`, `%z`).
    #[error("Invalid date template: {0:?}")]
    InvalidTemplate(String),
}

/// Formats months through a strftime template in a given locale.
#[derive(Debug, Clone)]
pub struct MonthFormatter {
    locale: Locale,
    template: String,
}

impl MonthFormatter {
    /// Build a formatter, validating the locale name and the template.
    pub fn new(locale: &str, template: &str) -> Result<Self, FormatError> {
        let locale =
            Locale::try_from(locale).map_err(|_| FormatError::UnknownLocale(locale.to_string()))?;
        if StrftimeItems::new(template).any(|item| matches!(item, Item::Error)) {
            return Err(FormatError::InvalidTemplate(template.to_string()));
        }
        let formatter = Self {
            locale,
            template: template.to_string(),
        };
        // Specifiers that parse can still fail on a bare date.
        if formatter.try_format(Month::containing(NaiveDate::default())).is_none() {
            return Err(FormatError::InvalidTemplate(template.to_string()));
        }
        Ok(formatter)
    }

    /// Format a month label. Falls back to `YYYY-MM` if the template cannot
    /// render a date.
    pub fn format(&self, month: Month) -> String {
        self.try_format(month).unwrap_or_else(|| month.to_string())
    }

    fn try_format(&self, month: Month) -> Option<String> {
        let mut label = String::new();
        write!(
            label,
            "{}",
            month.first_day().format_localized(&self.template, self.locale)
        )
        .ok()?;
        Some(label)
    }

    /// The strftime template in use.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The locale in use.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Two-column weekday abbreviation for grid headers ("Mo", "Di").
    pub fn weekday_label(&self, weekday: Weekday) -> String {
        // 2024-01-01 is a Monday.
        let date = NaiveDate::from_ymd_opt(2024, 1, 1)
            .map(|monday| monday + Days::new(u64::from(weekday.num_days_from_monday())));
        let Some(date) = date else {
            return String::new();
        };
        let mut label = String::new();
        if write!(label, "{}", date.format_localized("%a", self.locale)).is_err() {
            return String::new();
        }
        label.chars().take(2).collect()
    }
}

impl Default for MonthFormatter {
    fn default() -> Self {
        Self {
            locale: Locale::en_US,
            template: DEFAULT_MONTH_TEMPLATE.to_string(),
        }
    }
}
