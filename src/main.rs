//! monthpick - Entry Point

use chrono::{NaiveDate, Weekday};
use clap::Parser;
use monthpick::model::PickerMode;
use std::path::PathBuf;
use tracing::info;

/// monthpick - terminal month strip and day-grid date picker
#[derive(Parser, Debug)]
#[command(name = "monthpick")]
#[command(version)]
#[command(about = "Terminal month strip and paging day-grid date picker")]
pub struct Args {
    /// Surfaces to show
    #[arg(short, long, value_enum)]
    pub mode: Option<PickerMode>,

    /// Earliest selectable date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Latest selectable date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Date whose month is shown at startup (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Locale for month and weekday names (e.g. en_US, de_DE)
    #[arg(long)]
    pub locale: Option<String>,

    /// First day of the week (mon, sun, ...)
    #[arg(long)]
    pub week_start: Option<Weekday>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> monthpick::config::CliOverrides {
        monthpick::config::CliOverrides {
            mode: self.mode,
            start_date: self.start,
            end_date: self.end,
            locale: self.locale.clone(),
            week_start: self.week_start,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = monthpick::config::load_config_with_precedence(args.config.clone())?;
        let merged = monthpick::config::merge_config(config_file)?;
        let with_env = monthpick::config::apply_env_overrides(merged);
        monthpick::config::apply_cli_overrides(with_env, args.overrides())
    };

    monthpick::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    monthpick::view::run(monthpick::view::CliArgs {
        config,
        initial_date: args.date,
        no_color: args.no_color,
    })?;

    Ok(())
}
