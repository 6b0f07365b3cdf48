use std::path::Path;

use chrono::{DateTime, Utc};
use clap::Args;
use serde::de::DeserializeOwned;
use studyflow_core::{Config, SchedulingOptions};

/// Per-invocation overrides of the configured scheduling defaults.
#[derive(Args)]
pub struct OptionOverrides {
    /// First hour of the daily study window (0-23)
    #[arg(long)]
    pub start_hour: Option<u32>,
    /// Hour the daily study window closes (0-23)
    #[arg(long)]
    pub end_hour: Option<u32>,
    /// Target session length in minutes
    #[arg(long)]
    pub session: Option<i64>,
    /// Break buffer in minutes
    #[arg(long = "break")]
    pub break_minutes: Option<i64>,
    /// Horizon length in days
    #[arg(long)]
    pub days: Option<u32>,
}

/// Configured defaults with CLI overrides applied on top.
pub fn resolve_options(overrides: &OptionOverrides) -> SchedulingOptions {
    let mut options = Config::load_or_default().scheduling;

    if let Some(hour) = overrides.start_hour {
        options.preferred_start_hour = hour;
    }
    if let Some(hour) = overrides.end_hour {
        options.preferred_end_hour = hour;
    }
    if let Some(minutes) = overrides.session {
        options.session_minutes = minutes;
    }
    if let Some(minutes) = overrides.break_minutes {
        options.break_minutes = minutes;
    }
    if let Some(days) = overrides.days {
        options.days_ahead = days;
    }

    options
}

/// Read a JSON value from a file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Parse an RFC 3339 horizon start, defaulting to now.
pub fn parse_horizon_start(from: Option<&str>) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    match from {
        Some(text) => Ok(DateTime::parse_from_rfc3339(text)?.with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}
