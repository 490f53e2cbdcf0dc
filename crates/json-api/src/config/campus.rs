//! Campus Config

use clap::Args;
use jiff::tz::TimeZone;

use crate::config::ConfigError;

/// Campus calendar settings.
#[derive(Debug, Args)]
pub struct CampusConfig {
    /// IANA time zone whose calendar day bounds "today" (defaults to the system zone)
    #[arg(long, env = "CAMPUS_TIME_ZONE")]
    pub campus_time_zone: Option<String>,
}

impl CampusConfig {
    pub(crate) fn time_zone(&self) -> Result<TimeZone, ConfigError> {
        match self.campus_time_zone.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => TimeZone::get(name).map_err(ConfigError::TimeZone),
            _ => Ok(TimeZone::system()),
        }
    }
}
