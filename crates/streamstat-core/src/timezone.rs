//! Timezone used to assign listens to calendar months
//!
//! Export timestamps are UTC, so UTC is the default. Users who want months
//! to follow their wall clock pick a zone explicitly or ask for the
//! system's local one.

use chrono_tz::Tz;
use std::str::FromStr;
use tracing::debug;

use crate::error::{Result, StreamstatError};

/// Configuration for timezone handling
#[derive(Debug, Clone)]
pub struct TimezoneConfig {
    /// The timezone months are computed in
    pub tz: Tz,
    /// Whether the timezone is UTC
    pub is_utc: bool,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            tz: Tz::UTC,
            is_utc: true,
        }
    }
}

impl TimezoneConfig {
    /// Create a new timezone configuration from CLI arguments
    ///
    /// An explicit timezone wins over `use_local`; with neither, UTC.
    pub fn from_cli(timezone_str: Option<&str>, use_local: bool) -> Result<Self> {
        let tz = match timezone_str {
            Some(tz_str) => Tz::from_str(tz_str).map_err(|_| {
                StreamstatError::InvalidTimezone(format!(
                    "'{}'. Use format like 'Europe/Berlin', 'Asia/Tokyo', or 'UTC'",
                    tz_str
                ))
            })?,
            None if use_local => get_local_timezone(),
            None => return Ok(Self::default()),
        };

        Ok(Self {
            tz,
            is_utc: tz == Tz::UTC,
        })
    }

    /// Get the display name for the configured timezone
    pub fn display_name(&self) -> &str {
        if self.is_utc { "UTC" } else { self.tz.name() }
    }
}

/// Detect the system's local timezone
///
/// Checks `TZ` first, then asks the OS. Falls back to UTC.
pub fn get_local_timezone() -> Tz {
    if let Ok(tz_str) = std::env::var("TZ")
        && let Ok(tz) = Tz::from_str(&tz_str)
    {
        debug!("Using timezone from TZ environment variable: {}", tz_str);
        return tz;
    }

    match iana_time_zone::get_timezone() {
        Ok(tz_str) => match Tz::from_str(&tz_str) {
            Ok(tz) => {
                debug!("Using system timezone from iana-time-zone: {}", tz_str);
                tz
            }
            Err(_) => {
                debug!(
                    "Could not parse timezone from iana-time-zone: '{}', falling back to UTC",
                    tz_str
                );
                Tz::UTC
            }
        },
        Err(e) => {
            debug!(
                "Could not detect local timezone via iana-time-zone: {:?}, falling back to UTC",
                e
            );
            Tz::UTC
        }
    }
}
