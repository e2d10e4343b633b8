//! Observation query built once per run.

use chrono::NaiveDate;

use crate::config::{ConfigError, ConfigResult, QuerySettings};

use super::enums::ObservationStatus;

/// Date format accepted in config and on the command line, and sent to the API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filter for the observations endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationQuery {
    pub satellite_id: u32,
    pub ground_station_id: u32,
    pub status: ObservationStatus,
    pub transmitter_mode: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub limit: u32,
}

impl ObservationQuery {
    /// Build the query from settings, validating the date range.
    ///
    /// Fails with `ConfigError::InvalidDate` on a malformed date and with
    /// `ConfigError::InvalidDateRange` when start is after end.
    pub fn from_settings(settings: &QuerySettings) -> ConfigResult<Self> {
        let start = settings
            .start
            .as_deref()
            .map(|value| parse_date("start", value))
            .transpose()?;
        let end = settings
            .end
            .as_deref()
            .map(|value| parse_date("end", value))
            .transpose()?;

        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(ConfigError::InvalidDateRange {
                    start: start.format(DATE_FORMAT).to_string(),
                    end: end.format(DATE_FORMAT).to_string(),
                });
            }
        }

        Ok(Self {
            satellite_id: settings.satellite_id,
            ground_station_id: settings.ground_station_id,
            status: settings.status,
            transmitter_mode: settings.transmitter_mode.clone(),
            start,
            end,
            limit: settings.limit,
        })
    }

    /// Request parameters in the names the API expects.
    ///
    /// Absent dates are omitted rather than sent empty.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("norad_cat_id", self.satellite_id.to_string()),
            ("ground_station", self.ground_station_id.to_string()),
            ("status", self.status.to_string()),
            ("limit", self.limit.to_string()),
            ("transmitter_mode", self.transmitter_mode.clone()),
        ];

        if let Some(start) = self.start {
            pairs.push(("start", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.end {
            pairs.push(("end", end.format(DATE_FORMAT).to_string()));
        }

        pairs
    }
}

/// Parse a `YYYY-MM-DD` date, naming the field on failure.
pub fn parse_date(field: &'static str, value: &str) -> ConfigResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ConfigError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
