//! Time range selection for forecast requests
//!
//! Maps a display mode onto the ledger window it covers and the axis label
//! granularity used when rendering that window's forecast.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Display modes a forecast can be requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "week")]
    ThisWeek,
    #[serde(rename = "month")]
    ThisMonth,
    #[serde(rename = "year")]
    ThisYear,
    #[serde(rename = "all")]
    AllTime,
}

/// Query bounds for one time range. `None` leaves that side of the window
/// open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThisWeek => "week",
            Self::ThisMonth => "month",
            Self::ThisYear => "year",
            Self::AllTime => "all",
        }
    }

    /// Window bounds relative to `today`.
    ///
    /// The week window looks forward (today through today+6, inclusive);
    /// month and year trail behind today with no upper bound.
    pub fn window(&self, today: NaiveDate) -> RangeWindow {
        match self {
            Self::ThisWeek => RangeWindow {
                start: Some(today),
                end: Some(today + Duration::days(6)),
            },
            Self::ThisMonth => RangeWindow {
                start: Some(today - Duration::days(30)),
                end: None,
            },
            Self::ThisYear => RangeWindow {
                start: Some(today - Duration::days(365)),
                end: None,
            },
            Self::AllTime => RangeWindow {
                start: None,
                end: None,
            },
        }
    }

    /// Axis label granularity for this range
    pub fn label_style(&self) -> LabelStyle {
        match self {
            Self::ThisWeek => LabelStyle::Weekday,
            Self::ThisMonth => LabelStyle::DayOfMonth,
            Self::ThisYear => LabelStyle::DayAndMonth,
            Self::AllTime => LabelStyle::FullDate,
        }
    }
}

impl std::str::FromStr for TimeRange {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" | "this-week" | "thisweek" => Ok(Self::ThisWeek),
            "month" | "this-month" | "thismonth" => Ok(Self::ThisMonth),
            "year" | "this-year" | "thisyear" => Ok(Self::ThisYear),
            "all" | "all-time" | "alltime" => Ok(Self::AllTime),
            _ => Err(Error::InvalidRange(s.to_string())),
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Date format used for chart axis labels, one per range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// Abbreviated weekday name ("Mon")
    Weekday,
    /// Day of month ("07")
    DayOfMonth,
    /// Day and abbreviated month ("07 Mar")
    DayAndMonth,
    /// Full date ("07/03/2025")
    FullDate,
}

impl LabelStyle {
    pub fn format(&self, date: NaiveDate) -> String {
        let fmt = match self {
            Self::Weekday => "%a",
            Self::DayOfMonth => "%d",
            Self::DayAndMonth => "%d %b",
            Self::FullDate => "%d/%m/%Y",
        };
        date.format(fmt).to_string()
    }
}
