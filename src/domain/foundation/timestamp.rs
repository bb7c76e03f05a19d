//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Datelike, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// First instant (00:00:00 UTC on day 1) of this timestamp's calendar month.
    pub fn start_of_month(&self) -> Option<Self> {
        let first = self.0.date_naive().with_day(1)?;
        Some(Self(first.and_hms_opt(0, 0, 0)?.and_utc()))
    }

    /// Last whole second of this timestamp's calendar month.
    pub fn end_of_month(&self) -> Option<Self> {
        let start = self.start_of_month()?;
        let next = start.0.checked_add_months(Months::new(1))?;
        Some(Self(next - Duration::seconds(1)))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
