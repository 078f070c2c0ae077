use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

pub const MINUTES_PER_DAY: u16 = 1440;

/// One recurring weekly open period. Weekdays run 1 = Monday .. 7 = Sunday.
/// `end_minute <= start_minute` means the period runs past midnight into the
/// following weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyInterval {
    pub weekday: u8,
    pub start_minute: u16,
    pub end_minute: u16,
}

impl WeeklyInterval {
    pub fn crosses_midnight(&self) -> bool {
        self.end_minute <= self.start_minute
    }

    /// Range check applied at ingestion; the schedule functions themselves
    /// assume in-range fields.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=7).contains(&self.weekday) {
            return Err(format!("weekday must be 1-7, got {}", self.weekday));
        }
        if self.start_minute >= MINUTES_PER_DAY {
            return Err(format!(
                "start_minute must be 0-1439, got {}",
                self.start_minute
            ));
        }
        if self.end_minute >= MINUTES_PER_DAY {
            return Err(format!("end_minute must be 0-1439, got {}", self.end_minute));
        }
        Ok(())
    }
}

/// Weekdays sharing one exact (start, end) pair, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalGroup {
    pub days: Vec<u8>,
    pub start_minute: u16,
    pub end_minute: u16,
}

/// A wall-clock moment decomposed into the schedule engine's terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalMoment {
    pub weekday: u8,
    pub minute: u16,
}

impl LocalMoment {
    pub fn new(weekday: u8, minute: u16) -> Self {
        Self { weekday, minute }
    }

    /// Decompose a local datetime. `number_from_monday` already yields the
    /// 1 = Monday .. 7 = Sunday convention used throughout the engine.
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self {
            weekday: dt.weekday().number_from_monday() as u8,
            minute: (dt.hour() * 60 + dt.minute()) as u16,
        }
    }
}
