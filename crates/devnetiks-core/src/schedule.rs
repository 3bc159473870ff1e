//! Next-run computation for recurring background jobs (reminders, overdue
//! sweeps) from a small frequency + interval rule.

use chrono::{DateTime, Days, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

/// `every <interval> <freq>`; the interval defaults to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScheduleRule {
    pub freq: Frequency,
    #[serde(default)]
    pub interval: Option<u32>,
}

impl ScheduleRule {
    pub fn every(freq: Frequency) -> Self {
        ScheduleRule {
            freq,
            interval: None,
        }
    }

    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Steps per run. Zero is treated as 1 so a schedule always advances.
    pub fn step(&self) -> u32 {
        self.interval.unwrap_or(1).max(1)
    }
}

/// When a job last run (or anchored) at `from` should run next.
///
/// Monthly steps clamp to the end of shorter months. `None` past chrono's
/// range.
pub fn next_run(from: DateTime<Utc>, rule: &ScheduleRule) -> Option<DateTime<Utc>> {
    let n = rule.step();
    match rule.freq {
        Frequency::Minutely => from.checked_add_signed(Duration::minutes(i64::from(n))),
        Frequency::Hourly => from.checked_add_signed(Duration::hours(i64::from(n))),
        Frequency::Daily => from.checked_add_days(Days::new(u64::from(n))),
        Frequency::Weekly => from.checked_add_days(Days::new(u64::from(n) * 7)),
        Frequency::Monthly => from.checked_add_months(Months::new(n)),
    }
}
