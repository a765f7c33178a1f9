//! Daily activity streak. The state machine lives in the data: "never
//! active" (no last activity), "active today", "active yesterday", and
//! "broken" (a gap of two or more days). Transitions happen only on load
//! and on explicit activity; there is no background rollover.

use std::path::Path;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    #[serde(default)]
    pub current: u32,
    #[serde(default)]
    pub longest: u32,
    #[serde(default)]
    pub last_activity: Option<DateTime<Local>>,
}

impl Streak {
    fn last_day(&self) -> Option<NaiveDate> {
        self.last_activity.map(|t| t.date_naive())
    }

    /// Load-time day-gap check. Activity today or yesterday leaves the
    /// streak alive; any wider gap (including future timestamps from clock
    /// skew) zeroes `current` while `longest` and `last_activity` stay.
    /// Returns true when state changed so the caller persists immediately.
    pub fn reconcile(&mut self, today: NaiveDate) -> bool {
        let Some(last) = self.last_day() else {
            return false;
        };
        let yesterday = today.pred_opt().unwrap_or(today);
        if last == today || last == yesterday {
            return false;
        }
        if self.current == 0 {
            return false;
        }
        self.current = 0;
        true
    }

    /// Record a qualifying activity. At most one increment per calendar
    /// day. The gap check runs here too, so recording without a prior
    /// `reconcile` cannot stretch a broken streak. Returns true when state
    /// changed.
    pub fn record(&mut self, now: DateTime<Local>) -> bool {
        let today = now.date_naive();
        if self.last_day() == Some(today) {
            return false;
        }
        self.reconcile(today);
        self.current += 1;
        self.longest = self.longest.max(self.current);
        self.last_activity = Some(now);
        true
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Streak::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(streak) => Ok(streak),
            Err(e) => {
                warn!(error = %e, "Discarding malformed streak file");
                Ok(Streak::default())
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(year, month, day, 20, 30, 0).unwrap()
    }

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_first_activity_starts_streak() {
        let mut streak = Streak::default();
        assert!(streak.record(at(2026, 3, 10)));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 1);
        assert_eq!(streak.last_day(), Some(day(2026, 3, 10)));
    }

    #[test]
    fn test_same_day_is_noop() {
        let mut streak = Streak::default();
        streak.record(at(2026, 3, 10));
        assert!(!streak.record(at(2026, 3, 10)));
        assert_eq!(streak.current, 1);
    }

    #[test]
    fn test_consecutive_days_extend() {
        let mut streak = Streak::default();
        streak.record(at(2026, 3, 10));
        streak.record(at(2026, 3, 11));
        assert_eq!(streak.current, 2);
        assert_eq!(streak.longest, 2);
    }

    #[test]
    fn test_reconcile_keeps_live_streak() {
        let mut streak = Streak {
            current: 4,
            longest: 6,
            last_activity: Some(at(2026, 3, 10)),
        };
        assert!(!streak.reconcile(day(2026, 3, 10)));
        assert!(!streak.reconcile(day(2026, 3, 11)));
        assert_eq!(streak.current, 4);
    }

    #[test]
    fn test_reconcile_resets_after_gap() {
        let mut streak = Streak {
            current: 4,
            longest: 6,
            last_activity: Some(at(2026, 3, 10)),
        };
        assert!(streak.reconcile(day(2026, 3, 12)));
        assert_eq!(streak.current, 0);
        assert_eq!(streak.longest, 6);
        assert_eq!(streak.last_day(), Some(day(2026, 3, 10)));
    }

    #[test]
    fn test_record_after_gap_restarts_without_reconcile() {
        let mut streak = Streak {
            current: 5,
            longest: 5,
            last_activity: Some(at(2026, 3, 1)),
        };
        // no reconcile first; record guards against the gap itself
        assert!(streak.record(at(2026, 3, 10)));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 5);
    }

    #[test]
    fn test_longest_never_below_current() {
        let mut streak = Streak::default();
        for d in 1..=9 {
            streak.record(at(2026, 3, d));
            assert!(streak.current <= streak.longest);
        }
        assert_eq!(streak.current, 9);
        assert_eq!(streak.longest, 9);
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streak.json");

        let mut streak = Streak::default();
        streak.record(at(2026, 3, 10));
        streak.save_to(&path).unwrap();

        let loaded = Streak::load_from(&path).unwrap();
        assert_eq!(loaded, streak);
    }

    #[test]
    fn test_malformed_file_loads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streak.json");
        std::fs::write(&path, "{not json").unwrap();

        assert_eq!(Streak::load_from(&path).unwrap(), Streak::default());
    }

    #[test]
    fn test_missing_file_loads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert_eq!(Streak::load_from(&path).unwrap(), Streak::default());
    }
}
