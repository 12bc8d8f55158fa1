use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::time::hour_to_minutes;

pub type ShiftId = u64;
pub type EmployeeId = u64;
pub type LocationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScheduleState {
    #[default]
    Draft,
    Published,
}

/// A time-blocked schedule entity. Hours are decimal hours of day
/// (`9.5` = 9:30), with `0 <= start < end <= 24` (an end of `24.0` is a
/// block running to midnight).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub start_hour: f64,
    pub end_hour: f64,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub location_id: Option<LocationId>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub schedule_state: ScheduleState,
    /// Non-editable placeholder (approved time-off, org-wide blackout).
    /// Never draggable or resizable.
    #[serde(default)]
    pub is_blocked: bool,
}

impl Shift {
    pub fn start_minutes(&self) -> i32 {
        hour_to_minutes(self.start_hour)
    }

    pub fn end_minutes(&self) -> i32 {
        hour_to_minutes(self.end_hour)
    }

    pub fn duration_minutes(&self) -> i32 {
        self.end_minutes() - self.start_minutes()
    }

    pub fn overlaps_minutes(&self, start: i32, end: i32) -> bool {
        self.start_minutes() < end && start < self.end_minutes()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

/// Per-weekday legal placement range for shifts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub open_hour: f64,
    pub close_hour: f64,
    pub enabled: bool,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open_hour: 8.0,
            close_hour: 22.0,
            enabled: true,
        }
    }
}

/// Business hours for all seven weekdays, Monday first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekHours {
    pub days: [BusinessHours; 7],
}

impl Default for WeekHours {
    fn default() -> Self {
        Self {
            days: [BusinessHours::default(); 7],
        }
    }
}

impl WeekHours {
    pub fn for_weekday(&self, weekday: Weekday) -> Option<&BusinessHours> {
        let hours = &self.days[weekday.num_days_from_monday() as usize];
        hours.enabled.then_some(hours)
    }

    /// `(open_hour, close_hour)` for a date, or `None` when that weekday is
    /// not configured.
    pub fn range_for(&self, date: NaiveDate) -> Option<(f64, f64)> {
        self.for_weekday(date.weekday())
            .map(|h| (h.open_hour, h.close_hour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn shift_overlap_is_half_open() {
        let shift = Shift {
            id: 1,
            employee_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            start_hour: 12.0,
            end_hour: 18.0,
            job: None,
            location_id: None,
            notes: None,
            schedule_state: ScheduleState::Draft,
            is_blocked: false,
        };

        assert!(shift.overlaps_minutes(17 * 60, 19 * 60));
        assert!(!shift.overlaps_minutes(18 * 60, 19 * 60), "touching is not overlapping");
        assert!(!shift.overlaps_minutes(10 * 60, 12 * 60));
    }

    #[test]
    fn disabled_weekdays_have_no_range() {
        let mut hours = WeekHours::default();
        hours.days[6].enabled = false; // Sunday

        let sunday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        let monday = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(hours.range_for(sunday), None);
        assert_eq!(hours.range_for(monday), Some((8.0, 22.0)));
    }
}
