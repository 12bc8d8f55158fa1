use anyhow::{bail, Result};
use chrono::{Duration, NaiveDate};

use super::types::{Employee, EmployeeId, ScheduleState, Shift, ShiftId};

/// In-memory roster: the stand-in for the persistence collaborator. The
/// engine never writes here directly; proposals arrive only after the
/// confirmation step accepts them.
#[derive(Debug, Default)]
pub struct RosterStore {
    employees: Vec<Employee>,
    shifts: Vec<Shift>,
    next_shift_id: ShiftId,
}

impl RosterStore {
    /// Seed a small demo roster around `today` so the board is never empty
    /// on first launch.
    pub fn demo(today: NaiveDate) -> Self {
        let employees = vec![
            Employee {
                id: 1,
                name: "Ana Reyes".to_string(),
                job: Some("Server".to_string()),
            },
            Employee {
                id: 2,
                name: "Marcus Webb".to_string(),
                job: Some("Line cook".to_string()),
            },
            Employee {
                id: 3,
                name: "Priya Nair".to_string(),
                job: Some("Host".to_string()),
            },
        ];

        let mut store = Self {
            employees,
            shifts: Vec::new(),
            next_shift_id: 1,
        };

        store.insert_shift(1, today, 10.0, 16.0, Some("Server"), false);
        store.insert_shift(2, today, 12.0, 18.0, Some("Line cook"), false);
        store.insert_shift(3, today, 16.0, 22.0, Some("Host"), false);
        // Approved time-off renders as a blocked placeholder.
        store.insert_shift(2, today + Duration::days(1), 8.0, 22.0, None, true);
        store.insert_shift(1, today + Duration::days(1), 11.0, 17.0, Some("Server"), false);
        store.insert_shift(3, today - Duration::days(1), 9.0, 15.0, Some("Host"), false);

        store
    }

    fn insert_shift(
        &mut self,
        employee_id: EmployeeId,
        date: NaiveDate,
        start_hour: f64,
        end_hour: f64,
        job: Option<&str>,
        is_blocked: bool,
    ) -> ShiftId {
        let id = self.next_shift_id;
        self.next_shift_id += 1;
        self.shifts.push(Shift {
            id,
            employee_id,
            date,
            start_hour,
            end_hour,
            job: job.map(str::to_string),
            location_id: None,
            notes: None,
            schedule_state: ScheduleState::Draft,
            is_blocked,
        });
        id
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn shift(&self, id: ShiftId) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.id == id)
    }

    pub fn shifts_for_day(&self, date: NaiveDate) -> impl Iterator<Item = &Shift> {
        self.shifts.iter().filter(move |s| s.date == date)
    }

    pub fn shifts_for_employee_day(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> impl Iterator<Item = &Shift> {
        self.shifts
            .iter()
            .filter(move |s| s.employee_id == employee_id && s.date == date)
    }

    /// The surrounding app forbids edits to past dates.
    pub fn is_editable_date(date: NaiveDate, today: NaiveDate) -> bool {
        date >= today
    }

    /// Would `[start, end)` minutes overlap an existing non-blocked shift for
    /// this employee and day? Blocked placeholders do not count.
    pub fn overlaps_existing(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        start_minutes: i32,
        end_minutes: i32,
        exclude: Option<ShiftId>,
    ) -> bool {
        self.shifts_for_employee_day(employee_id, date).any(|s| {
            !s.is_blocked
                && Some(s.id) != exclude
                && s.overlaps_minutes(start_minutes, end_minutes)
        })
    }

    pub fn create_shift(
        &mut self,
        employee_id: EmployeeId,
        date: NaiveDate,
        start_hour: f64,
        end_hour: f64,
    ) -> ShiftId {
        self.insert_shift(employee_id, date, start_hour, end_hour, None, false)
    }

    /// Apply a confirmed proposal. Only called after the user accepts the
    /// confirmation dialog.
    pub fn apply_proposal(
        &mut self,
        shift_id: ShiftId,
        date: NaiveDate,
        start_hour: f64,
        end_hour: f64,
    ) -> Result<()> {
        let Some(shift) = self.shifts.iter_mut().find(|s| s.id == shift_id) else {
            bail!("shift {shift_id} no longer exists");
        };
        if shift.is_blocked {
            bail!("shift {shift_id} is blocked");
        }
        shift.date = date;
        shift.start_hour = start_hour;
        shift.end_hour = end_hour;
        Ok(())
    }

    pub fn delete_shift(&mut self, shift_id: ShiftId) {
        self.shifts.retain(|s| s.id != shift_id);
    }

    pub fn update_details(
        &mut self,
        shift_id: ShiftId,
        job: Option<String>,
        notes: Option<String>,
    ) -> Result<()> {
        let Some(shift) = self.shifts.iter_mut().find(|s| s.id == shift_id) else {
            bail!("shift {shift_id} no longer exists");
        };
        shift.job = job;
        shift.notes = notes;
        Ok(())
    }

    pub fn publish_day(&mut self, date: NaiveDate) {
        for shift in self.shifts.iter_mut().filter(|s| s.date == date) {
            shift.schedule_state = ScheduleState::Published;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn overlap_check_ignores_blocked_shifts_and_exclusions() {
        let today = date(2024, 6, 10);
        let store = RosterStore::demo(today);

        // Employee 1 works 10:00-16:00 today.
        assert!(store.overlaps_existing(1, today, 15 * 60, 17 * 60, None));
        assert!(!store.overlaps_existing(1, today, 16 * 60, 18 * 60, None));

        // Excluding the shift itself (a move of that shift) does not
        // self-collide.
        let own_id = store.shifts_for_employee_day(1, today).next().unwrap().id;
        assert!(!store.overlaps_existing(1, today, 15 * 60, 17 * 60, Some(own_id)));

        // Employee 2 is blocked all of tomorrow; blocked placeholders do not
        // reject creates.
        let tomorrow = date(2024, 6, 11);
        assert!(!store.overlaps_existing(2, tomorrow, 9 * 60, 10 * 60, None));
    }

    #[test]
    fn proposals_mutate_only_on_apply() {
        let today = date(2024, 6, 10);
        let mut store = RosterStore::demo(today);
        let id = store.shifts_for_employee_day(1, today).next().unwrap().id;

        store
            .apply_proposal(id, today, 11.0, 17.0)
            .expect("apply should succeed");
        let shift = store.shift(id).unwrap();
        assert_eq!((shift.start_hour, shift.end_hour), (11.0, 17.0));

        assert!(store.apply_proposal(9999, today, 1.0, 2.0).is_err());
    }

    #[test]
    fn past_dates_are_not_editable() {
        let today = date(2024, 6, 10);
        assert!(!RosterStore::is_editable_date(date(2024, 6, 9), today));
        assert!(RosterStore::is_editable_date(today, today));
        assert!(RosterStore::is_editable_date(date(2024, 6, 11), today));
    }
}
