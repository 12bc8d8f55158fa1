//! Provisional "add slot" computation for the pointer's hover position.
//!
//! The create gesture resolves against this candidate rather than recomputing
//! its own, so what the hover preview shows is exactly what a click creates.

use chrono::NaiveDate;

use crate::roster::EmployeeId;

use super::snap::snap;

/// New slots default to one hour.
pub const GHOST_DURATION_MINUTES: i32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    /// Touch uses tap-to-create; no hover ghost.
    Touch,
}

/// The slot a create gesture would produce, minutes past midnight of `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostSlot {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub start_minutes: i32,
    pub end_minutes: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct GhostInput {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    /// Minutes past midnight under the pointer.
    pub hovered_minutes: i32,
    pub pointer: PointerKind,
    pub drag_active: bool,
    pub today: NaiveDate,
    /// Business hours for the hovered weekday, if configured.
    pub hours: Option<(f64, f64)>,
    pub snap_minutes: i32,
}

/// Compute the hover ghost: the hovered minute centered in a one-hour slot,
/// snapped, then clamped into business hours. `None` means no candidate.
pub fn ghost_slot(input: &GhostInput) -> Option<GhostSlot> {
    if input.drag_active || input.pointer == PointerKind::Touch || input.date < input.today {
        return None;
    }
    let (open_hour, close_hour) = input.hours?;

    let open = (open_hour * 60.0).round() as i32;
    let close = (close_hour * 60.0).round() as i32;
    if close - open < GHOST_DURATION_MINUTES {
        return None;
    }

    let centered = snap(
        input.hovered_minutes - GHOST_DURATION_MINUTES / 2,
        input.snap_minutes,
    );
    let start = centered.clamp(open, close - GHOST_DURATION_MINUTES);

    Some(GhostSlot {
        employee_id: input.employee_id,
        date: input.date,
        start_minutes: start,
        end_minutes: start + GHOST_DURATION_MINUTES,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(hovered_minutes: i32) -> GhostInput {
        GhostInput {
            employee_id: 1,
            date: date(2024, 6, 10),
            hovered_minutes,
            pointer: PointerKind::Mouse,
            drag_active: false,
            today: date(2024, 6, 10),
            hours: Some((10.0, 23.0)),
            snap_minutes: 15,
        }
    }

    #[test]
    fn slot_is_centered_on_the_hovered_minute_and_snapped() {
        // 10:42 hovered: centered at 10:12, snapped to 10:15.
        let slot = ghost_slot(&input(642)).unwrap();
        assert_eq!(slot.start_minutes, 615);
        assert_eq!(slot.end_minutes, 675);
    }

    #[test]
    fn slot_clamps_into_business_hours() {
        // Hovering right at open: cannot start before 10:00.
        let slot = ghost_slot(&input(600)).unwrap();
        assert_eq!(slot.start_minutes, 600);

        // Hovering at close: slot ends exactly at 23:00.
        let slot = ghost_slot(&input(23 * 60)).unwrap();
        assert_eq!(slot.start_minutes, 22 * 60);
        assert_eq!(slot.end_minutes, 23 * 60);
    }

    #[test]
    fn no_candidate_outside_the_rules() {
        let mut touch = input(700);
        touch.pointer = PointerKind::Touch;
        assert_eq!(ghost_slot(&touch), None);

        let mut dragging = input(700);
        dragging.drag_active = true;
        assert_eq!(ghost_slot(&dragging), None);

        let mut past = input(700);
        past.date = date(2024, 6, 9);
        assert_eq!(ghost_slot(&past), None);

        let mut closed = input(700);
        closed.hours = None;
        assert_eq!(ghost_slot(&closed), None);

        let mut narrow = input(700);
        narrow.hours = Some((10.0, 10.5));
        assert_eq!(ghost_slot(&narrow), None);
    }
}
