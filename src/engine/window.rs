//! Continuous-mode window state: a 3-day span anchored around the last
//! explicitly navigated-to date.
//!
//! Incidental scrolling may slide the displayed day one day either side of
//! the anchor, but only an explicit jump (`reanchor`) moves the anchor
//! itself, so small scrolls cannot teleport the window.

use chrono::{Duration, NaiveDate};

use super::mapper::{TimelineMapper, CONTINUOUS_PX_PER_HOUR};

/// A horizontal scroll target for the presentation layer, in axis pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub scroll_x: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct WindowState {
    window_start: NaiveDate,
    anchor: NaiveDate,
    displayed: NaiveDate,
}

impl WindowState {
    /// Entering continuous mode re-anchors on the selected date and recenters.
    pub fn enter(selected: NaiveDate, viewport_px: f32, open_hour: Option<f64>) -> (Self, ScrollCommand) {
        let mut state = Self {
            window_start: selected - Duration::days(1),
            anchor: selected,
            displayed: selected,
        };
        let cmd = state.recenter(selected, viewport_px, open_hour);
        (state, cmd)
    }

    pub fn window_start(&self) -> NaiveDate {
        self.window_start
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// The date under the viewport center, used only for the header label.
    pub fn displayed(&self) -> NaiveDate {
        self.displayed
    }

    pub fn mapper(&self) -> TimelineMapper {
        TimelineMapper::continuous(self.window_start)
    }

    /// Navigate to `target`. Without `reanchor` the target is clamped to one
    /// day either side of the anchor; with it the anchor moves first and no
    /// clamp applies (explicit jumps are never blocked by a stale clamp).
    pub fn go_to_date(
        &mut self,
        target: NaiveDate,
        reanchor: bool,
        viewport_px: f32,
        open_hour: Option<f64>,
    ) -> ScrollCommand {
        let target = if reanchor {
            self.anchor = target;
            target
        } else {
            target.clamp(self.anchor - Duration::days(1), self.anchor + Duration::days(1))
        };
        self.recenter(target, viewport_px, open_hour)
    }

    /// Rebuild the window as `[target - 1, target, target + 1]` and compute
    /// the scroll offset that centers the target day at a business-hours
    /// aware hour.
    fn recenter(
        &mut self,
        target: NaiveDate,
        viewport_px: f32,
        open_hour: Option<f64>,
    ) -> ScrollCommand {
        self.window_start = target - Duration::days(1);
        self.displayed = target;

        let center_hour = open_hour.map(|open| open + 2.0).unwrap_or(12.0);
        let mapper = self.mapper();
        let center_px = mapper
            .time_to_offset(target, center_hour)
            .unwrap_or_else(|| mapper.total_width() / 2.0);

        let scrollable = (mapper.total_width() - viewport_px).max(0.0);
        ScrollCommand {
            scroll_x: (center_px - viewport_px / 2.0).clamp(0.0, scrollable),
        }
    }

    /// Re-derive the header date from the current scroll position: the day
    /// whose 24-hour span contains the pixel under the viewport center.
    /// Callers coalesce this to once per frame.
    pub fn update_displayed(&mut self, scroll_x: f32, viewport_px: f32) -> NaiveDate {
        let center = scroll_x + viewport_px / 2.0;
        let day = (center / (24.0 * CONTINUOUS_PX_PER_HOUR)).floor() as i64;
        self.displayed = self.window_start + Duration::days(day.clamp(0, 2));
        self.displayed
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
    fn window_always_starts_one_day_before_anchor_on_entry() {
        let (state, _) = WindowState::enter(date(2024, 6, 10), 1200.0, None);
        assert_eq!(state.window_start(), date(2024, 6, 9));
        assert_eq!(state.anchor(), date(2024, 6, 10));
        assert_eq!(state.displayed(), date(2024, 6, 10));
    }

    #[test]
    fn navigation_without_reanchor_is_clamped_to_anchor_neighbourhood() {
        let (mut state, _) = WindowState::enter(date(2024, 6, 10), 1200.0, None);

        state.go_to_date(date(2024, 6, 20), false, 1200.0, None);
        assert_eq!(state.displayed(), date(2024, 6, 11));
        assert_eq!(state.window_start(), date(2024, 6, 10));
        assert_eq!(state.anchor(), date(2024, 6, 10));
    }

    #[test]
    fn reanchor_jumps_unclamped() {
        let (mut state, _) = WindowState::enter(date(2024, 6, 10), 1200.0, None);

        state.go_to_date(date(2024, 6, 20), true, 1200.0, None);
        assert_eq!(state.anchor(), date(2024, 6, 20));
        assert_eq!(state.window_start(), date(2024, 6, 19));
        assert_eq!(state.displayed(), date(2024, 6, 20));
    }

    #[test]
    fn non_reanchoring_navigation_keeps_window_near_anchor() {
        let (mut state, _) = WindowState::enter(date(2024, 6, 10), 1200.0, None);

        for offset in [-30i64, -1, 0, 1, 5, 400] {
            state.go_to_date(date(2024, 6, 10) + Duration::days(offset), false, 1200.0, None);
            let drift = (state.window_start() + Duration::days(1) - state.anchor())
                .num_days()
                .abs();
            assert!(drift <= 1, "offset {offset} drifted {drift} days");
        }
    }

    #[test]
    fn recenter_scroll_targets_business_hours_center() {
        let (_, cmd) = WindowState::enter(date(2024, 6, 10), 1200.0, Some(10.0));
        // Target day is the middle day: (24 + 12) hours at the fixed scale,
        // minus half the viewport.
        let expected = (24.0 + 12.0) * CONTINUOUS_PX_PER_HOUR - 600.0;
        assert!((cmd.scroll_x - expected).abs() < 0.5);
    }

    #[test]
    fn recenter_scroll_is_clamped_to_scrollable_range() {
        // Viewport wider than the whole window: no scrolling possible.
        let (_, cmd) = WindowState::enter(date(2024, 6, 10), 10_000.0, None);
        assert_eq!(cmd.scroll_x, 0.0);
    }

    #[test]
    fn displayed_follows_scroll_center() {
        let (mut state, _) = WindowState::enter(date(2024, 6, 10), 1200.0, None);

        let day_px = 24.0 * CONTINUOUS_PX_PER_HOUR;
        state.update_displayed(0.0, 1200.0);
        assert_eq!(state.displayed(), date(2024, 6, 9));

        state.update_displayed(day_px + 100.0, 1200.0);
        assert_eq!(state.displayed(), date(2024, 6, 10));

        state.update_displayed(day_px * 2.0 + 100.0, 1200.0);
        assert_eq!(state.displayed(), date(2024, 6, 11));
    }
}
