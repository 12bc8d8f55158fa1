//! Mapping between wall-clock time and a 1-D pixel offset.
//!
//! Two axis shapes exist: a single day stretched to the viewport width
//! (business hours decide how many hours share that width) and the
//! continuous 3-day window drawn at a fixed scale so three full days always
//! occupy a predictable span regardless of viewport size.

use chrono::{Duration, NaiveDate};

use super::snap::{DAY_MINUTES, WINDOW_DAYS};

/// Fixed horizontal scale for the continuous window.
pub const CONTINUOUS_PX_PER_HOUR: f32 = 60.0;

#[derive(Debug, Clone, Copy)]
pub enum AxisMode {
    SingleDay {
        date: NaiveDate,
        viewport_px: f32,
        open_hour: f64,
        close_hour: f64,
    },
    Continuous {
        window_start: NaiveDate,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct TimelineMapper {
    mode: AxisMode,
}

impl TimelineMapper {
    /// Single-day axis. `hours` is the business-hours range for the displayed
    /// weekday; without one the full 24 h are mapped to the viewport.
    pub fn single_day(date: NaiveDate, viewport_px: f32, hours: Option<(f64, f64)>) -> Self {
        let (open_hour, close_hour) = hours.unwrap_or((0.0, 24.0));
        Self {
            mode: AxisMode::SingleDay {
                date,
                viewport_px,
                open_hour,
                close_hour,
            },
        }
    }

    pub fn continuous(window_start: NaiveDate) -> Self {
        Self {
            mode: AxisMode::Continuous { window_start },
        }
    }

    pub fn mode(&self) -> &AxisMode {
        &self.mode
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self.mode, AxisMode::Continuous { .. })
    }

    pub fn px_per_hour(&self) -> f32 {
        match self.mode {
            AxisMode::SingleDay {
                viewport_px,
                open_hour,
                close_hour,
                ..
            } => viewport_px / (close_hour - open_hour).max(1.0) as f32,
            AxisMode::Continuous { .. } => CONTINUOUS_PX_PER_HOUR,
        }
    }

    pub fn total_width(&self) -> f32 {
        match self.mode {
            AxisMode::SingleDay { viewport_px, .. } => viewport_px,
            AxisMode::Continuous { .. } => {
                (WINDOW_DAYS * 24) as f32 * CONTINUOUS_PX_PER_HOUR
            }
        }
    }

    /// Axis bounds in axis minutes: the legal range for clamped gestures.
    pub fn bounds_minutes(&self) -> (i32, i32) {
        match self.mode {
            AxisMode::SingleDay {
                open_hour,
                close_hour,
                ..
            } => (
                (open_hour * 60.0).round() as i32,
                (close_hour * 60.0).round() as i32,
            ),
            AxisMode::Continuous { .. } => (0, WINDOW_DAYS * DAY_MINUTES),
        }
    }

    /// Convert a calendar time to a pixel offset. Out-of-window dates are not
    /// representable and return `None`; hours are clamped into the axis
    /// domain first.
    pub fn time_to_offset(&self, date: NaiveDate, hour: f64) -> Option<f32> {
        Some(self.minutes_to_offset(self.axis_minutes(date, hour)?))
    }

    /// Inverse of [`time_to_offset`]: a pixel offset back to `(date, hour)`.
    pub fn offset_to_time(&self, px: f32) -> Option<(NaiveDate, f64)> {
        let minutes = self.offset_to_minutes(px)?;
        let (date, in_day) = self.split_minutes(minutes);
        Some((date, in_day as f64 / 60.0))
    }

    /// Calendar time to axis minutes (minutes from midnight in single-day
    /// mode, minutes from the window start in continuous mode).
    pub fn axis_minutes(&self, date: NaiveDate, hour: f64) -> Option<i32> {
        match self.mode {
            AxisMode::SingleDay {
                date: day,
                open_hour,
                close_hour,
                ..
            } => {
                if date != day {
                    return None;
                }
                let clamped = hour.clamp(open_hour, close_hour);
                Some((clamped * 60.0).round() as i32)
            }
            AxisMode::Continuous { window_start } => {
                let day_index = (date - window_start).num_days();
                if !(0..WINDOW_DAYS as i64).contains(&day_index) {
                    return None;
                }
                let clamped = hour.clamp(0.0, 24.0);
                Some(day_index as i32 * DAY_MINUTES + (clamped * 60.0).round() as i32)
            }
        }
    }

    /// Pixel offset to axis minutes, clamped into the axis domain.
    pub fn offset_to_minutes(&self, px: f32) -> Option<i32> {
        let pph = self.px_per_hour();
        match self.mode {
            AxisMode::SingleDay {
                viewport_px,
                open_hour,
                ..
            } => {
                if !px.is_finite() {
                    return None;
                }
                let clamped = px.clamp(0.0, viewport_px);
                Some((open_hour * 60.0 + (clamped / pph) as f64 * 60.0).round() as i32)
            }
            AxisMode::Continuous { .. } => {
                if !px.is_finite() {
                    return None;
                }
                let clamped = px.clamp(0.0, self.total_width());
                Some(((clamped / pph) as f64 * 60.0).round() as i32)
            }
        }
    }

    pub fn minutes_to_offset(&self, minutes: i32) -> f32 {
        let pph = self.px_per_hour();
        match self.mode {
            AxisMode::SingleDay { open_hour, .. } => {
                (minutes as f32 - (open_hour * 60.0) as f32) / 60.0 * pph
            }
            AxisMode::Continuous { .. } => minutes as f32 / 60.0 * pph,
        }
    }

    /// Axis minutes to the calendar day they fall in plus minutes past that
    /// day's midnight.
    pub fn split_minutes(&self, minutes: i32) -> (NaiveDate, i32) {
        match self.mode {
            AxisMode::SingleDay { date, .. } => (date, minutes.clamp(0, DAY_MINUTES)),
            AxisMode::Continuous { window_start } => {
                let day = minutes
                    .div_euclid(DAY_MINUTES)
                    .clamp(0, WINDOW_DAYS - 1);
                (
                    window_start + Duration::days(day as i64),
                    minutes - day * DAY_MINUTES,
                )
            }
        }
    }

    /// Window-relative day index for a date, continuous mode only.
    pub fn day_index(&self, date: NaiveDate) -> Option<i32> {
        match self.mode {
            AxisMode::SingleDay { .. } => None,
            AxisMode::Continuous { window_start } => {
                let idx = (date - window_start).num_days();
                (0..WINDOW_DAYS as i64).contains(&idx).then_some(idx as i32)
            }
        }
    }
}
