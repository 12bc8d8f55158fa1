//! Conversions between decimal hours, absolute minutes, and clock strings.

use crate::config::ClockFormat;

/// Decimal hour of day to minutes past midnight, rounded to the minute.
pub fn hour_to_minutes(hour: f64) -> i32 {
    (hour * 60.0).round() as i32
}

pub fn minutes_to_hour(minutes: i32) -> f64 {
    minutes as f64 / 60.0
}

/// Format minutes past midnight as a clock string, "14:30" or "2:30pm".
pub fn format_minutes(minutes: i32, clock_format: ClockFormat) -> String {
    let minutes = minutes.rem_euclid(24 * 60);
    let hour = (minutes / 60) as u32;
    let min = (minutes % 60) as u32;

    match clock_format {
        ClockFormat::Hour24 => format!("{:02}:{:02}", hour, min),
        ClockFormat::Hour12 => {
            let (h12, ampm) = if hour == 0 {
                (12, "am")
            } else if hour < 12 {
                (hour, "am")
            } else if hour == 12 {
                (12, "pm")
            } else {
                (hour - 12, "pm")
            };
            if min == 0 {
                format!("{}{}", h12, ampm)
            } else {
                format!("{}:{:02}{}", h12, min, ampm)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_hours_round_trip_through_minutes() {
        assert_eq!(hour_to_minutes(9.5), 570);
        assert_eq!(hour_to_minutes(0.25), 15);
        assert_eq!(minutes_to_hour(570), 9.5);
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_minutes(870, ClockFormat::Hour24), "14:30");
        assert_eq!(format_minutes(870, ClockFormat::Hour12), "2:30pm");
        assert_eq!(format_minutes(0, ClockFormat::Hour12), "12am");
        assert_eq!(format_minutes(720, ClockFormat::Hour12), "12pm");
        assert_eq!(format_minutes(540, ClockFormat::Hour12), "9am");
    }
}
