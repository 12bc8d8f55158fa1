//! Pure snapping and clamping over absolute minutes.
//!
//! Move and resize gestures both funnel through these functions, so the
//! minimum-duration and containment rules hold no matter which gesture
//! produced a candidate range.

pub const SNAP_MINUTES: i32 = 15;
pub const MIN_DURATION_MINUTES: i32 = 15;

/// Minutes per day; the continuous window spans three of these.
pub const DAY_MINUTES: i32 = 24 * 60;
pub const WINDOW_DAYS: i32 = 3;

/// Which edge of a block a resize gesture is dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
}

/// Round `minutes` to the nearest multiple of `grid`. Half-way values round up.
pub fn snap(minutes: i32, grid: i32) -> i32 {
    debug_assert!(grid > 0);
    (minutes + grid / 2).div_euclid(grid) * grid
}

/// Clamp a moved range into `[min_bound, max_bound]`, preserving duration
/// where possible. If the window is narrower than the duration, the range is
/// squeezed but never below `min_duration`.
pub fn clamp_move(
    start: i32,
    end: i32,
    min_bound: i32,
    max_bound: i32,
    min_duration: i32,
) -> (i32, i32) {
    let (mut s, mut e) = (start, end);

    if s < min_bound {
        e += min_bound - s;
        s = min_bound;
    }
    if e > max_bound {
        s -= e - max_bound;
        e = max_bound;
    }
    // Shifting an over-long range back can overshoot the opposite bound;
    // squeeze it into the window instead of letting it escape.
    s = s.max(min_bound);
    e = e.min(max_bound);
    if e - s < min_duration {
        e = (s + min_duration).min(max_bound);
        s = (e - min_duration).max(min_bound);
    }

    (s, e)
}

/// Clamp a resized range. Only the dragged edge moves freely; the opposite
/// edge is held fixed unless the minimum duration would push it.
pub fn clamp_resize(
    start: i32,
    end: i32,
    min_bound: i32,
    max_bound: i32,
    edge: ResizeEdge,
    min_duration: i32,
) -> (i32, i32) {
    let (mut s, mut e) = (start, end);

    match edge {
        ResizeEdge::Left => {
            s = s.max(min_bound).min(e - min_duration);
            if e - s < min_duration {
                e = (s + min_duration).min(max_bound);
            }
        }
        ResizeEdge::Right => {
            e = e.min(max_bound).max(s + min_duration);
            if e - s < min_duration {
                s = (e - min_duration).max(min_bound);
            }
        }
    }

    // The fixed edge may itself lie outside the bounds (a shift that
    // predates narrowed business hours); pull it in, then restore the
    // minimum duration if the pair ended up short.
    s = s.max(min_bound);
    e = e.min(max_bound);
    if e - s < min_duration {
        e = (s + min_duration).min(max_bound);
        s = (e - min_duration).max(min_bound);
    }

    (s, e)
}

/// Continuous-mode move clamp: first against the full 3-day window, then
/// against the single day the result lands in. A move may relocate a block
/// to an adjacent day, but the result never straddles midnight.
pub fn clamp_move_in_window(start: i32, end: i32, min_duration: i32) -> (i32, i32) {
    let window_max = WINDOW_DAYS * DAY_MINUTES;
    let (s, e) = clamp_move(start, end, 0, window_max, min_duration);

    let day = (s.div_euclid(DAY_MINUTES)).clamp(0, WINDOW_DAYS - 1);
    clamp_move(s, e, day * DAY_MINUTES, (day + 1) * DAY_MINUTES, min_duration)
}

/// Continuous-mode resize clamp: always confined to the day the gesture was
/// anchored in, so a resize cannot extend a block across midnight.
pub fn clamp_resize_in_window(
    start: i32,
    end: i32,
    anchor_day: i32,
    edge: ResizeEdge,
    min_duration: i32,
) -> (i32, i32) {
    let day = anchor_day.clamp(0, WINDOW_DAYS - 1);
    clamp_resize(
        start,
        end,
        day * DAY_MINUTES,
        (day + 1) * DAY_MINUTES,
        edge,
        min_duration,
    )
}
