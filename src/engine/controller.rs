//! Pointer-lifecycle state machine: classifies a gesture as a click, a
//! create, a move, or an edge resize, and turns it into either a proposal
//! for the confirmation step or nothing at all.
//!
//! The controller never mutates shifts. Every state-changing outcome leaves
//! as an [`EngineEvent`] for an external collaborator; the only state owned
//! here is the single in-flight [`DragSession`] and the preview positions
//! the presentation layer renders from.

use std::mem;

use chrono::NaiveDate;
use thiserror::Error;

use crate::roster::{minutes_to_hour, EmployeeId, ShiftId};

use super::ghost::GhostSlot;
use super::lock::{InteractionLock, PointerId};
use super::mapper::{AxisMode, TimelineMapper};
use super::snap::{
    clamp_move, clamp_move_in_window, clamp_resize, clamp_resize_in_window, snap, ResizeEdge,
    DAY_MINUTES, MIN_DURATION_MINUTES, SNAP_MINUTES,
};

/// Thresholds and grid granularity, injected at construction so tests can
/// exercise alternates deterministically.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub snap_minutes: i32,
    pub min_duration_minutes: i32,
    /// Movement past this (either axis) activates a drag.
    pub activation_px: f32,
    /// Empty-space releases under this displacement and under
    /// `click_max_ms` classify as a click.
    pub click_px: f32,
    pub click_max_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap_minutes: SNAP_MINUTES,
            min_duration_minutes: MIN_DURATION_MINUTES,
            activation_px: 4.0,
            click_px: 2.0,
            click_max_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Move,
    ResizeLeft,
    ResizeRight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPoint {
    pub x: f32,
    pub y: f32,
}

/// Everything the controller needs to know about the grabbed shift, captured
/// when the gesture arms. Minutes are past midnight of `date`.
#[derive(Debug, Clone, Copy)]
pub struct ShiftSnapshot {
    pub id: ShiftId,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub start_minutes: i32,
    pub end_minutes: i32,
    pub is_blocked: bool,
}

/// What the pointer went down on.
#[derive(Debug, Clone, Copy)]
pub enum GestureTarget {
    Shift { shift: ShiftSnapshot, mode: DragMode },
    /// Empty grid space; carries the hover ghost's current candidate so the
    /// click result always matches the preview.
    Empty { ghost: Option<GhostSlot> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("shifts on past dates can't be changed")]
    PastDate,
    #[error("that time overlaps an existing shift")]
    Overlap,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A committed move/resize. Forwarded to the confirmation collaborator;
    /// never applied to storage here.
    ShiftProposed {
        shift_id: ShiftId,
        date: NaiveDate,
        start_hour: f64,
        end_hour: f64,
    },
    /// A committed create gesture that passed the overlap check.
    CreateRequested {
        employee_id: EmployeeId,
        date: NaiveDate,
        start_hour: f64,
        end_hour: f64,
    },
    /// A pure click on a shift (gesture never activated).
    ShiftClicked { shift_id: ShiftId },
    /// User-facing rejection (past date, overlap).
    Rejected(EngineError),
}

/// Live preview position for one shift, minutes past midnight of `date`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftPreview {
    pub shift_id: ShiftId,
    pub date: NaiveDate,
    pub start_minutes: i32,
    pub end_minutes: i32,
}

#[derive(Debug, Clone)]
enum SessionKind {
    Shift {
        shift: ShiftSnapshot,
        mode: DragMode,
        /// Anchored block range in axis minutes.
        anchor_start: i32,
        anchor_end: i32,
        /// Window day index the gesture anchored in (0 in single-day mode).
        anchor_day: i32,
        /// Last computed candidate, axis minutes.
        last_start: i32,
        last_end: i32,
    },
    Create { ghost: GhostSlot },
}

/// The one in-flight gesture. Created on arm, destroyed on commit or cancel.
#[derive(Debug, Clone)]
pub struct DragSession {
    pointer_id: PointerId,
    kind: SessionKind,
    anchor_point: PointerPoint,
    /// Pointer position at press, axis minutes.
    anchor_minutes: i32,
    pressed_ms: u64,
    activated: bool,
    captured: bool,
    max_displacement: f32,
}

#[derive(Debug, Default)]
pub struct DragController {
    cfg: EngineConfig,
    lock: InteractionLock,
    session: Option<DragSession>,
    preview: Option<ShiftPreview>,
    /// Commit override: the proposed position shown while the confirmation
    /// step is outstanding. Cleared when the proposal resolves either way.
    pending: Option<ShiftPreview>,
    events: Vec<EngineEvent>,
}

impl DragController {
    pub fn new(cfg: EngineConfig) -> Self {
        Self {
            cfg,
            lock: InteractionLock::default(),
            session: None,
            preview: None,
            pending: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Is a gesture past its activation threshold?
    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().map(|s| s.activated).unwrap_or(false)
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// The position the presentation layer should render `shift_id` at, when
    /// a live gesture or an unresolved proposal overrides storage.
    pub fn preview_for(&self, shift_id: ShiftId) -> Option<ShiftPreview> {
        self.pending
            .into_iter()
            .chain(self.preview)
            .find(|p| p.shift_id == shift_id)
    }

    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        mem::take(&mut self.events)
    }

    /// Pointer-down: `Idle -> Armed`, or a no-op when the target can't arm.
    /// A `None` target means the UI could not resolve the shift id anymore;
    /// that aborts silently.
    pub fn pointer_down(
        &mut self,
        pointer_id: PointerId,
        point: PointerPoint,
        time_ms: u64,
        target: Option<GestureTarget>,
        date_editable: bool,
        mapper: &TimelineMapper,
    ) {
        // One session at a time; a second pointer is ignored entirely.
        if self.session.is_some() {
            return;
        }
        let Some(target) = target else {
            return;
        };

        let kind = match target {
            GestureTarget::Shift { shift, mode } => {
                if shift.is_blocked {
                    return;
                }
                if !date_editable {
                    self.events.push(EngineEvent::Rejected(EngineError::PastDate));
                    return;
                }
                let (anchor_start, anchor_end, anchor_day) = match mapper.mode() {
                    AxisMode::SingleDay { date, .. } => {
                        if *date != shift.date {
                            return;
                        }
                        (shift.start_minutes, shift.end_minutes, 0)
                    }
                    AxisMode::Continuous { .. } => {
                        let Some(day) = mapper.day_index(shift.date) else {
                            return;
                        };
                        (
                            day * DAY_MINUTES + shift.start_minutes,
                            day * DAY_MINUTES + shift.end_minutes,
                            day,
                        )
                    }
                };
                SessionKind::Shift {
                    shift,
                    mode,
                    anchor_start,
                    anchor_end,
                    anchor_day,
                    last_start: anchor_start,
                    last_end: anchor_end,
                }
            }
            GestureTarget::Empty { ghost } => {
                if !date_editable {
                    self.events.push(EngineEvent::Rejected(EngineError::PastDate));
                    return;
                }
                // No candidate slot means nothing to create here.
                let Some(ghost) = ghost else {
                    return;
                };
                SessionKind::Create { ghost }
            }
        };

        let Some(anchor_minutes) = mapper.offset_to_minutes(point.x) else {
            return;
        };

        // Capture failure is non-fatal; the gesture just runs uncaptured.
        let captured = self.lock.acquire(pointer_id);

        self.session = Some(DragSession {
            pointer_id,
            kind,
            anchor_point: point,
            anchor_minutes,
            pressed_ms: time_ms,
            activated: false,
            captured,
            max_displacement: 0.0,
        });
    }

    /// Pointer-move: activation check plus, while activated, the delta-based
    /// candidate recomputation. Unrepresentable pointer positions are
    /// ignored, per the mapper's edge policy.
    pub fn pointer_move(
        &mut self,
        pointer_id: PointerId,
        point: PointerPoint,
        mapper: &TimelineMapper,
    ) {
        let cfg = self.cfg;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.pointer_id != pointer_id {
            return;
        }

        let dx = point.x - session.anchor_point.x;
        let dy = point.y - session.anchor_point.y;
        session.max_displacement = session.max_displacement.max(dx.abs()).max(dy.abs());

        if !session.activated
            && (dx.abs() > cfg.activation_px || dy.abs() > cfg.activation_px)
        {
            session.activated = true;
        }
        if !session.activated {
            return;
        }

        let SessionKind::Shift {
            shift,
            mode,
            anchor_start,
            anchor_end,
            anchor_day,
            last_start,
            last_end,
        } = &mut session.kind
        else {
            // Create gestures keep the slot captured at press.
            return;
        };

        let Some(pointer_minutes) = mapper.offset_to_minutes(point.x) else {
            return;
        };
        let delta = pointer_minutes - session.anchor_minutes;
        let (min_bound, max_bound) = mapper.bounds_minutes();
        let continuous = mapper.is_continuous();

        let (s, e) = match *mode {
            DragMode::Move => {
                // Snapping the delta keeps an off-grid block from jumping to
                // the grid the moment the gesture starts.
                let shifted = snap(delta, cfg.snap_minutes);
                let (s, e) = (*anchor_start + shifted, *anchor_end + shifted);
                if continuous {
                    clamp_move_in_window(s, e, cfg.min_duration_minutes)
                } else {
                    clamp_move(s, e, min_bound, max_bound, cfg.min_duration_minutes)
                }
            }
            DragMode::ResizeLeft => {
                let edge = snap(*anchor_start + delta, cfg.snap_minutes);
                if continuous {
                    clamp_resize_in_window(
                        edge,
                        *anchor_end,
                        *anchor_day,
                        ResizeEdge::Left,
                        cfg.min_duration_minutes,
                    )
                } else {
                    clamp_resize(
                        edge,
                        *anchor_end,
                        min_bound,
                        max_bound,
                        ResizeEdge::Left,
                        cfg.min_duration_minutes,
                    )
                }
            }
            DragMode::ResizeRight => {
                let edge = snap(*anchor_end + delta, cfg.snap_minutes);
                if continuous {
                    clamp_resize_in_window(
                        *anchor_start,
                        edge,
                        *anchor_day,
                        ResizeEdge::Right,
                        cfg.min_duration_minutes,
                    )
                } else {
                    clamp_resize(
                        *anchor_start,
                        edge,
                        min_bound,
                        max_bound,
                        ResizeEdge::Right,
                        cfg.min_duration_minutes,
                    )
                }
            }
        };

        *last_start = s;
        *last_end = e;

        let (date, start_in_day) = mapper.split_minutes(s);
        self.preview = Some(ShiftPreview {
            shift_id: shift.id,
            date,
            start_minutes: start_in_day,
            end_minutes: start_in_day + (e - s),
        });
    }

    /// Pointer-up: `Activated -> Committed`, or click resolution, or no-op.
    /// `overlap` is the external overlap-check predicate, consulted only for
    /// create gestures.
    pub fn pointer_up(
        &mut self,
        pointer_id: PointerId,
        time_ms: u64,
        mapper: &TimelineMapper,
        overlap: &dyn Fn(EmployeeId, NaiveDate, i32, i32) -> bool,
    ) {
        if self.session.as_ref().map(|s| s.pointer_id) != Some(pointer_id) {
            return;
        }
        let Some(session) = self.session.take() else {
            return;
        };
        if session.captured {
            self.lock.release(session.pointer_id);
        }
        self.preview = None;

        let held_ms = time_ms.saturating_sub(session.pressed_ms);
        let is_click = !session.activated
            && session.max_displacement < self.cfg.click_px
            && held_ms < self.cfg.click_max_ms;

        match session.kind {
            SessionKind::Shift {
                shift,
                anchor_start,
                anchor_end,
                last_start,
                last_end,
                ..
            } => {
                if session.activated {
                    if (last_start, last_end) != (anchor_start, anchor_end) {
                        let (date, start_in_day) = mapper.split_minutes(last_start);
                        let end_in_day = start_in_day + (last_end - last_start);
                        self.pending = Some(ShiftPreview {
                            shift_id: shift.id,
                            date,
                            start_minutes: start_in_day,
                            end_minutes: end_in_day,
                        });
                        self.events.push(EngineEvent::ShiftProposed {
                            shift_id: shift.id,
                            date,
                            start_hour: minutes_to_hour(start_in_day),
                            end_hour: minutes_to_hour(end_in_day),
                        });
                    }
                } else {
                    // A pure click opens the editor.
                    self.events.push(EngineEvent::ShiftClicked { shift_id: shift.id });
                }
            }
            SessionKind::Create { ghost } => {
                // Drag or click, the create resolves against the ghost slot
                // so the result always matches the hover preview.
                if session.activated || is_click {
                    if overlap(
                        ghost.employee_id,
                        ghost.date,
                        ghost.start_minutes,
                        ghost.end_minutes,
                    ) {
                        self.events.push(EngineEvent::Rejected(EngineError::Overlap));
                    } else {
                        self.events.push(EngineEvent::CreateRequested {
                            employee_id: ghost.employee_id,
                            date: ghost.date,
                            start_hour: minutes_to_hour(ghost.start_minutes),
                            end_hour: minutes_to_hour(ghost.end_minutes),
                        });
                    }
                }
            }
        }
    }

    /// Pointer-cancel or capture loss: discard everything, emit nothing.
    pub fn pointer_cancel(&mut self, pointer_id: PointerId) {
        if self.session.as_ref().map(|s| s.pointer_id) != Some(pointer_id) {
            return;
        }
        let Some(session) = self.session.take() else {
            return;
        };
        if session.captured {
            self.lock.release(session.pointer_id);
        }
        self.preview = None;
    }

    /// Resolution of an outstanding proposal by the confirmation
    /// collaborator. Either way the commit override is cleared, so a
    /// subsequent identical gesture starts from clean state; on dismissal
    /// the shift simply renders from storage again. Any gesture still in
    /// flight is discarded too.
    pub fn resolve_proposal(&mut self, _applied: bool) {
        self.pending = None;
        if let Some(session) = self.session.take() {
            if session.captured {
                self.lock.release(session.pointer_id);
            }
        }
        self.preview = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ghost::GhostSlot;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn no_overlap(_: EmployeeId, _: NaiveDate, _: i32, _: i32) -> bool {
        false
    }

    fn shift_snapshot(start_hour: f64, end_hour: f64) -> ShiftSnapshot {
        ShiftSnapshot {
            id: 7,
            employee_id: 1,
            date: date(2024, 6, 10),
            start_minutes: (start_hour * 60.0) as i32,
            end_minutes: (end_hour * 60.0) as i32,
            is_blocked: false,
        }
    }

    /// 1440 px over 24 h: one pixel per minute, for readable arithmetic.
    fn unit_mapper() -> TimelineMapper {
        TimelineMapper::single_day(date(2024, 6, 10), 1440.0, None)
    }

    fn pt(x: f32, y: f32) -> PointerPoint {
        PointerPoint { x, y }
    }

    #[test]
    fn default_config_uses_the_shared_grid_constants() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.snap_minutes, SNAP_MINUTES);
        assert_eq!(cfg.min_duration_minutes, MIN_DURATION_MINUTES);
    }

    #[test]
    fn small_move_snaps_back_to_original_and_emits_nothing() {
        let mapper = unit_mapper();
        let mut ctl = DragController::new(EngineConfig::default());
        let target = GestureTarget::Shift {
            shift: shift_snapshot(12.0, 13.0),
            mode: DragMode::Move,
        };

        ctl.pointer_down(1, pt(730.0, 50.0), 0, Some(target), true, &mapper);
        // 7 px right = 7 minutes: under half a snap unit, rounds to zero.
        ctl.pointer_move(1, pt(737.0, 50.0), &mapper);
        assert!(ctl.is_dragging());
        assert_eq!(
            ctl.preview_for(7).map(|p| p.start_minutes),
            Some(720),
            "7-minute delta snaps to no change"
        );
        ctl.pointer_up(1, 400, &mapper, &no_overlap);

        assert_eq!(ctl.take_events(), vec![], "unchanged position proposes nothing");
        assert_eq!(ctl.preview_for(7), None);
    }

    #[test]
    fn eight_minute_delta_snaps_to_a_quarter_hour() {
        let mapper = unit_mapper();
        let mut ctl = DragController::new(EngineConfig::default());
        let target = GestureTarget::Shift {
            shift: shift_snapshot(12.0, 13.0),
            mode: DragMode::Move,
        };

        ctl.pointer_down(1, pt(730.0, 50.0), 0, Some(target), true, &mapper);
        ctl.pointer_move(1, pt(738.0, 50.0), &mapper);
        ctl.pointer_up(1, 400, &mapper, &no_overlap);

        assert_eq!(
            ctl.take_events(),
            vec![EngineEvent::ShiftProposed {
                shift_id: 7,
                date: date(2024, 6, 10),
                start_hour: 12.25,
                end_hour: 13.25,
            }]
        );
    }

    #[test]
    fn right_edge_resize_clamps_to_close_hour() {
        // Business hours 10:00-23:00 over 1300 px (100 px/h), shift
        // 12:00-18:00, right edge dragged toward 23:30.
        let mapper =
            TimelineMapper::single_day(date(2024, 6, 10), 1300.0, Some((10.0, 23.0)));
        let mut ctl = DragController::new(EngineConfig::default());
        let target = GestureTarget::Shift {
            shift: shift_snapshot(12.0, 18.0),
            mode: DragMode::ResizeRight,
        };

        // 18:00 sits at (18 - 10) * 100 = 800 px.
        ctl.pointer_down(1, pt(800.0, 40.0), 0, Some(target), true, &mapper);
        ctl.pointer_move(1, pt(1350.0, 40.0), &mapper);
        ctl.pointer_up(1, 600, &mapper, &no_overlap);

        assert_eq!(
            ctl.take_events(),
            vec![EngineEvent::ShiftProposed {
                shift_id: 7,
                date: date(2024, 6, 10),
                start_hour: 12.0,
                end_hour: 23.0,
            }]
        );
    }

    #[test]
    fn pure_click_on_a_shift_opens_the_editor() {
        let mapper = unit_mapper();
        let mut ctl = DragController::new(EngineConfig::default());
        let target = GestureTarget::Shift {
            shift: shift_snapshot(12.0, 13.0),
            mode: DragMode::Move,
        };

        ctl.pointer_down(1, pt(730.0, 50.0), 0, Some(target), true, &mapper);
        ctl.pointer_move(1, pt(731.0, 50.0), &mapper);
        ctl.pointer_up(1, 100, &mapper, &no_overlap);

        assert_eq!(ctl.take_events(), vec![EngineEvent::ShiftClicked { shift_id: 7 }]);
    }

    #[test]
    fn empty_space_click_thresholds_disambiguate() {
        let mapper = unit_mapper();
        let ghost = GhostSlot {
            employee_id: 1,
            date: date(2024, 6, 10),
            start_minutes: 600,
            end_minutes: 660,
        };

        // Under both thresholds: a click, creates.
        let mut ctl = DragController::new(EngineConfig::default());
        ctl.pointer_down(1, pt(100.0, 10.0), 0, Some(GestureTarget::Empty { ghost: Some(ghost) }), true, &mapper);
        ctl.pointer_move(1, pt(101.0, 10.0), &mapper);
        ctl.pointer_up(1, 100, &mapper, &no_overlap);
        assert!(matches!(
            ctl.take_events().as_slice(),
            [EngineEvent::CreateRequested { start_hour, .. }] if *start_hour == 10.0
        ));

        // Too slow: neither click nor drag, a no-op.
        let mut ctl = DragController::new(EngineConfig::default());
        ctl.pointer_down(1, pt(100.0, 10.0), 0, Some(GestureTarget::Empty { ghost: Some(ghost) }), true, &mapper);
        ctl.pointer_up(1, 400, &mapper, &no_overlap);
        assert_eq!(ctl.take_events(), vec![]);

        // Between click and activation displacement: also a no-op.
        let mut ctl = DragController::new(EngineConfig::default());
        ctl.pointer_down(1, pt(100.0, 10.0), 0, Some(GestureTarget::Empty { ghost: Some(ghost) }), true, &mapper);
        ctl.pointer_move(1, pt(103.0, 10.0), &mapper);
        ctl.pointer_up(1, 100, &mapper, &no_overlap);
        assert_eq!(ctl.take_events(), vec![]);
    }

    #[test]
    fn past_dates_never_create() {
        let mapper = unit_mapper();
        let ghost = GhostSlot {
            employee_id: 1,
            date: date(2024, 6, 9),
            start_minutes: 600,
            end_minutes: 660,
        };
        let mut ctl = DragController::new(EngineConfig::default());

        ctl.pointer_down(1, pt(100.0, 10.0), 0, Some(GestureTarget::Empty { ghost: Some(ghost) }), false, &mapper);
        ctl.pointer_up(1, 50, &mapper, &no_overlap);

        assert_eq!(
            ctl.take_events(),
            vec![EngineEvent::Rejected(EngineError::PastDate)]
        );
        assert!(!ctl.has_session(), "no session arms on a non-editable date");
    }

    #[test]
    fn overlapping_create_is_rejected() {
        let mapper = unit_mapper();
        let ghost = GhostSlot {
            employee_id: 1,
            date: date(2024, 6, 10),
            start_minutes: 600,
            end_minutes: 660,
        };
        let mut ctl = DragController::new(EngineConfig::default());

        ctl.pointer_down(1, pt(100.0, 10.0), 0, Some(GestureTarget::Empty { ghost: Some(ghost) }), true, &mapper);
        ctl.pointer_up(1, 50, &mapper, &|_, _, _, _| true);

        assert_eq!(
            ctl.take_events(),
            vec![EngineEvent::Rejected(EngineError::Overlap)]
        );
    }

    #[test]
    fn blocked_shifts_and_stale_ids_never_arm() {
        let mapper = unit_mapper();
        let mut ctl = DragController::new(EngineConfig::default());

        let mut blocked = shift_snapshot(12.0, 13.0);
        blocked.is_blocked = true;
        ctl.pointer_down(
            1,
            pt(730.0, 50.0),
            0,
            Some(GestureTarget::Shift { shift: blocked, mode: DragMode::Move }),
            true,
            &mapper,
        );
        assert!(!ctl.has_session());

        // Stale shift id: the UI passes no target, gesture aborts silently.
        ctl.pointer_down(1, pt(730.0, 50.0), 0, None, true, &mapper);
        assert!(!ctl.has_session());
        assert_eq!(ctl.take_events(), vec![]);
    }

    #[test]
    fn second_pointer_is_ignored_while_a_session_is_active() {
        let mapper = unit_mapper();
        let mut ctl = DragController::new(EngineConfig::default());
        let target = GestureTarget::Shift {
            shift: shift_snapshot(12.0, 13.0),
            mode: DragMode::Move,
        };

        ctl.pointer_down(1, pt(730.0, 50.0), 0, Some(target), true, &mapper);
        ctl.pointer_down(2, pt(100.0, 10.0), 5, Some(target), true, &mapper);
        ctl.pointer_move(2, pt(200.0, 10.0), &mapper);
        ctl.pointer_up(2, 50, &mapper, &no_overlap);

        assert!(ctl.has_session(), "pointer 1's session survives pointer 2");
        assert_eq!(ctl.take_events(), vec![]);

        ctl.pointer_cancel(1);
        assert!(!ctl.has_session());
    }

    #[test]
    fn cancel_discards_preview_without_events() {
        let mapper = unit_mapper();
        let mut ctl = DragController::new(EngineConfig::default());
        let target = GestureTarget::Shift {
            shift: shift_snapshot(12.0, 13.0),
            mode: DragMode::Move,
        };

        ctl.pointer_down(1, pt(730.0, 50.0), 0, Some(target), true, &mapper);
        ctl.pointer_move(1, pt(790.0, 50.0), &mapper);
        assert!(ctl.preview_for(7).is_some());

        ctl.pointer_cancel(1);
        assert_eq!(ctl.preview_for(7), None);
        assert_eq!(ctl.take_events(), vec![]);
    }

    #[test]
    fn dismissed_proposal_restores_pre_gesture_preview() {
        let mapper = unit_mapper();
        let mut ctl = DragController::new(EngineConfig::default());
        let target = GestureTarget::Shift {
            shift: shift_snapshot(12.0, 13.0),
            mode: DragMode::Move,
        };

        ctl.pointer_down(1, pt(730.0, 50.0), 0, Some(target), true, &mapper);
        ctl.pointer_move(1, pt(790.0, 50.0), &mapper);
        ctl.pointer_up(1, 500, &mapper, &no_overlap);

        // While the confirmation is outstanding the override holds the
        // proposed position.
        let pending = ctl.preview_for(7).expect("commit override present");
        assert_eq!(pending.start_minutes, 780);
        assert_eq!(ctl.take_events().len(), 1);

        ctl.resolve_proposal(false);
        assert_eq!(ctl.preview_for(7), None, "override cleared on dismissal");

        // An identical follow-up gesture is not confused by stale state.
        ctl.pointer_down(1, pt(730.0, 50.0), 0, Some(target), true, &mapper);
        ctl.pointer_move(1, pt(790.0, 50.0), &mapper);
        ctl.pointer_up(1, 500, &mapper, &no_overlap);
        assert_eq!(ctl.take_events().len(), 1);
    }

    #[test]
    fn continuous_move_can_cross_days_but_resize_cannot() {
        let window_start = date(2024, 6, 9);
        let mapper = TimelineMapper::continuous(window_start);
        let mut ctl = DragController::new(EngineConfig::default());

        // Shift on the middle day, 22:00-23:00.
        let mut shift = shift_snapshot(22.0, 23.0);
        shift.date = date(2024, 6, 10);
        let target = GestureTarget::Shift { shift, mode: DragMode::Move };

        // 22:00 on day 1 sits at (24 + 22) * 60 px at one px per minute.
        let x0 = (24.0 + 22.0) * 60.0;
        ctl.pointer_down(1, pt(x0 + 30.0, 20.0), 0, Some(target), true, &mapper);
        // Drag three hours right: lands on 2024-06-11.
        ctl.pointer_move(1, pt(x0 + 30.0 + 180.0, 20.0), &mapper);
        ctl.pointer_up(1, 500, &mapper, &no_overlap);

        assert_eq!(
            ctl.take_events(),
            vec![EngineEvent::ShiftProposed {
                shift_id: 7,
                date: date(2024, 6, 11),
                start_hour: 1.0,
                end_hour: 2.0,
            }]
        );

        // Same drag as a right-edge resize: pinned to the anchor's day.
        ctl.resolve_proposal(false);
        let target = GestureTarget::Shift { shift, mode: DragMode::ResizeRight };
        let x_end = (24.0 + 23.0) * 60.0;
        ctl.pointer_down(1, pt(x_end, 20.0), 0, Some(target), true, &mapper);
        ctl.pointer_move(1, pt(x_end + 180.0, 20.0), &mapper);
        ctl.pointer_up(1, 500, &mapper, &no_overlap);

        assert_eq!(
            ctl.take_events(),
            vec![EngineEvent::ShiftProposed {
                shift_id: 7,
                date: date(2024, 6, 10),
                start_hour: 22.0,
                end_hour: 24.0,
            }]
        );
    }
}
