use chrono::{Duration, NaiveDate};
use egui::{Color32, CursorIcon, PointerButton, Rect, Ui};

use crate::config::Config;
use crate::engine::{
    DragController, DragMode, FrameCoalescer, GestureTarget, GhostInput, GhostSlot, PointerKind,
    PointerPoint, ShiftSnapshot, TimelineMapper, WindowState,
};
use crate::roster::{format_minutes, EmployeeId, RosterStore, ScheduleState, Shift};
use super::theme::{block_colors, ghost_colors, grid_colors};

pub const LANE_LABEL_WIDTH: f32 = 150.0;
pub const AXIS_HEIGHT: f32 = 26.0;
const EDGE_GRAB_PX: f32 = 6.0;
const BLOCK_MARGIN: f32 = 3.0;

/// Scroll feedback from the continuous view, fed back into the window
/// manager once per frame.
pub struct TimelineResult {
    pub scroll_x: f32,
    pub viewport_px: f32,
}

/// One day stretched across the viewport.
pub fn render_single_day(
    ui: &mut Ui,
    config: &Config,
    store: &RosterStore,
    controller: &mut DragController,
    ghost: Option<GhostSlot>,
    ghost_latch: &mut FrameCoalescer<GhostInput>,
    date: NaiveDate,
    today: NaiveDate,
) {
    ui.horizontal(|ui| {
        render_lane_labels(ui, config, store);
        let viewport_px = ui.available_width().max(100.0);
        let mapper =
            TimelineMapper::single_day(date, viewport_px, config.business_hours.range_for(date));
        render_grid(
            ui, config, store, controller, ghost, ghost_latch, &mapper, &[date], today,
        );
    });
}

/// The 3-day window at a fixed scale inside a horizontal scroll area. The
/// lane label column stays put; only the grid scrolls.
pub fn render_continuous(
    ui: &mut Ui,
    config: &Config,
    store: &RosterStore,
    controller: &mut DragController,
    ghost: Option<GhostSlot>,
    ghost_latch: &mut FrameCoalescer<GhostInput>,
    window: &WindowState,
    pending_scroll: Option<f32>,
    today: NaiveDate,
) -> TimelineResult {
    let mapper = window.mapper();
    let days: Vec<NaiveDate> = (0..3)
        .map(|i| window.window_start() + Duration::days(i))
        .collect();

    let mut result = TimelineResult {
        scroll_x: 0.0,
        viewport_px: 0.0,
    };

    ui.horizontal(|ui| {
        render_lane_labels(ui, config, store);
        result.viewport_px = ui.available_width().max(100.0);

        let mut scroll_area = egui::ScrollArea::horizontal().id_salt("timeline_window");
        if let Some(x) = pending_scroll {
            scroll_area = scroll_area.horizontal_scroll_offset(x);
        }
        let output = scroll_area.show(ui, |ui| {
            render_grid(
                ui, config, store, controller, ghost, ghost_latch, &mapper, &days, today,
            );
        });
        result.scroll_x = output.state.offset.x;
    });

    result
}

fn render_lane_labels(ui: &mut Ui, config: &Config, store: &RosterStore) {
    let lane_height = config.lane_height;
    let employees = store.employees();
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(
            LANE_LABEL_WIDTH,
            AXIS_HEIGHT + employees.len() as f32 * lane_height,
        ),
        egui::Sense::hover(),
    );

    let painter = ui.painter();
    let (_, _, lane_line) = grid_colors();
    for (lane, employee) in employees.iter().enumerate() {
        let y = rect.min.y + AXIS_HEIGHT + lane as f32 * lane_height;
        painter.line_segment(
            [egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)],
            egui::Stroke::new(1.0, lane_line),
        );
        painter.text(
            egui::pos2(rect.min.x + 8.0, y + lane_height / 2.0 - 8.0),
            egui::Align2::LEFT_CENTER,
            &employee.name,
            egui::FontId::proportional(14.0),
            Color32::from_rgb(200, 200, 192),
        );
        if let Some(job) = &employee.job {
            painter.text(
                egui::pos2(rect.min.x + 8.0, y + lane_height / 2.0 + 9.0),
                egui::Align2::LEFT_CENTER,
                job,
                egui::FontId::proportional(11.0),
                Color32::from_rgb(112, 112, 104),
            );
        }
    }
}

/// Shared grid painter + pointer translation for both axis modes. All
/// pointer coordinates handed to the controller are relative to the grid
/// origin, so scrolling is already folded in.
#[allow(clippy::too_many_arguments)]
fn render_grid(
    ui: &mut Ui,
    config: &Config,
    store: &RosterStore,
    controller: &mut DragController,
    ghost: Option<GhostSlot>,
    ghost_latch: &mut FrameCoalescer<GhostInput>,
    mapper: &TimelineMapper,
    days: &[NaiveDate],
    today: NaiveDate,
) {
    let employees = store.employees();
    let lane_height = config.lane_height;
    let grid_width = mapper.total_width();
    let lanes_height = employees.len() as f32 * lane_height;

    let (full_rect, _) = ui.allocate_exact_size(
        egui::vec2(grid_width, AXIS_HEIGHT + lanes_height),
        egui::Sense::hover(),
    );
    let grid_rect = Rect::from_min_size(
        egui::pos2(full_rect.min.x, full_rect.min.y + AXIS_HEIGHT),
        egui::vec2(grid_width, lanes_height),
    );

    let painter = ui.painter();
    let (hour_line, quarter_line, lane_line) = grid_colors();
    let (axis_min, axis_max) = mapper.bounds_minutes();
    let pph = mapper.px_per_hour();

    // Hour labels and vertical grid lines
    let first_hour = axis_min / 60;
    let last_hour = (axis_max + 59) / 60;
    for hour in first_hour..=last_hour {
        let x = grid_rect.min.x + mapper.minutes_to_offset(hour * 60);

        let midnight = hour > first_hour && hour % 24 == 0;
        painter.line_segment(
            [egui::pos2(x, grid_rect.min.y), egui::pos2(x, grid_rect.max.y)],
            egui::Stroke::new(if midnight { 2.0 } else { 1.0 }, if midnight { hour_line } else { lane_line }),
        );

        if hour < last_hour {
            painter.text(
                egui::pos2(x + 4.0, full_rect.min.y + AXIS_HEIGHT - 4.0),
                egui::Align2::LEFT_BOTTOM,
                format_minutes((hour % 24) * 60, config.clock_format),
                egui::FontId::proportional(11.0),
                Color32::from_rgb(0x70, 0x70, 0x68),
            );

            // Quarter-hour subdivisions, skipped when the scale is too tight
            if pph >= 32.0 {
                for quarter in 1..4 {
                    let qx = x + quarter as f32 * pph / 4.0;
                    painter.line_segment(
                        [egui::pos2(qx, grid_rect.min.y), egui::pos2(qx, grid_rect.max.y)],
                        egui::Stroke::new(1.0, quarter_line),
                    );
                }
            }
        }
    }

    // Day headers along the axis (continuous mode shows three)
    if days.len() > 1 {
        for day in days {
            if let Some(x) = mapper.time_to_offset(*day, 0.0) {
                let label = if *day == today {
                    format!("Today - {}", day.format("%a %b %-d"))
                } else {
                    day.format("%a %b %-d").to_string()
                };
                painter.text(
                    egui::pos2(grid_rect.min.x + x + 48.0, full_rect.min.y + 4.0),
                    egui::Align2::LEFT_TOP,
                    label,
                    egui::FontId::proportional(12.0),
                    Color32::from_rgb(0xb0, 0xb0, 0xa8),
                );
            }
        }
    }

    // Lane separators
    for lane in 0..=employees.len() {
        let y = grid_rect.min.y + lane as f32 * lane_height;
        painter.line_segment(
            [egui::pos2(grid_rect.min.x, y), egui::pos2(grid_rect.max.x, y)],
            egui::Stroke::new(1.0, lane_line),
        );
    }

    // Shift blocks, with live preview positions overriding storage
    let mut block_rects: Vec<(Rect, ShiftSnapshot)> = Vec::new();
    for day in days {
        for shift in store.shifts_for_day(*day) {
            let Some(lane) = employees.iter().position(|e| e.id == shift.employee_id) else {
                continue;
            };

            let (eff_date, start_min, end_min) = match controller.preview_for(shift.id) {
                Some(p) => (p.date, p.start_minutes, p.end_minutes),
                None => (shift.date, shift.start_minutes(), shift.end_minutes()),
            };
            let Some(x0) = mapper.time_to_offset(eff_date, start_min as f64 / 60.0) else {
                continue;
            };
            let width = (end_min - start_min) as f32 / 60.0 * pph;

            let lane_y = grid_rect.min.y + lane as f32 * lane_height;
            let rect = Rect::from_min_size(
                egui::pos2(grid_rect.min.x + x0, lane_y + BLOCK_MARGIN),
                egui::vec2(width.max(8.0), lane_height - BLOCK_MARGIN * 2.0),
            );

            let dragging_this =
                controller.is_dragging() && controller.preview_for(shift.id).is_some();
            paint_block(ui, rect, shift, start_min, end_min, config, dragging_this);

            block_rects.push((
                rect,
                ShiftSnapshot {
                    id: shift.id,
                    employee_id: shift.employee_id,
                    date: shift.date,
                    start_minutes: shift.start_minutes(),
                    end_minutes: shift.end_minutes(),
                    is_blocked: shift.is_blocked,
                },
            ));
        }
    }

    // Hover ghost for the create gesture
    if let Some(slot) = ghost {
        if let Some(lane) = employees.iter().position(|e| e.id == slot.employee_id) {
            if let Some(x0) = mapper.time_to_offset(slot.date, slot.start_minutes as f64 / 60.0) {
                let width = (slot.end_minutes - slot.start_minutes) as f32 / 60.0 * pph;
                let lane_y = grid_rect.min.y + lane as f32 * lane_height;
                let rect = Rect::from_min_size(
                    egui::pos2(grid_rect.min.x + x0, lane_y + BLOCK_MARGIN),
                    egui::vec2(width, lane_height - BLOCK_MARGIN * 2.0),
                );
                let (fill, border) = ghost_colors();
                let painter = ui.painter();
                painter.rect(rect, 4.0, fill, egui::Stroke::new(1.0, border));
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    format!("{} + 1h", format_minutes(slot.start_minutes, config.clock_format)),
                    egui::FontId::proportional(12.0),
                    Color32::from_rgba_unmultiplied(255, 255, 255, 150),
                );
            }
        }
    }

    forward_pointer_events(
        ui, config, store, controller, ghost, ghost_latch, mapper, grid_rect, lane_height,
        &block_rects, today,
    );
}

fn paint_block(
    ui: &Ui,
    rect: Rect,
    shift: &Shift,
    start_min: i32,
    end_min: i32,
    config: &Config,
    dragging: bool,
) {
    let published = shift.schedule_state == ScheduleState::Published;
    let (fill, border, text) = block_colors(published, shift.is_blocked);
    let painter = ui.painter();

    let stroke_width = if dragging { 2.0 } else { 1.0 };
    painter.rect(rect, 4.0, fill, egui::Stroke::new(stroke_width, border));

    painter.text(
        egui::pos2(rect.min.x + 6.0, rect.min.y + 5.0),
        egui::Align2::LEFT_TOP,
        format!(
            "{} - {}",
            format_minutes(start_min, config.clock_format),
            format_minutes(end_min, config.clock_format),
        ),
        egui::FontId::proportional(12.0),
        text,
    );

    let sub_label = if shift.is_blocked {
        Some("Unavailable")
    } else {
        shift.job.as_deref()
    };
    if let Some(sub) = sub_label {
        if rect.width() > 60.0 {
            painter.text(
                egui::pos2(rect.min.x + 6.0, rect.max.y - 5.0),
                egui::Align2::LEFT_BOTTOM,
                sub,
                egui::FontId::proportional(11.0),
                text.gamma_multiply(0.7),
            );
        }
    }
}

/// Translate raw egui pointer state into controller calls, and queue hover
/// input for the ghost calculator.
#[allow(clippy::too_many_arguments)]
fn forward_pointer_events(
    ui: &Ui,
    config: &Config,
    store: &RosterStore,
    controller: &mut DragController,
    ghost: Option<GhostSlot>,
    ghost_latch: &mut FrameCoalescer<GhostInput>,
    mapper: &TimelineMapper,
    grid_rect: Rect,
    lane_height: f32,
    block_rects: &[(Rect, ShiftSnapshot)],
    today: NaiveDate,
) {
    let ctx = ui.ctx().clone();
    let time_ms = ctx.input(|i| (i.time * 1000.0) as u64);
    let pointer_pos = ctx.input(|i| i.pointer.latest_pos());
    let pressed = ctx.input(|i| i.pointer.button_pressed(PointerButton::Primary));
    let released = ctx.input(|i| i.pointer.button_released(PointerButton::Primary));
    let cancelled = ctx.input(|i| {
        i.key_pressed(egui::Key::Escape) || i.pointer.button_pressed(PointerButton::Secondary)
    });

    // egui exposes one mouse pointer; the engine still keys sessions by id.
    const MOUSE: u64 = 0;

    if cancelled {
        controller.pointer_cancel(MOUSE);
    }

    let Some(pos) = pointer_pos else {
        // Pointer gone entirely (left the window, platform capture loss).
        if controller.has_session() {
            controller.pointer_cancel(MOUSE);
        }
        ghost_latch.clear();
        return;
    };

    let point = PointerPoint {
        x: pos.x - grid_rect.min.x,
        y: pos.y - grid_rect.min.y,
    };
    let over_grid = grid_rect.contains(pos);

    let employees = store.employees();
    let lane = ((pos.y - grid_rect.min.y) / lane_height).floor() as i64;
    let lane_employee: Option<EmployeeId> = (over_grid
        && (0..employees.len() as i64).contains(&lane))
    .then(|| employees[lane as usize].id);

    let hit = block_rects.iter().find(|(r, _)| r.contains(pos));

    // Cursor feedback when idle over a draggable block
    if controller.is_dragging() {
        ctx.set_cursor_icon(CursorIcon::Grabbing);
    } else if !controller.has_session() {
        if let Some((rect, snapshot)) = hit {
            if !snapshot.is_blocked {
                let near_edge = pos.x - rect.min.x < EDGE_GRAB_PX
                    || rect.max.x - pos.x < EDGE_GRAB_PX;
                ctx.set_cursor_icon(if near_edge {
                    CursorIcon::ResizeHorizontal
                } else {
                    CursorIcon::Move
                });
            }
        }
    }

    if pressed && over_grid {
        let target = match hit {
            Some((rect, snapshot)) => {
                let mode = if pos.x - rect.min.x < EDGE_GRAB_PX {
                    DragMode::ResizeLeft
                } else if rect.max.x - pos.x < EDGE_GRAB_PX {
                    DragMode::ResizeRight
                } else {
                    DragMode::Move
                };
                Some((GestureTarget::Shift { shift: *snapshot, mode }, snapshot.date))
            }
            None => ghost
                .filter(|g| Some(g.employee_id) == lane_employee)
                .map(|g| (GestureTarget::Empty { ghost: Some(g) }, g.date)),
        };

        if let Some((target, date)) = target {
            let editable = RosterStore::is_editable_date(date, today);
            controller.pointer_down(MOUSE, point, time_ms, Some(target), editable, mapper);
        }
    }

    controller.pointer_move(MOUSE, point, mapper);

    if released {
        controller.pointer_up(MOUSE, time_ms, mapper, &|employee, date, start, end| {
            store.overlaps_existing(employee, date, start, end, None)
        });
    }

    // Queue hover input; the app recomputes the ghost once next frame.
    if over_grid && hit.is_none() {
        if let (Some(employee_id), Some(minutes)) =
            (lane_employee, mapper.offset_to_minutes(point.x))
        {
            let (date, hovered_minutes) = mapper.split_minutes(minutes);
            ghost_latch.set(GhostInput {
                employee_id,
                date,
                hovered_minutes,
                pointer: PointerKind::Mouse,
                drag_active: controller.has_session(),
                today,
                hours: config.business_hours.range_for(date),
                snap_minutes: controller.config().snap_minutes,
            });
        }
    } else {
        ghost_latch.clear();
    }
}
