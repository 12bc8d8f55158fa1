use chrono::{Duration, Local, NaiveDate};
use eframe::egui;
use egui::RichText;

use crate::config::{ClockFormat, Config, ViewMode};
use crate::engine::{
    ghost_slot, DragController, EngineConfig, EngineEvent, FrameCoalescer, GhostInput, GhostSlot,
    WindowState,
};
use crate::roster::{format_minutes, RosterStore, ShiftId};
use super::views;

/// A move/resize waiting on the confirmation dialog. The engine holds the
/// preview position; this is just the dialog's copy of the proposal.
struct PendingProposal {
    shift_id: ShiftId,
    date: NaiveDate,
    start_hour: f64,
    end_hour: f64,
}

struct ShiftEditor {
    shift_id: ShiftId,
    job: String,
    notes: String,
}

pub struct ShiftBoardApp {
    config: Config,
    store: RosterStore,
    controller: DragController,

    today: NaiveDate,
    selected_date: NaiveDate,

    // Continuous-mode state
    window: Option<WindowState>,
    pending_scroll: Option<f32>,
    scroll_latch: FrameCoalescer<(f32, f32)>, // (scroll_x, viewport_px)
    last_viewport: f32,

    // Hover ghost, recomputed at most once per frame
    ghost_latch: FrameCoalescer<GhostInput>,
    ghost: Option<GhostSlot>,

    // Dialogs
    pending_confirm: Option<PendingProposal>,
    editor: Option<ShiftEditor>,

    status_message: Option<(String, bool)>, // (message, is_error)
}

impl ShiftBoardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        super::setup_fonts(&cc.egui_ctx);
        super::setup_theme(&cc.egui_ctx);

        let mut status_message = None;
        let config = match Config::load() {
            Ok(config) => config,
            Err(e) => {
                status_message = Some((format!("Config error: {e}"), true));
                Config::default()
            }
        };
        cc.egui_ctx.set_pixels_per_point(config.font_scale);

        let today = Local::now().date_naive();

        Self {
            config,
            store: RosterStore::demo(today),
            controller: DragController::new(EngineConfig::default()),
            today,
            selected_date: today,
            window: None,
            pending_scroll: None,
            scroll_latch: FrameCoalescer::default(),
            last_viewport: 1200.0,
            ghost_latch: FrameCoalescer::default(),
            ghost: None,
            pending_confirm: None,
            editor: None,
            status_message,
        }
    }

    fn open_hour_for(&self, date: NaiveDate) -> Option<f64> {
        self.config.business_hours.range_for(date).map(|(open, _)| open)
    }

    /// The date shown in the header: the viewport-center day in continuous
    /// mode, otherwise the selected day.
    fn header_date(&self) -> NaiveDate {
        match self.config.view_mode {
            ViewMode::Continuous => self
                .window
                .as_ref()
                .map(|w| w.displayed())
                .unwrap_or(self.selected_date),
            ViewMode::SingleDay => self.selected_date,
        }
    }

    fn navigate(&mut self, target: NaiveDate, reanchor: bool) {
        match self.config.view_mode {
            ViewMode::SingleDay => {
                self.selected_date = target;
            }
            ViewMode::Continuous => {
                let open_hour = self.open_hour_for(target);
                if let Some(window) = self.window.as_mut() {
                    let cmd = window.go_to_date(target, reanchor, self.last_viewport, open_hour);
                    self.pending_scroll = Some(cmd.scroll_x);
                }
                self.selected_date = self.header_date();
            }
        }
    }

    fn set_view_mode(&mut self, mode: ViewMode) {
        if self.config.view_mode == mode {
            return;
        }
        // Leaving continuous mode keeps the day the user was looking at.
        if self.config.view_mode == ViewMode::Continuous {
            self.selected_date = self.header_date();
        }
        self.config.view_mode = mode;
        self.window = None;
        self.save_config();
    }

    fn save_config(&mut self) {
        if let Err(e) = self.config.save() {
            self.status_message = Some((format!("Couldn't save settings: {e}"), true));
        }
    }

    /// Drain the engine's event queue into app state changes.
    fn pump_engine_events(&mut self) {
        for event in self.controller.take_events() {
            match event {
                EngineEvent::ShiftProposed {
                    shift_id,
                    date,
                    start_hour,
                    end_hour,
                } => {
                    self.pending_confirm = Some(PendingProposal {
                        shift_id,
                        date,
                        start_hour,
                        end_hour,
                    });
                }
                EngineEvent::CreateRequested {
                    employee_id,
                    date,
                    start_hour,
                    end_hour,
                } => {
                    self.store.create_shift(employee_id, date, start_hour, end_hour);
                    self.status_message = Some(("Shift added".to_string(), false));
                }
                EngineEvent::ShiftClicked { shift_id } => {
                    if let Some(shift) = self.store.shift(shift_id) {
                        self.editor = Some(ShiftEditor {
                            shift_id,
                            job: shift.job.clone().unwrap_or_default(),
                            notes: shift.notes.clone().unwrap_or_default(),
                        });
                    }
                }
                EngineEvent::Rejected(e) => {
                    self.status_message = Some((e.to_string(), true));
                }
            }
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Shiftline").size(18.0).strong());
            ui.add_space(16.0);

            let header_date = self.header_date();
            if ui.button(egui_phosphor::fill::CARET_LEFT).clicked() {
                self.navigate(header_date - Duration::days(1), false);
            }
            if ui.button(egui_phosphor::fill::CARET_RIGHT).clicked() {
                self.navigate(header_date + Duration::days(1), false);
            }
            if ui.button("Today").clicked() {
                // An explicit jump always re-anchors.
                self.navigate(self.today, true);
            }

            let date_label = if header_date == self.today {
                format!("Today - {}", header_date.format("%A, %B %-d"))
            } else {
                header_date.format("%A, %B %-d").to_string()
            };
            ui.label(RichText::new(date_label).size(15.0));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut mode = self.config.view_mode;
                if ui
                    .selectable_label(mode == ViewMode::Continuous, "3-day")
                    .clicked()
                {
                    mode = ViewMode::Continuous;
                }
                if ui
                    .selectable_label(mode == ViewMode::SingleDay, "Day")
                    .clicked()
                {
                    mode = ViewMode::SingleDay;
                }
                self.set_view_mode(mode);

                ui.separator();

                let is_12h = self.config.clock_format == ClockFormat::Hour12;
                if ui.selectable_label(is_12h, "12h").clicked() {
                    self.config.clock_format = if is_12h {
                        ClockFormat::Hour24
                    } else {
                        ClockFormat::Hour12
                    };
                    self.save_config();
                }

                ui.separator();

                if ui.button("Publish day").clicked() {
                    self.store.publish_day(self.header_date());
                    self.status_message = Some(("Day published".to_string(), false));
                }
            });
        });
    }

    fn render_timeline(&mut self, ui: &mut egui::Ui) {
        match self.config.view_mode {
            ViewMode::SingleDay => {
                views::render_single_day(
                    ui,
                    &self.config,
                    &self.store,
                    &mut self.controller,
                    self.ghost,
                    &mut self.ghost_latch,
                    self.selected_date,
                    self.today,
                );
            }
            ViewMode::Continuous => {
                // Entering continuous mode anchors on the selected day.
                if self.window.is_none() {
                    let (window, cmd) = WindowState::enter(
                        self.selected_date,
                        self.last_viewport,
                        self.open_hour_for(self.selected_date),
                    );
                    self.window = Some(window);
                    self.pending_scroll = Some(cmd.scroll_x);
                }
                let Some(window) = self.window else {
                    return;
                };

                let result = views::render_continuous(
                    ui,
                    &self.config,
                    &self.store,
                    &mut self.controller,
                    self.ghost,
                    &mut self.ghost_latch,
                    &window,
                    self.pending_scroll.take(),
                    self.today,
                );
                self.scroll_latch.set((result.scroll_x, result.viewport_px));
            }
        }
    }

    fn render_confirm_dialog(&mut self, ctx: &egui::Context) {
        let Some(proposal) = &self.pending_confirm else {
            return;
        };

        let employee_name = self
            .store
            .shift(proposal.shift_id)
            .and_then(|s| {
                self.store
                    .employees()
                    .iter()
                    .find(|e| e.id == s.employee_id)
            })
            .map(|e| e.name.clone())
            .unwrap_or_else(|| "this employee".to_string());
        let summary = format!(
            "Move {}'s shift to {} - {} on {}?",
            employee_name,
            format_minutes((proposal.start_hour * 60.0).round() as i32, self.config.clock_format),
            format_minutes((proposal.end_hour * 60.0).round() as i32, self.config.clock_format),
            proposal.date.format("%a %b %-d"),
        );

        let mut confirmed = false;
        let mut dismissed = false;
        egui::Window::new("Confirm change")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(summary);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Confirm").clicked() {
                        confirmed = true;
                    }
                    if ui.button("Cancel").clicked() {
                        dismissed = true;
                    }
                });
            });
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            dismissed = true;
        }

        if confirmed {
            let Some(p) = self.pending_confirm.take() else {
                return;
            };
            match self
                .store
                .apply_proposal(p.shift_id, p.date, p.start_hour, p.end_hour)
            {
                Ok(()) => {
                    self.controller.resolve_proposal(true);
                    self.status_message = Some(("Shift updated".to_string(), false));
                }
                Err(e) => {
                    // The shift disappeared underneath the dialog; restore.
                    self.controller.resolve_proposal(false);
                    self.status_message = Some((e.to_string(), true));
                }
            }
        } else if dismissed {
            self.pending_confirm = None;
            self.controller.resolve_proposal(false);
        }
    }

    fn render_editor_dialog(&mut self, ctx: &egui::Context) {
        let Some(editor) = &mut self.editor else {
            return;
        };

        let mut save = false;
        let mut delete = false;
        let mut close = false;
        egui::Window::new("Edit shift")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Job");
                    ui.text_edit_singleline(&mut editor.job);
                });
                ui.horizontal(|ui| {
                    ui.label("Notes");
                    ui.text_edit_singleline(&mut editor.notes);
                });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        save = true;
                    }
                    if ui.button(RichText::new("Delete").color(egui::Color32::from_rgb(0xe5, 0x4d, 0x42))).clicked() {
                        delete = true;
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });

        if save {
            let Some(editor) = self.editor.take() else {
                return;
            };
            let job = (!editor.job.is_empty()).then_some(editor.job);
            let notes = (!editor.notes.is_empty()).then_some(editor.notes);
            if let Err(e) = self.store.update_details(editor.shift_id, job, notes) {
                self.status_message = Some((e.to_string(), true));
            }
        } else if delete {
            let Some(editor) = self.editor.take() else {
                return;
            };
            self.store.delete_shift(editor.shift_id);
            self.status_message = Some(("Shift deleted".to_string(), false));
        } else if close {
            self.editor = None;
        }
    }
}

impl eframe::App for ShiftBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.today = Local::now().date_naive();

        // Recompute the hover ghost from the newest queued input, once.
        // Slots colliding with an existing shift never show.
        self.ghost = self.ghost_latch.take().and_then(|input| {
            ghost_slot(&input).filter(|g| {
                !self.store.overlaps_existing(
                    g.employee_id,
                    g.date,
                    g.start_minutes,
                    g.end_minutes,
                    None,
                )
            })
        });

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            self.render_header(ui);
            ui.add_space(6.0);
        });

        if let Some((message, is_error)) = self.status_message.clone() {
            egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let color = if is_error {
                        egui::Color32::from_rgb(0xe5, 0x4d, 0x42)
                    } else {
                        egui::Color32::from_rgb(0x2e, 0x8b, 0x57)
                    };
                    ui.label(RichText::new(message).color(color));
                    if ui.small_button(egui_phosphor::fill::X).clicked() {
                        self.status_message = None;
                    }
                });
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_timeline(ui);
        });

        // Header date follows the scroll center, coalesced to once per frame.
        if let Some((scroll_x, viewport_px)) = self.scroll_latch.take() {
            self.last_viewport = viewport_px;
            if let Some(window) = self.window.as_mut() {
                window.update_displayed(scroll_x, viewport_px);
            }
        }

        self.pump_engine_events();
        self.render_confirm_dialog(ctx);
        self.render_editor_dialog(ctx);

        // Gestures and previews move with the pointer; repaint continuously
        // while one is live or a ghost is showing.
        if self.controller.has_session() || self.ghost.is_some() {
            ctx.request_repaint();
        }
    }
}
