use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

pub fn setup_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    // Phosphor icons as a fallback in the Proportional family
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Fill);

    ctx.set_fonts(fonts);
}

pub fn setup_theme(ctx: &egui::Context) {
    let mut style = Style::default();

    // Dark visuals with blue accents
    let mut visuals = Visuals::dark();

    // Background colors - pure black
    let bg = Color32::BLACK;
    visuals.panel_fill = bg;
    visuals.window_fill = bg;
    visuals.faint_bg_color = Color32::from_rgb(20, 20, 18);
    visuals.extreme_bg_color = bg;

    // Widget colors - warm grays (R=G > B for warmth)
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(40, 40, 38);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(176, 176, 168));

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(56, 56, 52);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(200, 200, 192));

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(80, 80, 74);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::from_rgb(255, 255, 255));

    // Accent color for active/pressed buttons
    let accent = Color32::from_rgb(19, 152, 244);
    visuals.widgets.active.bg_fill = accent;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    // Selection color (accent background, white text)
    visuals.selection.bg_fill = accent;
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.hyperlink_color = accent;

    // Rounded corners
    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);
    visuals.widgets.active.rounding = Rounding::same(6.0);
    visuals.window_rounding = Rounding::same(8.0);

    style.visuals = visuals;

    // Font sizes - standardized at 14pt
    style.text_styles = [
        (TextStyle::Small, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(12.0, 10.0);
    style.spacing.button_padding = egui::vec2(18.0, 10.0);
    style.spacing.window_margin = egui::Margin::same(24.0);

    ctx.set_style(style);
}

/// Returns (fill, border, text) for a shift block.
pub fn block_colors(published: bool, blocked: bool) -> (Color32, Color32, Color32) {
    if blocked {
        // Hatched-looking gray for time-off / blackout placeholders
        (
            Color32::from_rgb(0x2a, 0x2a, 0x28),
            Color32::from_rgb(0x45, 0x45, 0x40),
            Color32::from_rgb(0x90, 0x90, 0x88),
        )
    } else if published {
        (
            Color32::from_rgb(0x0e, 0x3a, 0x22),
            Color32::from_rgb(0x2e, 0x8b, 0x57),
            Color32::from_rgb(0xd8, 0xf0, 0xe0),
        )
    } else {
        (
            Color32::from_rgb(0x10, 0x32, 0x52),
            Color32::from_rgb(0x13, 0x98, 0xf4),
            Color32::from_rgb(0xd8, 0xe8, 0xf8),
        )
    }
}

/// Returns (hour_line, quarter_line, lane_line) grid stroke colors
pub fn grid_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(0x50, 0x50, 0x4a),
        Color32::from_rgb(0x24, 0x24, 0x22),
        Color32::from_rgb(0x40, 0x40, 0x3c),
    )
}

/// Returns (fill, border) for the translucent hover/drag ghost
pub fn ghost_colors() -> (Color32, Color32) {
    (
        Color32::from_rgba_unmultiplied(0x61, 0xAF, 0xEF, 60),
        Color32::from_rgba_unmultiplied(0x61, 0xAF, 0xEF, 120),
    )
}
