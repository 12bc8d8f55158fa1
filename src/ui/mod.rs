mod app;
mod theme;
mod views;

pub use app::ShiftBoardApp;
pub(crate) use theme::{setup_fonts, setup_theme};
