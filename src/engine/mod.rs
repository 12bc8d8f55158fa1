//! The shift-timeline engine: coordinate mapping, snapping/clamping, the
//! continuous-window state, and the pointer gesture state machine. Pure and
//! UI-free; the presentation layer feeds pointer events in and renders the
//! preview/event state that comes out.

mod controller;
mod frame;
mod ghost;
mod lock;
mod mapper;
mod snap;
mod window;

pub use controller::{
    DragController, DragMode, EngineConfig, EngineError, EngineEvent, GestureTarget,
    PointerPoint, ShiftPreview, ShiftSnapshot,
};
pub use frame::FrameCoalescer;
pub use ghost::{ghost_slot, GhostInput, GhostSlot, PointerKind};
pub use mapper::TimelineMapper;
pub use window::WindowState;
