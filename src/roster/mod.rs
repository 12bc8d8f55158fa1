mod store;
mod time;
mod types;

pub use store::RosterStore;
pub use time::{format_minutes, hour_to_minutes, minutes_to_hour};
pub use types::*;
