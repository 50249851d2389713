//! Data models for tablero.

mod aggregate;
mod court;
mod schedule;

pub use aggregate::CourtWeek;
pub use court::{load_courts, parse_court_table, Court};
pub use schedule::{week_label, Case, RoomAssignment, WeekInfo};
