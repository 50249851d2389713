//! Request descriptors for the portal's AJAX endpoints.
//!
//! Phase 1 asks each court for its weekly room-assignment table; phase 2 asks
//! for the case table of every (date, room) combination discovered in phase
//! 1. Field names mirror the upstream form parameters.

use serde::Serialize;

use crate::error::PipelineError;
use crate::models::{Court, WeekInfo};

/// Fixed `tipoTabla` discriminator the portal expects on both endpoints.
pub const TABLE_TYPE: u8 = 3;

/// POST payload for the room-assignment endpoint, one per court.
#[derive(Debug, Clone, Serialize)]
pub struct RoomQuery {
    #[serde(rename = "codCorte")]
    pub court_code: String,
    #[serde(rename = "tipoTabla")]
    pub table_type: u8,
    #[serde(rename = "condicion")]
    pub condition: String,
}

/// POST payload for the case endpoint, one per (court, date, room).
#[derive(Debug, Clone, Serialize)]
pub struct CaseQuery {
    #[serde(rename = "numSala")]
    pub room: u32,
    #[serde(rename = "codCorte")]
    pub court_code: String,
    #[serde(rename = "tipoTabla")]
    pub table_type: u8,
    #[serde(rename = "fechaTabla")]
    pub date: String,
    #[serde(rename = "nomSala")]
    pub room_name: String,
    #[serde(rename = "condicion")]
    pub condition: String,
}

impl CaseQuery {
    /// The (date, room) pair this query was built for. Assembly matches case
    /// results back to room assignments through this key, never through the
    /// emission order of the Cartesian product.
    pub fn key(&self) -> (&str, u32) {
        (self.date.as_str(), self.room)
    }
}

/// Build one room-assignment query per court, in court-list order.
pub fn build_room_queries(courts: &[Court]) -> Result<Vec<RoomQuery>, PipelineError> {
    courts
        .iter()
        .map(|court| {
            if court.code.is_empty() || court.condition.is_empty() {
                return Err(PipelineError::Validation(format!(
                    "court '{}' lacks codCorte or condicion",
                    if court.name.is_empty() { "?" } else { &court.name },
                )));
            }
            Ok(RoomQuery {
                court_code: court.code.clone(),
                table_type: TABLE_TYPE,
                condition: court.condition.clone(),
            })
        })
        .collect()
}

/// Build case queries per court: the Cartesian product of that court's
/// distinct dates and distinct rooms, dates outermost.
///
/// The result is grouped by court (one inner list per court, in the same
/// court order as the input), which is what dispatch and assembly rely on.
/// A court with no dates or no recognized rooms gets an empty group.
pub fn build_case_queries(pairs: &[(&Court, &WeekInfo)]) -> Vec<Vec<CaseQuery>> {
    pairs
        .iter()
        .map(|(court, week)| {
            let mut queries = Vec::with_capacity(week.dates.len() * week.rooms.len());
            for date in &week.dates {
                for &room in &week.rooms {
                    queries.push(CaseQuery {
                        room,
                        court_code: court.code.clone(),
                        table_type: TABLE_TYPE,
                        date: date.clone(),
                        room_name: String::new(),
                        condition: court.condition.clone(),
                    });
                }
            }
            queries
        })
        .collect()
}
