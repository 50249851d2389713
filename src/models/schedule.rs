//! Room assignments, cases, and the per-court week summary.

use serde::{Deserialize, Serialize};

use crate::normalize::ordinal_name_to_number;

/// One (date, room) pairing from a court's room-assignment table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAssignment {
    /// Portal date token, `DD/MM/YYYY`. Kept as an opaque string; only the
    /// week label compares dates, and it does so component-wise.
    pub date: String,
    /// Room name as published, e.g. "Segunda".
    pub room_label: String,
    /// Room number derived from the label; `None` for unrecognized names.
    pub room_number: Option<u32>,
    /// Assigned rapporteur.
    pub rapporteur: String,
}

impl RoomAssignment {
    /// Build from one extracted 3-cell group `{date, room, rapporteur}`.
    pub fn from_cells(date: String, room_label: String, rapporteur: String) -> Self {
        let room_number = ordinal_name_to_number(&room_label);
        Self {
            date,
            room_label,
            room_number,
            rapporteur,
        }
    }
}

/// One docket entry from a case table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Scheduled venue, free text.
    pub venue: String,
    /// Case title; the keyword filter matches against this field.
    pub caption: String,
    /// Intake identifier, free text.
    pub intake_id: String,
}

/// Distinct dates and recognized room numbers observed for one court.
///
/// Parameterizes phase-2 request generation only; never persisted. Both lists
/// keep first-observed order so request construction stays deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekInfo {
    pub dates: Vec<String>,
    pub rooms: Vec<u32>,
}

impl WeekInfo {
    /// Collect distinct dates and rooms from a court's assignments.
    ///
    /// Assignments whose room label did not resolve to a number are left out
    /// of `rooms`; the caller decides how loudly to report that.
    pub fn from_assignments(assignments: &[RoomAssignment]) -> Self {
        let mut info = WeekInfo::default();
        for assignment in assignments {
            if !info.dates.contains(&assignment.date) {
                info.dates.push(assignment.date.clone());
            }
            if let Some(room) = assignment.room_number {
                if !info.rooms.contains(&room) {
                    info.rooms.push(room);
                }
            }
        }
        info
    }
}

/// Sort key for a `DD/MM/YYYY` token: `(year, month, day)` as strings.
///
/// The token is never parsed into a date type; component reordering is enough
/// to get calendar order for well-formed portal dates.
fn date_key(date: &str) -> (String, String, String) {
    let mut parts = date.splitn(3, '/');
    let day = parts.next().unwrap_or("").to_string();
    let month = parts.next().unwrap_or("").to_string();
    let year = parts.next().unwrap_or("").to_string();
    (year, month, day)
}

/// Compute the week label from the first court's distinct dates:
/// `"Semana del <first> al <last>"` with calendar min/max.
pub fn week_label(dates: &[String]) -> Option<String> {
    let first = dates.iter().min_by_key(|d| date_key(d))?;
    let last = dates.iter().max_by_key(|d| date_key(d))?;
    Some(format!("Semana del {} al {}", first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(date: &str, room: &str) -> RoomAssignment {
        RoomAssignment::from_cells(date.into(), room.into(), "R. Pérez".into())
    }

    #[test]
    fn test_room_number_from_label() {
        assert_eq!(assignment("06/07/2026", "Segunda").room_number, Some(2));
        assert_eq!(assignment("06/07/2026", "SÉPTIMA").room_number, Some(7));
        assert_eq!(assignment("06/07/2026", "Especial").room_number, None);
    }

    #[test]
    fn test_week_info_distinct_in_observed_order() {
        let assignments = vec![
            assignment("06/07/2026", "Segunda"),
            assignment("07/07/2026", "Segunda"),
            assignment("06/07/2026", "Primera"),
            assignment("07/07/2026", "Especial"),
        ];
        let info = WeekInfo::from_assignments(&assignments);
        assert_eq!(info.dates, vec!["06/07/2026", "07/07/2026"]);
        assert_eq!(info.rooms, vec![2, 1]);
    }

    #[test]
    fn test_week_label_calendar_order() {
        // Lexical min would wrongly pick 02/07 over 29/06.
        let dates = vec!["02/07/2026".to_string(), "29/06/2026".to_string()];
        assert_eq!(
            week_label(&dates).unwrap(),
            "Semana del 29/06/2026 al 02/07/2026"
        );
    }

    #[test]
    fn test_week_label_empty() {
        assert_eq!(week_label(&[]), None);
    }
}
