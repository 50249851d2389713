//! Cross-referencing of per-court result sets.
//!
//! The ordered court list is the single source of truth for alignment: every
//! per-court collection (room bodies, assignments, case groups) is produced
//! by traversing it once, and every merge goes through [`zip_exact`], which
//! refuses to pad or truncate. Case lists are bound to their room assignment
//! through a (date, room) key rather than Cartesian emission order.

use std::collections::HashMap;

use tracing::warn;

use crate::error::PipelineError;
use crate::models::{Case, Court, CourtWeek, RoomAssignment, WeekInfo};

/// Case lists for one court, keyed by the (date, room) their query targeted.
pub type KeyedCases = Vec<((String, u32), Vec<Case>)>;

/// Zip two same-length collections into pairs.
///
/// A length mismatch means the court-order invariant was already broken
/// upstream; it fails immediately with both lengths, never a partial merge.
pub fn zip_exact<T, U>(
    primary: Vec<T>,
    secondary: Vec<U>,
    context: &'static str,
) -> Result<Vec<(T, U)>, PipelineError> {
    if primary.len() != secondary.len() {
        return Err(PipelineError::Alignment {
            context,
            expected: primary.len(),
            actual: secondary.len(),
        });
    }
    Ok(primary.into_iter().zip(secondary).collect())
}

/// Merge courts, their room assignments, their week summaries, and their
/// fetched case lists into one [`CourtWeek`] per court, in court-list order.
pub fn assemble_court_weeks(
    courts: Vec<Court>,
    assignments_per_court: Vec<Vec<RoomAssignment>>,
    weeks_per_court: Vec<WeekInfo>,
    cases_per_court: Vec<KeyedCases>,
) -> Result<Vec<CourtWeek>, PipelineError> {
    let with_assignments = zip_exact(
        courts,
        assignments_per_court,
        "room assignments per court",
    )?;
    let with_weeks = zip_exact(with_assignments, weeks_per_court, "week info per court")?;
    let zipped = zip_exact(with_weeks, cases_per_court, "case groups per court")?;

    zipped
        .into_iter()
        .map(|(((court, assignments), week), keyed_cases)| {
            let mut by_key: HashMap<(String, u32), Vec<Case>> = keyed_cases.into_iter().collect();

            let cases_by_assignment = assignments
                .iter()
                .map(|assignment| match assignment.room_number {
                    Some(room) => by_key
                        .remove(&(assignment.date.clone(), room))
                        .unwrap_or_default(),
                    None => {
                        warn!(
                            court = %court.name,
                            room = %assignment.room_label,
                            date = %assignment.date,
                            "unrecognized room name; no cases attached"
                        );
                        Vec::new()
                    }
                })
                .collect();

            CourtWeek::new(court, assignments, week, cases_by_assignment)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn court(code: &str, name: &str) -> Court {
        Court {
            code: code.into(),
            condition: "1".into(),
            name: name.into(),
        }
    }

    fn assignment(date: &str, room: &str) -> RoomAssignment {
        RoomAssignment::from_cells(date.into(), room.into(), "N. Soto".into())
    }

    fn case(caption: &str) -> Case {
        Case {
            venue: "Santiago".into(),
            caption: caption.into(),
            intake_id: "X-1".into(),
        }
    }

    #[test]
    fn test_zip_exact_rejects_mismatch() {
        let err = zip_exact(vec![1, 2, 3], vec!["a"], "test").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Alignment {
                expected: 3,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_zip_exact_pairs_positionally() {
        let pairs = zip_exact(vec![1, 2], vec!["a", "b"], "test").unwrap();
        assert_eq!(pairs, vec![(1, "a"), (2, "b")]);
    }

    fn weeks_for(assignments: &[Vec<RoomAssignment>]) -> Vec<WeekInfo> {
        assignments.iter().map(|a| WeekInfo::from_assignments(a)).collect()
    }

    #[test]
    fn test_assemble_binds_cases_by_key() {
        let courts = vec![court("10", "Santiago")];
        let assignments = vec![vec![
            assignment("06/07/2026", "Primera"),
            assignment("06/07/2026", "Segunda"),
        ]];
        // Keyed list deliberately out of table order.
        let cases = vec![vec![
            (("06/07/2026".to_string(), 2), vec![case("Recurso de Queja")]),
            (("06/07/2026".to_string(), 1), vec![]),
        ]];
        let weeks = weeks_for(&assignments);
        let assembled = assemble_court_weeks(courts, assignments, weeks, cases).unwrap();
        assert_eq!(assembled.len(), 1);
        assert!(assembled[0].cases_for(0).is_empty());
        assert_eq!(assembled[0].cases_for(1)[0].caption, "Recurso de Queja");
    }

    #[test]
    fn test_assemble_unrecognized_room_gets_empty_cases() {
        let courts = vec![court("10", "Santiago")];
        let assignments = vec![vec![assignment("06/07/2026", "Especial")]];
        let weeks = weeks_for(&assignments);
        let assembled = assemble_court_weeks(courts, assignments, weeks, vec![vec![]]).unwrap();
        assert_eq!(assembled[0].assignments.len(), 1);
        assert!(assembled[0].cases_for(0).is_empty());
    }

    #[test]
    fn test_assemble_rejects_misaligned_courts() {
        let courts = vec![court("10", "Santiago"), court("25", "Valparaíso")];
        let err = assemble_court_weeks(
            courts,
            vec![vec![]],
            vec![WeekInfo::default(), WeekInfo::default()],
            vec![vec![], vec![]],
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Alignment { .. }));
    }
}
