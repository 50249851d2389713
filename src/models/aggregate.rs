//! The per-court aggregation unit.

use crate::error::PipelineError;
use crate::models::{Case, Court, RoomAssignment, WeekInfo};

/// Everything known about one court for the processed week.
///
/// `cases_by_assignment[i]` holds the cases for `assignments[i]`'s
/// (date, room) pair; the two vectors are always the same length. The
/// constructor is the only way to build one, so the invariant cannot drift.
#[derive(Debug, Clone)]
pub struct CourtWeek {
    pub court: Court,
    pub assignments: Vec<RoomAssignment>,
    pub week: WeekInfo,
    cases_by_assignment: Vec<Vec<Case>>,
}

impl CourtWeek {
    /// Build an aggregated court record, enforcing the length invariant.
    pub fn new(
        court: Court,
        assignments: Vec<RoomAssignment>,
        week: WeekInfo,
        cases_by_assignment: Vec<Vec<Case>>,
    ) -> Result<Self, PipelineError> {
        if assignments.len() != cases_by_assignment.len() {
            return Err(PipelineError::Alignment {
                context: "cases per room assignment",
                expected: assignments.len(),
                actual: cases_by_assignment.len(),
            });
        }
        Ok(Self {
            court,
            assignments,
            week,
            cases_by_assignment,
        })
    }

    /// Cases for the assignment at `index`.
    pub fn cases_for(&self, index: usize) -> &[Case] {
        &self.cases_by_assignment[index]
    }

    /// Iterate (assignment, cases) pairs in table order.
    pub fn entries(&self) -> impl Iterator<Item = (&RoomAssignment, &[Case])> {
        self.assignments
            .iter()
            .zip(self.cases_by_assignment.iter().map(|c| c.as_slice()))
    }

    /// Total case count across all assignments.
    pub fn case_count(&self) -> usize {
        self.cases_by_assignment.iter().map(|c| c.len()).sum()
    }
}
