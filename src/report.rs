//! Row projection and keyword filtering.
//!
//! Flattens the aggregated court records into the tabular shape the sheets
//! use: one row per (room assignment, case) pair, plus a per-court partition
//! and a caption-filtered subset.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::PipelineError;
use crate::models::CourtWeek;
use crate::normalize::fold_for_match;

/// Column headers for the emitted sheets. The last three columns are
/// reserved for downstream manual annotation and always written blank.
pub const ROW_HEADER: [&str; 10] = [
    "Fecha",
    "Corte",
    "Lugar",
    "Carátula",
    "Ingreso",
    "Relator",
    "Sala",
    "",
    "",
    "",
];

/// One output row: a case in a room on a date, for a court.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub date: String,
    pub court_name: String,
    pub venue: String,
    pub caption: String,
    pub intake_id: String,
    pub rapporteur: String,
    pub room_number: Option<u32>,
}

impl Row {
    /// Render the ten sheet columns, reserved columns last.
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.court_name.clone(),
            self.venue.clone(),
            self.caption.clone(),
            self.intake_id.clone(),
            self.rapporteur.clone(),
            self.room_number.map(|n| n.to_string()).unwrap_or_default(),
            String::new(),
            String::new(),
            String::new(),
        ]
    }
}

/// Case/accent-insensitive caption matcher built from a term list.
pub struct CaptionFilter {
    pattern: Regex,
}

impl CaptionFilter {
    /// Compile an alternation over the given terms.
    ///
    /// An empty term list is rejected: a regex built from zero alternatives
    /// must never silently turn into "match everything".
    pub fn new(terms: &[String]) -> Result<Self, PipelineError> {
        let folded: Vec<String> = terms
            .iter()
            .map(|t| fold_for_match(t.trim()))
            .filter(|t| !t.is_empty())
            .collect();
        if folded.is_empty() {
            return Err(PipelineError::Validation(
                "filter term list is empty; supply at least one term".into(),
            ));
        }

        let alternation = folded
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&alternation)
            .map_err(|e| PipelineError::Validation(format!("bad filter term: {e}")))?;
        Ok(Self { pattern })
    }

    /// Whether a caption matches any term.
    pub fn matches(&self, caption: &str) -> bool {
        self.pattern.is_match(&fold_for_match(caption))
    }
}

/// Load filter terms from a plain text file, one per line; blank lines are
/// skipped.
pub fn load_filter_terms(path: &Path) -> Result<Vec<String>, PipelineError> {
    let text =
        fs::read_to_string(path).map_err(|e| PipelineError::io(path.display().to_string(), e))?;
    Ok(text
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

/// The projected output: every row, the per-court partition, and the
/// filtered subset.
pub struct Report {
    pub all: Vec<Row>,
    /// One partition per distinct court name, in first-observed order.
    pub by_court: Vec<(String, Vec<Row>)>,
    pub filtered: Vec<Row>,
}

/// Flatten aggregated courts into rows and partition/filter them.
pub fn project(court_weeks: &[CourtWeek], filter: &CaptionFilter) -> Report {
    let mut all = Vec::new();
    for week in court_weeks {
        for (assignment, cases) in week.entries() {
            for case in cases {
                all.push(Row {
                    date: assignment.date.clone(),
                    court_name: week.court.name.clone(),
                    venue: case.venue.clone(),
                    caption: case.caption.clone(),
                    intake_id: case.intake_id.clone(),
                    rapporteur: assignment.rapporteur.clone(),
                    room_number: assignment.room_number,
                });
            }
        }
    }

    let mut by_court: Vec<(String, Vec<Row>)> = Vec::new();
    for row in &all {
        match by_court.iter_mut().find(|(name, _)| name == &row.court_name) {
            Some((_, rows)) => rows.push(row.clone()),
            None => by_court.push((row.court_name.clone(), vec![row.clone()])),
        }
    }

    let filtered = all
        .iter()
        .filter(|row| filter.matches(&row.caption))
        .cloned()
        .collect();

    Report {
        all,
        by_court,
        filtered,
    }
}
