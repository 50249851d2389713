//! Court parameters and the inbound court table.
//!
//! Courts are loaded from a CSV whose first row names the columns; column
//! order is not assumed. The upstream column names are `codCorte`,
//! `condicion` and `Nombre Corte`, matched accent- and case-insensitively.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::normalize::fold_for_match;
use crate::tabular;

const COL_CODE: &str = "codcorte";
const COL_CONDITION: &str = "condicion";
const COL_NAME: &str = "nombre corte";

/// One judicial court, as queried against the portal.
///
/// Immutable for the duration of a pipeline run. The order of the court list
/// is the single source of truth for positional alignment downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    /// Opaque portal identifier (`codCorte`).
    pub code: String,
    /// Query condition token the portal expects (`condicion`).
    pub condition: String,
    /// Display name, used as the grouping key for row partitioning.
    pub name: String,
}

/// Parse the court table: header row first, one court per following row.
///
/// Fails naming the missing column or the offending row, before any network
/// activity happens.
pub fn parse_court_table(rows: &[Vec<String>]) -> Result<Vec<Court>, PipelineError> {
    let header = rows
        .first()
        .ok_or_else(|| PipelineError::Validation("court table is empty".into()))?;

    let find_column = |wanted: &str| -> Result<usize, PipelineError> {
        header
            .iter()
            .position(|cell| fold_for_match(cell.trim()) == wanted)
            .ok_or_else(|| {
                PipelineError::Validation(format!("court table is missing column '{wanted}'"))
            })
    };

    let code_idx = find_column(COL_CODE)?;
    let condition_idx = find_column(COL_CONDITION)?;
    let name_idx = find_column(COL_NAME)?;

    let mut courts = Vec::with_capacity(rows.len() - 1);
    for (line, row) in rows.iter().enumerate().skip(1) {
        let cell = |idx: usize| row.get(idx).map(|c| c.trim()).unwrap_or("");

        let code = cell(code_idx);
        let condition = cell(condition_idx);
        let name = cell(name_idx);

        if code.is_empty() || condition.is_empty() {
            return Err(PipelineError::Validation(format!(
                "court table row {} ('{}') lacks codCorte or condicion",
                line + 1,
                if name.is_empty() { "?" } else { name },
            )));
        }

        courts.push(Court {
            code: code.to_string(),
            condition: condition.to_string(),
            name: name.to_string(),
        });
    }

    Ok(courts)
}

/// Load and parse the court table from a CSV file.
pub fn load_courts(path: &Path) -> Result<Vec<Court>, PipelineError> {
    let text =
        fs::read_to_string(path).map_err(|e| PipelineError::io(path.display().to_string(), e))?;
    parse_court_table(&tabular::parse_rows(&text, ','))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_parse_header_keyed() {
        let rows = table(&[
            &["codCorte", "Nombre Corte", "condicion"],
            &["10", "Corte de Santiago", "1"],
            &["25", "Corte de Valparaíso", "2"],
        ]);
        let courts = parse_court_table(&rows).unwrap();
        assert_eq!(courts.len(), 2);
        assert_eq!(courts[0].code, "10");
        assert_eq!(courts[0].name, "Corte de Santiago");
        assert_eq!(courts[1].condition, "2");
    }

    #[test]
    fn test_parse_column_order_independent() {
        let reordered = table(&[
            &["condicion", "codCorte", "Nombre Corte"],
            &["1", "10", "Corte de Santiago"],
        ]);
        let courts = parse_court_table(&reordered).unwrap();
        assert_eq!(courts[0].code, "10");
        assert_eq!(courts[0].condition, "1");
    }

    #[test]
    fn test_parse_header_accent_insensitive() {
        let rows = table(&[&["CódCorte", "NOMBRE CORTE", "Condición"], &["7", "X", "1"]]);
        assert!(parse_court_table(&rows).is_ok());
    }

    #[test]
    fn test_missing_column_is_named() {
        let rows = table(&[&["codCorte", "Nombre Corte"], &["10", "Santiago"]]);
        let err = parse_court_table(&rows).unwrap_err();
        assert!(err.to_string().contains("condicion"));
    }

    #[test]
    fn test_incomplete_row_names_court() {
        let rows = table(&[
            &["codCorte", "Nombre Corte", "condicion"],
            &["10", "Corte de Santiago", "1"],
            &["", "Corte de Arica", "1"],
        ]);
        let err = parse_court_table(&rows).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 3"));
        assert!(msg.contains("Corte de Arica"));
    }
}
