//! Tabular sink for the weekly sheets.
//!
//! The pipeline hands a finished [`Report`] to a [`Sink`]; the default
//! implementation writes CSV files under a per-week directory: `todas.csv`
//! with every row, one file per court name, and `filtradas.csv` with the
//! keyword matches.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::PipelineError;
use crate::report::{Report, Row, ROW_HEADER};
use crate::tabular;

/// Destination for a projected weekly report.
pub trait Sink {
    fn write_report(&self, week_label: &str, report: &Report) -> Result<(), PipelineError>;
}

/// CSV sink rooted at an output directory.
pub struct CsvSink {
    directory: PathBuf,
}

impl CsvSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn write_sheet(&self, path: &Path, rows: &[Row]) -> Result<(), PipelineError> {
        let io_err = |e| PipelineError::io(path.display().to_string(), e);

        let mut file = fs::File::create(path).map_err(io_err)?;
        let header: Vec<String> = ROW_HEADER.iter().map(|h| h.to_string()).collect();
        tabular::write_row(&mut file, &header, ',').map_err(io_err)?;
        for row in rows {
            tabular::write_row(&mut file, &row.to_cells(), ',').map_err(io_err)?;
        }
        file.flush().map_err(io_err)
    }
}

/// Make a label usable as a file or directory name. The week label embeds
/// `DD/MM/YYYY` dates, so at minimum the slashes must go.
fn sanitize_component(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            _ => c,
        })
        .collect()
}

impl Sink for CsvSink {
    fn write_report(&self, week_label: &str, report: &Report) -> Result<(), PipelineError> {
        let week_dir = self.directory.join(sanitize_component(week_label));
        fs::create_dir_all(&week_dir)
            .map_err(|e| PipelineError::io(week_dir.display().to_string(), e))?;

        self.write_sheet(&week_dir.join("todas.csv"), &report.all)?;
        for (court_name, rows) in &report.by_court {
            let file_name = format!("{}.csv", sanitize_component(court_name));
            self.write_sheet(&week_dir.join(file_name), rows)?;
        }
        self.write_sheet(&week_dir.join("filtradas.csv"), &report.filtered)?;

        info!(
            directory = %week_dir.display(),
            rows = report.all.len(),
            courts = report.by_court.len(),
            filtered = report.filtered.len(),
            "wrote weekly sheets"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(court: &str, caption: &str) -> Row {
        Row {
            date: "06/07/2026".into(),
            court_name: court.into(),
            venue: "Santiago".into(),
            caption: caption.into(),
            intake_id: "X-1".into(),
            rapporteur: "N. Soto".into(),
            room_number: Some(2),
        }
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(
            sanitize_component("Semana del 06/07/2026 al 10/07/2026"),
            "Semana del 06-07-2026 al 10-07-2026"
        );
    }

    #[test]
    fn test_write_report_layout() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::new(dir.path());
        let all = vec![row("Corte de Santiago", "Recurso de Queja")];
        let report = Report {
            by_court: vec![("Corte de Santiago".into(), all.clone())],
            filtered: all.clone(),
            all,
        };

        sink.write_report("Semana del 06/07/2026 al 10/07/2026", &report)
            .unwrap();

        let week_dir = dir.path().join("Semana del 06-07-2026 al 10-07-2026");
        assert!(week_dir.join("todas.csv").is_file());
        assert!(week_dir.join("Corte de Santiago.csv").is_file());
        assert!(week_dir.join("filtradas.csv").is_file());

        let content = fs::read_to_string(week_dir.join("todas.csv")).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("Fecha,Corte,"));
        assert!(lines.next().unwrap().contains("Recurso de Queja"));
    }
}
