//! HTML record extraction for portal responses.
//!
//! Both endpoints answer with an HTML fragment, not structured data. The
//! fragment nests one or more content panels; only the last panel carries the
//! data table (a convention of the portal markup, measured here rather than
//! assumed silently). Cell text is harvested positionally and decoded into
//! fixed-width groups of three.

use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Case, RoomAssignment};

/// CSS selector for the content panel wrapping the data table.
const PANEL_SELECTOR: &str = "div.contenido";
/// Marker carried by room-assignment tables.
const ROOM_TABLE_SELECTOR: &str = "table.tablaSalas";
/// Marker carried by case tables.
const CASE_TABLE_SELECTOR: &str = "table.tablaCausas";
/// Table cells, in document order. Hyperlink wrappers contribute their text.
const CELL_SELECTOR: &str = "td";

/// Which record layout a document is expected to carry.
///
/// The caller always knows which endpoint it queried, so the shape is chosen
/// explicitly; the table marker in the markup is only checked defensively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    RoomAssignment,
    Case,
}

impl RecordShape {
    fn marker(&self) -> &'static Selector {
        match self {
            Self::RoomAssignment => static_selector(ROOM_TABLE_SELECTOR, &ROOM_TABLE),
            Self::Case => static_selector(CASE_TABLE_SELECTOR, &CASE_TABLE),
        }
    }
}

impl std::fmt::Display for RecordShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoomAssignment => write!(f, "room assignment"),
            Self::Case => write!(f, "case"),
        }
    }
}

/// Errors raised when a response is not in the expected shape.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No content panel at all: an error page or unexpected markup, distinct
    /// from a panel holding zero records (which extracts to an empty list).
    #[error("no content panel found in {shape} document")]
    MissingPanel { shape: RecordShape },
}

static PANEL: OnceLock<Selector> = OnceLock::new();
static ROOM_TABLE: OnceLock<Selector> = OnceLock::new();
static CASE_TABLE: OnceLock<Selector> = OnceLock::new();
static CELL: OnceLock<Selector> = OnceLock::new();

fn static_selector(source: &'static str, cell: &'static OnceLock<Selector>) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(source).expect("static selector"))
}

/// Collapse whitespace runs to single spaces and trim.
fn normalize_ws(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim_end().to_string()
}

/// Locate the last content panel and harvest its cell texts in document
/// order, partitioned into groups of three.
fn extract_cell_groups(html: &str, shape: RecordShape) -> Result<Vec<[String; 3]>, ExtractError> {
    let document = Html::parse_document(html);
    let panel_selector = static_selector(PANEL_SELECTOR, &PANEL);

    let panels: Vec<ElementRef> = document.select(panel_selector).collect();
    let panel = match panels.last() {
        Some(panel) => *panel,
        None => return Err(ExtractError::MissingPanel { shape }),
    };
    if panels.len() > 1 {
        debug!(
            panels = panels.len(),
            %shape,
            "document carries multiple content panels; using the last"
        );
    }

    // The shape was chosen by the caller; the marker check only detects the
    // portal answering with the other table kind.
    if panel.select(shape.marker()).next().is_none() {
        warn!(%shape, "expected table marker not present in content panel");
    }

    let cells: Vec<String> = panel
        .select(static_selector(CELL_SELECTOR, &CELL))
        .map(|cell| normalize_ws(&cell.text().collect::<String>()))
        .collect();

    let mut groups = Vec::with_capacity(cells.len() / 3);
    let mut chunks = cells.chunks_exact(3);
    for chunk in &mut chunks {
        groups.push([chunk[0].clone(), chunk[1].clone(), chunk[2].clone()]);
    }
    let trailing = chunks.remainder().len();
    if trailing != 0 {
        // Known edge case of the source markup; the partial row cannot be a
        // record, so it is dropped rather than padded.
        warn!(trailing, %shape, "dropping trailing partial cell group");
    }

    Ok(groups)
}

/// Decode a room-assignment document: groups of `{date, room, rapporteur}`.
pub fn extract_room_assignments(html: &str) -> Result<Vec<RoomAssignment>, ExtractError> {
    let groups = extract_cell_groups(html, RecordShape::RoomAssignment)?;
    Ok(groups
        .into_iter()
        .map(|[date, room_label, rapporteur]| {
            RoomAssignment::from_cells(date, room_label, rapporteur)
        })
        .collect())
}

/// Decode a case document: groups of `{venue, caption, intake_id}`.
pub fn extract_cases(html: &str) -> Result<Vec<Case>, ExtractError> {
    let groups = extract_cell_groups(html, RecordShape::Case)?;
    Ok(groups
        .into_iter()
        .map(|[venue, caption, intake_id]| Case {
            venue,
            caption,
            intake_id,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM_DOC: &str = r##"
        <html><body>
        <div class="contenido"><p>Seleccione una corte</p></div>
        <div class="contenido">
          <table class="tablaSalas">
            <tr><td>06/07/2026</td><td>Primera</td><td><a href="#">N. Soto</a></td></tr>
            <tr><td>06/07/2026</td><td>Segunda</td><td>M.&nbsp;Vial</td></tr>
          </table>
        </div>
        </body></html>"##;

    const EMPTY_CASE_DOC: &str = r#"
        <html><body>
        <div class="contenido">
          <table class="tablaCausas"></table>
        </div>
        </body></html>"#;

    const NO_PANEL_DOC: &str = r#"
        <html><body><div class="error">Sitio en mantención</div></body></html>"#;

    #[test]
    fn test_room_assignments_from_last_panel() {
        let records = extract_room_assignments(ROOM_DOC).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, "06/07/2026");
        assert_eq!(records[0].room_label, "Primera");
        assert_eq!(records[0].room_number, Some(1));
        assert_eq!(records[0].rapporteur, "N. Soto");
        assert_eq!(records[1].room_number, Some(2));
        assert_eq!(records[1].rapporteur, "M. Vial");
    }

    #[test]
    fn test_empty_panel_is_not_an_error() {
        let records = extract_cases(EMPTY_CASE_DOC).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_panel_is_an_error() {
        let err = extract_cases(NO_PANEL_DOC).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MissingPanel {
                shape: RecordShape::Case
            }
        ));
    }

    #[test]
    fn test_trailing_partial_group_dropped() {
        let html = r#"
            <div class="contenido"><table class="tablaCausas">
              <tr><td>Santiago</td><td>Recurso de Queja</td><td>QJA-11</td></tr>
              <tr><td>Santiago</td><td>huérfana</td></tr>
            </table></div>"#;
        let records = extract_cases(html).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].caption, "Recurso de Queja");
    }

    #[test]
    fn test_cell_text_whitespace_normalized() {
        let html = "<div class=\"contenido\"><table class=\"tablaCausas\"><tr>\n\
            <td> Valparaíso </td><td>Amparo\n   Económico</td><td><a>AMP-7</a></td>\
            </tr></table></div>";
        let records = extract_cases(html).unwrap();
        assert_eq!(records[0].venue, "Valparaíso");
        assert_eq!(records[0].caption, "Amparo Económico");
        assert_eq!(records[0].intake_id, "AMP-7");
    }
}
