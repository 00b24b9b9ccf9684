// src/specs/listing.rs
//
// Appointment listing (`Pruefungssuche`).
//
// Legend rows, section headers and appointments share identical markup; only
// the text tells them apart. Rows are classified lexically:
// - HeaderSeparator: a cell naming three or more places/regions, or a cell
//   with both the "free" and the "occupied" legend token
// - Data: at least three cells, first one shaped like `25.10.2025, 08:00`
// - Noise: everything else
//
// The same walk serves the initial scrape and the per-conversation re-match,
// so a record found once is found again the same way.
use scraper::{ElementRef, Selector};

use crate::config::Vocabulary;
use crate::core::{
    Control, Document,
    html::{self, TABLE},
    sanitize::normalize_cell,
};
use crate::data::SummaryRecord;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    HeaderSeparator,
    Data,
    Noise,
}

/// Lowercased tokens from a [`Vocabulary`], ready for per-row matching.
pub struct RowClassifier {
    places: Vec<String>,
    free: String,
    occupied: String,
}

impl RowClassifier {
    pub fn new(vocab: &Vocabulary) -> Self {
        Self {
            places: vocab.place_tokens().into_iter().filter(|t| !t.is_empty()).collect(),
            free: vocab.status_free.to_lowercase(),
            occupied: vocab.status_occupied.to_lowercase(),
        }
    }

    pub fn classify(&self, cells: &[String]) -> RowKind {
        if self.is_header_separator(cells) {
            RowKind::HeaderSeparator
        } else if cells.len() >= 3 && has_date_time_shape(&cells[0]) {
            RowKind::Data
        } else {
            RowKind::Noise
        }
    }

    fn is_header_separator(&self, cells: &[String]) -> bool {
        let legend = !self.free.is_empty() && !self.occupied.is_empty();
        cells.iter().any(|cell| {
            let lc = cell.to_lowercase();
            let places = self.places.iter().filter(|t| lc.contains(t.as_str())).count();
            places > 2 || (legend && lc.contains(&self.free) && lc.contains(&self.occupied))
        })
    }
}

/// Loose shape check: a `.`, a `,` and a `:` somewhere. Not a date validator.
pub fn has_date_time_shape(cell: &str) -> bool {
    cell.contains('.') && cell.contains(',') && cell.contains(':')
}

/// Normalized, non-empty cell texts of one row.
pub fn row_text(tr: ElementRef<'_>) -> Vec<String> {
    html::row_cells(tr)
        .filter_map(|c| normalize_cell(&html::text_of(c)))
        .collect()
}

/// Summary records per qualifying table, in document order.
/// Tables whose text is `min_text` bytes or shorter, or that hold no data
/// rows, are left out.
pub fn extract_tables(doc: &Document, vocab: &Vocabulary, min_text: usize) -> Vec<Vec<SummaryRecord>> {
    let classifier = RowClassifier::new(vocab);
    data_tables(doc, &classifier, min_text)
        .into_iter()
        .map(|rows| rows.iter().map(|r| to_summary(&r.cells)).collect())
        .collect()
}

/// All summary records of the document, flattened across tables.
pub fn extract_summaries(doc: &Document, vocab: &Vocabulary, min_text: usize) -> Vec<SummaryRecord> {
    extract_tables(doc, vocab, min_text).into_iter().flatten().collect()
}

/// Re-locate `target` in a listing fetched by the current conversation and
/// return the control that selects it there.
///
/// Rows are re-extracted from `listing` every time; positions and control
/// names from another conversation are never reused. Identity is exact
/// string equality on `(date_time, location)`. If several rows are equal,
/// the first one that carries a control wins.
pub fn find_control(
    target: &SummaryRecord,
    listing: &Document,
    vocab: &Vocabulary,
    min_text: usize,
    control: &Selector,
) -> Result<Control> {
    let classifier = RowClassifier::new(vocab);
    let (date_time, location) = target.key();

    data_tables(listing, &classifier, min_text)
        .into_iter()
        .flatten()
        .filter(|r| r.cells[0] == date_time && r.cells[1] == location)
        .find_map(|r| {
            r.tr.select(control)
                .find_map(|b| b.value().attr("name").filter(|n| !n.is_empty()))
                .map(Control::new)
        })
        .ok_or_else(|| Error::NoMatch {
            date_time: s!(date_time),
            location: s!(location),
        })
}

/* ---------- helpers ---------- */

struct DataRow<'a> {
    tr: ElementRef<'a>,
    cells: Vec<String>,
}

fn data_tables<'a>(doc: &'a Document, classifier: &RowClassifier, min_text: usize) -> Vec<Vec<DataRow<'a>>> {
    doc.select(&TABLE)
        .filter(|t| html::text_of(*t).trim().len() > min_text)
        .map(|t| {
            html::own_rows(t)
                .filter_map(|tr| {
                    let cells = row_text(tr);
                    (classifier.classify(&cells) == RowKind::Data).then_some(DataRow { tr, cells })
                })
                .collect::<Vec<_>>()
        })
        .filter(|rows| !rows.is_empty())
        .collect()
}

/// Positional mapping; a missing region or status stays empty.
fn to_summary(cells: &[String]) -> SummaryRecord {
    let at = |i: usize| cells.get(i).cloned().unwrap_or_default();
    SummaryRecord {
        date_time: at(0),
        location: at(1),
        city: at(2),
        region: at(3),
        status: at(4),
    }
}
