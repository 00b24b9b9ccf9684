// src/config/vocab.rs
//
// Lexical knowledge about the remote pages. The row classifier and the detail
// parser read these lists instead of hardcoding them, so a wording change on
// the site is a config edit.
use serde::{Deserialize, Serialize};

use crate::data::DetailField;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Place names that show up in legend/header rows.
    pub locations: Vec<String>,
    /// Administrative regions, counted together with `locations`.
    pub regions: Vec<String>,
    /// Status legend tokens; a cell with both marks a legend row.
    pub status_free: String,
    pub status_occupied: String,
    /// Detail page labels, in no particular order.
    pub labels: Vec<LabelRule>,
}

/// A detail page label. `field: None` is recognized (it still consumes
/// the following value) but nothing is stored for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRule {
    pub label: String,
    #[serde(default)]
    pub field: Option<DetailField>,
}

impl LabelRule {
    fn new(label: &str, field: Option<DetailField>) -> Self {
        Self { label: s!(label), field }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        use DetailField::*;
        let owned = |xs: &[&str]| xs.iter().map(|x| s!(*x)).collect::<Vec<_>>();

        Self {
            locations: owned(&[
                "augsburg", "bamberg", "freising", "münchen",
                "nürnberg", "regensburg", "rosenheim", "traunstein",
            ]),
            regions: owned(&[
                "oberbayern", "oberpfalz", "oberfranken", "mittelfranken", "schwaben",
            ]),
            status_free: s!("frei"),
            status_occupied: s!("belegt"),
            labels: vec![
                LabelRule::new("Prüfungslokal",       Some(ExamVenue)),
                LabelRule::new("Raum",                Some(Room)),
                LabelRule::new("PLZ",                 Some(PostalCode)),
                LabelRule::new("Ort",                 None),
                LabelRule::new("Straße",              Some(Street)),
                LabelRule::new("Hausnummer",          Some(HouseNumber)),
                LabelRule::new("Prüfungstermin",      Some(ExamDate)),
                LabelRule::new("Prüfungsbeginn",      Some(ExamStartTime)),
                LabelRule::new("Kopfhörer",           Some(Headphones)),
                LabelRule::new("Behindertengerecht",  Some(WheelchairAccessible)),
                LabelRule::new("Min. Teilnehmer",     Some(MinParticipants)),
                LabelRule::new("Max. Teilnehmer",     Some(MaxParticipants)),
                LabelRule::new("Aktuelle Teilnehmer", Some(CurrentParticipants)),
                LabelRule::new("Status",              Some(DetailStatus)),
            ],
        }
    }
}

impl Vocabulary {
    /// Locations and regions, lowercased, in one pass-friendly list.
    pub fn place_tokens(&self) -> Vec<String> {
        self.locations
            .iter()
            .chain(&self.regions)
            .map(|t| t.to_lowercase())
            .collect()
    }

    /// Exact (already trimmed) label lookup.
    pub fn label(&self, text: &str) -> Option<&LabelRule> {
        self.labels.iter().find(|r| r.label == text)
    }
}
