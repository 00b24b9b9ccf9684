// src/specs/detail.rs
//
// Appointment detail page, reached by pressing a row's select button.
//
// There is no stable structure to anchor on, so this is a single linear walk
// over every element in document order. An element whose trimmed text is
// exactly a known label arms a cursor; the next short, non-empty text that is
// neither the label nor contains it becomes that label's value.
//
// First assignment wins. A page that repeats a section keeps the values of
// the first occurrence.
use std::collections::HashSet;

use crate::config::{Vocabulary, options::DetailLimits, vocab::LabelRule};
use crate::core::{Document, html};
use crate::data::DetailAttributes;

pub fn parse_detail(doc: &Document, vocab: &Vocabulary, limits: &DetailLimits) -> DetailAttributes {
    let mut out = DetailAttributes::default();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut active: Option<&LabelRule> = None;

    for el in doc.elements() {
        let raw = html::text_of(el);
        let text = raw.trim();
        if text.is_empty() || text.len() > limits.skip_ceiling {
            continue;
        }

        if let Some(rule) = vocab.label(text) {
            active = Some(rule);
            continue;
        }

        let Some(rule) = active else { continue };
        let label = rule.label.as_str();
        if text == label || text.len() >= limits.value_ceiling || text.contains(label) {
            continue;
        }

        if seen.insert(label) {
            if let Some(field) = rule.field {
                *out.slot_mut(field) = Some(s!(text));
            }
        }
        active = None;
    }

    out
}
