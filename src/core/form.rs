// src/core/form.rs
// Browser-like form handling: where a form posts to, and what it would send.
use std::{
    collections::{BTreeMap, HashSet},
    fmt,
};

use scraper::Selector;

use super::html::{Document, FORM, INPUT, SUBMIT};
use crate::error::{Error, Result};

/// The listing form's `action`, as found in one conversation's listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionTarget(String);

impl SubmissionTarget {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Name of the submit control that selects one listing row.
/// Only meaningful inside the conversation whose listing produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Control(String);

impl Control {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Sorted name → value pairs; a later field with the same name replaces an earlier one.
pub type FormPayload = BTreeMap<String, String>;

/// `action` of the first form matching `form` that carries a non-empty one.
pub fn submission_target(doc: &Document, form: &Selector) -> Result<SubmissionTarget> {
    doc.select(form)
        .find_map(|f| f.value().attr("action").filter(|a| !a.is_empty()))
        .map(|a| SubmissionTarget(s!(a)))
        .ok_or(Error::NoSubmissionTarget)
}

/// Current field state of every named `<input>` in the document, as the
/// selection submit would send it, with `control` as the pressed button.
///
/// Submit and image inputs are skipped. Checkboxes are sent only when
/// checked; an unchecked box is absent, never `false`.
pub fn build_payload(doc: &Document, control: &Control) -> FormPayload {
    let mut payload = FormPayload::new();

    for input in doc.select(&INPUT) {
        let el = input.value();
        let Some(name) = el.attr("name").filter(|n| !n.is_empty()) else { continue };
        let kind = el.attr("type").unwrap_or("").to_ascii_lowercase();

        match kind.as_str() {
            "submit" | "image" => continue,
            "checkbox" if el.attr("checked").is_none() => continue,
            _ => {}
        }
        payload.insert(s!(name), s!(el.attr("value").unwrap_or("")));
    }

    payload.insert(s!(control.name()), s!());
    payload
}

/// What one `<form>` on a page declares. Used to check the configured
/// selectors against the live markup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormInfo {
    pub id: String,
    pub action: String,
    pub method: String,
    pub enctype: String,
    pub submit_buttons: usize,
    /// Submit buttons that also match the row control selector.
    pub controls: usize,
    /// Whether the configured form selector picks this form.
    pub selected: bool,
}

impl fmt::Display for FormInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Action: {}", self.action)?;
        writeln!(f, "Method: {}", self.method)?;
        writeln!(f, "Enctype: {}", self.enctype)?;
        writeln!(f, "Submit buttons: {} ({} row controls)", self.submit_buttons, self.controls)?;
        write!(f, "Selected: {}", if self.selected { "yes" } else { "no" })
    }
}

/// Every form in document order, with attribute values as written
/// (missing attributes are empty).
pub fn describe_forms(doc: &Document, form: &Selector, control: &Selector) -> Vec<FormInfo> {
    let selected: HashSet<_> = doc.select(form).map(|f| f.id()).collect();

    doc.select(&FORM)
        .map(|f| {
            let attr = |name: &str| s!(f.value().attr(name).unwrap_or(""));
            FormInfo {
                id: attr("id"),
                action: attr("action"),
                method: attr("method"),
                enctype: attr("enctype"),
                submit_buttons: f.select(&SUBMIT).count(),
                controls: f.select(control).count(),
                selected: selected.contains(&f.id()),
            }
        })
        .collect()
}
