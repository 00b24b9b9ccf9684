// src/core/html.rs
// Thin layer over `scraper`: one parsed document per response, plus the few
// tree walks the specs need.
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};

pub static TABLE: LazyLock<Selector> = LazyLock::new(|| fixed("table"));
pub static ROW: LazyLock<Selector> = LazyLock::new(|| fixed("tr"));
pub static INPUT: LazyLock<Selector> = LazyLock::new(|| fixed("input"));
pub static FORM: LazyLock<Selector> = LazyLock::new(|| fixed("form"));
pub static SUBMIT: LazyLock<Selector> = LazyLock::new(|| fixed("input[type=submit]"));

fn fixed(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Compile a selector that came from config.
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Parse {
        what: "selector",
        reason: format!("`{css}`: {e:?}"),
    })
}

/// A parsed HTML response. Not `Send`: it lives and dies on the thread that
/// fetched it, like the conversation it came from.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        Self { html: Html::parse_document(text) }
    }

    pub fn select<'a, 'b>(&'a self, sel: &'b Selector) -> scraper::html::Select<'a, 'b> {
        self.html.select(sel)
    }

    /// Every element, document order, root included.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.root_element().descendants().filter_map(ElementRef::wrap)
    }
}

/// All descendant text, concatenated as-is.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Rows owned by `table` itself; rows of nested tables belong to those.
pub fn own_rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    table.select(&ROW).filter(move |tr| {
        nearest_table(*tr).is_some_and(|t| t.id() == table.id())
    })
}

/// Direct `td`/`th` children of a row.
pub fn row_cells<'a>(tr: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| matches!(c.value().name(), "td" | "th"))
}

fn nearest_table(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == "table")
}
