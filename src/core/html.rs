// src/core/html.rs
// Thin helpers over `scraper` for the few shapes the controller pages use:
// one named form, a first link, a first table.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::sanitize::strip_join;

static FORM: LazyLock<Selector> = LazyLock::new(|| sel("form"));
static INPUT: LazyLock<Selector> = LazyLock::new(|| sel("input"));
static LINK: LazyLock<Selector> = LazyLock::new(|| sel("a[href]"));
static TABLE: LazyLock<Selector> = LazyLock::new(|| sel("table"));
static TR: LazyLock<Selector> = LazyLock::new(|| sel("tr"));

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// A login form as found on the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormInfo {
    pub action: Option<String>,
    /// Named inputs in document order. A repeated name keeps its first
    /// position and its last value.
    pub fields: Vec<(String, String)>,
}

/// First `<form name="...">` matching `name` (case-insensitive on the name value).
pub fn find_form(doc: &str, name: &str) -> Option<FormInfo> {
    let doc = Html::parse_document(doc);
    let form = doc
        .select(&FORM)
        .find(|f| f.value().attr("name").is_some_and(|n| n.eq_ignore_ascii_case(name)))?;

    let mut fields: Vec<(String, String)> = Vec::new();
    for input in form.select(&INPUT) {
        let Some(field) = input.value().attr("name").filter(|n| !n.is_empty()) else { continue };
        let value = s!(input.value().attr("value").unwrap_or_default());
        match fields.iter_mut().find(|(n, _)| n == field) {
            Some(slot) => slot.1 = value,
            None => fields.push((s!(field), value)),
        }
    }

    Some(FormInfo {
        action: form.value().attr("action").map(|a| a.trim().to_string()),
        fields,
    })
}

/// `href` of the first hyperlink in the document.
pub fn first_link_href(doc: &str) -> Option<String> {
    let doc = Html::parse_document(doc);
    doc.select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|h| s!(h))
}

/// Cell texts of every row of the first `<table>`, header row included.
/// Each text node is trimmed; inner whitespace is left alone.
/// `None` when the document has no table at all.
pub fn first_table_rows(doc: &str) -> Option<Vec<Vec<String>>> {
    let doc = Html::parse_document(doc);
    let table = doc.select(&TABLE).next()?;

    let rows = table
        .select(&TR)
        .filter(|tr| owning_table(tr).is_some_and(|t| t.id() == table.id()))
        .map(|tr| row_cells(&tr))
        .collect();
    Some(rows)
}

fn owning_table<'a>(tr: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    tr.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name().eq_ignore_ascii_case("table"))
}

fn row_cells(tr: &ElementRef<'_>) -> Vec<String> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name().eq_ignore_ascii_case("td"))
        .map(|td| strip_join(td.text()))
        .collect()
}
