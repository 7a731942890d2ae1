//! Item-detail page section parser
//!
//! Splits the main content of an item page into heading-delimited
//! sections and pulls labeled fields out of each one.
//!
//! Two field strategies run over every section:
//! - [`DefinitionListStrategy`] reads `<dl>` term/description pairs
//! - [`LabeledFieldStrategy`] reads `<p>`/`<div>`/`<li>` fields led by a `<strong>` label
//!
//! Their results are merged in that order, so a labeled field wins over a
//! definition-list pair with the same label.

use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};

use crate::error::{RecoveryError, Result};
use crate::types::{FieldMap, SectionMap};

/// Main content containers, most specific first
const MAIN_CONTENT_SELECTORS: [&str; 3] = ["div#main-column", "div#content-main", "div.content"];

/// Headings containing these are page furniture, not sections
const FURNITURE_HEADINGS: [&str; 2] = ["Search", "Browse"];

/// Extracts labeled fields from the elements of one section
pub trait FieldStrategy {
    fn extract_fields(&self, span: &[ElementRef<'_>]) -> FieldMap;
}

/// Pairs the nth `<dt>` of every `<dl>` with its nth `<dd>`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefinitionListStrategy;

impl FieldStrategy for DefinitionListStrategy {
    fn extract_fields(&self, span: &[ElementRef<'_>]) -> FieldMap {
        let mut fields = FieldMap::new();
        let (Ok(term_selector), Ok(description_selector)) =
            (Selector::parse("dt"), Selector::parse("dd"))
        else {
            return fields;
        };

        for list in span.iter().filter(|el| el.value().name() == "dl") {
            let terms = list.select(&term_selector);
            let descriptions = list.select(&description_selector);

            for (term, description) in terms.zip(descriptions) {
                insert_field(&mut fields, label_text(&term), collapsed_text(&description));
            }
        }

        fields
    }
}

/// Reads fields shaped like `<p><strong>Label:</strong> value</p>`
#[derive(Debug, Clone, Copy, Default)]
pub struct LabeledFieldStrategy;

impl FieldStrategy for LabeledFieldStrategy {
    fn extract_fields(&self, span: &[ElementRef<'_>]) -> FieldMap {
        let mut fields = FieldMap::new();
        let Ok(label_selector) = Selector::parse("strong") else {
            return fields;
        };

        let candidates = span
            .iter()
            .filter(|el| matches!(el.value().name(), "p" | "div" | "li"));

        for field in candidates {
            let Some(label) = field.select(&label_selector).next() else {
                continue;
            };
            insert_field(
                &mut fields,
                label_text(&label),
                text_without_label(field, &label_selector),
            );
        }

        fields
    }
}

/// Strategies in merge order; later ones win on label collisions
const STRATEGIES: [&dyn FieldStrategy; 2] = [&DefinitionListStrategy, &LabeledFieldStrategy];

/// Parses item page HTML into sections of labeled fields
///
/// # Arguments
/// * `html` - Raw HTML string from an item-detail page
///
/// # Returns
/// Section title -> fields in document order. Sections without any field
/// are left out; a page without recognizable structure yields an empty map.
pub fn parse_sections(html: &str) -> Result<SectionMap> {
    let document = Html::parse_document(html);
    extract_sections(&document)
}

/// Returns the trimmed `<title>` text of a page, or an empty string
pub fn parse_title(html: &str) -> String {
    extract_title(&Html::parse_document(html))
}

pub(crate) fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

pub(crate) fn extract_sections(document: &Html) -> Result<SectionMap> {
    let heading_selector = Selector::parse("h2, h3")
        .map_err(|e| RecoveryError::ParseError(format!("Invalid selector: {:?}", e)))?;

    // Every element in document order, for slicing out section spans
    let ordered: Vec<ElementRef> = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .collect();
    let positions: HashMap<_, usize> = ordered
        .iter()
        .enumerate()
        .map(|(i, el)| (el.id(), i))
        .collect();

    let mut sections = SectionMap::new();

    for heading in main_content(document).select(&heading_selector) {
        let title = heading_text(&heading);
        if title.is_empty() || FURNITURE_HEADINGS.iter().any(|f| title.contains(f)) {
            continue;
        }

        let Some(&start) = positions.get(&heading.id()) else {
            continue;
        };
        let span: Vec<ElementRef> = ordered[start + 1..]
            .iter()
            .take_while(|el| !is_heading(el))
            .copied()
            .collect();

        let mut fields = FieldMap::new();
        for strategy in STRATEGIES {
            fields.extend(strategy.extract_fields(&span));
        }

        if !fields.is_empty() {
            sections.insert(title, fields);
        }
    }

    Ok(sections)
}

/// Finds the main content region, falling back to the whole document
fn main_content(document: &Html) -> ElementRef<'_> {
    MAIN_CONTENT_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element())
}

fn is_heading(element: &ElementRef) -> bool {
    matches!(element.value().name(), "h2" | "h3")
}

/// Section title: full heading text with whitespace collapsed
fn heading_text(element: &ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Field label: heading-style text with colons removed
fn label_text(element: &ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<String>().replace(':', ""))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text with all whitespace runs collapsed to single spaces
fn collapsed_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of a field minus its label element
///
/// Works on a re-parsed copy of the field so the label can be detached
/// without touching the document other strategies are reading.
fn text_without_label(field: &ElementRef, label_selector: &Selector) -> String {
    let mut copy = Html::parse_fragment(&field.html());

    let label_id = copy.select(label_selector).next().map(|el| el.id());
    if let Some(mut label) = label_id.and_then(|id| copy.tree.get_mut(id)) {
        label.detach();
    }

    collapsed_text(&copy.root_element())
}

fn insert_field(fields: &mut FieldMap, label: String, value: String) {
    if !label.is_empty() && !value.is_empty() {
        fields.insert(label, value);
    }
}
