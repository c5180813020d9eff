// src/extractors/table.rs

// --- Imports ---
use crate::extractors::number;
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

// --- CSS Selectors (Lazy Static) ---
static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("Failed to compile TABLE_SELECTOR"));
static THEAD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("thead").expect("Failed to compile THEAD_SELECTOR"));
static TH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th").expect("Failed to compile TH_SELECTOR"));
static TBODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody").expect("Failed to compile TBODY_SELECTOR"));
static TR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("Failed to compile TR_SELECTOR"));
static TD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("Failed to compile TD_SELECTOR"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RE"));

/// Metric label → normalized value for one period. A key with a `None`
/// value means the cell existed but did not parse.
pub type PeriodMetrics = HashMap<String, Option<f64>>;

/// Where a statement lives in the page: `<section id="...">`.
#[derive(Debug, Clone, Copy)]
pub enum SectionAnchor<'a> {
    Id(&'a str),
}

impl SectionAnchor<'_> {
    // Ids are interpolated into CSS, so one with selector syntax in it fails here
    fn selector(&self) -> Result<Selector, ExtractError> {
        let text = match self {
            SectionAnchor::Id(id) => format!("section#{}", id),
        };
        Selector::parse(&text).map_err(|e| ExtractError::InvalidSelector {
            selector: text.clone(),
            reason: format!("{:?}", e),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            SectionAnchor::Id(name) => name,
        }
    }
}

/// Generic year-keyed view of one statement table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementTable {
    /// Period labels in document order (metric-name column dropped).
    pub periods: Vec<String>,
    /// Period label → metrics reported for that period.
    pub values: HashMap<String, PeriodMetrics>,
}

impl StatementTable {
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Metrics for `period`; empty if the period has no rows at all.
    pub fn metrics(&self, period: &str) -> Option<&PeriodMetrics> {
        self.values.get(period)
    }
}

/// Reads the first table inside `anchor` into a [`StatementTable`].
///
/// A missing section, a section without a table, or a header with no period
/// columns all yield an empty table; only an unusable anchor is an error.
pub fn extract_table(document: &Html, anchor: SectionAnchor<'_>) -> Result<StatementTable, ExtractError> {
    match read_table(document, anchor) {
        Ok(table) => Ok(table),
        Err(err @ ExtractError::InvalidSelector { .. }) => Err(err),
        Err(absent) => {
            tracing::info!("Skipping '{}': {}", anchor.name(), absent);
            Ok(StatementTable::default())
        }
    }
}

fn read_table(document: &Html, anchor: SectionAnchor<'_>) -> Result<StatementTable, ExtractError> {
    let section_selector = anchor.selector()?;

    let section = document
        .select(&section_selector)
        .next()
        .ok_or_else(|| ExtractError::SectionNotFound(anchor.name().to_string()))?;

    let table = section
        .select(&TABLE_SELECTOR)
        .next()
        .ok_or_else(|| ExtractError::TableNotFound(anchor.name().to_string()))?;

    let header = header_labels(table);
    if header.len() < 2 {
        return Err(ExtractError::NoPeriods(anchor.name().to_string()));
    }
    let periods: Vec<String> = header.into_iter().skip(1).collect(); // First column names the metric

    let mut values: HashMap<String, PeriodMetrics> = periods
        .iter()
        .map(|period| (period.clone(), PeriodMetrics::new()))
        .collect();

    let mut row_count = 0;
    if let Some(tbody) = table.select(&TBODY_SELECTOR).next() {
        for row in tbody.select(&TR_SELECTOR) {
            let mut cells = row.select(&TD_SELECTOR);
            let Some(label_cell) = cells.next() else {
                continue; // Header-only or spacer rows
            };
            let metric = clean_label(&element_text(label_cell));

            // Extra cells beyond the period count are dropped by zip;
            // missing cells leave the metric absent for later periods.
            for (period, cell) in periods.iter().zip(cells) {
                let value = number::normalize(&element_text(cell));
                if let Some(metrics) = values.get_mut(period) {
                    metrics.insert(metric.clone(), value);
                }
            }
            row_count += 1;
        }
    }

    tracing::debug!(
        "Read '{}': {} periods x {} rows",
        anchor.name(),
        periods.len(),
        row_count
    );
    Ok(StatementTable { periods, values })
}

fn header_labels(table: ElementRef<'_>) -> Vec<String> {
    table
        .select(&THEAD_SELECTOR)
        .next()
        .map(|thead| {
            thead
                .select(&TH_SELECTOR)
                .map(|th| element_text(th).trim().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Concatenated descendant text, trimmed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Row labels on the source site carry non-breaking spaces and a trailing
/// `+` on expandable rows ("Sales&nbsp;+").
pub(crate) fn clean_label(raw: &str) -> String {
    let spaced = raw.replace('\u{a0}', " ");
    let collapsed = WHITESPACE_RE.replace_all(spaced.trim(), " ");
    collapsed.trim_end_matches('+').trim_end().to_string()
}
