// src/extractors/snapshot.rs
use crate::extractors::overview::{extract_overview, Overview};
use crate::extractors::ratios::{extract_ratios, RatioComparison};
use crate::extractors::statements::{
    extract_statement, BalanceSheetRecord, CashFlowRecord, ProfitLossRecord,
};
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::ser::{Serialize, SerializeSeq, Serializer};

static QUARTERS_SECTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("section#quarters").expect("Failed to compile QUARTERS_SECTION_SELECTOR")
});

/// Quarterly results are not extracted yet; this always serializes as `[]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuarterlyResults {
    #[default]
    NotYetSupported,
}

impl Serialize for QuarterlyResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QuarterlyResults::NotYetSupported => serializer.serialize_seq(Some(0))?.end(),
        }
    }
}

/// Everything extracted from one company page, shaped like the JSON response.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySnapshot {
    pub overview: Overview,
    pub balance_sheet: Vec<BalanceSheetRecord>,
    pub profit_loss: Vec<ProfitLossRecord>,
    pub cash_flow: Vec<CashFlowRecord>,
    pub ratios: RatioComparison,
    pub quarters: QuarterlyResults,
}

impl CompanySnapshot {
    /// Parses `html` and runs every extractor over it.
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);
        Self::from_document(&document)
    }

    /// Runs every extractor independently; a failing section is logged and
    /// replaced by its empty value.
    pub fn from_document(document: &Html) -> Self {
        let snapshot = Self {
            overview: extract_overview(document),
            balance_sheet: absorb("balance sheet", extract_statement(document)),
            profit_loss: absorb("profit & loss", extract_statement(document)),
            cash_flow: absorb("cash flow", extract_statement(document)),
            ratios: extract_ratios(document),
            quarters: extract_quarters(document),
        };

        tracing::info!(
            "Snapshot built: {} overview fields, {}/{}/{} balance sheet/P&L/cash flow periods",
            snapshot.overview.len(),
            snapshot.balance_sheet.len(),
            snapshot.profit_loss.len(),
            snapshot.cash_flow.len()
        );
        snapshot
    }
}

fn absorb<T: Default>(section: &str, result: Result<T, ExtractError>) -> T {
    result.unwrap_or_else(|err| {
        tracing::warn!("{} extraction failed, using empty result: {}", section, err);
        T::default()
    })
}

fn extract_quarters(document: &Html) -> QuarterlyResults {
    if document.select(&QUARTERS_SECTION_SELECTOR).next().is_some() {
        tracing::debug!("Quarterly results section present but not extracted");
    }
    QuarterlyResults::NotYetSupported
}
