// src/extractors/statements.rs
use crate::extractors::table::{self, PeriodMetrics, SectionAnchor, StatementTable};
use crate::utils::error::ExtractError;
use scraper::Html;
use serde::Serialize;

/// How a record field is derived from the rows reported for one period.
///
/// Candidates are exact (cleaned) row labels. A candidate whose value is
/// absent, unparseable or zero does not count as a match, and every rule
/// falls back to `0.0` rather than `None`.
#[derive(Debug, Clone, Copy)]
pub enum Resolution {
    /// First candidate with a non-zero value, else `0.0`.
    First(&'static [&'static str]),
    /// Sum of all candidates, absent ones counting as `0.0`.
    Sum(&'static [&'static str]),
    /// First of `first`, else the sum of `sum`.
    FirstElseSum {
        first: &'static [&'static str],
        sum: &'static [&'static str],
    },
}

impl Resolution {
    pub fn resolve(&self, metrics: &PeriodMetrics) -> f64 {
        match self {
            Resolution::First(candidates) => first_present(metrics, candidates).unwrap_or(0.0),
            Resolution::Sum(candidates) => sum_present(metrics, candidates),
            Resolution::FirstElseSum { first, sum } => {
                first_present(metrics, first).unwrap_or_else(|| sum_present(metrics, sum))
            }
        }
    }
}

fn lookup(metrics: &PeriodMetrics, label: &str) -> Option<f64> {
    metrics.get(label).copied().flatten()
}

fn first_present(metrics: &PeriodMetrics, candidates: &[&str]) -> Option<f64> {
    candidates
        .iter()
        .filter_map(|label| lookup(metrics, label))
        .find(|value| *value != 0.0)
}

fn sum_present(metrics: &PeriodMetrics, candidates: &[&str]) -> f64 {
    candidates
        .iter()
        .map(|label| lookup(metrics, label).unwrap_or(0.0))
        .sum()
}

/// A fixed-shape, per-period record built from one statement table.
pub trait StatementRecord: Sized {
    /// `id` of the `<section>` holding the statement.
    const SECTION_ID: &'static str;
    /// Human-readable name for logs.
    const NAME: &'static str;

    fn from_period(period: &str, metrics: &PeriodMetrics) -> Self;
}

/// Projects every period of `table` into `R`, in table order.
pub fn map_statement<R: StatementRecord>(table: &StatementTable) -> Vec<R> {
    let empty = PeriodMetrics::new();
    table
        .periods
        .iter()
        .map(|period| R::from_period(period, table.metrics(period).unwrap_or(&empty)))
        .collect()
}

/// Locates the statement's section and maps it. An absent section gives an
/// empty list.
pub fn extract_statement<R: StatementRecord>(document: &Html) -> Result<Vec<R>, ExtractError> {
    let table = table::extract_table(document, SectionAnchor::Id(R::SECTION_ID))?;
    if table.is_empty() {
        tracing::debug!("{} section not found or has no periods", R::NAME);
    }
    let records = map_statement::<R>(&table);
    tracing::info!("Extracted {} years of {} data", records.len(), R::NAME);
    Ok(records)
}

// --- Balance sheet ---

const EQUITY: Resolution = Resolution::First(&["Equity Capital", "Equity Share Capital"]);
const RESERVES: Resolution = Resolution::First(&["Reserves", "Reserves and Surplus"]);
const DEBT: Resolution = Resolution::Sum(&["Borrowings", "Total Debt"]);
const ASSETS: Resolution = Resolution::First(&["Total Assets"]);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetRecord {
    pub year: String,
    pub equity: f64,
    pub reserves: f64,
    pub debt: f64,
    pub assets: f64,
}

impl StatementRecord for BalanceSheetRecord {
    const SECTION_ID: &'static str = "balance-sheet";
    const NAME: &'static str = "balance sheet";

    fn from_period(period: &str, metrics: &PeriodMetrics) -> Self {
        Self {
            year: period.to_string(),
            equity: EQUITY.resolve(metrics),
            reserves: RESERVES.resolve(metrics),
            debt: DEBT.resolve(metrics),
            assets: ASSETS.resolve(metrics),
        }
    }
}

// --- Profit & loss ---

const REVENUE: Resolution = Resolution::First(&["Sales", "Revenue", "Net Sales"]);
const EXPENSES: Resolution =
    Resolution::First(&["Expenses", "Total Expenses", "Operating Expenses"]);
const PROFIT_BEFORE_TAX: Resolution = Resolution::First(&["Profit before tax", "PBT"]);
const TAX: Resolution = Resolution::First(&["Tax", "Tax %"]);
const NET_PROFIT: Resolution = Resolution::First(&["Net Profit", "Profit After Tax"]);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossRecord {
    pub year: String,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
    pub tax: f64,
    pub net_profit: f64,
}

impl StatementRecord for ProfitLossRecord {
    const SECTION_ID: &'static str = "profit-loss";
    const NAME: &'static str = "P&L";

    fn from_period(period: &str, metrics: &PeriodMetrics) -> Self {
        Self {
            year: period.to_string(),
            revenue: REVENUE.resolve(metrics),
            expenses: EXPENSES.resolve(metrics),
            profit: PROFIT_BEFORE_TAX.resolve(metrics),
            tax: TAX.resolve(metrics),
            net_profit: NET_PROFIT.resolve(metrics),
        }
    }
}

// --- Cash flow ---

const OPERATING_ROW: &str = "Cash from Operating Activity";
const INVESTING_ROW: &str = "Cash from Investing Activity";
const FINANCING_ROW: &str = "Cash from Financing Activity";

const OPERATING: Resolution = Resolution::First(&[OPERATING_ROW]);
const INVESTING: Resolution = Resolution::First(&[INVESTING_ROW]);
const FINANCING: Resolution = Resolution::First(&[FINANCING_ROW]);
const NET_CASH: Resolution = Resolution::FirstElseSum {
    first: &["Net Cash Flow"],
    sum: &[OPERATING_ROW, INVESTING_ROW, FINANCING_ROW],
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowRecord {
    pub year: String,
    pub operating: f64,
    pub investing: f64,
    pub financing: f64,
    pub net_cash: f64,
}

impl StatementRecord for CashFlowRecord {
    const SECTION_ID: &'static str = "cash-flow";
    const NAME: &'static str = "cash flow";

    fn from_period(period: &str, metrics: &PeriodMetrics) -> Self {
        Self {
            year: period.to_string(),
            operating: OPERATING.resolve(metrics),
            investing: INVESTING.resolve(metrics),
            financing: FINANCING.resolve(metrics),
            net_cash: NET_CASH.resolve(metrics),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn metrics(rows: &[(&str, Option<f64>)]) -> PeriodMetrics {
        rows.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn table(periods: &[(&str, PeriodMetrics)]) -> StatementTable {
        StatementTable {
            periods: periods.iter().map(|(p, _)| p.to_string()).collect(),
            values: periods
                .iter()
                .map(|(p, m)| (p.to_string(), m.clone()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn first_match_takes_precedence() {
        let m = metrics(&[("Equity Capital", Some(50.0)), ("Equity Share Capital", Some(70.0))]);
        assert_eq!(EQUITY.resolve(&m), 50.0);

        let m = metrics(&[("Equity Share Capital", Some(70.0))]);
        assert_eq!(EQUITY.resolve(&m), 70.0);
    }

    #[test]
    fn unresolved_scalar_field_falls_back_to_zero() {
        let m = metrics(&[("Something Else", Some(1.0)), ("Total Assets", None)]);
        assert_eq!(ASSETS.resolve(&m), 0.0);
        assert_eq!(RESERVES.resolve(&m), 0.0);
    }

    #[test]
    fn zero_or_unparsed_candidate_does_not_stop_the_search() {
        let m = metrics(&[("Sales", Some(0.0)), ("Revenue", None), ("Net Sales", Some(900.0))]);
        assert_eq!(REVENUE.resolve(&m), 900.0);
    }

    #[test]
    fn summed_field_treats_absent_as_zero() {
        assert_eq!(DEBT.resolve(&metrics(&[])), 0.0);
        assert_eq!(DEBT.resolve(&metrics(&[("Borrowings", Some(500.0))])), 500.0);
        assert_eq!(
            DEBT.resolve(&metrics(&[("Borrowings", Some(500.0)), ("Total Debt", Some(20.0))])),
            520.0
        );
        assert_eq!(DEBT.resolve(&metrics(&[("Borrowings", None), ("Total Debt", Some(20.0))])), 20.0);
    }

    #[test]
    fn net_cash_prefers_reported_row_then_sums_components() {
        let reported = metrics(&[
            ("Cash from Operating Activity", Some(100.0)),
            ("Net Cash Flow", Some(12.0)),
        ]);
        assert_eq!(NET_CASH.resolve(&reported), 12.0);

        let derived = metrics(&[
            ("Cash from Operating Activity", Some(100.0)),
            ("Cash from Investing Activity", Some(-60.0)),
            ("Cash from Financing Activity", None),
        ]);
        assert_eq!(NET_CASH.resolve(&derived), 40.0);
    }

    #[test]
    fn one_record_per_period_in_table_order() {
        let t = table(&[
            ("2023", metrics(&[("Sales", Some(3.0))])),
            ("2021", metrics(&[])),
            ("2022", metrics(&[("Sales", Some(2.0)), ("Tax %", Some(25.0))])),
        ]);

        let records = map_statement::<ProfitLossRecord>(&t);
        let years: Vec<_> = records.iter().map(|r| r.year.as_str()).collect();
        assert_eq!(years, vec!["2023", "2021", "2022"]);

        // All-default period is still emitted
        assert_eq!(
            records[1],
            ProfitLossRecord {
                year: "2021".to_string(),
                revenue: 0.0,
                expenses: 0.0,
                profit: 0.0,
                tax: 0.0,
                net_profit: 0.0,
            }
        );
        assert_eq!(records[2].tax, 25.0);
    }

    #[test]
    fn records_serialize_with_camel_case_keys() {
        let record = CashFlowRecord {
            year: "Mar 2024".to_string(),
            operating: 1.0,
            investing: 2.0,
            financing: 3.0,
            net_cash: 6.0,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["netCash"], 6.0);
        assert_eq!(json["year"], "Mar 2024");
    }

    #[test]
    fn extracts_profit_loss_from_document() {
        let html = Html::parse_document(r#"
            <html><body>
            <section id="profit-loss"><table>
              <thead><tr><th></th><th>2022</th><th>2023</th></tr></thead>
              <tbody><tr><td>Net Sales</td><td>1,000</td><td>1,200</td></tr></tbody>
            </table></section>
            </body></html>
        "#);

        let records = extract_statement::<ProfitLossRecord>(&html).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, "2022");
        assert_eq!(records[0].revenue, 1000.0);
        assert_eq!(records[1].year, "2023");
        assert_eq!(records[1].revenue, 1200.0);
        assert_eq!(records[1].net_profit, 0.0);
    }

    #[test]
    fn non_numeric_cell_still_serializes_as_number() {
        let html = Html::parse_document(r#"
            <html><body>
            <section id="profit-loss"><table>
              <thead><tr><th></th><th>2023</th></tr></thead>
              <tbody><tr><td>Sales</td><td>NaN</td></tr><tr><td>Revenue</td><td>inf</td></tr></tbody>
            </table></section>
            </body></html>
        "#);

        let records = extract_statement::<ProfitLossRecord>(&html).unwrap();
        assert_eq!(records[0].revenue, 0.0);
        let json = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(json["revenue"], 0.0);
    }
}
