// src/extractors/ratios.rs
//
// Company ratios are located with explicit (anchor selector, label) rules
// tried in priority order. The label is matched case-insensitively as a
// substring of the anchor's parent text, so overlapping labels can attach
// the wrong number: the fallback "PE" label is found inside "Expenses" or
// "Operating Profit", and a "ROE" row also matches "ROE 3Yrs". Telling them
// apart needs markup guarantees the site does not give.

use crate::extractors::table::element_text;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

/// Value reported when no rule matches.
pub const NOT_AVAILABLE: &str = "N/A";

const NUMBER_ANCHOR: &str = "span.number";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioCategory {
    Profitability,
    Liquidity,
    Leverage,
    Valuation,
}

/// One lookup attempt: elements matching `anchor` whose parent text contains `label`.
#[derive(Debug, Clone, Copy)]
pub struct RatioRule {
    pub anchor: &'static str,
    pub label: &'static str,
}

const fn number_labelled(label: &'static str) -> RatioRule {
    RatioRule { anchor: NUMBER_ANCHOR, label }
}

/// A compared metric: where to find the company value and what to compare it against.
#[derive(Debug, Clone, Copy)]
pub struct Benchmark {
    pub category: RatioCategory,
    pub metric: &'static str,
    pub rules: &'static [RatioRule],
    pub industry: &'static str,
    pub implication: &'static str,
}

pub const BENCHMARKS: &[Benchmark] = &[
    Benchmark {
        category: RatioCategory::Profitability,
        metric: "Net Profit Margin",
        rules: &[number_labelled("OPM"), number_labelled("Net Profit Margin")],
        industry: "12.5%",
        implication: "Comparison with industry average",
    },
    Benchmark {
        category: RatioCategory::Profitability,
        metric: "ROE",
        rules: &[number_labelled("ROE")],
        industry: "15.2%",
        implication: "Return on equity compared to sector",
    },
    Benchmark {
        category: RatioCategory::Profitability,
        metric: "ROCE",
        rules: &[number_labelled("ROCE")],
        industry: "18.5%",
        implication: "Return on capital employed analysis",
    },
    Benchmark {
        category: RatioCategory::Liquidity,
        metric: "Current Ratio",
        rules: &[number_labelled("Current Ratio")],
        industry: "1.8",
        implication: "Short-term liquidity position",
    },
    Benchmark {
        category: RatioCategory::Liquidity,
        metric: "Quick Ratio",
        rules: &[number_labelled("Quick Ratio")],
        industry: "1.2",
        implication: "Immediate liquidity strength",
    },
    Benchmark {
        category: RatioCategory::Leverage,
        metric: "Debt to Equity",
        rules: &[number_labelled("Debt to Equity")],
        industry: "0.65",
        implication: "Financial leverage comparison",
    },
    Benchmark {
        category: RatioCategory::Valuation,
        metric: "P/E Ratio",
        rules: &[number_labelled("Stock P/E"), number_labelled("PE")],
        industry: "22.3",
        implication: "Valuation vs sector average",
    },
    Benchmark {
        category: RatioCategory::Valuation,
        metric: "P/B Ratio",
        rules: &[number_labelled("Price to Book"), number_labelled("PB")],
        industry: "2.8",
        implication: "Price to book value analysis",
    },
];

struct CompiledRule {
    anchor: Selector,
    label: Regex,
}

// Rules are static, so compiling them once is safe to `expect`.
static COMPILED_RULES: Lazy<Vec<Vec<CompiledRule>>> = Lazy::new(|| {
    BENCHMARKS
        .iter()
        .map(|benchmark| {
            benchmark
                .rules
                .iter()
                .map(|rule| CompiledRule {
                    anchor: Selector::parse(rule.anchor)
                        .expect("Failed to compile ratio anchor selector"),
                    label: RegexBuilder::new(&regex::escape(rule.label))
                        .case_insensitive(true)
                        .build()
                        .expect("Failed to compile ratio label pattern"),
                })
                .collect()
        })
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatioEntry {
    pub metric: String,
    pub company: String,
    pub industry: String,
    pub implication: String,
}

/// Company ratios beside fixed industry benchmarks, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RatioComparison {
    pub profitability: Vec<RatioEntry>,
    pub liquidity: Vec<RatioEntry>,
    pub leverage: Vec<RatioEntry>,
    pub valuation: Vec<RatioEntry>,
}

impl RatioComparison {
    fn category_mut(&mut self, category: RatioCategory) -> &mut Vec<RatioEntry> {
        match category {
            RatioCategory::Profitability => &mut self.profitability,
            RatioCategory::Liquidity => &mut self.liquidity,
            RatioCategory::Leverage => &mut self.leverage,
            RatioCategory::Valuation => &mut self.valuation,
        }
    }
}

pub fn extract_ratios(document: &Html) -> RatioComparison {
    let mut comparison = RatioComparison::default();

    for (benchmark, rules) in BENCHMARKS.iter().zip(COMPILED_RULES.iter()) {
        let company = first_rule_match(document, rules).unwrap_or_else(|| {
            tracing::debug!("No value found for ratio '{}'", benchmark.metric);
            NOT_AVAILABLE.to_string()
        });

        comparison.category_mut(benchmark.category).push(RatioEntry {
            metric: benchmark.metric.to_string(),
            company,
            industry: benchmark.industry.to_string(),
            implication: benchmark.implication.to_string(),
        });
    }

    comparison
}

fn first_rule_match(document: &Html, rules: &[CompiledRule]) -> Option<String> {
    rules.iter().find_map(|rule| {
        document
            .select(&rule.anchor)
            .find(|anchor| parent_text(*anchor).is_some_and(|text| rule.label.is_match(&text)))
            .map(element_text)
            .filter(|value| !value.is_empty())
    })
}

fn parent_text(element: ElementRef<'_>) -> Option<String> {
    element
        .parent()
        .and_then(ElementRef::wrap)
        .map(|parent| parent.text().collect())
}
