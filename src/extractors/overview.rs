// src/extractors/overview.rs
use crate::extractors::table::element_text;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::BTreeMap;

/// Display strings keyed by normalized label (`market_cap`, `stock_p_e`, ...).
pub type Overview = BTreeMap<String, String>;

static TOP_RATIO_ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("ul#top-ratios li").expect("Failed to compile TOP_RATIO_ITEM_SELECTOR")
});
static NAME_SPAN_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.name").expect("Failed to compile NAME_SPAN_SELECTOR"));
static NUMBER_SPAN_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.number").expect("Failed to compile NUMBER_SPAN_SELECTOR"));

static COMPANY_RATIOS_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.company-ratios").expect("Failed to compile COMPANY_RATIOS_SELECTOR")
});
static FLEX_ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li.flex").expect("Failed to compile FLEX_ITEM_SELECTOR"));
static SPAN_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span").expect("Failed to compile SPAN_SELECTOR"));

static SECTOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.sub").expect("Failed to compile SECTOR_SELECTOR"));
static COMPANY_NAME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1.h2").expect("Failed to compile COMPANY_NAME_SELECTOR"));

/// Collects the headline key/value pairs from the company page.
///
/// Each region is read on its own; a missing region just contributes
/// nothing. Later regions overwrite earlier keys.
pub fn extract_overview(document: &Html) -> Overview {
    let mut overview = Overview::new();

    read_top_ratios(document, &mut overview);
    read_company_ratios(document, &mut overview);

    match document.select(&SECTOR_SELECTOR).next() {
        Some(sub) => {
            overview.insert("sector".to_string(), element_text(sub));
        }
        None => tracing::debug!("No sector subtitle on page"),
    }

    match document.select(&COMPANY_NAME_SELECTOR).next() {
        Some(title) => {
            overview.insert("company_name".to_string(), element_text(title));
        }
        None => tracing::debug!("No company name heading on page"),
    }

    tracing::debug!("Overview holds {} fields", overview.len());
    overview
}

fn read_top_ratios(document: &Html, overview: &mut Overview) {
    let mut found = 0;
    for item in document.select(&TOP_RATIO_ITEM_SELECTOR) {
        let label = item.select(&NAME_SPAN_SELECTOR).next();
        let value = item.select(&NUMBER_SPAN_SELECTOR).next();
        if let (Some(label), Some(value)) = (label, value) {
            overview.insert(overview_key(&element_text(label)), element_text(value));
            found += 1;
        }
    }
    if found == 0 {
        tracing::debug!("No top ratios found");
    }
}

fn read_company_ratios(document: &Html, overview: &mut Overview) {
    let Some(container) = document.select(&COMPANY_RATIOS_SELECTOR).next() else {
        tracing::debug!("No company ratios block found");
        return;
    };

    for item in container.select(&FLEX_ITEM_SELECTOR) {
        let mut spans = item.select(&SPAN_SELECTOR);
        if let (Some(label), Some(value)) = (spans.next(), spans.next()) {
            overview.insert(overview_key(&element_text(label)), element_text(value));
        }
    }
}

/// `"Stock P/E"` → `"stock_p_e"`.
pub fn overview_key(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "_").replace('/', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <h1 class="h2 shrink-text">Reliance Industries Ltd</h1>
          <p class="sub">Refineries</p>
          <ul id="top-ratios">
            <li><span class="name">Market Cap</span><span class="value">₹ <span class="number">17,12,345</span> Cr.</span></li>
            <li><span class="name">Stock P/E</span><span class="value"><span class="number">27.1</span></span></li>
            <li><span class="name">Orphan label</span></li>
          </ul>
          <div class="company-ratios">
            <ul>
              <li class="flex"><span>Debt to equity</span><span>0.44</span></li>
              <li class="flex"><span>Lonely</span></li>
            </ul>
          </div>
        </body></html>
    "#;

    #[test]
    fn reads_every_region() {
        let overview = extract_overview(&Html::parse_document(PAGE));

        assert_eq!(overview.get("market_cap").map(String::as_str), Some("17,12,345"));
        assert_eq!(overview.get("stock_p_e").map(String::as_str), Some("27.1"));
        assert_eq!(overview.get("debt_to_equity").map(String::as_str), Some("0.44"));
        assert_eq!(overview.get("sector").map(String::as_str), Some("Refineries"));
        assert_eq!(
            overview.get("company_name").map(String::as_str),
            Some("Reliance Industries Ltd")
        );
        assert!(!overview.contains_key("orphan_label"));
        assert!(!overview.contains_key("lonely"));
    }

    #[test]
    fn missing_regions_do_not_block_others() {
        let html = Html::parse_document(r#"<html><body><p class="sub">Banks</p></body></html>"#);
        let overview = extract_overview(&html);
        assert_eq!(overview.len(), 1);
        assert_eq!(overview["sector"], "Banks");
    }

    #[test]
    fn key_normalization() {
        assert_eq!(overview_key(" Book Value "), "book_value");
        assert_eq!(overview_key("Price/Book"), "price_book");
    }
}
