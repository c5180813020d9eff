// src/extractors/number.rs

// Values rendered in crores carry this suffix on the source site
const CRORE_SUFFIX: &str = "Cr";

/// Parses display text such as `"1,234.56 Cr"` or `"12.5%"` into a number.
///
/// Returns `None` for blank cells, `"-"`, `"N/A"` and anything that is still
/// not a finite float once separators, the crore suffix and percent signs are
/// gone (`"NaN"` and `"inf"` included). A parsed zero stays `Some(0.0)`.
pub fn normalize(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || text == "-" || text == "N/A" {
        return None;
    }

    let cleaned = text
        .replace(',', "")
        .replace(CRORE_SUFFIX, "")
        .replace('%', "");

    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
