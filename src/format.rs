//! Display formatting for prices, areas and percentages.

use num_format::{Locale, ToFormattedString};

/// Placeholder shown for absent statistics.
pub const ABSENT: &str = "-";

/// Locale used when none is configured; the source data is priced in roubles.
pub const DEFAULT_LOCALE: &str = "ru";

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `ru`, `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "ru" | "ru_ru" | "russian" => &Locale::ru,
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Rounded, thousands-grouped integer in the default (Russian) locale.
pub fn format_integer(n: f64) -> String {
    format_integer_locale(n, DEFAULT_LOCALE)
}

/// Rounded, thousands-grouped integer for a locale tag. Non-finite input formats as `0`.
pub fn format_integer_locale(n: f64, locale_tag: &str) -> String {
    let locale = map_locale(locale_tag);
    let rounded = if n.is_finite() { n.round() as i64 } else { 0 };
    rounded.to_formatted_string(locale)
}

/// `round(100 * numerator / denominator)`, or 0 when the ratio is undefined.
pub fn percentage(numerator: f64, denominator: f64) -> u32 {
    if denominator == 0.0 {
        return 0;
    }
    let p = (100.0 * numerator / denominator).round();
    if p.is_finite() && p > 0.0 { p as u32 } else { 0 }
}

/// Percentage rendered as `"N%"`.
pub fn format_percentage(numerator: f64, denominator: f64) -> String {
    format!("{}%", percentage(numerator, denominator))
}

/// Area with two decimals, or [`ABSENT`].
pub fn format_area(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() && x > 0.0 => format!("{:.2}", x),
        _ => ABSENT.to_string(),
    }
}

/// Cost in millions with two decimals, or [`ABSENT`].
pub fn format_millions(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() && x > 0.0 => format!("{:.2}", x / 1_000_000.0),
        _ => ABSENT.to_string(),
    }
}

/// Grouped whole-currency price, or [`ABSENT`].
pub fn format_price(v: Option<f64>, locale_tag: &str) -> String {
    match v {
        Some(x) if x.is_finite() && x > 0.0 => format_integer_locale(x, locale_tag),
        _ => ABSENT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_locale_falls_back_to_english() {
        assert_eq!(map_locale("xx").name(), Locale::en.name());
        assert_eq!(map_locale("RU_ru").name(), Locale::ru.name());
    }

    #[test]
    fn absent_renders_as_dash() {
        assert_eq!(format_area(None), "-");
        assert_eq!(format_millions(Some(0.0)), "-");
        assert_eq!(format_price(None, "en"), "-");
    }
}
