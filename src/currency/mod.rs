//! Locale-aware money and date formatting for the presentation layer.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use spendwise_config::Config;
use spendwise_core::{Clock, CurrencyFormatter, DateFormatter};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Separators used when rendering numbers for a language tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::from_tag("en-US")
    }
}

impl LocaleConfig {
    /// Separators for a BCP 47 tag. Unknown languages use the en-US layout.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let (decimal_separator, grouping_separator) = match language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" => (',', '.'),
            "fr" | "sv" | "fi" | "nb" | "pl" | "cs" => (',', ' '),
            _ => ('.', ','),
        };
        Self {
            language_tag: tag.to_string(),
            decimal_separator,
            grouping_separator,
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "INR" => "₹".into(),
        "AUD" => "A$".into(),
        "CAD" => "CA$".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" | "KRW" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Renders a non-negative magnitude with grouping and the locale's decimal mark.
pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let fixed = format!("{:.*}", precision as usize, value.abs());
    let (int_part, fraction) = match fixed.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (fixed.as_str(), None),
    };
    let mut body = group_digits(int_part, locale.grouping_separator);
    if let Some(fraction) = fraction {
        body.push(locale.decimal_separator);
        body.push_str(fraction);
    }
    body
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Symbol-prefixed amount, with a leading `-` for negatives: `-$5.00`.
pub fn format_currency_value(amount: f64, code: &CurrencyCode, locale: &LocaleConfig) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let body = format_number(locale, amount, minor_units_for(code.as_str()));
    let symbol = symbol_for(code.as_str());
    let rounds_to_zero = body.chars().all(|ch| !ch.is_ascii_digit() || ch == '0');
    if amount < 0.0 && !rounds_to_zero {
        format!("-{symbol}{body}")
    } else {
        format!("{symbol}{body}")
    }
}

/// en-US dollars with two decimals, e.g. `$1,234.50`.
pub fn format_currency(amount: f64) -> String {
    format_currency_value(amount, &CurrencyCode::default(), &LocaleConfig::default())
}

/// Parses user-entered money text, ignoring symbols and grouping commas.
///
/// After stripping, the longest leading number is read and anything after it is
/// ignored, so `12.3.4` reads as `12.3`.
pub fn parse_currency(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.' || *ch == '-')
        .collect();
    numeric_prefix(&cleaned)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// `-?digits*(.digits*)?` from the start of `text`.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let mut seen_dot = false;
    while let Some(&byte) = bytes.get(end) {
        match byte {
            b'0'..=b'9' => {}
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    &text[..end]
}

/// `part` as a percentage of `total` with one decimal, or `"0"` for a zero total.
pub fn calculate_percentage(part: f64, total: f64) -> String {
    if total == 0.0 {
        return "0".to_string();
    }
    format!("{:.1}", part / total * 100.0)
}

/// Display form, e.g. `Jan 15, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Form-field form, e.g. `2024-01-15`.
pub fn format_date_for_input(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `None` when the result leaves chrono's date range.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

pub fn is_today(date: NaiveDate, clock: &dyn Clock) -> bool {
    date == clock.today()
}

/// Formatter configured from the user's locale and currency preferences.
#[derive(Debug, Clone, Default)]
pub struct LocaleFormatter {
    pub currency: CurrencyCode,
    pub locale: LocaleConfig,
}

impl LocaleFormatter {
    pub fn new(currency: CurrencyCode, locale: LocaleConfig) -> Self {
        Self { currency, locale }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CurrencyCode::new(config.currency.as_str()),
            LocaleConfig::from_tag(&config.locale),
        )
    }
}

impl CurrencyFormatter for LocaleFormatter {
    fn format_amount(&self, amount: f64) -> String {
        format_currency_value(amount, &self.currency, &self.locale)
    }
}

impl DateFormatter for LocaleFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        format_date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        let locale = LocaleConfig::default();
        assert_eq!(format_number(&locale, 0.0, 2), "0.00");
        assert_eq!(format_number(&locale, 999.0, 0), "999");
        assert_eq!(format_number(&locale, 1234567.891, 2), "1,234,567.89");
    }

    #[test]
    fn european_layout_swaps_separators() {
        let formatter = LocaleFormatter::new(CurrencyCode::new("eur"), LocaleConfig::from_tag("de-DE"));
        assert_eq!(formatter.format_amount(1234.5), "€1.234,50");
        let yen = LocaleFormatter::new(CurrencyCode::new("JPY"), LocaleConfig::default());
        assert_eq!(yen.format_amount(1500.0), "¥1,500");
    }

    #[test]
    fn numeric_prefix_stops_at_second_dot() {
        assert_eq!(numeric_prefix("12.3.4"), "12.3");
        assert_eq!(numeric_prefix("-5-2"), "-5");
        assert_eq!(numeric_prefix("..5"), ".");
        assert_eq!(numeric_prefix(""), "");
    }

    #[test]
    fn negative_rounding_to_zero_has_no_sign() {
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_currency(f64::NAN), "$0.00");
    }
}
