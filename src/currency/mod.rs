//! Money and date formatting for rendered reports.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::month::{month_label, MonthKey};

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

    pub fn symbol(&self) -> &str {
        match self.as_str() {
            "USD" | "ARS" | "CLP" | "MXN" | "COP" => "$",
            "EUR" => "€",
            "GBP" => "£",
            "JPY" => "¥",
            "BRL" => "R$",
            other => other,
        }
    }

    pub fn minor_units(&self) -> u8 {
        match self.as_str() {
            "JPY" | "CLP" => 0,
            "KWD" | "BHD" => 3,
            _ => 2,
        }
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateFormatStyle {
    Short,
    Medium,
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub date_format: DateFormatStyle,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            date_format: DateFormatStyle::Short,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CurrencyDisplay {
    Symbol,
    Code,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency_display: CurrencyDisplay::Symbol,
            negative_style: NegativeStyle::Sign,
        }
    }
}

/// Bundles the currency, locale and style used to print amounts.
#[derive(Debug, Clone, Default)]
pub struct MoneyFormatter {
    pub code: CurrencyCode,
    pub locale: LocaleConfig,
    pub options: FormatOptions,
}

impl MoneyFormatter {
    pub fn new(code: CurrencyCode, locale: LocaleConfig, options: FormatOptions) -> Self {
        Self {
            code,
            locale,
            options,
        }
    }

    pub fn amount(&self, value: f64) -> String {
        let body = format_number(&self.locale, value.abs(), self.code.minor_units());
        let signed = if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
            match self.options.negative_style {
                NegativeStyle::Sign => format!("-{body}"),
                NegativeStyle::Parentheses => format!("({body})"),
            }
        } else {
            body
        };
        match self.options.currency_display {
            CurrencyDisplay::Symbol => format!("{}{}", self.code.symbol(), signed),
            CurrencyDisplay::Code => format!("{} {}", self.code.as_str(), signed),
        }
    }

    pub fn percentage(&self, value: f64) -> String {
        format!("{}%", format_number(&self.locale, value, 1))
    }

    pub fn date(&self, date: NaiveDate) -> String {
        format_date(&self.locale, date)
    }

    pub fn month(&self, month: MonthKey) -> String {
        month.label()
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let raw = format!("{:.*}", precision as usize, value);
    let (int_part, fraction) = match raw.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (raw.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut out = format!("{sign}{}", group_digits(digits, locale.grouping_separator));
    if let Some(fraction) = fraction {
        out.push(locale.decimal_separator);
        out.push_str(fraction);
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    match locale.date_format {
        DateFormatStyle::Short => date.format("%Y-%m-%d").to_string(),
        DateFormatStyle::Medium => format!(
            "{:02} {} {}",
            date.day(),
            month_label(date.month()),
            date.year()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_locale_separators() {
        let locale = LocaleConfig {
            decimal_separator: ',',
            grouping_separator: '.',
            ..LocaleConfig::default()
        };
        assert_eq!(format_number(&locale, 1234567.891, 2), "1.234.567,89");
        assert_eq!(format_number(&locale, 999.0, 0), "999");
        assert_eq!(format_number(&LocaleConfig::default(), -1000.0, 2), "-1,000.00");
    }

    #[test]
    fn formats_amounts_with_symbol_or_code() {
        let mut formatter = MoneyFormatter::default();
        assert_eq!(formatter.amount(100.0), "$100.00");
        assert_eq!(formatter.amount(-2500.5), "$-2,500.50");
        formatter.options.negative_style = NegativeStyle::Parentheses;
        formatter.options.currency_display = CurrencyDisplay::Code;
        assert_eq!(formatter.amount(-12.0), "USD (12.00)");
    }

    #[test]
    fn zero_minor_unit_currencies_drop_decimals() {
        let formatter = MoneyFormatter::new(
            CurrencyCode::new("clp"),
            LocaleConfig::default(),
            FormatOptions::default(),
        );
        assert_eq!(formatter.amount(150000.0), "$150,000");
    }

    #[test]
    fn medium_dates_use_month_abbreviations() {
        let locale = LocaleConfig {
            date_format: DateFormatStyle::Medium,
            ..LocaleConfig::default()
        };
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(&locale, date), "05 Mar 2024");
        assert_eq!(format_date(&LocaleConfig::default(), date), "2024-03-05");
    }
}
