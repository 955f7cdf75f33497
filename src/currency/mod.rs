use std::{fmt, str::FromStr};

use serde::{de::Deserializer, Deserialize, Serialize};

use crate::errors::LedgerError;

/// Symbol used when a currency code is not in the supported set.
pub const DEFAULT_SYMBOL: &str = "$";

const DECIMAL_PLACES: usize = 2;
const GROUPING_SEPARATOR: char = ',';

/// Display currencies offered in settings. The code is a label only; amounts
/// are never converted between currencies.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "INR")]
    Inr,
    #[serde(rename = "JPY")]
    Jpy,
    #[serde(rename = "CNY")]
    Cny,
    #[serde(rename = "AUD")]
    Aud,
    #[serde(rename = "CAD")]
    Cad,
}

impl Currency {
    pub const ALL: [Currency; 8] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Inr,
        Currency::Jpy,
        Currency::Cny,
        Currency::Aud,
        Currency::Cad,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Inr => "INR",
            Currency::Jpy => "JPY",
            Currency::Cny => "CNY",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd | Currency::Aud | Currency::Cad => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Inr => "₹",
            Currency::Jpy | Currency::Cny => "¥",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
    }

    /// Formats `amount` with this currency's symbol. See [`format_currency`].
    pub fn format(&self, amount: f64) -> String {
        format_currency(amount, self.code())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_code(value)
            .ok_or_else(|| LedgerError::Validation(format!("unsupported currency `{value}`")))
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(match value {
            Some(code) => Currency::from_code(&code).unwrap_or_else(|| {
                tracing::warn!(code = %code, "unknown currency code in settings, using default");
                Currency::default()
            }),
            None => Currency::default(),
        })
    }
}

pub fn symbol_for(code: &str) -> &'static str {
    Currency::from_code(code)
        .map(|currency| currency.symbol())
        .unwrap_or(DEFAULT_SYMBOL)
}

/// Renders `|amount|` as `<symbol><grouped digits>.<2 decimals>`.
///
/// The sign is dropped; callers convey direction themselves.
pub fn format_currency(amount: f64, code: &str) -> String {
    format!(
        "{}{}",
        symbol_for(code),
        format_number(amount.abs(), DECIMAL_PLACES)
    )
}

/// Halves round away from zero, so `1.125` renders as `1.13`.
pub fn format_number(value: f64, precision: usize) -> String {
    let body = format!("{:.*}", precision, round_half_away(value, precision));
    let (int_part, fraction) = match body.find('.') {
        Some(pos) => body.split_at(pos),
        None => (body.as_str(), ""),
    };
    match int_part.strip_prefix('-') {
        Some(digits) => format!("-{}{}", group_digits(digits), fraction),
        None => format!("{}{}", group_digits(int_part), fraction),
    }
}

fn round_half_away(value: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    let scaled = value * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    }
}

fn group_digits(digits: &str) -> String {
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return digits.to_string();
    }
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.push(GROUPING_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped.chars().rev().collect()
}
