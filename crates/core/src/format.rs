//! Locale-aware currency formatting.
//!
//! Produces display strings such as `$899.99` (en-US/USD), `R$ 12.345,60`
//! (pt-BR/BRL) or `1234,56 €` (es-ES/EUR). The rules follow CLDR for the
//! supported locales, with two simplifications: separators are plain ASCII
//! spaces, and ISO-code symbols (e.g. `ARS`) are always followed by a space.
//!
//! ```
//! use evolution_core::{CurrencyCode, Locale, format_currency, format_currency_default};
//! use rust_decimal::Decimal;
//!
//! assert_eq!(format_currency_default(Decimal::new(89_999, 2)), "$899.99");
//! assert_eq!(
//!     format_currency(Decimal::new(1_234_560, 2), Locale::PtBr, CurrencyCode::BRL),
//!     "R$ 12.345,60"
//! );
//! ```

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::money::{CurrencyCode, Money};

/// Error parsing a locale tag.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("unsupported locale: {0}")]
    Unsupported(String),
}

/// Display locales supported by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "es-AR")]
    EsAr,
    #[serde(rename = "es-MX")]
    EsMx,
    #[serde(rename = "es-CL")]
    EsCl,
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "es-ES")]
    EsEs,
}

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// `$1,234.56`
    Prefix,
    /// `R$ 1.234,56`
    PrefixSpaced,
    /// `1.234,56 €`
    SuffixSpaced,
}

#[derive(Debug, Clone, Copy)]
struct NumberStyle {
    group: char,
    decimal: char,
    /// Digits the integer part needs beyond the first group before grouping
    /// kicks in (2 for es-ES, which writes `1234` but `12.345`).
    min_grouping: usize,
    placement: Placement,
}

impl Locale {
    pub const ALL: [Self; 6] = [
        Self::EnUs,
        Self::EsAr,
        Self::EsMx,
        Self::EsCl,
        Self::PtBr,
        Self::EsEs,
    ];

    /// The BCP 47 tag, e.g. `en-US`.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::EsAr => "es-AR",
            Self::EsMx => "es-MX",
            Self::EsCl => "es-CL",
            Self::PtBr => "pt-BR",
            Self::EsEs => "es-ES",
        }
    }

    /// The `lang` attribute value for HTML documents.
    #[must_use]
    pub const fn language(self) -> &'static str {
        match self {
            Self::EnUs => "en",
            Self::PtBr => "pt",
            Self::EsAr | Self::EsMx | Self::EsCl | Self::EsEs => "es",
        }
    }

    const fn style(self) -> NumberStyle {
        match self {
            Self::EnUs | Self::EsMx => NumberStyle {
                group: ',',
                decimal: '.',
                min_grouping: 1,
                placement: Placement::Prefix,
            },
            Self::EsCl => NumberStyle {
                group: '.',
                decimal: ',',
                min_grouping: 1,
                placement: Placement::Prefix,
            },
            Self::EsAr | Self::PtBr => NumberStyle {
                group: '.',
                decimal: ',',
                min_grouping: 1,
                placement: Placement::PrefixSpaced,
            },
            Self::EsEs => NumberStyle {
                group: '.',
                decimal: ',',
                min_grouping: 2,
                placement: Placement::SuffixSpaced,
            },
        }
    }

    /// The symbol this locale uses for `currency`.
    #[must_use]
    pub const fn symbol(self, currency: CurrencyCode) -> &'static str {
        use CurrencyCode::{ARS, BRL, CLP, EUR, MXN, USD};
        match (self, currency) {
            (Self::EnUs, USD)
            | (Self::EsAr, ARS)
            | (Self::EsMx, MXN)
            | (Self::EsCl, CLP) => "$",
            (Self::EnUs, MXN) => "MX$",
            (_, BRL) => "R$",
            (Self::EsAr | Self::EsCl | Self::PtBr | Self::EsEs, USD) => "US$",
            (Self::EnUs | Self::EsAr | Self::PtBr | Self::EsEs, EUR) => "€",
            (_, code) => code.code(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for Locale {
    type Err = LocaleError;

    /// Accepts `en-US`, `en_US` and any ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|locale| locale.tag().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| LocaleError::Unsupported(s.to_string()))
    }
}

/// Format `amount` as a price in `currency` using `locale`'s conventions.
///
/// The amount is rounded half away from zero to the currency's minor units.
#[must_use]
pub fn format_currency(amount: Decimal, locale: Locale, currency: CurrencyCode) -> String {
    let style = locale.style();
    let dp = currency.minor_units();
    let rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;
    let number = format_number(rounded.abs(), dp, style);

    let symbol = locale.symbol(currency);
    let is_code = symbol.chars().all(|c| c.is_ascii_uppercase());
    let sign = if negative { "-" } else { "" };

    match style.placement {
        Placement::Prefix if !is_code => format!("{sign}{symbol}{number}"),
        Placement::Prefix | Placement::PrefixSpaced => format!("{sign}{symbol} {number}"),
        Placement::SuffixSpaced => format!("{sign}{number} {symbol}"),
    }
}

/// Format with the storefront defaults: `en-US` and `USD`.
#[must_use]
pub fn format_currency_default(amount: Decimal) -> String {
    format_currency(amount, Locale::EnUs, CurrencyCode::USD)
}

impl Money {
    /// Format this amount in its own currency for `locale`.
    #[must_use]
    pub fn format(&self, locale: Locale) -> String {
        format_currency(self.amount, locale, self.currency)
    }
}

fn format_number(abs: Decimal, dp: u32, style: NumberStyle) -> String {
    let plain = format!("{abs:.prec$}", prec = dp as usize);
    let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

    let mut out = group_digits(integer, style);
    if !fraction.is_empty() {
        out.push(style.decimal);
        out.push_str(fraction);
    }
    out
}

fn group_digits(integer: &str, style: NumberStyle) -> String {
    let len = integer.len();
    if len < 3 + style.min_grouping {
        return integer.to_string();
    }

    let mut out = String::with_capacity(len + len / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(style.group);
        }
        out.push(digit);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(minor: i64) -> Decimal {
        Decimal::new(minor, 2)
    }

    #[test]
    fn test_default_locale_and_currency() {
        assert_eq!(format_currency_default(dec(89_999)), "$899.99");
        assert_eq!(format_currency_default(dec(7999)), "$79.99");
        assert_eq!(format_currency_default(Decimal::from(5)), "$5.00");
        assert_eq!(format_currency_default(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_grouping_en_us() {
        assert_eq!(format_currency_default(Decimal::new(12_345, 1)), "$1,234.50");
        assert_eq!(format_currency_default(dec(123_456_789)), "$1,234,567.89");
        assert_eq!(format_currency_default(dec(99_999)), "$999.99");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(format_currency_default(Decimal::new(10_005, 3)), "$10.01");
        assert_eq!(format_currency_default(Decimal::new(10_004, 3)), "$10.00");
        assert_eq!(format_currency_default(Decimal::new(-10_005, 3)), "-$10.01");
    }

    #[test]
    fn test_negative_and_negative_zero() {
        assert_eq!(format_currency_default(dec(-1050)), "-$10.50");
        assert_eq!(format_currency_default(Decimal::new(-1, 3)), "$0.00");
    }

    #[test]
    fn test_foreign_currency_in_en_us() {
        let amount = dec(123_456);
        assert_eq!(format_currency(amount, Locale::EnUs, CurrencyCode::EUR), "€1,234.56");
        assert_eq!(format_currency(amount, Locale::EnUs, CurrencyCode::MXN), "MX$1,234.56");
        assert_eq!(format_currency(amount, Locale::EnUs, CurrencyCode::BRL), "R$1,234.56");
        assert_eq!(format_currency(amount, Locale::EnUs, CurrencyCode::ARS), "ARS 1,234.56");
        assert_eq!(format_currency(amount, Locale::EnUs, CurrencyCode::CLP), "CLP 1,235");
    }

    #[test]
    fn test_latin_american_locales() {
        assert_eq!(
            format_currency(dec(123_456), Locale::EsAr, CurrencyCode::ARS),
            "$ 1.234,56"
        );
        assert_eq!(
            format_currency(dec(123_456), Locale::EsAr, CurrencyCode::USD),
            "US$ 1.234,56"
        );
        assert_eq!(
            format_currency(dec(123_456), Locale::EsMx, CurrencyCode::MXN),
            "$1,234.56"
        );
        assert_eq!(
            format_currency(dec(123_456), Locale::EsMx, CurrencyCode::USD),
            "USD 1,234.56"
        );
        assert_eq!(
            format_currency(Decimal::from(1500), Locale::EsCl, CurrencyCode::CLP),
            "$1.500"
        );
        assert_eq!(
            format_currency(dec(1_234_560), Locale::PtBr, CurrencyCode::BRL),
            "R$ 12.345,60"
        );
    }

    #[test]
    fn test_es_es_suffix_and_min_grouping() {
        assert_eq!(
            format_currency(dec(123_456), Locale::EsEs, CurrencyCode::EUR),
            "1234,56 €"
        );
        assert_eq!(
            format_currency(dec(1_234_560), Locale::EsEs, CurrencyCode::EUR),
            "12.345,60 €"
        );
        assert_eq!(
            format_currency(dec(-250), Locale::EsEs, CurrencyCode::EUR),
            "-2,50 €"
        );
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::EnUs);
        assert_eq!("pt_br".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!(
            "fr-FR".parse::<Locale>(),
            Err(LocaleError::Unsupported("fr-FR".to_string()))
        );
    }

    #[test]
    fn test_locale_serde_uses_tag() {
        assert_eq!(serde_json::to_string(&Locale::EsAr).unwrap(), "\"es-AR\"");
        for locale in Locale::ALL {
            assert_eq!(locale.to_string(), locale.tag());
        }
    }

    #[test]
    fn test_money_format() {
        let price = Money::from_minor(24_999, CurrencyCode::USD);
        assert_eq!(price.format(Locale::EnUs), "$249.99");
    }
}
