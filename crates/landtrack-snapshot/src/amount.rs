//! Monetary amounts and lenient field coercion
//!
//! Acquisition data is entered by hand over months, so monetary and date
//! columns regularly hold blanks, stray text or formatted numbers. Every
//! helper here coerces such values to zero (amounts) or absent (dates and
//! optional amounts) instead of failing the whole snapshot.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};

/// Monetary amount in the store's currency
///
/// Deserializes from numbers, numeric strings (`"1,250,000.50"`) or null.
/// Unparseable input becomes `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    /// Zero amount
    pub const ZERO: Self = Self(0.0);

    /// Create amount, non-finite values become zero
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value)
        } else {
            Self::ZERO
        }
    }

    /// Parse a hand-entered amount
    ///
    /// Thousands separators and surrounding whitespace are ignored.
    /// Anything else that fails to parse yields zero.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        parse_amount(raw).unwrap_or(Self::ZERO)
    }

    /// Underlying value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Strictly greater than zero
    #[inline]
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    /// Exactly zero
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(deserializer
            .deserialize_any(LenientAmountVisitor)?
            .unwrap_or(Self::ZERO))
    }
}

fn parse_amount(raw: &str) -> Option<Amount> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Amount)
}

/// Visitor accepting any scalar; `None` means blank or unparseable
struct LenientAmountVisitor;

impl<'de> Visitor<'de> for LenientAmountVisitor {
    type Value = Option<Amount>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a monetary amount")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v.is_finite().then(|| Amount::new(v)))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(Amount::new(v as f64)))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(Amount::new(v as f64)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(parse_amount(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

/// `deserialize_with` helpers for optional fields
pub mod lenient {
    use super::{Amount, LenientAmountVisitor};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    /// Optional amount: blank or malformed input is absent
    ///
    /// # Errors
    /// Only on deserializer-level failures, never on bad values.
    pub fn optional_amount<'de, D>(deserializer: D) -> Result<Option<Amount>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientAmountVisitor)
    }

    /// Optional date: accepts `YYYY-MM-DD` or RFC 3339, anything else is absent
    ///
    /// # Errors
    /// Only on deserializer-level failures, never on bad values.
    pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .and_then(super::parse_date_lenient))
    }
}

/// Parse a date the way the store emits them
///
/// Accepts `2024-03-01`, `2024-03-01T10:00:00Z` and `2024-03-01 10:00:00`.
#[must_use]
pub fn parse_date_lenient(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default)]
        paid: Amount,
        #[serde(default, deserialize_with = "lenient::optional_amount")]
        interest: Option<Amount>,
        #[serde(default, deserialize_with = "lenient::date")]
        on: Option<NaiveDate>,
    }

    #[test]
    fn parse_lenient_strips_separators() {
        assert_eq!(Amount::parse_lenient(" 1,250,000.50 ").value(), 1_250_000.5);
        assert_eq!(Amount::parse_lenient("n/a"), Amount::ZERO);
        assert_eq!(Amount::parse_lenient(""), Amount::ZERO);
        assert_eq!(Amount::parse_lenient("NaN"), Amount::ZERO);
    }

    #[test]
    fn amount_accepts_numbers_and_strings() {
        let row: Row =
            serde_json::from_str(r#"{"paid": "12,000", "interest": 55.5, "on": "2024-02-10"}"#)
                .unwrap();
        assert_eq!(row.paid.value(), 12_000.0);
        assert_eq!(row.interest, Some(Amount::new(55.5)));
        assert_eq!(row.on, NaiveDate::from_ymd_opt(2024, 2, 10));
    }

    #[test]
    fn malformed_values_are_coerced() {
        let row: Row =
            serde_json::from_str(r#"{"paid": "twelve", "interest": "??", "on": "last week"}"#)
                .unwrap();
        assert_eq!(row.paid, Amount::ZERO);
        assert_eq!(row.interest, None);
        assert_eq!(row.on, None);
    }

    #[test]
    fn nulls_and_missing_fields() {
        let row: Row = serde_json::from_str(r#"{"paid": null, "interest": null}"#).unwrap();
        assert_eq!(row.paid, Amount::ZERO);
        assert_eq!(row.interest, None);
        assert_eq!(row.on, None);
    }

    #[test]
    fn dates_from_datetimes() {
        assert_eq!(
            parse_date_lenient("2023-11-05T08:30:00Z"),
            NaiveDate::from_ymd_opt(2023, 11, 5)
        );
        assert_eq!(
            parse_date_lenient("2023-11-05 08:30:00"),
            NaiveDate::from_ymd_opt(2023, 11, 5)
        );
        assert_eq!(parse_date_lenient("05/11/2023"), None);
    }

    #[test]
    fn amount_sign_checks() {
        assert!(Amount::new(10.0).is_positive());
        assert!(!Amount::new(-10.0).is_positive());
        assert!(!Amount::new(-10.0).is_zero());
        assert!(!Amount::ZERO.is_positive());
        assert!(Amount::ZERO.is_zero());
    }
}
