//! Amount text as edited by the user and its numeric interpretation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Amount shown in the input field when a session starts.
pub const DEFAULT_AMOUNT: &str = "1.00";

/// Text in the amount field.
///
/// Only values that are empty or consist of digits with at most one decimal
/// point can be constructed. Anything else is rejected at the edit boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AmountText(String);

impl AmountText {
    /// Accept `text` if it is an allowed in-progress amount.
    pub fn parse(text: &str) -> Option<Self> {
        if Self::is_acceptable(text) {
            Some(Self(text.to_string()))
        } else {
            None
        }
    }

    /// Whether `text` is empty or digits with at most one decimal point.
    pub fn is_acceptable(text: &str) -> bool {
        let mut seen_point = false;
        for c in text.chars() {
            match c {
                '0'..='9' => {}
                '.' if !seen_point => seen_point = true,
                _ => return false,
            }
        }
        true
    }

    /// The raw text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the text as a number.
    pub fn numeric(&self) -> NumericAmount {
        NumericAmount::parse(&self.0)
    }
}

impl Default for AmountText {
    fn default() -> Self {
        Self(DEFAULT_AMOUNT.to_string())
    }
}

impl fmt::Display for AmountText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AmountText {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_acceptable(&value) {
            Ok(Self(value))
        } else {
            Err(format!("not an amount: {value:?}"))
        }
    }
}

impl From<AmountText> for String {
    fn from(value: AmountText) -> Self {
        value.0
    }
}

/// Numeric reading of an [`AmountText`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericAmount {
    /// Parsed to a finite, non-negative value.
    Valid(f64),
    /// Empty, unparseable, or negative.
    Invalid,
}

impl NumericAmount {
    /// Parse amount text. "1." and ".5" are numbers; "" and "." are not.
    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => NumericAmount::Valid(value),
            _ => NumericAmount::Invalid,
        }
    }

    /// Check if the amount passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, NumericAmount::Valid(_))
    }

    /// The value, if valid.
    pub fn value(&self) -> Option<f64> {
        match self {
            NumericAmount::Valid(v) => Some(*v),
            NumericAmount::Invalid => None,
        }
    }

    /// The value for display purposes; invalid amounts show as 0.
    pub fn display_value(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_acceptable_amounts() {
        for text in ["", "0", "1.00", "123", ".5", "5.", "."] {
            assert!(AmountText::is_acceptable(text), "{text:?} should be accepted");
        }
    }

    #[test]
    fn test_rejected_amounts() {
        for text in ["abc", "1.2.3", "-1", "1e5", " 1", "1,000", "+2"] {
            assert!(AmountText::parse(text).is_none(), "{text:?} should be rejected");
        }
    }

    #[test]
    fn test_numeric_amount() {
        assert_eq!(AmountText::default().numeric(), NumericAmount::Valid(1.0));
        assert_eq!(NumericAmount::parse("5."), NumericAmount::Valid(5.0));
        assert_eq!(NumericAmount::parse(".25"), NumericAmount::Valid(0.25));
        assert_eq!(NumericAmount::parse(""), NumericAmount::Invalid);
        assert_eq!(NumericAmount::parse("."), NumericAmount::Invalid);
        assert_eq!(NumericAmount::parse("-3"), NumericAmount::Invalid);
        assert_eq!(NumericAmount::parse("abc").display_value(), 0.0);
    }

    #[test]
    fn test_serde_rejects_bad_text() {
        let ok: AmountText = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(ok.as_str(), "12.5");
        assert!(serde_json::from_str::<AmountText>("\"12a\"").is_err());
    }

    proptest! {
        #[test]
        fn accepted_text_is_digits_and_one_point(text in "[0-9]{0,6}(\\.[0-9]{0,4})?") {
            prop_assert!(AmountText::parse(&text).is_some());
        }

        #[test]
        fn text_with_foreign_chars_is_rejected(
            head in "[0-9]{0,3}",
            bad in "[a-zA-Z ,+\\-]",
            tail in "[0-9]{0,3}",
        ) {
            let text = format!("{head}{bad}{tail}");
            prop_assert!(AmountText::parse(&text).is_none());
        }
    }
}
