//! Read-only catalog of selectable currencies.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::currency::Currency;
use crate::error::{CatalogError, CatalogResult};

/// Base URL for informational currency pages.
pub const REFERENCE_BASE_URL: &str = "https://www.xe.com/currency";

/// A selectable currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    /// Currency code.
    pub code: Currency,
    /// Human-readable name.
    pub name: String,
}

impl CurrencyInfo {
    /// Create a new catalog entry.
    pub fn new(code: impl Into<Currency>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Currencies served by the default rates endpoint, in selector order.
const BUILTIN: &[(&str, &str)] = &[
    ("USD", "US Dollar"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("JPY", "Japanese Yen"),
    ("AUD", "Australian Dollar"),
    ("CAD", "Canadian Dollar"),
    ("CHF", "Swiss Franc"),
    ("CNY", "Chinese Yuan Renminbi"),
    ("HKD", "Hong Kong Dollar"),
    ("NZD", "New Zealand Dollar"),
    ("SEK", "Swedish Krona"),
    ("NOK", "Norwegian Krone"),
    ("DKK", "Danish Krone"),
    ("ISK", "Icelandic Krona"),
    ("PLN", "Polish Zloty"),
    ("CZK", "Czech Koruna"),
    ("HUF", "Hungarian Forint"),
    ("RON", "Romanian Leu"),
    ("BGN", "Bulgarian Lev"),
    ("TRY", "Turkish Lira"),
    ("ILS", "Israeli Shekel"),
    ("INR", "Indian Rupee"),
    ("IDR", "Indonesian Rupiah"),
    ("KRW", "South Korean Won"),
    ("MYR", "Malaysian Ringgit"),
    ("PHP", "Philippine Peso"),
    ("SGD", "Singapore Dollar"),
    ("THB", "Thai Baht"),
    ("BRL", "Brazilian Real"),
    ("MXN", "Mexican Peso"),
    ("ZAR", "South African Rand"),
];

/// Ordered, immutable list of currencies offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyCatalog {
    entries: Vec<CurrencyInfo>,
}

impl CurrencyCatalog {
    /// Build a catalog, rejecting empty lists, blank codes and duplicates.
    pub fn new(entries: Vec<CurrencyInfo>) -> CatalogResult<Self> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.code.code().is_empty() {
                return Err(CatalogError::EmptyCode);
            }
            if !seen.insert(entry.code.clone()) {
                return Err(CatalogError::DuplicateCode(entry.code.to_string()));
            }
        }

        Ok(Self { entries })
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(code, name)| CurrencyInfo::new(*code, *name))
                .collect(),
        }
    }

    /// Parse a JSON array of `{"code": .., "name": ..}` objects.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let entries: Vec<CurrencyInfo> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// All entries in order.
    pub fn entries(&self) -> &[CurrencyInfo] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by code.
    pub fn get(&self, code: &Currency) -> Option<&CurrencyInfo> {
        self.entries.iter().find(|entry| &entry.code == code)
    }

    pub fn contains(&self, code: &Currency) -> bool {
        self.get(code).is_some()
    }

    /// Display name for `code`, or the code itself when it is not listed.
    pub fn display_name<'a>(&'a self, code: &'a Currency) -> &'a str {
        self.get(code)
            .map(|entry| entry.name.as_str())
            .unwrap_or_else(|| code.code())
    }

    /// Entries for a selector whose counterpart currently shows `excluded`.
    pub fn options_excluding(
        &self,
        excluded: &Currency,
    ) -> impl Iterator<Item = &CurrencyInfo> + '_ {
        let excluded = excluded.clone();
        self.entries.iter().filter(move |entry| entry.code != excluded)
    }

    /// Informational page for `code`.
    pub fn reference_url(&self, code: &Currency) -> String {
        reference_url(code, self.display_name(code))
    }
}

impl Default for CurrencyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `https://www.xe.com/currency/<code>-<name>/`, lowercased, whitespace runs hyphenated.
pub fn reference_url(code: &Currency, name: &str) -> String {
    let slug = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!(
        "{}/{}-{}/",
        REFERENCE_BASE_URL,
        code.code().to_lowercase(),
        slug
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = CurrencyCatalog::builtin();
        assert_eq!(catalog.len(), 31);
        assert_eq!(catalog.entries()[0].code, Currency::usd());
        assert!(catalog.contains(&Currency::eur()));
        assert!(CurrencyCatalog::new(catalog.entries().to_vec()).is_ok());
    }

    #[test]
    fn test_display_name_fallback() {
        let catalog = CurrencyCatalog::builtin();
        assert_eq!(catalog.display_name(&Currency::eur()), "Euro");

        let unknown = Currency::new("XYZ");
        assert_eq!(catalog.display_name(&unknown), "XYZ");
    }

    #[test]
    fn test_options_exclude_counterpart() {
        let catalog = CurrencyCatalog::builtin();
        let options = {
            let excluded = Currency::eur();
            catalog.options_excluding(&excluded)
        };
        let options: Vec<_> = options.collect();

        assert_eq!(options.len(), catalog.len() - 1);
        assert!(options.iter().all(|entry| entry.code != Currency::eur()));
    }

    #[test]
    fn test_reference_url() {
        let catalog = CurrencyCatalog::builtin();
        assert_eq!(
            catalog.reference_url(&Currency::usd()),
            "https://www.xe.com/currency/usd-us-dollar/"
        );
        assert_eq!(
            reference_url(&Currency::new("NZD"), "New   Zealand Dollar"),
            "https://www.xe.com/currency/nzd-new-zealand-dollar/"
        );
        assert_eq!(
            catalog.reference_url(&Currency::new("ABC")),
            "https://www.xe.com/currency/abc-abc/"
        );
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"[{"code": "usd", "name": "US Dollar"}, {"code": "EUR", "name": "Euro"}]"#;
        let catalog = CurrencyCatalog::from_json(json).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].code, Currency::usd());
    }

    #[test]
    fn test_catalog_rejects_invalid() {
        assert!(matches!(
            CurrencyCatalog::from_json("[]"),
            Err(CatalogError::Empty)
        ));

        let dup = r#"[{"code": "USD", "name": "A"}, {"code": "usd", "name": "B"}]"#;
        assert!(matches!(
            CurrencyCatalog::from_json(dup),
            Err(CatalogError::DuplicateCode(code)) if code == "USD"
        ));

        assert!(matches!(
            CurrencyCatalog::from_json("{"),
            Err(CatalogError::InvalidFormat(_))
        ));
    }
}
