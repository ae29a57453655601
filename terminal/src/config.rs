//! Terminal front-end configuration.

use std::path::PathBuf;
use std::time::Duration;

use quickfx_common::{AmountText, Currency, CurrencyCatalog, CurrencyPair};
use quickfx_fx::FxConfig;

/// Main terminal configuration.
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Rate provider configuration.
    pub fx: FxConfig,
    /// JSON catalog to use instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
    /// Initial amount text.
    pub amount: String,
    /// Initial source currency.
    pub from: Currency,
    /// Initial target currency.
    pub to: Currency,
    /// Emit logs as JSON.
    pub log_json: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            fx: FxConfig::default(),
            catalog_path: None,
            amount: AmountText::default().to_string(),
            from: Currency::usd(),
            to: Currency::eur(),
            log_json: false,
        }
    }
}

impl TerminalConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("QUICKFX_RATES_URL") {
            config.fx.endpoint = url;
        }

        if let Ok(secs) = std::env::var("QUICKFX_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.fx.request_timeout = Some(Duration::from_secs(secs));
            }
        }

        if let Ok(path) = std::env::var("QUICKFX_CATALOG") {
            config.catalog_path = Some(PathBuf::from(path));
        }

        config
    }

    /// Initial amount, checked against the amount input rules.
    pub fn initial_amount(&self) -> Result<AmountText, String> {
        AmountText::parse(&self.amount)
            .ok_or_else(|| format!("Initial amount is not a number: {:?}", self.amount))
    }

    pub fn initial_pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.from.clone(), self.to.clone())
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.fx.validate()?;
        self.initial_amount()?;

        if self.from.code().is_empty() || self.to.code().is_empty() {
            return Err("Currency codes cannot be empty".to_string());
        }

        Ok(())
    }

    /// Initial codes must be ones the selectors can offer.
    pub fn check_codes(&self, catalog: &CurrencyCatalog) -> Result<(), String> {
        for code in [&self.from, &self.to] {
            if !catalog.contains(code) {
                return Err(format!("Unknown currency: {}", code));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TerminalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_amount().unwrap().as_str(), "1.00");
        assert_eq!(config.initial_pair(), CurrencyPair::default());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = TerminalConfig::default();
        config.amount = "ten".to_string();
        assert!(config.validate().is_err());

        let mut config = TerminalConfig::default();
        config.fx.endpoint = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_initial_codes_must_be_listed() {
        let catalog = CurrencyCatalog::builtin();
        assert!(TerminalConfig::default().check_codes(&catalog).is_ok());

        let mut config = TerminalConfig::default();
        config.to = Currency::new("XAU");
        assert_eq!(
            config.check_codes(&catalog),
            Err("Unknown currency: XAU".to_string())
        );

        let mut config = TerminalConfig::default();
        config.from = Currency::new("xyz");
        assert!(config.check_codes(&catalog).is_err());
    }
}
