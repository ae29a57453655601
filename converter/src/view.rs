//! Render model for presentation layers.

use chrono::{DateTime, Utc};
use quickfx_common::{Currency, CurrencyCatalog, CurrencyInfo};
use serde::Serialize;

use crate::format::{format_amount, format_rate};
use crate::state::ConverterState;

pub const HEADING: &str = "Currency exchange";

pub const LOADING: &str = "Loading...";

pub const DISCLAIMER: &str = "We use the mid-market rate for our Converter. This is for \
informational purposes only. You won't receive this rate when sending money.";

/// One currency dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorView {
    pub label: &'static str,
    pub selected: Currency,
    /// Catalog entries minus the opposite selector's choice.
    pub options: Vec<CurrencyInfo>,
}

/// Outbound informational link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceLink {
    pub text: String,
    pub url: String,
}

/// Everything a presentation layer needs to draw the converter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConverterView {
    pub heading: &'static str,
    /// "1.00 USD to EUR - Convert US Dollar to Euro"
    pub title: String,
    /// Raw amount field text.
    pub amount_text: String,
    pub from: SelectorView,
    pub to: SelectorView,
    pub error: Option<String>,
    pub is_loading: bool,
    /// "1.00 US Dollar ="
    pub result_from: String,
    /// "0.90 Euro", or the loading marker.
    pub result_to: String,
    /// "1 EUR = 1.111111 USD", or the loading marker in place of the rate.
    pub inverse: String,
    pub disclaimer: &'static str,
    pub from_link: ReferenceLink,
    pub to_link: ReferenceLink,
    pub last_updated: String,
}

impl ConverterView {
    /// Build the view for `state` at time `now`.
    pub fn build(state: &ConverterState, catalog: &CurrencyCatalog, now: DateTime<Utc>) -> Self {
        let from = &state.pair.from;
        let to = &state.pair.to;
        let from_name = catalog.display_name(from);
        let to_name = catalog.display_name(to);

        let result_to = if state.is_loading() {
            LOADING.to_string()
        } else {
            format!("{} {}", format_amount(state.converted_amount()), to_name)
        };

        let inverse_value = if state.is_loading() {
            LOADING.to_string()
        } else {
            // No rate means no inverse; show zero rather than dividing by it.
            let inverse = state.inverse_rate().unwrap_or(0.0);
            format!("{} {}", format_rate(inverse), from)
        };

        Self {
            heading: HEADING,
            title: format!(
                "{} {} to {} - Convert {} to {}",
                state.amount, from, to, from_name, to_name
            ),
            amount_text: state.amount.to_string(),
            from: SelectorView {
                label: "From",
                selected: from.clone(),
                options: catalog.options_excluding(to).cloned().collect(),
            },
            to: SelectorView {
                label: "To",
                selected: to.clone(),
                options: catalog.options_excluding(from).cloned().collect(),
            },
            error: state.error.clone(),
            is_loading: state.is_loading(),
            result_from: format!(
                "{} {} =",
                format_amount(state.numeric_amount().display_value()),
                from_name
            ),
            result_to,
            inverse: format!("1 {} = {}", to, inverse_value),
            disclaimer: DISCLAIMER,
            from_link: ReferenceLink {
                text: from_name.to_string(),
                url: catalog.reference_url(from),
            },
            to_link: ReferenceLink {
                text: to_name.to_string(),
                url: catalog.reference_url(to),
            },
            last_updated: now.format("%b %d, %Y, %I:%M %p UTC").to_string(),
        }
    }

    /// Plain-text rendering.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(self.heading);
        out.push('\n');
        out.push_str(&self.title);
        out.push_str("\n\n");
        out.push_str(&format!(
            "Amount: {}   {}: {}   {}: {}\n",
            self.amount_text, self.from.label, self.from.selected, self.to.label, self.to.selected
        ));
        if let Some(error) = &self.error {
            out.push_str(&format!("! {}\n", error));
        }
        out.push('\n');
        out.push_str(&format!("{}\n{}\n", self.result_from, self.result_to));
        out.push_str(&self.inverse);
        out.push_str("\n\n");
        out.push_str(self.disclaimer);
        out.push('\n');
        out.push_str(&format!(
            "{} <{}> to {} <{}> conversion - Last updated {}\n",
            self.from_link.text,
            self.from_link.url,
            self.to_link.text,
            self.to_link.url,
            self.last_updated
        ));
        out
    }
}
