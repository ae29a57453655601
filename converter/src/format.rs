//! Number formatting for display.

/// Format an amount: 2 decimals from 1 up, 4 from 0.01, 6 below, "0.00" for zero.
pub fn format_amount(value: f64) -> String {
    if value == 0.0 {
        "0.00".to_string()
    } else if value >= 1.0 {
        format!("{:.2}", value)
    } else if value >= 0.01 {
        format!("{:.4}", value)
    } else {
        format!("{:.6}", value)
    }
}

/// Format a rate: 6 decimals, scientific with 2 fraction digits below 0.001, "0.00" for zero.
pub fn format_rate(value: f64) -> String {
    if value == 0.0 {
        "0.00".to_string()
    } else if value < 0.001 {
        format!("{:.2e}", value)
    } else {
        format!("{:.6}", value)
    }
}
