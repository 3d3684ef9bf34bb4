//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;

use boutique_core::round_for_display;

/// Formats an amount for display, rounded to whole currency units.
///
/// Stored and computed amounts keep full precision; this filter is the
/// rounding boundary. Each amount is rounded on its own, so rendered
/// components may not add up to the rendered total. Values that are not
/// decimals are rendered unchanged.
///
/// Usage in templates: `{{ cart.breakdown.total|money }}`
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_money(&value.to_string()))
}

/// Pluralizes "item" for a count.
///
/// Usage in templates: `{{ count|items }}`
#[askama::filter_fn]
pub fn items(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    let noun = if raw == "1" { "item" } else { "items" };
    Ok(format!("{raw} {noun}"))
}

fn format_money(raw: &str) -> String {
    Decimal::from_str(raw).map_or_else(
        |_| raw.to_string(),
        |amount| round_for_display(amount).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_rounds_half_away_from_zero() {
        assert_eq!(format_money("471.5"), "472");
        assert_eq!(format_money("59.9994"), "60");
        assert_eq!(format_money("72.00"), "72");
        assert_eq!(format_money("0"), "0");
    }

    #[test]
    fn test_each_amount_rounds_independently() {
        let b = boutique_core::pricing::compute_breakdown(Decimal::new(14, 1), 1);
        let shown: Vec<String> = [b.subtotal, b.shipping_cost, b.tax, b.total]
            .iter()
            .map(|amount| format_money(&amount.to_string()))
            .collect();
        // 1.4 + 300 + 54.252 = 355.652 exactly.
        assert_eq!(shown, ["1", "300", "54", "356"]);
        assert_eq!(b.total, b.subtotal + b.shipping_cost + b.tax);
    }

    #[test]
    fn test_format_money_passes_through_non_numbers() {
        assert_eq!(format_money("n/a"), "n/a");
    }
}
