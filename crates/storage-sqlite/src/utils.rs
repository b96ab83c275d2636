//! Column conversion helpers shared by the repositories.

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use munifin_core::departments::uniform_seasonal_factors;

/// Parses a TEXT money column, accepting scientific notation as a fallback.
pub fn parse_decimal_tolerant(value: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(d) => d,
        Err(e_decimal) => match f64::from_str(value).ok().and_then(Decimal::from_f64) {
            Some(d) => d,
            None => {
                log::error!(
                    "Failed to parse {} '{}' as Decimal: {}. Using zero.",
                    field_name,
                    value,
                    e_decimal
                );
                Decimal::ZERO
            }
        },
    }
}

/// Decodes the JSON seasonal factor column, falling back to a uniform profile.
pub fn parse_seasonal_factors(value: &str) -> Vec<f64> {
    serde_json::from_str(value).unwrap_or_else(|e| {
        log::warn!("Invalid seasonal factors '{}': {}. Using uniform.", value, e);
        uniform_seasonal_factors()
    })
}
