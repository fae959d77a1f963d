//! Quantity parsing
//!
//! Turns user input such as "50", "50g", "330 ml" or "2 oz" into an amount
//! in grams or milliliters.

use serde::Serialize;
use thiserror::Error;

use super::units::{categorize_unit, grams_per_unit, ml_per_unit, BaseUnitType, UnitCategory};

/// Quantity parse errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantityError {
    #[error("Quantity is empty")]
    Empty,

    #[error("Quantity '{0}' is not a number")]
    NotANumber(String),

    #[error("Quantity '{0}' must not be negative")]
    Negative(String),

    #[error("Unrecognized unit '{unit}' in quantity '{input}'")]
    UnknownUnit { input: String, unit: String },
}

/// A consumed amount, normalized to grams or milliliters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quantity {
    pub amount: f64,
    pub unit: BaseUnitType,
}

impl Quantity {
    /// Multiplier to apply to per-100 nutrient values
    pub fn per_100_multiplier(&self) -> f64 {
        self.amount / 100.0
    }
}

/// Parse a quantity string
///
/// The leading number is the amount; an optional unit suffix is converted
/// to grams (weight) or milliliters (volume). A bare number is used as-is.
pub fn parse_quantity(input: &str) -> Result<Quantity, QuantityError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(QuantityError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(QuantityError::Negative(trimmed.to_string()));
    }

    let (number, unit) = trimmed.split_at(numeric_prefix_len(trimmed));

    let value: f64 = number
        .parse()
        .map_err(|_| QuantityError::NotANumber(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(QuantityError::NotANumber(trimmed.to_string()));
    }

    let unit = unit.trim();
    if unit.is_empty() {
        return Ok(Quantity {
            amount: value,
            unit: BaseUnitType::Unspecified,
        });
    }

    let quantity = match categorize_unit(unit) {
        UnitCategory::Weight => Quantity {
            amount: value * grams_per_unit(unit).unwrap_or(1.0),
            unit: BaseUnitType::Weight,
        },
        UnitCategory::Volume => Quantity {
            amount: value * ml_per_unit(unit).unwrap_or(1.0),
            unit: BaseUnitType::Volume,
        },
        UnitCategory::Unknown => {
            return Err(QuantityError::UnknownUnit {
                input: trimmed.to_string(),
                unit: unit.to_string(),
            })
        }
    };

    // Large amounts can overflow once converted
    if !quantity.amount.is_finite() {
        return Err(QuantityError::NotANumber(trimmed.to_string()));
    }
    Ok(quantity)
}

/// Length of the leading decimal number in `s`, exponent included
///
/// An `e` only counts as an exponent when digits follow it, so "2 each"
/// and "5e" still leave the letters for the unit.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = if bytes.first() == Some(&b'+') { 1 } else { 0 };
    end = digits_from(end);
    if bytes.get(end) == Some(&b'.') {
        end = digits_from(end + 1);
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    end
}

/// Build a quantity from an already-numeric value
pub fn quantity_from_number(value: f64) -> Result<Quantity, QuantityError> {
    if !value.is_finite() {
        return Err(QuantityError::NotANumber(value.to_string()));
    }
    if value < 0.0 {
        return Err(QuantityError::Negative(value.to_string()));
    }
    Ok(Quantity {
        amount: value,
        unit: BaseUnitType::Unspecified,
    })
}
