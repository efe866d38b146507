//! Input-boundary validation for holdings.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::errors::ValidationError;
use minifolio_market_data::normalize_symbol;

/// Normalize a symbol, rejecting empty or whitespace-only input.
pub fn validate_symbol(symbol: &str) -> Result<String, ValidationError> {
    let normalized = normalize_symbol(symbol);
    if normalized.is_empty() {
        return Err(ValidationError::EmptySymbol);
    }
    Ok(normalized)
}

/// Reject zero and negative quantities.
pub fn validate_quantity(quantity: Decimal) -> Result<Decimal, ValidationError> {
    if quantity <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveQuantity(quantity.to_string()));
    }
    Ok(quantity)
}

/// Parse a user-typed quantity.
///
/// Accepts plain and scientific notation ("1.5", "2e-3"). Rejects text that
/// is not a number, NaN, infinities and anything not strictly positive.
pub fn parse_quantity(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidInput(
            "Quantity must not be empty".to_string(),
        ));
    }

    let lowered = trimmed.to_ascii_lowercase();
    if lowered.contains("nan") || lowered.contains("inf") {
        return Err(ValidationError::NonFiniteQuantity(trimmed.to_string()));
    }

    let quantity = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::InvalidInput(format!("'{}' is not a number", trimmed)))?;

    validate_quantity(quantity)
}
