//! Campaign and offer validation rules.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// A write was rejected before reaching storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("campaign name must not be empty")]
    EmptyName,

    #[error("sale window must end after it starts")]
    InvertedWindow,

    #[error("prices must be greater than zero")]
    ZeroPrice,

    #[error("sale price {sale_price} must be below the original price {original_price}")]
    SalePriceNotBelowOriginal { sale_price: u64, original_price: u64 },

    #[error("stock cap {stock_cap} is below the {sold_count} units already sold")]
    CapBelowSold { stock_cap: u64, sold_count: u64 },

    #[error("quantity must be at least one")]
    ZeroQuantity,
}

/// Trim a campaign name, rejecting one that is blank.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] for blank names.
pub fn campaign_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    Ok(name.to_string())
}

/// Percentage taken off `original_price`, rounded half away from zero to two
/// decimal places.
///
/// # Errors
///
/// Returns an error when either price is zero or the sale price is not
/// strictly below the original.
pub fn discount_percentage(
    original_price: u64,
    sale_price: u64,
) -> Result<Decimal, ValidationError> {
    if original_price == 0 || sale_price == 0 {
        return Err(ValidationError::ZeroPrice);
    }

    if sale_price >= original_price {
        return Err(ValidationError::SalePriceNotBelowOriginal {
            sale_price,
            original_price,
        });
    }

    let saved = Decimal::from(original_price - sale_price);
    let percentage = saved * Decimal::ONE_HUNDRED / Decimal::from(original_price);

    Ok(percentage.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// A stock cap may never drop below what has already been sold.
///
/// # Errors
///
/// Returns [`ValidationError::CapBelowSold`] when it would.
pub fn stock_cap(stock_cap: Option<u64>, sold_count: u64) -> Result<Option<u64>, ValidationError> {
    match stock_cap {
        Some(cap) if cap < sold_count => Err(ValidationError::CapBelowSold {
            stock_cap: cap,
            sold_count,
        }),
        cap => Ok(cap),
    }
}
