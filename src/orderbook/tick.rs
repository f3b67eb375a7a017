//! Price to tick-index conversion at a fixed tick size.

use super::error::OrderBookError;

/// Minimum price increment. Prices are integer multiples of this value.
pub const TICK_SIZE: f64 = 0.01;

/// Reciprocal of [`TICK_SIZE`], kept as a constant so conversions multiply
/// instead of divide.
pub const INV_TICK: f64 = 100.0;

/// Exclusive upper bound on tick indices. Prices are expected within
/// `[0, MAX_TICK * TICK_SIZE)`, which keeps the index comfortably inside
/// a `u32`.
pub const MAX_TICK: u32 = 1 << 24;

/// Convert a fractional price to its tick index, rounding to the nearest
/// tick.
///
/// # Errors
/// Returns [`OrderBookError::PriceOutOfRange`] for negative, non-finite,
/// or too-large prices. State is never touched by a rejected conversion.
pub fn price_to_tick(price: f64) -> Result<u32, OrderBookError> {
    if !price.is_finite() || price < 0.0 {
        return Err(OrderBookError::PriceOutOfRange { price });
    }
    let tick = (price * INV_TICK).round();
    if tick >= MAX_TICK as f64 {
        return Err(OrderBookError::PriceOutOfRange { price });
    }
    Ok(tick as u32)
}

/// Convert a tick index back to a fractional price.
#[must_use]
pub fn tick_to_price(tick: u32) -> f64 {
    tick as f64 * TICK_SIZE
}
