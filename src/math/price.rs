//! Conversions between ticks, Q64.96 sqrt prices and human-readable prices.
//!
//! Human prices are `f64`: they only ever seed tick selection, and every
//! value that reaches call-data goes through the integer tick math.

use crate::Q96;
use crate::error::TickMathError;
use crate::math::tick_math::{
    MAX_TICK, MIN_TICK, get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, nearest_usable_tick,
};
use alloy_primitives::U256;

const TICK_BASE: f64 = 1.0001;

/// `1.0001^tick`.
#[inline]
pub fn tick_to_price(tick: i32) -> f64 {
    TICK_BASE.powi(tick)
}

/// Greatest tick whose price does not exceed `price`.
pub fn price_to_tick(price: f64) -> Result<i32, TickMathError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(TickMathError::InvalidPrice(price));
    }

    let tick = (price.ln() / TICK_BASE.ln()).floor();
    if tick < MIN_TICK as f64 || tick > MAX_TICK as f64 {
        return Err(TickMathError::TickOutOfBounds(tick.clamp(i32::MIN as f64, i32::MAX as f64) as i32));
    }
    Ok(tick as i32)
}

/// Tick for `price`, snapped to the nearest multiple of `tick_spacing`.
pub fn price_to_usable_tick(price: f64, tick_spacing: i32) -> Result<i32, TickMathError> {
    nearest_usable_tick(price_to_tick(price)?, tick_spacing)
}

/// Exact Q64.96 sqrt price of the tick containing `price`.
pub fn price_to_sqrt_price_x96(price: f64) -> Result<U256, TickMathError> {
    get_sqrt_ratio_at_tick(price_to_tick(price)?)
}

/// `(sqrt_price_x96 / 2^96)^2`.
pub fn sqrt_price_x96_to_price(sqrt_price_x96: U256) -> f64 {
    let ratio = f64::from(sqrt_price_x96) / f64::from(Q96);
    ratio * ratio
}

/// Tick of a sqrt price read back from a pool.
pub fn sqrt_price_x96_to_tick(sqrt_price_x96: U256) -> Result<i32, TickMathError> {
    get_tick_at_sqrt_ratio(sqrt_price_x96)
}
