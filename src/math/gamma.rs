use crate::error::{GammaError, TickMathError};

/// Smallest per-epoch tick movement that walks the whole auction range
/// within the available epochs, rounded up to a positive multiple of
/// `tick_spacing`.
///
/// `duration / epoch_length` is floored: a trailing partial epoch never
/// moves the price.
pub fn compute_optimal_gamma(
    start_tick: i32,
    end_tick: i32,
    duration: u64,
    epoch_length: u64,
    tick_spacing: i32,
) -> Result<i32, GammaError> {
    if tick_spacing <= 0 {
        return Err(TickMathError::InvalidTickSpacing(tick_spacing).into());
    }
    if epoch_length == 0 {
        return Err(GammaError::ZeroEpochLength);
    }

    let total_epochs = duration / epoch_length;
    if total_epochs == 0 {
        return Err(GammaError::NoEpochs {
            duration,
            epoch_length,
        });
    }

    let spacing = tick_spacing as u64;
    let tick_delta = (i64::from(end_tick) - i64::from(start_tick)).unsigned_abs();
    let per_epoch = tick_delta.div_ceil(total_epochs);
    let gamma = (per_epoch.div_ceil(spacing) * spacing).max(spacing);

    let gamma = i32::try_from(gamma).map_err(|_| GammaError::NotDivisible {
        gamma: i32::MAX,
        tick_spacing,
    })?;
    if gamma % tick_spacing != 0 {
        return Err(GammaError::NotDivisible {
            gamma,
            tick_spacing,
        });
    }

    Ok(gamma)
}
