use super::validation::validate_curve_shares;
use crate::abi::{
    DopplerInitData, LockableV3InitData, MulticurveInitData, ScheduledMulticurveInitData,
    V3InitData, beneficiary_data, curve_data, to_i24, to_u24,
};
use crate::addresses::ModuleRole;
use crate::builders::{CreateMulticurveParams, CreateStaticAuctionParams, DynamicPool, ResolvedAuction};
use crate::error::EncodeError;
use alloy_primitives::{Bytes, U256};
use alloy_sol_types::SolValue;

/// V3 initializer payload; fee beneficiaries select the lockable variant.
pub(crate) fn static_init_data(
    params: &CreateStaticAuctionParams,
) -> Result<(ModuleRole, Bytes), EncodeError> {
    let pool = &params.pool;
    let fee = to_u24(pool.fee)?;
    let tick_lower = to_i24(pool.start_tick)?;
    let tick_upper = to_i24(pool.end_tick)?;

    if params.is_lockable() {
        let data = LockableV3InitData {
            fee,
            tickLower: tick_lower,
            tickUpper: tick_upper,
            numPositions: pool.num_positions,
            maxShareToBeSold: pool.max_share_to_be_sold,
            beneficiaries: beneficiary_data(&params.beneficiaries)?,
        };
        return Ok((ModuleRole::LockableV3Initializer, data.abi_encode().into()));
    }

    let data = V3InitData {
        fee,
        tickLower: tick_lower,
        tickUpper: tick_upper,
        numPositions: pool.num_positions,
        maxShareToBeSold: pool.max_share_to_be_sold,
    };
    Ok((ModuleRole::V3Initializer, data.abi_encode().into()))
}

/// Doppler hook payload for an auction running `[start, start + duration)`.
pub(crate) fn dynamic_init_data(
    pool: &DynamicPool,
    auction: &ResolvedAuction,
    starting_time: u64,
    is_token0: bool,
) -> Result<Bytes, EncodeError> {
    let ending_time = starting_time
        .checked_add(auction.duration)
        .ok_or_else(|| EncodeError::Overflow {
            value: format!("{starting_time} + {}", auction.duration),
            ty: "uint256",
        })?;

    let data = DopplerInitData {
        minimumProceeds: auction.min_proceeds,
        maximumProceeds: auction.max_proceeds,
        startingTime: U256::from(starting_time),
        endingTime: U256::from(ending_time),
        startingTick: to_i24(auction.start_tick)?,
        endingTick: to_i24(auction.end_tick)?,
        epochLength: U256::from(auction.epoch_length),
        gamma: to_i24(auction.gamma)?,
        isToken0: is_token0,
        numPDSlugs: U256::from(auction.num_pd_slugs),
        lpFee: to_u24(pool.fee)?,
        tickSpacing: to_i24(pool.tick_spacing)?,
    };
    Ok(data.abi_encode_params().into())
}

/// Multicurve initializer payload; a start time selects the scheduled one.
pub(crate) fn multicurve_init_data(
    params: &CreateMulticurveParams,
) -> Result<(ModuleRole, Bytes), EncodeError> {
    let pool = &params.pool;
    validate_curve_shares(&pool.curves)?;

    let fee = to_u24(pool.fee)?;
    let tick_spacing = to_i24(pool.tick_spacing)?;
    let curves = curve_data(&pool.curves)?;
    let beneficiaries = beneficiary_data(&pool.beneficiaries)?;

    Ok(match params.start_time {
        Some(starting_time) => {
            let data = ScheduledMulticurveInitData {
                fee,
                tickSpacing: tick_spacing,
                curves,
                beneficiaries,
                startingTime: starting_time,
            };
            (ModuleRole::ScheduledMulticurveInitializer, data.abi_encode().into())
        }
        None => {
            let data = MulticurveInitData {
                fee,
                tickSpacing: tick_spacing,
                curves,
                beneficiaries,
            };
            (ModuleRole::MulticurveInitializer, data.abi_encode().into())
        }
    })
}
