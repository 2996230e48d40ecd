use super::{CommonFields, LaunchConfig, Section, common_setters};
use crate::constants::{DEFAULT_MULTICURVE_FEE, FeeTier, MarketCapPreset, WAD};
use crate::error::BuildError;
use crate::math::tick_math::{MAX_TICK, MIN_TICK, max_usable_tick, min_usable_tick};
use crate::miner::MiningResult;
use crate::types::{BeneficiaryShare, Curve, check_aligned, check_pool_key, sort_beneficiaries};
use alloy_primitives::U256;
use std::time::{SystemTime, UNIX_EPOCH};

/// Uniswap V4 pool seeded with several liquidity curves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MulticurvePool {
    pub fee: u32,
    pub tick_spacing: i32,
    pub curves: Vec<Curve>,
    /// Sorted by ascending address.
    pub beneficiaries: Vec<BeneficiaryShare>,
}

impl MulticurvePool {
    pub fn new(fee: u32, tick_spacing: i32, curves: Vec<Curve>) -> Self {
        Self {
            fee,
            tick_spacing,
            curves,
            beneficiaries: Vec::new(),
        }
    }

    pub fn beneficiaries(mut self, beneficiaries: Vec<BeneficiaryShare>) -> Self {
        self.beneficiaries = sort_beneficiaries(beneficiaries);
        self
    }

    pub fn total_shares(&self) -> U256 {
        sum_shares(&self.curves)
    }

    fn validate(&self) -> Result<(), BuildError> {
        check_pool_key(self.fee, self.tick_spacing)?;
        if self.curves.is_empty() {
            return Err(BuildError::InvalidPool("at least one curve is required".into()));
        }
        for curve in &self.curves {
            check_curve(curve, self.tick_spacing)?;
        }
        Ok(())
    }
}

fn check_curve(curve: &Curve, tick_spacing: i32) -> Result<(), BuildError> {
    if curve.tick_lower >= curve.tick_upper {
        return Err(BuildError::InvalidTickRange {
            start: curve.tick_lower,
            end: curve.tick_upper,
        });
    }
    if curve.tick_lower < MIN_TICK || curve.tick_upper > MAX_TICK {
        return Err(BuildError::InvalidPool(format!(
            "curve [{}, {}] leaves the tick domain",
            curve.tick_lower, curve.tick_upper
        )));
    }
    check_aligned(curve.tick_lower, tick_spacing)?;
    check_aligned(curve.tick_upper, tick_spacing)?;
    if curve.num_positions == 0 {
        return Err(BuildError::InvalidPool("curve needs at least one position".into()));
    }
    Ok(())
}

fn sum_shares(curves: &[Curve]) -> U256 {
    curves.iter().fold(U256::ZERO, |acc, c| acc.saturating_add(c.shares))
}

/// Replacement values for one preset row; unset fields keep the table value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresetOverride {
    pub tick_lower: Option<i32>,
    pub tick_upper: Option<i32>,
    pub num_positions: Option<u16>,
    pub shares: Option<U256>,
}

impl PresetOverride {
    pub fn shares(shares: U256) -> Self {
        Self {
            shares: Some(shares),
            ..Self::default()
        }
    }
}

/// Selection of market-cap presets to seed a multicurve pool with.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketCapPresets {
    pub fee: FeeTier,
    /// `None` selects every preset.
    pub presets: Option<Vec<MarketCapPreset>>,
    pub overrides: Vec<(MarketCapPreset, PresetOverride)>,
    pub beneficiaries: Vec<BeneficiaryShare>,
}

impl Default for MarketCapPresets {
    fn default() -> Self {
        Self {
            fee: FeeTier::from(DEFAULT_MULTICURVE_FEE),
            presets: None,
            overrides: Vec::new(),
            beneficiaries: Vec::new(),
        }
    }
}

impl MarketCapPresets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fee(mut self, fee: FeeTier) -> Self {
        self.fee = fee;
        self
    }

    pub fn presets(mut self, presets: Vec<MarketCapPreset>) -> Self {
        self.presets = Some(presets);
        self
    }

    pub fn override_preset(mut self, preset: MarketCapPreset, with: PresetOverride) -> Self {
        self.overrides.push((preset, with));
        self
    }

    pub fn beneficiaries(mut self, beneficiaries: Vec<BeneficiaryShare>) -> Self {
        self.beneficiaries = beneficiaries;
        self
    }
}

/// Resolves presets against the table and appends a filler curve holding
/// whatever share of the supply the presets leave unallocated, so the
/// result always sums to exactly 1e18.
pub fn market_cap_preset_curves(
    fee: FeeTier,
    presets: &[MarketCapPreset],
    overrides: &[(MarketCapPreset, PresetOverride)],
) -> Result<Vec<Curve>, BuildError> {
    let tick_spacing = fee.tick_spacing();
    check_pool_key(fee.fee(), tick_spacing)?;

    let mut selected: Vec<MarketCapPreset> = Vec::with_capacity(presets.len());
    for preset in presets {
        if !selected.contains(preset) {
            selected.push(*preset);
        }
    }

    let mut curves = Vec::with_capacity(selected.len() + 1);
    for preset in selected {
        let with = overrides
            .iter()
            .rev()
            .find(|(p, _)| *p == preset)
            .map(|(_, o)| *o)
            .unwrap_or_default();
        let curve = Curve {
            tick_lower: with.tick_lower.unwrap_or(preset.tick_lower()),
            tick_upper: with.tick_upper.unwrap_or(preset.tick_upper()),
            num_positions: with.num_positions.unwrap_or(preset.num_positions()),
            shares: with.shares.unwrap_or(preset.shares()),
        };
        if curve.shares.is_zero() {
            return Err(BuildError::Normalization(format!(
                "preset {preset} must have positive shares"
            )));
        }
        check_curve(&curve, tick_spacing)?;
        curves.push(curve);
    }

    let allocated = sum_shares(&curves);
    if allocated > WAD {
        return Err(BuildError::Normalization(format!(
            "preset shares sum to {allocated}, above 1e18"
        )));
    }

    if allocated < WAD {
        let mut filler = filler_curve(curves.last(), tick_spacing)?;
        filler.shares = WAD - allocated;
        curves.push(filler);
    }

    let total = sum_shares(&curves);
    if total != WAD {
        return Err(BuildError::Normalization(format!(
            "curve shares sum to {total} after normalization"
        )));
    }
    Ok(curves)
}

/// Geometry of the curve placed right above the last preset.
fn filler_curve(last: Option<&Curve>, tick_spacing: i32) -> Result<Curve, BuildError> {
    let min_usable = min_usable_tick(tick_spacing)?;
    let max_usable = max_usable_tick(tick_spacing)?;

    let mut tick_lower = last.map_or(0, |c| c.tick_upper).max(min_usable);
    let num_positions = last.map_or(1, |c| c.num_positions).max(1);

    let span = i64::from(num_positions) * i64::from(tick_spacing);
    let mut tick_upper = match i32::try_from(i64::from(tick_lower) + span) {
        Ok(upper) if upper <= max_usable => upper,
        _ => {
            let upper = max_usable - tick_spacing;
            tick_lower = tick_lower.min(upper - tick_spacing);
            upper
        }
    };
    if tick_upper <= tick_lower {
        tick_lower = max_usable - tick_spacing;
        tick_upper = max_usable;
    }
    if tick_lower < min_usable || tick_upper > max_usable {
        return Err(BuildError::Normalization(format!(
            "filler curve [{tick_lower}, {tick_upper}] leaves the usable range"
        )));
    }

    Ok(Curve {
        tick_lower,
        tick_upper,
        num_positions,
        shares: U256::ZERO,
    })
}

/// Start time accepted by [`MulticurveBuilder::with_schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleTime {
    At(SystemTime),
    Seconds(U256),
    SignedSeconds(i64),
}

impl ScheduleTime {
    /// Unix seconds, which the initializer stores as `uint32`.
    pub fn resolve(self) -> Result<u32, BuildError> {
        let seconds = match self {
            Self::At(time) => {
                let since = time.duration_since(UNIX_EPOCH).map_err(|_| {
                    BuildError::InvalidSchedule("start time is before the unix epoch".into())
                })?;
                U256::from(since.as_secs())
            }
            Self::Seconds(seconds) => seconds,
            Self::SignedSeconds(seconds) => {
                if seconds < 0 {
                    return Err(BuildError::InvalidSchedule(format!(
                        "start time {seconds} is negative"
                    )));
                }
                U256::from(seconds as u64)
            }
        };
        u32::try_from(seconds).map_err(|_| {
            BuildError::InvalidSchedule(format!("start time {seconds} does not fit in uint32"))
        })
    }
}

impl From<SystemTime> for ScheduleTime {
    fn from(time: SystemTime) -> Self {
        Self::At(time)
    }
}

impl From<U256> for ScheduleTime {
    fn from(seconds: U256) -> Self {
        Self::Seconds(seconds)
    }
}

impl From<u64> for ScheduleTime {
    fn from(seconds: u64) -> Self {
        Self::Seconds(U256::from(seconds))
    }
}

impl From<u32> for ScheduleTime {
    fn from(seconds: u32) -> Self {
        Self::Seconds(U256::from(seconds))
    }
}

impl From<i64> for ScheduleTime {
    fn from(seconds: i64) -> Self {
        Self::SignedSeconds(seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMulticurveParams {
    pub config: LaunchConfig,
    pub pool: MulticurvePool,
    /// Delayed start; selects the scheduled initializer.
    pub start_time: Option<u32>,
}

impl CreateMulticurveParams {
    pub fn is_lockable(&self) -> bool {
        !self.pool.beneficiaries.is_empty()
    }

    pub fn is_scheduled(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn with_mined(mut self, mined: &MiningResult) -> Self {
        self.config = self.config.with_mined(mined);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct MulticurveBuilder {
    common: CommonFields,
    pool: Option<MulticurvePool>,
    start_time: Option<u32>,
}

common_setters!(MulticurveBuilder);

impl MulticurveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool_config(mut self, pool: MulticurvePool) -> Self {
        let beneficiaries = sort_beneficiaries(pool.beneficiaries);
        self.pool = Some(MulticurvePool {
            beneficiaries,
            ..pool
        });
        self
    }

    /// Explicit curves on the default fee tier.
    pub fn with_multicurve_auction(
        self,
        curves: Vec<Curve>,
        beneficiaries: Vec<BeneficiaryShare>,
    ) -> Self {
        let fee = FeeTier::from(DEFAULT_MULTICURVE_FEE);
        self.pool_config(
            MulticurvePool::new(fee.fee(), fee.tick_spacing(), curves).beneficiaries(beneficiaries),
        )
    }

    pub fn with_market_cap_presets(self, presets: MarketCapPresets) -> Result<Self, BuildError> {
        let selected = presets
            .presets
            .unwrap_or_else(|| MarketCapPreset::ALL.to_vec());
        let curves = market_cap_preset_curves(presets.fee, &selected, &presets.overrides)?;
        Ok(self.pool_config(
            MulticurvePool::new(presets.fee.fee(), presets.fee.tick_spacing(), curves)
                .beneficiaries(presets.beneficiaries),
        ))
    }

    pub fn with_schedule(mut self, start: impl Into<ScheduleTime>) -> Result<Self, BuildError> {
        self.start_time = Some(start.into().resolve()?);
        Ok(self)
    }

    pub fn build(&self) -> Result<CreateMulticurveParams, BuildError> {
        let config = self.common.freeze(self.pool.is_none(), false)?;
        let pool = self
            .pool
            .clone()
            .ok_or(BuildError::Missing(vec![Section::Pool]))?;
        pool.validate()?;

        Ok(CreateMulticurveParams {
            config,
            pool,
            start_time: self.start_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use crate::constants::DEFAULT_MULTICURVE_UPPER_TICKS;
    use crate::math::tick_math::MAX_TICK_SPACING;
    use alloy_primitives::{Address, address};
    use proptest::prelude::*;
    use std::time::Duration;

    fn complete() -> MulticurveBuilder {
        MulticurveBuilder::new()
            .token(fixtures::token())
            .sale(fixtures::sale())
            .governance(fixtures::governance())
            .migration(fixtures::migration())
            .user_address(fixtures::user())
    }

    fn wad_fraction(per_mille: u64) -> U256 {
        WAD * U256::from(per_mille) / U256::from(1000u64)
    }

    #[test]
    fn default_presets_get_a_filler_curve() {
        let params = complete()
            .with_market_cap_presets(MarketCapPresets::new())
            .unwrap()
            .build()
            .unwrap();
        let curves = &params.pool.curves;
        assert_eq!(curves.len(), 4);
        assert_eq!(params.pool.fee, 500);
        assert_eq!(params.pool.tick_spacing, 10);

        let filler = curves[3];
        assert_eq!(filler.shares, U256::from(625_000_000_000_000_000u64));
        assert_eq!(filler.tick_lower, DEFAULT_MULTICURVE_UPPER_TICKS[2]);
        assert_eq!(filler.tick_upper, -175_200 + 11 * 10);
        assert_eq!(filler.num_positions, 11);
        assert_eq!(params.pool.total_shares(), WAD);
    }

    #[test]
    fn overridden_single_preset_is_split_in_half() {
        let half = WAD / U256::from(2u8);
        let curves = market_cap_preset_curves(
            FeeTier::Low,
            &[MarketCapPreset::High],
            &[(MarketCapPreset::High, PresetOverride::shares(half))],
        )
        .unwrap();
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].shares, half);
        assert_eq!(curves[1].shares, half);
        assert_eq!(curves[1].tick_lower, curves[0].tick_upper);
        assert_eq!(
            curves[1].tick_upper,
            curves[0].tick_upper + i32::from(curves[0].num_positions) * 10
        );
    }

    #[test]
    fn presets_filling_the_whole_supply_need_no_filler() {
        let curves = market_cap_preset_curves(
            FeeTier::Low,
            &[MarketCapPreset::Low, MarketCapPreset::Medium],
            &[
                (MarketCapPreset::Low, PresetOverride::shares(wad_fraction(400))),
                (MarketCapPreset::Medium, PresetOverride::shares(wad_fraction(600))),
            ],
        )
        .unwrap();
        assert_eq!(curves.len(), 2);
    }

    #[test]
    fn presets_are_deduplicated_in_order() {
        let curves = market_cap_preset_curves(
            FeeTier::Low,
            &[MarketCapPreset::Medium, MarketCapPreset::Low, MarketCapPreset::Medium],
            &[],
        )
        .unwrap();
        assert_eq!(curves.len(), 3);
        assert_eq!(curves[0].tick_lower, MarketCapPreset::Medium.tick_lower());
        assert_eq!(curves[1].tick_lower, MarketCapPreset::Low.tick_lower());
        // filler follows the last selected preset, not the highest one
        assert_eq!(curves[2].tick_lower, MarketCapPreset::Low.tick_upper());
    }

    #[test]
    fn no_presets_yields_a_single_full_curve_at_zero() {
        let curves = market_cap_preset_curves(FeeTier::Medium, &[], &[]).unwrap();
        assert_eq!(
            curves,
            vec![Curve {
                tick_lower: 0,
                tick_upper: 60,
                num_positions: 1,
                shares: WAD
            }]
        );
    }

    #[test]
    fn share_violations_are_normalization_failures() {
        let err = market_cap_preset_curves(
            FeeTier::Low,
            &[MarketCapPreset::Low],
            &[(MarketCapPreset::Low, PresetOverride::shares(U256::ZERO))],
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::Normalization(_)));

        let err = market_cap_preset_curves(
            FeeTier::Low,
            &[MarketCapPreset::Low, MarketCapPreset::High],
            &[
                (MarketCapPreset::Low, PresetOverride::shares(wad_fraction(700))),
                (MarketCapPreset::High, PresetOverride::shares(wad_fraction(400))),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::Normalization(_)));
    }

    #[test]
    fn filler_is_clamped_below_the_usable_maximum() {
        let max = max_usable_tick(10).unwrap();
        let last = Curve {
            tick_lower: max - 200,
            tick_upper: max - 20,
            num_positions: 11,
            shares: WAD,
        };
        let filler = filler_curve(Some(&last), 10).unwrap();
        assert_eq!(filler.tick_upper, max - 10);
        assert_eq!(filler.tick_lower, max - 20);

        let at_top = Curve {
            tick_lower: max - 20,
            tick_upper: max,
            num_positions: 2,
            shares: WAD,
        };
        let filler = filler_curve(Some(&at_top), 10).unwrap();
        assert_eq!((filler.tick_lower, filler.tick_upper), (max - 20, max - 10));
        assert!(filler.tick_lower < filler.tick_upper);
    }

    #[test]
    fn beneficiaries_are_sorted_at_configuration_time() {
        let addr1 = address!("0x1000000000000000000000000000000000000000");
        let addr2 = address!("0x2000000000000000000000000000000000000000");
        let addr3 = address!("0x3000000000000000000000000000000000000000");
        let third = WAD / U256::from(3u8);
        let params = complete()
            .with_multicurve_auction(
                vec![Curve {
                    tick_lower: -1000,
                    tick_upper: 1000,
                    num_positions: 5,
                    shares: WAD,
                }],
                vec![
                    BeneficiaryShare::new(addr2, third),
                    BeneficiaryShare::new(addr1, third),
                    BeneficiaryShare::new(addr3, WAD - third - third),
                ],
            )
            .build()
            .unwrap();
        let order: Vec<Address> = params.pool.beneficiaries.iter().map(|b| b.beneficiary).collect();
        assert_eq!(order, vec![addr1, addr2, addr3]);
        assert!(params.is_lockable());
    }

    #[test]
    fn schedule_accepts_times_and_rejects_overflow() {
        let at = UNIX_EPOCH + Duration::from_secs(1_900_000_000);
        let params = complete()
            .with_market_cap_presets(MarketCapPresets::new())
            .unwrap()
            .with_schedule(at)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(params.start_time, Some(1_900_000_000));
        assert!(params.is_scheduled());

        assert_eq!(ScheduleTime::from(u64::from(u32::MAX)).resolve(), Ok(u32::MAX));
        assert!(matches!(
            complete().with_schedule(u64::from(u32::MAX) + 1),
            Err(BuildError::InvalidSchedule(_))
        ));
        assert!(matches!(
            complete().with_schedule(-1i64),
            Err(BuildError::InvalidSchedule(_))
        ));
        assert!(matches!(
            ScheduleTime::from(U256::MAX).resolve(),
            Err(BuildError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn custom_fee_tiers_are_bounded() {
        let err = market_cap_preset_curves(FeeTier::Custom(2_000_000), &[], &[]).unwrap_err();
        assert!(matches!(err, BuildError::InvalidPool(_)));

        // fee 1e6 derives a spacing of 20_000, still a valid pool key
        let curves = market_cap_preset_curves(FeeTier::Custom(1_000_000), &[], &[]).unwrap();
        assert_eq!(curves.len(), 1);
        assert_eq!((curves[0].tick_lower, curves[0].tick_upper), (0, 20_000));

        let err = complete()
            .pool_config(MulticurvePool::new(
                3000,
                40_000,
                vec![Curve {
                    tick_lower: 0,
                    tick_upper: 40_000,
                    num_positions: 1,
                    shares: WAD,
                }],
            ))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidPool(_)));
    }

    #[test]
    fn filler_stays_in_the_usable_range_for_wide_spacings() {
        let spacing = MAX_TICK_SPACING;
        let (min, max) = (min_usable_tick(spacing).unwrap(), max_usable_tick(spacing).unwrap());
        for last in [
            Curve {
                tick_lower: max - 2 * spacing,
                tick_upper: max,
                num_positions: 3,
                shares: WAD,
            },
            Curve {
                tick_lower: min,
                tick_upper: min + spacing,
                num_positions: u16::MAX,
                shares: WAD,
            },
        ] {
            let filler = filler_curve(Some(&last), spacing).unwrap();
            assert!(filler.tick_lower >= min && filler.tick_upper <= max);
            assert!(filler.tick_lower < filler.tick_upper);
            assert_eq!(filler.tick_lower % spacing, 0);
        }
        assert!(matches!(
            filler_curve(None, spacing + 1),
            Err(BuildError::TickMath(_))
        ));
    }

    #[test]
    fn explicit_curves_are_checked_at_build() {
        let err = complete()
            .with_multicurve_auction(
                vec![Curve {
                    tick_lower: -1005,
                    tick_upper: 1000,
                    num_positions: 5,
                    shares: WAD,
                }],
                vec![],
            )
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::UnalignedTick {
                tick: -1005,
                tick_spacing: 10
            }
        );
        assert!(matches!(
            complete().with_multicurve_auction(vec![], vec![]).build(),
            Err(BuildError::InvalidPool(_))
        ));
    }

    fn preset_strategy() -> impl Strategy<Value = Vec<MarketCapPreset>> {
        prop::collection::vec(
            prop::sample::select(MarketCapPreset::ALL.to_vec()),
            0..6,
        )
    }

    proptest! {
        #[test]
        fn preset_shares_always_sum_to_wad(
            presets in preset_strategy(),
            tier in prop::sample::select(vec![FeeTier::Lowest, FeeTier::Low, FeeTier::Medium, FeeTier::High]),
            overrides in prop::collection::vec(
                (prop::sample::select(MarketCapPreset::ALL.to_vec()), 1u64..=333),
                0..4,
            ),
        ) {
            let overrides: Vec<_> = overrides
                .into_iter()
                .map(|(p, per_mille)| (p, PresetOverride::shares(wad_fraction(per_mille))))
                .collect();
            let curves = market_cap_preset_curves(tier, &presets, &overrides).unwrap();
            prop_assert_eq!(sum_shares(&curves), WAD);
            for curve in &curves {
                prop_assert!(curve.tick_lower < curve.tick_upper);
                prop_assert!(!curve.shares.is_zero());
            }
        }

        #[test]
        fn beneficiaries_always_come_out_sorted(
            bytes in prop::collection::vec(any::<[u8; 20]>(), 1..8),
        ) {
            let shares = bytes
                .iter()
                .map(|b| BeneficiaryShare::new(Address::from(*b), U256::ONE))
                .collect();
            let pool = MulticurvePool::new(500, 10, vec![]).beneficiaries(shares);
            for pair in pool.beneficiaries.windows(2) {
                prop_assert!(pair[0].beneficiary <= pair[1].beneficiary);
            }
        }
    }
}
