use super::{CommonFields, LaunchConfig, common_setters};
use crate::constants::{
    DEFAULT_V3_FEE, DEFAULT_V3_MAX_SHARE_TO_BE_SOLD, DEFAULT_V3_NUM_POSITIONS, FeeTier, WAD,
};
use crate::error::BuildError;
use crate::math::price::price_to_usable_tick;
use crate::miner::MiningResult;
use crate::types::{BeneficiaryShare, TickRange, check_pool_key, sort_beneficiaries};
use alloy_primitives::U256;

/// Uniswap V3 bonding curve of a static auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticPool {
    pub start_tick: i32,
    pub end_tick: i32,
    pub fee: u32,
    pub num_positions: u16,
    /// WAD-scaled cap on the share of the sale sold through the curve.
    pub max_share_to_be_sold: U256,
}

impl StaticPool {
    pub fn new(start_tick: i32, end_tick: i32) -> Self {
        Self {
            start_tick,
            end_tick,
            fee: DEFAULT_V3_FEE,
            num_positions: DEFAULT_V3_NUM_POSITIONS,
            max_share_to_be_sold: DEFAULT_V3_MAX_SHARE_TO_BE_SOLD,
        }
    }

    /// Ticks of a price range, snapped to the spacing of `fee`'s tier.
    pub fn from_price_range(start_price: f64, end_price: f64, fee: u32) -> Result<Self, BuildError> {
        let tick_spacing = FeeTier::from(fee).tick_spacing();
        let a = price_to_usable_tick(start_price, tick_spacing)?;
        let b = price_to_usable_tick(end_price, tick_spacing)?;
        let range = TickRange::new(a.min(b), a.max(b))?;
        Ok(Self::new(range.start_tick, range.end_tick).fee(fee))
    }

    pub fn fee(mut self, fee: u32) -> Self {
        self.fee = fee;
        self
    }

    pub fn num_positions(mut self, num_positions: u16) -> Self {
        self.num_positions = num_positions;
        self
    }

    pub fn max_share_to_be_sold(mut self, share: U256) -> Self {
        self.max_share_to_be_sold = share;
        self
    }

    #[inline]
    pub fn tick_spacing(&self) -> i32 {
        FeeTier::from(self.fee).tick_spacing()
    }

    fn validate(&self) -> Result<(), BuildError> {
        check_pool_key(self.fee, self.tick_spacing())?;
        let range = TickRange::new(self.start_tick, self.end_tick)?;
        range.check_alignment(self.tick_spacing())?;
        if self.num_positions == 0 {
            return Err(BuildError::InvalidPool("number of positions must be positive".into()));
        }
        if self.max_share_to_be_sold.is_zero() || self.max_share_to_be_sold > WAD {
            return Err(BuildError::InvalidPool(format!(
                "max share to be sold {} must be in (0, 1e18]",
                self.max_share_to_be_sold
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStaticAuctionParams {
    pub config: LaunchConfig,
    pub pool: StaticPool,
    /// Fee beneficiaries; non-empty routes through the lockable initializer.
    pub beneficiaries: Vec<BeneficiaryShare>,
}

impl CreateStaticAuctionParams {
    pub fn is_lockable(&self) -> bool {
        !self.beneficiaries.is_empty()
    }

    pub fn with_mined(mut self, mined: &MiningResult) -> Self {
        self.config = self.config.with_mined(mined);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticAuctionBuilder {
    common: CommonFields,
    pool: Option<StaticPool>,
    beneficiaries: Vec<BeneficiaryShare>,
}

common_setters!(StaticAuctionBuilder);

impl StaticAuctionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds are checked against the fee tier's spacing at build time.
    pub fn pool_by_ticks(mut self, pool: StaticPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn pool_by_price_range(
        mut self,
        start_price: f64,
        end_price: f64,
        fee: u32,
    ) -> Result<Self, BuildError> {
        self.pool = Some(StaticPool::from_price_range(start_price, end_price, fee)?);
        Ok(self)
    }

    /// Locks pool fees to `beneficiaries` instead of migrating liquidity.
    pub fn with_beneficiaries(mut self, beneficiaries: Vec<BeneficiaryShare>) -> Self {
        self.beneficiaries = sort_beneficiaries(beneficiaries);
        self
    }

    pub fn build(&self) -> Result<CreateStaticAuctionParams, BuildError> {
        let config = self.common.freeze(self.pool.is_none(), false)?;
        let pool = self.pool.ok_or(BuildError::Missing(vec![super::Section::Pool]))?;
        pool.validate()?;

        Ok(CreateStaticAuctionParams {
            config,
            pool,
            beneficiaries: self.beneficiaries.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Section, fixtures};
    use super::*;
    use crate::types::VestingConfig;
    use alloy_primitives::Address;

    fn complete() -> StaticAuctionBuilder {
        StaticAuctionBuilder::new()
            .token(fixtures::token())
            .sale(fixtures::sale())
            .governance(fixtures::governance())
            .migration(fixtures::migration())
            .user_address(fixtures::user())
    }

    #[test]
    fn build_reports_all_missing_sections() {
        let err = StaticAuctionBuilder::new()
            .token(fixtures::token())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::Missing(vec![
                Section::Sale,
                Section::Pool,
                Section::Migration,
                Section::Governance,
                Section::UserAddress
            ])
        );
    }

    #[test]
    fn pool_by_ticks_applies_defaults() {
        let params = complete()
            .pool_by_ticks(StaticPool::new(-276_400, -200_000))
            .build()
            .unwrap();
        assert_eq!(params.pool.fee, 10_000);
        assert_eq!(params.pool.tick_spacing(), 200);
        assert_eq!(params.pool.num_positions, 15);
        assert_eq!(params.pool.max_share_to_be_sold, DEFAULT_V3_MAX_SHARE_TO_BE_SOLD);
        assert!(!params.is_lockable());
    }

    #[test]
    fn unaligned_ticks_fail_at_build() {
        let err = complete()
            .pool_by_ticks(StaticPool::new(-276_400, -200_010))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::UnalignedTick {
                tick: -200_010,
                tick_spacing: 200
            }
        );
    }

    #[test]
    fn price_range_derives_sorted_spaced_ticks() {
        let params = complete()
            .pool_by_price_range(0.0001, 0.01, 3000)
            .unwrap()
            .build()
            .unwrap();
        let pool = params.pool;
        assert!(pool.start_tick < pool.end_tick);
        assert_eq!(pool.start_tick % 60, 0);
        assert_eq!(pool.end_tick % 60, 0);
        // 1.0001^-92100 ~= 1e-4, 1.0001^-46080 ~= 1e-2
        assert!((pool.start_tick + 92_100).abs() <= 60);
        assert!((pool.end_tick + 46_080).abs() <= 60);

        let reversed = StaticPool::from_price_range(0.01, 0.0001, 3000).unwrap();
        assert_eq!(reversed, pool);
    }

    #[test]
    fn degenerate_price_range_is_rejected() {
        assert!(matches!(
            StaticPool::from_price_range(1.0, 1.0, 3000),
            Err(BuildError::InvalidTickRange { .. })
        ));
        assert!(matches!(
            complete().pool_by_price_range(-1.0, 1.0, 3000),
            Err(BuildError::TickMath(_))
        ));
    }

    #[test]
    fn beneficiaries_are_sorted_and_mark_lockable() {
        let high = Address::repeat_byte(0xee);
        let low = Address::repeat_byte(0x01);
        let params = complete()
            .pool_by_ticks(StaticPool::new(-1000, 1000).fee(500))
            .with_beneficiaries(vec![
                BeneficiaryShare::new(high, WAD / U256::from(2u8)),
                BeneficiaryShare::new(low, WAD / U256::from(2u8)),
            ])
            .build()
            .unwrap();
        assert!(params.is_lockable());
        assert_eq!(params.beneficiaries[0].beneficiary, low);
    }

    #[test]
    fn vesting_is_not_checked_against_supply_at_build() {
        let params = complete()
            .pool_by_ticks(StaticPool::new(-1000, 1000).fee(500))
            .with_vesting(
                VestingConfig::new(86_400).recipients(vec![Address::repeat_byte(1)], vec![]),
            )
            .build();
        assert!(params.is_ok());
    }

    #[test]
    fn rejects_invalid_share_cap() {
        let err = complete()
            .pool_by_ticks(StaticPool::new(-1000, 1000).fee(500).max_share_to_be_sold(WAD + U256::ONE))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidPool(_)));
    }

    #[test]
    fn rejects_fee_above_one_hundred_percent() {
        let err = complete()
            .pool_by_ticks(StaticPool::new(-40_000, 40_000).fee(2_000_000))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidPool("fee 2000000 exceeds the maximum of 1000000".into())
        );
    }
}
