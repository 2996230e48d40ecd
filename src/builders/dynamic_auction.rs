use super::{CommonFields, LaunchConfig, Section, common_setters};
use crate::constants::{DEFAULT_AUCTION_DURATION, DEFAULT_EPOCH_LENGTH, DEFAULT_NUM_PD_SLUGS, DEFAULT_V4_FEE, FeeTier};
use crate::error::{BuildError, GammaError};
use crate::math::gamma::compute_optimal_gamma;
use crate::math::price::price_to_usable_tick;
use crate::miner::MiningResult;
use crate::types::{check_aligned, check_pool_key};
use alloy_primitives::U256;

/// Uniswap V4 pool hosting the auction hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicPool {
    pub fee: u32,
    pub tick_spacing: i32,
}

impl DynamicPool {
    pub const fn new(fee: u32, tick_spacing: i32) -> Self {
        Self { fee, tick_spacing }
    }

    /// Pool with the spacing conventionally paired with `fee`.
    pub fn from_fee(fee: u32) -> Self {
        Self::new(fee, FeeTier::from(fee).tick_spacing())
    }
}

impl Default for DynamicPool {
    fn default() -> Self {
        Self::from_fee(DEFAULT_V4_FEE)
    }
}

/// Proceeds bounds and timing of a dynamic auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionSchedule {
    pub min_proceeds: U256,
    pub max_proceeds: U256,
    pub duration: u64,
    pub epoch_length: u64,
    /// Per-epoch tick movement; derived from the range when unset.
    pub gamma: Option<i32>,
    pub num_pd_slugs: u64,
    /// Unix start time; defaults to shortly after the block used to encode.
    pub start_time: Option<u64>,
}

impl AuctionSchedule {
    pub fn new(min_proceeds: U256, max_proceeds: U256) -> Self {
        Self {
            min_proceeds,
            max_proceeds,
            duration: DEFAULT_AUCTION_DURATION,
            epoch_length: DEFAULT_EPOCH_LENGTH,
            gamma: None,
            num_pd_slugs: DEFAULT_NUM_PD_SLUGS,
            start_time: None,
        }
    }

    pub fn duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }

    pub fn epoch_length(mut self, epoch_length: u64) -> Self {
        self.epoch_length = epoch_length;
        self
    }

    pub fn gamma(mut self, gamma: i32) -> Self {
        self.gamma = Some(gamma);
        self
    }

    pub fn num_pd_slugs(mut self, num_pd_slugs: u64) -> Self {
        self.num_pd_slugs = num_pd_slugs;
        self
    }

    pub fn start_time(mut self, start_time: u64) -> Self {
        self.start_time = Some(start_time);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AuctionRequest {
    start_tick: i32,
    end_tick: i32,
    schedule: AuctionSchedule,
}

/// Auction schedule with gamma fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAuction {
    pub start_tick: i32,
    pub end_tick: i32,
    pub min_proceeds: U256,
    pub max_proceeds: U256,
    pub duration: u64,
    pub epoch_length: u64,
    pub gamma: i32,
    pub num_pd_slugs: u64,
    pub start_time: Option<u64>,
}

impl ResolvedAuction {
    pub fn total_epochs(&self) -> u64 {
        self.duration / self.epoch_length
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDynamicAuctionParams {
    pub config: LaunchConfig,
    pub pool: DynamicPool,
    pub auction: ResolvedAuction,
    /// Whether the launched token sorts before the numeraire.
    pub is_token0: Option<bool>,
}

impl CreateDynamicAuctionParams {
    /// Adopts a mined salt; the token ordering follows the mined address
    /// unless it was set explicitly.
    pub fn with_mined(mut self, mined: &MiningResult) -> Self {
        if self.is_token0.is_none() {
            self.is_token0 = Some(mined.token_address < self.config.sale.numeraire);
        }
        self.config = self.config.with_mined(mined);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct DynamicAuctionBuilder {
    common: CommonFields,
    pool: Option<DynamicPool>,
    auction: Option<AuctionRequest>,
    is_token0: Option<bool>,
}

common_setters!(DynamicAuctionBuilder);

impl DynamicAuctionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool_config(mut self, pool: DynamicPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn auction_by_ticks(mut self, start_tick: i32, end_tick: i32, schedule: AuctionSchedule) -> Self {
        self.auction = Some(AuctionRequest {
            start_tick,
            end_tick,
            schedule,
        });
        self
    }

    /// Snaps both prices to the configured pool's spacing, so the pool must
    /// be set first.
    pub fn auction_by_price_range(
        mut self,
        start_price: f64,
        end_price: f64,
        schedule: AuctionSchedule,
    ) -> Result<Self, BuildError> {
        let pool = self.pool.ok_or(BuildError::Missing(vec![Section::Pool]))?;
        self.auction = Some(AuctionRequest {
            start_tick: price_to_usable_tick(start_price, pool.tick_spacing)?,
            end_tick: price_to_usable_tick(end_price, pool.tick_spacing)?,
            schedule,
        });
        Ok(self)
    }

    pub fn with_token_ordering(mut self, is_token0: bool) -> Self {
        self.is_token0 = Some(is_token0);
        self
    }

    pub fn build(&self) -> Result<CreateDynamicAuctionParams, BuildError> {
        let config = self
            .common
            .freeze(self.pool.is_none(), self.auction.is_none())?;
        let (Some(pool), Some(request)) = (self.pool, self.auction) else {
            return Err(BuildError::Missing(self.common.missing(
                self.pool.is_none(),
                self.auction.is_none(),
            )));
        };

        Ok(CreateDynamicAuctionParams {
            config,
            pool,
            auction: resolve_auction(&request, &pool)?,
            is_token0: self.is_token0,
        })
    }
}

fn resolve_auction(request: &AuctionRequest, pool: &DynamicPool) -> Result<ResolvedAuction, BuildError> {
    let schedule = &request.schedule;
    check_pool_key(pool.fee, pool.tick_spacing)?;
    if request.start_tick == request.end_tick {
        return Err(BuildError::InvalidAuction(format!(
            "start and end tick are both {}",
            request.start_tick
        )));
    }
    check_aligned(request.start_tick, pool.tick_spacing)?;
    check_aligned(request.end_tick, pool.tick_spacing)?;

    if schedule.min_proceeds > schedule.max_proceeds {
        return Err(BuildError::InvalidAuction(format!(
            "minimum proceeds {} exceed maximum proceeds {}",
            schedule.min_proceeds, schedule.max_proceeds
        )));
    }
    if schedule.epoch_length == 0 || schedule.duration == 0 {
        return Err(BuildError::InvalidAuction(
            "duration and epoch length must be positive".into(),
        ));
    }
    if schedule.duration % schedule.epoch_length != 0 {
        return Err(BuildError::InvalidAuction(format!(
            "duration {}s is not a multiple of epoch length {}s",
            schedule.duration, schedule.epoch_length
        )));
    }

    let gamma = match schedule.gamma {
        Some(gamma) => {
            if gamma <= 0 || gamma % pool.tick_spacing != 0 {
                return Err(GammaError::NotDivisible {
                    gamma,
                    tick_spacing: pool.tick_spacing,
                }
                .into());
            }
            let epochs = u128::from(schedule.duration / schedule.epoch_length);
            let reach = u128::from(gamma.unsigned_abs()).saturating_mul(epochs);
            let delta = (i64::from(request.end_tick) - i64::from(request.start_tick)).unsigned_abs();
            if reach < u128::from(delta) {
                return Err(BuildError::InvalidAuction(format!(
                    "gamma {gamma} cannot cover {delta} ticks within the auction"
                )));
            }
            gamma
        }
        None => compute_optimal_gamma(
            request.start_tick,
            request.end_tick,
            schedule.duration,
            schedule.epoch_length,
            pool.tick_spacing,
        )?,
    };

    Ok(ResolvedAuction {
        start_tick: request.start_tick,
        end_tick: request.end_tick,
        min_proceeds: schedule.min_proceeds,
        max_proceeds: schedule.max_proceeds,
        duration: schedule.duration,
        epoch_length: schedule.epoch_length,
        gamma,
        num_pd_slugs: schedule.num_pd_slugs,
        start_time: schedule.start_time,
    })
}
