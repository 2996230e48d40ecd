use alloy_primitives::U256;

/// 1e18, the fixed-point scale used for shares and rates.
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Highest LP fee a pool accepts, in hundredths of a bip (100%).
pub const MAX_LP_FEE: u32 = 1_000_000;

/// Minimum share a protocol owner must hold when fees are locked to
/// beneficiaries (5%).
pub const MIN_PROTOCOL_OWNER_SHARES: U256 = U256::from_limbs([50_000_000_000_000_000, 0, 0, 0]);

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

// ---------------------------------------------------------------- fee tiers

/// Pool fee tiers, denominated in hundredths of a bip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeeTier {
    Lowest,
    Low,
    Medium,
    High,
    Custom(u32),
}

impl FeeTier {
    #[inline]
    #[must_use]
    pub const fn fee(&self) -> u32 {
        match self {
            Self::Lowest => 100,
            Self::Low => 500,
            Self::Medium => 3000,
            Self::High => 10_000,
            Self::Custom(fee) => *fee,
        }
    }

    /// Tick spacing the pool factories pair with this fee.
    #[inline]
    #[must_use]
    pub const fn tick_spacing(&self) -> i32 {
        match self {
            Self::Lowest => 1,
            Self::Low => 10,
            Self::Medium => 60,
            Self::High => 200,
            Self::Custom(fee) => {
                let spacing = (*fee / 50) as i32;
                if spacing == 0 { 1 } else { spacing }
            }
        }
    }
}

impl From<u32> for FeeTier {
    #[inline]
    fn from(fee: u32) -> Self {
        match fee {
            100 => Self::Lowest,
            500 => Self::Low,
            3000 => Self::Medium,
            10_000 => Self::High,
            fee => Self::Custom(fee),
        }
    }
}

// ------------------------------------------------------------ static auction

pub const DEFAULT_V3_FEE: u32 = 10_000;
pub const DEFAULT_V3_NUM_POSITIONS: u16 = 15;
/// 35% of the sale supply.
pub const DEFAULT_V3_MAX_SHARE_TO_BE_SOLD: U256 =
    U256::from_limbs([350_000_000_000_000_000, 0, 0, 0]);

// ----------------------------------------------------------- dynamic auction

pub const DEFAULT_V4_FEE: u32 = 3000;
pub const DEFAULT_AUCTION_DURATION: u64 = 7 * SECONDS_PER_DAY;
pub const DEFAULT_EPOCH_LENGTH: u64 = 43_200;
pub const DEFAULT_NUM_PD_SLUGS: u64 = 5;
/// Delay between the reference block timestamp and the auction start when
/// no explicit start time is configured.
pub const DEFAULT_START_TIME_OFFSET: u64 = 30;

/// Permission bits a dynamic auction hook address must carry in its low
/// 14 bits: before/after initialize, before add liquidity, before/after
/// swap and before donate.
pub const DOPPLER_HOOK_FLAGS: u16 = (1 << 13) | (1 << 12) | (1 << 11) | (1 << 7) | (1 << 6) | (1 << 5);
pub const HOOK_FLAG_MASK: u16 = (1 << 14) - 1;

// ------------------------------------------------------------------- token

/// 2% yearly inflation once the mint cap unlocks.
pub const DEFAULT_YEARLY_MINT_RATE: U256 = U256::from_limbs([20_000_000_000_000_000, 0, 0, 0]);
pub const DEFAULT_DOPPLER404_UNIT: U256 = U256::from_limbs([1000, 0, 0, 0]);

// -------------------------------------------------------------- governance

pub const DEFAULT_VOTING_DELAY: u64 = 2 * SECONDS_PER_DAY;
pub const DEFAULT_VOTING_PERIOD: u32 = 14 * SECONDS_PER_DAY as u32;
pub const DEFAULT_PROPOSAL_THRESHOLD: U256 = U256::ZERO;

// --------------------------------------------------------------- migration

pub const DEFAULT_V4_MIGRATION_FEE: u32 = 3000;
pub const DEFAULT_V4_MIGRATION_TICK_SPACING: i32 = 60;
pub const DEFAULT_LOCK_DURATION: u32 = SECONDS_PER_YEAR as u32;

// -------------------------------------------------------------- multicurve

pub const DEFAULT_MULTICURVE_FEE: u32 = 500;
pub const DEFAULT_MULTICURVE_LOWER_TICKS: [i32; 3] = [-202_200, -196_200, -187_200];
pub const DEFAULT_MULTICURVE_UPPER_TICKS: [i32; 3] = [-196_200, -187_200, -175_200];
pub const DEFAULT_MULTICURVE_NUM_POSITIONS: [u16; 3] = [11, 11, 11];
/// 5%, 12.5% and 20% of the sale supply.
pub const DEFAULT_MULTICURVE_MAX_SUPPLY_SHARES: [U256; 3] = [
    U256::from_limbs([50_000_000_000_000_000, 0, 0, 0]),
    U256::from_limbs([125_000_000_000_000_000, 0, 0, 0]),
    U256::from_limbs([200_000_000_000_000_000, 0, 0, 0]),
];

/// Named market-cap bands of the multicurve preset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MarketCapPreset {
    Low,
    Medium,
    High,
}

impl MarketCapPreset {
    pub const ALL: [MarketCapPreset; 3] = [Self::Low, Self::Medium, Self::High];

    #[inline]
    const fn index(&self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub const fn tick_lower(&self) -> i32 {
        DEFAULT_MULTICURVE_LOWER_TICKS[self.index()]
    }

    pub const fn tick_upper(&self) -> i32 {
        DEFAULT_MULTICURVE_UPPER_TICKS[self.index()]
    }

    pub const fn num_positions(&self) -> u16 {
        DEFAULT_MULTICURVE_NUM_POSITIONS[self.index()]
    }

    pub const fn shares(&self) -> U256 {
        DEFAULT_MULTICURVE_MAX_SUPPLY_SHARES[self.index()]
    }
}

impl std::fmt::Display for MarketCapPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
