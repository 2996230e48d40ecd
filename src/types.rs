//! Value objects shared by builders, encoders and readers.

use crate::constants::{
    DEFAULT_DOPPLER404_UNIT, DEFAULT_LOCK_DURATION, DEFAULT_V4_MIGRATION_FEE,
    DEFAULT_V4_MIGRATION_TICK_SPACING, DEFAULT_YEARLY_MINT_RATE, MAX_LP_FEE,
};
use crate::error::BuildError;
use crate::math::tick_math::{MAX_TICK_SPACING, is_aligned};
use alloy_primitives::{Address, U256};

/// Tick bounds of a price range; `start_tick < end_tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickRange {
    pub start_tick: i32,
    pub end_tick: i32,
}

impl TickRange {
    pub fn new(start_tick: i32, end_tick: i32) -> Result<Self, BuildError> {
        if start_tick >= end_tick {
            return Err(BuildError::InvalidTickRange {
                start: start_tick,
                end: end_tick,
            });
        }
        Ok(Self {
            start_tick,
            end_tick,
        })
    }

    /// Fails with the first bound that is not a multiple of `tick_spacing`.
    pub fn check_alignment(&self, tick_spacing: i32) -> Result<(), BuildError> {
        check_aligned(self.start_tick, tick_spacing)?;
        check_aligned(self.end_tick, tick_spacing)
    }
}

/// Fee and spacing a pool key can be created with.
pub(crate) fn check_pool_key(fee: u32, tick_spacing: i32) -> Result<(), BuildError> {
    if fee > MAX_LP_FEE {
        return Err(BuildError::InvalidPool(format!(
            "fee {fee} exceeds the maximum of {MAX_LP_FEE}"
        )));
    }
    if !(1..=MAX_TICK_SPACING).contains(&tick_spacing) {
        return Err(BuildError::InvalidPool(format!(
            "tick spacing must be in [1, {MAX_TICK_SPACING}], got {tick_spacing}"
        )));
    }
    Ok(())
}

pub(crate) fn check_aligned(tick: i32, tick_spacing: i32) -> Result<(), BuildError> {
    if !is_aligned(tick, tick_spacing) {
        return Err(BuildError::UnalignedTick { tick, tick_spacing });
    }
    Ok(())
}

/// One liquidity shelf of a multicurve pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curve {
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub num_positions: u16,
    /// WAD-scaled fraction of the sale supply placed on this shelf.
    pub shares: U256,
}

/// Recipient of a WAD-scaled slice of locked fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeneficiaryShare {
    pub beneficiary: Address,
    pub shares: U256,
}

impl BeneficiaryShare {
    pub const fn new(beneficiary: Address, shares: U256) -> Self {
        Self {
            beneficiary,
            shares,
        }
    }
}

/// Sorts beneficiaries by ascending address, the order the lockers require.
pub fn sort_beneficiaries(mut beneficiaries: Vec<BeneficiaryShare>) -> Vec<BeneficiaryShare> {
    beneficiaries.sort_by_key(|b| b.beneficiary);
    beneficiaries
}

/// Linear vesting of the supply that is not sold in the auction.
///
/// Without explicit recipients the whole unsold supply vests to the
/// launching user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VestingConfig {
    pub duration: u64,
    pub cliff_duration: u64,
    pub recipients: Option<Vec<Address>>,
    pub amounts: Option<Vec<U256>>,
}

impl VestingConfig {
    pub fn new(duration: u64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn cliff(mut self, cliff_duration: u64) -> Self {
        self.cliff_duration = cliff_duration;
        self
    }

    pub fn recipients(mut self, recipients: Vec<Address>, amounts: Vec<U256>) -> Self {
        self.recipients = Some(recipients);
        self.amounts = Some(amounts);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StandardToken {
    pub name: String,
    pub symbol: String,
    pub token_uri: String,
    pub yearly_mint_rate: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Doppler404Token {
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
    pub unit: U256,
}

/// Token metadata, one variant per token factory.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum TokenConfig {
    Standard(StandardToken),
    Doppler404(Doppler404Token),
}

impl TokenConfig {
    pub fn standard(
        name: impl Into<String>,
        symbol: impl Into<String>,
        token_uri: impl Into<String>,
    ) -> Self {
        Self::Standard(StandardToken {
            name: name.into(),
            symbol: symbol.into(),
            token_uri: token_uri.into(),
            yearly_mint_rate: DEFAULT_YEARLY_MINT_RATE,
        })
    }

    pub fn doppler404(
        name: impl Into<String>,
        symbol: impl Into<String>,
        base_uri: impl Into<String>,
    ) -> Self {
        Self::Doppler404(Doppler404Token {
            name: name.into(),
            symbol: symbol.into(),
            base_uri: base_uri.into(),
            unit: DEFAULT_DOPPLER404_UNIT,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Standard(token) => &token.name,
            Self::Doppler404(token) => &token.name,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Self::Standard(token) => &token.symbol,
            Self::Doppler404(token) => &token.symbol,
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Standard(_) => TokenKind::Standard,
            Self::Doppler404(_) => TokenKind::Doppler404,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    Standard,
    Doppler404,
}

/// Supply and quote asset of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaleConfig {
    pub initial_supply: U256,
    pub num_tokens_to_sell: U256,
    /// Quote asset; the zero address is the native asset.
    pub numeraire: Address,
}

impl SaleConfig {
    pub const fn new(initial_supply: U256, num_tokens_to_sell: U256, numeraire: Address) -> Self {
        Self {
            initial_supply,
            num_tokens_to_sell,
            numeraire,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), BuildError> {
        if self.initial_supply.is_zero() {
            return Err(BuildError::InvalidSale("initial supply must be positive"));
        }
        if self.num_tokens_to_sell.is_zero() {
            return Err(BuildError::InvalidSale("tokens to sell must be positive"));
        }
        if self.num_tokens_to_sell > self.initial_supply {
            return Err(BuildError::InvalidSale(
                "tokens to sell exceed the initial supply",
            ));
        }
        Ok(())
    }

    /// Supply left after the sale, available for vesting.
    pub fn unsold_supply(&self) -> U256 {
        self.initial_supply.saturating_sub(self.num_tokens_to_sell)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum GovernanceConfig {
    #[default]
    Default,
    Custom {
        initial_voting_delay: u64,
        initial_voting_period: u32,
        initial_proposal_threshold: U256,
    },
    NoOp,
}

/// Destination of the liquidity once the auction graduates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum MigrationConfig {
    UniswapV2,
    UniswapV3 {
        fee: u32,
        tick_spacing: i32,
    },
    UniswapV4 {
        fee: u32,
        tick_spacing: i32,
        lock_duration: u32,
        beneficiaries: Vec<BeneficiaryShare>,
    },
    NoOp,
    /// A migrator this crate does not model; its payload comes from the
    /// encoder's [`MigrationEncoder`](crate::encode::MigrationEncoder).
    Custom {
        migrator: Address,
    },
}

impl MigrationConfig {
    /// V4 migration with default pool parameters; beneficiaries are sorted.
    pub fn uniswap_v4(beneficiaries: Vec<BeneficiaryShare>) -> Self {
        Self::UniswapV4 {
            fee: DEFAULT_V4_MIGRATION_FEE,
            tick_spacing: DEFAULT_V4_MIGRATION_TICK_SPACING,
            lock_duration: DEFAULT_LOCK_DURATION,
            beneficiaries: sort_beneficiaries(beneficiaries),
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UniswapV2 => "uniswapV2",
            Self::UniswapV3 { .. } => "uniswapV3",
            Self::UniswapV4 { .. } => "uniswapV4",
            Self::NoOp => "noOp",
            Self::Custom { .. } => "custom",
        }
    }
}
