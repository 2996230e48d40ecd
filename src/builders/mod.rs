//! Fluent builders turning launch intent into frozen, encodable params.
//!
//! Every builder accumulates `Option` fields in any order; `build()` checks
//! that each required section is present and returns
//! [`BuildError::Missing`] listing all absent sections at once.

pub mod dynamic_auction;
pub mod multicurve;
pub mod static_auction;

pub use dynamic_auction::{
    AuctionSchedule, CreateDynamicAuctionParams, DynamicAuctionBuilder, DynamicPool,
    ResolvedAuction,
};
pub use multicurve::{
    CreateMulticurveParams, MarketCapPresets, MulticurveBuilder, MulticurvePool, PresetOverride,
    ScheduleTime, market_cap_preset_curves,
};
pub use static_auction::{CreateStaticAuctionParams, StaticAuctionBuilder, StaticPool};

use crate::addresses::ModuleOverrides;
use crate::error::BuildError;
use crate::miner::MiningResult;
use crate::types::{GovernanceConfig, MigrationConfig, SaleConfig, TokenConfig, VestingConfig};
use alloy_primitives::{Address, B256};

/// Configuration section named by [`BuildError::Missing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Token,
    Sale,
    Pool,
    Auction,
    Migration,
    Governance,
    UserAddress,
}

impl Section {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Sale => "sale",
            Self::Pool => "pool",
            Self::Auction => "auction",
            Self::Migration => "migration",
            Self::Governance => "governance",
            Self::UserAddress => "userAddress",
        }
    }
}

/// Sections shared by every launch type, frozen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub token: TokenConfig,
    pub sale: SaleConfig,
    pub vesting: Option<VestingConfig>,
    pub governance: GovernanceConfig,
    pub migration: MigrationConfig,
    pub integrator: Address,
    pub user_address: Address,
    pub overrides: ModuleOverrides,
    pub gas_limit: Option<u64>,
    /// CREATE2 salt forwarded to the token factory and hook deployer.
    pub salt: B256,
}

/// Accumulating counterpart of [`LaunchConfig`].
#[derive(Debug, Clone, Default)]
pub(crate) struct CommonFields {
    token: Option<TokenConfig>,
    sale: Option<SaleConfig>,
    vesting: Option<VestingConfig>,
    governance: Option<GovernanceConfig>,
    migration: Option<MigrationConfig>,
    integrator: Option<Address>,
    user_address: Option<Address>,
    overrides: ModuleOverrides,
    gas_limit: Option<u64>,
    salt: Option<B256>,
}

impl CommonFields {
    /// Missing sections in reporting order, with the launch-specific `pool`
    /// and `auction` checks slotted in after the sale.
    pub(crate) fn missing(&self, pool: bool, auction: bool) -> Vec<Section> {
        [
            (Section::Token, self.token.is_none()),
            (Section::Sale, self.sale.is_none()),
            (Section::Pool, pool),
            (Section::Auction, auction),
            (Section::Migration, self.migration.is_none()),
            (Section::Governance, self.governance.is_none()),
            (Section::UserAddress, self.user_address.is_none()),
        ]
        .into_iter()
        .filter_map(|(section, absent)| absent.then_some(section))
        .collect()
    }

    pub(crate) fn freeze(&self, pool: bool, auction: bool) -> Result<LaunchConfig, BuildError> {
        let missing = self.missing(pool, auction);
        let (Some(token), Some(sale), Some(governance), Some(migration), Some(user_address)) = (
            self.token.clone(),
            self.sale,
            self.governance.clone(),
            self.migration.clone(),
            self.user_address,
        ) else {
            return Err(BuildError::Missing(missing));
        };
        if !missing.is_empty() {
            return Err(BuildError::Missing(missing));
        }
        sale.validate()?;

        Ok(LaunchConfig {
            token,
            sale,
            vesting: self.vesting.clone(),
            governance,
            migration,
            integrator: self.integrator.unwrap_or(Address::ZERO),
            user_address,
            overrides: self.overrides.clone(),
            gas_limit: self.gas_limit,
            salt: self.salt.unwrap_or(B256::ZERO),
        })
    }
}

/// Generates the setters every builder shares over its `common` field.
macro_rules! common_setters {
    ($builder:ty) => {
        impl $builder {
            pub fn token(mut self, token: $crate::types::TokenConfig) -> Self {
                self.common.token = Some(token);
                self
            }

            pub fn sale(mut self, sale: $crate::types::SaleConfig) -> Self {
                self.common.sale = Some(sale);
                self
            }

            pub fn with_vesting(mut self, vesting: $crate::types::VestingConfig) -> Self {
                self.common.vesting = Some(vesting);
                self
            }

            pub fn governance(mut self, governance: $crate::types::GovernanceConfig) -> Self {
                self.common.governance = Some(governance);
                self
            }

            pub fn migration(mut self, migration: $crate::types::MigrationConfig) -> Self {
                self.common.migration = Some(migration);
                self
            }

            pub fn integrator(mut self, integrator: alloy_primitives::Address) -> Self {
                self.common.integrator = Some(integrator);
                self
            }

            pub fn user_address(mut self, user_address: alloy_primitives::Address) -> Self {
                self.common.user_address = Some(user_address);
                self
            }

            pub fn with_module_overrides(
                mut self,
                overrides: $crate::addresses::ModuleOverrides,
            ) -> Self {
                self.common.overrides = overrides;
                self
            }

            pub fn override_module(
                mut self,
                role: $crate::addresses::ModuleRole,
                address: alloy_primitives::Address,
            ) -> Self {
                self.common.overrides.insert(role, address);
                self
            }

            pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
                self.common.gas_limit = Some(gas_limit);
                self
            }

            pub fn salt(mut self, salt: alloy_primitives::B256) -> Self {
                self.common.salt = Some(salt);
                self
            }
        }
    };
}

pub(crate) use common_setters;

impl LaunchConfig {
    /// Adopts a mined salt.
    pub fn with_mined(mut self, mined: &MiningResult) -> Self {
        self.salt = mined.salt;
        self
    }
}

/// Any frozen launch, for callers that pick the launch type at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateParams {
    Static(CreateStaticAuctionParams),
    Dynamic(CreateDynamicAuctionParams),
    Multicurve(CreateMulticurveParams),
}

impl CreateParams {
    pub fn config(&self) -> &LaunchConfig {
        match self {
            Self::Static(params) => &params.config,
            Self::Dynamic(params) => &params.config,
            Self::Multicurve(params) => &params.config,
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Static(_) => "static",
            Self::Dynamic(_) => "dynamic",
            Self::Multicurve(_) => "multicurve",
        }
    }
}

impl From<CreateStaticAuctionParams> for CreateParams {
    fn from(params: CreateStaticAuctionParams) -> Self {
        Self::Static(params)
    }
}

impl From<CreateDynamicAuctionParams> for CreateParams {
    fn from(params: CreateDynamicAuctionParams) -> Self {
        Self::Dynamic(params)
    }
}

impl From<CreateMulticurveParams> for CreateParams {
    fn from(params: CreateMulticurveParams) -> Self {
        Self::Multicurve(params)
    }
}
