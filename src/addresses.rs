//! Deployed module addresses per chain and call-site overrides.

use crate::FastMap;
use crate::error::EncodeError;
use alloy_primitives::{Address, address};
use std::fmt;

pub const ANVIL_CHAIN_ID: u64 = 31_337;

/// Contracts a launch may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ModuleRole {
    Airlock,
    /// Protocol owner that must hold a fee share on lockable launches.
    AirlockOwner,
    TokenFactory,
    Doppler404Factory,
    GovernanceFactory,
    NoOpGovernanceFactory,
    V3Initializer,
    LockableV3Initializer,
    V4Initializer,
    /// CREATE2 deployer of dynamic auction hooks.
    DopplerDeployer,
    MulticurveInitializer,
    ScheduledMulticurveInitializer,
    V2Migrator,
    V3Migrator,
    V4Migrator,
    NoOpMigrator,
}

impl ModuleRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Airlock => "airlock",
            Self::AirlockOwner => "airlockOwner",
            Self::TokenFactory => "tokenFactory",
            Self::Doppler404Factory => "doppler404Factory",
            Self::GovernanceFactory => "governanceFactory",
            Self::NoOpGovernanceFactory => "noOpGovernanceFactory",
            Self::V3Initializer => "v3Initializer",
            Self::LockableV3Initializer => "lockableV3Initializer",
            Self::V4Initializer => "v4Initializer",
            Self::DopplerDeployer => "dopplerDeployer",
            Self::MulticurveInitializer => "multicurveInitializer",
            Self::ScheduledMulticurveInitializer => "scheduledMulticurveInitializer",
            Self::V2Migrator => "v2Migrator",
            Self::V3Migrator => "v3Migrator",
            Self::V4Migrator => "v4Migrator",
            Self::NoOpMigrator => "noOpMigrator",
        }
    }
}

impl fmt::Display for ModuleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment of the protocol on one chain. Modules that were never
/// deployed there are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainAddresses {
    pub chain_id: u64,
    pub airlock: Address,
    pub airlock_owner: Option<Address>,
    pub token_factory: Address,
    pub doppler404_factory: Option<Address>,
    pub governance_factory: Address,
    pub no_op_governance_factory: Option<Address>,
    pub v3_initializer: Option<Address>,
    pub lockable_v3_initializer: Option<Address>,
    pub v4_initializer: Option<Address>,
    pub doppler_deployer: Option<Address>,
    pub multicurve_initializer: Option<Address>,
    pub scheduled_multicurve_initializer: Option<Address>,
    pub v2_migrator: Option<Address>,
    pub v3_migrator: Option<Address>,
    pub v4_migrator: Option<Address>,
    pub no_op_migrator: Option<Address>,
}

impl ChainAddresses {
    pub const fn get(&self, role: ModuleRole) -> Option<Address> {
        match role {
            ModuleRole::Airlock => Some(self.airlock),
            ModuleRole::AirlockOwner => self.airlock_owner,
            ModuleRole::TokenFactory => Some(self.token_factory),
            ModuleRole::Doppler404Factory => self.doppler404_factory,
            ModuleRole::GovernanceFactory => Some(self.governance_factory),
            ModuleRole::NoOpGovernanceFactory => self.no_op_governance_factory,
            ModuleRole::V3Initializer => self.v3_initializer,
            ModuleRole::LockableV3Initializer => self.lockable_v3_initializer,
            ModuleRole::V4Initializer => self.v4_initializer,
            ModuleRole::DopplerDeployer => self.doppler_deployer,
            ModuleRole::MulticurveInitializer => self.multicurve_initializer,
            ModuleRole::ScheduledMulticurveInitializer => self.scheduled_multicurve_initializer,
            ModuleRole::V2Migrator => self.v2_migrator,
            ModuleRole::V3Migrator => self.v3_migrator,
            ModuleRole::V4Migrator => self.v4_migrator,
            ModuleRole::NoOpMigrator => self.no_op_migrator,
        }
    }
}

/// Local devnet deployment, in the order the deploy script broadcasts
/// from the first anvil account.
pub const ANVIL: ChainAddresses = ChainAddresses {
    chain_id: ANVIL_CHAIN_ID,
    airlock: address!("0x5FbDB2315678afecb367f032d93F642f64180aa3"),
    airlock_owner: Some(address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")),
    token_factory: address!("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
    doppler404_factory: Some(address!("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0")),
    governance_factory: address!("0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9"),
    no_op_governance_factory: Some(address!("0xDc64a140Aa3E981100a9becA4E685f962f0cF6C9")),
    v3_initializer: Some(address!("0x5FC8d32690cc91D4c39d9d3abcBD16989F875707")),
    lockable_v3_initializer: Some(address!("0x0165878A594ca255338adfa4d48449f69242Eb8F")),
    v4_initializer: Some(address!("0xa513E6E4b8f2a923D98304ec87F64353C4D5C853")),
    doppler_deployer: Some(address!("0x2279B7A0a67DB372996a5FaB50D91eAA73d2eBe6")),
    multicurve_initializer: Some(address!("0x8A791620dd6260079BF849Dc5567aDC3F2FdC318")),
    scheduled_multicurve_initializer: Some(address!(
        "0x610178dA211FEF7D417bC0e6FeD39F05609AD788"
    )),
    v2_migrator: Some(address!("0xB7f8BC63BbcaD18155201308C8f3540b07f84F5e")),
    v3_migrator: Some(address!("0xA51c1fc2f0D1a1b8494Ed1FE312d7C3a78Ed91C0")),
    v4_migrator: Some(address!("0x0DCd1Bf9A1b36cE34237eEaFef220932846BCD82")),
    no_op_migrator: Some(address!("0x9A676e781A523b5d0C0e43731313A708CB607508")),
};

static REGISTRY: &[ChainAddresses] = &[ANVIL];

/// Looks up the built-in deployment for `chain_id`.
pub fn chain_addresses(chain_id: u64) -> Option<&'static ChainAddresses> {
    REGISTRY.iter().find(|chain| chain.chain_id == chain_id)
}

/// Sparse role -> address map supplied at the call site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleOverrides {
    addresses: FastMap<ModuleRole, Address>,
}

impl ModuleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: ModuleRole, address: Address) -> Self {
        self.addresses.insert(role, address);
        self
    }

    pub fn insert(&mut self, role: ModuleRole, address: Address) -> Option<Address> {
        self.addresses.insert(role, address)
    }

    pub fn get(&self, role: ModuleRole) -> Option<Address> {
        self.addresses.get(&role).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// Resolves module addresses: explicit override, then the chain default.
///
/// Only the local anvil deployment ([`ANVIL`]) is built in. On any other
/// chain every role an operation touches must come from [`ModuleOverrides`],
/// otherwise resolution fails with [`EncodeError::MissingModule`].
#[derive(Debug, Clone, Copy)]
pub struct AddressResolver<'a> {
    chain_id: u64,
    chain: Option<&'static ChainAddresses>,
    overrides: &'a ModuleOverrides,
}

impl<'a> AddressResolver<'a> {
    pub fn new(chain_id: u64, overrides: &'a ModuleOverrides) -> Self {
        Self {
            chain_id,
            chain: chain_addresses(chain_id),
            overrides,
        }
    }

    pub fn lookup(&self, role: ModuleRole) -> Option<Address> {
        self.overrides
            .get(role)
            .or_else(|| self.chain.and_then(|chain| chain.get(role)))
    }

    pub fn resolve(&self, role: ModuleRole) -> Result<Address, EncodeError> {
        self.lookup(role).ok_or(EncodeError::MissingModule {
            role,
            chain_id: self.chain_id,
        })
    }
}
