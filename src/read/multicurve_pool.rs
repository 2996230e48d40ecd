use super::fetch;
use crate::abi::IMulticurveInitializer;
use crate::client::RpcClient;
use crate::error::Error;
use alloy_primitives::Address;
use std::fmt;

/// Lifecycle of a multicurve pool as tracked by its initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolStatus {
    Uninitialized,
    Initialized,
    /// Fees are locked to beneficiaries; the pool never migrates.
    Locked,
    Exited,
    Unknown(u8),
}

impl From<u8> for PoolStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Uninitialized,
            1 => Self::Initialized,
            2 => Self::Locked,
            3 => Self::Exited,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => f.write_str("uninitialized"),
            Self::Initialized => f.write_str("initialized"),
            Self::Locked => f.write_str("locked"),
            Self::Exited => f.write_str("exited"),
            Self::Unknown(value) => write!(f, "unknown({value})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolKeyInfo {
    pub currency0: Address,
    pub currency1: Address,
    pub fee: u32,
    pub tick_spacing: i32,
    pub hooks: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MulticurveState {
    pub numeraire: Address,
    pub status: PoolStatus,
    pub pool_key: PoolKeyInfo,
    pub far_tick: i32,
}

impl MulticurveState {
    pub fn has_graduated(&self) -> bool {
        self.status == PoolStatus::Exited
    }

    pub fn is_locked(&self) -> bool {
        self.status == PoolStatus::Locked
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MulticurveInitializer<'a, C> {
    client: &'a C,
    initializer: Address,
}

impl<'a, C: RpcClient> MulticurveInitializer<'a, C> {
    pub fn new(client: &'a C, initializer: Address) -> Self {
        Self {
            client,
            initializer,
        }
    }

    pub fn address(&self) -> Address {
        self.initializer
    }

    pub async fn fetch_state(&self, asset: Address) -> Result<MulticurveState, Error> {
        let state = fetch(
            self.client,
            self.initializer,
            IMulticurveInitializer::getStateCall { asset },
        )
        .await?;
        let key = state.poolKey;
        Ok(MulticurveState {
            numeraire: state.numeraire,
            status: PoolStatus::from(state.status),
            pool_key: PoolKeyInfo {
                currency0: key.currency0,
                currency1: key.currency1,
                fee: key.fee.to::<u32>(),
                tick_spacing: key.tickSpacing.as_i32(),
                hooks: key.hooks,
            },
            far_tick: state.farTick.as_i32(),
        })
    }

    pub async fn has_graduated(&self, asset: Address) -> Result<bool, Error> {
        Ok(self.fetch_state(asset).await?.has_graduated())
    }
}
