use super::fetch;
use crate::abi::IAirlock;
use crate::addresses::{AddressResolver, ModuleOverrides, ModuleRole};
use crate::client::RpcClient;
use crate::error::Error;
use alloy_primitives::{Address, U256};

/// Modules and pools the Airlock recorded for an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetData {
    pub numeraire: Address,
    pub timelock: Address,
    pub governance: Address,
    pub liquidity_migrator: Address,
    pub pool_initializer: Address,
    pub pool: Address,
    pub migration_pool: Address,
    pub num_tokens_to_sell: U256,
    pub total_supply: U256,
    pub integrator: Address,
}

impl AssetData {
    /// Unknown assets read back as all zeroes.
    pub fn is_registered(&self) -> bool {
        !self.pool_initializer.is_zero()
    }
}

impl From<IAirlock::getAssetDataReturn> for AssetData {
    fn from(data: IAirlock::getAssetDataReturn) -> Self {
        Self {
            numeraire: data.numeraire,
            timelock: data.timelock,
            governance: data.governance,
            liquidity_migrator: data.liquidityMigrator,
            pool_initializer: data.poolInitializer,
            pool: data.pool,
            migration_pool: data.migrationPool,
            num_tokens_to_sell: data.numTokensToSell,
            total_supply: data.totalSupply,
            integrator: data.integrator,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Airlock<'a, C> {
    client: &'a C,
    address: Address,
}

impl<'a, C: RpcClient> Airlock<'a, C> {
    pub fn new(client: &'a C, address: Address) -> Self {
        Self { client, address }
    }

    /// The Airlock deployed on `chain_id`, unless overridden.
    pub fn for_chain(
        client: &'a C,
        chain_id: u64,
        overrides: &ModuleOverrides,
    ) -> Result<Self, Error> {
        let address = AddressResolver::new(chain_id, overrides).resolve(ModuleRole::Airlock)?;
        Ok(Self::new(client, address))
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub async fn fetch_asset_data(&self, asset: Address) -> Result<AssetData, Error> {
        let data = fetch(self.client, self.address, IAirlock::getAssetDataCall { asset }).await?;
        Ok(data.into())
    }

    /// Protocol owner, the beneficiary that must hold at least 5% of
    /// locked fees.
    pub async fn fetch_owner(&self) -> Result<Address, Error> {
        fetch(self.client, self.address, IAirlock::ownerCall {}).await
    }
}
