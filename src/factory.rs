//! Simulates and submits launches through an [`RpcClient`].

use crate::abi::IAirlock;
use crate::addresses::ModuleOverrides;
use crate::builders::{
    CreateDynamicAuctionParams, CreateMulticurveParams, CreateParams, CreateStaticAuctionParams,
};
use crate::client::{RpcClient, TxReceipt};
use crate::encode::{EncodedCall, EncodedCreate, Encoder, MigrationEncoder};
use crate::error::Error;
use alloy_primitives::{Address, B256, Bytes};
use alloy_sol_types::SolCall;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationResult {
    pub predicted_asset_address: Address,
    pub predicted_pool_address: Address,
    pub gas_estimate: u64,
}

/// Addresses deployed by a confirmed `create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateResult {
    pub tx_hash: B256,
    pub asset: Address,
    pub pool: Address,
    pub governance: Address,
    pub timelock: Address,
    pub migration_pool: Address,
    pub gas_used: u64,
    pub block_number: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct DopplerFactory<C> {
    client: C,
    encoder: Encoder,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

fn decode_create(data: &Bytes) -> Result<IAirlock::createReturn, Error> {
    IAirlock::createCall::abi_decode_returns(data).map_err(Error::decode("simulate create"))
}

impl<C: RpcClient> DopplerFactory<C> {
    pub fn new(client: C, chain_id: u64) -> Self {
        Self {
            client,
            encoder: Encoder::new(chain_id),
        }
    }

    pub fn with_migration_encoder(mut self, encoder: impl MigrationEncoder + 'static) -> Self {
        self.encoder = self.encoder.with_migration_encoder(encoder);
        self
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn simulate_create_static_auction(
        &self,
        params: &CreateStaticAuctionParams,
    ) -> Result<SimulationResult, Error> {
        let encoded = self.encoder.encode_create_static_auction(params)?;
        self.simulate_encoded(&encoded).await
    }

    /// A dynamic auction without a start time is scheduled from the local
    /// clock.
    pub async fn simulate_create_dynamic_auction(
        &self,
        params: &CreateDynamicAuctionParams,
    ) -> Result<SimulationResult, Error> {
        let encoded = self.encoder.encode_create_dynamic_auction(params, unix_now())?;
        self.simulate_encoded(&encoded).await
    }

    pub async fn simulate_create_multicurve(
        &self,
        params: &CreateMulticurveParams,
    ) -> Result<SimulationResult, Error> {
        let encoded = self.encoder.encode_create_multicurve(params)?;
        self.simulate_encoded(&encoded).await
    }

    pub async fn simulate_create(&self, params: &CreateParams) -> Result<SimulationResult, Error> {
        let encoded = self.encoder.encode(params, unix_now())?;
        self.simulate_encoded(&encoded).await
    }

    pub async fn create_static_auction(
        &self,
        params: &CreateStaticAuctionParams,
    ) -> Result<CreateResult, Error> {
        let encoded = self.encoder.encode_create_static_auction(params)?;
        self.submit(&encoded).await
    }

    pub async fn create_dynamic_auction(
        &self,
        params: &CreateDynamicAuctionParams,
    ) -> Result<CreateResult, Error> {
        let encoded = self.encoder.encode_create_dynamic_auction(params, unix_now())?;
        self.submit(&encoded).await
    }

    pub async fn create_multicurve(
        &self,
        params: &CreateMulticurveParams,
    ) -> Result<CreateResult, Error> {
        let encoded = self.encoder.encode_create_multicurve(params)?;
        self.submit(&encoded).await
    }

    pub async fn create(&self, params: &CreateParams) -> Result<CreateResult, Error> {
        let encoded = self.encoder.encode(params, unix_now())?;
        self.submit(&encoded).await
    }

    /// Moves a graduated asset's liquidity to its migrator.
    pub async fn migrate(
        &self,
        asset: Address,
        overrides: &ModuleOverrides,
    ) -> Result<TxReceipt, Error> {
        let encoded = self.encoder.encode_migrate(asset, overrides)?;
        self.send_call(&encoded, "migrate").await
    }

    pub async fn simulate_encoded(&self, encoded: &EncodedCreate) -> Result<SimulationResult, Error> {
        debug!(airlock = %encoded.airlock, "simulating create");
        let outcome = self
            .client
            .simulate(&encoded.call())
            .await
            .map_err(Error::rpc("simulate create"))?;
        let predicted = decode_create(&outcome.return_data)?;
        Ok(SimulationResult {
            predicted_asset_address: predicted.asset,
            predicted_pool_address: predicted.pool,
            gas_estimate: outcome.gas_used,
        })
    }

    /// Simulates, then sends with the params' gas limit or the simulated
    /// estimate, then waits for the receipt.
    pub async fn submit(&self, encoded: &EncodedCreate) -> Result<CreateResult, Error> {
        let outcome = self
            .client
            .simulate(&encoded.call())
            .await
            .map_err(Error::rpc("simulate create"))?;
        let predicted = decode_create(&outcome.return_data)?;

        let gas_limit = encoded.gas_limit.unwrap_or(outcome.gas_used);
        debug!(asset = %predicted.asset, gas_limit, "sending create");
        let tx_hash = self
            .client
            .write(&encoded.call().gas_limit(Some(gas_limit)))
            .await
            .map_err(Error::rpc("send create"))?;

        let receipt = self
            .client
            .wait_for_receipt(tx_hash)
            .await
            .map_err(Error::rpc("create receipt"))?;
        if !receipt.success {
            return Err(Error::Reverted {
                step: "create",
                tx_hash,
            });
        }
        debug!(%tx_hash, asset = %predicted.asset, pool = %predicted.pool, "create confirmed");

        Ok(CreateResult {
            tx_hash,
            asset: predicted.asset,
            pool: predicted.pool,
            governance: predicted.governance,
            timelock: predicted.timelock,
            migration_pool: predicted.migrationPool,
            gas_used: receipt.gas_used,
            block_number: receipt.block_number,
        })
    }

    async fn send_call(&self, encoded: &EncodedCall, step: &'static str) -> Result<TxReceipt, Error> {
        let outcome = self
            .client
            .simulate(&encoded.call())
            .await
            .map_err(Error::rpc(step))?;
        debug!(step, to = %encoded.to, gas = outcome.gas_used, "sending");
        let tx_hash = self
            .client
            .write(&encoded.call().gas_limit(Some(outcome.gas_used)))
            .await
            .map_err(Error::rpc(step))?;
        let receipt = self
            .client
            .wait_for_receipt(tx_hash)
            .await
            .map_err(Error::rpc(step))?;
        if !receipt.success {
            return Err(Error::Reverted { step, tx_hash });
        }
        Ok(receipt)
    }
}
