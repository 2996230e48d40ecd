use super::fetch;
use crate::abi::{IUniswapV3Initializer, IUniswapV3Pool};
use crate::client::RpcClient;
use crate::error::Error;
use crate::math::price::sqrt_price_x96_to_price;
use alloy_primitives::{Address, U256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slot0 {
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub unlocked: bool,
}

impl Slot0 {
    /// Price of token0 in token1.
    pub fn price(&self) -> f64 {
        sqrt_price_x96_to_price(self.sqrt_price_x96)
    }
}

/// Bonding curve bookkeeping kept by the V3 initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticPoolState {
    pub asset: Address,
    pub numeraire: Address,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub num_positions: u16,
    pub is_initialized: bool,
    pub is_exited: bool,
    pub max_share_to_be_sold: U256,
    pub total_tokens_on_bonding_curve: U256,
}

impl StaticPoolState {
    /// Liquidity has left the curve for the migration venue.
    pub fn has_graduated(&self) -> bool {
        self.is_exited
    }

    /// Whether `tick` has crossed the far end of the curve, the condition
    /// for the initializer to allow an exit.
    pub fn far_tick_reached(&self, tick: i32) -> bool {
        let is_token0 = self.asset < self.numeraire;
        if is_token0 {
            tick >= self.tick_upper
        } else {
            tick <= self.tick_lower
        }
    }
}

/// A static auction's V3 pool together with the initializer that seeded it.
#[derive(Debug, Clone, Copy)]
pub struct StaticAuctionPool<'a, C> {
    client: &'a C,
    pool: Address,
    initializer: Address,
}

impl<'a, C: RpcClient> StaticAuctionPool<'a, C> {
    pub fn new(client: &'a C, pool: Address, initializer: Address) -> Self {
        Self {
            client,
            pool,
            initializer,
        }
    }

    pub fn address(&self) -> Address {
        self.pool
    }

    pub async fn fetch_slot0(&self) -> Result<Slot0, Error> {
        let slot0 = fetch(self.client, self.pool, IUniswapV3Pool::slot0Call {}).await?;
        Ok(Slot0 {
            sqrt_price_x96: U256::from(slot0.sqrtPriceX96),
            tick: slot0.tick.as_i32(),
            unlocked: slot0.unlocked,
        })
    }

    pub async fn fetch_liquidity(&self) -> Result<u128, Error> {
        fetch(self.client, self.pool, IUniswapV3Pool::liquidityCall {}).await
    }

    pub async fn fetch_state(&self) -> Result<StaticPoolState, Error> {
        let state = fetch(
            self.client,
            self.initializer,
            IUniswapV3Initializer::getStateCall { pool: self.pool },
        )
        .await?;
        Ok(StaticPoolState {
            asset: state.asset,
            numeraire: state.numeraire,
            tick_lower: state.tickLower.as_i32(),
            tick_upper: state.tickUpper.as_i32(),
            num_positions: state.numPositions,
            is_initialized: state.isInitialized,
            is_exited: state.isExited,
            max_share_to_be_sold: state.maxShareToBeSold,
            total_tokens_on_bonding_curve: state.totalTokensOnBondingCurve,
        })
    }

    pub async fn fetch_current_price(&self) -> Result<f64, Error> {
        Ok(self.fetch_slot0().await?.price())
    }

    pub async fn has_graduated(&self) -> Result<bool, Error> {
        Ok(self.fetch_state().await?.has_graduated())
    }
}
