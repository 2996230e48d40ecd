use super::fetch;
use crate::abi::IDopplerHook;
use crate::client::RpcClient;
use crate::error::Error;
use alloy_primitives::{Address, I256, U256};

/// Running totals of the auction hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HookState {
    pub last_epoch: u64,
    pub tick_accumulator: I256,
    pub total_tokens_sold: U256,
    pub total_proceeds: U256,
    pub total_tokens_sold_last_epoch: U256,
    pub fees_accrued: I256,
}

/// Hook state plus the immutable auction parameters it runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HookStatus {
    pub state: HookState,
    pub early_exit: bool,
    pub insufficient_proceeds: bool,
    pub is_token0: bool,
    pub minimum_proceeds: U256,
    pub maximum_proceeds: U256,
    pub starting_time: u64,
    pub ending_time: u64,
    pub epoch_length: u64,
    pub gamma: i32,
    pub num_tokens_to_sell: U256,
}

impl HookStatus {
    pub fn has_started(&self, now: u64) -> bool {
        now >= self.starting_time
    }

    pub fn has_ended(&self, now: u64) -> bool {
        self.early_exit || now >= self.ending_time
    }

    /// Migration is allowed after an early exit at maximum proceeds, or
    /// once the auction ended having raised the minimum.
    pub fn has_graduated(&self, now: u64) -> bool {
        self.early_exit
            || (now >= self.ending_time && self.state.total_proceeds >= self.minimum_proceeds)
    }

    /// One-based epoch the hook is in at `now`; epoch 1 before the start.
    pub fn current_epoch(&self, now: u64) -> u64 {
        if now < self.starting_time || self.epoch_length == 0 {
            return 1;
        }
        (now - self.starting_time) / self.epoch_length + 1
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DynamicAuctionHook<'a, C> {
    client: &'a C,
    hook: Address,
}

impl<'a, C: RpcClient> DynamicAuctionHook<'a, C> {
    pub fn new(client: &'a C, hook: Address) -> Self {
        Self { client, hook }
    }

    pub fn address(&self) -> Address {
        self.hook
    }

    pub async fn fetch_state(&self) -> Result<HookState, Error> {
        let state = fetch(self.client, self.hook, IDopplerHook::stateCall {}).await?;
        Ok(HookState {
            last_epoch: state.lastEpoch.to::<u64>(),
            tick_accumulator: state.tickAccumulator,
            total_tokens_sold: state.totalTokensSold,
            total_proceeds: state.totalProceeds,
            total_tokens_sold_last_epoch: state.totalTokensSoldLastEpoch,
            fees_accrued: state.feesAccrued,
        })
    }

    pub async fn fetch_early_exit(&self) -> Result<bool, Error> {
        fetch(self.client, self.hook, IDopplerHook::earlyExitCall {}).await
    }

    pub async fn fetch_insufficient_proceeds(&self) -> Result<bool, Error> {
        fetch(self.client, self.hook, IDopplerHook::insufficientProceedsCall {}).await
    }

    pub async fn fetch_is_token0(&self) -> Result<bool, Error> {
        fetch(self.client, self.hook, IDopplerHook::isToken0Call {}).await
    }

    /// Reads the state and every auction parameter, one call each.
    pub async fn fetch_status(&self) -> Result<HookStatus, Error> {
        let (client, hook) = (self.client, self.hook);
        Ok(HookStatus {
            state: self.fetch_state().await?,
            early_exit: self.fetch_early_exit().await?,
            insufficient_proceeds: self.fetch_insufficient_proceeds().await?,
            is_token0: self.fetch_is_token0().await?,
            minimum_proceeds: fetch(client, hook, IDopplerHook::minimumProceedsCall {}).await?,
            maximum_proceeds: fetch(client, hook, IDopplerHook::maximumProceedsCall {}).await?,
            starting_time: fetch(client, hook, IDopplerHook::startingTimeCall {})
                .await?
                .saturating_to(),
            ending_time: fetch(client, hook, IDopplerHook::endingTimeCall {})
                .await?
                .saturating_to(),
            epoch_length: fetch(client, hook, IDopplerHook::epochLengthCall {})
                .await?
                .saturating_to(),
            gamma: fetch(client, hook, IDopplerHook::gammaCall {}).await?.as_i32(),
            num_tokens_to_sell: fetch(client, hook, IDopplerHook::numTokensToSellCall {}).await?,
        })
    }

    pub async fn has_graduated(&self, now: u64) -> Result<bool, Error> {
        Ok(self.fetch_status().await?.has_graduated(now))
    }
}
