//! Read-only accessors over deployed launch contracts.

pub mod airlock;
pub mod dynamic_pool;
pub mod multicurve_pool;
pub mod static_pool;

pub use airlock::{Airlock, AssetData};
pub use dynamic_pool::{DynamicAuctionHook, HookState, HookStatus};
pub use multicurve_pool::{MulticurveInitializer, MulticurveState, PoolKeyInfo, PoolStatus};
pub use static_pool::{Slot0, StaticAuctionPool, StaticPoolState};

use crate::client::{CallRequest, RpcClient};
use crate::error::Error;
use alloy_primitives::Address;
use alloy_sol_types::SolCall;

/// `eth_call`s `call` on `to`; failures are tagged with the function
/// signature.
pub(crate) async fn fetch<C, T>(client: &C, to: Address, call: T) -> Result<T::Return, Error>
where
    C: RpcClient,
    T: SolCall + Send,
{
    let request = CallRequest::new(to, call.abi_encode());
    let data = client.read(&request).await.map_err(Error::rpc(T::SIGNATURE))?;
    T::abi_decode_returns(&data).map_err(Error::decode(T::SIGNATURE))
}
