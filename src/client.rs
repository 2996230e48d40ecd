//! The transport capability the factory and readers are written against.
//!
//! Signing, nonce management, retries and polling belong to the
//! implementation; this crate issues one call per step and wraps failures
//! with the step name.

use crate::error::ClientError;
use alloy_primitives::{Address, B256, Bytes};
use std::future::Future;

/// A contract call, read-only or state changing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub from: Option<Address>,
    pub to: Address,
    pub data: Bytes,
    pub gas_limit: Option<u64>,
}

impl CallRequest {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            from: None,
            to,
            data: data.into(),
            gas_limit: None,
        }
    }

    pub fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn gas_limit(mut self, gas_limit: Option<u64>) -> Self {
        self.gas_limit = gas_limit;
        self
    }
}

/// Result of executing a call without committing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOutcome {
    pub return_data: Bytes,
    pub gas_used: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxReceipt {
    pub transaction_hash: B256,
    pub success: bool,
    pub gas_used: u64,
    pub block_number: Option<u64>,
}

pub trait RpcClient: Send + Sync {
    /// `eth_call` against the latest block.
    fn read(&self, call: &CallRequest) -> impl Future<Output = Result<Bytes, ClientError>> + Send;

    /// Executes `call` and estimates its gas without broadcasting.
    fn simulate(
        &self,
        call: &CallRequest,
    ) -> impl Future<Output = Result<SimulationOutcome, ClientError>> + Send;

    /// Signs and broadcasts `call`, returning the transaction hash.
    fn write(&self, call: &CallRequest) -> impl Future<Output = Result<B256, ClientError>> + Send;

    fn wait_for_receipt(
        &self,
        tx_hash: B256,
    ) -> impl Future<Output = Result<TxReceipt, ClientError>> + Send;
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use crate::FastMap;
    use std::sync::Mutex;

    /// Answers calls by selector and records every request it sees.
    #[derive(Debug, Default)]
    pub(crate) struct MockClient {
        returns: FastMap<[u8; 4], Bytes>,
        pub gas_used: u64,
        pub tx_hash: B256,
        pub reverts: bool,
        pub fail_step: Option<&'static str>,
        pub calls: Mutex<Vec<(&'static str, CallRequest)>>,
    }

    impl MockClient {
        pub fn new() -> Self {
            Self {
                gas_used: 1_000_000,
                tx_hash: B256::repeat_byte(0xab),
                ..Self::default()
            }
        }

        pub fn returning(mut self, selector: [u8; 4], data: impl Into<Bytes>) -> Self {
            self.returns.insert(selector, data.into());
            self
        }

        pub fn calls(&self) -> Vec<(&'static str, CallRequest)> {
            self.calls.lock().unwrap().clone()
        }

        fn answer(&self, step: &'static str, call: &CallRequest) -> Result<Bytes, ClientError> {
            self.calls.lock().unwrap().push((step, call.clone()));
            if self.fail_step == Some(step) {
                return Err(format!("{step} rejected by node").into());
            }
            let selector: [u8; 4] = call
                .data
                .get(..4)
                .and_then(|s| s.try_into().ok())
                .ok_or("call data shorter than a selector")?;
            self.returns
                .get(&selector)
                .cloned()
                .ok_or_else(|| format!("no mocked return for 0x{}", alloy_primitives::hex::encode(selector)).into())
        }
    }

    impl RpcClient for MockClient {
        fn read(&self, call: &CallRequest) -> impl Future<Output = Result<Bytes, ClientError>> + Send {
            let result = self.answer("read", call);
            async move { result }
        }

        fn simulate(
            &self,
            call: &CallRequest,
        ) -> impl Future<Output = Result<SimulationOutcome, ClientError>> + Send {
            let result = self.answer("simulate", call).map(|return_data| SimulationOutcome {
                return_data,
                gas_used: self.gas_used,
            });
            async move { result }
        }

        fn write(&self, call: &CallRequest) -> impl Future<Output = Result<B256, ClientError>> + Send {
            self.calls.lock().unwrap().push(("write", call.clone()));
            let result = if self.fail_step == Some("write") {
                Err("write rejected by node".into())
            } else {
                Ok(self.tx_hash)
            };
            async move { result }
        }

        fn wait_for_receipt(
            &self,
            tx_hash: B256,
        ) -> impl Future<Output = Result<TxReceipt, ClientError>> + Send {
            let receipt = TxReceipt {
                transaction_hash: tx_hash,
                success: !self.reverts,
                gas_used: self.gas_used,
                block_number: Some(1),
            };
            async move { Ok(receipt) }
        }
    }
}
