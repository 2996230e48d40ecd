//! [`RpcClient`] over an alloy [`Provider`]. Signing and nonces come from
//! the provider's fillers and wallet.

use crate::client::{CallRequest, RpcClient, SimulationOutcome, TxReceipt};
use crate::error::ClientError;
use alloy_network::{Ethereum, Network, ReceiptResponse, TransactionBuilder};
use alloy_primitives::{B256, Bytes};
use alloy_provider::{PendingTransactionBuilder, Provider};
use std::future::Future;

type TransactionRequest = <Ethereum as Network>::TransactionRequest;

#[derive(Debug, Clone)]
pub struct AlloyClient<P> {
    provider: P,
}

impl<P: Provider> AlloyClient<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

fn transaction(call: &CallRequest) -> TransactionRequest {
    let mut tx = TransactionRequest::default()
        .with_to(call.to)
        .with_input(call.data.clone());
    if let Some(from) = call.from {
        tx.set_from(from);
    }
    if let Some(gas_limit) = call.gas_limit {
        tx.set_gas_limit(gas_limit);
    }
    tx
}

impl<P: Provider> RpcClient for AlloyClient<P> {
    fn read(&self, call: &CallRequest) -> impl Future<Output = Result<Bytes, ClientError>> + Send {
        let tx = transaction(call);
        async move { self.provider.call(tx).await.map_err(Into::into) }
    }

    fn simulate(
        &self,
        call: &CallRequest,
    ) -> impl Future<Output = Result<SimulationOutcome, ClientError>> + Send {
        let tx = transaction(call);
        async move {
            let return_data = self.provider.call(tx.clone()).await?;
            let gas_used = self.provider.estimate_gas(tx).await?;
            Ok(SimulationOutcome {
                return_data,
                gas_used,
            })
        }
    }

    fn write(&self, call: &CallRequest) -> impl Future<Output = Result<B256, ClientError>> + Send {
        let tx = transaction(call);
        async move {
            let pending = self.provider.send_transaction(tx).await?;
            Ok(*pending.tx_hash())
        }
    }

    fn wait_for_receipt(
        &self,
        tx_hash: B256,
    ) -> impl Future<Output = Result<TxReceipt, ClientError>> + Send {
        async move {
            let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
                .get_receipt()
                .await?;
            Ok(TxReceipt {
                transaction_hash: receipt.transaction_hash(),
                success: receipt.status(),
                gas_used: receipt.gas_used(),
                block_number: receipt.block_number(),
            })
        }
    }
}
