use async_trait::async_trait;
use primitive_types::U256;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    chain::{
        decode,
        errors::{ChainError, Entity},
        types::{Address, BlockView, TransactionReceiptView, TxHash},
    },
    config::ProviderConfig,
    provider::{HttpClient, HttpClientConfig, RpcTransport},
    types::methods,
    utils::hex::format_hex_u64,
};

/// Read-only chain queries used by the explorer.
///
/// Implementations hold no per-call state; every method may be called
/// concurrently and cancelled by dropping the returned future.
#[async_trait]
pub trait ChainApi: Send + Sync {
    /// Returns the most recent block number.
    async fn get_head_height(&self) -> Result<u64, ChainError>;

    /// Returns a block with its transaction hashes.
    async fn get_block(&self, number: u64) -> Result<BlockView, ChainError>;

    /// Returns a block with full transaction summaries.
    async fn get_block_with_transactions(&self, number: u64) -> Result<BlockView, ChainError>;

    /// Returns the receipt of a mined transaction joined with its transferred value.
    async fn get_transaction_receipt(
        &self,
        hash: &TxHash,
    ) -> Result<TransactionReceiptView, ChainError>;

    /// Returns the balance in wei of `address` at the latest block.
    async fn get_balance(&self, address: &str) -> Result<U256, ChainError>;
}

/// Validates a user-entered account address.
///
/// Accepts `0x` followed by exactly 40 hex digits in any case. Surrounding
/// whitespace is ignored.
///
/// # Errors
///
/// Returns [`ChainError::InvalidAddress`] describing the first problem found.
pub fn parse_address(input: &str) -> Result<Address, ChainError> {
    input.trim().parse::<Address>().map_err(|e| ChainError::InvalidAddress {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// [`ChainApi`] over a JSON-RPC provider.
#[derive(Debug, Clone)]
pub struct ChainClient {
    transport: Arc<RpcTransport>,
}

impl ChainClient {
    /// Builds a client for the configured provider.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Config`] if no endpoint can be resolved (missing
    /// API key, unknown network, non-http override) and
    /// [`ChainError::Provider`] if the HTTP client cannot be built.
    pub fn new(provider: &ProviderConfig, http: HttpClientConfig) -> Result<Self, ChainError> {
        let url = provider.resolve_endpoint().map_err(ChainError::Config)?;
        if provider.timeout_seconds == 0 {
            return Err(ChainError::Config("Provider timeout must be greater than 0".to_string()));
        }

        let http_client = Arc::new(HttpClient::with_config(http)?);
        let network = provider.endpoint_url.as_ref().map_or(provider.network.as_str(), |_| "custom");
        tracing::info!(network = network, "chain client initialized");

        Ok(Self::with_transport(RpcTransport::new(http_client, url, provider.timeout())))
    }

    #[must_use]
    pub fn with_transport(transport: RpcTransport) -> Self {
        Self { transport: Arc::new(transport) }
    }

    async fn call(&self, method: &'static str, params: Value) -> Result<Option<Value>, ChainError> {
        Ok(self.transport.call(method, params).await?)
    }

    async fn fetch_block(&self, number: u64, full: bool) -> Result<BlockView, ChainError> {
        let result = self
            .call(methods::GET_BLOCK_BY_NUMBER, json!([format_hex_u64(number), full]))
            .await?
            .ok_or(ChainError::NotFound(Entity::Block(number)))?;

        let block = decode::decode_block(&result, full).ok_or_else(|| ChainError::malformed("block"))?;
        if block.number != number {
            tracing::warn!(requested = number, returned = block.number, "provider returned wrong block");
            return Err(ChainError::malformed("block number"));
        }
        Ok(block)
    }
}

#[async_trait]
impl ChainApi for ChainClient {
    async fn get_head_height(&self) -> Result<u64, ChainError> {
        let result = self
            .call(methods::BLOCK_NUMBER, json!([]))
            .await?
            .ok_or_else(|| ChainError::malformed("block number"))?;
        decode::decode_block_number(&result).ok_or_else(|| ChainError::malformed("block number"))
    }

    async fn get_block(&self, number: u64) -> Result<BlockView, ChainError> {
        self.fetch_block(number, false).await
    }

    async fn get_block_with_transactions(&self, number: u64) -> Result<BlockView, ChainError> {
        self.fetch_block(number, true).await
    }

    async fn get_transaction_receipt(
        &self,
        hash: &TxHash,
    ) -> Result<TransactionReceiptView, ChainError> {
        let params = json!([hash.to_string()]);
        let (receipt, transaction) = tokio::try_join!(
            self.call(methods::GET_TRANSACTION_RECEIPT, params.clone()),
            self.call(methods::GET_TRANSACTION_BY_HASH, params),
        )?;

        let (Some(receipt), Some(transaction)) = (receipt, transaction) else {
            return Err(ChainError::NotFound(Entity::Transaction(*hash)));
        };

        decode::decode_receipt(&receipt, &transaction)
            .ok_or_else(|| ChainError::malformed("transaction receipt"))
    }

    async fn get_balance(&self, address: &str) -> Result<U256, ChainError> {
        let address = parse_address(address)?;
        let result = self
            .call(methods::GET_BALANCE, json!([address.to_string(), "latest"]))
            .await?
            .ok_or_else(|| ChainError::malformed("balance"))?;
        decode::decode_quantity(&result).ok_or_else(|| ChainError::malformed("balance"))
    }
}
