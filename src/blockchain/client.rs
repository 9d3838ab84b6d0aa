//! Zilliqa JSON-RPC client with timeout and failover.
//!
//! # Responsibilities
//! - Speak JSON-RPC 2.0 to the configured endpoints
//! - Query chain state (balances, gas price, contract state, transactions)
//! - Broadcast signed transactions
//! - Handle timeouts and network errors by moving to the next endpoint

use alloy::primitives::{hex, Address, U256};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::network::NetworkClient;
use crate::blockchain::transaction::SignedTransaction;
use crate::blockchain::types::{
    parse_qa, AccountState, BlockchainError, BlockchainResult, NetworkConfig, TranId,
    TransactionRecord,
};

#[derive(Serialize)]
struct RpcRequest<'a> {
    id: &'static str,
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct BalanceResult {
    balance: String,
    nonce: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateTransactionResult {
    #[serde(rename = "TranID")]
    tran_id: TranId,
    #[serde(default)]
    info: Option<String>,
}

/// JSON-RPC client for a Zilliqa network, with failover support.
#[derive(Clone)]
pub struct ZilliqaClient {
    /// List of endpoints (primary + failovers).
    endpoints: Vec<url::Url>,
    http: reqwest::Client,
    /// Configuration.
    config: NetworkConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl ZilliqaClient {
    /// Create a new client.
    ///
    /// The primary URL must parse; invalid failover URLs are skipped with a
    /// warning. No request is made here.
    pub fn new(config: NetworkConfig) -> BlockchainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut endpoints = Vec::new();

        // 1. Add primary endpoint
        let primary: url::Url = config.rpc_url().parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url(), e))
        })?;
        endpoints.push(primary);

        // 2. Add failover endpoints
        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                endpoints.push(url);
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL");
            }
        }

        tracing::info!(
            rpc_url = %config.rpc_url(),
            namespace = %config.namespace,
            failovers = endpoints.len() - 1,
            "Network client initialized"
        );

        let mut builder = reqwest::Client::builder();
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| BlockchainError::Rpc(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoints,
            http,
            config,
            timeout_duration,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Send one JSON-RPC call, trying each endpoint in turn.
    ///
    /// Transport failures and timeouts move on to the next endpoint. A JSON-RPC
    /// error object is the node's answer and is returned immediately.
    async fn call(&self, method: &'static str, params: Value) -> BlockchainResult<Value> {
        let request = RpcRequest {
            id: "1",
            jsonrpc: "2.0",
            method,
            params,
        };

        let mut timeouts = 0;
        for (i, endpoint) in self.endpoints.iter().enumerate() {
            let fut = async {
                self.http
                    .post(endpoint.clone())
                    .json(&request)
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<RpcResponse>()
                    .await
            };
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(response)) => {
                    if let Some(error) = response.error {
                        return Err(BlockchainError::RpcResponse {
                            method,
                            code: error.code,
                            message: error.message,
                        });
                    }
                    return Ok(response.result.unwrap_or(Value::Null));
                }
                Ok(Err(e)) => {
                    tracing::warn!(endpoint_idx = i, method, error = %e, "RPC error, trying next endpoint");
                }
                Err(_) => {
                    timeouts += 1;
                    tracing::warn!(endpoint_idx = i, method, "RPC timeout, trying next endpoint");
                }
            }
        }
        if timeouts == self.endpoints.len() {
            return Err(BlockchainError::Timeout(self.config.rpc_timeout_secs));
        }
        Err(BlockchainError::Rpc(format!("All RPC endpoints failed for {}", method)))
    }

    async fn call_as<R: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Value,
    ) -> BlockchainResult<R> {
        let value = self.call(method, params).await?;
        Ok(serde_json::from_value(value)?)
    }
}

fn address_param(address: Address) -> String {
    hex::encode(address)
}

/// The node reports unknown accounts as an error rather than a zero balance.
fn is_unknown_account(err: &BlockchainError) -> bool {
    matches!(err, BlockchainError::RpcResponse { message, .. } if message.contains("not created"))
}

/// A transaction not yet in a block is reported as "Txn Hash not Present".
fn is_pending_transaction(err: &BlockchainError) -> bool {
    matches!(
        err,
        BlockchainError::RpcResponse { message, .. }
            if message.to_ascii_lowercase().contains("not present")
    )
}

impl NetworkClient for ZilliqaClient {
    async fn get_balance(&self, address: Address) -> BlockchainResult<AccountState> {
        match self
            .call_as::<BalanceResult>("GetBalance", json!([address_param(address)]))
            .await
        {
            Ok(result) => Ok(AccountState {
                balance: parse_qa(&result.balance)?,
                nonce: result.nonce,
            }),
            Err(e) if is_unknown_account(&e) => {
                tracing::debug!(address = %address, "Account not created yet");
                Ok(AccountState::default())
            }
            Err(e) => Err(e),
        }
    }

    async fn get_minimum_gas_price(&self) -> BlockchainResult<U256> {
        let price: String = self.call_as("GetMinimumGasPrice", json!([])).await?;
        parse_qa(&price)
    }

    async fn get_smart_contract_state(&self, address: Address) -> BlockchainResult<Value> {
        self.call("GetSmartContractState", json!([address_param(address)]))
            .await
    }

    async fn create_transaction(&self, tx: &SignedTransaction) -> BlockchainResult<TranId> {
        let result: CreateTransactionResult = self
            .call_as("CreateTransaction", json!([tx.to_params()]))
            .await?;
        tracing::debug!(
            tran_id = %result.tran_id,
            info = result.info.as_deref().unwrap_or_default(),
            "Transaction accepted"
        );
        Ok(result.tran_id)
    }

    async fn get_transaction(&self, id: &TranId) -> BlockchainResult<Option<TransactionRecord>> {
        match self.call_as("GetTransaction", json!([id.0])).await {
            Ok(record) => Ok(Some(record)),
            Err(e) if is_pending_transaction(&e) => {
                tracing::trace!(tran_id = %id, "Transaction not present");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn get_contract_address_from_transaction(
        &self,
        id: &TranId,
    ) -> BlockchainResult<Address> {
        let address: String = self
            .call_as("GetContractAddressFromTransactionID", json!([id.0]))
            .await?;
        address
            .parse()
            .map_err(|e| BlockchainError::Rpc(format!("Invalid contract address '{}': {}", address, e)))
    }
}

impl std::fmt::Debug for ZilliqaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZilliqaClient")
            .field("rpc_url", &self.config.rpc_url())
            .field("namespace", &self.config.namespace)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
