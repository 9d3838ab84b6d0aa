//! JSON-RPC client behaviour against a local mock endpoint.

use alloy::primitives::{Address, U256};

use tyronzil::blockchain::{confirm, BlockchainError, NetworkClient, TranId, ZilliqaClient};
use tyronzil::config::{ConfirmationConfig, NetworkConfig};

mod common;

fn client_for(urls: &[String]) -> ZilliqaClient {
    let config = NetworkConfig {
        rpc_url: Some(urls[0].clone()),
        failover_urls: urls[1..].to_vec(),
        rpc_timeout_secs: 5,
        system_proxy: false,
        ..NetworkConfig::default()
    };
    ZilliqaClient::new(config).unwrap()
}

#[tokio::test]
async fn test_get_balance() {
    let addr = common::start_rpc_backend(
        r#"{"id":"1","jsonrpc":"2.0","result":{"balance":"150000000000000","nonce":12}}"#,
    )
    .await;
    let client = client_for(&[format!("http://{}", addr)]);

    let account = client.get_balance(Address::ZERO).await.unwrap();
    assert_eq!(account.balance, U256::from(150_000_000_000_000u64));
    assert_eq!(account.nonce, 12);
}

#[tokio::test]
async fn test_unknown_account_is_empty() {
    let addr = common::start_rpc_backend(
        r#"{"id":"1","jsonrpc":"2.0","error":{"code":-5,"message":"Account is not created","data":null}}"#,
    )
    .await;
    let client = client_for(&[format!("http://{}", addr)]);

    let account = client.get_balance(Address::ZERO).await.unwrap();
    assert_eq!(account.balance, U256::ZERO);
    assert_eq!(account.nonce, 0);
}

#[tokio::test]
async fn test_failover_to_second_endpoint() {
    let addr = common::start_rpc_backend(r#"{"id":"1","jsonrpc":"2.0","result":"2000000000"}"#).await;
    // Nothing listens on port 1.
    let client = client_for(&["http://127.0.0.1:1".to_string(), format!("http://{}", addr)]);

    let price = client.get_minimum_gas_price().await.unwrap();
    assert_eq!(price, U256::from(2_000_000_000u64));
}

#[tokio::test]
async fn test_rpc_error_is_not_retried_elsewhere() {
    let addr = common::start_rpc_backend(
        r#"{"id":"1","jsonrpc":"2.0","error":{"code":-8,"message":"Invalid params"}}"#,
    )
    .await;
    let client = client_for(&[format!("http://{}", addr)]);

    let result = client.get_minimum_gas_price().await;
    match result {
        Err(BlockchainError::RpcResponse { method, code, .. }) => {
            assert_eq!(method, "GetMinimumGasPrice");
            assert_eq!(code, -8);
        }
        other => panic!("expected RPC error object, got {:?}", other),
    }
}

#[tokio::test]
async fn test_pending_transaction() {
    let addr = common::start_rpc_backend(
        r#"{"id":"1","jsonrpc":"2.0","error":{"code":-20,"message":"Txn Hash not Present"}}"#,
    )
    .await;
    let client = client_for(&[format!("http://{}", addr)]);

    let record = client.get_transaction(&TranId("abc".to_string())).await.unwrap();
    assert!(record.is_none());
}

#[tokio::test]
async fn test_transaction_lookup_error_is_not_pending() {
    let addr = common::start_rpc_backend(
        r#"{"id":"1","jsonrpc":"2.0","error":{"code":-8,"message":"Invalid params"}}"#,
    )
    .await;
    let client = client_for(&[format!("http://{}", addr)]);
    let tran_id = TranId("not-a-hash".to_string());

    let result = client.get_transaction(&tran_id).await;
    assert!(matches!(
        result,
        Err(BlockchainError::RpcResponse { method: "GetTransaction", code: -8, .. })
    ));

    // Confirmation stops at the first lookup instead of spending the budget.
    let policy = ConfirmationConfig {
        attempts: 3,
        interval_ms: 1,
    };
    let status = confirm(&client, &tran_id, &policy).await;
    assert!(matches!(status, Err(BlockchainError::RpcResponse { code: -8, .. })));
}

#[tokio::test]
async fn test_found_transaction() {
    let addr = common::start_rpc_backend(
        r#"{"id":"1","jsonrpc":"2.0","result":{"ID":"abc","receipt":{"cumulative_gas":"635","success":true}}}"#,
    )
    .await;
    let client = client_for(&[format!("http://{}", addr)]);

    let record = client.get_transaction(&TranId("abc".to_string())).await.unwrap().unwrap();
    let receipt = record.receipt.unwrap();
    assert!(receipt.success);
    assert_eq!(receipt.cumulative_gas, 635);
}

#[tokio::test]
async fn test_contract_address_from_transaction() {
    let addr = common::start_rpc_backend(
        r#"{"id":"1","jsonrpc":"2.0","result":"4242424242424242424242424242424242424242"}"#,
    )
    .await;
    let client = client_for(&[format!("http://{}", addr)]);

    let contract = client
        .get_contract_address_from_transaction(&TranId("abc".to_string()))
        .await
        .unwrap();
    assert_eq!(contract, Address::repeat_byte(0x42));
}
