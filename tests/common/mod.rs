//! Shared utilities for integration testing.

#![allow(dead_code)]

use alloy::primitives::{Address, U256};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use tyronzil::blockchain::{
    AccountState, BlockchainError, BlockchainResult, NetworkClient, Receipt, SignedTransaction,
    TranId, TransactionRecord,
};
use tyronzil::config::ConfirmationConfig;
use tyronzil::contract::ContractInit;
use tyronzil::orchestrator::SessionSettings;

// Anvil's well-known test accounts; publicly known, never for real funds.
pub const CLIENT_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const USER_KEY: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

pub fn client_addr() -> Address {
    "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".parse().unwrap()
}

pub fn user_addr() -> Address {
    "0x70997970c51812dc3a010c7d01b50e0d17dc79c8".parse().unwrap()
}

pub fn registry_addr() -> Address {
    Address::repeat_byte(0x77)
}

pub fn contract_addr() -> Address {
    Address::repeat_byte(0x42)
}

pub const ZIL: u64 = 1_000_000_000_000;

pub fn contract_init() -> ContractInit {
    ContractInit {
        tyron_init: registry_addr(),
        contract_owner: user_addr(),
        client_addr: client_addr(),
        tyron_stake: U256::from(100 * ZIL),
    }
}

pub fn settings() -> SessionSettings {
    SessionSettings {
        version: (333 << 16) + 1,
        gas_limit: 10_000,
        confirmation: ConfirmationConfig {
            attempts: 3,
            interval_ms: 1,
        },
    }
}

/// How the mock answers transaction lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmations {
    /// Every broadcast gets a successful receipt with this gas.
    Succeed(u64),
    /// Every broadcast gets a failed receipt.
    Fail,
    /// Lookups never find the transaction.
    Never,
    /// The broadcast itself is refused.
    Reject,
}

/// Scripted network double that records every broadcast.
pub struct MockNetwork {
    pub gas_price: U256,
    pub accounts: Mutex<HashMap<Address, AccountState>>,
    pub states: Mutex<HashMap<Address, Value>>,
    pub confirmations: Mutex<Confirmations>,
    /// Per-broadcast override of `confirmations`, consumed in order.
    pub scripted: Mutex<Vec<Confirmations>>,
    pub broadcasts: Mutex<Vec<SignedTransaction>>,
    pub receipts: Mutex<HashMap<TranId, Receipt>>,
    pub lookups: Mutex<u32>,
    pub deployed_addr: Address,
    pub fail_broadcast: Mutex<bool>,
    pub fail_address_lookup: Mutex<bool>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self {
            gas_price: U256::from(2_000_000_000u64),
            accounts: Mutex::new(HashMap::new()),
            states: Mutex::new(HashMap::new()),
            confirmations: Mutex::new(Confirmations::Succeed(500)),
            scripted: Mutex::new(Vec::new()),
            broadcasts: Mutex::new(Vec::new()),
            receipts: Mutex::new(HashMap::new()),
            lookups: Mutex::new(0),
            deployed_addr: contract_addr(),
            fail_broadcast: Mutex::new(false),
            fail_address_lookup: Mutex::new(false),
        }
    }

    /// A network where both signers are funded and the contract charges `cost`.
    pub fn funded(cost: u64) -> Self {
        let mock = Self::new();
        mock.set_account(client_addr(), 150 * ZIL, 4);
        mock.set_account(user_addr(), 30 * ZIL, 9);
        mock.set_state(contract_addr(), serde_json::json!({"operation_cost": cost.to_string()}));
        mock
    }

    pub fn set_account(&self, address: Address, balance: u64, nonce: u64) {
        self.accounts.lock().unwrap().insert(
            address,
            AccountState {
                balance: U256::from(balance),
                nonce,
            },
        );
    }

    pub fn set_state(&self, address: Address, state: Value) {
        self.states.lock().unwrap().insert(address, state);
    }

    pub fn set_confirmations(&self, confirmations: Confirmations) {
        *self.confirmations.lock().unwrap() = confirmations;
    }

    pub fn script(&self, sequence: Vec<Confirmations>) {
        *self.scripted.lock().unwrap() = sequence;
    }

    pub fn broadcasts(&self) -> Vec<SignedTransaction> {
        self.broadcasts.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> u32 {
        *self.lookups.lock().unwrap()
    }
}

impl NetworkClient for MockNetwork {
    async fn get_balance(&self, address: Address) -> BlockchainResult<AccountState> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .get(&address)
            .copied()
            .unwrap_or_default())
    }

    async fn get_minimum_gas_price(&self) -> BlockchainResult<U256> {
        Ok(self.gas_price)
    }

    async fn get_smart_contract_state(&self, address: Address) -> BlockchainResult<Value> {
        self.states
            .lock()
            .unwrap()
            .get(&address)
            .cloned()
            .ok_or_else(|| BlockchainError::RpcResponse {
                method: "GetSmartContractState",
                code: -5,
                message: "Address not contract address".to_string(),
            })
    }

    async fn create_transaction(&self, tx: &SignedTransaction) -> BlockchainResult<TranId> {
        if *self.fail_broadcast.lock().unwrap() {
            return Err(BlockchainError::Rpc("broadcast rejected".to_string()));
        }

        let behaviour = {
            let mut scripted = self.scripted.lock().unwrap();
            if scripted.is_empty() {
                *self.confirmations.lock().unwrap()
            } else {
                scripted.remove(0)
            }
        };
        if behaviour == Confirmations::Reject {
            return Err(BlockchainError::Rpc("broadcast rejected".to_string()));
        }

        let mut broadcasts = self.broadcasts.lock().unwrap();
        broadcasts.push(tx.clone());
        let id = TranId(format!("tx{}", broadcasts.len()));

        let receipt = match behaviour {
            Confirmations::Succeed(gas) => Some(Receipt {
                success: true,
                cumulative_gas: gas,
                errors: None,
            }),
            Confirmations::Fail => Some(Receipt {
                success: false,
                cumulative_gas: 10,
                errors: Some(serde_json::json!({"0": [7]})),
            }),
            Confirmations::Never | Confirmations::Reject => None,
        };
        if let Some(receipt) = receipt {
            self.receipts.lock().unwrap().insert(id.clone(), receipt);
        }
        Ok(id)
    }

    async fn get_transaction(&self, id: &TranId) -> BlockchainResult<Option<TransactionRecord>> {
        *self.lookups.lock().unwrap() += 1;
        Ok(self
            .receipts
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .map(|receipt| TransactionRecord {
                id: id.clone(),
                receipt: Some(receipt),
            }))
    }

    async fn get_contract_address_from_transaction(
        &self,
        _id: &TranId,
    ) -> BlockchainResult<Address> {
        if *self.fail_address_lookup.lock().unwrap() {
            return Err(BlockchainError::RpcResponse {
                method: "GetContractAddressFromTransactionID",
                code: -5,
                message: "ID is not a contract txn".to_string(),
            });
        }
        Ok(self.deployed_addr)
    }
}

/// Start a JSON-RPC backend that answers every request with `body`.
///
/// Returns the bound address. The request is read in full before answering.
pub async fn start_rpc_backend(body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        read_request(&mut socket).await;
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                return;
            }
        }
    }
}
