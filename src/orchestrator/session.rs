//! Session setup: signer validation and gas parameters.

use alloy::primitives::{Address, U256};

use crate::blockchain::network::NetworkClient;
use crate::blockchain::transaction::{confirm, TxEnvelope};
use crate::blockchain::types::{
    format_zil, BlockchainError, BlockchainResult, ConfirmationConfig, GasParams, Role,
    QA_PER_ZIL,
};
use crate::blockchain::wallet::Wallet;
use crate::config::TyronConfig;
use crate::contract::ContractInit;
use crate::did::TransitionTag;
use crate::orchestrator::outcome::TransactionOutcome;

/// Minimum user balance: the cost of deploying and initializing a contract.
pub const USER_INIT_COST: u64 = 20 * QA_PER_ZIL;

/// Per-session settings taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Transaction version (chain ID and message version).
    pub version: u32,
    pub gas_limit: u64,
    pub confirmation: ConfirmationConfig,
}

impl SessionSettings {
    pub fn from_config(config: &TyronConfig) -> Self {
        Self {
            version: config.network.version(),
            gas_limit: config.gas.limit,
            confirmation: config.confirmation,
        }
    }
}

/// Validated signers, nonces and gas for a sequence of submissions.
///
/// Nonces are read once in [`TyronSession::initialize`] and advanced locally
/// after every accepted broadcast. Two sessions for the same signer must not
/// run at the same time.
#[derive(Debug)]
pub struct TyronSession<N> {
    network: N,
    settings: SessionSettings,
    init: ContractInit,
    gas: GasParams,
    client: Wallet,
    user: Option<Wallet>,
}

impl<N: NetworkClient> TyronSession<N> {
    /// Validate the client (and optionally user) key against `init` and
    /// check both accounts can pay.
    ///
    /// # Errors
    /// - [`BlockchainError::IdentityMismatch`] if a key does not derive the
    ///   address recorded for its role
    /// - [`BlockchainError::InsufficientBalance`] if the client holds less
    ///   than the stake, or the user less than [`USER_INIT_COST`]
    pub async fn initialize(
        network: N,
        settings: SessionSettings,
        init: ContractInit,
        client_key: &str,
        user_key: Option<&str>,
    ) -> BlockchainResult<Self> {
        let price = network.get_minimum_gas_price().await?;
        tracing::info!(
            gas_price_zil = %format_zil(&price),
            "Retrieved minimum gas price from the network"
        );
        let gas = GasParams {
            price,
            limit: settings.gas_limit,
        };

        let client = validate_signer(
            &network,
            Role::Client,
            client_key,
            init.client_addr,
            init.tyron_stake,
        )
        .await?;

        let user = match user_key {
            Some(key) => Some(
                validate_signer(
                    &network,
                    Role::User,
                    key,
                    init.contract_owner,
                    U256::from(USER_INIT_COST),
                )
                .await?,
            ),
            None => None,
        };

        Ok(Self {
            network,
            settings,
            init,
            gas,
            client,
            user,
        })
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn init(&self) -> &ContractInit {
        &self.init
    }

    pub fn gas(&self) -> GasParams {
        self.gas
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn client(&self) -> &Wallet {
        &self.client
    }

    pub fn user(&self) -> Option<&Wallet> {
        self.user.as_ref()
    }

    /// Sign, broadcast and confirm one transaction from `wallet`.
    ///
    /// The wallet's nonce advances once the network accepts the broadcast,
    /// whatever the confirmation result.
    pub(crate) async fn send(
        &self,
        wallet: &Wallet,
        to_addr: Address,
        amount: U256,
        code: String,
        data: String,
        tag: Option<TransitionTag>,
    ) -> BlockchainResult<TransactionOutcome> {
        let nonce = wallet.next_nonce();
        let envelope = TxEnvelope {
            version: self.settings.version,
            nonce,
            to_addr,
            amount,
            pub_key: wallet.public_key_hex(),
            gas: self.gas,
            code,
            data,
            priority: false,
        };
        let signed = envelope.sign(wallet).await?;

        let tran_id = self.network.create_transaction(&signed).await?;
        wallet.increment_nonce();
        tracing::info!(tran_id = %tran_id, nonce, to = %to_addr, "Transaction broadcast");

        let status = confirm(&self.network, &tran_id, &self.settings.confirmation).await?;
        tracing::info!(
            tran_id = %tran_id,
            confirmed = status.is_confirmed(),
            cumulative_gas = ?status.cumulative_gas(),
            "Transaction settled"
        );

        Ok(TransactionOutcome {
            tag,
            tran_id,
            nonce,
            status,
        })
    }
}

async fn validate_signer<N: NetworkClient>(
    network: &N,
    role: Role,
    private_key: &str,
    expected: Address,
    threshold: U256,
) -> BlockchainResult<Wallet> {
    let wallet = Wallet::from_private_key(private_key)?;
    let actual = wallet.address();
    if actual != expected {
        return Err(BlockchainError::IdentityMismatch {
            role,
            expected,
            actual,
        });
    }

    let account = network.get_balance(actual).await?;
    if account.balance < threshold {
        return Err(BlockchainError::InsufficientBalance {
            role,
            balance: account.balance,
            required: threshold,
        });
    }

    wallet.set_nonce(account.nonce);
    tracing::info!(
        %role,
        address = %actual,
        balance_zil = %format_zil(&account.balance),
        nonce = account.nonce,
        "Signer validated"
    );
    Ok(wallet)
}
