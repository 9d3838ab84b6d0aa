//! Deploying and initializing a user's tyron-smart-contract.

use alloy::primitives::{Address, U256};

use crate::blockchain::network::NetworkClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::contract::ContractSource;
use crate::did::{operations, Transition, TransitionTag};
use crate::orchestrator::outcome::DeployOutcome;
use crate::orchestrator::session::TyronSession;

impl<N: NetworkClient> TyronSession<N> {
    /// Deploy contract `version` for the user, then call `ContractInit` with
    /// the client address.
    ///
    /// Both transactions are signed by the user. Errors before the deployment
    /// is confirmed are returned as `Err`. After that the outcome is always
    /// returned: if the address lookup or the init call fails, or the init call
    /// is not confirmed, it has `is_initialized() == false` and the error, if
    /// any, in `failure`.
    pub async fn deploy<S: ContractSource>(
        &self,
        source: &S,
        version: &str,
    ) -> BlockchainResult<DeployOutcome> {
        let user = self.user().ok_or(BlockchainError::MissingUserKey)?;
        let init = self.init();

        let code = source
            .code(self.network(), init.tyron_init, version)
            .await?;
        let init_params = operations::init_params(init.tyron_init, init.contract_owner);
        let data = serde_json::to_string(&init_params)?;

        tracing::info!(version, owner = %init.contract_owner, "Deploying tyron-smart-contract");
        let deployment = self
            .send(user, Address::ZERO, U256::ZERO, code, data, None)
            .await?;

        if !deployment.is_confirmed() {
            tracing::warn!(tran_id = %deployment.tran_id, status = ?deployment.status, "Deployment not confirmed");
            return Ok(DeployOutcome {
                deployment,
                contract_address: None,
                initialization: None,
                failure: None,
            });
        }

        let contract = match self
            .network()
            .get_contract_address_from_transaction(&deployment.tran_id)
            .await
        {
            Ok(contract) => contract,
            Err(e) => {
                tracing::error!(tran_id = %deployment.tran_id, error = %e, "Deployed contract address lookup failed");
                return Ok(DeployOutcome {
                    deployment,
                    contract_address: None,
                    initialization: None,
                    failure: Some(e.to_string()),
                });
            }
        };
        tracing::info!(contract = %contract, "tyron-smart-contract deployed, calling ContractInit");

        let transition = Transition::new(
            TransitionTag::ContractInit,
            U256::ZERO,
            user.address(),
            operations::contract_init(init.client_addr),
        );
        let sent = match transition.to_json() {
            Ok(data) => {
                self.send(
                    user,
                    contract,
                    U256::ZERO,
                    String::new(),
                    data,
                    Some(TransitionTag::ContractInit),
                )
                .await
            }
            Err(e) => Err(e.into()),
        };

        let (initialization, failure) = match sent {
            Ok(initialization) => {
                if !initialization.is_confirmed() {
                    tracing::warn!(
                        contract = %contract,
                        tran_id = %initialization.tran_id,
                        "Contract deployed but ContractInit not confirmed"
                    );
                }
                (Some(initialization), None)
            }
            Err(e) => {
                tracing::error!(contract = %contract, error = %e, "Contract deployed but ContractInit failed");
                (None, Some(e.to_string()))
            }
        };

        Ok(DeployOutcome {
            deployment,
            contract_address: Some(contract),
            initialization,
            failure,
        })
    }
}
