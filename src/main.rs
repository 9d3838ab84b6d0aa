//! tyronzil command-line client.
//!
//! ```text
//! tyronzil did create     --did <DID> --doc-file <F> --update-commitment <C> --recovery-commitment <C>
//!                         (--contract <ADDR> | --deploy <VERSION> [--code-file <F>])
//! tyronzil did resolve    --contract <ADDR>
//! tyronzil did update     --contract <ADDR> --update-commitment <C> --doc-file <F> --new-update-commitment <C>
//! tyronzil did recover    --contract <ADDR> --recovery-commitment <C> --doc-file <F>
//!                         --new-update-commitment <C> --new-recovery-commitment <C>
//! tyronzil did deactivate --contract <ADDR> --recovery-commitment <C>
//! ```
//!
//! Keys come from `TYRON_CLIENT_PRIVATE_KEY` / `TYRON_USER_PRIVATE_KEY` or
//! `--client-key` / `--user-key`.

use alloy::primitives::Address;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tyronzil::blockchain::wallet::{CLIENT_KEY_ENV_VAR, USER_KEY_ENV_VAR};
use tyronzil::blockchain::{BlockchainError, BlockchainResult, ZilliqaClient};
use tyronzil::config::{load_config, TyronConfig};
use tyronzil::contract::{ContractInit, FileSource, RegistrySource};
use tyronzil::did::{operations, TransitionParam, TransitionTag};
use tyronzil::observability::init_logging;
use tyronzil::orchestrator::{resolve, DeployOutcome, SessionSettings, TyronSession};
use tyronzil::report;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "tyronzil.toml";

#[derive(Parser)]
#[command(name = "tyronzil")]
#[command(about = "Decentralized identity client for the Zilliqa blockchain", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true, disable_help_subcommand = true)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a tyronZIL DID operation
    Did {
        #[command(subcommand)]
        operation: DidOperation,
    },
}

#[derive(Subcommand)]
enum DidOperation {
    /// Create a unique digital identity did:tyron:zil
    Create {
        #[arg(long)]
        did: String,
        #[command(flatten)]
        document: DocumentInput,
        #[arg(long)]
        update_commitment: String,
        #[arg(long)]
        recovery_commitment: String,
        /// Existing tyron-smart-contract to register the DID in
        #[arg(long, required_unless_present = "deploy", conflicts_with = "deploy")]
        contract: Option<Address>,
        /// Deploy a new tyron-smart-contract of this version first
        #[arg(long, value_name = "VERSION")]
        deploy: Option<String>,
        /// Deploy source from a local file instead of the registry
        #[arg(long, requires = "deploy")]
        code_file: Option<PathBuf>,
        #[command(flatten)]
        keys: Keys,
    },
    /// Resolve the given DID contract into its DID document
    Resolve {
        #[arg(long)]
        contract: Address,
    },
    /// Update the DID document
    Update {
        #[arg(long)]
        contract: Address,
        #[arg(long)]
        update_commitment: String,
        #[command(flatten)]
        document: DocumentInput,
        #[arg(long)]
        new_update_commitment: String,
        #[command(flatten)]
        keys: Keys,
    },
    /// Recover the DID and set new keys
    Recover {
        #[arg(long)]
        contract: Address,
        #[arg(long)]
        recovery_commitment: String,
        #[command(flatten)]
        document: DocumentInput,
        #[arg(long)]
        new_update_commitment: String,
        #[arg(long)]
        new_recovery_commitment: String,
        #[command(flatten)]
        keys: Keys,
    },
    /// Deactivate the DID
    Deactivate {
        #[arg(long)]
        contract: Address,
        #[arg(long)]
        recovery_commitment: String,
        #[command(flatten)]
        keys: Keys,
    },
}

#[derive(Args)]
struct Keys {
    /// Client private key (hex)
    #[arg(long, env = CLIENT_KEY_ENV_VAR, hide_env_values = true)]
    client_key: String,

    /// User private key (hex), needed to deploy
    #[arg(long, env = USER_KEY_ENV_VAR, hide_env_values = true)]
    user_key: Option<String>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct DocumentInput {
    /// DID document as inline JSON
    #[arg(long)]
    doc: Option<String>,

    /// File holding the DID document
    #[arg(long)]
    doc_file: Option<PathBuf>,
}

impl DocumentInput {
    /// The document exactly as given. A file loses only its final line ending.
    fn read(&self) -> std::io::Result<String> {
        match (&self.doc, &self.doc_file) {
            (Some(doc), _) => Ok(doc.clone()),
            (None, Some(path)) => {
                let mut doc = std::fs::read_to_string(path)?;
                if doc.ends_with('\n') {
                    doc.pop();
                    if doc.ends_with('\r') {
                        doc.pop();
                    }
                }
                Ok(doc)
            }
            (None, None) => Ok(String::new()),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match read_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error: failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let Commands::Did { operation } = cli.command;
    match run(operation, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "tyronZIL operation failed");
            ExitCode::FAILURE
        }
    }
}

fn read_config(path: Option<&Path>) -> Result<TyronConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            Ok(load_config(Path::new(DEFAULT_CONFIG_FILE))?)
        }
        None => Ok(TyronConfig::default()),
    }
}

async fn run(operation: DidOperation, config: &TyronConfig) -> Result<(), Box<dyn std::error::Error>> {
    match operation {
        DidOperation::Create {
            did,
            document,
            update_commitment,
            recovery_commitment,
            contract,
            deploy,
            code_file,
            keys,
        } => {
            let doc = document.read()?;
            let session = open_session(config, &keys).await?;

            let contract = match (contract, deploy) {
                (Some(contract), _) => contract,
                (None, Some(version)) => {
                    let outcome = deploy_contract(&session, code_file, &version).await?;
                    report::print_deploy(&outcome);
                    match outcome.contract_address {
                        Some(address) if outcome.is_initialized() => address,
                        _ => return Err("tyron-smart-contract is not ready for DidCreate".into()),
                    }
                }
                (None, None) => return Err("either --contract or --deploy is required".into()),
            };

            let params = operations::create(&did, &doc, &update_commitment, &recovery_commitment);
            submit(&session, contract, TransitionTag::Create, params).await?;
        }
        DidOperation::Resolve { contract } => {
            let network = ZilliqaClient::new(config.network.clone())?;
            let resolved = resolve(&network, contract).await?;
            report::print_resolved(&resolved);
        }
        DidOperation::Update {
            contract,
            update_commitment,
            document,
            new_update_commitment,
            keys,
        } => {
            let doc = document.read()?;
            let session = open_session(config, &keys).await?;
            let params = operations::update(&update_commitment, &doc, &new_update_commitment);
            submit(&session, contract, TransitionTag::Update, params).await?;
        }
        DidOperation::Recover {
            contract,
            recovery_commitment,
            document,
            new_update_commitment,
            new_recovery_commitment,
            keys,
        } => {
            let doc = document.read()?;
            let session = open_session(config, &keys).await?;
            let params = operations::recover(
                &recovery_commitment,
                &doc,
                &new_update_commitment,
                &new_recovery_commitment,
            );
            submit(&session, contract, TransitionTag::Recover, params).await?;
        }
        DidOperation::Deactivate {
            contract,
            recovery_commitment,
            keys,
        } => {
            let session = open_session(config, &keys).await?;
            let params = operations::deactivate(&recovery_commitment);
            submit(&session, contract, TransitionTag::Deactivate, params).await?;
        }
    }
    Ok(())
}

async fn open_session(config: &TyronConfig, keys: &Keys) -> BlockchainResult<TyronSession<ZilliqaClient>> {
    let network = ZilliqaClient::new(config.network.clone())?;
    let init = ContractInit::from_config(&config.contract)?;
    TyronSession::initialize(
        network,
        SessionSettings::from_config(config),
        init,
        &keys.client_key,
        keys.user_key.as_deref(),
    )
    .await
}

async fn deploy_contract(
    session: &TyronSession<ZilliqaClient>,
    code_file: Option<PathBuf>,
    version: &str,
) -> BlockchainResult<DeployOutcome> {
    match code_file {
        Some(path) => session.deploy(&FileSource::new(path), version).await,
        None => session.deploy(&RegistrySource, version).await,
    }
}

async fn submit(
    session: &TyronSession<ZilliqaClient>,
    contract: Address,
    tag: TransitionTag,
    params: Vec<TransitionParam>,
) -> Result<(), BlockchainError> {
    let outcome = session.submit(contract, tag, params).await?;
    report::print_transaction(&outcome);
    Ok(())
}
