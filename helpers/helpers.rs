//! Common helpers for the color minting scripts and tests

pub mod address;
pub mod color;
pub mod config;
pub mod contract;
pub mod devnet;
pub mod logging;
pub mod metadata;
pub mod mint;
pub mod run;

pub use crate::address::{Address, AddressError};
pub use crate::color::{next_color, ColorCode, ColorError, ColorRegistry};
pub use crate::config::{load_config, ConfigError, DeployConfig, NetworkConfig, ProjectConfig};
pub use crate::contract::{ColorNft, ContractError, MintReceipt, TokenId};
pub use crate::devnet::{ChainDeployArgs, LocalChain, LocalNetwork};
pub use crate::metadata::{MetadataError, TokenMetadata};
pub use crate::mint::MintRange;
pub use crate::run::{mint_random_colors, MintPlan, MintReport, MintedToken};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Contract(#[from] ContractError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error("mint failed after {} confirmed mints: {source}", .minted.len())]
    MintInterrupted { minted: Vec<MintedToken>, source: ContractError },
    #[error("network `{name}` is served over RPC at {url}; only the in-process network is supported")]
    RemoteNetwork { name: String, url: String },
    #[error("no token was minted")]
    NothingMinted,
}

/// Script setup: the selected network and the deploy/mint parameters
#[derive(Debug)]
pub struct ScriptSetup {
    pub network_name: String,
    pub network: NetworkConfig,
    pub local: LocalNetwork,
    pub deploy: DeployConfig,
    pub mint_range: MintRange,
}

impl ScriptSetup {
    /// Deploy the Chain contract with the configured constructor arguments.
    pub fn deploy_chain(&mut self) -> LocalChain {
        self.local.deploy_chain(ChainDeployArgs {
            color_contract: self.deploy.color_contract,
            is_testnet: self.deploy.is_testnet,
        })
    }

    pub fn plan(&self) -> MintPlan {
        MintPlan { recipient: self.deploy.recipient, range: self.mint_range }
    }

    /// Explorer page for the contract's transactions, when the network has an explorer.
    pub fn explorer_url(&self, contract: &Address) -> Option<String> {
        self.network.explorer.as_ref().map(|e| e.transactions_url(contract))
    }
}

/// Resolve `network` (or the configured default) and prepare a script run.
pub fn setup_script(
    config: &ProjectConfig,
    network: Option<&str>,
) -> Result<ScriptSetup, ScriptError> {
    let (name, network) = config.network(network)?;
    if let Some(url) = &network.url {
        return Err(ScriptError::RemoteNetwork { name: name.to_string(), url: url.clone() });
    }

    let local = LocalNetwork::new(network.chain_id.unwrap_or(devnet::DEV_CHAIN_ID));
    info!(network = name, chain_id = local.chain_id(), "using in-process network");

    Ok(ScriptSetup {
        network_name: name.to_string(),
        network: network.clone(),
        local,
        deploy: config.deploy.clone(),
        mint_range: config.deploy.mint_range()?,
    })
}
