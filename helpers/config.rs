//! Network and deployment configuration
//!
//! Settings are layered: the shipped `chain.toml` defaults, then an optional
//! user file, then `CHAIN__`-prefixed environment variables
//! (e.g. `CHAIN__DEPLOY__RECIPIENT` maps to `deploy.recipient`).

use std::{collections::BTreeMap, path::Path};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{address::Address, mint::MintRange};

const DEFAULT_CONFIG: &str = include_str!("../chain.toml");
const ENV_PREFIX: &str = "CHAIN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("unknown network `{name}` (configured: {known})")]
    UnknownNetwork { name: String, known: String },
    #[error("invalid mint range: min_mints {min} is greater than max_mints {max}")]
    InvalidMintRange { min: usize, max: usize },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub default_network: String,
    pub deploy: DeployConfig,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
}

/// Parameters of the deploy-and-mint run
#[derive(Debug, Clone, Deserialize)]
pub struct DeployConfig {
    /// Color contract the Chain contract is bound to.
    pub color_contract: Address,
    pub is_testnet: bool,
    /// Receives every minted token.
    pub recipient: Address,
    pub min_mints: usize,
    pub max_mints: usize,
}

impl DeployConfig {
    pub fn mint_range(&self) -> Result<MintRange, ConfigError> {
        MintRange::new(self.min_mints, self.max_mints).ok_or(ConfigError::InvalidMintRange {
            min: self.min_mints,
            max: self.max_mints,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkConfig {
    /// RPC endpoint. Absent for the in-process network.
    pub url: Option<String>,
    pub chain_id: Option<u64>,
    /// Gas price in wei.
    pub gas_price: Option<u64>,
    pub explorer: Option<ExplorerConfig>,
}

impl NetworkConfig {
    pub fn is_in_process(&self) -> bool {
        self.url.is_none()
    }
}

/// Block explorer endpoints for a network
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerConfig {
    pub api_url: String,
    pub browser_url: String,
}

impl ExplorerConfig {
    /// Browser page listing the transactions of `address`.
    pub fn transactions_url(&self, address: &Address) -> String {
        format!("{}/address/{address}/transactions", self.browser_url.trim_end_matches('/'))
    }
}

impl ProjectConfig {
    /// Look up a network by name, falling back to `default_network`.
    pub fn network(&self, name: Option<&str>) -> Result<(&str, &NetworkConfig), ConfigError> {
        let name = name.unwrap_or(&self.default_network);
        self.networks
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| ConfigError::UnknownNetwork {
                name: name.to_string(),
                known: self.networks.keys().cloned().collect::<Vec<_>>().join(", "),
            })
    }

    /// The shipped `chain.toml`, without file or environment overrides.
    pub fn builtin() -> Result<Self, ConfigError> {
        Ok(Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()?
            .try_deserialize()?)
    }
}

/// Load the project configuration.
///
/// `path`, when given, must exist and overlays the built-in defaults.
/// Environment variables prefixed with `CHAIN__` are applied last.
///
/// # Errors
/// Returns [`ConfigError::Load`] if the file is missing or the merged
/// settings do not deserialize, and [`ConfigError::InvalidMintRange`] if
/// `min_mints > max_mints`.
pub fn load_config(path: Option<&Path>) -> Result<ProjectConfig, ConfigError> {
    let mut builder =
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    if let Some(path) = path {
        info!("Loading config from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    let config: ProjectConfig = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    config.deploy.mint_range()?;
    debug!(
        default_network = %config.default_network,
        networks = config.networks.len(),
        "configuration loaded"
    );
    Ok(config)
}
