//! In-process development network
//!
//! Plays the role of the local `hardhat` network: contracts are deployed
//! from the well-known dev account and live only for the current process.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;
use tracing::{debug, info};

use crate::{
    address::Address,
    color::ColorCode,
    contract::{ColorNft, ContractError, MintReceipt, TokenId},
};

/// Account #0 of the standard development mnemonic.
pub const DEV_DEPLOYER: Address = Address::from_bytes([
    0xf3, 0x9f, 0xd6, 0xe5, 0x1a, 0xad, 0x88, 0xf6, 0xf4, 0xce, 0x6a, 0xb8, 0x82, 0x72, 0x79, 0xcf,
    0xff, 0xb9, 0x22, 0x66,
]);

pub const DEV_CHAIN_ID: u64 = 31337;

/// Constructor arguments of the Chain contract
#[derive(Debug, Clone)]
pub struct ChainDeployArgs {
    pub color_contract: Address,
    pub is_testnet: bool,
}

#[derive(Debug)]
pub struct LocalNetwork {
    chain_id: u64,
    deployer: Address,
    nonce: u64,
}

impl LocalNetwork {
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id, deployer: DEV_DEPLOYER, nonce: 0 }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn deployer(&self) -> Address {
        self.deployer
    }

    /// Deploy a fresh Chain contract and wait for it to be live.
    pub fn deploy_chain(&mut self, args: ChainDeployArgs) -> LocalChain {
        let address = contract_address(&self.deployer, self.nonce);
        self.nonce += 1;
        info!(%address, color_contract = %args.color_contract, "Chain contract deployed");
        LocalChain { address, args, next_token_id: 0, tokens: BTreeMap::new() }
    }
}

impl Default for LocalNetwork {
    fn default() -> Self {
        Self::new(DEV_CHAIN_ID)
    }
}

/// Deterministic per-deployment address. Not the CREATE derivation, only
/// unique per (deployer, nonce).
fn contract_address(deployer: &Address, nonce: u64) -> Address {
    let mut bytes = *deployer.as_bytes();
    bytes[0] ^= 0xc0;
    for (b, n) in bytes[12..].iter_mut().zip(nonce.to_be_bytes()) {
        *b ^= n;
    }
    Address::from_bytes(bytes)
}

#[derive(Debug, Clone)]
struct Token {
    owner: Address,
    color: ColorCode,
}

/// A deployed Chain contract on the [`LocalNetwork`]
#[derive(Debug)]
pub struct LocalChain {
    address: Address,
    args: ChainDeployArgs,
    next_token_id: TokenId,
    tokens: BTreeMap<TokenId, Token>,
}

impl LocalChain {
    pub fn color_contract(&self) -> Address {
        self.args.color_contract
    }

    pub fn is_testnet(&self) -> bool {
        self.args.is_testnet
    }

    pub fn owner_of(&self, token_id: TokenId) -> Option<Address> {
        self.tokens.get(&token_id).map(|t| t.owner)
    }

    pub fn balance_of(&self, owner: &Address) -> usize {
        self.tokens.values().filter(|t| t.owner == *owner).count()
    }

    fn metadata_json(token_id: TokenId, token: &Token) -> serde_json::Value {
        let hex = token.color.hex();
        let svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"300\" height=\"300\">\
             <rect width=\"300\" height=\"300\" fill=\"{hex}\"/></svg>"
        );
        json!({
            "name": format!("Chain #{token_id}"),
            "description": format!("Chain link in color {hex}"),
            "attributes": [{ "trait_type": "Color", "value": hex }],
            "image": format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg)),
        })
    }
}

impl ColorNft for LocalChain {
    fn address(&self) -> Address {
        self.address
    }

    async fn mint(&mut self, to: Address, color: &ColorCode) -> Result<MintReceipt, ContractError> {
        if to.is_zero() {
            return Err(ContractError::MintToZeroAddress);
        }
        let token_id = self.next_token_id;
        self.next_token_id += 1;
        self.tokens.insert(token_id, Token { owner: to, color: *color });
        debug!(token_id, %to, color = %color, "mint confirmed");
        Ok(MintReceipt { token_id, to, color: *color })
    }

    async fn next_token_id(&self) -> Result<TokenId, ContractError> {
        Ok(self.next_token_id)
    }

    async fn token_uri(&self, token_id: TokenId) -> Result<String, ContractError> {
        let token = self.tokens.get(&token_id).ok_or(ContractError::NonexistentToken(token_id))?;
        let json = serde_json::to_vec(&Self::metadata_json(token_id, token))
            .map_err(|e| ContractError::Encoding(e.to_string()))?;
        Ok(format!("data:application/json;base64,{}", STANDARD.encode(json)))
    }
}
