//! Interface to a deployed Chain color contract

use thiserror::Error;

use crate::{address::Address, color::ColorCode};

pub type TokenId = u64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContractError {
    #[error("cannot mint to the zero address")]
    MintToZeroAddress,
    #[error("token {0} does not exist")]
    NonexistentToken(TokenId),
    #[error("token URI encoding failed: {0}")]
    Encoding(String),
}

/// Outcome of a confirmed mint transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub token_id: TokenId,
    pub to: Address,
    pub color: ColorCode,
}

/// Calls the script makes against a deployed contract.
///
/// Each call resolves once the transaction (or view) has completed.
#[allow(async_fn_in_trait)]
pub trait ColorNft {
    /// Where the contract is deployed.
    fn address(&self) -> Address;

    async fn mint(&mut self, to: Address, color: &ColorCode) -> Result<MintReceipt, ContractError>;

    /// Id the next mint will receive.
    async fn next_token_id(&self) -> Result<TokenId, ContractError>;

    async fn token_uri(&self, token_id: TokenId) -> Result<String, ContractError>;
}
