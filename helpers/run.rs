//! One deploy-and-mint run against a [`ColorNft`] contract

use rand::Rng;
use tracing::info;

use crate::{
    address::Address,
    color::{ColorCode, ColorRegistry},
    contract::{ColorNft, TokenId},
    metadata::TokenMetadata,
    mint::MintRange,
    ScriptError,
};

/// What a run mints and to whom
#[derive(Debug, Clone)]
pub struct MintPlan {
    pub recipient: Address,
    pub range: MintRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintedToken {
    pub token_id: TokenId,
    pub color: ColorCode,
}

#[derive(Debug, Clone)]
pub struct MintReport {
    pub contract: Address,
    pub recipient: Address,
    pub minted: Vec<MintedToken>,
    pub last_token_id: TokenId,
    pub token_uri: String,
    pub metadata: TokenMetadata,
}

/// Mint a random number of uniquely colored tokens to the plan's recipient,
/// then read back the last minted token.
///
/// Mints run one after another, each waiting for the previous to confirm.
/// A failed mint ends the run with [`ScriptError::MintInterrupted`], which
/// carries the tokens confirmed before it.
pub async fn mint_random_colors<C, R>(
    contract: &mut C,
    rng: &mut R,
    plan: &MintPlan,
) -> Result<MintReport, ScriptError>
where
    C: ColorNft,
    R: Rng + ?Sized,
{
    let count = plan.range.sample(rng);
    info!(
        count,
        min = plan.range.min(),
        max = plan.range.max(),
        recipient = %plan.recipient,
        "minting random colors"
    );

    let mut colors = ColorRegistry::new();
    let mut minted = Vec::with_capacity(count);
    for _ in 0..count {
        let color = colors.issue(rng)?;
        let receipt = match contract.mint(plan.recipient, &color).await {
            Ok(receipt) => receipt,
            Err(source) => return Err(ScriptError::MintInterrupted { minted, source }),
        };
        info!(
            token_id = receipt.token_id,
            "Minted NFT to {} with color {}",
            plan.recipient,
            color.hex()
        );
        minted.push(MintedToken { token_id: receipt.token_id, color });
    }

    let last_token_id = contract
        .next_token_id()
        .await?
        .checked_sub(1)
        .ok_or(ScriptError::NothingMinted)?;
    let token_uri = contract.token_uri(last_token_id).await?;
    let metadata = TokenMetadata::from_token_uri(&token_uri)?;

    Ok(MintReport {
        contract: contract.address(),
        recipient: plan.recipient,
        minted,
        last_token_id,
        token_uri,
        metadata,
    })
}
