//! Deploy the Chain contract and mint a random batch of colors
//!
//! Each mint is logged as it confirms. The explorer link is printed only
//! when the selected network configures an `explorer` table; none of the
//! shipped in-process networks do.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use helpers::{
    load_config, logging::{self, LevelFilter}, mint_random_colors, setup_script, Address,
    ColorNft, MintPlan,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "mint_colors", about = "Deploy the Chain contract and mint random colors")]
struct Args {
    /// Configuration file layered over the built-in chain.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Network to use instead of `default_network`.
    #[arg(long)]
    network: Option<String>,
    /// Override the configured recipient.
    #[arg(long)]
    recipient: Option<Address>,
    /// Seed the random source for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
    /// Write the last token's image to this file.
    #[arg(long)]
    image_out: Option<PathBuf>,
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.log_level)?;

    let config = load_config(args.config.as_deref())?;
    let mut setup = setup_script(&config, args.network.as_deref())?;

    let mut chain = setup.deploy_chain();
    println!("Chain Contract Deployed at {}", chain.address());
    info!(
        color_contract = %chain.color_contract(),
        is_testnet = chain.is_testnet(),
        "constructor arguments"
    );

    let plan = MintPlan {
        recipient: args.recipient.unwrap_or(setup.deploy.recipient),
        ..setup.plan()
    };
    let mut rng = match args.seed {
        Some(seed) => {
            info!(seed, "using seeded random source");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let report = mint_random_colors(&mut chain, &mut rng, &plan).await?;

    println!("Token ID of the last minted NFT: {}", report.last_token_id);
    println!("Token URI for token {}:", report.last_token_id);
    println!("{}", report.token_uri);

    if let Some(path) = &args.image_out {
        tokio::fs::write(path, &report.metadata.image)
            .await
            .with_context(|| format!("failed to write image to {}", path.display()))?;
        info!(path = %path.display(), "token image written");
    }

    if let Some(url) = setup.explorer_url(&report.contract) {
        println!("{url}");
    }

    Ok(())
}
