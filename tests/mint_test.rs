use std::{collections::HashSet, io::Write};

use helpers::{
    load_config, mint_random_colors, setup_script, Address, ColorCode, ColorNft, ConfigError,
    ContractError, LocalChain, MintPlan, MintRange, MintReceipt, ProjectConfig, ScriptError,
    TokenId, TokenMetadata,
};
use tests::{deployed_chain, seeded};

#[tokio::test]
async fn test_mint_random_colors() -> anyhow::Result<()> {
    // A full run mints 10-20 distinct colors and reads back the last token
    let (setup, mut chain) = deployed_chain()?;
    let plan = setup.plan();

    let report = mint_random_colors(&mut chain, &mut seeded(2024), &plan).await?;

    let count = report.minted.len();
    assert!((10..=20).contains(&count), "minted {count} tokens");
    let distinct: HashSet<_> = report.minted.iter().map(|t| &t.color).collect();
    assert_eq!(distinct.len(), count, "colors repeated within a run");

    let ids: Vec<_> = report.minted.iter().map(|t| t.token_id).collect();
    assert_eq!(ids, (0..count as u64).collect::<Vec<_>>());
    assert_eq!(report.last_token_id, count as u64 - 1);
    assert_eq!(chain.next_token_id().await?, count as u64);
    assert_eq!(chain.balance_of(&plan.recipient), count);

    let last_color = &report.minted[count - 1].color;
    assert_eq!(report.metadata.color(), Some(last_color.hex().as_str()));
    assert_eq!(TokenMetadata::from_token_uri(&report.token_uri)?, report.metadata);
    assert_eq!(report.contract, chain.address());
    Ok(())
}

#[tokio::test]
async fn test_seeded_runs_repeat() -> anyhow::Result<()> {
    let (setup, mut first) = deployed_chain()?;
    let (_, mut second) = deployed_chain()?;
    let plan = setup.plan();

    let a = mint_random_colors(&mut first, &mut seeded(5), &plan).await?;
    let b = mint_random_colors(&mut second, &mut seeded(5), &plan).await?;
    assert_eq!(a.minted, b.minted);
    assert_eq!(a.token_uri, b.token_uri);
    Ok(())
}

#[tokio::test]
async fn test_empty_run_reports_nothing_minted() -> anyhow::Result<()> {
    let (setup, mut chain) = deployed_chain()?;
    let plan = MintPlan { range: MintRange::new(0, 0).unwrap(), ..setup.plan() };

    let err = mint_random_colors(&mut chain, &mut seeded(1), &plan).await.unwrap_err();
    assert!(matches!(err, ScriptError::NothingMinted));
    assert_eq!(chain.next_token_id().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_zero_recipient_is_rejected() -> anyhow::Result<()> {
    let (setup, mut chain) = deployed_chain()?;
    let plan = MintPlan { recipient: Address::ZERO, ..setup.plan() };

    let err = mint_random_colors(&mut chain, &mut seeded(1), &plan).await.unwrap_err();
    assert!(matches!(
        err,
        ScriptError::MintInterrupted { ref minted, source: ContractError::MintToZeroAddress }
            if minted.is_empty()
    ));
    Ok(())
}

/// Fails every mint after the first `limit`.
struct FailingAfter {
    inner: LocalChain,
    limit: usize,
}

impl ColorNft for FailingAfter {
    fn address(&self) -> Address {
        self.inner.address()
    }

    async fn mint(&mut self, to: Address, color: &ColorCode) -> Result<MintReceipt, ContractError> {
        if self.inner.balance_of(&to) >= self.limit {
            return Err(ContractError::Encoding("transaction reverted".to_string()));
        }
        self.inner.mint(to, color).await
    }

    async fn next_token_id(&self) -> Result<TokenId, ContractError> {
        self.inner.next_token_id().await
    }

    async fn token_uri(&self, token_id: TokenId) -> Result<String, ContractError> {
        self.inner.token_uri(token_id).await
    }
}

#[tokio::test]
async fn test_interrupted_run_reports_confirmed_mints() -> anyhow::Result<()> {
    let (setup, chain) = deployed_chain()?;
    let mut chain = FailingAfter { inner: chain, limit: 3 };

    let err = mint_random_colors(&mut chain, &mut seeded(8), &setup.plan()).await.unwrap_err();
    let (minted, source) = match err {
        ScriptError::MintInterrupted { minted, source } => (minted, source),
        other => panic!("expected an interrupted run, got {other}"),
    };
    assert_eq!(minted.len(), 3);
    assert_eq!(minted.iter().map(|t| t.token_id).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(source, ContractError::Encoding("transaction reverted".to_string()));
    assert_eq!(chain.inner.next_token_id().await?, 3);
    for token in &minted {
        let uri = chain.inner.token_uri(token.token_id).await?;
        assert_eq!(TokenMetadata::from_token_uri(&uri)?.color(), Some(token.color.hex().as_str()));
    }
    Ok(())
}

#[test]
fn test_remote_networks_are_refused() -> anyhow::Result<()> {
    let config = ProjectConfig::builtin()?;
    let err = setup_script(&config, Some("base-sepolia")).unwrap_err();
    assert!(matches!(err, ScriptError::RemoteNetwork { ref name, .. } if name == "base-sepolia"));

    let err = setup_script(&config, Some("mainnet")).unwrap_err();
    assert!(matches!(err, ScriptError::Config(ConfigError::UnknownNetwork { .. })));
    Ok(())
}

#[test]
fn test_config_file_overrides_defaults() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(
        file,
        r#"
default_network = "devnet"

[deploy]
recipient = "0x00000000000000000000000000000000000000aa"
min_mints = 3
max_mints = 3

[networks.devnet]
chain_id = 1337
"#
    )?;

    let config = load_config(Some(file.path()))?;
    assert_eq!(config.deploy.recipient.to_string(), "0x00000000000000000000000000000000000000aa");
    assert_eq!(config.deploy.mint_range()?, MintRange::new(3, 3).unwrap());
    // untouched keys keep their defaults
    assert!(config.deploy.is_testnet);
    assert!(config.networks.contains_key("hardhat"));

    let setup = setup_script(&config, None)?;
    assert_eq!(setup.network_name, "devnet");
    assert_eq!(setup.local.chain_id(), 1337);
    assert_eq!(setup.explorer_url(&config.deploy.recipient), None);
    Ok(())
}

#[test]
fn test_inverted_mint_range_fails_to_load() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "[deploy]\nmin_mints = 9\nmax_mints = 2")?;

    let err = load_config(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidMintRange { min: 9, max: 2 }));
    Ok(())
}

#[test]
fn test_missing_config_file_fails() {
    let err = load_config(Some(std::path::Path::new("does/not/exist.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn test_explorer_link_for_in_process_network() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(
        file,
        r#"
[networks.hardhat.explorer]
api_url = "http://localhost:4000/api"
browser_url = "http://localhost:4000"
"#
    )?;

    let config = load_config(Some(file.path()))?;
    let mut setup = setup_script(&config, None)?;
    let chain = setup.deploy_chain();
    assert_eq!(
        setup.explorer_url(&chain.address()),
        Some(format!("http://localhost:4000/address/{}/transactions", chain.address()))
    );
    // the shipped hardhat network has no explorer
    let mut plain = setup_script(&ProjectConfig::builtin()?, None)?;
    let address = plain.deploy_chain().address();
    assert_eq!(plain.explorer_url(&address), None);
    Ok(())
}
