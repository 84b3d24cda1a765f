use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::commands::{chain_client, load_config, resolve_network};
use crate::contract::Contract;

pub async fn run(cli: &Cli, account: &str, contract: &str) -> Result<()> {
	let config = load_config(cli)?;
	let network = resolve_network(cli, &config)?;
	let owner = network
		.account_by_name(account)
		.with_context(|| format!("network '{}'", cli.network))?;

	let mut handle = Contract::new(
		contract,
		&cli.project_root,
		network,
		chain_client(cli, network),
	)?;

	crate::deploy::run(&mut handle, owner).await
}
