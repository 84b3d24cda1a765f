use anyhow::Result;

use crate::cli::{Cli, NetworkCommand};
use crate::commands::{load_config, resolve_network};
use crate::config::Config;
use crate::lcd::LcdClient;

pub async fn run(cli: &Cli, cmd: &NetworkCommand) -> Result<()> {
	let config = load_config(cli)?;

	match cmd {
		NetworkCommand::List => {
			list(&config, &cli.network);
			Ok(())
		}
		NetworkCommand::Show => show(cli, &config),
		NetworkCommand::Status => status(cli, &config).await,
	}
}

fn list(config: &Config, selected: &str) {
	for (name, profile) in &config.networks {
		let marker = if name == selected { "*" } else { " " };
		println!("{marker} {name:<12} {}", profile.endpoint);
	}
}

fn show(cli: &Cli, config: &Config) -> Result<()> {
	let network = resolve_network(cli, config)?;

	println!("Network {}", cli.network);
	println!("  Endpoint: {}", network.endpoint);
	println!("  Node:     {}", network.node());
	println!("  Chain ID: {}", network.chain_id.as_deref().unwrap_or("not set"));
	if let Some(node_id) = &network.node_id {
		println!("  Node ID:  {node_id}");
	}
	println!(
		"  Keyring:  {}",
		network.keyring_backend.as_deref().unwrap_or("test")
	);
	println!("  Accounts: {}", network.accounts().len());
	for (op, fee) in [
		("upload", network.upload_fee()),
		("init", network.init_fee()),
		("exec", network.exec_fee()),
	] {
		if let Some(fee) = fee {
			println!("  Fee {op:<6} {} (gas {})", fee.fees_arg(), fee.gas);
		}
	}
	Ok(())
}

async fn status(cli: &Cli, config: &Config) -> Result<()> {
	let network = resolve_network(cli, config)?;
	let lcd = LcdClient::new(&network.endpoint);
	let info = lcd.node_info().await?;

	println!("Endpoint: {}", network.endpoint);
	println!("Chain:    {}", info.network);
	println!("Version:  {}", info.version);
	println!("Moniker:  {}", info.moniker);

	if let Some(expected) = &network.chain_id {
		if *expected != info.network {
			tracing::warn!(%expected, actual = %info.network, "chain id mismatch");
		}
	}
	Ok(())
}
