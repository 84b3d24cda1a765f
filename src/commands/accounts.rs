use anyhow::Result;

use crate::cli::{AccountsCommand, Cli};
use crate::commands::{load_config, resolve_network};
use crate::lcd::LcdClient;

pub async fn run(cli: &Cli, cmd: &AccountsCommand) -> Result<()> {
	let config = load_config(cli)?;
	let network = resolve_network(cli, &config)?;

	match cmd {
		AccountsCommand::List => {
			if network.accounts().is_empty() {
				println!("No accounts configured for network '{}'.", cli.network);
			}
			for acc in network.accounts() {
				println!("{:<12} {}", acc.name, acc.address);
			}
			Ok(())
		}
		AccountsCommand::Balance { name } => {
			let acc = network.account_by_name(name)?;
			let lcd = LcdClient::new(&network.endpoint);
			let coins = lcd.balances(&acc.address).await?;

			println!("{} ({})", acc.name, acc.address);
			if coins.is_empty() {
				println!("  no balance");
			}
			for coin in coins {
				println!("  {} {}", coin.amount, coin.denom);
			}
			Ok(())
		}
	}
}
