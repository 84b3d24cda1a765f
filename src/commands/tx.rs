use anyhow::Result;

use crate::cli::{Cli, TxCommand};
use crate::commands::{load_config, resolve_network};
use crate::lcd::LcdClient;

pub async fn run(cli: &Cli, cmd: &TxCommand) -> Result<()> {
	let config = load_config(cli)?;
	let network = resolve_network(cli, &config)?;
	let lcd = LcdClient::new(&network.endpoint);

	match cmd {
		TxCommand::Status { tx_hash } => {
			match lcd.tx(tx_hash).await? {
				Some(tx) => {
					let status = if tx.code == 0 { "success" } else { "failed" };
					println!("Transaction: {}", tx.txhash);
					println!("Status:      {status} (code {})", tx.code);
					println!("Height:      {}", tx.height);
					println!("Gas:         {} / {}", tx.gas_used, tx.gas_wanted);
					if tx.code != 0 {
						println!("Log:         {}", tx.raw_log);
					}
				}
				None => println!("Transaction not found: {tx_hash}"),
			}
			Ok(())
		}
	}
}
