use anyhow::Result;
use clap::Parser;

use memo_deploy::cli::{Cli, Command};
use memo_deploy::commands;

#[tokio::main]
async fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::from_default_env()
				.add_directive(tracing::Level::INFO.into()),
		)
		.with_writer(std::io::stderr)
		.init();

	let cli = Cli::parse();

	match &cli.command {
		Command::Deploy { account, contract } => {
			commands::deploy::run(&cli, account, contract).await
		}
		Command::Network { command } => commands::network::run(&cli, command).await,
		Command::Accounts { command } => commands::accounts::run(&cli, command).await,
		Command::Memo { command } => commands::memo::run(&cli, command).await,
		Command::Tx { command } => commands::tx::run(&cli, command).await,
		Command::Config { command } => commands::config::run(&cli, command),
	}
}
