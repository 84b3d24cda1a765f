pub mod accounts;
pub mod config;
pub mod deploy;
pub mod memo;
pub mod network;
pub mod tx;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::client::{ChainClient, SecretCli};
use crate::config::{Config, NetworkProfile};

/// Load the config named on the command line, or the first one found.
pub fn load_config(cli: &Cli) -> Result<Config> {
	Config::load(cli.config.as_deref()).context("failed to load config")
}

/// Resolve the `--network` profile.
pub fn resolve_network<'a>(cli: &Cli, config: &'a Config) -> Result<&'a NetworkProfile> {
	Ok(config.network(&cli.network)?)
}

/// Build the chain client for a network from CLI flags.
pub fn chain_client(cli: &Cli, network: &NetworkProfile) -> Box<dyn ChainClient> {
	Box::new(SecretCli::new(&cli.secretcli, network))
}
