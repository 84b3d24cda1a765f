use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::{Cli, ConfigCommand};
use crate::commands::load_config;
use crate::config::Config;

pub fn run(cli: &Cli, cmd: &ConfigCommand) -> Result<()> {
	match cmd {
		ConfigCommand::Init { force } => init(cli, *force),
		ConfigCommand::Show => {
			let config = load_config(cli)?;
			print!("{}", toml::to_string_pretty(&config)?);
			Ok(())
		}
	}
}

fn init(cli: &Cli, force: bool) -> Result<()> {
	let path: PathBuf = match &cli.config {
		Some(p) => p.clone(),
		None => Config::home_path().context("could not determine home directory")?,
	};

	if path.exists() && !force {
		anyhow::bail!(
			"{} already exists. Use --force to overwrite.",
			path.display()
		);
	}

	Config::default().save(&path)?;
	println!("Wrote {}", path.display());
	Ok(())
}
