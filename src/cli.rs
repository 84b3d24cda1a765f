use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
	name = "memo-deploy",
	about = "Deploy and exercise the memo contract on Secret Network.",
	version
)]
pub struct Cli {
	/// Config file.  Defaults to ./memo-deploy.toml, then ~/.memo-deploy/config.toml.
	#[arg(long, global = true)]
	pub config: Option<PathBuf>,

	/// Network profile to use.
	#[arg(long, default_value = "default", global = true)]
	pub network: String,

	/// Path to the secretcli binary.
	#[arg(long, default_value = "secretcli", global = true)]
	pub secretcli: PathBuf,

	/// Project root holding artifacts/.
	#[arg(long, default_value = ".", global = true)]
	pub project_root: PathBuf,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
	/// Upload, instantiate and exercise the contract.
	Deploy {
		/// Account that signs every step.
		#[arg(long, default_value = "account_0")]
		account: String,

		/// Contract to deploy.
		#[arg(long, default_value = "memo")]
		contract: String,
	},

	/// Inspect configured networks.
	Network {
		#[command(subcommand)]
		command: NetworkCommand,
	},

	/// Inspect configured accounts.
	Accounts {
		#[command(subcommand)]
		command: AccountsCommand,
	},

	/// Read memos from an instantiated contract.
	Memo {
		#[command(subcommand)]
		command: MemoCommand,
	},

	/// Check transaction status on-chain.
	Tx {
		#[command(subcommand)]
		command: TxCommand,
	},

	/// Manage the config file.
	Config {
		#[command(subcommand)]
		command: ConfigCommand,
	},
}

// -- Network subcommands --

#[derive(Subcommand)]
pub enum NetworkCommand {
	/// List network profile names.
	List,

	/// Show the selected network profile.
	Show,

	/// Query the selected network's node info.
	Status,
}

// -- Accounts subcommands --

#[derive(Subcommand)]
pub enum AccountsCommand {
	/// List accounts on the selected network.
	List,

	/// Show an account's balances.
	Balance {
		/// Account name.
		name: String,
	},
}

// -- Memo subcommands --

#[derive(Subcommand)]
pub enum MemoCommand {
	/// Read an address's memos using its viewing key.
	Get {
		/// Address of the instantiated memo contract.
		#[arg(long)]
		contract_address: String,

		/// Inbox owner.
		#[arg(long)]
		address: String,

		/// Viewing key set by the inbox owner.
		#[arg(long)]
		key: String,

		#[arg(long)]
		page: Option<u32>,

		#[arg(long)]
		page_size: Option<u32>,
	},
}

// -- Tx subcommands --

#[derive(Subcommand)]
pub enum TxCommand {
	/// Check confirmation status of a transaction.
	Status {
		/// Transaction hash (hex).
		tx_hash: String,
	},
}

// -- Config subcommands --

#[derive(Subcommand)]
pub enum ConfigCommand {
	/// Write the built-in networks to the config file.
	Init {
		/// Overwrite an existing file.
		#[arg(long)]
		force: bool,
	},

	/// Print the effective config as TOML.
	Show,
}
