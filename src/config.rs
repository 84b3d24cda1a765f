use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::accounts::{test_accounts, Account};
use crate::error::{Error, Result};
use crate::fees::{Fee, FeeTable, DENOM};

/// File name looked up in the working directory before the home config.
pub const LOCAL_CONFIG: &str = "memo-deploy.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
	pub networks: BTreeMap<String, NetworkProfile>,
	#[serde(default)]
	pub mocha: TestRunnerConfig,
	#[serde(default)]
	pub rust: ToolchainConfig,
}

/// Everything needed to talk to one chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkProfile {
	/// LCD (REST) endpoint, or the node address for local setups.
	pub endpoint: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub chain_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub node_id: Option<String>,
	/// Tendermint RPC address for `secretcli --node`.  Falls back to `endpoint`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rpc_node: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub keyring_backend: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub trust_node: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub accounts: Option<Vec<Account>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fees: Option<FeeTable>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub types: Option<BTreeMap<String, toml::Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRunnerConfig {
	/// Milliseconds.
	pub timeout: u64,
}

impl Default for TestRunnerConfig {
	fn default() -> Self {
		Self { timeout: 60_000 }
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolchainConfig {
	pub version: String,
}

impl Default for ToolchainConfig {
	fn default() -> Self {
		Self {
			version: "1.55.0".into(),
		}
	}
}

impl Default for Config {
	fn default() -> Self {
		let mut networks = BTreeMap::new();

		networks.insert(
			"default".to_owned(),
			NetworkProfile {
				endpoint: "http://localhost:1337/".into(),
				accounts: Some(test_accounts()),
				..Default::default()
			},
		);

		networks.insert(
			"development".to_owned(),
			NetworkProfile {
				endpoint: "tcp://0.0.0.0:26656".into(),
				node_id: Some("115aa0a629f5d70dd1d464bc7e42799e00f4edae".into()),
				chain_id: Some("enigma-pub-testnet-3".into()),
				keyring_backend: Some("test".into()),
				types: Some(BTreeMap::new()),
				..Default::default()
			},
		);

		// Supernova testnet.
		networks.insert(
			"testnet".to_owned(),
			NetworkProfile {
				endpoint: "http://40.88.137.151:1317".into(),
				chain_id: Some("pulsar-2".into()),
				trust_node: Some(true),
				keyring_backend: Some("test".into()),
				accounts: Some(test_accounts()),
				types: Some(BTreeMap::new()),
				fees: Some(FeeTable {
					upload: Some(Fee::new("500000", DENOM, "2000000")),
					init: Some(Fee::new("125000", DENOM, "500000")),
					exec: None,
				}),
				..Default::default()
			},
		);

		Self {
			networks,
			mocha: TestRunnerConfig::default(),
			rust: ToolchainConfig::default(),
		}
	}
}

impl Config {
	/// Directory for user-level state (~/.memo-deploy/).
	pub fn dir() -> Option<PathBuf> {
		dirs::home_dir().map(|h| h.join(".memo-deploy"))
	}

	/// Path of the user-level config file.
	pub fn home_path() -> Option<PathBuf> {
		Self::dir().map(|d| d.join("config.toml"))
	}

	/// Load the config.
	///
	/// An explicit path must exist.  Otherwise `./memo-deploy.toml` and then
	/// `~/.memo-deploy/config.toml` are tried, falling back to the built-in
	/// network table.
	pub fn load(explicit: Option<&Path>) -> Result<Self> {
		if let Some(path) = explicit {
			return Self::from_file(path);
		}

		let candidates = [Some(PathBuf::from(LOCAL_CONFIG)), Self::home_path()];
		for path in candidates.into_iter().flatten() {
			if path.exists() {
				return Self::from_file(&path);
			}
		}

		tracing::debug!("no config file found, using built-in networks");
		Ok(Self::default())
	}

	pub fn from_file(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)?;
		let config: Self = toml::from_str(&content)?;
		config.validate()?;
		tracing::debug!(path = %path.display(), "loaded config");
		Ok(config)
	}

	/// Persist to `path`, creating the parent directory if needed.
	pub fn save(&self, path: &Path) -> Result<()> {
		if let Some(parent) = path.parent() {
			if !parent.as_os_str().is_empty() {
				std::fs::create_dir_all(parent)?;
			}
		}
		std::fs::write(path, toml::to_string_pretty(self)?)?;
		Ok(())
	}

	/// Check the shape of every profile.  Values themselves (addresses,
	/// mnemonics, fee numbers) are left for the chain to reject.
	pub fn validate(&self) -> Result<()> {
		for (name, profile) in &self.networks {
			if profile.endpoint.trim().is_empty() {
				return Err(Error::InvalidConfig(format!(
					"network '{name}' has an empty endpoint"
				)));
			}

			let mut seen = HashSet::new();
			for acc in profile.accounts() {
				if acc.name.is_empty() || acc.address.is_empty() || acc.mnemonic.is_empty() {
					return Err(Error::InvalidConfig(format!(
						"network '{name}' has an account with an empty name, address or mnemonic"
					)));
				}
				if !seen.insert(acc.name.as_str()) {
					return Err(Error::InvalidConfig(format!(
						"network '{name}' defines account '{}' twice",
						acc.name
					)));
				}
			}
		}
		Ok(())
	}

	pub fn network(&self, name: &str) -> Result<&NetworkProfile> {
		self.networks.get(name).ok_or_else(|| Error::NetworkNotFound {
			name: name.to_owned(),
			known: self.networks.keys().cloned().collect::<Vec<_>>().join(", "),
		})
	}
}

impl NetworkProfile {
	pub fn accounts(&self) -> &[Account] {
		self.accounts.as_deref().unwrap_or_default()
	}

	pub fn account_by_name(&self, name: &str) -> Result<&Account> {
		self.accounts()
			.iter()
			.find(|a| a.name == name)
			.ok_or_else(|| Error::AccountNotFound(name.to_owned()))
	}

	/// Address handed to `secretcli --node`.
	pub fn node(&self) -> &str {
		self.rpc_node.as_deref().unwrap_or(&self.endpoint)
	}

	pub fn upload_fee(&self) -> Option<&Fee> {
		self.fees.as_ref().and_then(|f| f.upload.as_ref())
	}

	pub fn init_fee(&self) -> Option<&Fee> {
		self.fees.as_ref().and_then(|f| f.init.as_ref())
	}

	pub fn exec_fee(&self) -> Option<&Fee> {
		self.fees.as_ref().and_then(|f| f.exec.as_ref())
	}
}
