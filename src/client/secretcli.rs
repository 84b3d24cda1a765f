use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::{ChainClient, DeployResponse, InstantiateResponse, TxResponse};
use crate::accounts::Account;
use crate::config::NetworkProfile;
use crate::error::{Error, Result};
use crate::fees::Fee;

const DEFAULT_KEYRING: &str = "test";

/// Drives the `secretcli` binary.  Signing, Secret message encryption and
/// broadcast all happen inside it; this side only builds arguments and
/// reads the JSON it prints.
pub struct SecretCli {
	binary: PathBuf,
	node: String,
	chain_id: Option<String>,
	keyring_backend: String,
}

impl SecretCli {
	pub fn new(binary: impl Into<PathBuf>, network: &NetworkProfile) -> Self {
		Self {
			binary: binary.into(),
			node: network.node().to_owned(),
			chain_id: network.chain_id.clone(),
			keyring_backend: network
				.keyring_backend
				.clone()
				.unwrap_or_else(|| DEFAULT_KEYRING.into()),
		}
	}

	/// `--node` and `--chain-id`, shared by transactions and queries.
	fn network_args(&self) -> Vec<String> {
		let mut args = vec!["--node".to_owned(), self.node.clone()];
		if let Some(chain_id) = &self.chain_id {
			args.push("--chain-id".to_owned());
			args.push(chain_id.clone());
		}
		args
	}

	/// Arguments appended to every `tx` subcommand.
	fn signing_args(&self, account: &Account, fee: &Fee) -> Vec<String> {
		let mut args = self.network_args();
		args.extend([
			"--from".to_owned(),
			account.name.clone(),
			"--keyring-backend".to_owned(),
			self.keyring_backend.clone(),
			"--broadcast-mode".to_owned(),
			"block".to_owned(),
			"--output".to_owned(),
			"json".to_owned(),
			"-y".to_owned(),
		]);
		args.extend(fee.cli_args());
		args
	}

	/// Spawn the binary and collect its output without judging the exit status.
	async fn output(&self, args: &[String], stdin: Option<&str>) -> Result<Output> {
		tracing::debug!(binary = %self.binary.display(), ?args, "running secretcli");

		let mut cmd = Command::new(&self.binary);
		cmd.args(args)
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.stdin(if stdin.is_some() {
				Stdio::piped()
			} else {
				Stdio::null()
			});

		let mut child = cmd.spawn().map_err(|e| {
			Error::Client(format!("failed to start {}: {e}", self.binary.display()))
		})?;

		if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
			pipe.write_all(input.as_bytes()).await?;
			pipe.write_all(b"\n").await?;
		}

		Ok(child.wait_with_output().await?)
	}

	async fn run(&self, args: &[String], stdin: Option<&str>) -> Result<Vec<u8>> {
		let output = self.output(args, stdin).await?;
		if !output.status.success() {
			return Err(command_failed(args, &output));
		}
		Ok(output.stdout)
	}

	/// Import the account's key into the keyring unless it is already there.
	/// A key stored under the same name with a different address is refused.
	async fn ensure_key(&self, account: &Account) -> Result<()> {
		let show = [
			"keys".to_owned(),
			"show".to_owned(),
			account.name.clone(),
			"-a".to_owned(),
			"--keyring-backend".to_owned(),
			self.keyring_backend.clone(),
		];
		let shown = self.output(&show, None).await?;
		if shown.status.success() {
			let stored = String::from_utf8_lossy(&shown.stdout).trim().to_owned();
			if stored != account.address {
				return Err(Error::Client(format!(
					"keyring key '{}' is {stored}, config expects {}",
					account.name, account.address
				)));
			}
			return Ok(());
		}
		if !key_not_found(&shown.stderr) {
			return Err(command_failed(&show, &shown));
		}

		tracing::info!(account = %account.name, "importing key into keyring");
		let add = [
			"keys".to_owned(),
			"add".to_owned(),
			account.name.clone(),
			"--recover".to_owned(),
			"--keyring-backend".to_owned(),
			self.keyring_backend.clone(),
		];
		self.run(&add, Some(&account.mnemonic)).await?;
		Ok(())
	}

	async fn broadcast(&self, mut args: Vec<String>, account: &Account, fee: &Fee) -> Result<Value> {
		self.ensure_key(account).await?;
		args.extend(self.signing_args(account, fee));
		let out = self.run(&args, None).await?;
		let tx: Value = serde_json::from_slice(&out)?;
		check_tx_code(&tx)?;
		Ok(tx)
	}
}

#[async_trait::async_trait]
impl ChainClient for SecretCli {
	async fn store_code(&self, account: &Account, wasm: &Path, fee: &Fee) -> Result<DeployResponse> {
		let bytes = tokio::fs::read(wasm).await.map_err(|e| {
			Error::Client(format!("cannot read contract binary {}: {e}", wasm.display()))
		})?;
		let contract_code_hash = hex::encode(Sha256::digest(&bytes));

		let args = vec![
			"tx".to_owned(),
			"compute".to_owned(),
			"store".to_owned(),
			wasm.display().to_string(),
		];
		let tx = self.broadcast(args, account, fee).await?;

		let code_id = find_attribute(&tx, "code_id")
			.ok_or_else(|| Error::Client("store response carries no code_id".into()))?
			.parse()
			.map_err(|e| Error::Client(format!("bad code_id: {e}")))?;

		Ok(DeployResponse {
			code_id,
			contract_code_hash,
			tx_hash: tx_hash(&tx)?,
			deploy_timestamp: chrono::Utc::now(),
		})
	}

	async fn instantiate(
		&self,
		code_id: u64,
		code_hash: &str,
		init_msg: &Value,
		label: &str,
		account: &Account,
		fee: &Fee,
	) -> Result<InstantiateResponse> {
		let mut args = vec![
			"tx".to_owned(),
			"compute".to_owned(),
			"instantiate".to_owned(),
			code_id.to_string(),
			serde_json::to_string(init_msg)?,
			"--label".to_owned(),
			label.to_owned(),
		];
		if !code_hash.is_empty() {
			args.push("--code-hash".to_owned());
			args.push(code_hash.to_owned());
		}
		let tx = self.broadcast(args, account, fee).await?;

		let contract_address = find_attribute(&tx, "contract_address").ok_or_else(|| {
			Error::Client("instantiate response carries no contract_address".into())
		})?;

		Ok(InstantiateResponse {
			contract_address,
			tx_hash: tx_hash(&tx)?,
			instantiate_timestamp: chrono::Utc::now(),
		})
	}

	async fn execute(
		&self,
		contract_address: &str,
		msg: &Value,
		account: &Account,
		fee: &Fee,
	) -> Result<TxResponse> {
		let args = vec![
			"tx".to_owned(),
			"compute".to_owned(),
			"execute".to_owned(),
			contract_address.to_owned(),
			serde_json::to_string(msg)?,
		];
		let tx = self.broadcast(args, account, fee).await?;
		tx_response(&tx)
	}

	async fn query(&self, contract_address: &str, msg: &Value) -> Result<Value> {
		let mut args = vec![
			"query".to_owned(),
			"compute".to_owned(),
			"query".to_owned(),
			contract_address.to_owned(),
			serde_json::to_string(msg)?,
		];
		args.extend(self.network_args());
		let out = self.run(&args, None).await?;
		Ok(serde_json::from_slice(&out)?)
	}
}

fn command_failed(args: &[String], output: &Output) -> Error {
	Error::Client(format!(
		"secretcli {} failed ({}): {}",
		args.first().map(String::as_str).unwrap_or_default(),
		output.status,
		String::from_utf8_lossy(&output.stderr).trim()
	))
}

/// `keys show` reports an absent key as "<name> is not a valid name or
/// address: key not found".
fn key_not_found(stderr: &[u8]) -> bool {
	String::from_utf8_lossy(stderr)
		.to_ascii_lowercase()
		.contains("not found")
}

// -- Response parsing --

/// Fail on a non-zero ABCI code, surfacing the raw log.
fn check_tx_code(tx: &Value) -> Result<()> {
	let code = tx.get("code").and_then(Value::as_u64).unwrap_or(0);
	if code == 0 {
		return Ok(());
	}
	let log = tx.get("raw_log").and_then(Value::as_str).unwrap_or_default();
	let hash = tx.get("txhash").and_then(Value::as_str).unwrap_or("<no hash>");
	Err(Error::Client(format!("tx {hash} failed with code {code}: {log}")))
}

/// First value of an event attribute with the given key, across all logs.
fn find_attribute(tx: &Value, key: &str) -> Option<String> {
	tx.get("logs")?
		.as_array()?
		.iter()
		.filter_map(|log| log.get("events").and_then(Value::as_array))
		.flatten()
		.filter_map(|event| event.get("attributes").and_then(Value::as_array))
		.flatten()
		.find(|attr| attr.get("key").and_then(Value::as_str) == Some(key))
		.and_then(|attr| attr.get("value").and_then(Value::as_str))
		.map(str::to_owned)
}

fn tx_hash(tx: &Value) -> Result<String> {
	tx.get("txhash")
		.and_then(Value::as_str)
		.filter(|h| !h.is_empty())
		.map(str::to_owned)
		.ok_or_else(|| Error::Client("response carries no txhash".into()))
}

/// Cosmos encodes int64 fields as JSON strings.
fn u64_field(tx: &Value, key: &str) -> Option<u64> {
	match tx.get(key)? {
		Value::String(s) => s.parse().ok(),
		v => v.as_u64(),
	}
}

fn tx_response(tx: &Value) -> Result<TxResponse> {
	Ok(TxResponse {
		tx_hash: tx_hash(tx)?,
		height: u64_field(tx, "height"),
		gas_used: u64_field(tx, "gas_used"),
		data: tx
			.get("data")
			.and_then(Value::as_str)
			.filter(|d| !d.is_empty())
			.map(str::to_owned),
		logs: tx.get("logs").cloned().unwrap_or(Value::Null),
	})
}
