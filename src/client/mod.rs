pub mod secretcli;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::accounts::Account;
use crate::error::Result;
use crate::fees::Fee;

pub use secretcli::SecretCli;

/// Result of uploading a contract binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployResponse {
	pub code_id: u64,
	pub contract_code_hash: String,
	pub tx_hash: String,
	pub deploy_timestamp: DateTime<Utc>,
}

/// Result of instantiating uploaded code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstantiateResponse {
	pub contract_address: String,
	pub tx_hash: String,
	pub instantiate_timestamp: DateTime<Utc>,
}

/// Result of a state-changing contract call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxResponse {
	pub tx_hash: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub height: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gas_used: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<String>,
	#[serde(default)]
	pub logs: Value,
}

/// Everything that touches the chain: signing, message encryption,
/// broadcast and queries.  Implementations delegate to an external tool
/// that holds the keys.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ChainClient: Send + Sync {
	/// Upload a wasm binary and return the assigned code id.
	async fn store_code(&self, account: &Account, wasm: &Path, fee: &Fee) -> Result<DeployResponse>;

	/// Create a contract instance from uploaded code.
	async fn instantiate(
		&self,
		code_id: u64,
		code_hash: &str,
		init_msg: &Value,
		label: &str,
		account: &Account,
		fee: &Fee,
	) -> Result<InstantiateResponse>;

	/// Send a handle message to a contract instance.
	async fn execute(
		&self,
		contract_address: &str,
		msg: &Value,
		account: &Account,
		fee: &Fee,
	) -> Result<TxResponse>;

	/// Run a read-only query and return the decoded answer.
	async fn query(&self, contract_address: &str, msg: &Value) -> Result<Value>;
}
