use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::accounts::Account;
use crate::client::{ChainClient, DeployResponse, InstantiateResponse, TxResponse};
use crate::config::NetworkProfile;
use crate::error::{Error, Result};
use crate::fees::{default_exec_fee, default_init_fee, default_upload_fee, Fee};
use crate::schema::ContractSchema;

/// A client-side reference to one contract, used to route calls through
/// its lifecycle: parse schema, deploy, instantiate, then call.
#[async_trait::async_trait]
pub trait ContractHandle: Send + Sync {
	fn name(&self) -> &str;

	/// Read the contract's message schemas.
	async fn parse_schema(&mut self) -> Result<()>;

	/// Upload the compiled binary.  `fee` overrides the network default.
	async fn deploy(&mut self, account: &Account, fee: Option<Fee>) -> Result<DeployResponse>;

	async fn instantiate(
		&mut self,
		init_msg: Value,
		label: &str,
		account: &Account,
	) -> Result<InstantiateResponse>;

	/// Execute `method` with `args`, sent as `{method: args}`.
	async fn tx(&self, method: &str, account: &Account, args: Value) -> Result<TxResponse>;

	/// Query `method` with `args`, sent as `{method: args}`.
	async fn query(&self, method: &str, args: Value) -> Result<Value>;
}

#[derive(Debug, Clone, PartialEq)]
enum Stage {
	Unparsed,
	SchemaParsed,
	Deployed { code_id: u64, code_hash: String },
	Instantiated { address: String },
}

impl Stage {
	fn label(&self) -> &'static str {
		match self {
			Self::Unparsed => "unparsed",
			Self::SchemaParsed => "schema-parsed",
			Self::Deployed { .. } => "deployed",
			Self::Instantiated { .. } => "instantiated",
		}
	}
}

/// Fees resolved once from the network profile.
#[derive(Debug, Clone)]
struct Fees {
	upload: Fee,
	init: Fee,
	exec: Fee,
}

impl Fees {
	fn for_network(network: &NetworkProfile) -> Self {
		Self {
			upload: network.upload_fee().cloned().unwrap_or_else(default_upload_fee),
			init: network.init_fee().cloned().unwrap_or_else(default_init_fee),
			exec: network.exec_fee().cloned().unwrap_or_else(default_exec_fee),
		}
	}
}

/// Where a contract's generated schema lives under the project root.
pub fn schema_dir(project_root: &Path, name: &str) -> PathBuf {
	project_root.join("artifacts").join("schema").join(name)
}

/// Where a contract's compiled binary lives under the project root.
pub fn wasm_path(project_root: &Path, name: &str) -> PathBuf {
	project_root
		.join("artifacts")
		.join("contracts")
		.join(format!("{name}.wasm"))
}

/// `ContractHandle` backed by a `ChainClient`.
pub struct Contract {
	name: String,
	schema_dir: PathBuf,
	wasm: PathBuf,
	fees: Fees,
	client: Box<dyn ChainClient>,
	schema: Option<ContractSchema>,
	stage: Stage,
}

impl Contract {
	/// Look up the contract `name` under `project_root`.  Fails if the
	/// project has no schema directory for it.
	pub fn new(
		name: &str,
		project_root: &Path,
		network: &NetworkProfile,
		client: Box<dyn ChainClient>,
	) -> Result<Self> {
		let dir = schema_dir(project_root, name);
		if !dir.is_dir() {
			return Err(Error::ContractNotFound {
				name: name.to_owned(),
				dir,
			});
		}

		Ok(Self {
			name: name.to_owned(),
			schema_dir: dir,
			wasm: wasm_path(project_root, name),
			fees: Fees::for_network(network),
			client,
			schema: None,
			stage: Stage::Unparsed,
		})
	}

	/// Handle for an instance that already exists on chain.  The schema
	/// still has to be parsed before calling methods.
	pub fn attach(
		name: &str,
		project_root: &Path,
		network: &NetworkProfile,
		client: Box<dyn ChainClient>,
		address: &str,
	) -> Result<Self> {
		let mut contract = Self::new(name, project_root, network, client)?;
		contract.stage = Stage::Instantiated {
			address: address.to_owned(),
		};
		Ok(contract)
	}

	pub fn address(&self) -> Option<&str> {
		match &self.stage {
			Stage::Instantiated { address } => Some(address.as_str()),
			_ => None,
		}
	}

	fn invalid(&self, action: &'static str) -> Error {
		Error::InvalidState {
			contract: self.name.clone(),
			state: self.stage.label(),
			action,
		}
	}

	/// Instance address and schema, or the lifecycle error for `action`.
	fn callable(&self, action: &'static str) -> Result<(&str, &ContractSchema)> {
		match (&self.stage, &self.schema) {
			(Stage::Instantiated { address }, Some(schema)) => Ok((address.as_str(), schema)),
			(Stage::Instantiated { .. }, None) => Err(Error::InvalidState {
				contract: self.name.clone(),
				state: "instantiated without schema",
				action,
			}),
			_ => Err(self.invalid(action)),
		}
	}

	fn unknown(&self, kind: &'static str, method: &str) -> Error {
		Error::UnknownMethod {
			contract: self.name.clone(),
			kind,
			method: method.to_owned(),
		}
	}
}

fn wrap(method: &str, args: Value) -> Value {
	let mut msg = serde_json::Map::new();
	msg.insert(method.to_owned(), args);
	Value::Object(msg)
}

#[async_trait::async_trait]
impl ContractHandle for Contract {
	fn name(&self) -> &str {
		&self.name
	}

	async fn parse_schema(&mut self) -> Result<()> {
		let schema = ContractSchema::load(&self.schema_dir)?;
		tracing::debug!(
			contract = %self.name,
			tx = ?schema.tx_methods,
			query = ?schema.query_methods,
			"parsed schema"
		);
		self.schema = Some(schema);
		if self.stage == Stage::Unparsed {
			self.stage = Stage::SchemaParsed;
		}
		Ok(())
	}

	async fn deploy(&mut self, account: &Account, fee: Option<Fee>) -> Result<DeployResponse> {
		if self.stage != Stage::SchemaParsed {
			return Err(self.invalid("deploy"));
		}
		let fee = fee.unwrap_or_else(|| self.fees.upload.clone());

		tracing::info!(contract = %self.name, wasm = %self.wasm.display(), "uploading code");
		let resp = self.client.store_code(account, &self.wasm, &fee).await?;

		self.stage = Stage::Deployed {
			code_id: resp.code_id,
			code_hash: resp.contract_code_hash.clone(),
		};
		Ok(resp)
	}

	async fn instantiate(
		&mut self,
		init_msg: Value,
		label: &str,
		account: &Account,
	) -> Result<InstantiateResponse> {
		let Stage::Deployed { code_id, code_hash } = &self.stage else {
			return Err(self.invalid("instantiate"));
		};

		tracing::info!(contract = %self.name, code_id, label, "instantiating");
		let resp = self
			.client
			.instantiate(*code_id, code_hash, &init_msg, label, account, &self.fees.init)
			.await?;

		self.stage = Stage::Instantiated {
			address: resp.contract_address.clone(),
		};
		Ok(resp)
	}

	async fn tx(&self, method: &str, account: &Account, args: Value) -> Result<TxResponse> {
		let (address, schema) = self.callable("execute")?;
		if !schema.has_tx(method) {
			return Err(self.unknown("tx", method));
		}

		tracing::info!(contract = %self.name, method, "executing");
		self.client
			.execute(address, &wrap(method, args), account, &self.fees.exec)
			.await
	}

	async fn query(&self, method: &str, args: Value) -> Result<Value> {
		let (address, schema) = self.callable("query")?;
		if !schema.has_query(method) {
			return Err(self.unknown("query", method));
		}

		tracing::debug!(contract = %self.name, method, "querying");
		self.client.query(address, &wrap(method, args)).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::client::MockChainClient;
	use crate::config::Config;
	use serde_json::json;

	fn project_root() -> PathBuf {
		PathBuf::from(env!("CARGO_MANIFEST_DIR"))
	}

	fn testnet() -> NetworkProfile {
		Config::default().network("testnet").unwrap().clone()
	}

	fn owner() -> Account {
		Account::new("account_0", "secret1owner", "words")
	}

	fn deploy_response() -> DeployResponse {
		DeployResponse {
			code_id: 7,
			contract_code_hash: "c0ffee".into(),
			tx_hash: "AA".into(),
			deploy_timestamp: chrono::Utc::now(),
		}
	}

	fn instantiate_response() -> InstantiateResponse {
		InstantiateResponse {
			contract_address: "secret1contract".into(),
			tx_hash: "BB".into(),
			instantiate_timestamp: chrono::Utc::now(),
		}
	}

	fn tx_response() -> TxResponse {
		TxResponse {
			tx_hash: "CC".into(),
			height: None,
			gas_used: None,
			data: None,
			logs: Value::Null,
		}
	}

	fn contract(client: MockChainClient) -> Contract {
		Contract::new("memo", &project_root(), &testnet(), Box::new(client)).unwrap()
	}

	#[test]
	fn unknown_contract_is_not_found() {
		let err = Contract::new(
			"nope",
			&project_root(),
			&testnet(),
			Box::new(MockChainClient::new()),
		)
		.err()
		.unwrap();
		assert!(matches!(err, Error::ContractNotFound { name, .. } if name == "nope"));
	}

	#[tokio::test]
	async fn deploy_requires_parsed_schema() {
		let mut c = contract(MockChainClient::new());
		let err = c.deploy(&owner(), None).await.unwrap_err();
		assert_eq!(
			err.to_string(),
			"contract 'memo' is unparsed, cannot deploy"
		);
	}

	#[tokio::test]
	async fn deploy_forwards_fee_override_unmodified() {
		let override_fee = Fee::new("750000", "uscrt", "3000000");
		let expected = override_fee.clone();

		let mut client = MockChainClient::new();
		client
			.expect_store_code()
			.withf(move |acc, wasm, fee| {
				acc.name == "account_0" && wasm.ends_with("artifacts/contracts/memo.wasm") && *fee == expected
			})
			.times(1)
			.returning(|_, _, _| Ok(deploy_response()));

		let mut c = contract(client);
		c.parse_schema().await.unwrap();
		let resp = c.deploy(&owner(), Some(override_fee)).await.unwrap();
		assert_eq!(resp.code_id, 7);
	}

	#[tokio::test]
	async fn deploy_without_override_uses_network_upload_fee() {
		let mut client = MockChainClient::new();
		client
			.expect_store_code()
			.withf(|_, _, fee| *fee == Fee::new("500000", "uscrt", "2000000"))
			.times(1)
			.returning(|_, _, _| Ok(deploy_response()));

		let mut c = contract(client);
		c.parse_schema().await.unwrap();
		c.deploy(&owner(), None).await.unwrap();
	}

	#[tokio::test]
	async fn instantiate_uses_deployed_code() {
		let mut client = MockChainClient::new();
		client
			.expect_store_code()
			.returning(|_, _, _| Ok(deploy_response()));
		client
			.expect_instantiate()
			.withf(|code_id, code_hash, init, label, _, fee| {
				*code_id == 7
					&& code_hash == "c0ffee"
					&& *init == json!({})
					&& label == "my-label"
					&& *fee == Fee::new("125000", "uscrt", "500000")
			})
			.times(1)
			.returning(|_, _, _, _, _, _| Ok(instantiate_response()));

		let mut c = contract(client);
		c.parse_schema().await.unwrap();
		c.deploy(&owner(), None).await.unwrap();
		c.instantiate(json!({}), "my-label", &owner()).await.unwrap();
		assert_eq!(c.address(), Some("secret1contract"));
	}

	#[tokio::test]
	async fn instantiate_before_deploy_is_rejected() {
		let mut c = contract(MockChainClient::new());
		c.parse_schema().await.unwrap();
		let err = c.instantiate(json!({}), "l", &owner()).await.unwrap_err();
		assert!(matches!(err, Error::InvalidState { action: "instantiate", .. }));
	}

	#[tokio::test]
	async fn tx_wraps_args_under_method_name() {
		let mut client = MockChainClient::new();
		client
			.expect_execute()
			.withf(|addr, msg, _, fee| {
				addr == "secret1contract"
					&& *msg == json!({ "set_viewing_key": { "key": "hello" } })
					&& *fee == Fee::new("50000", "uscrt", "200000")
			})
			.times(1)
			.returning(|_, _, _, _| Ok(tx_response()));

		let mut c = Contract::attach(
			"memo",
			&project_root(),
			&testnet(),
			Box::new(client),
			"secret1contract",
		)
		.unwrap();
		c.parse_schema().await.unwrap();
		c.tx("set_viewing_key", &owner(), json!({ "key": "hello" }))
			.await
			.unwrap();
	}

	#[tokio::test]
	async fn tx_before_instantiate_is_rejected() {
		let mut c = contract(MockChainClient::new());
		c.parse_schema().await.unwrap();
		let err = c.tx("send_memo", &owner(), json!({})).await.unwrap_err();
		assert!(matches!(err, Error::InvalidState { action: "execute", .. }));
	}

	#[tokio::test]
	async fn unknown_methods_are_rejected() {
		let mut c = Contract::attach(
			"memo",
			&project_root(),
			&testnet(),
			Box::new(MockChainClient::new()),
			"secret1contract",
		)
		.unwrap();
		c.parse_schema().await.unwrap();

		let err = c.tx("get_memo", &owner(), json!({})).await.unwrap_err();
		assert!(matches!(err, Error::UnknownMethod { kind: "tx", .. }));

		let err = c.query("send_memo", json!({})).await.unwrap_err();
		assert!(matches!(err, Error::UnknownMethod { kind: "query", .. }));
	}

	#[tokio::test]
	async fn attached_handle_needs_schema_before_query() {
		let c = Contract::attach(
			"memo",
			&project_root(),
			&testnet(),
			Box::new(MockChainClient::new()),
			"secret1contract",
		)
		.unwrap();
		assert!(matches!(
			c.query("get_memo", json!({})).await,
			Err(Error::InvalidState { .. })
		));
	}

	#[tokio::test]
	async fn query_forwards_wrapped_message() {
		let mut client = MockChainClient::new();
		client
			.expect_query()
			.withf(|addr, msg| addr == "secret1contract" && msg.get("get_memo").is_some())
			.times(1)
			.returning(|_, _| Ok(json!({ "msgs": [], "length": 0 })));

		let mut c = Contract::attach(
			"memo",
			&project_root(),
			&testnet(),
			Box::new(client),
			"secret1contract",
		)
		.unwrap();
		c.parse_schema().await.unwrap();
		let out = c
			.query("get_memo", json!({ "address": "secret1x", "auth": {} }))
			.await
			.unwrap();
		assert_eq!(out["length"], 0);
	}
}
