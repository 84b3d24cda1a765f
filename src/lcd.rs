use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::fees::Coin;

/// Read-only client for a node's LCD (REST gateway).
///
/// Used for status checks that do not need keys; everything that signs
/// goes through a `ChainClient`.
pub struct LcdClient {
	base: String,
	http: reqwest::Client,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeInfo {
	pub network: String,
	pub version: String,
	#[serde(default)]
	pub moniker: String,
}

/// The subset of a cosmos `TxResponse` the CLI prints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TxStatus {
	pub txhash: String,
	#[serde(deserialize_with = "de_u64_string")]
	pub height: u64,
	#[serde(default)]
	pub code: u32,
	#[serde(default)]
	pub raw_log: String,
	#[serde(default, deserialize_with = "de_u64_string")]
	pub gas_used: u64,
	#[serde(default, deserialize_with = "de_u64_string")]
	pub gas_wanted: u64,
}

impl LcdClient {
	pub fn new(endpoint: &str) -> Self {
		Self {
			base: endpoint.trim_end_matches('/').to_owned(),
			http: reqwest::Client::new(),
		}
	}

	async fn get(&self, path: &str) -> Result<reqwest::Response> {
		let url = format!("{}{path}", self.base);
		tracing::debug!(%url, "LCD request");
		Ok(self.http.get(&url).send().await?)
	}

	pub async fn node_info(&self) -> Result<NodeInfo> {
		let body: Value = self
			.get("/cosmos/base/tendermint/v1beta1/node_info")
			.await?
			.error_for_status()?
			.json()
			.await?;
		let info = body
			.get("default_node_info")
			.cloned()
			.ok_or_else(|| {
				Error::LcdResponse("node_info response has no default_node_info".into())
			})?;
		Ok(serde_json::from_value(info)?)
	}

	pub async fn balances(&self, address: &str) -> Result<Vec<Coin>> {
		#[derive(Deserialize)]
		struct Balances {
			balances: Vec<Coin>,
		}

		let body: Balances = self
			.get(&format!("/cosmos/bank/v1beta1/balances/{address}"))
			.await?
			.error_for_status()?
			.json()
			.await?;
		Ok(body.balances)
	}

	/// Look up a transaction by hash.  `None` if the node does not know it.
	pub async fn tx(&self, hash: &str) -> Result<Option<TxStatus>> {
		let hash = hash.strip_prefix("0x").unwrap_or(hash).to_uppercase();
		let resp = self.get(&format!("/cosmos/tx/v1beta1/txs/{hash}")).await?;
		if resp.status() == reqwest::StatusCode::NOT_FOUND {
			return Ok(None);
		}

		let body: Value = resp.error_for_status()?.json().await?;
		match body.get("tx_response") {
			Some(tx) => Ok(Some(serde_json::from_value(tx.clone())?)),
			None => Ok(None),
		}
	}
}

/// Cosmos encodes int64 fields as strings; accept either form.
fn de_u64_string<'de, D>(de: D) -> std::result::Result<u64, D::Error>
where
	D: serde::Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Num(u64),
		Str(String),
	}

	match Raw::deserialize(de)? {
		Raw::Num(n) => Ok(n),
		Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use wiremock::matchers::{method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	#[tokio::test]
	async fn node_info_reads_default_node_info() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/cosmos/base/tendermint/v1beta1/node_info"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"default_node_info": {
					"network": "pulsar-2",
					"version": "0.34.12",
					"moniker": "node0"
				},
				"application_version": {}
			})))
			.expect(1)
			.mount(&server)
			.await;

		let lcd = LcdClient::new(&format!("{}/", server.uri()));
		let info = lcd.node_info().await.unwrap();
		assert_eq!(info.network, "pulsar-2");
		assert_eq!(info.moniker, "node0");
	}

	#[tokio::test]
	async fn node_info_without_default_node_info_is_an_lcd_error() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/cosmos/base/tendermint/v1beta1/node_info"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"application_version": {}
			})))
			.mount(&server)
			.await;

		let lcd = LcdClient::new(&server.uri());
		let err = lcd.node_info().await.unwrap_err();
		assert!(matches!(err, Error::LcdResponse(_)), "{err}");
		assert!(err.to_string().contains("default_node_info"), "{err}");
	}

	#[tokio::test]
	async fn balances_decode() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/cosmos/bank/v1beta1/balances/secret1abc"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"balances": [{ "denom": "uscrt", "amount": "1000" }],
				"pagination": { "next_key": null, "total": "1" }
			})))
			.mount(&server)
			.await;

		let lcd = LcdClient::new(&server.uri());
		let coins = lcd.balances("secret1abc").await.unwrap();
		assert_eq!(coins, vec![Coin::new("1000", "uscrt")]);
	}

	#[tokio::test]
	async fn tx_found_parses_string_numbers() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/cosmos/tx/v1beta1/txs/ABCD"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"tx": {},
				"tx_response": {
					"txhash": "ABCD",
					"height": "812",
					"code": 0,
					"raw_log": "[]",
					"gas_used": "120000",
					"gas_wanted": "200000"
				}
			})))
			.mount(&server)
			.await;

		let lcd = LcdClient::new(&server.uri());
		let tx = lcd.tx("0xabcd").await.unwrap().unwrap();
		assert_eq!(tx.height, 812);
		assert_eq!(tx.gas_used, 120_000);
		assert_eq!(tx.code, 0);
	}

	#[tokio::test]
	async fn tx_not_found_is_none() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/cosmos/tx/v1beta1/txs/FFFF"))
			.respond_with(ResponseTemplate::new(404))
			.mount(&server)
			.await;

		let lcd = LcdClient::new(&server.uri());
		assert!(lcd.tx("ffff").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn server_error_propagates() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(500))
			.mount(&server)
			.await;

		let lcd = LcdClient::new(&server.uri());
		assert!(matches!(lcd.balances("secret1x").await, Err(Error::Lcd(_))));
	}
}
