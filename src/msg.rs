//! Message shapes accepted by the memo contract.
//!
//! These mirror the contract's JSON wire format: snake_case, externally
//! tagged enums.  The harness uses them to build payloads and to decode
//! query answers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitMsg {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleMsg {
	SendMemo {
		to: String,
		message: String,
	},
	SetViewingKey {
		key: String,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		padding: Option<String>,
	},
}

impl HandleMsg {
	/// Method name and argument object, as `ContractHandle::tx` takes them.
	pub fn into_parts(self) -> (&'static str, serde_json::Value) {
		let method = match &self {
			Self::SendMemo { .. } => "send_memo",
			Self::SetViewingKey { .. } => "set_viewing_key",
		};
		(method, untag(&self, method))
	}
}

/// How a caller proves it may read an inbox.  Only viewing keys are
/// supported here; query permits are not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewingPermissions {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
	GetMemo {
		address: String,
		auth: ViewingPermissions,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		page: Option<u32>,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		page_size: Option<u32>,
	},
}

impl QueryMsg {
	/// Method name and argument object, as `ContractHandle::query` takes them.
	pub fn into_parts(self) -> (&'static str, serde_json::Value) {
		let method = match &self {
			Self::GetMemo { .. } => "get_memo",
		};
		(method, untag(&self, method))
	}
}

/// The value under the enum tag of an externally tagged message.
fn untag<T: Serialize>(msg: &T, method: &str) -> serde_json::Value {
	match serde_json::to_value(msg) {
		Ok(serde_json::Value::Object(mut outer)) => outer.remove(method).unwrap_or_default(),
		_ => serde_json::Value::Null,
	}
}

/// One stored memo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
	pub from: String,
	pub message: String,
	pub block_time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgsResponse {
	pub msgs: Vec<Memo>,
	pub length: u32,
}
