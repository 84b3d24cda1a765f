use serde::{Deserialize, Serialize};

/// A single coin amount.  The amount stays a string so it reaches the
/// chain exactly as written in the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
	pub amount: String,
	pub denom: String,
}

impl Coin {
	pub fn new(amount: impl Into<String>, denom: impl Into<String>) -> Self {
		Self {
			amount: amount.into(),
			denom: denom.into(),
		}
	}
}

/// What a sender offers to pay for one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
	pub amount: Vec<Coin>,
	pub gas: String,
}

impl Fee {
	pub fn new(amount: impl Into<String>, denom: impl Into<String>, gas: impl Into<String>) -> Self {
		Self {
			amount: vec![Coin::new(amount, denom)],
			gas: gas.into(),
		}
	}

	/// Coins in the `--fees` flag format: `750000uscrt[,1foo]`.
	pub fn fees_arg(&self) -> String {
		self.amount
			.iter()
			.map(|c| format!("{}{}", c.amount, c.denom))
			.collect::<Vec<_>>()
			.join(",")
	}

	/// `--gas <gas> --fees <coins>`, omitting `--fees` when no coins are set.
	pub fn cli_args(&self) -> Vec<String> {
		let mut args = vec!["--gas".to_owned(), self.gas.clone()];
		if !self.amount.is_empty() {
			args.push("--fees".to_owned());
			args.push(self.fees_arg());
		}
		args
	}
}

/// Per-network fee defaults, keyed by operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTable {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub upload: Option<Fee>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub init: Option<Fee>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub exec: Option<Fee>,
}

pub const DENOM: &str = "uscrt";

// Fallbacks when neither the caller nor the network sets a fee.
pub fn default_upload_fee() -> Fee {
	Fee::new("250000", DENOM, "1000000")
}

pub fn default_init_fee() -> Fee {
	Fee::new("125000", DENOM, "500000")
}

pub fn default_exec_fee() -> Fee {
	Fee::new("50000", DENOM, "200000")
}
