use std::path::PathBuf;

/// Errors raised by the library side of the harness.  Commands wrap these
/// in `anyhow` and add context.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("network '{name}' not found (known: {known})")]
	NetworkNotFound { name: String, known: String },

	#[error("account '{0}' not found")]
	AccountNotFound(String),

	#[error("contract '{name}' not found: no schema directory at {}", .dir.display())]
	ContractNotFound { name: String, dir: PathBuf },

	#[error("invalid config: {0}")]
	InvalidConfig(String),

	#[error("failed to read schema {}: {reason}", .path.display())]
	Schema { path: PathBuf, reason: String },

	#[error("contract '{contract}' is {state}, cannot {action}")]
	InvalidState {
		contract: String,
		state: &'static str,
		action: &'static str,
	},

	#[error("contract '{contract}' has no {kind} method '{method}'")]
	UnknownMethod {
		contract: String,
		kind: &'static str,
		method: String,
	},

	#[error("chain client: {0}")]
	Client(String),

	#[error("LCD request failed: {0}")]
	Lcd(#[from] reqwest::Error),

	#[error("unexpected LCD response: {0}")]
	LcdResponse(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	TomlDe(#[from] toml::de::Error),

	#[error(transparent)]
	TomlSer(#[from] toml::ser::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
