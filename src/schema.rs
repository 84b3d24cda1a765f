use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};

const INIT_FILE: &str = "init_msg.json";
const HANDLE_FILE: &str = "handle_msg.json";
const QUERY_FILE: &str = "query_msg.json";

/// Method names a contract accepts, read from its generated JSON schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractSchema {
	pub tx_methods: BTreeSet<String>,
	pub query_methods: BTreeSet<String>,
}

impl ContractSchema {
	/// Load `init_msg.json`, `handle_msg.json` and `query_msg.json` from `dir`.
	/// The init schema only has to exist and be valid JSON.
	pub fn load(dir: &Path) -> Result<Self> {
		read_json(&dir.join(INIT_FILE))?;
		let handle_path = dir.join(HANDLE_FILE);
		let query_path = dir.join(QUERY_FILE);

		let tx_methods = variant_names(&read_json(&handle_path)?)
			.ok_or_else(|| malformed(&handle_path))?;
		let query_methods = variant_names(&read_json(&query_path)?)
			.ok_or_else(|| malformed(&query_path))?;

		Ok(Self {
			tx_methods,
			query_methods,
		})
	}

	pub fn has_tx(&self, method: &str) -> bool {
		self.tx_methods.contains(method)
	}

	pub fn has_query(&self, method: &str) -> bool {
		self.query_methods.contains(method)
	}
}

/// Collect the variant names of an externally tagged enum schema.
///
/// Struct variants appear as `{"required": ["name"], ...}` arms of `anyOf`
/// or `oneOf`; unit variants as `{"enum": ["name", ...]}`.
pub fn variant_names(schema: &Value) -> Option<BTreeSet<String>> {
	let arms = schema
		.get("anyOf")
		.or_else(|| schema.get("oneOf"))
		.and_then(Value::as_array)?;

	let mut names = BTreeSet::new();
	for arm in arms {
		if let Some(name) = arm.pointer("/required/0").and_then(Value::as_str) {
			names.insert(name.to_owned());
		} else if let Some(values) = arm.get("enum").and_then(Value::as_array) {
			names.extend(values.iter().filter_map(Value::as_str).map(str::to_owned));
		}
	}
	Some(names)
}

fn read_json(path: &Path) -> Result<Value> {
	let content = std::fs::read_to_string(path).map_err(|e| Error::Schema {
		path: path.to_owned(),
		reason: e.to_string(),
	})?;
	serde_json::from_str(&content).map_err(|e| Error::Schema {
		path: path.to_owned(),
		reason: e.to_string(),
	})
}

fn malformed(path: &Path) -> Error {
	Error::Schema {
		path: PathBuf::from(path),
		reason: "expected an anyOf/oneOf enum schema".into(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn write(dir: &Path, file: &str, v: Value) {
		std::fs::write(dir.join(file), serde_json::to_string(&v).unwrap()).unwrap();
	}

	#[test]
	fn struct_and_unit_variants() {
		let schema = json!({
			"oneOf": [
				{ "type": "object", "required": ["send_memo"] },
				{ "type": "string", "enum": ["ping", "pong"] }
			]
		});
		let names = variant_names(&schema).unwrap();
		assert_eq!(
			names.into_iter().collect::<Vec<_>>(),
			["ping", "pong", "send_memo"]
		);
	}

	#[test]
	fn non_enum_schema_is_rejected() {
		assert!(variant_names(&json!({ "type": "object" })).is_none());
	}

	#[test]
	fn shipped_memo_schema_parses() {
		let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("artifacts/schema/memo");
		let schema = ContractSchema::load(&dir).unwrap();
		assert!(schema.has_tx("send_memo"));
		assert!(schema.has_tx("set_viewing_key"));
		assert!(schema.has_query("get_memo"));
		assert!(!schema.has_tx("get_memo"));
	}

	#[test]
	fn missing_file_names_the_path() {
		let dir = tempfile::tempdir().unwrap();
		write(dir.path(), INIT_FILE, json!({ "type": "object" }));
		let err = ContractSchema::load(dir.path()).unwrap_err();
		assert!(err.to_string().contains(HANDLE_FILE), "{err}");
	}

	#[test]
	fn init_schema_must_exist_and_parse() {
		let dir = tempfile::tempdir().unwrap();
		write(dir.path(), HANDLE_FILE, json!({ "anyOf": [] }));
		write(dir.path(), QUERY_FILE, json!({ "anyOf": [] }));
		let err = ContractSchema::load(dir.path()).unwrap_err();
		assert!(err.to_string().contains(INIT_FILE), "{err}");

		std::fs::write(dir.path().join(INIT_FILE), "{ not json").unwrap();
		assert!(matches!(
			ContractSchema::load(dir.path()),
			Err(Error::Schema { .. })
		));

		write(dir.path(), INIT_FILE, json!({ "type": "object" }));
		assert!(ContractSchema::load(dir.path()).is_ok());
	}

	#[test]
	fn malformed_handle_schema_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		write(dir.path(), INIT_FILE, json!({ "type": "object" }));
		write(dir.path(), HANDLE_FILE, json!({ "type": "object" }));
		write(dir.path(), QUERY_FILE, json!({ "anyOf": [] }));
		assert!(matches!(
			ContractSchema::load(dir.path()),
			Err(Error::Schema { .. })
		));
	}
}
