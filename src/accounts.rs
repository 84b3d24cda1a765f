use std::fmt;

use serde::{Deserialize, Serialize};

/// A named signing account.  The mnemonic is handed to the chain client
/// only when the key has to be imported into its keyring.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
	pub name: String,
	pub address: String,
	pub mnemonic: String,
}

impl Account {
	pub fn new(
		name: impl Into<String>,
		address: impl Into<String>,
		mnemonic: impl Into<String>,
	) -> Self {
		Self {
			name: name.into(),
			address: address.into(),
			mnemonic: mnemonic.into(),
		}
	}
}

// Keep seed phrases out of logs and panic messages.
impl fmt::Debug for Account {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Account")
			.field("name", &self.name)
			.field("address", &self.address)
			.field("mnemonic", &"<redacted>")
			.finish()
	}
}

/// The two funded accounts used for local and testnet deployments.
pub fn test_accounts() -> Vec<Account> {
	vec![
		Account::new(
			"account_0",
			"secret1nmjq4cqdwr9d68nun3kkxr9h2z5l5u03ypmyk2",
			"hood endorse primary mixed camera piece agree chimney upgrade album blade alcohol reunion forget invite squeeze general bench aerobic happy saddle off buddy soccer",
		),
		Account::new(
			"account_1",
			"secret1ddfphwwzqtkp8uhcsc53xdu24y9gks2kug45zv",
			"sorry object nation also century glove small tired parrot avocado pulp purchase",
		),
	]
}
