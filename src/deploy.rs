//! The memo deployment script: upload, instantiate, then two calls.

use anyhow::Result;
use serde::Serialize;

use crate::accounts::Account;
use crate::contract::ContractHandle;
use crate::fees::{Fee, DENOM};
use crate::msg::{HandleMsg, InitMsg};

pub const INSTANTIATE_LABEL: &str = "ajsdfjasd66jfasjdf22fff-test";
pub const VIEWING_KEY: &str = "hello";
pub const MEMO_RECIPIENT: &str = "secret1399pyvvk3hvwgxwt3udkslsc5jl3rqv4yshfrl";
pub const MEMO_MESSAGE: &str = "hello son";

/// Fee override for the code upload.
pub fn deploy_fee() -> Fee {
	Fee::new("750000", DENOM, "3000000")
}

/// Run every step in order against `contract`, printing each response.
/// The first failure stops the run and is returned as is.
pub async fn run<H: ContractHandle + ?Sized>(contract: &mut H, owner: &Account) -> Result<()> {
	tracing::info!(contract = contract.name(), owner = %owner.name, "starting deployment");

	contract.parse_schema().await?;

	let deploy_response = contract.deploy(owner, Some(deploy_fee())).await?;
	print_response(&deploy_response)?;

	let init = serde_json::to_value(InitMsg::default())?;
	let contract_info = contract.instantiate(init, INSTANTIATE_LABEL, owner).await?;
	print_response(&contract_info)?;

	let (method, args) = HandleMsg::SetViewingKey {
		key: VIEWING_KEY.into(),
		padding: None,
	}
	.into_parts();
	let set_vk = contract.tx(method, owner, args).await?;
	print_response(&set_vk)?;

	let (method, args) = HandleMsg::SendMemo {
		to: MEMO_RECIPIENT.into(),
		message: MEMO_MESSAGE.into(),
	}
	.into_parts();
	let memo_response = contract.tx(method, owner, args).await?;
	print_response(&memo_response)?;

	tracing::info!(contract = contract.name(), "deployment finished");
	Ok(())
}

fn print_response<T: Serialize>(resp: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(resp)?);
	Ok(())
}
