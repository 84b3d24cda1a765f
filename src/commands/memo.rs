use anyhow::Result;

use crate::cli::{Cli, MemoCommand};
use crate::commands::{chain_client, load_config, resolve_network};
use crate::contract::{Contract, ContractHandle};
use crate::msg::{MsgsResponse, QueryMsg, ViewingPermissions};

const CONTRACT: &str = "memo";

pub async fn run(cli: &Cli, cmd: &MemoCommand) -> Result<()> {
	let config = load_config(cli)?;
	let network = resolve_network(cli, &config)?;

	match cmd {
		MemoCommand::Get {
			contract_address,
			address,
			key,
			page,
			page_size,
		} => {
			let mut handle = Contract::attach(
				CONTRACT,
				&cli.project_root,
				network,
				chain_client(cli, network),
				contract_address,
			)?;
			handle.parse_schema().await?;

			let query = QueryMsg::GetMemo {
				address: address.clone(),
				auth: ViewingPermissions {
					key: Some(key.clone()),
				},
				page: *page,
				page_size: *page_size,
			};
			let (method, args) = query.into_parts();
			let answer: MsgsResponse = serde_json::from_value(handle.query(method, args).await?)?;

			print_memos(address, &answer);
			Ok(())
		}
	}
}

fn print_memos(address: &str, resp: &MsgsResponse) {
	if resp.msgs.is_empty() {
		println!("No memos for {address}.");
		return;
	}
	for (i, memo) in resp.msgs.iter().enumerate() {
		println!("#{}  from={}  time={}", i + 1, memo.from, memo.block_time);
		println!("    {}", memo.message);
	}
	println!("\n{} memo(s) shown, {} total.", resp.msgs.len(), resp.length);
}
