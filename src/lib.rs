pub mod accounts;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod contract;
pub mod deploy;
pub mod error;
pub mod fees;
pub mod lcd;
pub mod msg;
pub mod schema;

pub use error::{Error, Result};
