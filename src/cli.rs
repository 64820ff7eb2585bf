mod fetch;
mod settle;

use clap::{Parser, Subcommand};

pub use self::{
    fetch::{FetchArgs, FetchCommand},
    settle::SettleArgs,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the hourly settlement prices from the market inputs.
    #[clap(name = "settle")]
    Settle(Box<SettleArgs>),

    /// Download market data files from the remote sources.
    #[clap(name = "fetch")]
    Fetch(Box<FetchArgs>),
}
