#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod api;
mod cli;
mod core;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, FetchCommand},
    prelude::*,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Settle(args) => {
            args.run()?;
        }
        Command::Fetch(args) => match args.command {
            FetchCommand::Powerdex(args) => {
                args.run().await?;
            }
            FetchCommand::ShapingFactors(args) => {
                args.run().await?;
            }
            FetchCommand::Prices(args) => {
                args.run().await?;
            }
        },
    }

    info!("done!");
    Ok(())
}
