use std::path::PathBuf;

use chrono::{Days, Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use tokio::task;

use crate::{
    api::{oasis, oasis::LmpRequest, powerdex},
    prelude::*,
};

#[derive(Parser)]
pub struct FetchArgs {
    #[command(subcommand)]
    pub command: FetchCommand,
}

#[derive(Subcommand)]
pub enum FetchCommand {
    /// List the PowerDex FTP drop or download one file from it.
    Powerdex(PowerdexArgs),

    /// Download the day-ahead hourly shaping factor archive from CAISO OASIS.
    ShapingFactors(ShapingFactorsArgs),

    /// Download the locational marginal price archive from CAISO OASIS.
    Prices(PricesArgs),
}

#[derive(Parser)]
pub struct PowerdexArgs {
    #[clap(flatten)]
    pub connection: PowerdexConnectionArgs,

    /// Remote file to download; when omitted, list the directory instead.
    #[clap(long = "remote-path")]
    pub remote_path: Option<String>,

    /// Local path to save the file to, defaults to the remote file name.
    #[clap(long = "local-path")]
    pub local_path: Option<PathBuf>,
}

#[derive(Parser)]
pub struct PowerdexConnectionArgs {
    #[clap(long, env = "POWERDEX_FTP_HOSTNAME")]
    pub hostname: String,

    #[clap(long, default_value = "21", env = "POWERDEX_FTP_PORT")]
    pub port: u16,

    #[clap(long, env = "POWERDEX_FTP_USERNAME")]
    pub username: String,

    #[clap(long, env = "POWERDEX_FTP_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl PowerdexArgs {
    /// The FTP client is synchronous, so the whole exchange runs on the blocking pool.
    pub async fn run(self) -> Result {
        task::spawn_blocking(move || {
            let connection = &self.connection;
            let mut client = powerdex::Client::connect(
                &connection.hostname,
                connection.port,
                &connection.username,
                &connection.password,
            )?;
            let outcome = match self.remote_path.as_deref() {
                None => client.list().map(|lines| println!("{}", lines.iter().join("\n"))),
                Some(remote_path) => client
                    .download(remote_path, self.local_path)
                    .map(|path| println!("{}", path.display())),
            };
            client.quit()?;
            outcome
        })
        .await
        .context("the FTP task panicked")?
    }
}

#[derive(Parser)]
pub struct ShapingFactorsArgs {
    /// Trading date, defaults to yesterday.
    #[clap(long)]
    pub date: Option<NaiveDate>,

    /// Directory to save the archive to.
    #[clap(long = "output-dir", default_value = "input_data/caiso_shaping_factors")]
    pub output_dir: PathBuf,
}

impl ShapingFactorsArgs {
    pub async fn run(&self) -> Result {
        let date = self.date.unwrap_or_else(yesterday);
        let path = oasis::Api::new()?.download_shaping_factors(date, &self.output_dir).await?;
        println!("{}", path.display());
        Ok(())
    }
}

#[derive(Parser)]
pub struct PricesArgs {
    /// Trading date, defaults to yesterday.
    #[clap(long)]
    pub date: Option<NaiveDate>,

    /// Interval start time.
    #[clap(long = "start-time", default_value = "08:00", value_parser = parse_time)]
    pub start_time: NaiveTime,

    /// Interval end time.
    #[clap(long = "end-time", default_value = "09:00", value_parser = parse_time)]
    pub end_time: NaiveTime,

    /// OASIS market run identifier.
    #[clap(long = "market-run-id", default_value = "RTPD", env = "OASIS_MARKET_RUN_ID")]
    pub market_run_id: String,

    /// Pricing node identifier.
    #[clap(long, default_value = "PALOVRDE_ASR-APND", env = "OASIS_NODE")]
    pub node: String,

    /// Directory to save the archive to.
    #[clap(long = "output-dir", default_value = "input_data/caiso_lmp")]
    pub output_dir: PathBuf,
}

impl PricesArgs {
    pub async fn run(self) -> Result {
        let request = LmpRequest::builder()
            .date(self.date.unwrap_or_else(yesterday))
            .start_time(self.start_time)
            .end_time(self.end_time)
            .market_run_id(self.market_run_id)
            .node(self.node)
            .build();
        let path =
            oasis::Api::new()?.download_locational_prices(&request, &self.output_dir).await?;
        println!("{}", path.display());
        Ok(())
    }
}

fn parse_time(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value, "%H:%M")
}

fn yesterday() -> NaiveDate {
    Local::now().date_naive() - Days::new(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_ok() -> Result {
        assert_eq!(parse_time("08:00")?, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        Ok(())
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert!(parse_time("8 am").is_err());
    }
}
