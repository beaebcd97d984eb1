use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use contest_page::cli::Args;
use contest_page::telemetry::init_tracing;
use contest_page::transport::DEFAULT_TIMEOUT;
use contest_page::{ContestPageFetcherBuilder, Outcome, ReqwestTransport};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    match run(&args).await {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<Outcome> {
    let fetcher = ContestPageFetcherBuilder::default().build()?;
    let transport = ReqwestTransport::new(DEFAULT_TIMEOUT)?;

    Ok(fetcher
        .print(&transport, args.contest_id(), &mut io::stdout())
        .await)
}
