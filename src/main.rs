use anyhow::Result;
use clap::Parser;

use wowasi_rs::{cli, generator::workflow::launch, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    telemetry::init_tracing(args.verbose);

    let project = args.project_input();
    let config = args.into_config()?;

    let report = launch(&config, project).await?;
    println!("{}", report.summary());

    Ok(())
}
