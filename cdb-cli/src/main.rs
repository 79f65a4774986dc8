//! CDB CLI - Command line tool for the clinical dashboard backend.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cdb-cli",
    version,
    about = "Clinical data dashboard toolkit"
)]
struct Cli {
    #[command(flatten)]
    api: cdb_cmd::ApiArgs,

    #[command(subcommand)]
    command: cdb_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cdb_cmd::run(&cli.api, cli.command).await
}
