//! KPI CLI - Command line tool for browsing indicator results and compliance.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "kpi-cli",
    version,
    about = "Healthcare indicator results toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: kpi_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("kpi-cli {}", env!("CARGO_PKG_VERSION"));
    kpi_cmd::run(cli.command).await
}
