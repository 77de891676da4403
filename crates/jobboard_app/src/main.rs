use clap::Parser;
use jobboard_app::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    jobboard_app::run(Cli::parse()).await
}
