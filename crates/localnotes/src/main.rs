//! localnotes: command-line shell over the local notes store.

mod cli;

use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    localnotes::logging::init_logging();
    cli::run(cli::Cli::parse())
}
