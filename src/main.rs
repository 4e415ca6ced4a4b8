use clap::Parser;
use cutlayout::cli::{self, CliArgs};
use cutlayout::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let args = CliArgs::parse();
    let report = cli::run(&args).await?;
    print!("{report}");

    Ok(())
}
