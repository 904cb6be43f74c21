use clap::Parser;
use hadith_validator::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Validate(args) => cli::validate::run(args).await,
        Command::Check(args) => cli::check::run(args).await,
    }
}
