//! Validate command - runs one hadith through the pipeline

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;
use tokio::io::AsyncReadExt;
use tracing::error;

use crate::config::AppConfig;
use crate::domain::validation::ValidationResponse;
use crate::infrastructure::logging;
use crate::infrastructure::observability::register_build_info;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Hadith text to validate
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the hadith text from a file, or `-` for stdin
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Pretty-print the result JSON
    #[arg(long)]
    pub pretty: bool,
}

/// Validate one hadith and print `{"results": ...}` to stdout
pub async fn run(args: ValidateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging);
    register_build_info();

    let text = read_input(&args).await?;
    let orchestrator = crate::build_orchestrator(&config)?;

    let result = match orchestrator.validate(&text).await {
        Ok(result) => result,
        Err(e) => {
            error!(stage = %e.stage(), error = %e, "Validation run failed");
            return Err(e.into());
        }
    };

    let response = ValidationResponse::from(result);
    println!("{}", crate::cli::to_json(&response, args.pretty)?);

    Ok(())
}

async fn read_input(args: &ValidateArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    match args.file.as_deref() {
        Some(path) if path == Path::new("-") => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read hadith from stdin")?;
            Ok(text)
        }
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read hadith from {}", path.display())),
        None => bail!("Provide the hadith TEXT or --file <PATH|->"),
    }
}
