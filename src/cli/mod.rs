//! CLI module for the Hadith Validator
//!
//! Provides subcommands:
//! - `validate`: run one hadith through the pipeline and print the result
//! - `check`: validate configuration and check that the verse index is reachable

pub mod check;
pub mod validate;

use clap::{Parser, Subcommand};

/// Hadith Validator - checks hadith claims against Quranic verses
#[derive(Parser)]
#[command(name = "hadith-validator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate one hadith text
    Validate(validate::ValidateArgs),

    /// Check configuration and verse index health
    Check(check::CheckArgs),
}

/// Render a value as compact or pretty JSON
pub(crate) fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate_with_text() {
        let cli = Cli::parse_from(["hadith-validator", "validate", "Be kind to parents", "--pretty"]);

        match cli.command {
            Command::Validate(args) => {
                assert_eq!(args.text.as_deref(), Some("Be kind to parents"));
                assert!(args.pretty);
                assert!(args.file.is_none());
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn test_text_and_file_conflict() {
        let parsed = Cli::try_parse_from(["hadith-validator", "validate", "text", "--file", "-"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::parse_from(["hadith-validator", "check"]);
        assert!(matches!(cli.command, Command::Check(_)));
    }
}
