//! CLI definition using clap

use clap::{Parser, Subcommand};
use plantid_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plant-identify")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Plant identification from photos using the Gemini API")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API key override. Uses GEMINI_API_KEY or the stored key if not specified.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Model name override
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify the plant in an image
    Identify {
        /// Path to image file
        image: PathBuf,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set API key
        #[arg(long)]
        set_api_key: Option<String>,

        /// Set model
        #[arg(long)]
        set_model: Option<String>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_identify() {
        let cli = Cli::try_parse_from(["plant-identify", "identify", "photo.jpg"]).unwrap();
        match cli.command {
            Commands::Identify { image } => assert_eq!(image, PathBuf::from("photo.jpg")),
            _ => panic!("expected identify command"),
        }
        assert!(!cli.verbose);
        assert!(cli.format.is_none());
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "plant-identify",
            "identify",
            "photo.jpg",
            "--api-key",
            "k",
            "--model",
            "gemini-1.5-pro",
            "-f",
            "json",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert_eq!(cli.model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::try_parse_from([
            "plant-identify",
            "config",
            "--set-api-key",
            "secret",
            "--set-output",
            "table",
        ])
        .unwrap();
        match cli.command {
            Commands::Config {
                set_api_key,
                set_output,
                show,
                reset,
                ..
            } => {
                assert_eq!(set_api_key.as_deref(), Some("secret"));
                assert_eq!(set_output, Some(OutputFormat::Table));
                assert!(!show);
                assert!(!reset);
            }
            _ => panic!("expected config command"),
        }
    }
}
