//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::output_result;
use plantid_app::{identify_file, Config};
use plantid_types::{OutputFormat, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref model) = cli.model {
        config.model = model.clone();
    }

    match &cli.command {
        Commands::Identify { image } => {
            let output_format = cli.format.unwrap_or(config.output_format);
            cmd_identify(&cli, &config, image.clone(), output_format).await
        }

        Commands::Config {
            show,
            set_api_key,
            set_model,
            set_output,
            reset,
        } => cmd_config(
            *show,
            set_api_key.clone(),
            set_model.clone(),
            *set_output,
            *reset,
        ),
    }
}

/// Set up the fmt subscriber on stderr. RUST_LOG wins when set; otherwise
/// --verbose turns on debug events for the identification crates.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "plantid_gemini=debug,plantid_app=debug"
    } else {
        "off"
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

async fn cmd_identify(
    cli: &Cli,
    config: &Config,
    image: PathBuf,
    output_format: OutputFormat,
) -> Result<()> {
    if cli.verbose {
        eprintln!("Identifying {} using {}", image.display(), config.model);
    }

    let plant = identify_file(&image, config, cli.api_key.as_deref()).await?;

    output_result(output_format, &plant)
}

fn cmd_config(
    show: bool,
    set_api_key: Option<String>,
    set_model: Option<String>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(api_key) = set_api_key {
        config.api_key = Some(api_key);
        modified = true;
    }

    if let Some(model) = set_model {
        config.model = model;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
