//! Plant Identify - plant identification from photos using the Gemini API
//!
//! A CLI tool that sends a photo to the Gemini API and prints the plant's
//! name and a brief description.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
