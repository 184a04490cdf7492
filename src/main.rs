//! odoo-directory - static site builder for the German Odoo partner directory and blog.

mod cli;
mod config;
mod core;
mod data;
mod dom;
mod embed;
mod enhance;
mod generator;
mod logger;
mod model;
mod page;
mod pipeline;
mod seo;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    let result = match &cli.command {
        Commands::Build { .. } => cli::build::build_site(&config).map(|_| ()),
        Commands::Validate { check, .. } => cli::validate::run(&config, *check),
        Commands::Images { list } => cli::images::run(&config, *list),
    };

    if let Err(e) = &result {
        log!("error"; "{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
