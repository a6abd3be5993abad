use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use spt_cli::commands::util::{read_input, resolve_tax_year, resolve_today};
use spt_cli::commands::{import, manual, parse, ranges};
use spt_cli::{Cli, Commands, Config};
use spt_core::DayCounts;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so JSON output on stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(Commands::Manual {
            current,
            first_prior,
            second_prior,
            opts,
        }) => {
            let today = resolve_today(opts.as_of);
            let tax_year = resolve_tax_year(opts.tax_year, &config, today)?;
            let counts = DayCounts::new(*current, *first_prior, *second_prior);
            manual::run(&mut out, tax_year, counts, opts.json)?;
        }
        Some(Commands::Ranges { periods, opts }) => {
            let today = resolve_today(opts.as_of);
            let tax_year = resolve_tax_year(opts.tax_year, &config, today)?;
            ranges::run(&mut out, periods, tax_year, today, opts.json)?;
        }
        Some(Commands::Import {
            file,
            accept_warnings,
            opts,
        }) => {
            let today = resolve_today(opts.as_of);
            let tax_year = resolve_tax_year(opts.tax_year, &config, today)?;
            let raw = read_input(file.as_deref())?;
            let accept = *accept_warnings || config.accept_import_warnings;
            import::run(&mut out, &raw, tax_year, today, accept, opts.json)?;
        }
        Some(Commands::Parse { file, json }) => {
            let raw = read_input(file.as_deref())?;
            parse::run(&mut out, &raw, *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
