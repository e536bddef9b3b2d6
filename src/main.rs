mod changelog;
mod cli_args;
mod config;
mod error;
mod llm;
mod logging;
mod setup;
mod summarize;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::changelog::{Origin, RawChangelog};
use crate::cli_args::Cli;
use crate::config::Config;
use crate::summarize::summarize_changelog;

/// Usage goes to stdout and any argument mistake exits 1.
fn exit_with_usage() -> ! {
    println!("{}", Cli::command().render_usage());
    std::process::exit(1);
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("Error: {}", err.kind().as_str().unwrap_or("invalid arguments"));
            exit_with_usage()
        }
    };
    logging::init_logger(cli.verbose);

    let Some(input) = cli.input.as_deref() else {
        exit_with_usage()
    };

    let raw = RawChangelog::read(input)?;
    let cfg = Config::from_sources(&cli)?;
    let llm = setup::build_llm_client(&cfg)?;

    let spinner = logging::Spinner::start(&cfg.model);
    let summarized = summarize_changelog(llm.as_ref(), &cfg.app_name, &raw);
    drop(spinner);

    if summarized.origin() == Origin::Fallback {
        log::warn!("Using the raw commit messages as the changelog.");
    }

    println!("{}", summarized.as_str());
    summarized.write_to(&cfg.output)?;

    Ok(())
}
