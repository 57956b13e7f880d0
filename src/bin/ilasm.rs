use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use std::ffi::OsString;
use std::process;

use shimr::config::Config;
use shimr::launcher::{self, ILASM};

/// Wrapper for the IL assembler from the NuGet package cache
#[derive(Parser, Debug)]
#[command(name = "ilasm")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Arguments passed through verbatim to ilasm
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<OsString>,
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    if cli.args.is_empty() {
        eprintln!("{}", ILASM.usage);
        return Ok(1);
    }

    let config = Config::load(None).context("Failed to load configuration")?;
    launcher::init_logging(&config);

    match launcher::launch(&ILASM, &config, &cli.args).await {
        Ok(code) => Ok(code),
        Err(err) => {
            launcher::report_failure(&ILASM, &err);
            Ok(1)
        }
    }
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red());
            process::exit(1);
        }
    }
}
