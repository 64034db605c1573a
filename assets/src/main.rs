//! Copy third-party web dependencies into the viewer resource tree.
//!
//! The manifest names, per dependency, glob patterns below a source root
//! (usually `node_modules`) and a destination below the target root.

mod error;
mod manifest;
mod plan;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::AssetError;
use crate::manifest::Manifest;
use crate::plan::CopyOptions;

#[derive(Parser, Debug)]
#[command(name = "goobi-assets", about = "Copy third-party web assets into the viewer resource tree")]
struct Cli {
    /// Path to the JSON asset manifest.
    #[arg(long, env = "GOOBI_ASSETS_MANIFEST", default_value = "assets.json")]
    manifest: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved copy plan.
    List,
    /// Fail if any pattern matches no files.
    Check,
    /// Copy matched files to the target root.
    Copy(CopyArgs),
}

#[derive(Args, Debug)]
struct CopyArgs {
    /// Log what would happen without touching the filesystem.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Remove each dependency's target directory before copying.
    #[arg(long, default_value_t = false)]
    clean: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AssetError> {
    let manifest = Manifest::load(&cli.manifest)?;
    let plan = plan::build(&manifest)?;

    match &cli.command {
        Command::List => {
            for entry in &plan.entries {
                println!("{}\t{} -> {}", entry.dependency, entry.source.display(), entry.target.display());
            }
            for miss in &plan.unmatched {
                tracing::warn!(dependency = %miss.dependency, pattern = %miss.pattern, "pattern matched no files");
            }
            Ok(())
        }
        Command::Check => plan.check(),
        Command::Copy(args) => {
            let stats = plan::execute(&plan, CopyOptions { dry_run: args.dry_run, clean: args.clean })?;
            tracing::info!(
                copied = stats.copied,
                bytes = stats.bytes,
                cleaned = stats.cleaned,
                dry_run = args.dry_run,
                "asset copy complete"
            );
            Ok(())
        }
    }
}
