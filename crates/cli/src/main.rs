use anyhow::{Context, Result};
use clap::Parser;
use go_outline::{resolve, OverlayArchive, Outliner, ParseMode};
use std::io;
use std::path::PathBuf;
use std::process;

/// Print the declaration outline of a Go source file as JSON
///
/// Output is an array containing one object for the file's package, whose
/// children list the top-level declarations with 1-based byte offsets.
/// Stdout carries only JSON; diagnostics go to stderr.
#[derive(Parser)]
#[command(name = "go-outline")]
#[command(about = "Print the declaration outline of a Go source file as JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// The path to the file to outline
    #[arg(short, long)]
    file: PathBuf,

    /// Parse imports only
    #[arg(long)]
    imports_only: bool,

    /// Read an archive of the modified file from standard input
    #[arg(long)]
    modified: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mode = if cli.imports_only {
        ParseMode::ImportsOnly
    } else {
        ParseMode::Full
    };

    let overlay = if cli.modified {
        let stdin = io::stdin();
        Some(OverlayArchive::parse(stdin.lock())?)
    } else {
        None
    };

    let source = resolve(&cli.file, overlay.as_ref())?;
    let root = Outliner::new()?
        .outline_source(source, mode)
        .with_context(|| format!("could not outline {}", cli.file.display()))?;

    let rendered = serde_json::to_string(std::slice::from_ref(&root))
        .context("could not serialize outline")?;
    println!("{rendered}");
    Ok(())
}
