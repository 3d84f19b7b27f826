//! Regenerate `gir`-based bindings and their documentation.
//!
//! Walks one or more roots for `Gir*.toml` configuration files and runs the
//! `gir` generator once per file (twice for non-`sys` crates, which also get
//! a documentation pass). Every process is launched in the background as
//! soon as its command is built, then drained in launch order so the report
//! stays deterministic. The first failure anywhere aborts the run.

mod bootstrap;
mod confirm;
mod discover;
mod driver;
mod invoke;

use anyhow::{ensure, Result};
use clap::Parser;
use confirm::{AlwaysYes, ConfirmationSource, Interactive};
use std::path::{Path, PathBuf};
use std::process::Command;

const DEFAULT_GIR_DIRECTORY: &str = "gir";
const DEFAULT_GIR_PATH: &str = "gir/target/release/gir";

#[derive(Parser)]
#[command(
    name = "regen",
    about = "Regenerate gir bindings and their documentation"
)]
struct Cli {
    /// Directories to search for Gir*.toml files, or such files directly
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Directories where the generator looks up .gir files (repeatable)
    #[arg(long, num_args = 1.., default_values = ["gir-files", "gst-gir-files"])]
    gir_files_directories: Vec<PathBuf>,

    /// Path to the gir executable
    #[arg(long, default_value = DEFAULT_GIR_PATH)]
    gir_path: PathBuf,

    /// Answer yes to every question instead of asking on the terminal
    #[arg(long)]
    yes: bool,

    /// Skip the trailing `cargo fmt` pass
    #[arg(long)]
    no_fmt: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    for path in &cli.paths {
        ensure!(path.exists(), "`{}` does not exist", path.display());
    }

    let mut confirm: Box<dyn ConfirmationSource> = if cli.yes {
        Box::new(AlwaysYes)
    } else {
        Box::new(Interactive)
    };

    if cli.gir_path == Path::new(DEFAULT_GIR_PATH) {
        bootstrap::ensure_generator(
            Path::new(DEFAULT_GIR_DIRECTORY),
            &cli.gir_path,
            confirm.as_mut(),
        )?;
    }
    ensure!(
        cli.gir_path.is_file(),
        "`{}` is not a gir executable",
        cli.gir_path.display()
    );

    let generator = invoke::Generator {
        path: cli.gir_path,
        search_directories: cli.gir_files_directories,
    };

    println!("=> Regenerating crates...");
    regenerate(&cli.paths, &generator)?;
    println!("<= Done!");

    if !cli.no_fmt {
        println!("=> Formatting...");
        bootstrap::run("cargo fmt", Command::new("cargo").arg("fmt"))?;
        println!("<= Done!");
    }
    println!("Don't forget to check that everything has been correctly generated!");
    Ok(())
}

/// Discover every work item, launch every command, drain in launch order.
///
/// Discovery runs to completion over all roots before anything is spawned,
/// so an invalid input aborts with zero processes launched. The spawn loop
/// never waits; all generator processes run concurrently and are only
/// collected afterwards, front to back.
fn regenerate(paths: &[PathBuf], generator: &invoke::Generator) -> Result<()> {
    let mut items = Vec::new();
    for path in paths {
        items.extend(discover::discover(path)?);
    }

    let mut launched = Vec::new();
    for item in &items {
        for invocation in invoke::invocations(item, generator) {
            launched.push(driver::spawn(&generator.path, invocation)?);
        }
    }

    for process in launched {
        println!("{}", process.description);
        let log = process.drain()?;
        if !log.is_empty() {
            print!("{log}");
        }
    }
    Ok(())
}
