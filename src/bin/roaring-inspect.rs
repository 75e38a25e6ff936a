//! `roaring-inspect`: a small CLI for building, inspecting, and combining serialized
//! `roaring16` containers on disk.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use roaring16::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;

/// Build, inspect, and combine serialized single-container 16-bit bitmaps.
#[derive(Parser, Debug)]
#[command(name = "roaring-inspect")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Verbose logging (set via `RUST_LOG` otherwise)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a container from a list of items and write it to a file.
    Build {
        /// Items to insert, in any order.
        #[arg(required = true)]
        items: Vec<u16>,

        /// Output file for the serialized container.
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Print the cardinality, encoding, and byte length of a serialized container.
    Inspect {
        /// Serialized container file.
        file: PathBuf,

        /// Output format.
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,
    },
    /// Intersect two serialized containers and write the result.
    Intersect {
        left: PathBuf,
        right: PathBuf,

        #[arg(short, long)]
        out: PathBuf,
    },
    /// Complement a serialized container and write the result.
    Invert {
        file: PathBuf,

        #[arg(short, long)]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output.
    Human,
    /// Compact single-line output.
    Short,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("roaring_inspect=debug,roaring16=debug")
            .init();
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    match &args.command {
        Command::Build { items, out } => build(items, out),
        Command::Inspect { file, format } => inspect(file, *format),
        Command::Intersect { left, right, out } => intersect(left, right, out),
        Command::Invert { file, out } => invert(file, out),
    }
}

fn build(items: &[u16], out: &PathBuf) -> Result<()> {
    let set = RoaringContainer::from_items(items.iter().copied())
        .context("building container from items")?;
    tracing::debug!(cardinality = set.cardinality(), "built container");
    std::fs::write(out, set.as_bytes())
        .with_context(|| format!("writing {}", out.display()))?;
    println!(
        "wrote {} bytes, cardinality {}",
        set.length(),
        set.cardinality()
    );
    Ok(())
}

fn read_container(path: &PathBuf) -> Result<RoaringContainer> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    RoaringContainer::import(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn inspect(file: &PathBuf, format: OutputFormat) -> Result<()> {
    let set = read_container(file)?;
    match format {
        OutputFormat::Human => {
            println!("file:        {}", file.display());
            println!("cardinality: {}", set.cardinality());
            println!("length:      {} bytes", set.length());
        }
        OutputFormat::Short => {
            println!("{}\t{}\t{}", file.display(), set.cardinality(), set.length());
        }
    }
    Ok(())
}

fn intersect(left: &PathBuf, right: &PathBuf, out: &PathBuf) -> Result<()> {
    let a = read_container(left)?;
    let b = read_container(right)?;
    let mut dst = RoaringContainer::new();
    RoaringContainer::intersection(&a, &b, &mut dst).context("intersecting containers")?;
    std::fs::write(out, dst.as_bytes()).with_context(|| format!("writing {}", out.display()))?;
    println!("cardinality {}", dst.cardinality());
    Ok(())
}

fn invert(file: &PathBuf, out: &PathBuf) -> Result<()> {
    let set = read_container(file)?;
    let mut dst = RoaringContainer::new();
    set.invert(&mut dst).context("inverting container")?;
    if file == out {
        bail!("refusing to overwrite the input file in place");
    }
    std::fs::write(out, dst.as_bytes()).with_context(|| format!("writing {}", out.display()))?;
    println!("cardinality {}", dst.cardinality());
    Ok(())
}
