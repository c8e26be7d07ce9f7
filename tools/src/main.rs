//! Convert Markdown MEMORIES into the JSON documents TanOS reads

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod convert;

#[derive(Parser, Debug)]
#[command(
    name = "tanos-convert-memories",
    about = "Convert MEMORIES Markdown files to JSON"
)]
struct Args {
    /// Directory with Markdown memories
    #[arg(default_value = "../MEMORIES_markdown")]
    md_dir: PathBuf,
    /// Output directory for JSON files
    #[arg(default_value = "../tanos_data/memories")]
    json_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let written = convert::convert_dir(&args.md_dir, &args.json_dir)?;
    println!("Converted {} memory file(s) into {}", written.len(), args.json_dir.display());
    Ok(())
}
