// src/bin/render_tsv.rs
//
// Renders simulator output captured earlier (e.g. `vvp out > run.tsv`) without
// touching the toolchain.

use anyhow::{Context, Result};
use clap::Parser;
use simreport::{
    open::OpenResult, pipeline, report::ReportStyle, simulate::CapturedOutput,
};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render captured tab-separated output to a spreadsheet")]
struct Args {
    /// Captured output; `-` reads stdin
    input: String,
    #[arg(short, long, default_value = pipeline::DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Open the spreadsheet once written
    #[arg(long)]
    open: bool,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    let text = if args.input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        buf
    } else {
        fs::read_to_string(&args.input).with_context(|| format!("reading {}", args.input))?
    };
    info!(bytes = text.len(), "loaded {}", args.input);

    let opener = if args.open {
        OpenResult::Desktop
    } else {
        OpenResult::Disabled
    };
    let summary = pipeline::run(
        &CapturedOutput::new(text),
        &args.output,
        &ReportStyle::default(),
        opener,
    )?;

    println!(
        "Wrote {} rows x {} columns to {}",
        summary.rows,
        summary.columns,
        summary.output.display()
    );
    Ok(())
}
