use anyhow::{Context, Result};
use clap::Parser;
use simreport::{
    open::OpenResult,
    pipeline::{self, DEFAULT_OUTPUT},
    report::ReportStyle,
    simulate::{
        IcarusSimulator, DEFAULT_ARTIFACT, DEFAULT_COMPILER, DEFAULT_RUNTIME, DEFAULT_SOURCE,
    },
    ReportError,
};
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Run the Verilog simulation and write its table to a styled spreadsheet"
)]
struct Args {
    /// Verilog source handed to the compiler
    #[arg(long, default_value = DEFAULT_SOURCE)]
    source: PathBuf,
    /// Compiled simulation image
    #[arg(long, default_value = DEFAULT_ARTIFACT)]
    artifact: PathBuf,
    /// Spreadsheet to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    #[arg(long, default_value = DEFAULT_COMPILER)]
    compiler: String,
    #[arg(long, default_value = DEFAULT_RUNTIME)]
    runtime: String,
    /// Don't open the spreadsheet once written
    #[arg(long)]
    no_open: bool,
}

fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            let code = err
                .downcast_ref::<ReportError>()
                .map(ReportError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(args: Args) -> Result<()> {
    // ─── 2) configure simulator ──────────────────────────────────────
    let simulator = IcarusSimulator {
        source: args.source,
        artifact: args.artifact,
        compiler: args.compiler,
        runtime: args.runtime,
    };
    let opener = if args.no_open {
        OpenResult::Disabled
    } else {
        OpenResult::Desktop
    };
    info!("simulating {}", simulator.source.display());

    // ─── 3) simulate, parse, write, open ─────────────────────────────
    let summary = pipeline::run(&simulator, &args.output, &ReportStyle::default(), opener)
        .with_context(|| format!("building report {}", args.output.display()))?;

    println!("Output has been written to {}", summary.output.display());
    Ok(())
}
