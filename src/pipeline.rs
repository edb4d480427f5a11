// src/pipeline.rs

use crate::{
    error::Result,
    open::OpenResult,
    report::{write_report, ReportStyle},
    simulate::Simulate,
    table::parse_table,
};
use std::{
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::{info, instrument};

pub const DEFAULT_OUTPUT: &str = "parking_management.xlsx";

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

/// Simulate → parse → write → open, strictly in that order. Nothing is
/// written unless simulation and parsing both succeed.
#[instrument(level = "info", skip(simulator, output, style), fields(output = %output.display()))]
pub fn run(
    simulator: &dyn Simulate,
    output: &Path,
    style: &ReportStyle,
    opener: OpenResult,
) -> Result<RunSummary> {
    let start = Instant::now();

    // ─── 1) simulate ─────────────────────────────────────────────────
    let text = simulator.simulate()?;
    info!(bytes = text.len(), elapsed = ?start.elapsed(), "simulation finished");

    // ─── 2) parse ────────────────────────────────────────────────────
    let table = parse_table(&text)?;
    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        "parsed table"
    );

    // ─── 3) render + write ───────────────────────────────────────────
    write_report(&table, style, output)?;

    // ─── 4) hand off to a viewer ─────────────────────────────────────
    opener.open(output);

    info!(elapsed = ?start.elapsed(), "report complete");
    Ok(RunSummary {
        output: output.to_path_buf(),
        rows: table.row_count(),
        columns: table.column_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ReportError, simulate::CapturedOutput};
    use anyhow::Result;
    use std::cell::Cell;
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,simreport=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    /// A simulator whose compile step fails; records whether `run` was reached.
    struct BrokenCompile {
        ran: Cell<bool>,
    }

    impl Simulate for BrokenCompile {
        fn compile(&self) -> crate::error::Result<()> {
            Err(ReportError::ExternalToolSpawn {
                tool: "iverilog".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }

        fn run(&self) -> crate::error::Result<String> {
            self.ran.set(true);
            Ok("A\n1".into())
        }
    }

    #[test]
    fn test_run_writes_report() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let output = dir.path().join(DEFAULT_OUTPUT);
        let sim = CapturedOutput::new("A\tB\n1\t2\n3\t4\n5\t6");

        let summary = run(&sim, &output, &ReportStyle::default(), OpenResult::Disabled)?;

        assert_eq!(
            summary,
            RunSummary {
                output: output.clone(),
                rows: 3,
                columns: 2,
            }
        );
        let book = umya_spreadsheet::reader::xlsx::read(&output)?;
        let sheet = book.get_sheet(&0).expect("sheet 0");
        assert_eq!(sheet.get_value((1, 1)), "A");
        assert_eq!(sheet.get_value((2, 4)), "6");
        Ok(())
    }

    #[test]
    fn test_empty_output_writes_nothing() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let output = dir.path().join(DEFAULT_OUTPUT);

        let err = run(
            &CapturedOutput::new(""),
            &output,
            &ReportStyle::default(),
            OpenResult::Disabled,
        )
        .unwrap_err();

        assert!(matches!(err, ReportError::MalformedOutput(_)));
        assert!(!output.exists());
        Ok(())
    }

    #[test]
    fn test_simulation_failure_stops_before_parse() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let output = dir.path().join(DEFAULT_OUTPUT);
        let sim = BrokenCompile {
            ran: Cell::new(false),
        };

        assert!(run(&sim, &output, &ReportStyle::default(), OpenResult::Disabled).is_err());
        assert!(!sim.ran.get());
        assert!(!output.exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_exit_status_surfaces() -> Result<()> {
        use crate::simulate::IcarusSimulator;

        init_test_logging();
        let dir = tempdir()?;
        let output = dir.path().join(DEFAULT_OUTPUT);
        let sim = IcarusSimulator {
            compiler: "false".into(),
            ..IcarusSimulator::new(dir.path().join("top.v"), dir.path().join("out"))
        };

        let err = run(&sim, &output, &ReportStyle::default(), OpenResult::Disabled).unwrap_err();
        assert!(matches!(err, ReportError::ExternalToolFailure { .. }));
        assert!(!output.exists());
        Ok(())
    }
}
