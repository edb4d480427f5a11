// src/simulate.rs

use crate::error::{ReportError, Result};
use std::{
    path::PathBuf,
    process::{Command, Output},
};
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_SOURCE: &str = "Code/ParkingManagement.v";
pub const DEFAULT_ARTIFACT: &str = "out";
pub const DEFAULT_COMPILER: &str = "iverilog";
pub const DEFAULT_RUNTIME: &str = "vvp";

/// Something that can produce tabular simulator output.
///
/// Split into `compile` and `run` so each stage fails on its own; callers
/// normally only need [`Simulate::simulate`].
pub trait Simulate {
    /// Build whatever `run` needs. Must complete before `run` is called.
    fn compile(&self) -> Result<()>;

    /// Execute the build artifact and return its captured stdout.
    fn run(&self) -> Result<String>;

    fn simulate(&self) -> Result<String> {
        self.compile()?;
        self.run()
    }
}

/// Icarus Verilog: `iverilog -o <artifact> <source>` then `vvp <artifact>`.
#[derive(Debug, Clone)]
pub struct IcarusSimulator {
    pub source: PathBuf,
    pub artifact: PathBuf,
    pub compiler: String,
    pub runtime: String,
}

impl Default for IcarusSimulator {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            artifact: PathBuf::from(DEFAULT_ARTIFACT),
            compiler: DEFAULT_COMPILER.to_string(),
            runtime: DEFAULT_RUNTIME.to_string(),
        }
    }
}

impl IcarusSimulator {
    pub fn new(source: impl Into<PathBuf>, artifact: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            artifact: artifact.into(),
            ..Self::default()
        }
    }
}

impl Simulate for IcarusSimulator {
    #[instrument(level = "info", skip(self), fields(source = %self.source.display()))]
    fn compile(&self) -> Result<()> {
        let mut cmd = Command::new(&self.compiler);
        cmd.arg("-o").arg(&self.artifact).arg(&self.source);
        run_checked(&self.compiler, cmd)?;
        Ok(())
    }

    #[instrument(level = "info", skip(self), fields(artifact = %self.artifact.display()))]
    fn run(&self) -> Result<String> {
        let mut cmd = Command::new(&self.runtime);
        cmd.arg(&self.artifact);
        let output = run_checked(&self.runtime, cmd)?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = stdout.len(), "captured simulator stdout");
        Ok(stdout)
    }
}

/// Runs `cmd` to completion, mapping a spawn error or non-zero exit to
/// [`ReportError`]. Stdout and stderr are captured.
fn run_checked(tool: &str, mut cmd: Command) -> Result<Output> {
    info!("running {:?}", cmd);
    let output = cmd.output().map_err(|source| ReportError::ExternalToolSpawn {
        tool: tool.to_string(),
        source,
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            warn!(tool, stderr = %stderr.trim_end(), "tool reported errors");
        }
        return Err(ReportError::ExternalToolFailure {
            tool: tool.to_string(),
            status: output.status,
        });
    }
    Ok(output)
}

/// Output that was captured earlier (a file, stdin, a test fixture).
/// Compiling is a no-op; running hands back the text.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    text: String,
}

impl CapturedOutput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Simulate for CapturedOutput {
    fn compile(&self) -> Result<()> {
        Ok(())
    }

    fn run(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}
