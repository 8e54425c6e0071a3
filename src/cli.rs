//! Command-line entry: `serve` runs the HTTP API, `predict <file>` prints one
//! prediction as JSON.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::api::server::serve_until_ctrl_c;
use crate::config::ServerConfig;
use crate::prediction::{PredictionAssembler, PredictionError, PredictionResult};

#[derive(Debug, Parser)]
#[command(
    name = "hemalens",
    version,
    about = "Rule-based condition prediction from a single-row blood-test CSV",
    after_help = "Environment: HEMALENS_ADDR, HEMALENS_MAX_UPLOAD_BYTES, HEMALENS_FACTOR_STRATEGY, RUST_LOG"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Start the HTTP API (HEMALENS_ADDR, default 127.0.0.1:5000)
    Serve,

    /// Print the prediction for a single-row CSV as JSON
    Predict {
        /// CSV file with a header line and one data row
        file: PathBuf,
    },
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Parse a full argument list, program name first.
///
/// Usage mistakes and `--help`/`--version` come back as `clap::Error`; its
/// `exit_code()` is 2 for mistakes and 0 for help or version output.
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Read a CSV file and run the prediction on its content.
pub fn predict_file(
    path: &Path,
    assembler: &PredictionAssembler,
) -> Result<PredictionResult, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(path = %path.display(), size = text.len(), "Read CSV file");
    Ok(assembler.predict_csv(&text)?)
}

/// Execute a parsed command. Prediction JSON goes to stdout.
pub fn execute(command: Command, config: &ServerConfig) -> Result<(), CliError> {
    match command {
        Command::Predict { file } => {
            let assembler = PredictionAssembler::with_strategy(config.factor_strategy);
            let result = predict_file(&file, &assembler)?;
            println!("{}", serde_json::to_string(&result)?);
            Ok(())
        }
        Command::Serve => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(|e| CliError::Server(format!("Failed to start runtime: {e}")))?;
            runtime
                .block_on(serve_until_ctrl_c(config))
                .map_err(CliError::Server)
        }
    }
}

/// JSON error line written to stderr on failure.
pub fn error_json(err: &CliError) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}
