pub mod api;
pub mod cli;
pub mod config;
pub mod prediction;

use tracing_subscriber::EnvFilter;

pub use prediction::{predict_csv, PredictionError, PredictionResult};

/// Binary entry point. Returns the process exit status.
pub fn run() -> i32 {
    // Logs go to stderr so `predict` can keep stdout for JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout, usage mistakes to stderr.
            let _ = err.print();
            return err.exit_code();
        }
    };

    if cli.command == cli::Command::Serve {
        tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    }

    match cli::execute(cli.command, &config::ServerConfig::from_env()) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{}", cli::error_json(&err));
            1
        }
    }
}
