use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use earth_progress::config::RunConfig;

fn existing_file(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("{} does not exist", path.display()))
    }
}

/// Convert an earth progress export into a SQLite database named after it.
#[derive(Parser)]
#[command(version)]
struct Opts {
    /// Export file, e.g. earth-05-03-24.xlsx
    #[arg(value_parser = existing_file)]
    filename: PathBuf,
}

async fn run(opts: Opts) -> anyhow::Result<()> {
    let config = RunConfig::from_input(&opts.filename).context("read export date")?;
    let summary = earth_progress::run(&config)
        .await
        .with_context(|| format!("convert {}", opts.filename.display()))?;
    info!(
        database = %config.database.display(),
        points = summary.points,
        champions = summary.champions,
        "conversion finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(?e, "failed to start runtime");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = runtime.block_on(run(opts)) {
        error!(?e, "critical error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
