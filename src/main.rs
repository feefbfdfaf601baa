use std::process::ExitCode;
use std::sync::Once;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use ptrchase::{Args, BenchError, Report, RunConfig, harness::RUN_STACK_SIZE};

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        // stdout is reserved for the report line
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    });
}

fn execute(config: RunConfig) -> Result<Report, BenchError> {
    // One worker with room for the stack layout; main only waits on it
    let worker = std::thread::Builder::new()
        .name("ptrchase-run".into())
        .stack_size(RUN_STACK_SIZE)
        .spawn(move || ptrchase::run(&config))
        .map_err(|_| BenchError::Alloc {
            bytes: RUN_STACK_SIZE,
        })?;

    match worker.join() {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

fn main() -> ExitCode {
    init_logging();

    let args = Args::parse();
    let result = RunConfig::try_from(args).and_then(execute);

    match result {
        Ok(report) => {
            if let Some(line) = report.line() {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
