use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use matchlab::{AppFlags, Playground, ProgramOptions};

/// Launch options for the terminal runtime. Everything else happens in the UI.
#[derive(Parser)]
#[command(name = "matchlab")]
#[command(version)]
#[command(about = "Interactively build and test problem matcher configurations")]
struct Cli {
    /// Append debug logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Redraw rate
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let options = ProgramOptions {
        fps: cli.fps,
        log_file: cli.log_file,
        ..ProgramOptions::default()
    };

    match matchlab::run_with::<Playground>(AppFlags::default(), options).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
