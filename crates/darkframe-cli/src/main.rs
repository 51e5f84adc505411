// crates/darkframe-cli/src/main.rs
//
// `darkframe` binary: the owning shell. Installs the logger, resolves the
// media tools, constructs the ExportWorker, runs one subcommand and shuts
// the worker down again.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

use darkframe_media::{ExportWorker, MediaConfig};

use cli::Cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let config = MediaConfig::from_env()
        .with_ffmpeg(cli.ffmpeg.clone())
        .with_ffprobe(cli.ffprobe.clone());

    let worker = ExportWorker::new(config);
    let result = commands::dispatch(cli.command, &worker);
    worker.shutdown();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
