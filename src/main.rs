use std::{
    fs::read_to_string,
    io::stdout,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use zed::{errors::errors::Error, run_source, write_tokens};

#[derive(Debug, Parser)]
#[command(name = "zed", version, about = "CLI for the Zed language")]
struct App {
    #[arg(long = "log-level", env = "ZED_LOG", global = true)]
    log: Option<LevelFilter>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a source file.
    Run { file: PathBuf },
    /// Lex a source file and print its tokens instead of running it.
    Lex { file: PathBuf },
}

fn main() -> ExitCode {
    let app = App::parse();
    env_logger::Builder::new()
        .filter_level(app.log.unwrap_or(LevelFilter::Warn))
        .init();
    debug!("starting zed with args {app:?}");

    let result = match &app.command {
        Command::Run { file } => run_file(file),
        Command::Lex { file } => lex_file(file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            println!("{}", error);
            ExitCode::FAILURE
        }
    }
}

fn run_file(file: &Path) -> Result<(), Error> {
    let source = read_to_string(file)?;
    let mut out = stdout().lock();
    run_source(&source, &mut out)
}

fn lex_file(file: &Path) -> Result<(), Error> {
    let source = read_to_string(file)?;
    let mut out = stdout().lock();
    write_tokens(&source, &mut out)
}
