//! `dynawheel` CLI entrypoint.
//!
//! Merges command-line flags with an optional configuration file, assembles
//! the wheel, and prints `wrote <path>` on success.

use clap::Parser;
use dynawheel::cli::Cli;
use dynawheel::error::Result;
use dynawheel::wheel::assemble::assemble_wheel;
use env_logger::Env;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level().as_str()))
        .init();

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(cli, &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: Cli, stdout: &mut dyn Write) -> Result<PathBuf> {
    let request = cli.into_request()?;
    Ok(assemble_wheel(&request, stdout)?)
}

fn exit_code_for_run_result(result: Result<PathBuf>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            write_stderr_line(stderr, format_args!("error: {err}"));
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; ignore write failures.
    }
}
