//! The `mnk` binary.
//!
//! With a script argument, runs the file and prints the program's final
//! value. With no arguments, starts the interactive REPL.

use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// The Monkey programming language interpreter
#[derive(Parser, Debug)]
#[command(name = "mnk")]
#[command(author = "Monkey Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "The Monkey programming language interpreter", long_about = None)]
struct Cli {
    /// Script to run; starts an interactive session when omitted
    script: Option<PathBuf>,

    /// Enable verbose tracing output
    #[arg(short, long, env = "MNK_VERBOSE")]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.script {
        Some(path) => mnk_drv::run_file(path),
        None => start_repl(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn start_repl() -> anyhow::Result<()> {
    println!("Hello! This is the Monkey programming language!");
    println!("Feel free to type in commands");

    let stdin = io::stdin();
    let mut input = BufReader::new(stdin.lock());
    let mut output = io::stdout();
    mnk_drv::repl::start(&mut input, &mut output)?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args_means_repl() {
        let cli = Cli::parse_from(["mnk"]);
        assert!(cli.script.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_script() {
        let cli = Cli::parse_from(["mnk", "examples/fib.mnk"]);
        assert_eq!(cli.script, Some(PathBuf::from("examples/fib.mnk")));
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["mnk", "--verbose", "script.mnk"]);
        assert!(cli.verbose);
        assert!(cli.script.is_some());
    }
}
