//! mnk-drv - Interpreter driver.
//!
//! Orchestrates the pipeline the REPL and file runner share:
//!
//! ```text
//! source --[mnk-par]--> Program
//!        --[define_macros / expand_macros]--> expanded Program
//!        --[eval_program]--> Object
//! ```
//!
//! Parse failures abort the run and are reported with one message line
//! per error; evaluation errors are ordinary `Object::Error` values and
//! are printed like any other result.

pub mod repl;

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use mnk_eval::{define_macros, eval_program, expand_macros, Environment, Object};
use mnk_par::ParseError;

/// The report shape used for parse failures, on stderr and in the REPL.
pub fn format_parse_errors(errors: &[ParseError]) -> String {
    let mut out = String::from("Woops! We ran into some monkey business here!\n parser errors:\n");
    for err in errors {
        out.push('\t');
        out.push_str(&err.to_string());
        out.push('\n');
    }
    out
}

/// Runs a complete source text through parse, macro expansion, and
/// evaluation, with fresh environments.
pub fn run_program(source: &str) -> Result<Object> {
    let mut program =
        mnk_par::parse(source).map_err(|errors| anyhow!(format_parse_errors(&errors)))?;
    debug!(statements = program.statements.len(), "parsed program");

    let env = Environment::new();
    let macro_env = Environment::new();

    define_macros(&mut program, &macro_env);
    let expanded = expand_macros(program, &macro_env);
    debug!("macro expansion complete");

    Ok(eval_program(&expanded, &env))
}

/// Reads and runs a script file, printing the final value's `inspect()`
/// on stdout.
pub fn run_file(path: &Path) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;

    let result = run_program(&source)?;
    println!("{}", result.inspect());
    Ok(())
}
