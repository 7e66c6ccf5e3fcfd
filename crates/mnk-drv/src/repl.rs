//! The interactive read-eval-print loop.
//!
//! One value environment and one macro environment persist for the
//! whole session, so bindings and macro definitions carry across lines.
//! Parse and evaluation errors are printed and the loop continues.

use std::io::{BufRead, Write};

use mnk_eval::{define_macros, eval_program, expand_macros, Environment};

use crate::format_parse_errors;

const PROMPT: &str = ">> ";

/// Runs the REPL until the reader is exhausted.
pub fn start(input: &mut impl BufRead, output: &mut impl Write) -> std::io::Result<()> {
    let env = Environment::new();
    let macro_env = Environment::new();

    let mut line = String::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let mut program = match mnk_par::parse(&line) {
            Ok(program) => program,
            Err(errors) => {
                write!(output, "{}", format_parse_errors(&errors))?;
                continue;
            }
        };

        define_macros(&mut program, &macro_env);
        let expanded = expand_macros(program, &macro_env);

        let result = eval_program(&expanded, &env);
        writeln!(output, "{}", result.inspect())?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(input: &str) -> String {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        start(&mut reader, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_bindings_persist_across_lines() {
        let output = run_session("let x = 2;\nx * 3\n");
        assert!(output.contains("6"), "{}", output);
    }

    #[test]
    fn test_parse_errors_do_not_end_the_session() {
        let output = run_session("let x 5;\n1 + 2\n");
        assert!(output.contains("monkey business"), "{}", output);
        assert!(output.contains("3"), "{}", output);
    }

    #[test]
    fn test_eval_errors_are_printed_and_swallowed() {
        let output = run_session("missing\n40 + 2\n");
        assert!(
            output.contains("ERROR: identifier not found: missing"),
            "{}",
            output
        );
        assert!(output.contains("42"), "{}", output);
    }

    #[test]
    fn test_macros_persist_across_lines() {
        let source = "let unless = macro(c, a, b) { quote(if (!(unquote(c))) { unquote(a) } else { unquote(b) }); };\nunless(false, 1, 2)\n";
        let output = run_session(source);
        assert!(output.ends_with("1\n>> "), "{}", output);
    }

    #[test]
    fn test_prompt_is_printed() {
        let output = run_session("");
        assert_eq!(output, ">> ");
    }
}
