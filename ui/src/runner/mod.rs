//! The inline code runner.
//!
//! Snippets typed into a fragment's runner block are evaluated by a small
//! JS-flavoured interpreter instead of the host page's script context; the
//! only capability they receive is the logging sink. [`execute`] is the whole
//! public surface: source text in, accumulated sink markup out. Every run
//! starts from an empty sink and a fresh root scope, so nothing accumulates
//! across runs.

mod ast;
mod interp;
mod lexer;
mod parser;
mod value;

pub use value::Value;

use dioxus::logger::tracing;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunnerError {
    #[error("{0}")]
    Syntax(String),
}

/// Run one snippet and return the sink markup: one `console.log` line per
/// `<br>`-terminated entry, with any fault reported as a final
/// `Error: {message}` line. Faults never escape this function.
pub fn execute(source: &str) -> String {
    let mut html = String::new();

    let fault = {
        let mut sink = |line: &str| {
            tracing::debug!("[runner] {line}");
            html.push_str(line);
            html.push_str("<br>");
        };
        match parser::parse(source) {
            Ok(program) => interp::run_program(&program, &mut sink)
                .err()
                .map(|exception| exception.message()),
            Err(RunnerError::Syntax(message)) => Some(message),
        }
    };

    if let Some(message) = fault {
        let line = format!("Error: {message}");
        tracing::debug!("[runner] {line}");
        html.push_str(&line);
        html.push_str("<br>");
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_hi_yields_exactly_hi_br() {
        assert_eq!(execute("console.log(\"hi\")"), "hi<br>");
    }

    #[test]
    fn thrown_error_reports_its_message_inline() {
        let output = execute("throw new Error(\"boom\")");
        assert!(output.contains("Error: boom"));
        assert!(output.ends_with("<br>"));
    }

    #[test]
    fn logged_objects_serialize_indented_and_multiline() {
        let output = execute("console.log({ name: \"Ada\", year: 1815 })");
        assert_eq!(
            output,
            "{\n  \"name\": \"Ada\",\n  \"year\": 1815\n}<br>"
        );
    }

    #[test]
    fn output_before_a_fault_is_kept() {
        let output = execute("console.log(\"first\"); missing()");
        assert_eq!(output, "first<br>Error: missing is not defined<br>");
    }

    #[test]
    fn syntax_errors_are_reported_like_runtime_faults() {
        let output = execute("let = ;");
        assert!(output.starts_with("Error: "));
    }

    #[test]
    fn each_run_starts_from_a_clean_scope() {
        // `leak` from a previous run must not be visible.
        assert_eq!(execute("leak = 1; console.log(leak)"), "1<br>");
        assert_eq!(
            execute("console.log(leak)"),
            "Error: leak is not defined<br>"
        );
    }

    #[test]
    fn multiple_arguments_join_with_single_spaces() {
        assert_eq!(
            execute("console.log(\"sum:\", 2 + 3, true)"),
            "sum: 5 true<br>"
        );
    }
}
