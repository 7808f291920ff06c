//! Handles all user-facing output for the CLI.
//!
//! This module is responsible for pretty-printing, colorizing output,
//! formatting errors, and generating JSON. Everything the CLI prints goes
//! through here.

use std::io::{self, IsTerminal, Write};

use miette::Report;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::{CombinatorialError, Parameter, Value, ValueSequence};

// ============================================================================
// CORE OUTPUT FUNCTIONS: User-facing CLI output utilities
// ============================================================================

/// Colors only when stdout is a terminal, so piped output stays plain.
fn stdout() -> StandardStream {
    let choice = if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Prints the plan name as a heading.
pub fn print_plan_heading(name: &str) {
    let mut stdout = stdout();
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
    let _ = writeln!(stdout, "=== {name} ===");
    let _ = stdout.reset();
}

/// Prints one parameter's values, at most `limit` of them.
pub fn print_values(parameter: &Parameter, mut values: ValueSequence, limit: usize) {
    let mut stdout = stdout();
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
    let _ = write!(stdout, "{}", parameter.name());
    let _ = stdout.reset();
    let _ = writeln!(stdout, ": {} [{}]", parameter.ty(), values.source());

    let shown: Vec<String> = values.by_ref().take(limit).map(|v| v.to_string()).collect();
    let truncated = values.next().is_some();
    let _ = write!(stdout, "  {}", shown.join(", "));
    if truncated {
        let _ = stdout.set_color(ColorSpec::new().set_dimmed(true));
        let _ = write!(stdout, "{}...", if shown.is_empty() { "" } else { ", " });
        let _ = stdout.reset();
    }
    let _ = writeln!(stdout);
}

/// Formats a combination as `name=value` pairs.
pub fn format_combination(names: &[String], values: &[Value]) -> String {
    names
        .iter()
        .zip(values)
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats a combination as a single-line JSON object keyed by parameter name.
pub fn format_combination_json(names: &[String], values: &[Value]) -> String {
    let object: serde_json::Map<String, serde_json::Value> = names
        .iter()
        .zip(values)
        .map(|(name, value)| {
            let json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
            (name.clone(), json)
        })
        .collect();
    serde_json::Value::Object(object).to_string()
}

pub fn print_line(line: &str) {
    let mut stdout = stdout();
    let _ = writeln!(stdout, "{line}");
}

/// Notes that output stopped at `limit` while more items remained.
pub fn print_truncated(limit: usize) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
    let _ = writeln!(stderr, "output truncated after {limit} combinations");
    let _ = stderr.reset();
}

/// Prints a CombinatorialError with full miette diagnostics.
pub fn print_error(error: CombinatorialError) {
    let report = Report::new(error);
    eprintln!("{report:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combination_text_pairs_names_with_values() {
        let names = vec!["flag".to_string(), "label".to_string()];
        let values = vec![Value::Bool(true), Value::Null];
        assert_eq!(format_combination(&names, &values), "flag=true, label=null");
        assert_eq!(format_combination_json(&names, &values), r#"{"flag":true,"label":null}"#);
    }
}
