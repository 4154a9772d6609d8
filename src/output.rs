//! JSON output for CLI commands.

use serde::Serialize;

use crate::commands::CommandError;

/// Print a result as pretty JSON on stdout.
pub fn print_json<T: Serialize>(item: &T) {
    let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
    println!("{json}");
}

/// Print a failure as `CODE: message` on stderr.
pub fn print_error(err: &CommandError) {
    eprintln!("{}: {err}", err.code());
}
