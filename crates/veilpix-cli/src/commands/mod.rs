pub mod analyze;
pub mod conceal;
pub mod reveal;
pub mod seal;
pub mod unseal;

use serde_json::json;

/// Prints the machine-readable result as a single JSON document on stdout.
/// Diagnostics go to stderr via the logger, so stdout stays parseable.
pub(crate) fn print_report<T: serde::Serialize>(report: &T) {
    println!("{}", json!({ "success": true, "report": report }));
}
