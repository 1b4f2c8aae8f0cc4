//! Bulk import of names from comma-delimited text.
//!
//! One candidate per line; only the first field counts. Blank lines, empty
//! first fields, and names already known (in the pool or earlier in the same
//! text) are skipped.

use crate::error::{Result, WheelError};

/// New labels found in `text`, in order of first appearance.
///
/// Fails with [`WheelError::NothingToImport`] when nothing new is found, so a
/// caller never merges an empty batch.
pub fn parse_labels(text: &str, existing: &[String]) -> Result<Vec<String>> {
    let mut found: Vec<String> = Vec::new();

    for line in text.split('\n') {
        if line.trim().is_empty() {
            continue;
        }
        let first = line.split(',').next().unwrap_or("").trim();
        if first.is_empty() {
            continue;
        }
        if existing.iter().any(|l| l == first) || found.iter().any(|l| l == first) {
            continue;
        }
        found.push(first.to_string());
    }

    if found.is_empty() {
        return Err(WheelError::NothingToImport);
    }
    Ok(found)
}
