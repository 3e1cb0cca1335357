//! JSON output.

use crate::processing::Summary;

/// Pretty printed JSON for `summary`.
pub fn summary_json(summary: &Summary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}
