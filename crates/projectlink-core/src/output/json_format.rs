//! JSON and escape formatting utilities

use crate::types::LinkOutcome;
use serde_json::json;

/// Escape a workflow command message such as `::error::` (percent-encoding)
pub fn safe_output_escape(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Render a run outcome as a JSON object.
///
/// Linked: `{"status":"linked","projectUrl":..,"itemId":..}`.
/// Skipped: `{"status":"skipped","reason":..}`.
pub fn link_outcome_json(outcome: &LinkOutcome) -> serde_json::Value {
    match outcome {
        LinkOutcome::Linked(result) => json!({
            "status": "linked",
            "projectUrl": result.project_url,
            "itemId": result.item_id,
        }),
        LinkOutcome::Skipped(reason) => json!({
            "status": "skipped",
            "reason": reason.to_string(),
        }),
    }
}
