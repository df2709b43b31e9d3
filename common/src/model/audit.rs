use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of auditing a member document against the schema template.
///
/// `missingFields` lists every empty/absent leaf as a dotted path
/// (`"personalDetails.phoneNo"`); `detailed` is a nested object holding just
/// the template default at each missing leaf.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingFieldReport {
    pub missing_fields: Vec<String>,
    pub detailed: Value,
}
