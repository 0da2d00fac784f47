use serde::{Deserialize, Serialize};

/// Provider-agnostic issue record, normalized from a backend response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Stable identifier in the source tracker (internal id, not the human-facing number)
    pub key: String,
    pub title: String,
    /// Category derived from tracker labels, when a backend supplies them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    pub suggested_branch_name: String,
}
