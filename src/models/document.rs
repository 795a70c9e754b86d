use serde::{Deserialize, Serialize};

/// Uploaded source material, stored once and never mutated.
///
/// `presentation_id` is a weak reference: a lookup key only, not an ownership
/// edge. Deleting the presentation does not delete its documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub filename: String,
    pub content: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub presentation_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    pub filename: String,
    pub content: String,
    pub doc_type: String,
    pub presentation_id: Option<i64>,
}
