use serde::{Deserialize, Serialize};

/// An uploaded slide image, stored once and never mutated.
///
/// `url` is opaque (a data URI in this implementation). `slide_index` is the
/// position in the owning presentation's slide array at upload time; it is
/// not a stable slide id and goes stale if slides are reordered or deleted.
/// The record is advisory: merging the url into `slides[j].images` is a
/// client-driven follow-up PATCH, so staleness cannot corrupt a presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideImageRecord {
    pub id: i64,
    pub filename: String,
    pub url: String,
    pub slide_index: i64,
    pub presentation_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSlideImage {
    pub filename: String,
    pub url: String,
    pub slide_index: i64,
    pub presentation_id: Option<i64>,
}
