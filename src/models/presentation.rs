use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Slide layout, closed enumeration. Wire names match the client catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideLayout {
    #[serde(rename = "title-bullets")]
    TitleBullets,
    #[serde(rename = "image-text")]
    ImageText,
    #[serde(rename = "full-image")]
    FullImage,
}

impl Default for SlideLayout {
    fn default() -> Self {
        SlideLayout::TitleBullets
    }
}

/// A single slide. Slides exist only inside a presentation's `slides` array
/// and are always rewritten as part of a whole-array replace; the store never
/// addresses them individually. Slide ids are caller/generator-assigned and
/// unique within one presentation by convention, not enforcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub layout: SlideLayout,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "1:1")]
    Square,
}

/// Font size, totally ordered. The step helpers back the client's font
/// increment/decrement controls; no server route changes settings piecemeal
/// (settings are only ever replaced wholesale via PATCH).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    pub fn step_up(self) -> Self {
        match self {
            FontSize::Small => FontSize::Medium,
            _ => FontSize::Large,
        }
    }

    pub fn step_down(self) -> Self {
        match self {
            FontSize::Large => FontSize::Medium,
            _ => FontSize::Small,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationSettings {
    pub ratio: AspectRatio,
    pub font_size: FontSize,
    pub animations: bool,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        PresentationSettings {
            ratio: AspectRatio::Wide,
            font_size: FontSize::Medium,
            animations: true,
        }
    }
}

/// A presentation as stored and served. `id` and `created_at` are assigned by
/// the store at creation and immutable thereafter. `theme` is an opaque
/// identifier from a client-side catalog and is stored as-is, valid or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub id: i64,
    pub title: String,
    pub prompt: String,
    pub slides: Vec<Slide>,
    pub theme: String,
    pub settings: PresentationSettings,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a presentation. The store assigns id and created_at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPresentation {
    pub title: String,
    pub prompt: String,
    pub slides: Vec<Slide>,
    pub theme: String,
    pub settings: PresentationSettings,
}

/// PATCH payload. Every field present wholly replaces the stored field; a
/// supplied `settings` or `slides` value is swapped in as a unit, never
/// deep-merged. `id` and `created_at` are deliberately absent: unknown keys
/// in the request body are ignored, so neither can be overwritten.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub slides: Option<Vec<Slide>>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub settings: Option<PresentationSettings>,
}
