//! Presentation view model
//!
//! Turns a [`StudioState`] snapshot into the data a UI needs to draw the
//! controls and the gallery. Styling is left entirely to the renderer.

use chrono::Local;
use serde::Serialize;
use studio_inference::ImageBlob;

use crate::controller::StudioState;
use crate::error::Result;
use crate::prompt::presets;
use crate::types::{BrandIdentity, DesignCategory, GeneratedImage, ImageId};

pub const GALLERY_HEADING: &str = "Recent Designs";
pub const BUSY_LABEL: &str = "Crafting...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderView {
    pub title: &'static str,
    pub tagline: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandOption {
    pub brand: BrandIdentity,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOption {
    pub category: DesignCategory,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptView {
    pub heading: &'static str,
    pub text: String,
    pub placeholder: &'static str,
    pub presets: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitButton {
    pub label: &'static str,
    pub enabled: bool,
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryCard {
    pub id: ImageId,
    /// `data:image/png;base64,...`
    pub src: String,
    pub alt: String,
    /// Local wall-clock time of creation
    pub time_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryView {
    pub heading: &'static str,
    pub cards: Vec<GalleryCard>,
}

/// Everything a renderer draws for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioView {
    pub header: HeaderView,
    pub brands: Vec<BrandOption>,
    pub categories: Vec<CategoryOption>,
    pub prompt: PromptView,
    pub submit: SubmitButton,
    /// Absent until the first image arrives
    pub gallery: Option<GalleryView>,
}

impl StudioView {
    pub fn render(state: &StudioState) -> Self {
        let brand = state.brand;

        Self {
            header: HeaderView {
                title: brand.display_name(),
                tagline: brand.tagline(),
            },
            brands: BrandIdentity::ALL
                .into_iter()
                .map(|b| BrandOption {
                    brand: b,
                    label: b.toggle_label(),
                    selected: b == brand,
                })
                .collect(),
            categories: DesignCategory::ALL
                .into_iter()
                .map(|c| CategoryOption {
                    category: c,
                    label: c.label(),
                    selected: c == state.category,
                })
                .collect(),
            prompt: PromptView {
                heading: workspace_heading(brand),
                text: state.prompt_text.clone(),
                placeholder: placeholder(brand),
                presets: presets(brand, state.category).to_vec(),
            },
            submit: SubmitButton {
                label: if state.is_generating() {
                    BUSY_LABEL
                } else {
                    submit_label(brand)
                },
                enabled: state.can_submit(),
                busy: state.is_generating(),
            },
            gallery: render_gallery(&state.history),
        }
    }
}

fn render_gallery(history: &[GeneratedImage]) -> Option<GalleryView> {
    if history.is_empty() {
        return None;
    }

    Some(GalleryView {
        heading: GALLERY_HEADING,
        cards: history
            .iter()
            .map(|image| GalleryCard {
                id: image.id,
                src: image.data_uri(),
                alt: image.prompt.clone(),
                time_label: image
                    .timestamp
                    .with_timezone(&Local)
                    .format("%H:%M:%S")
                    .to_string(),
            })
            .collect(),
    })
}

fn workspace_heading(brand: BrandIdentity) -> &'static str {
    match brand {
        BrandIdentity::Mississippi => "Design Your Collection",
        BrandIdentity::OleBrook => "Create Team Spirit",
    }
}

fn placeholder(brand: BrandIdentity) -> &'static str {
    match brand {
        BrandIdentity::Mississippi => {
            "Describe your vision (e.g., A minimalist black leotard with satin ribbon details...)"
        }
        BrandIdentity::OleBrook => {
            "Describe your gear (e.g., A distressed royal blue t-shirt with a vintage bulldog mascot...)"
        }
    }
}

fn submit_label(brand: BrandIdentity) -> &'static str {
    match brand {
        BrandIdentity::Mississippi => "Generate Design",
        BrandIdentity::OleBrook => "Launch Product",
    }
}

/// Decode a gallery image into an `image/png` blob for opening or saving
pub fn open_image(image: &GeneratedImage) -> Result<ImageBlob> {
    image.to_blob()
}
