//! Domain types: brands, categories and gallery records

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use studio_inference::{ImageBlob, ImagePayload};

use crate::error::{Result, StudioError};

/// One of the two marketing personas a design must match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BrandIdentity {
    #[default]
    Mississippi,
    OleBrook,
}

impl BrandIdentity {
    pub const ALL: [BrandIdentity; 2] = [BrandIdentity::Mississippi, BrandIdentity::OleBrook];

    /// Wire identifier ("MISSISSIPPI", "OLE_BROOK")
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mississippi => "MISSISSIPPI",
            Self::OleBrook => "OLE_BROOK",
        }
    }

    /// Name used in prompts and page headers
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Mississippi => "Mississippi Dancewear",
            Self::OleBrook => "Ole Brook Dancewear",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            Self::Mississippi => "The National Collection",
            Self::OleBrook => "The Local Spirit Brand",
        }
    }

    /// Short label shown on the brand toggle
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Mississippi => "MISSISSIPPI",
            Self::OleBrook => "OLE BROOK",
        }
    }
}

impl fmt::Display for BrandIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrandIdentity {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| StudioError::UnknownBrand(s.to_string()))
    }
}

/// Garment or asset class narrowing the style guidance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DesignCategory {
    #[default]
    Everyday,
    Sportswear,
    Logo,
}

impl DesignCategory {
    pub const ALL: [DesignCategory; 3] = [
        DesignCategory::Everyday,
        DesignCategory::Sportswear,
        DesignCategory::Logo,
    ];

    /// Wire identifier, also used verbatim in the composed prompt
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Everyday => "EVERYDAY",
            Self::Sportswear => "SPORTSWEAR",
            Self::Logo => "LOGO",
        }
    }

    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            Self::Everyday => "Everyday Wear",
            Self::Sportswear => "Sportswear",
            Self::Logo => "Brand & Logo",
        }
    }
}

impl fmt::Display for DesignCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DesignCategory {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| StudioError::UnknownCategory(s.to_string()))
    }
}

/// A validated submission
///
/// The prompt is kept exactly as typed; only its trimmed form is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub brand: BrandIdentity,
    pub category: DesignCategory,
    pub user_prompt: String,
}

impl GenerationRequest {
    pub fn new(
        brand: BrandIdentity,
        category: DesignCategory,
        user_prompt: impl Into<String>,
    ) -> Result<Self> {
        let user_prompt = user_prompt.into();
        if user_prompt.trim().is_empty() {
            return Err(StudioError::validation("prompt is empty"));
        }
        Ok(Self {
            brand,
            category,
            user_prompt,
        })
    }
}

/// Gallery identifier, strictly increasing within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub u64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A generated design kept in the gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub id: ImageId,
    /// Base64 image data
    pub image_data: String,
    /// Raw user text (not the composed prompt)
    pub prompt: String,
    pub timestamp: DateTime<Utc>,
    pub brand: BrandIdentity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<DesignCategory>,
}

impl GeneratedImage {
    /// Record a successful generation for `request`
    pub fn from_payload(
        id: ImageId,
        timestamp: DateTime<Utc>,
        request: &GenerationRequest,
        payload: ImagePayload,
    ) -> Self {
        Self {
            id,
            image_data: payload.data,
            prompt: request.user_prompt.clone(),
            timestamp,
            brand: request.brand,
            category: Some(request.category),
        }
    }

    /// `data:image/png;base64,...` URI for inline rendering
    pub fn data_uri(&self) -> String {
        studio_inference::image::data_uri(&self.image_data)
    }

    /// Decode into an `image/png` blob for opening in a new tab or saving
    pub fn to_blob(&self) -> Result<ImageBlob> {
        Ok(studio_inference::image::blob_from_base64(&self.image_data)?)
    }
}
