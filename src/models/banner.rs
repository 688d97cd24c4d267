use super::format::{AspectRatio, BannerFormat};
use serde::{Deserialize, Serialize};

/// One call to the image capability. Built per round, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub image_url: String,
    pub aspect_ratio: AspectRatio,
    pub name: String,
}

impl Banner {
    pub fn from_format(format: &BannerFormat, image_url: String) -> Self {
        Self {
            image_url,
            aspect_ratio: format.aspect_ratio,
            name: format.name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success(Banner),
    Failure { format: String, reason: String },
}
