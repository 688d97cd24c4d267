use crate::{error::Result, models::AspectRatio};
use async_trait::async_trait;

/// The remote image capability a round fans out to.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image and return a URL the caller can display
    /// (usually a `data:` URL).
    async fn generate_banner_image(&self, prompt: &str, aspect_ratio: AspectRatio)
        -> Result<String>;

    fn name(&self) -> &str;
}

/// Wrap raw base64 image bytes in a displayable `data:` URL.
pub fn to_data_url(mime_type: &str, base64_data: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64_data)
}
