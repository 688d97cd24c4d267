pub mod bedrock;
pub mod gemini;
pub mod traits;

use crate::{
    config::{BannerConfig, ProviderKind},
    error::Result,
};
use std::sync::Arc;

pub use bedrock::BedrockImageGenerator;
pub use gemini::GeminiImageGenerator;
pub use traits::{to_data_url, ImageGenerator};

/// Build the backend selected by `config.provider`.
pub async fn create_generator(config: &BannerConfig) -> Result<Arc<dyn ImageGenerator>> {
    let generator: Arc<dyn ImageGenerator> = match config.provider {
        ProviderKind::Gemini => Arc::new(GeminiImageGenerator::new(config.gemini.clone())?),
        ProviderKind::Bedrock => {
            Arc::new(BedrockImageGenerator::new(config.bedrock.clone()).await?)
        }
    };

    log::debug!("Using image generator: {}", generator.name());
    Ok(generator)
}
