use super::traits::{to_data_url, ImageGenerator};
use crate::{
    config::BedrockConfig,
    error::{BannerError, Result},
    models::AspectRatio,
};
use async_trait::async_trait;
use aws_sdk_bedrockruntime::{primitives::Blob, Client};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
struct TitanImageResponse {
    #[serde(default)]
    images: Vec<String>,
    error: Option<String>,
}

/// Titan only accepts a fixed list of sizes; these are the closest to each ratio.
pub fn titan_dimensions(aspect_ratio: AspectRatio) -> (u32, u32) {
    match aspect_ratio {
        AspectRatio::Landscape16x9 => (1152, 640),
        AspectRatio::Landscape4x3 => (1152, 896),
        AspectRatio::Square => (1024, 1024),
        AspectRatio::Portrait3x4 => (896, 1152),
        AspectRatio::Portrait9x16 => (768, 1408),
    }
}

#[derive(Clone)]
pub struct BedrockImageGenerator {
    client: Client,
    model_id: String,
}

impl BedrockImageGenerator {
    pub async fn new(config: BedrockConfig) -> Result<Self> {
        let region = aws_sdk_bedrockruntime::config::Region::new(
            config.region.unwrap_or_else(|| "us-east-1".to_string()),
        );

        let aws_config = if let (Some(access_key), Some(secret_key)) =
            (&config.access_key, &config.secret_key)
        {
            aws_config::from_env()
                .credentials_provider(aws_sdk_bedrockruntime::config::Credentials::new(
                    access_key,
                    secret_key,
                    None,
                    None,
                    "bannergen",
                ))
                .region(region)
                .load()
                .await
        } else {
            aws_config::from_env().region(region).load().await
        };

        Ok(Self {
            client: Client::new(&aws_config),
            model_id: config.model_id,
        })
    }
}

#[async_trait]
impl ImageGenerator for BedrockImageGenerator {
    async fn generate_banner_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<String> {
        let (width, height) = titan_dimensions(aspect_ratio);
        let request_payload = json!({
            "taskType": "TEXT_IMAGE",
            "textToImageParams": {
                "text": prompt
            },
            "imageGenerationConfig": {
                "numberOfImages": 1,
                "width": width,
                "height": height,
                "quality": "standard",
                "cfgScale": 8.0
            }
        });

        let request_json = serde_json::to_string(&request_payload)?;

        log::info!(
            "Generating {} image ({}x{}) with model: {}",
            aspect_ratio,
            width,
            height,
            self.model_id
        );

        let response = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(request_json.into_bytes()))
            .send()
            .await
            .map_err(|e| BannerError::AwsError(e.to_string()))?;

        let titan_response: TitanImageResponse =
            serde_json::from_slice(&response.body.into_inner())
                .map_err(|e| BannerError::ResponseError(e.to_string()))?;

        if let Some(error) = titan_response.error {
            return Err(BannerError::ResponseError(error));
        }

        let image = titan_response
            .images
            .into_iter()
            .next()
            .ok_or_else(|| BannerError::ResponseError("No images generated".into()))?;

        Ok(to_data_url("image/png", &image))
    }

    fn name(&self) -> &str {
        "bedrock"
    }
}
