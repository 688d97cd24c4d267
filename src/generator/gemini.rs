use super::traits::{to_data_url, ImageGenerator};
use crate::{
    config::GeminiConfig,
    error::{BannerError, Result},
    models::AspectRatio,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

/// Imagen models served by the Gemini API `:predict` endpoint.
#[derive(Clone)]
pub struct GeminiImageGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiImageGenerator {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                BannerError::ConfigError("GEMINI_API_KEY (or API_KEY) is not set".into())
            })?;

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:predict", self.base_url, self.model)
    }
}

#[async_trait]
impl ImageGenerator for GeminiImageGenerator {
    async fn generate_banner_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<String> {
        let payload = json!({
            "instances": [{ "prompt": prompt }],
            "parameters": {
                "sampleCount": 1,
                "aspectRatio": aspect_ratio.as_str()
            }
        });

        log::info!("Generating {} image with model: {}", aspect_ratio, self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BannerError::RequestError(format!(
                "Imagen returned {}: {}",
                status, body
            )));
        }

        let predict: PredictResponse = response
            .json()
            .await
            .map_err(|e| BannerError::ResponseError(e.to_string()))?;

        let prediction = predict
            .predictions
            .into_iter()
            .find(|p| p.bytes_base64_encoded.is_some())
            .ok_or_else(|| BannerError::ResponseError("No images generated".into()))?;

        let mime_type = prediction.mime_type.as_deref().unwrap_or("image/png");
        let data = prediction.bytes_base64_encoded.unwrap_or_default();
        Ok(to_data_url(mime_type, &data))
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
