use crate::error::{BannerError, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGEN_MODEL: &str = "imagen-3.0-generate-002";
pub const DEFAULT_BEDROCK_IMAGE_MODEL: &str = "amazon.titan-image-generator-v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    Bedrock,
}

impl FromStr for ProviderKind {
    type Err = BannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "imagen" => Ok(ProviderKind::Gemini),
            "bedrock" | "titan" => Ok(ProviderKind::Bedrock),
            other => Err(BannerError::ConfigError(format!(
                "Unknown image provider '{}', expected 'gemini' or 'bedrock'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_IMAGEN_MODEL.to_string(),
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok();
        let base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());
        let model = env::var("IMAGEN_MODEL").unwrap_or_else(|_| DEFAULT_IMAGEN_MODEL.to_string());

        GeminiConfig {
            api_key,
            base_url,
            model,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct BedrockConfig {
    pub region: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub model_id: String,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        BedrockConfig {
            region: None,
            access_key: None,
            secret_key: None,
            model_id: DEFAULT_BEDROCK_IMAGE_MODEL.to_string(),
        }
    }
}

impl BedrockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let region = env::var("AWS_REGION")
            .or_else(|_| env::var("AWS_DEFAULT_REGION"))
            .ok();
        let model_id = env::var("BEDROCK_IMAGE_MODEL")
            .unwrap_or_else(|_| DEFAULT_BEDROCK_IMAGE_MODEL.to_string());

        // Credentials are left to the default AWS chain unless set explicitly.
        BedrockConfig {
            region,
            model_id,
            ..Default::default()
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct BannerConfig {
    pub provider: ProviderKind,
    pub gemini: GeminiConfig,
    pub bedrock: BedrockConfig,
    pub output_dir: PathBuf,
}

impl Default for BannerConfig {
    fn default() -> Self {
        BannerConfig {
            provider: ProviderKind::default(),
            gemini: GeminiConfig::default(),
            bedrock: BedrockConfig::default(),
            output_dir: PathBuf::from("banners"),
        }
    }
}

impl BannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self> {
        let provider = match env::var("BANNER_PROVIDER") {
            Ok(value) => value.parse()?,
            Err(_) => ProviderKind::default(),
        };
        let output_dir = env::var("BANNER_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("banners"));

        Ok(BannerConfig {
            provider,
            gemini: GeminiConfig::from_env(),
            bedrock: BedrockConfig::from_env(),
            output_dir,
        })
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self.provider = ProviderKind::Gemini;
        self
    }

    pub fn with_bedrock(mut self, config: BedrockConfig) -> Self {
        self.bedrock = config;
        self.provider = ProviderKind::Bedrock;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
