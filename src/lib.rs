//! Generate a full set of advertising banners, one per common aspect ratio,
//! from a single product description.

pub mod composer;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod logger;
pub mod models;
pub mod orchestrator;

pub use composer::{compose_prompt, compose_requests, ProductInput};
pub use config::{BannerConfig, BedrockConfig, GeminiConfig, ProviderKind};
pub use error::{BannerError, Result};
pub use generator::{
    create_generator, BedrockImageGenerator, GeminiImageGenerator, ImageGenerator,
};
pub use models::{
    AspectRatio, Banner, BannerFormat, DesignTemplate, GenerationOutcome, GenerationRequest,
    BANNER_FORMATS, DESIGN_TEMPLATES,
};
pub use orchestrator::{BannerStudio, RoundOutcome, SkipReason};
