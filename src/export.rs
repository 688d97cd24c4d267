use crate::{
    error::{BannerError, Result},
    models::Banner,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::{Path, PathBuf};

/// Split a `data:<mime>;base64,<payload>` URL into its MIME type and bytes.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| BannerError::ResponseError("Image URL is not a data: URL".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| BannerError::ResponseError("Malformed data: URL".into()))?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| BannerError::ResponseError("Only base64 data: URLs are supported".into()))?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| BannerError::ResponseError(format!("Failed to decode image: {}", e)))?;

    Ok((mime_type.to_string(), bytes))
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    }
}

/// Write every banner of a round into `dir`, one file per format.
pub fn save_banners(banners: &[Banner], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S%.3f");

    let mut paths = Vec::with_capacity(banners.len());
    for banner in banners {
        let (mime_type, bytes) = decode_data_url(&banner.image_url)?;
        let filename = format!(
            "banner_{}_{}.{}",
            banner.aspect_ratio.as_str().replace(':', "x"),
            timestamp,
            extension_for(&mime_type)
        );
        let path = dir.join(filename);
        fs::write(&path, bytes)?;
        log::info!("💾 Saved {} banner to {}", banner.name, path.display());
        paths.push(path);
    }

    Ok(paths)
}
