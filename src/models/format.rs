use crate::error::{BannerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Landscape16x9,
    #[serde(rename = "4:3")]
    Landscape4x3,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait3x4,
    #[serde(rename = "9:16")]
    Portrait9x16,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Landscape16x9,
        AspectRatio::Landscape4x3,
        AspectRatio::Square,
        AspectRatio::Portrait3x4,
        AspectRatio::Portrait9x16,
    ];

    /// The literal ratio text, as the image APIs expect it.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape16x9 => "16:9",
            AspectRatio::Landscape4x3 => "4:3",
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait3x4 => "3:4",
            AspectRatio::Portrait9x16 => "9:16",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = BannerError;

    fn from_str(s: &str) -> Result<Self> {
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == s.trim())
            .ok_or_else(|| BannerError::ConfigError(format!("Unsupported aspect ratio: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BannerFormat {
    pub name: &'static str,
    pub aspect_ratio: AspectRatio,
    pub description: &'static str,
}

pub static BANNER_FORMATS: [BannerFormat; 5] = [
    BannerFormat {
        name: "Leaderboard / Banner",
        aspect_ratio: AspectRatio::Landscape16x9,
        description: "Wide format for website headers, hero sections and video thumbnails.",
    },
    BannerFormat {
        name: "Medium Rectangle",
        aspect_ratio: AspectRatio::Landscape4x3,
        description: "Versatile format for in-content ads and sidebars.",
    },
    BannerFormat {
        name: "Square",
        aspect_ratio: AspectRatio::Square,
        description: "Feed posts on Instagram, Facebook and LinkedIn.",
    },
    BannerFormat {
        name: "Portrait",
        aspect_ratio: AspectRatio::Portrait3x4,
        description: "Taller feed posts that take up more screen space on mobile.",
    },
    BannerFormat {
        name: "Skyscraper",
        aspect_ratio: AspectRatio::Portrait9x16,
        description: "Full-screen stories, reels and vertical sidebar ads.",
    },
];
