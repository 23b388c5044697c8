use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted `imagePrompt`, in characters.
pub const MAX_PROMPT_CHARS: usize = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "4:3")]
    Landscape,
    #[serde(rename = "16:9")]
    Widescreen,
}

impl ImageRatio {
    pub const ALL: [ImageRatio; 4] = [
        ImageRatio::Square,
        ImageRatio::Portrait,
        ImageRatio::Landscape,
        ImageRatio::Widescreen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageRatio::Square => "1:1",
            ImageRatio::Portrait => "3:4",
            ImageRatio::Landscape => "4:3",
            ImageRatio::Widescreen => "16:9",
        }
    }
}

impl fmt::Display for ImageRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated prompt, as exchanged with both the provider and the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImagePromptRecord {
    pub image_number: u32,
    pub image_prompt: String,
    pub image_ratio: ImageRatio,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisionRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl VisionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
        }
    }

    /// The trimmed vision text, or `None` when it is missing or blank.
    pub fn vision(&self) -> Option<&str> {
        self.prompt
            .as_deref()
            .map(str::trim)
            .filter(|prompt| !prompt.is_empty())
    }
}
