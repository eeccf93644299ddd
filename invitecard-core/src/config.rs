//! Studio Configuration - model names, endpoints and card sizes

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::studio::StudioError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioConfig {
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_image_size")]
    pub image_size: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_proxy_base")]
    pub proxy_base: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_preference_key")]
    pub preference_key: String,
}

fn default_text_model() -> String { "gpt-4o-mini".to_string() }
fn default_image_model() -> String { "gpt-image-1".to_string() }
fn default_image_size() -> String { "1024x1024".to_string() }
fn default_temperature() -> f64 { 0.7 }
fn default_proxy_base() -> String { "/api/openai-proxy?path=".to_string() }
fn default_api_base() -> String { "https://api.openai.com".to_string() }
fn default_preference_key() -> String { "invite_card_api_key".to_string() }

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            text_model: default_text_model(),
            image_model: default_image_model(),
            image_size: default_image_size(),
            temperature: default_temperature(),
            proxy_base: default_proxy_base(),
            api_base: default_api_base(),
            preference_key: default_preference_key(),
        }
    }
}

impl StudioConfig {
    /// Load from a JSON file. A missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, StudioError> {
        if !path.exists() {
            log::warn!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, StudioError> {
        serde_json::from_str(content).map_err(|e| StudioError::Config(e.to_string()))
    }

    /// Resolve the URL for an API path.
    ///
    /// A non-blank proxy base wins; otherwise the direct API base is used,
    /// which needs a key.
    pub fn endpoint(&self, path: &str, api_key: Option<&str>) -> Result<String, StudioError> {
        let proxy = self.proxy_base.trim();
        let has_key = api_key.map_or(false, |k| !k.trim().is_empty());

        if !proxy.is_empty() {
            Ok(format!("{}{}", proxy, path))
        } else if has_key {
            Ok(format!("{}{}", self.api_base.trim_end_matches('/'), path))
        } else {
            Err(StudioError::MissingCredentials)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardDimension {
    #[default]
    Square,
    Landscape,
    Portrait,
}

impl CardDimension {
    /// Canvas size in pixels, `[width, height]`.
    pub fn size(&self) -> [u32; 2] {
        match self {
            Self::Square => [800, 800],
            Self::Landscape => [1000, 600],
            Self::Portrait => [600, 1000],
        }
    }

    pub fn label(&self) -> String {
        let [w, h] = self.size();
        let name = match self {
            Self::Square => "Square",
            Self::Landscape => "Landscape",
            Self::Portrait => "Portrait",
        };
        format!("{} ({}×{})", name, w, h)
    }
}
