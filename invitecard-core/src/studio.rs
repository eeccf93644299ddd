//! Card Studio - single entry point for one card request
//!
//! `design` is pure. `compose` adds identity, a timestamp and digests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::{CardDimension, StudioConfig};
use crate::hashing::{compute_design_hash, compute_request_hash};
use crate::layout::{analyze_layout, resolve_align, Align, AlignAuthority, LayoutPlan};
use crate::palette::{keyword_palette, Palette};
use crate::prompts::{build_image_prompt, ImageRequest, WordingRequest};
use crate::text::{format_wording, Segment};
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Missing required field: {0}")]
    EmptyField(&'static str),

    #[error("Provide an API key or a proxy endpoint")]
    MissingCredentials,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

fn default_true() -> bool { true }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    #[serde(default)]
    pub wording: String,
    #[serde(default)]
    pub style_prompt: String,
    #[serde(default)]
    pub design_prompt: String,
    #[serde(default = "default_true")]
    pub auto_layout: bool,
    #[serde(default)]
    pub manual_align: Align,
    #[serde(default)]
    pub dimension: CardDimension,
}

impl CardRequest {
    pub fn new(
        wording: impl Into<String>,
        style_prompt: impl Into<String>,
        design_prompt: impl Into<String>,
    ) -> Self {
        Self {
            wording: wording.into(),
            style_prompt: style_prompt.into(),
            design_prompt: design_prompt.into(),
            auto_layout: true,
            manual_align: Align::default(),
            dimension: CardDimension::default(),
        }
    }

    /// Style and design prompts as the layout analyzer sees them.
    pub fn combined_prompt(&self) -> String {
        format!("{} {}", self.style_prompt, self.design_prompt)
    }
}

/// Everything a renderer needs for one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDesign {
    pub palette: Palette,
    pub layout: LayoutPlan,
    pub active_align: Align,
    pub paragraphs: Vec<Vec<Segment>>,
    pub image_prompt: String,
    pub fallback_background: String,
    pub overlay_background: Option<String>,
    pub canvas: [u32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedCard {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub engine_version: String,
    pub request_hash: String,
    pub design_hash: String,
    pub design: CardDesign,
}

pub struct CardStudio {
    config: StudioConfig,
}

impl CardStudio {
    pub fn new(config: StudioConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Derive the full design for a request. Never fails.
    pub fn design(&self, request: &CardRequest) -> CardDesign {
        let palette = keyword_palette(&request.design_prompt);
        let layout = analyze_layout(&request.wording, &request.combined_prompt(), &palette);
        let authority = AlignAuthority::from_auto_layout(request.auto_layout);
        let active_align = resolve_align(authority, &layout, request.manual_align);

        CardDesign {
            paragraphs: format_wording(&request.wording),
            image_prompt: build_image_prompt(&request.design_prompt, &palette),
            fallback_background: palette.gradient(),
            overlay_background: layout.overlay_background(),
            canvas: request.dimension.size(),
            active_align,
            layout,
            palette,
        }
    }

    /// Design plus id, timestamp and digests.
    pub fn compose(&self, request: &CardRequest) -> Result<ComposedCard, StudioError> {
        let design = self.design(request);
        let request_hash = compute_request_hash(request, ENGINE_VERSION)?;
        let design_hash = compute_design_hash(&design)?;

        log::debug!("composed card {}", design_hash);

        Ok(ComposedCard {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            request_hash,
            design_hash,
            design,
        })
    }

    /// Payload for background artwork.
    pub fn image_request(&self, request: &CardRequest) -> Result<ImageRequest, StudioError> {
        if request.design_prompt.trim().is_empty() {
            return Err(StudioError::EmptyField("designPrompt"));
        }
        let palette = keyword_palette(&request.design_prompt);
        Ok(ImageRequest::new(
            &self.config.image_model,
            &self.config.image_size,
            build_image_prompt(&request.design_prompt, &palette),
        ))
    }

    /// Payload for generated wording.
    pub fn wording_request(&self, request: &CardRequest) -> Result<WordingRequest, StudioError> {
        if request.wording.trim().is_empty() {
            return Err(StudioError::EmptyField("wording"));
        }
        Ok(WordingRequest::new(
            &self.config.text_model,
            self.config.temperature,
            &request.wording,
            &request.style_prompt,
        ))
    }

    pub fn endpoint(&self, path: &str, api_key: Option<&str>) -> Result<String, StudioError> {
        self.config.endpoint(path, api_key)
    }
}

impl Default for CardStudio {
    fn default() -> Self {
        Self::new(StudioConfig::default())
    }
}
