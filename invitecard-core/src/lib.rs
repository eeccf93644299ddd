//! Invitation Card Studio - Core Engine
//!
//! Turns wording and free-text style prompts into a palette, a layout plan,
//! formatted paragraphs and generation payloads.
//!
//! # Ground Rules
//! 1. Derivation is pure: same inputs, same outputs
//! 2. Bad input falls back, it never fails
//! 3. Keyword rules keep their declared precedence
//! 4. Preferences are injected, never read ambiently

pub mod color;
pub mod palette;
pub mod rules;
pub mod layout;
pub mod text;
pub mod prompts;
pub mod config;
pub mod preferences;
pub mod hashing;
pub mod studio;

pub use color::{apply_alpha, clamp01, hex_to_rgb, luminance, Rgb};
pub use palette::{keyword_palette, Palette};
pub use layout::{analyze_layout, pick_alignment, Align, AlignAuthority, LayoutPlan};
pub use text::{emphasise_inline, sanitize_paragraphs, Segment};
pub use prompts::{build_image_prompt, ImageRequest, WordingRequest};
pub use config::{CardDimension, StudioConfig};
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceStore};
pub use hashing::{canonical_json, compute_design_hash, compute_request_hash};
pub use studio::{CardDesign, CardRequest, CardStudio, ComposedCard, StudioError};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
