//! Prompt Builder - image prompts and generation request payloads
//!
//! Payloads are plain serde values. Sending them is the host's job.

use serde::{Deserialize, Serialize};

use crate::palette::Palette;

pub const IMAGE_GENERATIONS_PATH: &str = "/v1/images/generations";
pub const RESPONSES_PATH: &str = "/v1/responses";

pub const COPYWRITER_INSTRUCTIONS: &str = "You are an expert wedding invitation copywriter. \
Produce elegant, concise wording with double line breaks between sections. \
Use markdown bold for headline lines that must stand out.";

/// Compose the background-artwork prompt for the image model.
pub fn build_image_prompt(user_prompt: &str, palette: &Palette) -> String {
    let palette_hint = palette
        .colors()
        .iter()
        .map(|color| format!("hex {}", color))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Create a refined 5x7 wedding invitation background with the following style cues: {}. \
Use the palette ({}). Leave a soft, readable centre area with gentle lighting and avoid any text, \
typography, watermarks or signatures.",
        user_prompt, palette_hint
    )
}

pub fn build_wording_prompt(wording: &str, style_prompt: &str) -> String {
    format!(
        "Invitation details: {}. Style request: {}. Return only the invitation body.",
        wording, style_prompt
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub size: String,
    pub response_format: String,
}

impl ImageRequest {
    pub fn new(model: &str, size: &str, prompt: String) -> Self {
        Self {
            model: model.to_string(),
            prompt,
            size: size.to_string(),
            response_format: "b64_json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordingRequest {
    pub model: String,
    pub input: Vec<Message>,
    pub temperature: f64,
}

impl WordingRequest {
    pub fn new(model: &str, temperature: f64, wording: &str, style_prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            input: vec![
                Message {
                    role: Role::System,
                    content: COPYWRITER_INSTRUCTIONS.to_string(),
                },
                Message {
                    role: Role::User,
                    content: build_wording_prompt(wording, style_prompt),
                },
            ],
            temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_prompt_palette_hint() {
        let prompt = build_image_prompt(
            "minimalist linen texture",
            &Palette::from(["#aaa", "#bbb", "#ccc"]),
        );
        assert!(prompt.contains("hex #aaa"));
        assert!(prompt.contains("hex #bbb"));
        assert!(prompt.contains("hex #ccc"));
        assert!(prompt.contains("(hex #aaa, hex #bbb, hex #ccc)"));
        assert!(prompt.contains("avoid any text, typography, watermarks or signatures"));
        assert!(prompt.contains("style cues: minimalist linen texture."));
    }

    #[test]
    fn test_image_request_json() {
        let request = ImageRequest::new("gpt-image-1", "1024x1024", "p".to_string());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"], "b64_json");
        assert_eq!(json["size"], "1024x1024");
    }

    #[test]
    fn test_wording_request_messages() {
        let request = WordingRequest::new("gpt-4o-mini", 0.7, "Ann & Bo", "playful");
        assert_eq!(request.input.len(), 2);
        assert_eq!(request.input[0].role, Role::System);
        assert_eq!(
            request.input[1].content,
            "Invitation details: Ann & Bo. Style request: playful. Return only the invitation body."
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["input"][1]["role"], "user");
    }
}
