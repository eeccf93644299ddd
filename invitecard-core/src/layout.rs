//! Layout Analyzer - alignment, overlay and contrast decisions
//!
//! Every decision is a pure function of (wording, prompt text, palette).

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::color::{apply_alpha, clamp01, luminance};
use crate::palette::Palette;
use crate::rules::{DecisionTable, KeywordSet};

pub const WHITE_TEXT: &str = "#f8fafc";
pub const SLATE_TEXT: &str = "#1f2937";
pub const FALLBACK_DEEP: &str = "#0f172a";
pub const FALLBACK_MID: &str = "#1f2937";
pub const FALLBACK_ACCENT: &str = "#c08457";

pub const SOFT_SHADOW: &str = "0 14px 60px rgba(15, 23, 42, 0.25)";
pub const STRONG_SHADOW: &str = "0 18px 80px rgba(15, 23, 42, 0.35)";

pub const BUSY_OPACITY: f64 = 0.42;
pub const DARK_OPACITY: f64 = 0.38;
pub const CALM_OPACITY: f64 = 0.24;

/// Average palette luminance above which the card counts as light.
pub const LIGHT_PALETTE_THRESHOLD: f64 = 0.65;

/// Lines longer than this push untagged wording to the left.
pub const LONG_LINE_CHARS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// Whether the computed or the user's alignment is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignAuthority {
    #[default]
    Auto,
    Manual,
}

impl AlignAuthority {
    pub fn from_auto_layout(auto_layout: bool) -> Self {
        if auto_layout {
            Self::Auto
        } else {
            Self::Manual
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPlan {
    pub align: Align,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_color: Option<String>,
    pub overlay_opacity: f64,
    pub text_color: String,
    pub shadow: String,
    pub accent: String,
}

impl LayoutPlan {
    /// Overlay as a CSS rgba color, if the plan has one.
    pub fn overlay_background(&self) -> Option<String> {
        self.overlay_color
            .as_deref()
            .map(|color| apply_alpha(color, self.overlay_opacity))
    }
}

/// Tone classification of the combined prompt and wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tone {
    pub busy: bool,
    pub dark: bool,
}

fn alignment_table() -> &'static DecisionTable<Align> {
    static TABLE: OnceLock<DecisionTable<Align>> = OnceLock::new();
    TABLE.get_or_init(|| {
        DecisionTable::new()
            .rule(
                KeywordSet::new("align_right", &["right-aligned", "align to the right", "formal royal"]),
                Align::Right,
            )
            .rule(
                KeywordSet::new(
                    "align_left",
                    &["left-aligned", "modern", "minimal", "editorial", "clean"],
                ),
                Align::Left,
            )
            .rule(
                KeywordSet::new(
                    "align_center",
                    &["center", "centre", "traditional", "classic", "ceremony"],
                ),
                Align::Center,
            )
    })
}

fn busy_keywords() -> &'static KeywordSet {
    static SET: OnceLock<KeywordSet> = OnceLock::new();
    SET.get_or_init(|| {
        KeywordSet::new(
            "busy",
            &[
                "ornate",
                "detailed",
                "pattern",
                "floral",
                "paisley",
                "motif",
                "illustrated",
                "luxurious",
                "vibrant",
            ],
        )
    })
}

fn dark_keywords() -> &'static KeywordSet {
    static SET: OnceLock<KeywordSet> = OnceLock::new();
    SET.get_or_init(|| {
        KeywordSet::new("dark", &["midnight", "navy", "noir", "moody", "night", "galaxy"])
    })
}

fn line_breaks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n+").expect("static pattern"))
}

fn combined_lower(text: &str, prompt: &str) -> String {
    format!("{} {}", prompt, text).to_lowercase()
}

/// Decide alignment for `text` under `prompt`.
///
/// Keyword rules are checked right, then left, then center. Without a
/// keyword, any non-blank line over [`LONG_LINE_CHARS`] characters means
/// left, otherwise center.
pub fn pick_alignment(text: &str, prompt: &str) -> Align {
    let combined = combined_lower(text, prompt);
    if let Some(align) = alignment_table().decide(&combined) {
        return align;
    }

    let long_line = line_breaks()
        .split(text)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .any(|line| line.chars().count() > LONG_LINE_CHARS);

    if long_line {
        Align::Left
    } else {
        Align::Center
    }
}

pub fn classify_tone(text: &str, prompt: &str) -> Tone {
    let combined = combined_lower(text, prompt);
    Tone {
        busy: busy_keywords().matches(&combined),
        dark: dark_keywords().matches(&combined),
    }
}

pub fn average_luminance(palette: &Palette) -> f64 {
    let colors = palette.colors();
    colors.iter().map(|c| luminance(c)).sum::<f64>() / colors.len() as f64
}

/// Build the layout plan for one rendering.
pub fn analyze_layout(text: &str, prompt: &str, palette: &Palette) -> LayoutPlan {
    let align = pick_alignment(text, prompt);
    let tone = classify_tone(text, prompt);

    let overlay_color = if tone.busy || tone.dark {
        palette.slot(2).unwrap_or(FALLBACK_DEEP)
    } else {
        palette.slot(1).unwrap_or(FALLBACK_MID)
    };

    let overlay_opacity = if tone.busy {
        BUSY_OPACITY
    } else if tone.dark {
        DARK_OPACITY
    } else {
        CALM_OPACITY
    };

    let light = average_luminance(palette) > LIGHT_PALETTE_THRESHOLD;
    let text_color = if light && !tone.busy { SLATE_TEXT } else { WHITE_TEXT };
    let shadow = if light { SOFT_SHADOW } else { STRONG_SHADOW };

    log::debug!(
        "layout: align={:?} busy={} dark={} light={}",
        align,
        tone.busy,
        tone.dark,
        light
    );

    LayoutPlan {
        align,
        overlay_color: Some(overlay_color.to_string()),
        overlay_opacity: clamp01(overlay_opacity),
        text_color: text_color.to_string(),
        shadow: shadow.to_string(),
        accent: palette.slot(1).unwrap_or(FALLBACK_ACCENT).to_string(),
    }
}

/// The alignment actually shown.
pub fn resolve_align(authority: AlignAuthority, plan: &LayoutPlan, manual: Align) -> Align {
    match authority {
        AlignAuthority::Auto => plan.align,
        AlignAuthority::Manual => manual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::keyword_palette;

    #[test]
    fn test_right_beats_left() {
        assert_eq!(pick_alignment("anything", "a formal royal affair"), Align::Right);
        assert_eq!(
            pick_alignment("a minimal card", "a formal royal affair"),
            Align::Right
        );
    }

    #[test]
    fn test_left_beats_center() {
        assert_eq!(pick_alignment("wedding ceremony", "modern serif"), Align::Left);
    }

    #[test]
    fn test_center_keywords() {
        assert_eq!(pick_alignment("", "Traditional script"), Align::Center);
        assert_eq!(pick_alignment("", "centre stage"), Align::Center);
    }

    #[test]
    fn test_long_line_goes_left() {
        let long = "x".repeat(65);
        assert_eq!(pick_alignment(&format!("short\n\n{}", long), ""), Align::Left);
        assert_eq!(pick_alignment(&"x".repeat(64), ""), Align::Center);
        assert_eq!(pick_alignment("", ""), Align::Center);
    }

    #[test]
    fn test_long_line_counts_chars_not_bytes() {
        let accented = "é".repeat(40);
        assert_eq!(pick_alignment(&accented, ""), Align::Center);
    }

    #[test]
    fn test_busy_overlay() {
        let palette = Palette::from(["#aaa", "#bbb", "#ccc"]);
        let plan = analyze_layout("", "ornate floral pattern", &palette);
        assert_eq!(plan.overlay_opacity, BUSY_OPACITY);
        assert_eq!(plan.overlay_color.as_deref(), Some("#ccc"));
    }

    #[test]
    fn test_dark_overlay() {
        let palette = keyword_palette("midnight navy");
        let plan = analyze_layout("", "midnight navy", &palette);
        assert_eq!(plan.overlay_opacity, DARK_OPACITY);
        assert_eq!(plan.overlay_color.as_deref(), Some(palette.deep()));
    }

    #[test]
    fn test_calm_overlay_uses_mid() {
        let palette = Palette::default();
        let plan = analyze_layout("Join us", "soft watercolor", &palette);
        assert_eq!(plan.overlay_opacity, CALM_OPACITY);
        assert_eq!(plan.overlay_color.as_deref(), Some(palette.mid()));
        assert_eq!(plan.accent, palette.mid());
    }

    #[test]
    fn test_blank_slots_fall_back() {
        let palette = Palette::new("#fff", "", "");
        let calm = analyze_layout("", "", &palette);
        assert_eq!(calm.overlay_color.as_deref(), Some(FALLBACK_MID));
        assert_eq!(calm.accent, FALLBACK_ACCENT);

        let busy = analyze_layout("", "vibrant", &palette);
        assert_eq!(busy.overlay_color.as_deref(), Some(FALLBACK_DEEP));
    }

    #[test]
    fn test_light_palette_dark_text() {
        let palette = Palette::from(["#ffffff", "#fefefe", "#fafafa"]);
        let plan = analyze_layout("", "", &palette);
        assert_eq!(plan.text_color, SLATE_TEXT);
        assert_eq!(plan.shadow, SOFT_SHADOW);

        let busy = analyze_layout("", "paisley", &palette);
        assert_eq!(busy.text_color, WHITE_TEXT);
        assert_eq!(busy.shadow, SOFT_SHADOW);
    }

    #[test]
    fn test_light_threshold_is_strict() {
        // #d3d3d3 averages ~0.6514, #d2d2d2 ~0.6445
        let above = Palette::from(["#d3d3d3", "#d3d3d3", "#d3d3d3"]);
        assert!(average_luminance(&above) > LIGHT_PALETTE_THRESHOLD);
        let plan = analyze_layout("", "", &above);
        assert_eq!(plan.text_color, SLATE_TEXT);
        assert_eq!(plan.shadow, SOFT_SHADOW);

        let below = Palette::from(["#d2d2d2", "#d2d2d2", "#d2d2d2"]);
        assert!(average_luminance(&below) < LIGHT_PALETTE_THRESHOLD);
        let plan = analyze_layout("", "", &below);
        assert_eq!(plan.text_color, WHITE_TEXT);
        assert_eq!(plan.shadow, STRONG_SHADOW);
    }

    #[test]
    fn test_dark_palette_white_text() {
        let palette = Palette::from(["#111111", "#222222", "#333333"]);
        let plan = analyze_layout("", "", &palette);
        assert_eq!(plan.text_color, WHITE_TEXT);
        assert_eq!(plan.shadow, STRONG_SHADOW);
    }

    #[test]
    fn test_overlay_background() {
        let plan = analyze_layout("", "ornate", &Palette::from(["#fff", "#fff", "#000"]));
        assert_eq!(plan.overlay_background().as_deref(), Some("rgba(0, 0, 0, 0.420)"));
    }

    #[test]
    fn test_resolve_align() {
        let plan = analyze_layout("", "formal royal", &Palette::default());
        assert_eq!(resolve_align(AlignAuthority::Auto, &plan, Align::Left), Align::Right);
        assert_eq!(resolve_align(AlignAuthority::Manual, &plan, Align::Left), Align::Left);
    }

    #[test]
    fn test_plan_json_shape() {
        let plan = analyze_layout("", "", &Palette::default());
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["align"], "center");
        assert!(json.get("overlayOpacity").is_some());
        assert!(json.get("textColor").is_some());
    }
}
