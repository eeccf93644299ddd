//! Palette Selector - design prompt to a soft/mid/deep color triple

use serde::{Deserialize, Serialize};

/// Ordered `[soft, mid, deep]` color triple.
///
/// Serializes as a plain JSON array of three hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Palette([String; 3]);

impl Palette {
    pub fn new(soft: impl Into<String>, mid: impl Into<String>, deep: impl Into<String>) -> Self {
        Self([soft.into(), mid.into(), deep.into()])
    }

    fn from_preset(preset: &[&str; 3]) -> Self {
        Self::new(preset[0], preset[1], preset[2])
    }

    pub fn soft(&self) -> &str {
        &self.0[0]
    }

    pub fn mid(&self) -> &str {
        &self.0[1]
    }

    pub fn deep(&self) -> &str {
        &self.0[2]
    }

    pub fn colors(&self) -> &[String; 3] {
        &self.0
    }

    /// The stop at `index`, or `None` when it is out of range or blank.
    pub fn slot(&self, index: usize) -> Option<&str> {
        self.0
            .get(index)
            .map(String::as_str)
            .filter(|color| !color.trim().is_empty())
    }

    /// Background used until generated artwork arrives.
    pub fn gradient(&self) -> String {
        format!(
            "linear-gradient(135deg, {} 0%, {} 45%, {} 100%)",
            self.soft(),
            self.mid(),
            self.deep()
        )
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_preset(&DEFAULT_PALETTE)
    }
}

impl From<[&str; 3]> for Palette {
    fn from(colors: [&str; 3]) -> Self {
        Self::from_preset(&colors)
    }
}

pub const DEFAULT_PALETTE: [&str; 3] = ["#f8f5f0", "#d6c3a5", "#8b6f47"];

/// Keyword table, scanned in declaration order. First hit wins.
pub const PRESET_PALETTES: &[(&str, [&str; 3])] = &[
    ("gold", ["#f5e6b3", "#d4af37", "#8c6a03"]),
    ("blush", ["#fdecef", "#f4c6d7", "#b15a72"]),
    ("emerald", ["#e6f5ed", "#38a169", "#064e3b"]),
    ("teal", ["#e0f2f1", "#2c7a7b", "#134e4a"]),
    ("lavender", ["#f5f3ff", "#c4b5fd", "#6b21a8"]),
    ("navy", ["#e2e8f0", "#1e3a8a", "#0b1f52"]),
    ("coral", ["#fff1eb", "#fb7185", "#9f1239"]),
    ("rustic", ["#f7f2eb", "#d97706", "#4b3419"]),
    ("minimalist", ["#f9fafb", "#e2e8f0", "#94a3b8"]),
    ("classic", ["#fff7ed", "#fbbf24", "#7c2d12"]),
];

/// Pick the palette for the first preset keyword contained in `prompt`,
/// falling back to [`DEFAULT_PALETTE`].
pub fn keyword_palette(prompt: &str) -> Palette {
    let lower = prompt.to_lowercase();
    match PRESET_PALETTES
        .iter()
        .find(|(keyword, _)| lower.contains(*keyword))
    {
        Some((keyword, preset)) => {
            log::debug!("palette keyword matched: {}", keyword);
            Palette::from_preset(preset)
        }
        None => Palette::default(),
    }
}
