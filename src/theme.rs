use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const BRIGHT_FILLS: [&str; 5] = ["#42a5f5", "#66bb6a", "#ffa726", "#ef5350", "#ab47bc"];
const FORMAL_FILLS: [&str; 5] = ["#546e7a", "#78909c", "#90a4ae", "#b0bec5", "#cfd8dc"];
const CALM_FILLS: [&str; 5] = ["#a5d6a7", "#c5e1a5", "#e6ee9c", "#fff59d", "#ffe082"];

/// Named node color scheme. Fills are assigned cyclically by depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Bright,
    Formal,
    Calm,
}

impl Palette {
    pub const ALL: [Palette; 3] = [Palette::Bright, Palette::Formal, Palette::Calm];

    pub fn fills(self) -> &'static [&'static str] {
        match self {
            Palette::Bright => &BRIGHT_FILLS,
            Palette::Formal => &FORMAL_FILLS,
            Palette::Calm => &CALM_FILLS,
        }
    }

    pub fn len(self) -> usize {
        self.fills().len()
    }

    pub fn is_empty(self) -> bool {
        self.fills().is_empty()
    }

    /// Fill for a palette slot; out-of-range slots wrap around.
    pub fn fill(self, index: usize) -> &'static str {
        let fills = self.fills();
        fills[index % fills.len()]
    }

    pub fn text_color(self) -> &'static str {
        match self {
            Palette::Bright | Palette::Formal => "#FFFFFF",
            Palette::Calm => "#424242",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Palette::Bright => "bright",
            Palette::Formal => "formal",
            Palette::Calm => "calm",
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bright" => Ok(Palette::Bright),
            "formal" => Ok(Palette::Formal),
            "calm" => Ok(Palette::Calm),
            other => Err(format!("unknown palette '{other}'")),
        }
    }
}

/// Surface-level colors and typography. Node fills come from [`Palette`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: u16,
    pub background: String,
    pub line_color: String,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            font_family: "'IBM Plex Sans Arabic', sans-serif".to_string(),
            font_size: 14.0,
            font_weight: 500,
            background: "#F7F5F2".to_string(),
            line_color: "rgba(32, 54, 54, 0.3)".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: "rgb(26, 33, 33)".to_string(),
            line_color: "rgba(232, 230, 227, 0.4)".to_string(),
            ..Self::light()
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::dark() } else { Self::light() }
    }

    /// Keeps this theme's typography and swaps in the surface colors of the
    /// requested mode.
    pub fn with_mode(&self, dark_mode: bool) -> Self {
        let base = Self::for_mode(dark_mode);
        Self {
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            font_weight: self.font_weight,
            ..base
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
