use crate::theme::{Palette, Theme};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which placement algorithm to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Top-down hierarchy, each parent centered over its descendants.
    #[default]
    Tree,
    /// Root in the middle, descendants on rings of growing radius.
    Central,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Tree => "tree",
            Strategy::Central => "central",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(Strategy::Tree),
            "central" => Ok(Strategy::Central),
            other => Err(format!("unknown layout strategy '{other}'")),
        }
    }
}

/// How rich a tree the generator was asked for. Layout never reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Brief,
    #[default]
    Medium,
    Detailed,
}

impl Density {
    pub fn description(self) -> &'static str {
        match self {
            Density::Brief => "brief: only the main ideas and broad headings",
            Density::Medium => "medium: main ideas with their most important sub-points",
            Density::Detailed => "detailed: as many branches and sub-points as the text supports",
        }
    }
}

impl FromStr for Density {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "brief" => Ok(Density::Brief),
            "medium" => Ok(Density::Medium),
            "detailed" => Ok(Density::Detailed),
            other => Err(format!("unknown density '{other}'")),
        }
    }
}

/// Sizing and spacing constants shared by both strategies and the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MindmapConfig {
    pub wrap_width: f32,
    pub node_width: f32,
    pub min_node_height: f32,
    pub line_height: f32,
    pub node_padding: f32,
    pub level_gap: f32,
    pub sibling_gap: f32,
    pub level_offset_ratio: f32,
    pub top_padding: f32,
    pub radius_base: f32,
    pub radius_step: f32,
    pub angle_span: f32,
    pub angle_jitter: f32,
    pub corner_radius: f32,
    pub connector_curve: f32,
    pub connector_width: f32,
}

impl Default for MindmapConfig {
    fn default() -> Self {
        Self {
            wrap_width: 120.0,
            node_width: 150.0,
            min_node_height: 40.0,
            line_height: 1.3,
            node_padding: 20.0,
            level_gap: 60.0,
            sibling_gap: 30.0,
            level_offset_ratio: 0.7,
            top_padding: 50.0,
            radius_base: 130.0,
            radius_step: 20.0,
            angle_span: 1.5 * PI,
            angle_jitter: 0.05,
            corner_radius: 10.0,
            connector_curve: 40.0,
            connector_width: 2.0,
        }
    }
}

impl MindmapConfig {
    /// Radius added between a node at `depth` and its children.
    pub fn ring_increment(&self, depth: usize) -> f32 {
        self.radius_base + depth as f32 * self.radius_step
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub strategy: Strategy,
    pub density: Density,
    pub palette: Palette,
    /// Seed for the radial angle jitter; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub fast_text_metrics: bool,
    pub mindmap: MindmapConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Tree,
            density: Density::Medium,
            palette: Palette::Bright,
            seed: None,
            fast_text_metrics: false,
            mindmap: MindmapConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio applied when rasterizing.
    pub scale: f32,
    pub dark_mode: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 500.0,
            scale: 1.0,
            dark_mode: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct MindmapConfigFile {
    wrap_width: Option<f32>,
    node_width: Option<f32>,
    min_node_height: Option<f32>,
    line_height: Option<f32>,
    node_padding: Option<f32>,
    level_gap: Option<f32>,
    sibling_gap: Option<f32>,
    level_offset_ratio: Option<f32>,
    top_padding: Option<f32>,
    radius_base: Option<f32>,
    radius_step: Option<f32>,
    angle_span: Option<f32>,
    angle_jitter: Option<f32>,
    corner_radius: Option<f32>,
    connector_curve: Option<f32>,
    connector_width: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    layout: Option<Strategy>,
    palette: Option<Palette>,
    density: Option<Density>,
    seed: Option<u64>,
    dark_mode: Option<bool>,
    fast_text_metrics: Option<bool>,
    font_family: Option<String>,
    font_size: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
    scale: Option<f32>,
    mindmap: Option<MindmapConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    let mut config = Config::default();

    if let Some(v) = parsed.layout {
        config.layout.strategy = v;
    }
    if let Some(v) = parsed.palette {
        config.layout.palette = v;
    }
    if let Some(v) = parsed.density {
        config.layout.density = v;
    }
    if parsed.seed.is_some() {
        config.layout.seed = parsed.seed;
    }
    if let Some(v) = parsed.fast_text_metrics {
        config.layout.fast_text_metrics = v;
    }
    if let Some(v) = parsed.dark_mode {
        config.render.dark_mode = v;
        config.theme = config.theme.with_mode(v);
    }
    if let Some(v) = parsed.font_family {
        config.theme.font_family = v;
    }
    if let Some(v) = parsed.font_size {
        config.theme.font_size = v;
    }
    if let Some(v) = parsed.width {
        config.render.width = v;
    }
    if let Some(v) = parsed.height {
        config.render.height = v;
    }
    if let Some(v) = parsed.scale {
        config.render.scale = v;
    }

    if let Some(file) = parsed.mindmap {
        let m = &mut config.layout.mindmap;
        let overrides = [
            (file.wrap_width, &mut m.wrap_width),
            (file.node_width, &mut m.node_width),
            (file.min_node_height, &mut m.min_node_height),
            (file.line_height, &mut m.line_height),
            (file.node_padding, &mut m.node_padding),
            (file.level_gap, &mut m.level_gap),
            (file.sibling_gap, &mut m.sibling_gap),
            (file.level_offset_ratio, &mut m.level_offset_ratio),
            (file.top_padding, &mut m.top_padding),
            (file.radius_base, &mut m.radius_base),
            (file.radius_step, &mut m.radius_step),
            (file.angle_span, &mut m.angle_span),
            (file.angle_jitter, &mut m.angle_jitter),
            (file.corner_radius, &mut m.corner_radius),
            (file.connector_curve, &mut m.connector_curve),
            (file.connector_width, &mut m.connector_width),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canvas_constants() {
        let m = MindmapConfig::default();
        assert_eq!(m.node_width, 150.0);
        assert_eq!(m.wrap_width, 120.0);
        assert_eq!(m.ring_increment(0), 130.0);
        assert_eq!(m.ring_increment(2), 170.0);
    }

    #[test]
    fn parses_partial_config_file() {
        let config = parse_config(
            r#"{"layout":"central","palette":"calm","seed":7,"darkMode":true,
                "mindmap":{"levelGap":80,"angleJitter":0}}"#,
        )
        .unwrap();
        assert_eq!(config.layout.strategy, Strategy::Central);
        assert_eq!(config.layout.palette, Palette::Calm);
        assert_eq!(config.layout.seed, Some(7));
        assert!(config.render.dark_mode);
        assert_eq!(config.theme.background, Theme::dark().background);
        assert_eq!(config.layout.mindmap.level_gap, 80.0);
        assert_eq!(config.layout.mindmap.angle_jitter, 0.0);
        assert_eq!(config.layout.mindmap.sibling_gap, 30.0);
    }

    #[test]
    fn rejects_unknown_strategy() {
        assert!(parse_config(r#"{"layout":"spiral"}"#).is_err());
        assert!("radial".parse::<Strategy>().is_err());
        assert_eq!(" Central ".parse::<Strategy>(), Ok(Strategy::Central));
    }

    #[test]
    fn density_is_parsed_but_inert() {
        let config = parse_config(r#"{"density":"detailed"}"#).unwrap();
        assert_eq!(config.layout.density, Density::Detailed);
        assert!(config.layout.density.description().starts_with("detailed"));
    }
}
