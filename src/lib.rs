#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, Density, LayoutConfig, MindmapConfig, RenderConfig, Strategy};
pub use error::{Error, Result};
pub use ir::TopicNode;
pub use layout::{Layout, NodeId, PositionedNode, SurfaceSize, compute_layout, compute_layout_with};
pub use parser::parse_topic_tree;
pub use render::{RenderOptions, render_svg};
#[cfg(feature = "png")]
pub use render::{Surface, export_png, render};
pub use theme::{Palette, Theme};

/// Parses a generator response and renders it to an SVG document in one go.
pub fn render_tree_svg(input: &str, config: &Config) -> Result<String> {
    let tree = parse_topic_tree(input)?;
    let surface = SurfaceSize::new(config.render.width, config.render.height);
    let layout = compute_layout(&tree, &config.theme, &config.layout, surface)?;
    Ok(render_svg(
        &layout,
        &config.theme,
        &config.layout,
        &RenderOptions::from_config(config),
    ))
}
