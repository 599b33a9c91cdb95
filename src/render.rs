use crate::config::{Config, LayoutConfig};
use crate::error::Result;
use crate::layout::{Connector, ConnectorStyle, Layout, PositionedNode, SurfaceSize};
use crate::theme::{Palette, Theme};
use std::path::Path;

#[cfg(feature = "png")]
pub use raster::{Surface, export_png, render, write_output_png};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub dark_mode: bool,
    pub palette: Palette,
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            dark_mode: config.render.dark_mode,
            palette: config.layout.palette,
        }
    }
}

/// Builds the SVG document for a positioned layout. Paint order is
/// background, then every connector, then every node, so no connector is
/// ever drawn over a node face.
pub fn render_svg(
    layout: &Layout,
    theme: &Theme,
    config: &LayoutConfig,
    options: &RenderOptions,
) -> String {
    let size = SurfaceSize::new(layout.width, layout.height);
    svg_document(layout, size, theme, config, options)
}

/// Document sized to `size`. Node coordinates are used as-is, so content
/// beyond the surface is clipped rather than rescaled.
fn svg_document(
    layout: &Layout,
    size: SurfaceSize,
    theme: &Theme,
    config: &LayoutConfig,
    options: &RenderOptions,
) -> String {
    let surface_theme = theme.with_mode(options.dark_mode);
    let SurfaceSize { width, height } = size;
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        surface_theme.background
    ));

    for connector in &layout.connectors {
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            connector_path(connector),
            surface_theme.line_color,
            config.mindmap.connector_width
        ));
    }

    for node in &layout.nodes {
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\"/>",
            node.left(),
            node.top(),
            node.width,
            node.height,
            options.palette.fill(node.color_index),
            r = config.mindmap.corner_radius,
        ));
        svg.push_str(&node_text_svg(node, &surface_theme, config, options.palette));
    }

    svg.push_str("</svg>");
    svg
}

fn connector_path(connector: &Connector) -> String {
    let points = &connector.points;
    if points.is_empty() {
        return String::new();
    }
    let mut d = format!("M {:.2} {:.2}", points[0].0, points[0].1);
    match connector.style {
        ConnectorStyle::Curve if points.len() == 4 => {
            d.push_str(&format!(
                " C {:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}",
                points[1].0, points[1].1, points[2].0, points[2].1, points[3].0, points[3].1
            ));
        }
        _ => {
            for point in points.iter().skip(1) {
                d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
            }
        }
    }
    d
}

/// Lines stacked around the node's vertical center.
fn node_text_svg(node: &PositionedNode, theme: &Theme, config: &LayoutConfig, palette: Palette) -> String {
    let line_step = theme.font_size * config.mindmap.line_height;
    let first_y = node.y - (node.lines.len() as f32 - 1.0) * line_step / 2.0;
    let mut text = String::new();
    for (idx, line) in node.lines.iter().enumerate() {
        let y = first_y + idx as f32 * line_step;
        text.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\">{}</text>",
            node.x,
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.font_weight,
            palette.text_color(),
            escape_xml(line)
        ));
    }
    text
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(feature = "png")]
mod raster {
    use super::{RenderOptions, svg_document};
    use crate::config::LayoutConfig;
    use crate::error::{Error, Result};
    use crate::layout::{Layout, SurfaceSize};
    use crate::theme::Theme;
    use once_cell::sync::Lazy;
    use resvg::tiny_skia::{Color, Pixmap, Transform};
    use std::path::Path;
    use std::sync::Arc;

    static FONT_DB: Lazy<Arc<usvg::fontdb::Database>> = Lazy::new(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Arc::new(db)
    });

    /// Caller-owned raster target. Holds whatever was drawn last.
    pub struct Surface {
        pixmap: Pixmap,
        width: f32,
        height: f32,
        scale: f32,
    }

    impl std::fmt::Debug for Surface {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Surface")
                .field("width", &self.width)
                .field("height", &self.height)
                .field("scale", &self.scale)
                .finish()
        }
    }

    impl Surface {
        pub fn new(width: f32, height: f32) -> Result<Self> {
            Self::with_scale(width, height, 1.0)
        }

        /// Surface of `width` x `height` logical pixels backed by a pixmap
        /// `scale` times larger in each direction.
        pub fn with_scale(width: f32, height: f32, scale: f32) -> Result<Self> {
            let valid = |v: f32| v.is_finite() && v > 0.0;
            if !valid(width) || !valid(height) || !valid(scale) {
                return Err(Error::RenderTarget(format!(
                    "surface must have a positive size, got {width}x{height} at scale {scale}"
                )));
            }
            let pixel_width = (width * scale).ceil() as u32;
            let pixel_height = (height * scale).ceil() as u32;
            let pixmap = Pixmap::new(pixel_width, pixel_height).ok_or_else(|| {
                Error::RenderTarget(format!(
                    "failed to allocate {pixel_width}x{pixel_height} pixmap"
                ))
            })?;
            Ok(Self {
                pixmap,
                width,
                height,
                scale,
            })
        }

        pub fn size(&self) -> SurfaceSize {
            SurfaceSize::new(self.width, self.height)
        }

        pub fn scale(&self) -> f32 {
            self.scale
        }

        pub fn pixmap(&self) -> &Pixmap {
            &self.pixmap
        }
    }

    /// Draws `layout` onto `surface`, replacing its previous content. Node
    /// coordinates are surface coordinates: the drawing is scaled only by the
    /// surface's pixel density, and nodes beyond its edges are clipped. On
    /// error the surface is left cleared.
    pub fn render(
        layout: &Layout,
        surface: &mut Surface,
        theme: &Theme,
        config: &LayoutConfig,
        options: &RenderOptions,
    ) -> Result<()> {
        let svg = svg_document(layout, surface.size(), theme, config, options);
        let mut opt = usvg::Options::default();
        opt.font_family = theme.font_family.clone();
        opt.fontdb = FONT_DB.clone();

        surface.pixmap.fill(Color::TRANSPARENT);
        let tree = usvg::Tree::from_str(&svg, &opt).map_err(|err| Error::Svg(err.to_string()))?;
        let scale = surface.scale();
        let mut pixmap_mut = surface.pixmap.as_mut();
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap_mut);
        Ok(())
    }

    /// PNG bytes of exactly what the surface currently holds.
    pub fn export_png(surface: &Surface) -> Result<Vec<u8>> {
        surface
            .pixmap
            .encode_png()
            .map_err(|err| Error::Png(err.to_string()))
    }

    pub fn write_output_png(surface: &Surface, output: &Path) -> Result<()> {
        let bytes = export_png(surface)?;
        std::fs::write(output, bytes)?;
        Ok(())
    }
}
