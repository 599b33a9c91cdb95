use crate::config::{Density, Strategy, load_config};
use crate::layout::{SurfaceSize, compute_layout};
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_topic_tree;
use crate::render::{RenderOptions, render_svg, write_output_svg};
use crate::theme::Palette;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const DEFAULT_PNG_NAME: &str = "mind-map.png";

#[derive(Parser, Debug)]
#[command(name = "mmap", version, about = "Lay out and render a mind map topic tree")]
pub struct Args {
    /// Topic tree JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). SVG goes to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Surface width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Surface height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Layout strategy
    #[arg(long = "layout", value_enum)]
    pub layout: Option<Strategy>,

    /// Node color scheme
    #[arg(long = "palette", value_enum)]
    pub palette: Option<Palette>,

    /// Density the tree was generated with (informational)
    #[arg(long = "density", value_enum)]
    pub density: Option<Density>,

    /// Dark surface colors
    #[arg(long = "dark")]
    pub dark: bool,

    /// Seed for the radial layout's angle jitter
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Device pixel ratio for PNG output
    #[arg(long = "scale")]
    pub scale: Option<f32>,

    /// Write the computed layout as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(strategy) = args.layout {
        config.layout.strategy = strategy;
    }
    if let Some(palette) = args.palette {
        config.layout.palette = palette;
    }
    if let Some(density) = args.density {
        config.layout.density = density;
    }
    if args.seed.is_some() {
        config.layout.seed = args.seed;
    }
    if let Some(scale) = args.scale {
        config.render.scale = scale;
    }
    if args.dark {
        config.render.dark_mode = true;
        config.theme = config.theme.with_mode(true);
    }

    let input = read_input(args.input.as_deref())?;
    let tree = parse_topic_tree(&input)?;
    log::info!(
        "parsed topic tree: {} nodes, density {:?}",
        tree.node_count(),
        config.layout.density
    );

    let surface = SurfaceSize::new(config.render.width, config.render.height);
    let layout = compute_layout(&tree, &config.theme, &config.layout, surface)?;
    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout)?;
        log::info!("wrote layout dump to {}", path.display());
    }

    let options = RenderOptions::from_config(&config);
    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.layout, &options);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => write_png(&layout, &config, &options, args.output.as_deref())?,
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(
    layout: &crate::layout::Layout,
    config: &crate::config::Config,
    options: &RenderOptions,
    output: Option<&Path>,
) -> Result<()> {
    use crate::render::{Surface, render, write_output_png};

    let output = output.unwrap_or_else(|| Path::new(DEFAULT_PNG_NAME));
    let mut surface =
        Surface::with_scale(config.render.width, config.render.height, config.render.scale)?;
    render(layout, &mut surface, &config.theme, &config.layout, options)?;
    write_output_png(&surface, output)?;
    log::info!("wrote {}", output.display());
    Ok(())
}

#[cfg(not(feature = "png"))]
fn write_png(
    _layout: &crate::layout::Layout,
    _config: &crate::config::Config,
    _options: &RenderOptions,
    _output: Option<&Path>,
) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the 'png' feature (default name {DEFAULT_PNG_NAME})"
    ))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
