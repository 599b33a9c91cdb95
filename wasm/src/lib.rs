use mindmap_rs_renderer::{Config, Density, Palette, Strategy, render_tree_svg};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MindMapRenderOptions {
    layout: Option<Strategy>,
    palette: Option<Palette>,
    density: Option<Density>,
    dark_mode: Option<bool>,
    seed: Option<u64>,
    width: Option<f32>,
    height: Option<f32>,
}

fn build_config(options: MindMapRenderOptions) -> Config {
    let mut config = Config::default();
    // Browsers have no system font database to measure against.
    config.layout.fast_text_metrics = true;
    if let Some(layout) = options.layout {
        config.layout.strategy = layout;
    }
    if let Some(palette) = options.palette {
        config.layout.palette = palette;
    }
    if let Some(density) = options.density {
        config.layout.density = density;
    }
    if options.seed.is_some() {
        config.layout.seed = options.seed;
    }
    if let Some(width) = options.width {
        config.render.width = width;
    }
    if let Some(height) = options.height {
        config.render.height = height;
    }
    if let Some(dark_mode) = options.dark_mode {
        config.render.dark_mode = dark_mode;
        config.theme = config.theme.with_mode(dark_mode);
    }
    config
}

#[wasm_bindgen]
pub fn render_mind_map_svg(tree_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<MindMapRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        MindMapRenderOptions::default()
    };

    render_tree_svg(tree_json, &build_config(options))
        .map_err(|error| JsValue::from_str(error.user_message()))
}
