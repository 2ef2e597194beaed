use bar_chart_renderer::{RenderOptions, render_builtin, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    container_width: Option<f64>,
    stylesheet: Option<String>,
}

fn build_render_options(options: ChartRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("modern") {
        RenderOptions::modern()
    } else {
        RenderOptions::plain()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    if let Some(width) = options.container_width {
        render_options = render_options.with_container_width(width);
    }
    if options.stylesheet.is_some() {
        render_options.theme.stylesheet = options.stylesheet;
    }

    render_options
}

fn parse_options(options_json: Option<String>) -> Result<ChartRenderOptions, JsValue> {
    match options_json {
        Some(raw_options) => serde_json::from_str::<ChartRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string())),
        None => Ok(ChartRenderOptions::default()),
    }
}

/// Renders a JSON5 chart definition. Pass the container's measured width as
/// `containerWidth` in the options.
#[wasm_bindgen]
pub fn render_chart_svg(definition: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let render_options = build_render_options(parse_options(options_json)?);
    render_with_options(definition, render_options)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}

#[wasm_bindgen]
pub fn render_builtin_svg(name: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let render_options = build_render_options(parse_options(options_json)?);
    render_builtin(name, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}
