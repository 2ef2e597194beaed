use crate::ir::Margin;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Band padding used when a chart does not set its own.
    pub padding: f64,
    /// Margins used when a chart does not set its own.
    pub margin: Margin,
    /// Approximate number of generated ticks on a linear value axis.
    pub tick_count: usize,
    pub tick_size: f64,
    pub tick_padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 0.1,
            margin: Margin::default(),
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Measured width of the element the chart is placed in.
    pub container_width: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            container_width: 760.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::plain(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    stylesheet: Option<String>,
    layout: Option<LayoutConfigFile>,
    container_width: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    text_color: Option<String>,
    axis_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    padding: Option<f64>,
    margin: Option<Margin>,
    tick_count: Option<usize>,
    tick_size: Option<f64>,
    tick_padding: Option<f64>,
}

fn apply_theme_variables(theme: &mut Theme, vars: ThemeVariables) {
    if let Some(v) = vars.font_family {
        theme.font_family = v;
    }
    if let Some(v) = vars.font_size {
        theme.font_size = v;
    }
    if let Some(v) = vars.text_color {
        theme.text_color = v;
    }
    if let Some(v) = vars.axis_color {
        theme.axis_color = v;
    }
    if let Some(v) = vars.background {
        theme.background = v;
    }
}

/// Applies a chart's `%%{init: ...}%%` overrides on top of the loaded theme.
pub fn apply_init_config(theme: &mut Theme, init: &serde_json::Value) {
    if let Some(vars) = init.get("themeVariables") {
        match serde_json::from_value::<ThemeVariables>(vars.clone()) {
            Ok(vars) => apply_theme_variables(theme, vars),
            Err(err) => tracing::warn!(%err, "ignoring malformed themeVariables"),
        }
    }
    if let Some(stylesheet) = init.get("stylesheet").and_then(|v| v.as_str()) {
        theme.stylesheet = Some(stylesheet.to_string());
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => tracing::warn!(theme = theme_name, "unknown theme, keeping default"),
        }
    }
    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config.theme, vars);
    }
    if parsed.stylesheet.is_some() {
        config.theme.stylesheet = parsed.stylesheet;
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.padding {
            config.layout.padding = v;
        }
        if let Some(v) = layout.margin {
            config.layout.margin = v;
        }
        if let Some(v) = layout.tick_count {
            config.layout.tick_count = v;
        }
        if let Some(v) = layout.tick_size {
            config.layout.tick_size = v;
        }
        if let Some(v) = layout.tick_padding {
            config.layout.tick_padding = v;
        }
    }

    if let Some(v) = parsed.container_width {
        config.render.container_width = v;
    }
    Ok(config)
}
