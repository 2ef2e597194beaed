#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod datasets;
pub mod embed;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod scale;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig};
pub use error::ChartError;
pub use ir::{BarStyle, ChartDefinition, Margin, Record, ScaleKind};
pub use layout::compute_layout;
pub use parser::parse_chart;
pub use render::render_svg;
pub use theme::Theme;

/// Everything a single render needs besides the chart itself.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub container_width: f64,
}

impl RenderOptions {
    pub fn plain() -> Self {
        Self {
            theme: Theme::plain(),
            layout: LayoutConfig::default(),
            container_width: config::RenderConfig::default().container_width,
        }
    }

    pub fn modern() -> Self {
        Self {
            theme: Theme::modern(),
            ..Self::plain()
        }
    }

    pub fn with_container_width(mut self, width: f64) -> Self {
        self.container_width = width;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::plain()
    }
}

pub fn render_chart(chart: &ChartDefinition, options: &RenderOptions) -> error::Result<String> {
    let layout = compute_layout(chart, &options.layout, options.container_width)?;
    Ok(render_svg(&layout, &options.theme))
}

/// Parses a JSON5 chart definition and renders it to SVG.
pub fn render_with_options(source: &str, mut options: RenderOptions) -> error::Result<String> {
    let parsed = parse_chart(source)?;
    if let Some(init) = parsed.init_config.as_ref() {
        config::apply_init_config(&mut options.theme, init);
    }
    render_chart(&parsed.chart, &options)
}

pub fn render_builtin(name: &str, options: RenderOptions) -> error::Result<String> {
    let chart = datasets::builtin(name)?;
    render_chart(&chart, &options)
}
