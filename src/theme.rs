use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
    pub axis_color: String,
    pub background: String,
    /// Emitted verbatim in a `<style>` element; bar colours live here.
    pub stylesheet: Option<String>,
}

impl Theme {
    /// Unstyled output, for pages that ship their own CSS.
    pub fn plain() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 10.0,
            text_color: "#000000".to_string(),
            axis_color: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
            stylesheet: None,
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            text_color: "#1C2430".to_string(),
            axis_color: "#7A8AA6".to_string(),
            background: "#FFFFFF".to_string(),
            stylesheet: Some(
                ".axis path,.axis line{fill:none;stroke:#7A8AA6;shape-rendering:crispEdges}\
                 .bar.boss-previous{fill:#C7D2E5}.bar.boss{fill:#4E79A7}.bar.loot{fill:#F28E2C}\
                 .bar.negative{fill-opacity:0.6}"
                    .to_string(),
            ),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "modern" => Some(Self::modern()),
            "plain" | "default" | "base" => Some(Self::plain()),
            _ => None,
        }
    }
}
