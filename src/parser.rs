use crate::error::Result;
use crate::ir::ChartDefinition;
use once_cell::sync::Lazy;
use regex::Regex;

static INIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^%%\{\s*init\s*:\s*(\{.*\})\s*\}%%").unwrap());

#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub chart: ChartDefinition,
    pub init_config: Option<serde_json::Value>,
}

/// Parses a JSON5 chart definition. `%%{init: {...}}%%` lines carry per-chart
/// config overrides; any other `%%` line is a comment.
pub fn parse_chart(input: &str) -> Result<ParseOutput> {
    let (body, init_config) = preprocess_input(input);
    let chart = json5::from_str::<ChartDefinition>(&body)?;
    Ok(ParseOutput { chart, init_config })
}

fn preprocess_input(input: &str) -> (String, Option<serde_json::Value>) {
    let mut init_config: Option<serde_json::Value> = None;
    let mut lines = Vec::new();

    for raw_line in input.lines() {
        let trimmed_line = raw_line.trim();
        if let Some(caps) = INIT_RE.captures(trimmed_line) {
            if let Some(json_str) = caps.get(1).map(|m| m.as_str()) {
                if let Ok(value) = serde_json::from_str::<serde_json::Value>(json_str) {
                    init_config = Some(value);
                } else if let Ok(value) = json5::from_str::<serde_json::Value>(json_str) {
                    init_config = Some(value);
                } else {
                    tracing::warn!(directive = json_str, "ignoring unparsable init directive");
                }
            }
            continue;
        }
        if trimmed_line.starts_with("%%") {
            continue;
        }
        lines.push(raw_line);
    }

    (lines.join("\n"), init_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;
    use crate::ir::{BarStyle, ScaleKind};

    #[test]
    fn parses_definition_with_init_directive() {
        let input = r#"%%{init: {"themeVariables": {"fontSize": 12}}}%%
%% masterlist line changes
{
  id: "commits",
  height: 500,
  groupSize: 3,
  scale: { type: "pow", exponent: 0.3 },
  style: { type: "diverging", roles: ["boss-previous", "boss", "loot"] },
  tickValues: [-450, 0, 500],
  records: [
    { label: "Skyrim", value: 24977 },
    { label: "Skyrim", value: 66 },
    { label: "Skyrim", value: -445 },
  ],
}"#;
        let parsed = parse_chart(input).unwrap();
        assert_eq!(parsed.chart.id, "commits");
        assert_eq!(parsed.chart.scale, ScaleKind::Pow { exponent: 0.3 });
        assert_eq!(parsed.chart.records[2].value, -445.0);
        assert_eq!(parsed.chart.tick_values, Some(vec![-450.0, 0.0, 500.0]));
        let init = parsed.init_config.unwrap();
        assert_eq!(init["themeVariables"]["fontSize"], 12);
    }

    #[test]
    fn accepts_json5_init_directive() {
        let input = "%%{init: {themeVariables: {fontFamily: 'serif'}}}%%\n{id: 'a', style: {type: 'named'}, records: []}";
        let parsed = parse_chart(input).unwrap();
        assert_eq!(parsed.chart.style, BarStyle::Named);
        assert_eq!(parsed.init_config.unwrap()["themeVariables"]["fontFamily"], "serif");
    }

    #[test]
    fn missing_style_is_a_parse_error() {
        let err = parse_chart("{ id: 'a', records: [] }").unwrap_err();
        assert!(matches!(err, ChartError::Parse(_)));
    }
}
