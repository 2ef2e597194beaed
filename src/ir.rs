use serde::{Deserialize, Serialize};

/// One bar's worth of data. `name` is only read by [`BarStyle::Named`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Record {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            name: None,
        }
    }

    pub fn named(label: impl Into<String>, value: f64, name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScaleKind {
    #[default]
    Linear,
    Pow { exponent: f64 },
}

impl ScaleKind {
    pub fn exponent(&self) -> f64 {
        match self {
            Self::Linear => 1.0,
            Self::Pow { exponent } => *exponent,
        }
    }
}

/// How a bar's class string is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BarStyle {
    /// Every bar gets `bar <class>`.
    Fixed { class: String },
    /// Every bar gets `bar <record.name>`.
    Named,
    /// `bar <negative|positive> <role>`, role picked by position in the group.
    /// `labels` name the roles in the legend; a missing label falls back to
    /// the role token.
    Diverging {
        roles: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        labels: Vec<String>,
    },
}

impl BarStyle {
    /// `(class, label)` per legend entry. Only diverging charts carry a legend.
    pub fn legend_entries(&self) -> Vec<(String, String)> {
        match self {
            Self::Diverging { roles, labels } => roles
                .iter()
                .enumerate()
                .map(|(idx, role)| {
                    let label = labels.get(idx).unwrap_or(role);
                    (format!("bar positive {role}"), label.clone())
                })
                .collect(),
            Self::Fixed { .. } | Self::Named => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(20.0, 30.0, 30.0, 50.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDefinition {
    /// Id of the container element the chart is rendered into.
    pub id: String,
    /// Outer height, margins included.
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(default = "default_group_size")]
    pub group_size: usize,
    #[serde(default)]
    pub scale: ScaleKind,
    pub style: BarStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_values: Option<Vec<f64>>,
    pub records: Vec<Record>,
}

fn default_height() -> f64 {
    300.0
}

fn default_group_size() -> usize {
    1
}

impl ChartDefinition {
    /// Distinct labels in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for record in &self.records {
            if !out.iter().any(|label| label == &record.label) {
                out.push(record.label.clone());
            }
        }
        out
    }

    pub fn value_extent(&self) -> Option<(f64, f64)> {
        let mut values = self.records.iter().map(|r| r.value);
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_keep_first_appearance_order() {
        let chart = ChartDefinition {
            id: "c".to_string(),
            height: 300.0,
            margin: None,
            padding: None,
            group_size: 2,
            scale: ScaleKind::Linear,
            style: BarStyle::Named,
            tick_values: None,
            records: vec![
                Record::named("Skyrim", 3.0, "boss"),
                Record::named("Skyrim", 1.0, "loot"),
                Record::named("Oblivion", 2.0, "boss"),
                Record::named("Oblivion", 5.0, "loot"),
            ],
        };
        assert_eq!(chart.categories(), vec!["Skyrim", "Oblivion"]);
        assert_eq!(chart.value_extent(), Some((1.0, 5.0)));
    }

    #[test]
    fn deserializes_tagged_scale_and_style() {
        let chart: ChartDefinition = json5::from_str(
            r#"{
                id: "commits",
                groupSize: 3,
                scale: { type: "pow", exponent: 0.3 },
                style: { type: "diverging", roles: ["a", "b", "c"] },
                records: [],
            }"#,
        )
        .expect("definition should parse");
        assert_eq!(chart.scale, ScaleKind::Pow { exponent: 0.3 });
        assert_eq!(chart.group_size, 3);
        assert_eq!(chart.height, 300.0);
        assert!(matches!(chart.style, BarStyle::Diverging { ref roles, .. } if roles.len() == 3));
    }

    #[test]
    fn legend_labels_fall_back_to_roles() {
        let style = BarStyle::Diverging {
            roles: vec!["boss".to_string(), "loot".to_string()],
            labels: vec!["BOSS".to_string()],
        };
        assert_eq!(
            style.legend_entries(),
            vec![
                ("bar positive boss".to_string(), "BOSS".to_string()),
                ("bar positive loot".to_string(), "loot".to_string()),
            ]
        );
        assert!(BarStyle::Named.legend_entries().is_empty());
    }
}
