//! Literal datasets for the "BOSS vs LOOT: one year on" post.

use crate::error::{ChartError, Result};
use crate::ir::{BarStyle, ChartDefinition, Margin, Record, ScaleKind};

pub const BUILTIN_NAMES: [&str; 3] = ["daily-clones", "download-rates", "masterlist-lines"];

pub fn builtin(name: &str) -> Result<ChartDefinition> {
    match name {
        "daily-clones" => Ok(daily_clones()),
        "download-rates" => Ok(download_rates()),
        "masterlist-lines" => Ok(masterlist_lines()),
        _ => Err(ChartError::UnknownBuiltin {
            name: name.to_string(),
        }),
    }
}

pub fn all_builtins() -> Vec<ChartDefinition> {
    vec![daily_clones(), download_rates(), masterlist_lines()]
}

/// Average daily masterlist repository clones per game.
pub fn daily_clones() -> ChartDefinition {
    ChartDefinition {
        id: "averageDailyClones".to_string(),
        height: 300.0,
        margin: Some(Margin::new(20.0, 30.0, 30.0, 50.0)),
        padding: Some(0.1),
        group_size: 1,
        scale: ScaleKind::Linear,
        style: BarStyle::Fixed {
            class: "loot".to_string(),
        },
        tick_values: None,
        records: vec![
            Record::new("Oblivion", 144.0),
            Record::new("Skyrim", 2162.0),
            Record::new("Fallout 3", 100.0),
            Record::new("Fallout: New Vegas", 236.0),
        ],
    }
}

/// Average daily downloads per release.
pub fn download_rates() -> ChartDefinition {
    ChartDefinition {
        id: "averageDailyDownloads".to_string(),
        height: 250.0,
        margin: Some(Margin::new(20.0, 30.0, 30.0, 50.0)),
        padding: Some(0.1),
        group_size: 1,
        scale: ScaleKind::Linear,
        style: BarStyle::Named,
        tick_values: None,
        records: vec![
            Record::named("BOSS v2.2.0", 3788.0, "boss"),
            Record::named("LOOT v0.5.0", 1206.0, "loot"),
            Record::named("BOSS v2.3.0", 3363.0, "boss"),
            Record::named("LOOT v0.6.0", 1438.0, "loot"),
            Record::named("LOOT v0.6.1", 2566.0, "loot"),
        ],
    }
}

/// Net masterlist line changes: BOSS the year before, BOSS, then LOOT.
pub fn masterlist_lines() -> ChartDefinition {
    let rows: [(&str, [f64; 3]); 4] = [
        ("Oblivion", [95.0, 828.0, 182.0]),
        ("Skyrim", [24977.0, 66.0, -445.0]),
        ("Fallout 3", [-2.0, 0.0, 1292.0]),
        ("Fallout: New Vegas", [217.0, 108.0, 787.0]),
    ];
    let records = rows
        .iter()
        .flat_map(|(label, values)| values.iter().map(move |v| Record::new(*label, *v)))
        .collect();

    ChartDefinition {
        id: "commits".to_string(),
        height: 500.0,
        margin: Some(Margin::new(20.0, 30.0, 30.0, 60.0)),
        padding: Some(0.1),
        group_size: 3,
        scale: ScaleKind::Pow { exponent: 0.3 },
        style: BarStyle::Diverging {
            roles: vec![
                "boss-previous".to_string(),
                "boss".to_string(),
                "loot".to_string(),
            ],
            labels: vec![
                "BOSS (year before)".to_string(),
                "BOSS".to_string(),
                "LOOT".to_string(),
            ],
        },
        tick_values: Some(vec![
            -450.0, 0.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0, 16000.0, 24500.0,
        ]),
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_name_resolves() {
        for name in BUILTIN_NAMES {
            builtin(name).expect("builtin should exist");
        }
        assert_eq!(all_builtins().len(), BUILTIN_NAMES.len());
    }

    #[test]
    fn unknown_builtin_is_reported() {
        let err = builtin("pie").unwrap_err();
        assert!(matches!(err, ChartError::UnknownBuiltin { ref name } if name == "pie"));
    }

    #[test]
    fn masterlist_lines_are_grouped_in_threes() {
        let chart = masterlist_lines();
        assert_eq!(chart.records.len(), 12);
        for run in chart.records.chunks(3) {
            assert!(run.iter().all(|r| r.label == run[0].label));
        }
        assert_eq!(chart.records[5].value, -445.0);
    }
}
