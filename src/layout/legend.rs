use crate::ir::{BarStyle, Margin};

use super::{LegendEntry, LegendLayout};

/// Distance from the right edge of the outer box to the legend's left edge.
const LEGEND_INSET: f64 = 175.0;
const SWATCH: f64 = 18.0;
const ROW_HEIGHT: f64 = 20.0;

/// Pins the series key to the top-right corner, aligned with the plot's top
/// margin. Charts without per-role series get no legend.
pub fn legend(style: &BarStyle, container_width: f64, margin: &Margin) -> Option<LegendLayout> {
    let entries: Vec<LegendEntry> = style
        .legend_entries()
        .into_iter()
        .enumerate()
        .map(|(idx, (class, label))| LegendEntry {
            class,
            label,
            offset: idx as f64 * ROW_HEIGHT,
        })
        .collect();
    if entries.is_empty() {
        return None;
    }
    Some(LegendLayout {
        x: container_width - LEGEND_INSET,
        y: margin.top,
        swatch: SWATCH,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_sits_at_top_right() {
        let style = BarStyle::Diverging {
            roles: vec!["boss".to_string(), "loot".to_string()],
            labels: Vec::new(),
        };
        let out = legend(&style, 760.0, &Margin::new(20.0, 30.0, 30.0, 60.0)).unwrap();
        assert_eq!((out.x, out.y), (585.0, 20.0));
        let offsets: Vec<f64> = out.entries.iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0.0, 20.0]);
        assert_eq!(out.entries[1].class, "bar positive loot");
    }

    #[test]
    fn single_class_charts_have_no_legend() {
        let style = BarStyle::Fixed {
            class: "loot".to_string(),
        };
        assert!(legend(&style, 760.0, &Margin::default()).is_none());
    }
}
