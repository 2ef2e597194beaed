mod axis;
mod bars;
mod legend;
pub(crate) mod types;
pub use axis::{x_axis, y_axis};
pub use bars::{layout_bars, style_class, validate_grouping};
pub use legend::legend;
pub use types::*;

use crate::config::LayoutConfig;
use crate::error::{ChartError, Result};
use crate::ir::ChartDefinition;
use crate::scale::{BandScale, ValueScale};
use tracing::debug;

pub fn compute_layout(
    chart: &ChartDefinition,
    config: &LayoutConfig,
    container_width: f64,
) -> Result<ChartLayout> {
    let margin = chart.margin.unwrap_or(config.margin);
    let padding = chart.padding.unwrap_or(config.padding);
    let inner_width = container_width - margin.left - margin.right;
    let inner_height = chart.height - margin.top - margin.bottom;
    if !(inner_width > 0.0 && inner_height > 0.0) {
        return Err(ChartError::InvalidDimensions {
            width: inner_width,
            height: inner_height,
        });
    }

    validate_grouping(&chart.records, chart.group_size)?;

    let x = BandScale::new(chart.categories(), inner_width, padding);
    // The domain always spans zero so the baseline stays inside the plot.
    let (lo, hi) = chart.value_extent().unwrap_or((0.0, 0.0));
    let y = ValueScale::new(lo.min(0.0), hi.max(0.0), inner_height, chart.scale)?;
    let (domain_min, domain_max) = y.domain();
    debug!(
        chart = %chart.id,
        bands = x.labels().len(),
        band_width = x.band_width(),
        domain_min,
        domain_max,
        baseline = y.baseline(),
        "scales computed"
    );

    let bars = layout_bars(&chart.records, chart.group_size, &chart.style, &x, &y)?;

    Ok(ChartLayout {
        id: chart.id.clone(),
        width: container_width,
        height: chart.height,
        plot_x: margin.left,
        plot_y: margin.top,
        inner_width,
        inner_height,
        baseline: y.baseline(),
        x_axis: x_axis(&x, inner_width, inner_height, config),
        y_axis: y_axis(&y, chart.tick_values.as_deref(), config),
        bars,
        legend: legend(&chart.style, container_width, &margin),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;
    use crate::ir::{BarStyle, Margin, Record, ScaleKind};

    const WIDTH: f64 = 760.0;

    fn layout(chart: &ChartDefinition) -> ChartLayout {
        compute_layout(chart, &LayoutConfig::default(), WIDTH).expect("layout should succeed")
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn bars_grow_from_shared_baseline() {
        for chart in datasets::all_builtins() {
            let out = layout(&chart);
            assert!(out.baseline >= 0.0 && out.baseline <= out.inner_height);
            for bar in &out.bars {
                assert!(bar.height >= 0.0, "{}: negative height", chart.id);
                if bar.value < 0.0 {
                    assert!(close(bar.y, out.baseline));
                } else {
                    assert!(close(bar.y + bar.height, out.baseline));
                }
            }
        }
    }

    #[test]
    fn group_slots_are_contiguous_within_band() {
        let chart = datasets::masterlist_lines();
        let out = layout(&chart);
        let band_width = out.bars[0].width * 3.0;
        for group in out.bars.chunks(3) {
            for pair in group.windows(2) {
                assert!(close(pair[0].x + pair[0].width, pair[1].x));
            }
            let used: f64 = group.iter().map(|b| b.width).sum();
            assert!(used <= band_width + 1e-9);
        }
    }

    #[test]
    fn masterlist_negative_loot_bar_hangs_below_baseline() {
        let out = layout(&datasets::masterlist_lines());
        let skyrim_loot = &out.bars[5];
        assert_eq!(skyrim_loot.label, "Skyrim");
        assert_eq!(skyrim_loot.group_index, 2);
        assert_eq!(skyrim_loot.class, "bar negative loot");
        assert!(close(skyrim_loot.y, out.baseline));
        // -445 is the domain minimum, so the bar reaches the bottom of the plot.
        assert!(close(skyrim_loot.height, out.inner_height - out.baseline));
        assert!(skyrim_loot.height > 0.0);

        let oblivion: Vec<&str> = out.bars[..3].iter().map(|b| b.class.as_str()).collect();
        assert_eq!(
            oblivion,
            vec![
                "bar positive boss-previous",
                "bar positive boss",
                "bar positive loot"
            ]
        );
    }

    #[test]
    fn masterlist_uses_explicit_ticks() {
        let out = layout(&datasets::masterlist_lines());
        let labels: Vec<&str> = out.y_axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["-450", "0", "500", "1,000", "2,000", "4,000", "8,000", "16,000", "24,500"]
        );
        let zero = &out.y_axis.ticks[1];
        assert!(close(zero.position, out.baseline));
        for pair in out.y_axis.ticks.windows(2) {
            assert!(pair[0].position > pair[1].position);
        }
        assert_eq!(out.x_axis.ticks.len(), 4);
        assert_eq!(out.x_axis.translate, (0.0, out.inner_height));
    }

    #[test]
    fn single_series_chart_uses_fixed_class() {
        let out = layout(&datasets::daily_clones());
        assert_eq!(out.bars.len(), 4);
        assert!(out.bars.iter().all(|b| b.class == "bar loot"));
        assert_eq!(out.baseline, out.inner_height);
        assert_eq!(out.inner_height, 250.0);
        let widths: Vec<f64> = out.bars.iter().map(|b| b.width).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
        let skyrim = &out.bars[1];
        assert!(close(skyrim.y, 0.0));
        assert!(close(skyrim.height, 250.0));
    }

    #[test]
    fn named_chart_keeps_insertion_order() {
        let out = layout(&datasets::download_rates());
        let classes: Vec<&str> = out.bars.iter().map(|b| b.class.as_str()).collect();
        assert_eq!(
            classes,
            vec!["bar boss", "bar loot", "bar boss", "bar loot", "bar loot"]
        );
        let ticks: Vec<&str> = out.y_axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(ticks.first().copied(), Some("0"));
        assert_eq!(ticks.last().copied(), Some("3,500"));
    }

    #[test]
    fn positive_only_domain_is_widened_to_zero() {
        let chart = ChartDefinition {
            id: "positive".to_string(),
            height: 200.0,
            margin: Some(Margin::new(0.0, 0.0, 0.0, 0.0)),
            padding: Some(0.0),
            group_size: 1,
            scale: ScaleKind::Pow { exponent: 0.5 },
            style: BarStyle::Fixed {
                class: "series".to_string(),
            },
            tick_values: None,
            records: vec![Record::new("a", 100.0), Record::new("b", 400.0)],
        };
        let out = compute_layout(&chart, &LayoutConfig::default(), 200.0).unwrap();
        assert_eq!(out.baseline, 200.0);
        assert!(close(out.bars[0].height, 100.0));
        assert!(close(out.bars[1].height, 200.0));
    }

    #[test]
    fn margins_wider_than_container_fail() {
        let err = compute_layout(&datasets::daily_clones(), &LayoutConfig::default(), 60.0)
            .unwrap_err();
        assert!(matches!(err, ChartError::InvalidDimensions { .. }));
    }

    #[test]
    fn uneven_grouping_fails_before_layout() {
        let mut chart = datasets::masterlist_lines();
        chart.records.pop();
        let err = compute_layout(&chart, &LayoutConfig::default(), WIDTH).unwrap_err();
        assert!(matches!(
            err,
            ChartError::InvalidRecordGrouping {
                len: 11,
                group_size: 3
            }
        ));
    }

    #[test]
    fn too_few_roles_fail_fast() {
        let mut chart = datasets::masterlist_lines();
        chart.style = BarStyle::Diverging {
            roles: vec!["boss-previous".to_string(), "boss".to_string()],
            labels: Vec::new(),
        };
        let err = compute_layout(&chart, &LayoutConfig::default(), WIDTH).unwrap_err();
        assert!(matches!(
            err,
            ChartError::InvalidGroupIndex { index: 2, roles: 2 }
        ));
    }

    #[test]
    fn repeated_category_run_is_rejected() {
        let mut chart = datasets::daily_clones();
        chart.group_size = 2;
        chart.records = ["a", "a", "b", "b", "a", "a"]
            .into_iter()
            .map(|label| Record::new(label, 10.0))
            .collect();
        let err = compute_layout(&chart, &LayoutConfig::default(), WIDTH).unwrap_err();
        assert!(matches!(
            err,
            ChartError::RepeatedCategory { index: 4, ref label } if label == "a"
        ));
    }

    #[test]
    fn diverging_chart_gets_legend_at_top_right() {
        let out = layout(&datasets::masterlist_lines());
        let legend = out.legend.expect("diverging chart has a legend");
        assert_eq!((legend.x, legend.y), (WIDTH - 175.0, 20.0));
        let labels: Vec<&str> = legend.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["BOSS (year before)", "BOSS", "LOOT"]);
        assert!(layout(&datasets::daily_clones()).legend.is_none());
    }

    #[test]
    fn empty_chart_lays_out_without_bars() {
        let mut chart = datasets::daily_clones();
        chart.records.clear();
        let out = layout(&chart);
        assert!(out.bars.is_empty());
        assert!(out.x_axis.ticks.is_empty());
    }
}
