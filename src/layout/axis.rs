use crate::config::LayoutConfig;
use crate::scale::{BandScale, ValueScale, format_tick, tick_precision};

use super::{AxisLayout, AxisOrient, Tick};

/// Category axis along the bottom of the plot, one tick per band centre.
pub fn x_axis(
    x: &BandScale,
    inner_width: f64,
    inner_height: f64,
    config: &LayoutConfig,
) -> AxisLayout {
    let half = x.band_width() / 2.0;
    AxisLayout {
        orient: AxisOrient::Bottom,
        translate: (0.0, inner_height),
        range: (0.0, inner_width),
        tick_size: config.tick_size,
        tick_padding: config.tick_padding,
        ticks: x
            .bands()
            .map(|(label, offset)| Tick {
                label: label.to_string(),
                position: offset + half,
            })
            .collect(),
    }
}

/// Value axis on the left. Explicit tick values win over generated ones; the
/// label precision always comes from the generated step.
pub fn y_axis(y: &ValueScale, tick_values: Option<&[f64]>, config: &LayoutConfig) -> AxisLayout {
    let values = match tick_values {
        Some(values) => values.to_vec(),
        None => y.ticks(config.tick_count),
    };
    let precision = y
        .tick_step(config.tick_count)
        .map(tick_precision)
        .unwrap_or(0);

    AxisLayout {
        orient: AxisOrient::Left,
        translate: (0.0, 0.0),
        range: (y.pixel_height(), 0.0),
        tick_size: config.tick_size,
        tick_padding: config.tick_padding,
        ticks: values
            .into_iter()
            .map(|value| Tick {
                label: format_tick(value, precision),
                position: y.y(value),
            })
            .collect(),
    }
}
