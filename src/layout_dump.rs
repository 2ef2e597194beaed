use crate::ir::ChartDefinition;
use crate::layout::{AxisLayout, ChartLayout};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub id: String,
    pub scale: String,
    pub group_size: usize,
    pub width: f64,
    pub height: f64,
    pub plot: [f64; 4],
    pub baseline: f64,
    pub x_ticks: Vec<TickDump>,
    pub y_ticks: Vec<TickDump>,
    pub bars: Vec<BarDump>,
}

#[derive(Debug, Serialize)]
pub struct TickDump {
    pub label: String,
    pub position: f64,
}

#[derive(Debug, Serialize)]
pub struct BarDump {
    pub label: String,
    pub value: f64,
    pub group_index: usize,
    pub class: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

fn ticks(axis: &AxisLayout) -> Vec<TickDump> {
    axis.ticks
        .iter()
        .map(|tick| TickDump {
            label: tick.label.clone(),
            position: tick.position,
        })
        .collect()
}

impl LayoutDump {
    pub fn from_layout(layout: &ChartLayout, chart: &ChartDefinition) -> Self {
        let bars = layout
            .bars
            .iter()
            .map(|bar| BarDump {
                label: bar.label.clone(),
                value: bar.value,
                group_index: bar.group_index,
                class: bar.class.clone(),
                x: bar.x,
                y: bar.y,
                width: bar.width,
                height: bar.height,
            })
            .collect();

        LayoutDump {
            id: layout.id.clone(),
            scale: format!("{:?}", chart.scale),
            group_size: chart.group_size,
            width: layout.width,
            height: layout.height,
            plot: [
                layout.plot_x,
                layout.plot_y,
                layout.inner_width,
                layout.inner_height,
            ],
            baseline: layout.baseline,
            x_ticks: ticks(&layout.x_axis),
            y_ticks: ticks(&layout.y_axis),
            bars,
        }
    }
}

pub fn write_layout_dump(
    path: &Path,
    layouts: &[(ChartLayout, ChartDefinition)],
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dumps: Vec<LayoutDump> = layouts
        .iter()
        .map(|(layout, chart)| LayoutDump::from_layout(layout, chart))
        .collect();
    serde_json::to_writer_pretty(writer, &dumps)?;
    Ok(())
}
