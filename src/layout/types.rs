#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    Bottom,
    Left,
}

impl AxisOrient {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Bottom => "x axis",
            Self::Left => "y axis",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub label: String,
    /// Offset along the axis, in plot coordinates.
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    pub orient: AxisOrient,
    pub translate: (f64, f64),
    /// Pixel extent covered by the domain path.
    pub range: (f64, f64),
    pub tick_size: f64,
    pub tick_padding: f64,
    pub ticks: Vec<Tick>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub label: String,
    pub value: f64,
    pub group_index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub class: String,
    pub label: String,
    /// Offset of the swatch's top edge from the legend origin.
    pub offset: f64,
}

/// Static key for the series of a grouped chart, in outer-box coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendLayout {
    pub x: f64,
    pub y: f64,
    pub swatch: f64,
    pub entries: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub id: String,
    pub width: f64,
    pub height: f64,
    /// Top-left corner of the plot area inside the outer box.
    pub plot_x: f64,
    pub plot_y: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    /// Pixel offset of the zero value, shared by every bar.
    pub baseline: f64,
    pub x_axis: AxisLayout,
    pub y_axis: AxisLayout,
    pub bars: Vec<BarLayout>,
    pub legend: Option<LegendLayout>,
}
