use crate::layout::{AxisLayout, AxisOrient, BarLayout, ChartLayout, LegendLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub fn render_svg(layout: &ChartLayout, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"{}\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
        escape_xml(&layout.id),
    ));

    if let Some(stylesheet) = theme.stylesheet.as_deref() {
        svg.push_str(&format!("<style>{}</style>", escape_xml_text(stylesheet)));
    }

    svg.push_str(&format!(
        "<rect class=\"background\" width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    svg.push_str(&format!(
        "<g transform=\"translate({},{})\">",
        layout.plot_x, layout.plot_y
    ));
    svg.push_str(&axis_svg(&layout.x_axis, theme));
    svg.push_str(&axis_svg(&layout.y_axis, theme));
    for bar in &layout.bars {
        svg.push_str(&bar_svg(bar));
    }
    svg.push_str("</g>");

    if let Some(legend) = layout.legend.as_ref() {
        svg.push_str(&legend_svg(&layout.id, legend, theme));
    }

    svg.push_str("</svg>");
    svg
}

fn legend_svg(chart_id: &str, legend: &LegendLayout, theme: &Theme) -> String {
    let mut out = format!(
        "<g id=\"{}-legend\" class=\"legend\" transform=\"translate({},{})\" font-family=\"{}\" font-size=\"{}\">",
        escape_xml(chart_id),
        legend.x,
        legend.y,
        escape_xml(&theme.font_family),
        theme.font_size,
    );
    for entry in &legend.entries {
        out.push_str(&format!(
            "<g transform=\"translate(0,{})\"><rect class=\"{}\" width=\"{s}\" height=\"{s}\"/><text x=\"{}\" y=\"{}\" dy=\"0.32em\" fill=\"{}\">{}</text></g>",
            entry.offset,
            escape_xml(&entry.class),
            legend.swatch + 6.0,
            legend.swatch / 2.0,
            theme.text_color,
            escape_xml(&entry.label),
            s = legend.swatch,
        ));
    }
    out.push_str("</g>");
    out
}

fn bar_svg(bar: &BarLayout) -> String {
    format!(
        "<rect class=\"{}\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/>",
        escape_xml(&bar.class),
        bar.x,
        bar.y,
        bar.width,
        bar.height
    )
}

fn axis_svg(axis: &AxisLayout, theme: &Theme) -> String {
    let size = axis.tick_size;
    let label_offset = axis.tick_size + axis.tick_padding;
    let (r0, r1) = axis.range;
    let mut out = String::new();

    let anchor = match axis.orient {
        AxisOrient::Bottom => "middle",
        AxisOrient::Left => "end",
    };
    out.push_str(&format!(
        "<g class=\"{}\" transform=\"translate({},{})\" fill=\"none\" font-family=\"{}\" font-size=\"{}\" text-anchor=\"{anchor}\">",
        axis.orient.class(),
        axis.translate.0,
        axis.translate.1,
        escape_xml(&theme.font_family),
        theme.font_size,
    ));

    for tick in &axis.ticks {
        let (transform, line, text_pos) = match axis.orient {
            AxisOrient::Bottom => (
                format!("translate({:.2},0)", tick.position),
                format!("y2=\"{size}\""),
                format!("y=\"{label_offset}\" dy=\"0.71em\""),
            ),
            AxisOrient::Left => (
                format!("translate(0,{:.2})", tick.position),
                format!("x2=\"{}\"", -size),
                format!("x=\"{}\" dy=\"0.32em\"", -label_offset),
            ),
        };
        out.push_str(&format!(
            "<g class=\"tick\" transform=\"{transform}\"><line {line} stroke=\"{}\"/><text {text_pos} fill=\"{}\">{}</text></g>",
            theme.axis_color,
            theme.text_color,
            escape_xml(&tick.label)
        ));
    }

    let domain = match axis.orient {
        AxisOrient::Bottom => format!("M{r0},{size}V0H{r1}V{size}"),
        AxisOrient::Left => format!("M{},{r0}H0V{r1}H{}", -size, -size),
    };
    out.push_str(&format!(
        "<path class=\"domain\" d=\"{domain}\" stroke=\"{}\"/>",
        theme.axis_color
    ));
    out.push_str("</g>");
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
            info!(path = %path.display(), "wrote svg");
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme.font_family.clone();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    info!(path = %output.display(), "wrote png");
    Ok(())
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// CSS keeps its quotes and `>` combinators; only markup delimiters are escaped.
fn escape_xml_text(input: &str) -> String {
    input.replace('&', "&amp;").replace('<', "&lt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::datasets;
    use crate::layout::compute_layout;

    fn render(chart: &crate::ir::ChartDefinition, theme: &Theme) -> String {
        let layout = compute_layout(chart, &LayoutConfig::default(), 760.0).unwrap();
        render_svg(&layout, theme)
    }

    #[test]
    fn render_svg_basic() {
        let svg = render(&datasets::masterlist_lines(), &Theme::plain());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("id=\"commits\""));
        assert!(svg.contains("width=\"760\" height=\"500\""));
        assert!(svg.contains("<g transform=\"translate(60,20)\">"));
        assert!(svg.contains("class=\"x axis\" transform=\"translate(0,450)\""));
        assert!(svg.contains("class=\"y axis\""));
        // Twelve bars plus one swatch per legend role.
        assert_eq!(svg.matches("<rect class=\"bar ").count(), 15);
        assert!(svg.contains("class=\"bar negative loot\""));
        assert!(svg.contains(">24,500</text>"));
        assert!(!svg.contains("<style>"));
    }

    #[test]
    fn bars_keep_record_order() {
        let svg = render(&datasets::download_rates(), &Theme::plain());
        let boss = svg.find("class=\"bar boss\"").unwrap();
        let loot = svg.find("class=\"bar loot\"").unwrap();
        assert!(boss < loot);
    }

    #[test]
    fn escapes_labels_and_keeps_stylesheet() {
        let mut chart = datasets::daily_clones();
        chart.records[0].label = "Fallout <3> & co".to_string();
        let svg = render(&chart, &Theme::modern());
        assert!(svg.contains("Fallout &lt;3&gt; &amp; co"));
        assert!(svg.contains("<style>.axis path"));
    }

    #[test]
    fn legend_is_pinned_to_top_right_of_diverging_chart() {
        let svg = render(&datasets::masterlist_lines(), &Theme::plain());
        assert!(svg.contains(
            "<g id=\"commits-legend\" class=\"legend\" transform=\"translate(585,20)\""
        ));
        assert!(svg.contains(
            "<g transform=\"translate(0,40)\"><rect class=\"bar positive loot\" width=\"18\" height=\"18\"/>"
        ));
        assert!(svg.contains(">BOSS (year before)</text>"));
        // The legend sits outside the translated plot group.
        let plot_end = svg.rfind("</g><g id=\"commits-legend\"").unwrap();
        assert!(plot_end > svg.find("class=\"bar negative loot\"").unwrap());

        let plain = render(&datasets::daily_clones(), &Theme::plain());
        assert!(!plain.contains("class=\"legend\""));
    }

    #[test]
    fn domain_paths_follow_ranges() {
        let svg = render(&datasets::daily_clones(), &Theme::plain());
        assert!(svg.contains("d=\"M0,6V0H680V6\""));
        assert!(svg.contains("d=\"M-6,250H0V0H-6\""));
    }
}
