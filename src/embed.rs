//! Splicing rendered charts into an HTML page.

use crate::config::Config;
use crate::error::{ChartError, Result};
use crate::ir::ChartDefinition;
use crate::layout::compute_layout;
use crate::render::{escape_xml, render_svg};
use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, Selector, element, rewrite_str};
use tracing::debug;

fn id_selector(id: &str) -> Result<String> {
    let invalid = || ChartError::InvalidContainerId { id: id.to_string() };
    let plain = id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !plain || id.is_empty() || id.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let selector = format!("#{id}");
    selector.parse::<Selector>().map_err(|_| invalid())?;
    Ok(selector)
}

/// Removes `id` from the chart's root element so a nested chart does not
/// duplicate its container's id.
fn strip_chart_id(svg: &str, id: &str) -> Result<String> {
    let selector = format!("svg{}", id_selector(id)?);
    let mut stripped = false;
    let out = rewrite_str(
        svg,
        RewriteStrSettings {
            element_content_handlers: vec![element!(selector, |el| {
                if !stripped {
                    el.remove_attribute("id");
                    stripped = true;
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )?;
    Ok(out)
}

/// Places `svg` in the first element whose id is `id`. An `<svg>` placeholder
/// is replaced outright, since the rendered chart carries the same id. Any
/// other element receives the chart as its first child, without the id.
pub fn embed_svg(html: &str, id: &str, svg: &str) -> Result<String> {
    let selector = id_selector(id)?;
    let nested = strip_chart_id(svg, id)?;
    let mut container: Option<String> = None;

    let out = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!(selector, |el| {
                if container.is_some() {
                    return Ok(());
                }
                let tag = el.tag_name().to_ascii_lowercase();
                if tag == "svg" {
                    el.replace(svg, ContentType::Html);
                } else if el.is_self_closing() {
                    let attrs: String = el
                        .attributes()
                        .iter()
                        .map(|attr| format!(" {}=\"{}\"", attr.name(), escape_xml(&attr.value())))
                        .collect();
                    el.replace(&format!("<{tag}{attrs}>{nested}</{tag}>"), ContentType::Html);
                } else {
                    el.prepend(&nested, ContentType::Html);
                }
                container = Some(tag);
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )?;

    match container {
        Some(tag) => {
            debug!(id, tag = %tag, "embedded chart");
            Ok(out)
        }
        None => Err(ChartError::ContainerNotFound { id: id.to_string() }),
    }
}

/// Renders every chart into its container. Stops at the first chart whose
/// container is missing.
pub fn embed_all(html: &str, charts: &[ChartDefinition], config: &Config) -> Result<String> {
    let mut page = html.to_string();
    for chart in charts {
        let layout = compute_layout(chart, &config.layout, config.render.container_width)?;
        let svg = render_svg(&layout, &config.theme);
        page = embed_svg(&page, &chart.id, &svg)?;
    }
    Ok(page)
}
