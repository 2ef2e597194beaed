use crate::config::{Config, apply_init_config, load_config};
use crate::datasets;
use crate::embed::embed_svg;
use crate::ir::ChartDefinition;
use crate::layout::{ChartLayout, compute_layout};
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_chart;
use crate::render::{render_svg, write_output_svg};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bcr", version, about = "Bar chart renderer for static blog posts")]
pub struct Args {
    /// Chart definition (.json/.json5), Markdown post, or '-' for stdin
    #[arg(short = 'i', long = "input", conflicts_with = "builtin")]
    pub input: Option<PathBuf>,

    /// Render a built-in chart: daily-clones, download-rates, masterlist-lines or all
    #[arg(short = 'b', long = "builtin")]
    pub builtin: Option<String>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, layout)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Measured container width in pixels
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// HTML page to render the charts into, by container id
    #[arg(long = "embed")]
    pub embed: Option<PathBuf>,

    /// Write the computed layouts as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut base_config = load_config(args.config.as_deref())
        .with_context(|| format!("failed to load config {:?}", args.config))?;
    if let Some(width) = args.width {
        base_config.render.container_width = width;
    }

    let charts = collect_charts(&args, &base_config)?;
    if charts.is_empty() {
        return Err(anyhow::anyhow!("No chart definitions found in input"));
    }

    let mut layouts = Vec::with_capacity(charts.len());
    for (chart, config) in &charts {
        let layout = compute_layout(chart, &config.layout, config.render.container_width)
            .with_context(|| format!("failed to lay out chart {}", chart.id))?;
        layouts.push(layout);
    }

    if let Some(path) = args.dump_layout.as_deref() {
        let pairs: Vec<(ChartLayout, ChartDefinition)> = layouts
            .iter()
            .cloned()
            .zip(charts.iter().map(|(chart, _)| chart.clone()))
            .collect();
        write_layout_dump(path, &pairs)?;
        info!(path = %path.display(), "wrote layout dump");
    }

    let rendered: Vec<(&str, String, &Config)> = charts
        .iter()
        .zip(&layouts)
        .map(|((chart, config), layout)| {
            (chart.id.as_str(), render_svg(layout, &config.theme), config)
        })
        .collect();

    if let Some(page_path) = args.embed.as_deref() {
        if args.output_format != OutputFormat::Svg {
            return Err(anyhow::anyhow!("--embed only supports SVG output"));
        }
        let mut page = std::fs::read_to_string(page_path)
            .with_context(|| format!("failed to read {}", page_path.display()))?;
        for (id, svg, _) in &rendered {
            page = embed_svg(&page, id, svg)?;
        }
        return write_output_svg(&page, args.output.as_deref());
    }

    if rendered.len() == 1 {
        let (_, svg, config) = &rendered[0];
        return match args.output_format {
            OutputFormat::Svg => write_output_svg(svg, args.output.as_deref()),
            OutputFormat::Png => {
                let output = args
                    .output
                    .as_deref()
                    .context("--output is required for PNG output")?;
                write_png(svg, output, config)
            }
        };
    }

    let ids: Vec<&str> = rendered.iter().map(|(id, _, _)| *id).collect();
    let outputs = resolve_multi_outputs(args.output.as_deref(), args.output_format, &ids)?;
    for ((_, svg, config), output) in rendered.iter().zip(&outputs) {
        match args.output_format {
            OutputFormat::Svg => write_output_svg(svg, Some(output.as_path()))?,
            OutputFormat::Png => write_png(svg, output, config)?,
        }
    }

    Ok(())
}

fn collect_charts(args: &Args, base_config: &Config) -> Result<Vec<(ChartDefinition, Config)>> {
    if let Some(name) = args.builtin.as_deref() {
        let charts = if name == "all" {
            datasets::all_builtins()
        } else {
            vec![datasets::builtin(name)?]
        };
        return Ok(charts
            .into_iter()
            .map(|chart| (chart, base_config.clone()))
            .collect());
    }

    let (input, kind) = read_source(args.input.as_deref())?;
    let sources = match kind {
        SourceKind::Markdown => extract_chart_blocks(&input),
        SourceKind::Definition => vec![input],
    };
    debug!(count = sources.len(), "chart sources found");

    let mut charts = Vec::with_capacity(sources.len());
    for source in &sources {
        let parsed = parse_chart(source)?;
        let mut config = base_config.clone();
        if let Some(init) = parsed.init_config.as_ref() {
            apply_init_config(&mut config.theme, init);
        }
        charts.push((parsed.chart, config));
    }
    Ok(charts)
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires building with the `png` feature"
    ))
}

/// Info-string word that marks a fenced block as a chart definition.
const CHART_INFO: &str = "barchart";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Definition,
    Markdown,
}

impl SourceKind {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("md" | "markdown") => Self::Markdown,
            _ => Self::Definition,
        }
    }

    /// Piped input has no extension; a chart fence marks it as Markdown.
    fn sniff(content: &str) -> Self {
        if content.lines().any(|line| Fence::open(line.trim()).is_some()) {
            Self::Markdown
        } else {
            Self::Definition
        }
    }
}

fn read_source(path: Option<&Path>) -> Result<(String, SourceKind)> {
    match path.filter(|path| *path != Path::new("-")) {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok((content, SourceKind::for_path(path)))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            let kind = SourceKind::sniff(&buf);
            Ok((buf, kind))
        }
    }
}

/// Opening fence of a chart block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    fn open(line: &str) -> Option<Self> {
        let marker = line.chars().next().filter(|c| matches!(c, '`' | '~'))?;
        let len = line.chars().take_while(|c| *c == marker).count();
        if len < 3 {
            return None;
        }
        let info = line[len..].split_whitespace().next();
        (info == Some(CHART_INFO)).then_some(Self { marker, len })
    }

    /// A closing fence uses the same marker, at least as many times.
    fn closes(&self, line: &str) -> bool {
        let run = line.chars().take_while(|c| *c == self.marker).count();
        run >= self.len && line[run..].trim().is_empty()
    }
}

/// Bodies of the chart blocks in a Markdown document. A block left open runs
/// to the end of the document.
fn extract_chart_blocks(input: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut open: Option<(Fence, Vec<&str>)> = None;

    for line in input.lines() {
        let trimmed = line.trim();
        open = match open.take() {
            None => Fence::open(trimmed).map(|fence| (fence, Vec::new())),
            Some((fence, body)) if fence.closes(trimmed) => {
                blocks.push(body.join("\n"));
                None
            }
            Some((fence, mut body)) => {
                body.push(line);
                Some((fence, body))
            }
        };
    }
    if let Some((_, body)) = open {
        blocks.push(body.join("\n"));
    }

    blocks
}

fn resolve_multi_outputs(
    output: Option<&Path>,
    format: OutputFormat,
    ids: &[&str],
) -> Result<Vec<PathBuf>> {
    let ext = format.extension();
    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required for multiple charts"))?;
    if base.is_dir() {
        return Ok(ids
            .iter()
            .map(|id| base.join(format!("{}.{}", id, ext)))
            .collect());
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    Ok(ids
        .iter()
        .map(|id| parent.join(format!("{}-{}.{}", stem, id, ext)))
        .collect())
}
