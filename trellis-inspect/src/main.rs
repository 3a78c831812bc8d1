//! trellis-inspect: lay out, paint and hit-test a sample tree, then report.
//!
//! Logging is controlled with `RUST_LOG`; `RUST_LOG=trellis=trace` prints a
//! `[LAYOUT]` line per node laid out.

mod scene;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use trellis::{BoxConstraints, DisplayList, Offset, PipelineConfig, Rect, RenderTree, Size};

use crate::scene::{Scene, SceneKind};

/// CLI flags for the inspector.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Viewport width in logical pixels.
    #[clap(long, default_value_t = 400.0)]
    width: f32,

    /// Viewport height in logical pixels.
    #[clap(long, default_value_t = 300.0)]
    height: f32,

    /// Sample tree to build.
    #[clap(long, value_enum, default_value_t = SceneKind::Flex)]
    scene: SceneKind,

    /// Active page for the indexed scene.
    #[clap(long, default_value_t = 1)]
    index: usize,

    /// Hit-test a root-space point, given as `x,y`.
    #[clap(long, value_parser = parse_point)]
    hit: Option<Offset>,

    /// Print the report as JSON.
    #[clap(long)]
    json: bool,

    /// JSON pipeline config file.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Stroke layout bounds while painting.
    #[clap(long)]
    show_bounds: bool,
}

fn parse_point(value: &str) -> Result<Offset, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {value:?}"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Offset::new(x, y))
}

#[derive(Debug, Serialize)]
struct Report {
    scene: String,
    viewport: Size,
    config: PipelineConfig,
    nodes: Vec<NodeReport>,
    paint_ops: usize,
    filled: Vec<Rect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hits: Option<Vec<HitReport>>,
}

#[derive(Debug, Serialize)]
struct NodeReport {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'static str>,
    depth: usize,
    rect: Rect,
}

#[derive(Debug, Serialize)]
struct HitReport {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'static str>,
    local: Offset,
}

fn load_config(args: &Args) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };
    if args.show_bounds {
        config.show_layout_bounds = true;
    }
    Ok(config)
}

fn run(args: &Args) -> Result<Report> {
    if !(args.width.is_finite() && args.height.is_finite()) || args.width < 0.0 || args.height < 0.0 {
        bail!("viewport must be finite and non-negative, got {}x{}", args.width, args.height);
    }

    let config = load_config(args)?;
    let mut tree = RenderTree::new(config.clone());
    let scene = scene::build(args.scene, &mut tree, args.index)?;

    let viewport = BoxConstraints::tight(args.width, args.height);
    tree.flush_layout(scene.root, viewport)
        .with_context(|| format!("layout of the {:?} scene aborted", args.scene))?;

    let mut list = DisplayList::new();
    tree.flush_paint(scene.root, &mut list);
    tracing::info!(ops = list.len(), "painted frame");

    let hits = args.hit.map(|point| {
        tree.hit_test(scene.root, point)
            .entries()
            .iter()
            .map(|entry| HitReport {
                kind: tree.kind_name(entry.id).unwrap_or("?"),
                label: scene.label(entry.id),
                local: entry.local_position,
            })
            .collect()
    });

    Ok(Report {
        scene: format!("{:?}", args.scene).to_lowercase(),
        viewport: Size::new(args.width, args.height),
        config,
        nodes: node_reports(&tree, &scene),
        paint_ops: list.len(),
        filled: list.filled_rects().into_iter().map(|(rect, _)| rect).collect(),
        hits,
    })
}

fn node_reports(tree: &RenderTree, scene: &Scene) -> Vec<NodeReport> {
    let root_depth = tree.depth(scene.root).unwrap_or(0);
    tree.descendants(scene.root)
        .into_iter()
        // Inactive IndexedStack pages were never laid out.
        .filter(|&id| tree.constraints(id).is_some())
        .map(|id| NodeReport {
            kind: tree.kind_name(id).unwrap_or("?"),
            label: scene.label(id),
            depth: tree.depth(id).unwrap_or(0) - root_depth,
            rect: tree.global_rect(id),
        })
        .collect()
}

fn print_text(report: &Report) {
    println!(
        "scene {} at {:.0}x{:.0}",
        report.scene, report.viewport.width, report.viewport.height
    );
    for node in &report.nodes {
        let label = node.label.map(|l| format!(" \"{l}\"")).unwrap_or_default();
        println!(
            "{}{}{} @ ({:.0}, {:.0}) {:.0}x{:.0}",
            "  ".repeat(node.depth),
            node.kind,
            label,
            node.rect.x,
            node.rect.y,
            node.rect.width,
            node.rect.height,
        );
    }
    println!("{} paint ops, {} filled rects", report.paint_ops, report.filled.len());

    if let Some(hits) = &report.hits {
        if hits.is_empty() {
            println!("hit: nothing");
        }
        for (i, hit) in hits.iter().enumerate() {
            let label = hit.label.map(|l| format!(" \"{l}\"")).unwrap_or_default();
            println!(
                "hit {i}: {}{} at local ({:.0}, {:.0})",
                hit.kind, label, hit.local.x, hit.local.y
            );
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let report = run(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }
    Ok(())
}
