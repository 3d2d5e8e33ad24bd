/// Diagnostic tool to verify requirements → layout → constraint pipeline
use anyhow::Context;
use reqmap::estimate::{self, format_effort, Requirement};
use reqmap::layout::diagnostics::diagnose;
use reqmap::layout::log::TracingLog;
use reqmap::layout::{layout_with_log, resolve_height, LayoutConfig};

const SAMPLE: &str = "\
REQ-101,21,Single sign-on,critical,very-complex
REQ-102,13,Estimate import,high,complex
REQ-103,8,Priority filters,medium,moderate
REQ-104,8,Effort rollup,high,moderate
REQ-105,5,Relation editor,medium,complex
REQ-106,3,Badge styling,low,simple
REQ-107,2,CSV export,low,simple
REQ-108,0.5,Tooltip copy,low,simple
";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("reqmap=debug".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let source = args.next();
    let width: f64 = match args.next() {
        Some(raw) => raw.parse::<f64>().with_context(|| format!("bad width '{}'", raw))?,
        None => 1280.0,
    };
    let height: f64 = match args.next() {
        Some(raw) => raw.parse::<f64>().with_context(|| format!("bad height '{}'", raw))?,
        None => 0.0,
    };

    let text = match &source {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?,
        None => SAMPLE.to_string(),
    };
    let requirements = estimate::parse_requirements(&text)?;

    println!("=== DIAGNOSTIC: Requirements → Treemap Layout ===");
    println!("Source: {}", source.as_deref().unwrap_or("(built-in sample)"));
    println!("\n[1] Parsed {} requirements", requirements.len());

    let config = LayoutConfig::default();
    let items = estimate::to_items(&requirements);
    let placeable = items.iter().filter(|item| item.is_placeable()).count();
    let Some(canvas_h) = resolve_height(placeable, width, height, &config) else {
        println!("\n✗ Canvas {:.0}x{:.0} cannot be laid out", width, height);
        return Ok(());
    };
    println!("\n[2] Canvas: {:.0}x{:.0}", width, canvas_h);

    let nodes = layout_with_log(&items, width, canvas_h, &config, &TracingLog);
    println!("\n[3] Layout computed: {} nodes", nodes.len());

    for node in &nodes {
        let req: &Requirement = &node.payload;
        println!(
            "    '{}' {} [{} / {}] - rect: {:.1}x{:.1} at ({:.1}, {:.1}) - {:?}",
            req.title,
            format_effort(req.effort_days),
            req.priority,
            req.complexity,
            node.rect.width,
            node.rect.height,
            node.rect.x,
            node.rect.y,
            node.variant()
        );
    }

    let report = diagnose(&nodes, width, canvas_h, &config);
    println!("\n[4] Checking for anomalies:");
    println!("    Overlapping pairs:     {}", report.overlaps);
    println!("    Out of bounds:         {}", report.out_of_bounds);
    println!("    Aspect > {:.1}:          {}", config.max_aspect_ratio, report.aspect_violations);
    println!("    Proportionality error: {:.4}", report.proportionality_error);
    println!("    {}", if report.is_clean() { "✓ clean" } else { "✗ needs attention" });

    Ok(())
}
