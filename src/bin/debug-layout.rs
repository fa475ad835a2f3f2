/// Diagnostic tool to verify source → merge → layout → highlight pipeline
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use churnmap::highlight::HighlightMode;
use churnmap::layout::LayoutRect;
use churnmap::source::url_for;
use churnmap::style::{depth_tier, format_size, label_font_size};
use churnmap::tree::aggregate::find_weight_mismatch;
use churnmap::{App, Config, DirSource, QueryParams};

#[derive(Parser, Debug)]
#[command(name = "debug-layout", version)]
struct Args {
    /// Database directory holding filetree.json, highlight.json and .gitmodules.
    db: PathBuf,

    /// Path inside the tree to lay out.
    #[arg(long, default_value = "")]
    path: String,

    /// Canvas width / height.
    #[arg(long, default_value_t = 1.6)]
    aspect: f64,

    /// JSON config file; CLI flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Load highlight.json instead of reusing the file tree.
    #[arg(long)]
    highlight: bool,

    /// Highlight query parameter as key=value (repeatable).
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Highlight scoring mode.
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Minimum area for a box to count as visible.
    #[arg(long)]
    min_area: Option<f64>,

    /// Submodule path to leave out (repeatable).
    #[arg(long = "disable", value_name = "PATH")]
    disabled: Vec<String>,

    /// Number of boxes to list.
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Print the full layout as JSON instead of the report.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Fraction,
    Raw,
}

impl From<ModeChoice> for HighlightMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Fraction => HighlightMode::Fraction,
            ModeChoice::Raw => HighlightMode::Raw,
        }
    }
}

fn parse_params(raw: &[String]) -> anyhow::Result<QueryParams> {
    let mut params = QueryParams::new();
    for entry in raw {
        let (key, value) = entry
            .split_once('=')
            .with_context(|| format!("parameter '{}' is not key=value", entry))?;
        params.append(key, value);
    }
    Ok(params)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("churnmap=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(mode) = args.mode {
        config.highlight.mode = mode.into();
    }
    if let Some(min_area) = args.min_area {
        config.layout.min_area = min_area;
    }

    let params = parse_params(&args.params)?;
    let highlight_params = (args.highlight || !params.is_empty()).then_some(params);

    println!("=== DIAGNOSTIC: Source → Layout Pipeline ===");
    println!("Database: {}", args.db.display());
    if let Some(params) = &highlight_params {
        println!("Highlight: {}", url_for("/highlight.json", params));
    }

    let source = DirSource::new(&args.db);
    let mut app = App::load(Box::new(source), QueryParams::new(), highlight_params, config)
        .with_context(|| format!("loading trees from {}", args.db.display()))?;

    println!(
        "\n[1] Tree loaded: {} nodes, weight {} ({}), height {}",
        app.tree().len(),
        app.tree().weight(),
        format_size(app.tree().weight()),
        app.tree().height()
    );

    println!("\n[2] Submodules: {}", app.submodules().count());
    for path in &args.disabled {
        let found = app
            .set_submodule_enabled(path, false)
            .with_context(|| format!("rebuilding without {}", path))?;
        println!("    {} '{}'", if found { "disabled" } else { "not found:" }, path);
    }

    match find_weight_mismatch(app.tree(), 1e-6) {
        Some(path) => println!("\n[3] Weight mismatch at '{}'", path),
        None => println!("\n[3] Weights consistent"),
    }

    if !args.path.is_empty() && !app.drill_down(&args.path) {
        anyhow::bail!("'{}' is not a directory in the tree", args.path);
    }

    let view = app
        .view(args.aspect)
        .with_context(|| format!("no view for '{}'", args.path))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view.layout)?);
        return Ok(());
    }

    println!(
        "\n[4] Layout of '{}': {:.1}x{:.1}, {} rects, max depth {}",
        view.path,
        view.layout.width,
        view.layout.height,
        view.layout.stats.rect_count,
        view.layout.stats.max_depth
    );

    let leaf_area: f64 = view.layout.leaves().map(|r| r.extent()).sum();
    let canvas = view.layout.width * view.layout.height;
    println!("    Leaf area:   {:.1}", leaf_area);
    println!("    Canvas area: {:.1}", canvas);
    if canvas > 0.0 {
        println!("    Coverage: {:.1}%", leaf_area / canvas * 100.0);
    }

    let visible = view
        .layout
        .iter()
        .filter(|r| r.is_visible(&app.config.layout))
        .count();
    println!("    Visible: {} (min area {})", visible, app.config.layout.min_area);

    println!("\n[5] Top {} largest boxes:", args.top);
    let mut sorted: Vec<&LayoutRect> = view.layout.iter().collect();
    sorted.sort_by(|a, b| b.area.total_cmp(&a.area));
    for (i, rect) in sorted.iter().take(args.top).enumerate() {
        println!(
            "    [{}] '{}' - {:.1}x{:.1} at ({:.1}, {:.1}) - weight {} (depth {}, tier {:.2}, font {:.1}{})",
            i,
            rect.path(),
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            rect.area,
            rect.depth,
            depth_tier(rect.depth, view.layout.stats.max_depth),
            label_font_size(rect),
            if rect.is_submodule { ", submodule" } else { "" }
        );
    }

    println!(
        "\n[6] Highlight: {} boxes, score range {:?}..{:?}, {} saturated",
        view.highlight.annotated,
        view.highlight.min_score,
        view.highlight.max_score,
        view.highlight.saturated
    );
    let mut hot: Vec<&LayoutRect> = view.layout.iter().filter(|r| r.intensity().is_some()).collect();
    hot.sort_by(|a, b| b.intensity().unwrap_or(0.0).total_cmp(&a.intensity().unwrap_or(0.0)));
    for rect in hot.iter().take(args.top) {
        let fill = view.fill(rect).map(|c| c.to_css()).unwrap_or_else(|| "-".to_string());
        println!(
            "    {:.3} {} {}",
            rect.intensity().unwrap_or(0.0),
            fill,
            view.title(rect).replace('\n', " | ")
        );
    }

    println!("\n[7] Extensions by area:");
    for stat in view.extensions.entries.iter().take(args.top) {
        let share = if view.extensions.total_area > 0.0 {
            stat.area / view.extensions.total_area * 100.0
        } else {
            0.0
        };
        println!(
            "    {:<12} {:>6} files {:>5.1}%  hue {}",
            stat.extension.as_deref().unwrap_or("(none)"),
            stat.files,
            share,
            stat.hue.map_or_else(|| "-".to_string(), |h| format!("{:.0}", h))
        );
    }

    Ok(())
}
