/// Diagnostic tool to verify index → stats → rank → layout pipeline
use anyhow::Context;
use sectormap::dashboard::Dashboard;
use sectormap::format::format_cap;
use sectormap::layout::{check_tiling, squarify, LayoutItem, Rect};
use sectormap::loader;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sectormap=debug".parse()?),
        )
        .init();

    let data_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/sample-companies.json"));
    let industry = std::env::args().nth(2);

    println!("=== DIAGNOSTIC: Index → Layout Pipeline ===");
    println!("Data: {}", data_path.display());

    // Load
    let companies = loader::load_companies(&data_path)
        .with_context(|| format!("loading {}", data_path.display()))?;
    println!("\n[1] Loaded: {} companies", companies.len());

    // Index
    let dash = Dashboard::new(&companies);
    let industries = dash.index.industries();
    println!(
        "\n[2] Indexed: {} industries, {} states, {} exchanges, total {}",
        industries.len(),
        dash.index.by_state.len(),
        dash.index.by_exchange.len(),
        format_cap(Some(dash.index.total_market_cap))
    );

    println!("\n[3] Top 10 industries by company count:");
    for (i, ind) in industries.iter().take(10).enumerate() {
        println!(
            "    [{}] '{}' (SIC {}, {}) - {} companies",
            i,
            ind.description,
            ind.sic_code,
            ind.division.name(),
            ind.count
        );
    }

    // Layout
    let (w, h) = (1920.0, 1080.0);
    let view = dash.view(industry.as_deref(), w, h);
    let bounds = view.treemap.bounds;
    println!(
        "\n[4] Layout computed for {:?}: {} rectangles in {:.0}x{:.0}",
        industry.as_deref().unwrap_or("(all)"),
        view.treemap.tiles.len(),
        bounds.w,
        bounds.h
    );

    println!("\n[5] Top 10 largest rectangles by area:");
    let mut sorted_tiles = view.treemap.tiles.clone();
    sorted_tiles.sort_by(|a, b| b.rect.area().total_cmp(&a.rect.area()));
    let total_value: f64 = view.treemap.tiles.iter().map(|t| t.value).sum();
    for (i, t) in sorted_tiles.iter().take(10).enumerate() {
        let expected = t.value / total_value * bounds.area();
        println!(
            "    [{}] '{}' - {:.1}x{:.1} ({:.0}px², expected {:.0}) at ({:.1}, {:.1}) aspect {:.2} - {}",
            i,
            t.company.ticker,
            t.rect.w,
            t.rect.h,
            t.rect.area(),
            expected,
            t.rect.x,
            t.rect.y,
            t.rect.aspect_ratio(),
            format_cap(Some(t.value))
        );
    }

    // Check for anomalies
    println!("\n[6] Checking for anomalies:");
    let placed: Vec<_> = view
        .treemap
        .tiles
        .iter()
        .map(|t| sectormap::layout::PlacedRect {
            rect: t.rect,
            value: t.value,
            item: (),
        })
        .collect();
    let report = check_tiling(&placed, bounds);
    println!("    Coverage:      {:.6}%", report.coverage * 100.0);
    println!("    Overlap:       {:.3e}", report.overlap);
    println!("    Out of bounds: {}", report.out_of_bounds);
    println!("    Aspect ratio:  mean {:.2}, worst {:.2}", report.mean_aspect, report.worst_aspect);
    println!("    Exact tiling:  {}", report.is_exact(1e-6));

    // Stress the engine with a synthetic spread of magnitudes
    println!("\n[7] Synthetic stress (500 items, 6 decades):");
    let items: Vec<LayoutItem<usize>> = (0..500)
        .map(|i| LayoutItem {
            value: 10f64.powf((i as f64 * 0.61803).fract() * 6.0),
            item: i,
        })
        .collect();
    let stress_bounds = Rect::new(0.0, 0.0, w, h);
    let start = std::time::Instant::now();
    let rects = squarify(&items, stress_bounds);
    let elapsed = start.elapsed();
    let report = check_tiling(&rects, stress_bounds);
    println!(
        "    {} rects in {:.2}ms, coverage {:.6}%, worst aspect {:.2}, exact {}",
        report.rects,
        elapsed.as_secs_f64() * 1000.0,
        report.coverage * 100.0,
        report.worst_aspect,
        report.is_exact(1e-6)
    );

    // Count how many rects are label candidates with production thresholds
    let labeled = view
        .treemap
        .tiles
        .iter()
        .filter(|t| t.label != sectormap::layout::LabelLevel::None)
        .count();
    println!("\n[8] Text label count: {} rects (out of {})", labeled, view.treemap.tiles.len());

    Ok(())
}
