use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

use sectormap::dashboard::{Dashboard, IndustryView};
use sectormap::format::{format_cap, format_count, format_pct, MISSING};
use sectormap::index::filter_industries;
use sectormap::loader;
use sectormap::render::colors::{choropleth_color, exchange_name, ColorMode};
use sectormap::stats::{ListingTimeline, LogHistogram, MapMode, MetricRow, StateBreakdown};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorArg {
    Scale,
    Exchange,
}

/// Industry market-value report: stats, ranking and squarified treemap for one selection.
#[derive(Debug, Parser)]
#[command(name = "sectormap", version)]
struct Cli {
    /// Company data file (JSON array). Defaults to companies.json, then data/sample-companies.json
    data: Option<PathBuf>,

    /// Industry (SIC description) to select; all companies when omitted
    #[arg(short, long)]
    industry: Option<String>,

    /// Second industry for a side-by-side comparison
    #[arg(short, long, requires = "industry")]
    compare: Option<String>,

    /// List industries matching a search term and exit
    #[arg(long, value_name = "QUERY")]
    list: Option<String>,

    /// Treemap viewport width
    #[arg(long, default_value_t = 960.0)]
    width: f64,

    /// Treemap viewport height
    #[arg(long, default_value_t = 540.0)]
    height: f64,

    #[arg(long, value_enum, default_value_t = ColorArg::Scale)]
    color_mode: ColorArg,

    /// Rows of the ranked table to print
    #[arg(long, default_value_t = 20)]
    top: usize,

    /// Print the summary, distributions and placed tiles as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sectormap=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let candidates = match &cli.data {
        Some(path) => vec![path.clone()],
        None => vec![
            PathBuf::from("companies.json"),
            PathBuf::from("data/sample-companies.json"),
        ],
    };
    let companies = loader::load_first_available(&candidates)?;

    let mut dash = Dashboard::new(&companies);
    dash.colors.mode = match cli.color_mode {
        ColorArg::Scale => ColorMode::Scale,
        ColorArg::Exchange => ColorMode::Exchange,
    };

    let industries = dash.index.industries();
    println!(
        "{} companies · {} industries · {} total",
        format_count(companies.len() as u64),
        industries.len(),
        format_cap(Some(dash.index.total_market_cap))
    );

    if let Some(query) = &cli.list {
        for (division, matches) in filter_industries(&industries, query) {
            println!("\n{}", division.name());
            for ind in matches {
                println!("  {:<48} SIC {:<6} {:>5}", ind.description, ind.sic_code, ind.count);
            }
        }
        return Ok(());
    }

    for name in cli.industry.iter().chain(cli.compare.iter()) {
        if dash.index.by_industry.get(name).is_none() {
            bail!("Unknown industry '{}' (try --list)", name);
        }
    }

    if let (Some(a), Some(b)) = (&cli.industry, &cli.compare) {
        let cmp = dash.compare(a, b, cli.width, cli.height);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&cmp.report())?);
            return Ok(());
        }
        print_comparison(a, b, &cmp.metrics);
        print_view(&cmp.a, cli.top);
        print_view(&cmp.b, cli.top);
        return Ok(());
    }

    let view = dash.view(cli.industry.as_deref(), cli.width, cli.height);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view.report())?);
    } else {
        print_view(&view, cli.top);
    }
    Ok(())
}

fn print_view(view: &IndustryView<'_>, top: usize) {
    let s = &view.summary;
    let caps = &s.caps;
    println!("\n=== {} ===", view.industry.as_deref().unwrap_or("All industries"));
    println!("  Companies:     {} ({} active, {} inactive)", format_count(caps.count as u64), s.active, s.inactive);
    println!("  Market cap:    {} ({} of all)", format_cap(Some(caps.sum)), format_pct(caps.share_of_total_pct / 100.0));
    println!("  Average:       {}", format_cap(Some(caps.mean)));
    println!("  Median:        {}", format_cap(Some(caps.median)));
    let extreme = |c: Option<&sectormap::model::Company>| match c {
        Some(c) => format!("{} · {} · {}", c.ticker, c.name, format_cap(c.market_cap)),
        None => MISSING.to_string(),
    };
    println!("  Largest:       {}", extreme(caps.largest));
    println!("  Smallest:      {}", extreme(caps.smallest));
    println!("  Employees:     {}", format_count(s.total_employees));
    println!("  HHI:           {} ({})", format_count(caps.hhi.round() as u64), s.concentration().label());
    println!("  States:        {}", s.states);
    let exchanges: Vec<String> = s
        .exchanges()
        .iter()
        .map(|(k, n)| format!("{}: {}", exchange_name(Some(k.as_str())), n))
        .collect();
    println!("  Exchanges:     {}", exchanges.join(", "));

    let map = StateBreakdown::build(&view.companies);
    let max_state = map.max_value(MapMode::MarketCap);
    let mut states: Vec<_> = map.states.iter().collect();
    states.sort_by(|a, b| b.market_cap.total_cmp(&a.market_cap));
    if !states.is_empty() {
        println!("\n  Top states by market cap:");
        for st in states.iter().take(5) {
            println!(
                "    {:<4} {:>5} {:>10}  {}",
                st.state,
                st.count,
                format_cap(Some(st.market_cap)),
                choropleth_color(st.market_cap, max_state).to_hex()
            );
        }
    }

    if let Some(timeline) = ListingTimeline::build(view.companies.iter().copied()) {
        println!(
            "\n  Listings: {}–{}, at most {} in one year",
            timeline.first_year,
            timeline.last_year,
            timeline.busiest()
        );
    }

    if let Some(hist) = LogHistogram::build(view.companies.iter().map(|c| c.cap())) {
        let tallest = hist.tallest().max(1);
        println!("\n  Market cap distribution:");
        for (i, &n) in hist.buckets.iter().enumerate() {
            let bar = "#".repeat(n * 30 / tallest);
            println!("  {:>9} | {:<30} {}", format_cap(Some(hist.bucket_start(i))), bar, n);
        }
    }

    println!("\n  {:>4}  {:<8} {:<36} {:>10}", "#", "Ticker", "Name", "Cap");
    for r in view.ranked.top(top) {
        println!(
            "  {:>4}  {:<8} {:<36} {:>10}",
            r.rank,
            r.entity.ticker,
            truncate(&r.entity.name, 36),
            format_cap(r.entity.market_cap)
        );
    }

    let tm = &view.treemap;
    println!(
        "\n  Treemap: {} tiles in {:.0}x{:.0}",
        tm.tiles.len(),
        tm.bounds.w,
        tm.bounds.h
    );
    for t in tm.tiles.iter().take(top) {
        println!(
            "    {:<8} {:>8.1},{:>8.1}  {:>8.1}x{:<8.1} {}",
            t.company.ticker,
            t.rect.x,
            t.rect.y,
            t.rect.w,
            t.rect.h,
            t.color.to_hex()
        );
    }
}

fn print_comparison(a: &str, b: &str, metrics: &[MetricRow]) {
    println!("\n=== {} vs {} ===", a, b);
    for m in metrics {
        let marker = match m.direction() {
            std::cmp::Ordering::Greater => "▲",
            std::cmp::Ordering::Less => "▼",
            std::cmp::Ordering::Equal => "=",
        };
        let ratio = m
            .ratio()
            .map(|r| format!("{:.1}x", r))
            .unwrap_or_else(|| MISSING.to_string());
        println!("  {:<20} {:>16} {} {:>6} {:>16}", m.label, m.a, marker, ratio, m.b);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
