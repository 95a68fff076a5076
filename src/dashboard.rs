//! Selection → statistics → ranking → treemap, for one company snapshot.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use compact_str::CompactString;
use rayon::prelude::*;
use serde::Serialize;

use crate::index::{EntityIndex, Industry};
use crate::layout::{check_tiling, squarify, LabelLevel, LayoutItem, PlacedRect, Rect, TreemapConfig};
use crate::model::Company;
use crate::rank::{rank, RankedList};
use crate::render::colors::{treemap_color, AppColor, ColorSettings};
use crate::stats::{
    compare_summaries, summarize_companies, CompanySummary, ListingTimeline, LogHistogram, MetricRow,
    StateBreakdown,
};

/// One colored treemap tile.
#[derive(Debug, Clone, Copy)]
pub struct Tile<'a> {
    pub rect: Rect,
    pub value: f64,
    pub company: &'a Company,
    pub color: AppColor,
    pub label: LabelLevel,
}

/// The full treemap result (tiles + fast lookup).
#[derive(Debug, Default)]
pub struct Treemap<'a> {
    pub bounds: Rect,
    pub tiles: Vec<Tile<'a>>,
    /// ticker → index into `tiles`
    pub by_ticker: HashMap<CompactString, usize>,
}

impl<'a> Treemap<'a> {
    /// Tile under a point, for hover and click.
    pub fn hit(&self, x: f64, y: f64) -> Option<&Tile<'a>> {
        self.tiles.iter().find(|t| t.rect.contains(x, y))
    }

    pub fn tile(&self, ticker: &str) -> Option<&Tile<'a>> {
        self.by_ticker.get(ticker).map(|&i| &self.tiles[i])
    }
}

/// Everything the dashboard shows for one selection.
#[derive(Debug)]
pub struct IndustryView<'a> {
    /// `None` is "all industries"
    pub industry: Option<String>,
    pub companies: Vec<&'a Company>,
    pub summary: CompanySummary<'a>,
    pub ranked: RankedList<'a, Company>,
    pub treemap: Treemap<'a>,
}

impl<'a> IndustryView<'a> {
    /// Everything the view shows, in a form ready for a JSON dump.
    pub fn report(&self) -> ViewReport<'_, 'a> {
        ViewReport {
            industry: self.industry.as_deref(),
            summary: &self.summary,
            histogram: LogHistogram::build(self.companies.iter().map(|c| c.cap())),
            timeline: ListingTimeline::build(self.companies.iter().copied()),
            states: StateBreakdown::build(&self.companies),
            tiles: self
                .treemap
                .tiles
                .iter()
                .map(|t| TileReport {
                    ticker: t.company.id(),
                    rect: t.rect,
                    value: t.value,
                    color: t.color,
                })
                .collect(),
        }
    }
}

/// One tile as dumped to JSON; the color is written as `#rrggbb`.
#[derive(Debug, Serialize)]
pub struct TileReport<'v> {
    pub ticker: &'v str,
    #[serde(flatten)]
    pub rect: Rect,
    pub value: f64,
    pub color: AppColor,
}

#[derive(Debug, Serialize)]
pub struct ViewReport<'v, 'a> {
    pub industry: Option<&'v str>,
    pub summary: &'v CompanySummary<'a>,
    pub histogram: Option<LogHistogram>,
    pub timeline: Option<ListingTimeline>,
    pub states: StateBreakdown,
    pub tiles: Vec<TileReport<'v>>,
}

/// Two selections side by side.
#[derive(Debug)]
pub struct Comparison<'a> {
    pub a: IndustryView<'a>,
    pub b: IndustryView<'a>,
    pub metrics: Vec<MetricRow>,
}

impl<'a> Comparison<'a> {
    pub fn report(&self) -> ComparisonReport<'_, 'a> {
        ComparisonReport {
            a: self.a.report(),
            b: self.b.report(),
            metrics: &self.metrics,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ComparisonReport<'v, 'a> {
    pub a: ViewReport<'v, 'a>,
    pub b: ViewReport<'v, 'a>,
    pub metrics: &'v [MetricRow],
}

/// Layouts keyed by a hash of their inputs. Owned by the caller; nothing is cached globally.
#[derive(Debug, Default)]
pub struct TreemapCache {
    entries: HashMap<u64, Arc<Vec<PlacedRect<usize>>>>,
    capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

impl TreemapCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Content hash of a layout request. Values hash by bit pattern.
    pub fn key(ids: &[&str], values: &[f64], bounds: Rect) -> u64 {
        let mut hasher = DefaultHasher::new();
        ids.hash(&mut hasher);
        for v in values {
            v.to_bits().hash(&mut hasher);
        }
        for v in [bounds.x, bounds.y, bounds.w, bounds.h] {
            v.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }

    pub fn get_or_compute(
        &mut self,
        key: u64,
        compute: impl FnOnce() -> Vec<PlacedRect<usize>>,
    ) -> Arc<Vec<PlacedRect<usize>>> {
        if let Some(rects) = self.entries.get(&key) {
            self.hits += 1;
            return Arc::clone(rects);
        }
        self.misses += 1;
        if self.capacity > 0 && self.entries.len() >= self.capacity {
            tracing::debug!("Treemap cache full ({} entries), clearing", self.entries.len());
            self.entries.clear();
        }
        let rects = Arc::new(compute());
        self.entries.insert(key, Arc::clone(&rects));
        rects
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read-only dashboard over one indexed snapshot.
pub struct Dashboard<'a> {
    pub index: EntityIndex<'a>,
    pub treemap: TreemapConfig,
    pub colors: ColorSettings,
}

impl<'a> Dashboard<'a> {
    pub fn new(companies: &'a [Company]) -> Self {
        Self {
            index: EntityIndex::build(companies),
            treemap: TreemapConfig::default(),
            colors: ColorSettings::default(),
        }
    }

    /// Build the view for `industry` (or everything) in a `width` x `height` viewport.
    pub fn view(&self, industry: Option<&str>, width: f64, height: f64) -> IndustryView<'a> {
        self.view_with(industry, width, height, None)
    }

    /// Same as [`Dashboard::view`], reusing layouts from `cache` when the inputs match.
    pub fn view_cached(
        &self,
        industry: Option<&str>,
        width: f64,
        height: f64,
        cache: &mut TreemapCache,
    ) -> IndustryView<'a> {
        self.view_with(industry, width, height, Some(cache))
    }

    fn view_with(
        &self,
        industry: Option<&str>,
        width: f64,
        height: f64,
        cache: Option<&mut TreemapCache>,
    ) -> IndustryView<'a> {
        let companies = self.index.companies_in(industry);
        let summary = summarize_companies(&companies, self.index.total_market_cap);
        let ranked = rank(&companies, Company::cap);
        let treemap = self.build_treemap(&ranked, width, height, cache);

        tracing::debug!(
            "View {:?}: {} companies, {} tiles, HHI {:.0}",
            industry.unwrap_or("(all)"),
            companies.len(),
            treemap.tiles.len(),
            summary.caps.hhi
        );

        IndustryView {
            industry: industry.map(str::to_string),
            companies,
            summary,
            ranked,
            treemap,
        }
    }

    fn build_treemap(
        &self,
        ranked: &RankedList<'a, Company>,
        width: f64,
        height: f64,
        cache: Option<&mut TreemapCache>,
    ) -> Treemap<'a> {
        let bounds = self.treemap.content_bounds(width, height);
        let positive: Vec<&'a Company> = ranked
            .iter()
            .filter(|r| r.value > 0.0 && r.value.is_finite())
            .map(|r| r.entity)
            .collect();
        if positive.is_empty() || bounds.is_empty() {
            return Treemap {
                bounds,
                ..Default::default()
            };
        }

        let items: Vec<LayoutItem<usize>> = positive
            .iter()
            .enumerate()
            .map(|(i, c)| LayoutItem {
                value: c.cap(),
                item: i,
            })
            .collect();

        let placed = match cache {
            Some(cache) => {
                let ids: Vec<&str> = positive.iter().map(|c| c.id()).collect();
                let values: Vec<f64> = items.iter().map(|i| i.value).collect();
                let key = TreemapCache::key(&ids, &values, bounds);
                cache.get_or_compute(key, || squarify(&items, bounds))
            }
            None => Arc::new(squarify(&items, bounds)),
        };

        if self.treemap.validate {
            let report = check_tiling(&placed, bounds);
            if report.is_exact(1e-6) {
                tracing::debug!("Treemap tiling ok: {:?}", report);
            } else {
                tracing::warn!("Treemap tiling drifted: {:?}", report);
            }
        }

        // Ranked order puts the largest first.
        let max = positive[0].cap();
        let mut tiles = Vec::with_capacity(placed.len());
        let mut by_ticker = HashMap::with_capacity(placed.len());
        for p in placed.iter() {
            let company = positive[p.item];
            by_ticker.insert(company.ticker.clone(), tiles.len());
            tiles.push(Tile {
                rect: p.rect,
                value: p.value,
                company,
                color: treemap_color(p.value, max, company.exchange(), &self.colors),
                label: self.treemap.label_level(&p.rect),
            });
        }

        Treemap {
            bounds,
            tiles,
            by_ticker,
        }
    }

    /// Two industries side by side. The halves are independent, so they are built in parallel.
    pub fn compare(&self, a: &str, b: &str, width: f64, height: f64) -> Comparison<'a> {
        let (a, b) = rayon::join(
            || self.view(Some(a), width, height),
            || self.view(Some(b), width, height),
        );
        let metrics = compare_summaries(&a.summary, &b.summary);
        Comparison { a, b, metrics }
    }

    /// Summary of every industry in catalogue order, computed in parallel per group.
    pub fn industry_summaries(&self) -> Vec<(Industry, CompanySummary<'a>)> {
        let total = self.index.total_market_cap;
        self.index
            .industries()
            .into_par_iter()
            .map(|industry| {
                let companies = self.index.companies_in(Some(&industry.description));
                let summary = summarize_companies(&companies, total);
                (industry, summary)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_companies;

    fn sample() -> Vec<Company> {
        parse_companies(include_str!("../data/sample-companies.json")).unwrap()
    }

    #[test]
    fn all_view_tiles_positive_caps_only() {
        let companies = sample();
        let dash = Dashboard::new(&companies);
        let view = dash.view(None, 800.0, 400.0);

        assert_eq!(view.summary.caps.count, companies.len());
        let positive = companies.iter().filter(|c| c.cap() > 0.0).count();
        assert_eq!(view.treemap.tiles.len(), positive);
        assert!(view.treemap.tile("SPAC").is_none());

        let area: f64 = view.treemap.tiles.iter().map(|t| t.rect.area()).sum();
        assert!((area - 796.0 * 396.0).abs() < 1e-6 * 796.0 * 396.0);

        assert_eq!(view.ranked.entries[0].entity.id(), "MSFT");
        assert_eq!(view.treemap.tiles[0].company.id(), "MSFT");
        assert!((view.summary.caps.share_of_total_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn industry_view_shares_global_total() {
        let companies = sample();
        let dash = Dashboard::new(&companies);
        let view = dash.view(Some("NATIONAL COMMERCIAL BANKS"), 300.0, 200.0);
        assert_eq!(view.companies.len(), 3);
        let expected = 1_060_000_000_000.0 / dash.index.total_market_cap * 100.0;
        assert!((view.summary.caps.share_of_total_pct - expected).abs() < 1e-9);
        let jpm = view.treemap.tile("JPM").unwrap();
        assert!(view.treemap.hit(jpm.rect.x + 1.0, jpm.rect.y + 1.0).is_some());
    }

    #[test]
    fn unknown_industry_and_tiny_viewport_are_empty() {
        let companies = sample();
        let dash = Dashboard::new(&companies);
        let view = dash.view(Some("NOT AN INDUSTRY"), 300.0, 200.0);
        assert_eq!(view.summary.caps.count, 0);
        assert!(view.treemap.tiles.is_empty());
        let view = dash.view(None, 4.0, 4.0);
        assert!(view.treemap.tiles.is_empty());
    }

    #[test]
    fn compare_builds_both_sides() {
        let companies = sample();
        let dash = Dashboard::new(&companies);
        let cmp = dash.compare("ELECTRONIC COMPUTERS", "PETROLEUM REFINING", 400.0, 300.0);
        assert_eq!(cmp.a.treemap.tiles.len(), 3);
        assert_eq!(cmp.b.treemap.tiles.len(), 2);
        let companies_row = &cmp.metrics[0];
        assert_eq!((companies_row.a, companies_row.b), (3.0, 2.0));
    }

    #[test]
    fn report_dumps_summary_and_tiles() {
        let companies = sample();
        let dash = Dashboard::new(&companies);
        let view = dash.view(Some("NATIONAL COMMERCIAL BANKS"), 300.0, 200.0);
        let json = serde_json::to_value(view.report()).unwrap();

        assert_eq!(json["industry"], "NATIONAL COMMERCIAL BANKS");
        assert_eq!(json["summary"]["count"], 3);
        assert_eq!(json["summary"]["sum"], 1_060_000_000_000.0);
        assert!(json["summary"].get("largest").is_none());
        assert_eq!(json["tiles"].as_array().unwrap().len(), 3);
        assert_eq!(json["tiles"][0]["ticker"], "JPM");
        assert!(json["tiles"][0]["color"].as_str().unwrap().starts_with('#'));
        assert!(json["tiles"][0]["w"].as_f64().unwrap() > 0.0);
        assert!(json["states"]["states"].is_array());
        assert!(json["histogram"]["buckets"].is_array());
    }

    #[test]
    fn comparison_report_carries_metrics() {
        let companies = sample();
        let dash = Dashboard::new(&companies);
        let cmp = dash.compare("ELECTRONIC COMPUTERS", "PETROLEUM REFINING", 400.0, 300.0);
        let json = serde_json::to_value(cmp.report()).unwrap();
        assert_eq!(json["metrics"][0]["label"], "Companies");
        assert_eq!(json["metrics"][0]["a"], 3.0);
        assert_eq!(json["a"]["industry"], "ELECTRONIC COMPUTERS");
        assert_eq!(json["b"]["tiles"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn parallel_summaries_match_catalogue() {
        let companies = sample();
        let dash = Dashboard::new(&companies);
        let all = dash.industry_summaries();
        assert_eq!(all.len(), dash.index.industries().len());
        let total: usize = all.iter().map(|(_, s)| s.caps.count).sum();
        assert_eq!(total, companies.len());
        for (industry, summary) in &all {
            assert_eq!(industry.count, summary.caps.count);
        }
    }

    #[test]
    fn cache_reuses_identical_layouts() {
        let companies = sample();
        let dash = Dashboard::new(&companies);
        let mut cache = TreemapCache::new(8);
        let first = dash.view_cached(None, 640.0, 480.0, &mut cache);
        let second = dash.view_cached(None, 640.0, 480.0, &mut cache);
        assert_eq!((cache.hits, cache.misses), (1, 1));
        assert_eq!(first.treemap.tiles.len(), second.treemap.tiles.len());
        for (a, b) in first.treemap.tiles.iter().zip(&second.treemap.tiles) {
            assert_eq!(a.rect, b.rect);
        }
        dash.view_cached(None, 641.0, 480.0, &mut cache);
        assert_eq!(cache.misses, 2);
        assert_eq!(cache.len(), 2);
    }
}
