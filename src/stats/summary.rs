use compact_str::CompactString;
use serde::Serialize;

use crate::index::{Groups, UNKNOWN_KEY};

/// HHI at or above this value is moderately concentrated.
pub const HHI_MODERATE_THRESHOLD: f64 = 1500.0;
/// HHI at or above this value is highly concentrated.
pub const HHI_HIGH_THRESHOLD: f64 = 2500.0;
/// HHI of a group where one entity holds everything.
pub const HHI_MAX: f64 = 10_000.0;

/// Market concentration bands on the Herfindahl–Hirschman scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Concentration {
    Low,
    Moderate,
    High,
}

impl Concentration {
    pub fn classify(hhi: f64) -> Self {
        if hhi < HHI_MODERATE_THRESHOLD {
            Concentration::Low
        } else if hhi < HHI_HIGH_THRESHOLD {
            Concentration::Moderate
        } else {
            Concentration::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Concentration::Low => "Competitive",
            Concentration::Moderate => "Moderate",
            Concentration::High => "Highly Concentrated",
        }
    }
}

/// Descriptive and concentration statistics for one group.
///
/// Entities with a non-positive (or non-finite) magnitude count toward `count`
/// but carry zero weight everywhere else.
#[derive(Debug, Clone, Serialize)]
pub struct Summary<'a, E> {
    pub count: usize,
    /// Entities that contributed to the weighted fields
    pub weighted_count: usize,
    pub sum: f64,
    pub mean: f64,
    /// Lower-middle median of the positive magnitudes
    pub median: f64,
    /// First entity (input order) holding the largest magnitude
    #[serde(skip)]
    pub largest: Option<&'a E>,
    /// First entity (input order) holding the smallest positive magnitude
    #[serde(skip)]
    pub smallest: Option<&'a E>,
    /// Entity count per category key, in first-seen order
    pub categories: Vec<(CompactString, usize)>,
    /// Sum of squared percentage shares, 0..=10000
    pub hhi: f64,
    /// This group's sum as a percentage of the caller-supplied global total
    pub share_of_total_pct: f64,
}

impl<'a, E> Summary<'a, E> {
    pub fn concentration(&self) -> Concentration {
        Concentration::classify(self.hhi)
    }
}

/// Element at index `floor(n / 2)` of the ascending-sorted values.
/// For even `n` this is the upper of the two middle values, never their average.
pub fn lower_middle_median(sorted_ascending: &[f64]) -> f64 {
    sorted_ascending
        .get(sorted_ascending.len() / 2)
        .copied()
        .unwrap_or(0.0)
}

/// Sum of squared percentage shares over the positive values.
pub fn herfindahl(values: &[f64], sum: f64) -> f64 {
    if sum <= 0.0 {
        return 0.0;
    }
    values
        .iter()
        .map(|&v| {
            let share = v / sum * 100.0;
            share * share
        })
        .sum()
}

fn weight(v: f64) -> Option<f64> {
    (v.is_finite() && v > 0.0).then_some(v)
}

/// Summarize a group without categorical tallies.
pub fn summarize<'a, E, M>(entities: &[&'a E], magnitude: M, global_total: f64) -> Summary<'a, E>
where
    M: Fn(&E) -> f64,
{
    let mut summary = summarize_by(entities, magnitude, |_| None::<&str>, global_total);
    summary.categories.clear();
    summary
}

/// Summarize a group, tallying entities per `category` key (missing keys count as "Unknown").
///
/// `global_total` is the magnitude sum across every group and must be computed once by the caller.
pub fn summarize_by<'a, E, M, C, K>(
    entities: &[&'a E],
    magnitude: M,
    category: C,
    global_total: f64,
) -> Summary<'a, E>
where
    M: Fn(&E) -> f64,
    C: Fn(&'a E) -> Option<K>,
    K: AsRef<str>,
{
    let mut values = Vec::with_capacity(entities.len());
    let mut largest: Option<(&'a E, f64)> = None;
    let mut smallest: Option<(&'a E, f64)> = None;
    let mut tallies: Groups<'a, E> = Groups::new();

    for &entity in entities {
        match category(entity) {
            Some(key) if !key.as_ref().is_empty() => tallies.push(key.as_ref(), entity),
            _ => tallies.push(UNKNOWN_KEY, entity),
        }

        let Some(v) = weight(magnitude(entity)) else {
            continue;
        };
        values.push(v);
        if largest.map_or(true, |(_, max)| v > max) {
            largest = Some((entity, v));
        }
        if smallest.map_or(true, |(_, min)| v < min) {
            smallest = Some((entity, v));
        }
    }

    let sum: f64 = values.iter().sum();
    let mean = if values.is_empty() {
        0.0
    } else {
        sum / values.len() as f64
    };
    let hhi = herfindahl(&values, sum);
    values.sort_by(f64::total_cmp);
    let median = lower_middle_median(&values);

    let share_of_total_pct = if global_total > 0.0 {
        sum / global_total * 100.0
    } else {
        0.0
    };

    let categories = tallies
        .iter()
        .map(|g| (g.key.clone(), g.entities.len()))
        .collect();

    Summary {
        count: entities.len(),
        weighted_count: values.len(),
        sum,
        mean,
        median,
        largest: largest.map(|(e, _)| e),
        smallest: smallest.map(|(e, _)| e),
        categories,
        hhi,
        share_of_total_pct,
    }
}
