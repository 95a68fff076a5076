use serde::Serialize;

use super::summary::lower_middle_median;

/// Upper bound on the number of decade-fraction buckets.
pub const MAX_BUCKETS: usize = 20;

/// Distribution of positive magnitudes on a log10 axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogHistogram {
    /// floor(log10(min))
    pub min_log: i32,
    /// ceil(log10(max))
    pub max_log: i32,
    /// Width of one bucket in log10 units
    pub bucket_size: f64,
    pub buckets: Vec<usize>,
    pub mean: f64,
    pub median: f64,
}

impl LogHistogram {
    /// Bucket `values` (non-positive ones ignored). Fewer than two usable values gives `None`.
    pub fn build(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut caps: Vec<f64> = values
            .into_iter()
            .filter(|v| v.is_finite() && *v > 0.0)
            .collect();
        if caps.len() < 2 {
            return None;
        }

        let logs: Vec<f64> = caps.iter().map(|v| v.log10()).collect();
        let lo = logs.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = logs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_log = lo.floor() as i32;
        let max_log = hi.ceil() as i32;
        let count = ((max_log - min_log + 1) as usize).min(MAX_BUCKETS);
        let bucket_size = (max_log - min_log) as f64 / count as f64;

        let mut buckets = vec![0usize; count];
        for l in &logs {
            let bi = if bucket_size > 0.0 {
                (((l - min_log as f64) / bucket_size).floor() as usize).min(count - 1)
            } else {
                0
            };
            buckets[bi] += 1;
        }

        let mean = caps.iter().sum::<f64>() / caps.len() as f64;
        caps.sort_by(f64::total_cmp);
        let median = lower_middle_median(&caps);

        Some(Self {
            min_log,
            max_log,
            bucket_size,
            buckets,
            mean,
            median,
        })
    }

    /// Magnitude at the left edge of bucket `i` (i == len gives the right edge).
    pub fn bucket_start(&self, i: usize) -> f64 {
        10f64.powf(self.min_log as f64 + i as f64 * self.bucket_size)
    }

    /// Position of `value` along the axis as a 0..=1 fraction.
    pub fn axis_fraction(&self, value: f64) -> f64 {
        let span = (self.max_log - self.min_log) as f64;
        if span <= 0.0 || value <= 0.0 {
            return 0.0;
        }
        (value.log10() - self.min_log as f64) / span
    }

    pub fn tallest(&self) -> usize {
        self.buckets.iter().copied().max().unwrap_or(0)
    }
}
