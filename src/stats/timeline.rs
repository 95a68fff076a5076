use serde::Serialize;

use crate::model::Company;

/// Years at or before this are treated as placeholder dates.
const EARLIEST_YEAR: i32 = 1900;

/// Companies listed per calendar year, gap years included with a zero count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingTimeline {
    pub first_year: i32,
    pub last_year: i32,
    pub counts: Vec<(i32, usize)>,
}

impl ListingTimeline {
    pub fn build<'a>(companies: impl IntoIterator<Item = &'a Company>) -> Option<Self> {
        let years: Vec<i32> = companies
            .into_iter()
            .filter_map(Company::list_year)
            .filter(|&y| y > EARLIEST_YEAR)
            .collect();
        if years.len() < 2 {
            return None;
        }
        let first_year = *years.iter().min()?;
        let last_year = *years.iter().max()?;
        let mut counts: Vec<(i32, usize)> = (first_year..=last_year).map(|y| (y, 0)).collect();
        for y in years {
            counts[(y - first_year) as usize].1 += 1;
        }
        Some(Self {
            first_year,
            last_year,
            counts,
        })
    }

    pub fn busiest(&self) -> usize {
        self.counts.iter().map(|&(_, n)| n).max().unwrap_or(0)
    }
}
