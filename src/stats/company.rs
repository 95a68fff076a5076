use std::collections::HashSet;

use serde::Serialize;

use super::summary::{summarize_by, Concentration, Summary};
use crate::index::OTHER_EXCHANGE;
use crate::model::Company;

/// Dashboard card figures for one selection of companies.
#[derive(Debug, Clone, Serialize)]
pub struct CompanySummary<'a> {
    #[serde(flatten)]
    pub caps: Summary<'a, Company>,
    pub active: usize,
    pub inactive: usize,
    pub total_employees: u64,
    /// Distinct states with at least one company
    pub states: usize,
}

impl<'a> CompanySummary<'a> {
    pub fn concentration(&self) -> Concentration {
        self.caps.concentration()
    }

    /// Tally of companies per primary exchange.
    pub fn exchanges(&self) -> &[(compact_str::CompactString, usize)] {
        &self.caps.categories
    }
}

/// Summarize companies by market cap, tallying primary exchanges.
pub fn summarize_companies<'a>(companies: &[&'a Company], global_total: f64) -> CompanySummary<'a> {
    let caps = summarize_by(
        companies,
        Company::cap,
        |c| Some(c.exchange().unwrap_or(OTHER_EXCHANGE)),
        global_total,
    );

    let active = companies.iter().filter(|c| c.is_active()).count();
    let total_employees = companies.iter().filter_map(|c| c.total_employees).sum();
    let states: HashSet<&str> = companies.iter().filter_map(|c| c.state()).collect();

    CompanySummary {
        caps,
        active,
        inactive: companies.len() - active,
        total_employees,
        states: states.len(),
    }
}
