pub mod groups;
pub mod sic;

pub use groups::{group_by, group_by_or, Group, Groups};
pub use sic::Division;

use crate::model::Company;

/// Bucket for entities whose grouping key is missing or empty.
pub const UNKNOWN_KEY: &str = "Unknown";
/// Bucket for companies without a primary exchange.
pub const OTHER_EXCHANGE: &str = "Other";

/// One selectable industry in the catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Industry {
    pub description: String,
    pub sic_code: String,
    pub count: usize,
    pub division: Division,
}

/// All grouping maps over one company snapshot, plus the global market-cap total.
///
/// Rebuilt from scratch whenever the snapshot changes; nothing here is updated in place.
#[derive(Debug)]
pub struct EntityIndex<'a> {
    pub companies: &'a [Company],
    pub by_sic_code: Groups<'a, Company>,
    pub by_industry: Groups<'a, Company>,
    pub by_state: Groups<'a, Company>,
    pub by_exchange: Groups<'a, Company>,
    /// Sum of every company's market cap; the denominator for group share.
    pub total_market_cap: f64,
}

impl<'a> EntityIndex<'a> {
    /// Build every map in a single pass over `companies`.
    pub fn build(companies: &'a [Company]) -> Self {
        let mut by_sic_code = Groups::new();
        let mut by_industry = Groups::new();
        let mut by_state = Groups::new();
        let mut by_exchange = Groups::new();
        let mut total_market_cap = 0.0;

        for company in companies {
            by_sic_code.push(company.sic_code().unwrap_or(UNKNOWN_KEY), company);
            by_industry.push(&company.industry(), company);
            by_state.push(company.state().unwrap_or(UNKNOWN_KEY), company);
            by_exchange.push(company.exchange().unwrap_or(OTHER_EXCHANGE), company);
            let cap = company.cap();
            if cap.is_finite() && cap > 0.0 {
                total_market_cap += cap;
            }
        }

        tracing::info!(
            "Indexed {} companies: {} industries, {} states, {} exchanges, total cap {:.3e}",
            companies.len(),
            by_industry.len(),
            by_state.len(),
            by_exchange.len(),
            total_market_cap
        );

        Self {
            companies,
            by_sic_code,
            by_industry,
            by_state,
            by_exchange,
            total_market_cap,
        }
    }

    /// Companies in one industry, or every company when `industry` is `None`.
    /// An unknown industry yields an empty list.
    pub fn companies_in(&self, industry: Option<&str>) -> Vec<&'a Company> {
        match industry {
            None => self.companies.iter().collect(),
            Some(desc) => self
                .by_industry
                .get(desc)
                .map(|list| list.to_vec())
                .unwrap_or_default(),
        }
    }

    /// Industry catalogue, most populous first. Ties keep first-seen order.
    pub fn industries(&self) -> Vec<Industry> {
        let mut list: Vec<Industry> = self
            .by_industry
            .iter()
            .map(|group| {
                let code = group
                    .entities
                    .first()
                    .and_then(|c| c.sic_code())
                    .unwrap_or("0000");
                Industry {
                    description: group.key.to_string(),
                    sic_code: code.to_string(),
                    count: group.entities.len(),
                    division: Division::from_sic(Some(code)),
                }
            })
            .collect();
        list.sort_by(|a, b| b.count.cmp(&a.count));
        list
    }

    /// Other companies sharing `company`'s SIC code, in input order.
    pub fn similar(&self, company: &Company, limit: usize) -> Vec<&'a Company> {
        let code = company.sic_code().unwrap_or(UNKNOWN_KEY);
        self.by_sic_code
            .get(code)
            .unwrap_or(&[])
            .iter()
            .copied()
            .filter(|c| c.ticker != company.ticker)
            .take(limit)
            .collect()
    }
}

/// Case-insensitive catalogue search on description or code, bucketed by division.
/// Divisions appear in the order their first matching industry does.
pub fn filter_industries<'i>(
    industries: &'i [Industry],
    query: &str,
) -> Vec<(Division, Vec<&'i Industry>)> {
    let needle = query.to_lowercase();
    let mut out: Vec<(Division, Vec<&Industry>)> = Vec::new();
    for industry in industries {
        if !needle.is_empty()
            && !industry.description.to_lowercase().contains(&needle)
            && !industry.sic_code.contains(&needle)
        {
            continue;
        }
        match out.iter_mut().find(|(d, _)| *d == industry.division) {
            Some((_, bucket)) => bucket.push(industry),
            None => out.push((industry.division, vec![industry])),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Company> {
        vec![
            Company::new("AAPL", 3000.0)
                .with_sic("3571", "ELECTRONIC COMPUTERS")
                .with_exchange("XNAS")
                .with_state("CA"),
            Company::new("JPM", 500.0)
                .with_sic("6021", "NATIONAL COMMERCIAL BANKS")
                .with_exchange("XNYS")
                .with_state("NY"),
            Company::new("DELL", 80.0)
                .with_sic("3571", "ELECTRONIC COMPUTERS")
                .with_exchange("XNYS")
                .with_state("TX"),
            Company::new("ZZZ", 0.0),
        ]
    }

    #[test]
    fn builds_all_maps_and_total() {
        let companies = sample();
        let index = EntityIndex::build(&companies);
        assert_eq!(index.total_market_cap, 3580.0);
        assert_eq!(index.by_industry.get("ELECTRONIC COMPUTERS").unwrap().len(), 2);
        assert_eq!(index.by_state.get("Unknown").unwrap().len(), 1);
        assert_eq!(index.by_exchange.get("Other").unwrap()[0].ticker, "ZZZ");
        assert_eq!(index.by_sic_code.get("Unknown").unwrap().len(), 1);
        assert!(index.by_industry.get("SIC Unkxx").is_some());
    }

    #[test]
    fn catalogue_sorted_by_count_then_first_seen() {
        let companies = sample();
        let index = EntityIndex::build(&companies);
        let industries = index.industries();
        assert_eq!(industries[0].description, "ELECTRONIC COMPUTERS");
        assert_eq!(industries[0].count, 2);
        assert_eq!(industries[0].division, Division::Manufacturing);
        assert_eq!(industries[1].description, "NATIONAL COMMERCIAL BANKS");
        assert_eq!(industries[2].sic_code, "0000");
        assert_eq!(industries[2].division, Division::Other);
    }

    #[test]
    fn selection_and_similar() {
        let companies = sample();
        let index = EntityIndex::build(&companies);
        assert_eq!(index.companies_in(None).len(), 4);
        assert!(index.companies_in(Some("NOPE")).is_empty());
        let similar = index.similar(&companies[0], 8);
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].ticker, "DELL");
    }

    #[test]
    fn filter_matches_description_or_code() {
        let companies = sample();
        let index = EntityIndex::build(&companies);
        let industries = index.industries();
        let hits = filter_industries(&industries, "bank");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, Division::FinanceInsurance);
        let hits = filter_industries(&industries, "3571");
        assert_eq!(hits[0].1[0].description, "ELECTRONIC COMPUTERS");
        assert_eq!(filter_industries(&industries, "").len(), 3);
    }
}
