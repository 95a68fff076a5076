use compact_str::CompactString;
use serde::Serialize;

use crate::index::Groups;
use crate::model::Company;

/// Which per-state figure drives the choropleth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MapMode {
    #[default]
    Count,
    MarketCap,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateTotal {
    pub state: CompactString,
    pub count: usize,
    pub market_cap: f64,
}

impl StateTotal {
    pub fn value(&self, mode: MapMode) -> f64 {
        match mode {
            MapMode::Count => self.count as f64,
            MapMode::MarketCap => self.market_cap,
        }
    }
}

/// Per-state totals for a selection. Companies without a state are left off the map.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StateBreakdown {
    pub states: Vec<StateTotal>,
}

impl StateBreakdown {
    pub fn build(companies: &[&Company]) -> Self {
        let mut groups: Groups<'_, Company> = Groups::new();
        for &company in companies {
            if let Some(state) = company.state() {
                groups.push(state, company);
            }
        }
        let states = groups
            .iter()
            .map(|g| StateTotal {
                state: g.key.clone(),
                count: g.entities.len(),
                market_cap: g
                    .entities
                    .iter()
                    .map(|c| c.cap())
                    .filter(|v| v.is_finite() && *v > 0.0)
                    .sum(),
            })
            .collect();
        Self { states }
    }

    pub fn get(&self, state: &str) -> Option<&StateTotal> {
        self.states.iter().find(|s| s.state == state)
    }

    /// Scale maximum for the legend; never below 1 so an empty map still normalizes.
    pub fn max_value(&self, mode: MapMode) -> f64 {
        self.states
            .iter()
            .map(|s| s.value(mode))
            .fold(1.0, f64::max)
    }
}
