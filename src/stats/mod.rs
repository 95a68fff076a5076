//! Aggregate statistics over a selection of entities.
//!
//! Everything here is a pure function of its inputs. Group totals that need a
//! global denominator take it as an argument so it is computed once upstream.

pub mod company;
pub mod compare;
pub mod geo;
pub mod histogram;
pub mod summary;
pub mod timeline;

pub use company::{summarize_companies, CompanySummary};
pub use compare::{compare_summaries, MetricRow};
pub use geo::{MapMode, StateBreakdown, StateTotal};
pub use histogram::LogHistogram;
pub use summary::{
    herfindahl, lower_middle_median, summarize, summarize_by, Concentration, Summary,
    HHI_HIGH_THRESHOLD, HHI_MAX, HHI_MODERATE_THRESHOLD,
};
pub use timeline::ListingTimeline;
