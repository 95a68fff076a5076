/// Standard Industrial Classification divisions, keyed by the two-digit prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Division {
    Agriculture,
    Mining,
    Construction,
    Manufacturing,
    TransportationUtilities,
    WholesaleTrade,
    RetailTrade,
    FinanceInsurance,
    Services,
    PublicAdministration,
    Other,
}

impl Division {
    /// Classify a SIC code such as "3571". Unparseable or unassigned prefixes are `Other`.
    pub fn from_sic(code: Option<&str>) -> Self {
        let Some(code) = code else {
            return Division::Other;
        };
        let prefix: String = code.chars().take(2).collect();
        match prefix.parse::<u32>() {
            Ok(1..=9) => Division::Agriculture,
            Ok(10..=14) => Division::Mining,
            Ok(15..=17) => Division::Construction,
            Ok(20..=39) => Division::Manufacturing,
            Ok(40..=49) => Division::TransportationUtilities,
            Ok(50..=51) => Division::WholesaleTrade,
            Ok(52..=59) => Division::RetailTrade,
            Ok(60..=67) => Division::FinanceInsurance,
            Ok(70..=89) => Division::Services,
            Ok(91..=99) => Division::PublicAdministration,
            _ => Division::Other,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Division::Agriculture => "Agriculture",
            Division::Mining => "Mining",
            Division::Construction => "Construction",
            Division::Manufacturing => "Manufacturing",
            Division::TransportationUtilities => "Transportation & Utilities",
            Division::WholesaleTrade => "Wholesale Trade",
            Division::RetailTrade => "Retail Trade",
            Division::FinanceInsurance => "Finance & Insurance",
            Division::Services => "Services",
            Division::PublicAdministration => "Public Administration",
            Division::Other => "Other",
        }
    }
}
