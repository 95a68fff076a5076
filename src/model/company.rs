use compact_str::CompactString;
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

/// Mailing address as delivered by the data feed. Only `state` feeds the index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<CompactString>,
}

/// A listed company. Read-only to every computation in this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Ticker symbol, used as the entity id
    pub ticker: CompactString,
    #[serde(default)]
    pub name: String,
    /// Market capitalization in dollars (the magnitude)
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub sic_code: Option<CompactString>,
    #[serde(default)]
    pub sic_description: Option<String>,
    #[serde(default)]
    pub primary_exchange: Option<CompactString>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_employees: Option<u64>,
    /// Missing means active; only an explicit `false` marks a delisting.
    #[serde(default)]
    pub active: Option<bool>,
    /// ISO date string, e.g. "1980-12-12"
    #[serde(default)]
    pub list_date: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage_url: Option<String>,
}

/// Headcount from the feed: whole numbers as-is, non-negative floats truncated, anything else `None`.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Whole(u64),
        Float(f64),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Whole(n)) => Some(n),
        Some(Raw::Float(f)) if f.is_finite() && f >= 0.0 => Some(f as u64),
        Some(Raw::Float(_)) | Some(Raw::Other(_)) | None => None,
    })
}

impl Company {
    /// Convenience constructor used by tests and the demo data.
    pub fn new(ticker: &str, market_cap: f64) -> Self {
        Self {
            ticker: CompactString::new(ticker),
            name: ticker.to_string(),
            market_cap: Some(market_cap),
            ..Default::default()
        }
    }

    pub fn id(&self) -> &str {
        self.ticker.as_str()
    }

    /// Magnitude accessor: missing caps read as zero.
    pub fn cap(&self) -> f64 {
        self.market_cap.unwrap_or(0.0)
    }

    pub fn state(&self) -> Option<&str> {
        self.address
            .as_ref()
            .and_then(|a| a.state.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn exchange(&self) -> Option<&str> {
        self.primary_exchange.as_deref().filter(|s| !s.is_empty())
    }

    pub fn sic_code(&self) -> Option<&str> {
        self.sic_code.as_deref().filter(|s| !s.is_empty())
    }

    pub fn is_active(&self) -> bool {
        self.active != Some(false)
    }

    /// Industry label; companies without one get a synthetic "SIC 123xx" label.
    pub fn industry(&self) -> String {
        match self.sic_description.as_deref().filter(|s| !s.is_empty()) {
            Some(desc) => desc.to_string(),
            None => {
                let code = self.sic_code().unwrap_or(crate::index::UNKNOWN_KEY);
                let prefix: String = code.chars().take(3).collect();
                format!("SIC {}xx", prefix)
            }
        }
    }

    /// Year parsed from the leading `YYYY` of `list_date`.
    pub fn list_year(&self) -> Option<i32> {
        let date = self.list_date.as_deref()?;
        date.get(0..4)?.parse().ok()
    }

    pub fn with_sic(mut self, code: &str, description: &str) -> Self {
        self.sic_code = Some(CompactString::new(code));
        self.sic_description = Some(description.to_string());
        self
    }

    pub fn with_exchange(mut self, exchange: &str) -> Self {
        self.primary_exchange = Some(CompactString::new(exchange));
        self
    }

    pub fn with_state(mut self, state: &str) -> Self {
        let address = self.address.get_or_insert_with(Address::default);
        address.state = Some(CompactString::new(state));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_feed_record() {
        let json = r#"{
            "ticker": "AAPL",
            "name": "Apple Inc.",
            "marketCap": 3.0e12,
            "sicCode": "3571",
            "sicDescription": "ELECTRONIC COMPUTERS",
            "primaryExchange": "XNAS",
            "totalEmployees": 161000,
            "listDate": "1980-12-12",
            "address": { "city": "CUPERTINO", "state": "CA" }
        }"#;
        let c: Company = serde_json::from_str(json).unwrap();
        assert_eq!(c.id(), "AAPL");
        assert_eq!(c.cap(), 3.0e12);
        assert_eq!(c.state(), Some("CA"));
        assert_eq!(c.exchange(), Some("XNAS"));
        assert_eq!(c.list_year(), Some(1980));
        assert!(c.is_active());
    }

    #[test]
    fn missing_fields_fall_back() {
        let c: Company = serde_json::from_str(r#"{"ticker":"X","active":false}"#).unwrap();
        assert_eq!(c.cap(), 0.0);
        assert_eq!(c.state(), None);
        assert!(!c.is_active());
        assert_eq!(c.industry(), "SIC Unkxx");
    }

    #[test]
    fn odd_employee_counts_do_not_reject_the_record() {
        let parse = |raw: &str| {
            let json = format!(r#"{{"ticker":"X","totalEmployees":{raw}}}"#);
            serde_json::from_str::<Company>(&json).unwrap().total_employees
        };
        assert_eq!(parse("1200"), Some(1200));
        assert_eq!(parse("1200.7"), Some(1200));
        assert_eq!(parse("-5"), None);
        assert_eq!(parse("\"n/a\""), None);
        assert_eq!(parse("null"), None);
    }

    #[test]
    fn synthetic_industry_uses_code_prefix() {
        let mut c = Company::new("Y", 1.0);
        c.sic_code = Some(CompactString::new("7372"));
        assert_eq!(c.industry(), "SIC 737xx");
    }
}
