use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::model::Company;

/// Parse a JSON array of company records.
pub fn parse_companies(json: &str) -> Result<Vec<Company>> {
    let companies: Vec<Company> =
        serde_json::from_str(json).context("Invalid JSON in data file")?;
    if companies.is_empty() {
        bail!("No companies found in the data file.");
    }
    Ok(companies)
}

/// Load companies from a JSON file.
pub fn load_companies(path: &Path) -> Result<Vec<Company>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let companies = parse_companies(&json).with_context(|| format!("Failed to load {}", path.display()))?;
    tracing::info!("Loaded {} companies from {}", companies.len(), path.display());
    Ok(companies)
}

/// Load from the first candidate path that exists, e.g. the full data set then the sample.
pub fn load_first_available(candidates: &[PathBuf]) -> Result<Vec<Company>> {
    for path in candidates {
        if path.is_file() {
            return load_companies(path);
        }
        tracing::debug!("Data file {} not found, trying next", path.display());
    }
    bail!(
        "No data file found (tried: {})",
        candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sample_data() {
        let companies = parse_companies(include_str!("../data/sample-companies.json")).unwrap();
        assert!(companies.len() >= 10);
        assert!(companies.iter().all(|c| !c.ticker.is_empty()));
    }

    #[test]
    fn rejects_empty_and_malformed() {
        let err = parse_companies("[]").unwrap_err();
        assert!(err.to_string().contains("No companies"));
        let err = parse_companies("{\"ticker\": 1").unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
        assert!(parse_companies("{}").is_err());
    }

    #[test]
    fn missing_files_are_reported() {
        let err = load_first_available(&[PathBuf::from("/nonexistent/companies.json")]).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/companies.json"));
    }
}
