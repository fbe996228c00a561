use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// How often swat.exe printed rows to output.hru.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintMode {
    Daily,
    Monthly,
    Yearly,
}

/// Run settings owned by the caller. Read-only during one file's ingestion;
/// these parameterize temporal reconstruction and column offsets.
#[derive(Debug, Clone, Deserialize)]
pub struct SwatConfig {
    pub simulation_start: NaiveDate,
    pub simulation_end: NaiveDate,
    /// NYSKIP: warm-up years the model ran but did not print.
    pub skip_years: i32,
    pub print_mode: PrintMode,
    /// ICALEN: daily rows carry month/day/year fields instead of a julian day.
    #[serde(default)]
    pub use_calendar_date_format: bool,
}

impl SwatConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path:?}"))?;
        let config: SwatConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {path:?}"))?;
        Ok(config)
    }

    /// First simulated year that actually reaches the output file.
    pub fn first_reported_year(&self) -> i32 {
        self.simulation_start.year() + self.skip_years
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parses_from_json() {
        let json = r#"{
            "simulation_start": "2000-01-01",
            "simulation_end": "2005-12-31",
            "skip_years": 1,
            "print_mode": "monthly"
        }"#;
        let config: SwatConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.print_mode, PrintMode::Monthly);
        assert!(!config.use_calendar_date_format);
        assert_eq!(config.first_reported_year(), 2001);
    }
}
