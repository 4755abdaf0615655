use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One assistive device as stored in `devices.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub programs: Vec<String>,
    #[serde(default)]
    pub funding: Funding,
    #[serde(default)]
    pub lifespan_years: Option<f64>,
    #[serde(default)]
    pub renewal_interval_years: Option<f64>,
    #[serde(default)]
    pub usage_notes: Vec<String>,
    #[serde(default)]
    pub eligibility: Vec<String>,
    #[serde(default)]
    pub city_specifics: Vec<CitySpecific>,
    #[serde(default)]
    pub documents: Vec<SourceRef>,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
}

impl Device {
    pub fn in_program(&self, program: &str) -> bool {
        self.programs.iter().any(|p| p == program)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Funding {
    #[serde(default)]
    pub amount_cap: Option<f64>,
    /// Fraction in `0..=1`
    #[serde(default)]
    pub ratio_cap: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A city's modification of the general funding and eligibility terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySpecific {
    pub city: String,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub funding: Option<Funding>,
    #[serde(default)]
    pub extra_eligibility: Vec<String>,
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// An authored `documents` or `sources` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// A resolved citation ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
    pub label: String,
    pub url: String,
    pub note: String,
}
