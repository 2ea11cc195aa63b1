//! Geochemical rock sample records
//!
//! Samples arrive from two external geochemistry repositories. Every field
//! except the identifier, source tag and location may be absent; absence is
//! a modeled outcome, never an error.

use crate::{Error, GeoPoint, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Repository a sample was ingested from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceDatabase {
    Georoc,
    Petdb,
}

impl SourceDatabase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceDatabase::Georoc => "GEOROC",
            SourceDatabase::Petdb => "PETDB",
        }
    }
}

/// Granularity of a recorded date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DatePrecision {
    Year,
    Month,
    Day,
}

/// Possibly partial calendar date
///
/// Negative years are BCE (astronomical numbering is not applied; the
/// catalogs record "-9700" for 9700 BCE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EruptionDate {
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
}

impl EruptionDate {
    /// Year-only date
    pub fn year(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
        }
    }

    /// Fully specified date
    pub fn ymd(year: i32, month: u8, day: u8) -> Self {
        Self {
            year,
            month: Some(month),
            day: Some(day),
        }
    }

    /// A day without a month carries no usable day information
    pub fn precision(&self) -> DatePrecision {
        match (self.month, self.day) {
            (Some(_), Some(_)) => DatePrecision::Day,
            (Some(_), None) => DatePrecision::Month,
            _ => DatePrecision::Year,
        }
    }

    /// Date expressed as a decimal year
    pub fn fractional_year(&self) -> f64 {
        let month_offset = self.month.map(|m| (m.saturating_sub(1)) as f64 / 12.0).unwrap_or(0.0);
        let day_offset = match (self.month, self.day) {
            (Some(_), Some(d)) => (d.saturating_sub(1)) as f64 / 365.25,
            _ => 0.0,
        };
        self.year as f64 + month_offset + day_offset
    }

    /// Reject out-of-range month/day values
    pub fn validate(&self) -> Result<()> {
        if let Some(m) = self.month {
            if !(1..=12).contains(&m) {
                return Err(Error::InvalidInput(format!("Month out of range: {}", m)));
            }
        }
        if let Some(d) = self.day {
            if !(1..=31).contains(&d) {
                return Err(Error::InvalidInput(format!("Day out of range: {}", d)));
            }
        }
        Ok(())
    }
}

/// Major-element oxides reported by the geochemistry repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Oxide {
    #[serde(rename = "SiO2")]
    SiO2,
    #[serde(rename = "TiO2")]
    TiO2,
    #[serde(rename = "Al2O3")]
    Al2O3,
    #[serde(rename = "Fe2O3")]
    Fe2O3,
    #[serde(rename = "FeO")]
    FeO,
    #[serde(rename = "FeOT")]
    FeOT,
    #[serde(rename = "MnO")]
    MnO,
    #[serde(rename = "MgO")]
    MgO,
    #[serde(rename = "CaO")]
    CaO,
    #[serde(rename = "Na2O")]
    Na2O,
    #[serde(rename = "K2O")]
    K2O,
    #[serde(rename = "P2O5")]
    P2O5,
    #[serde(rename = "H2O")]
    H2O,
}

impl Oxide {
    /// All known oxides in reporting order
    pub const ALL: [Oxide; 13] = [
        Oxide::SiO2,
        Oxide::TiO2,
        Oxide::Al2O3,
        Oxide::Fe2O3,
        Oxide::FeO,
        Oxide::FeOT,
        Oxide::MnO,
        Oxide::MgO,
        Oxide::CaO,
        Oxide::Na2O,
        Oxide::K2O,
        Oxide::P2O5,
        Oxide::H2O,
    ];
}

/// Oxide weight-percent measurements (any subset of [`Oxide::ALL`])
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OxideComposition(BTreeMap<Oxide, f64>);

impl OxideComposition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used by tests and fixtures
    pub fn with(mut self, oxide: Oxide, wt_percent: f64) -> Self {
        self.0.insert(oxide, wt_percent);
        self
    }

    pub fn get(&self, oxide: Oxide) -> Option<f64> {
        self.0.get(&oxide).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Na2O + K2O, if both were measured
    pub fn total_alkali(&self) -> Option<f64> {
        Some(self.get(Oxide::Na2O)? + self.get(Oxide::K2O)?)
    }

    /// Volatile-free total
    ///
    /// Iron is counted once: FeOT when reported, otherwise FeO + Fe2O3.
    pub fn anhydrous_total(&self) -> f64 {
        self.0
            .iter()
            .filter(|(oxide, _)| match oxide {
                Oxide::H2O => false,
                Oxide::FeO | Oxide::Fe2O3 => self.get(Oxide::FeOT).is_none(),
                _ => true,
            })
            .map(|(_, v)| *v)
            .sum()
    }

    fn validate(&self) -> Result<()> {
        for (oxide, value) in &self.0 {
            if !value.is_finite() || *value < 0.0 || *value > 100.0 {
                return Err(Error::InvalidInput(format!(
                    "Oxide {:?} out of range: {}",
                    oxide, value
                )));
            }
        }
        Ok(())
    }
}

/// Geochemical rock sample (input, immutable for the engine)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    pub id: String,
    pub source: SourceDatabase,
    pub location: GeoPoint,
    /// Rock classification as reported (e.g. "BASALTIC ANDESITE")
    #[serde(default)]
    pub rock_type: Option<String>,
    #[serde(default)]
    pub tectonic_setting: Option<String>,
    #[serde(default)]
    pub eruption_date: Option<EruptionDate>,
    /// Free-text citation of the publication the analysis came from
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub oxides: OxideComposition,
}

impl Sample {
    /// Minimal sample with only the mandatory fields
    pub fn new(id: impl Into<String>, source: SourceDatabase, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            source,
            location,
            rock_type: None,
            tectonic_setting: None,
            eruption_date: None,
            reference: None,
            oxides: OxideComposition::default(),
        }
    }

    /// Reject malformed records before they enter the pipeline
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` for an empty id, out-of-range
    /// coordinates, impossible dates or oxide values.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidInput("Sample id is empty".to_string()));
        }
        self.location
            .validate()
            .map_err(|e| Error::InvalidInput(format!("Sample {}: {}", self.id, e)))?;
        if let Some(date) = &self.eruption_date {
            date.validate()
                .map_err(|e| Error::InvalidInput(format!("Sample {}: {}", self.id, e)))?;
        }
        self.oxides
            .validate()
            .map_err(|e| Error::InvalidInput(format!("Sample {}: {}", self.id, e)))
    }
}
