//! Volcano reference records from the eruption-history catalog

use crate::models::sample::EruptionDate;
use crate::{Error, GeoPoint, Result};
use serde::{Deserialize, Serialize};

/// Recorded eruption of a volcano
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EruptionRecord {
    pub start: EruptionDate,
    /// End of the eruptive episode, when the catalog records one
    #[serde(default)]
    pub end: Option<EruptionDate>,
    /// Volcanic Explosivity Index (0-8)
    #[serde(default)]
    pub vei: Option<u8>,
}

impl EruptionRecord {
    pub fn starting(start: EruptionDate) -> Self {
        Self {
            start,
            end: None,
            vei: None,
        }
    }
}

/// Volcano candidate (read-only reference data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolcanoCandidate {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    #[serde(default)]
    pub tectonic_setting: Option<String>,
    /// Major rock types, most abundant first (1-3 entries)
    #[serde(default)]
    pub major_rock_types: Vec<String>,
    #[serde(default)]
    pub eruptions: Vec<EruptionRecord>,
    /// Alternative names used in the literature
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl VolcanoCandidate {
    /// Minimal candidate with only the mandatory fields
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            tectonic_setting: None,
            major_rock_types: Vec::new(),
            eruptions: Vec::new(),
            aliases: Vec::new(),
            region: None,
            country: None,
        }
    }

    /// Reject malformed catalog entries
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidInput("Volcano id is empty".to_string()));
        }
        self.location
            .validate()
            .map_err(|e| Error::InvalidInput(format!("Volcano {}: {}", self.id, e)))?;
        if self.major_rock_types.len() > 3 {
            return Err(Error::InvalidInput(format!(
                "Volcano {}: at most 3 major rock types, got {}",
                self.id,
                self.major_rock_types.len()
            )));
        }
        for eruption in &self.eruptions {
            eruption.start.validate()?;
            if let Some(end) = &eruption.end {
                end.validate()?;
            }
            if let Some(vei) = eruption.vei {
                if vei > 8 {
                    return Err(Error::InvalidInput(format!(
                        "Volcano {}: VEI out of range: {}",
                        self.id, vei
                    )));
                }
            }
        }
        Ok(())
    }
}
