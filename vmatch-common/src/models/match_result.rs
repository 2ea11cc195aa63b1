//! Persisted match record
//!
//! This is the literal shape consumed by downstream read APIs. Field
//! presence is the signaling convention: a missing `scores.te` means the
//! tectonic dimension had no data, not that it scored zero. Absent fields
//! are omitted, never serialized as null.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal outcome for a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Matched,
    Rejected,
}

/// Categorical match reliability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    None,
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::None => "none",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to the matched volcano
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolcanoRef {
    pub id: String,
    pub name: String,
    pub distance_km: f64,
}

/// Dimension scores of the matched candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub te: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ti: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pe: Option<f64>,
    #[serde(rename = "final")]
    pub final_score: f64,
}

impl MatchScores {
    fn dimensions(&self) -> [Option<f64>; 4] {
        [self.sp, self.te, self.ti, self.pe]
    }
}

/// Coverage, uncertainty and confidence of the outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchQuality {
    pub coverage: f64,
    pub uncertainty: f64,
    pub confidence: ConfidenceLevel,
}

/// How specifically the reference text names the volcano
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteratureSpecificity {
    Explicit,
    Partial,
    Regional,
    None,
}

impl LiteratureSpecificity {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiteratureSpecificity::Explicit => "explicit",
            LiteratureSpecificity::Partial => "partial",
            LiteratureSpecificity::Regional => "regional",
            LiteratureSpecificity::None => "none",
        }
    }
}

/// Literature evidence block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteratureEvidence {
    pub name_in_reference: bool,
    pub specificity: LiteratureSpecificity,
    pub confidence: f64,
}

impl LiteratureEvidence {
    /// Evidence block for a sample with nothing to compare against
    pub fn absent() -> Self {
        Self {
            name_in_reference: false,
            specificity: LiteratureSpecificity::None,
            confidence: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvidence {
    pub literature: LiteratureEvidence,
}

/// Ordered reason codes plus advisory flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub reasons: Vec<String>,
    pub flags: Vec<String>,
}

/// Run metadata stamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchMeta {
    pub method: String,
    pub ts: DateTime<Utc>,
}

/// Match outcome for one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub sample_id: String,
    pub status: MatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volcano: Option<VolcanoRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<MatchScores>,
    pub quality: MatchQuality,
    pub evidence: MatchEvidence,
    pub explanation: Explanation,
    pub meta: MatchMeta,
}

impl MatchResult {
    pub fn is_matched(&self) -> bool {
        self.status == MatchStatus::Matched
    }

    /// Check the structural invariants of a match record
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` describing the first violated invariant.
    pub fn check_invariants(&self) -> Result<()> {
        let fail = |msg: &str| -> Result<()> {
            Err(Error::InvalidInput(format!("{}: {}", self.sample_id, msg)))
        };

        if self.volcano.is_some() != self.scores.is_some() {
            return fail("volcano and scores must be present together");
        }
        match self.status {
            MatchStatus::Matched => {
                if self.volcano.is_none() {
                    return fail("matched record without volcano");
                }
                if self.quality.confidence == ConfidenceLevel::None {
                    return fail("matched record with confidence none");
                }
            }
            MatchStatus::Rejected => {
                if self.volcano.is_some() {
                    return fail("rejected record carries volcano/scores");
                }
                if self.quality.confidence != ConfidenceLevel::None {
                    return fail("rejected record with confidence other than none");
                }
            }
        }

        let q = &self.quality;
        if !(0.0..=1.0).contains(&q.coverage) {
            return fail("coverage outside [0, 1]");
        }
        if (q.uncertainty - (1.0 - q.coverage)).abs() > 1e-12 {
            return fail("uncertainty != 1 - coverage");
        }
        if q.coverage == 0.0 && self.status != MatchStatus::Rejected {
            return fail("zero coverage must be rejected");
        }

        if let Some(scores) = &self.scores {
            let present: Vec<f64> = scores.dimensions().iter().flatten().copied().collect();
            if present.is_empty() {
                return fail("final score without any dimension score");
            }
            if present
                .iter()
                .chain(std::iter::once(&scores.final_score))
                .any(|s| !(0.0..=1.0).contains(s))
            {
                return fail("score outside [0, 1]");
            }
        }
        Ok(())
    }
}
