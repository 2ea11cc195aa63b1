//! Record shapes exchanged with the ingestion and storage layers
//!
//! - [`sample`]: geochemical rock samples (input)
//! - [`volcano`]: volcano candidates and their eruption history (input)
//! - [`match_result`]: the persisted per-sample match record (output)

pub mod match_result;
pub mod sample;
pub mod volcano;

pub use match_result::{
    ConfidenceLevel, Explanation, LiteratureEvidence, LiteratureSpecificity, MatchEvidence,
    MatchMeta, MatchQuality, MatchResult, MatchScores, MatchStatus, VolcanoRef,
};
pub use sample::{DatePrecision, EruptionDate, Oxide, OxideComposition, Sample, SourceDatabase};
pub use volcano::{EruptionRecord, VolcanoCandidate};
