//! vmatch-engine library interface
//!
//! Links geochemical rock samples to the volcano that most plausibly
//! produced them. Matching is deterministic and rule-based; every record
//! carries its dimension scores, a confidence level and an explanation.
//!
//! ```no_run
//! use std::sync::Arc;
//! use vmatch_common::config::MatchingConfig;
//! use vmatch_engine::{MatchingEngine, VolcanoIndex};
//!
//! # fn run(volcanoes: Vec<vmatch_common::models::VolcanoCandidate>,
//! #        samples: Vec<vmatch_common::models::Sample>) -> vmatch_common::Result<()> {
//! let index = Arc::new(VolcanoIndex::build(volcanoes)?);
//! let engine = MatchingEngine::new(index, MatchingConfig::default())?;
//! let results = engine.match_batch(&samples, chrono::Utc::now());
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod assembler;
pub mod confidence;
pub mod explanation;
pub mod loader;
pub mod locator;
pub mod pipeline;
pub mod scorers;
pub mod selector;

pub use assembler::METHOD_TAG;
pub use locator::{LocatedCandidate, VolcanoIndex, DEFAULT_SEARCH_RADIUS_KM};
pub use pipeline::{BatchReport, BatchStatistics, MatchingEngine};
