//! Matching Pipeline
//!
//! Runs one sample through the stages, leaves first:
//!
//! ```text
//! Sample
//!   → Candidate Locator   (spatial index, search radius)
//!   → Dimension Scorers   (per candidate: sp, te, ti, pe, lit)
//!   → Aggregator          (final, coverage)
//!   → Candidate Selector  (best above the acceptance floor)
//!   → Confidence Classifier
//!   → Explanation Generator
//!   → Assembler           → MatchResult
//! ```
//!
//! Samples are independent. A batch fans out over the current rayon pool;
//! the index and configuration are shared immutably.

pub mod statistics;

use crate::aggregator::Aggregator;
use crate::assembler;
use crate::confidence::ConfidenceClassifier;
use crate::explanation;
use crate::locator::VolcanoIndex;
use crate::scorers::{self, SampleProfile};
use crate::selector::{CandidateSelector, ScoredCandidate, Selection};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, trace};
use vmatch_common::config::MatchingConfig;
use vmatch_common::models::{MatchResult, Sample};
use vmatch_common::{Error, Result};

pub use statistics::BatchStatistics;

/// Results of a batch run plus its statistics
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// One record per input sample, in input order
    pub results: Vec<MatchResult>,
    pub statistics: BatchStatistics,
}

/// Sample-to-volcano matching engine
pub struct MatchingEngine {
    index: Arc<VolcanoIndex>,
    config: MatchingConfig,
    aggregator: Aggregator,
    selector: CandidateSelector,
    classifier: ConfidenceClassifier,
}

impl MatchingEngine {
    /// Create an engine over a built index
    ///
    /// # Errors
    /// Returns `Error::Config` when the matching configuration is invalid or
    /// its acceptance floor is below the low-confidence threshold.
    pub fn new(index: Arc<VolcanoIndex>, config: MatchingConfig) -> Result<Self> {
        config.validate()?;

        let classifier = ConfidenceClassifier::new();
        if config.acceptance_floor < classifier.low_threshold() {
            return Err(Error::Config(format!(
                "acceptance_floor {} is below the low-confidence threshold {}",
                config.acceptance_floor,
                classifier.low_threshold()
            )));
        }

        info!(
            volcanoes = index.len(),
            search_radius_km = config.search_radius_km,
            acceptance_floor = config.acceptance_floor,
            "Matching engine ready"
        );

        Ok(Self {
            aggregator: Aggregator::new(&config.weights),
            selector: CandidateSelector::new(config.acceptance_floor, config.competing_epsilon),
            classifier,
            index,
            config,
        })
    }

    pub fn index(&self) -> &VolcanoIndex {
        &self.index
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Match one sample
    ///
    /// The sample is expected to have passed [`Sample::validate`]; missing
    /// optional fields degrade to "no data", never to an error.
    pub fn match_sample(&self, sample: &Sample, ts: DateTime<Utc>) -> MatchResult {
        let profile = SampleProfile::new(sample);

        let scored: Vec<ScoredCandidate<'_>> = self
            .index
            .within_radius(&sample.location, self.config.search_radius_km)
            .into_iter()
            .map(|located| {
                let card = scorers::score_candidate(&profile, &located);
                let aggregate = self.aggregator.aggregate(&card.folded());
                trace!(
                    sample_id = %sample.id,
                    volcano_id = %located.id(),
                    distance_km = located.distance_km,
                    final_score = ?aggregate.final_score,
                    coverage = aggregate.coverage,
                    "Candidate scored"
                );
                ScoredCandidate {
                    located,
                    card,
                    aggregate,
                }
            })
            .collect();

        let candidates = scored.len();
        let selection = self.selector.select(scored);
        let explanation = explanation::explain(&profile, &selection);
        let result = assembler::assemble(sample, &selection, explanation, &self.classifier, ts);

        if let Selection::NoCandidates = selection {
            debug!(sample_id = %sample.id, "No volcano within search radius");
        } else {
            debug!(
                sample_id = %sample.id,
                candidates,
                status = ?result.status,
                confidence = %result.quality.confidence,
                "Sample matched"
            );
        }
        result
    }

    /// Match a batch in parallel on the current rayon pool
    ///
    /// Output order follows input order; every record carries `ts`.
    pub fn match_batch(&self, samples: &[Sample], ts: DateTime<Utc>) -> Vec<MatchResult> {
        samples
            .par_iter()
            .map(|sample| self.match_sample(sample, ts))
            .collect()
    }

    /// Match a batch and gather run statistics
    pub fn run_batch(&self, samples: &[Sample], ts: DateTime<Utc>) -> BatchReport {
        let started = Instant::now();
        let results = self.match_batch(samples, ts);
        let statistics = BatchStatistics::from_results(&results, started.elapsed());

        info!(
            total = statistics.total,
            matched = statistics.matched,
            rejected = statistics.rejected,
            elapsed_ms = statistics.elapsed_ms,
            "Batch complete"
        );

        BatchReport {
            results,
            statistics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmatch_common::models::{SourceDatabase, VolcanoCandidate};
    use vmatch_common::GeoPoint;

    fn ts() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn engine(volcanoes: Vec<VolcanoCandidate>) -> MatchingEngine {
        let index = Arc::new(VolcanoIndex::build(volcanoes).unwrap());
        MatchingEngine::new(index, MatchingConfig::default()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let index = Arc::new(VolcanoIndex::default());
        let config = MatchingConfig {
            search_radius_km: 0.0,
            ..Default::default()
        };
        assert!(MatchingEngine::new(index, config).is_err());
    }

    #[test]
    fn test_spatial_only_match_is_low() {
        // Only sp has data: coverage 0.25 can never reach medium
        let engine = engine(vec![VolcanoCandidate::new(
            "1",
            "Nearby",
            GeoPoint { lon: 0.0, lat: 0.01 },
        )]);
        let sample = Sample::new("S", SourceDatabase::Petdb, GeoPoint { lon: 0.0, lat: 0.0 });

        let result = engine.match_sample(&sample, ts());
        assert!(result.is_matched());
        assert_eq!(result.quality.coverage, 0.25);
        assert_eq!(result.quality.confidence.as_str(), "low");
        let scores = result.scores.unwrap();
        assert!((scores.final_score - scores.sp.unwrap()).abs() < 1e-12);
        assert!(scores.te.is_none());
    }

    #[test]
    fn test_batch_preserves_input_order() {
        let engine = engine(vec![VolcanoCandidate::new(
            "1",
            "Nearby",
            GeoPoint { lon: 10.0, lat: 10.0 },
        )]);
        let samples: Vec<Sample> = (0..50)
            .map(|i| {
                Sample::new(
                    format!("S{}", i),
                    SourceDatabase::Georoc,
                    GeoPoint {
                        lon: 10.0 + (i % 3) as f64,
                        lat: 10.0,
                    },
                )
            })
            .collect();

        let report = engine.run_batch(&samples, ts());
        let ids: Vec<&str> = report.results.iter().map(|r| r.sample_id.as_str()).collect();
        let expected: Vec<String> = (0..50).map(|i| format!("S{}", i)).collect();
        assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(report.statistics.total, 50);
        assert_eq!(report.statistics.matched, 17);
        assert_eq!(report.statistics.rejected, 33);
        assert!(report.results.iter().all(|r| r.meta.ts == ts()));
    }
}
