//! Result Assembler
//!
//! Packages a selection into the persisted [`MatchResult`]. Rejected
//! samples omit `volcano` and `scores` entirely.

use crate::confidence::ConfidenceClassifier;
use crate::selector::{ScoredCandidate, Selection};
use chrono::{DateTime, Utc};
use vmatch_common::models::{
    ConfidenceLevel, Explanation, LiteratureEvidence, MatchEvidence, MatchMeta, MatchQuality,
    MatchResult, MatchScores, MatchStatus, Sample, VolcanoRef,
};

/// Method tag stamped on every record
pub const METHOD_TAG: &str = "rule_based_v1";

fn quality(coverage: f64, confidence: ConfidenceLevel) -> MatchQuality {
    MatchQuality {
        coverage,
        uncertainty: 1.0 - coverage,
        confidence,
    }
}

fn literature_of(best: Option<&ScoredCandidate<'_>>) -> LiteratureEvidence {
    best.map(|b| b.card.literature.evidence())
        .unwrap_or_else(LiteratureEvidence::absent)
}

fn rejected(
    sample: &Sample,
    best: Option<&ScoredCandidate<'_>>,
    explanation: Explanation,
    ts: DateTime<Utc>,
) -> MatchResult {
    // Coverage of the best candidate that had any folded data
    let coverage = best
        .filter(|b| b.aggregate.final_score.is_some())
        .map(|b| b.aggregate.coverage)
        .unwrap_or(0.0);

    MatchResult {
        sample_id: sample.id.clone(),
        status: MatchStatus::Rejected,
        volcano: None,
        scores: None,
        quality: quality(coverage, ConfidenceLevel::None),
        evidence: MatchEvidence {
            literature: literature_of(best),
        },
        explanation,
        meta: MatchMeta {
            method: METHOD_TAG.to_string(),
            ts,
        },
    }
}

/// Build the match record for one sample
pub fn assemble(
    sample: &Sample,
    selection: &Selection<'_>,
    explanation: Explanation,
    classifier: &ConfidenceClassifier,
    ts: DateTime<Utc>,
) -> MatchResult {
    let Selection::Accepted { best, .. } = selection else {
        return rejected(sample, selection.best(), explanation, ts);
    };
    let Some(final_score) = best.aggregate.final_score else {
        return rejected(sample, Some(best), explanation, ts);
    };

    let coverage = best.aggregate.coverage;
    let confidence = classifier.classify(final_score, coverage);
    if confidence == ConfidenceLevel::None {
        return rejected(sample, Some(best), explanation, ts);
    }

    let [sp, te, ti, pe] = best.card.folded();
    let volcano = &best.located.volcano.candidate;

    MatchResult {
        sample_id: sample.id.clone(),
        status: MatchStatus::Matched,
        volcano: Some(VolcanoRef {
            id: volcano.id.clone(),
            name: volcano.name.clone(),
            distance_km: best.located.distance_km,
        }),
        scores: Some(MatchScores {
            sp,
            te,
            ti,
            pe,
            final_score,
        }),
        quality: quality(coverage, confidence),
        evidence: MatchEvidence {
            literature: best.card.literature.evidence(),
        },
        explanation,
        meta: MatchMeta {
            method: METHOD_TAG.to_string(),
            ts,
        },
    }
}
