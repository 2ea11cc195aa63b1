//! Dimension Scorers
//!
//! Five pure scorers compare one sample with one located candidate:
//!
//! | Dimension    | Prefix  | Folded into `final` |
//! |--------------|---------|---------------------|
//! | Spatial      | `space` | yes                 |
//! | Tectonic     | `tect`  | yes                 |
//! | Temporal     | `time`  | yes                 |
//! | Petrological | `petro` | yes                 |
//! | Literature   | `lit`   | no (advisory)       |
//!
//! Every scorer returns `Option<Score>`; `None` means the dimension had no
//! usable data for this pair, which is distinct from a score of 0.0.
//!
//! Sample-side parsing (tectonic label, rock classification, reference
//! text) is done once per sample in [`SampleProfile`]; candidate-side
//! parsing is done once per volcano when the index is built.

pub mod literature;
pub mod petrological;
pub mod rock_type;
pub mod spatial;
pub mod tectonic;
pub mod temporal;

use crate::locator::LocatedCandidate;
use literature::{LiteratureMatch, NormalizedText};
use rock_type::RockKind;
use tectonic::TectonicLabel;
use vmatch_common::models::Sample;

/// Scored dimension, in explanation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Spatial,
    Tectonic,
    Temporal,
    Petrological,
    Literature,
}

impl Dimension {
    /// All dimensions in the order reasons are emitted
    pub const ALL: [Dimension; 5] = [
        Dimension::Spatial,
        Dimension::Tectonic,
        Dimension::Temporal,
        Dimension::Petrological,
        Dimension::Literature,
    ];

    /// Reason-code prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            Dimension::Spatial => "space",
            Dimension::Tectonic => "tect",
            Dimension::Temporal => "time",
            Dimension::Petrological => "petro",
            Dimension::Literature => "lit",
        }
    }
}

/// Dimension score in [0, 1]
///
/// A qualifier marks a special case whose reason code is fixed regardless
/// of the numeric value (e.g. `pre_holocene`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub value: f64,
    pub qualifier: Option<&'static str>,
}

impl Score {
    pub fn new(value: f64) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            qualifier: None,
        }
    }

    pub fn special(value: f64, qualifier: &'static str) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            qualifier: Some(qualifier),
        }
    }
}

/// Rock classification of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RockClass {
    pub kind: RockKind,
    /// True when derived from the TAS diagram rather than the reported name
    pub tas_derived: bool,
}

/// Per-sample parsed inputs, computed once and reused for every candidate
#[derive(Debug, Clone)]
pub struct SampleProfile<'a> {
    pub sample: &'a Sample,
    pub tectonic: TectonicLabel,
    pub rock: Option<RockClass>,
    pub reference: Option<NormalizedText>,
}

impl<'a> SampleProfile<'a> {
    pub fn new(sample: &'a Sample) -> Self {
        Self {
            sample,
            tectonic: tectonic::parse_label(sample.tectonic_setting.as_deref()),
            rock: petrological::classify_sample(sample),
            reference: sample
                .reference
                .as_deref()
                .and_then(NormalizedText::from_reference),
        }
    }
}

/// All dimension scores for one (sample, candidate) pair
#[derive(Debug, Clone)]
pub struct ScoreCard {
    pub spatial: Option<Score>,
    pub tectonic: Option<Score>,
    pub temporal: Option<Score>,
    pub petrological: Option<Score>,
    pub literature: LiteratureMatch,
    /// Either side's tectonic label was present but not understood
    pub tectonic_unrecognized: bool,
    /// The petrological score used a TAS-derived sample classification
    pub tas_derived: bool,
}

impl ScoreCard {
    /// The four dimensions folded into `final`, in weight order
    pub fn folded(&self) -> [Option<f64>; 4] {
        [
            self.spatial.map(|s| s.value),
            self.tectonic.map(|s| s.value),
            self.temporal.map(|s| s.value),
            self.petrological.map(|s| s.value),
        ]
    }

    /// Score of a dimension, literature included
    pub fn get(&self, dimension: Dimension) -> Option<Score> {
        match dimension {
            Dimension::Spatial => self.spatial,
            Dimension::Tectonic => self.tectonic,
            Dimension::Temporal => self.temporal,
            Dimension::Petrological => self.petrological,
            Dimension::Literature => self.literature.score,
        }
    }
}

/// Run all five scorers for one pair
pub fn score_candidate(profile: &SampleProfile<'_>, located: &LocatedCandidate<'_>) -> ScoreCard {
    let indexed = located.volcano;
    let sample = profile.sample;

    let tectonic_unrecognized = matches!(profile.tectonic, TectonicLabel::Unrecognized)
        || matches!(indexed.tectonic, TectonicLabel::Unrecognized);

    let petrological = petrological::score(profile.rock.map(|r| r.kind), &indexed.rock_ranks);
    let tas_derived = petrological.is_some() && profile.rock.is_some_and(|r| r.tas_derived);

    ScoreCard {
        spatial: spatial::score(located.distance_km),
        tectonic: tectonic::score(&profile.tectonic, &indexed.tectonic),
        temporal: temporal::score(
            sample.eruption_date.as_ref(),
            &indexed.candidate.eruptions,
        ),
        petrological,
        literature: literature::score(profile.reference.as_ref(), &indexed.names),
        tectonic_unrecognized,
        tas_derived,
    }
}
