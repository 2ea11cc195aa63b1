//! Explanation Generator
//!
//! Turns a selection into ordered reason codes (one per dimension, always
//! spatial → tectonic → temporal → petrological → literature) plus
//! advisory flags. Rejected samples are explained through the best
//! candidate that was scored; a sample with nothing in range gets
//! `no_data` for every dimension.

pub mod rules;

use crate::scorers::tectonic::TectonicLabel;
use crate::scorers::{Dimension, SampleProfile};
use crate::selector::Selection;
use vmatch_common::models::{DatePrecision, Explanation};

/// Advisory flag, declared in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    /// Sample date lacks month or day
    LowPrecision,
    /// No candidate inside the search radius
    HighUncertainty,
    /// Top two candidates within epsilon of each other
    CompetingCandidates,
    /// A candidate was scored but fell under the acceptance floor
    BelowAcceptance,
    /// A tectonic label was present but not understood
    UnrecognizedTectonicLabel,
    /// Sample rock kind came from the TAS diagram
    TasDerived,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::LowPrecision => "time:low_precision",
            Flag::HighUncertainty => "space:high_uncertainty",
            Flag::CompetingCandidates => "score:competing_candidates",
            Flag::BelowAcceptance => "score:below_acceptance",
            Flag::UnrecognizedTectonicLabel => "tect:unrecognized_label",
            Flag::TasDerived => "petro:tas_derived",
        }
    }
}

fn collect_flags(profile: &SampleProfile<'_>, selection: &Selection<'_>) -> Vec<Flag> {
    let mut flags = Vec::new();

    if profile
        .sample
        .eruption_date
        .is_some_and(|d| d.precision() < DatePrecision::Day)
    {
        flags.push(Flag::LowPrecision);
    }
    if matches!(selection, Selection::NoCandidates) {
        flags.push(Flag::HighUncertainty);
    }
    if selection.competing() {
        flags.push(Flag::CompetingCandidates);
    }
    if matches!(selection, Selection::BelowFloor { .. }) {
        flags.push(Flag::BelowAcceptance);
    }

    let best = selection.best();
    if matches!(profile.tectonic, TectonicLabel::Unrecognized)
        || best.is_some_and(|b| b.card.tectonic_unrecognized)
    {
        flags.push(Flag::UnrecognizedTectonicLabel);
    }
    if best.is_some_and(|b| b.card.tas_derived) {
        flags.push(Flag::TasDerived);
    }

    flags.sort();
    flags.dedup();
    flags
}

/// Build the explanation for one sample's selection
pub fn explain(profile: &SampleProfile<'_>, selection: &Selection<'_>) -> Explanation {
    let card = selection.best().map(|b| &b.card);
    let reasons = Dimension::ALL
        .iter()
        .map(|&dimension| rules::reason(dimension, card.and_then(|c| c.get(dimension))))
        .collect();

    let flags = collect_flags(profile, selection)
        .iter()
        .map(|f| f.as_str().to_string())
        .collect();

    Explanation { reasons, flags }
}
