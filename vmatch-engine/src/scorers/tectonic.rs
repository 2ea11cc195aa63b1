//! Tectonic setting scorer
//!
//! The two catalogs label tectonic settings differently:
//! - samples: "CONVERGENT MARGIN", "INTRAPLATE VOLCANICS", "back-arc_basin"
//! - volcanoes: "Subduction zone / Continental crust (>25 km)"
//!
//! Both are reduced to a (regime, crust) pair by keyword phrases on word
//! tokens, then compared through a fixed compatibility table.

use super::Score;

/// Plate-tectonic regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    Subduction,
    BackArc,
    Rift,
    Intraplate,
}

/// Crust type beneath the volcano
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crust {
    Continental,
    Intermediate,
    Oceanic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TectonicClass {
    pub regime: Regime,
    pub crust: Option<Crust>,
}

/// Parsed tectonic label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TectonicLabel {
    Missing,
    /// Present but no regime keyword found
    Unrecognized,
    Known(TectonicClass),
}

impl TectonicLabel {
    pub fn class(&self) -> Option<TectonicClass> {
        match self {
            TectonicLabel::Known(class) => Some(*class),
            _ => None,
        }
    }
}

/// Regime phrases, checked in order. Back-arc comes before subduction so
/// that "back-arc basin" is not read as an arc.
const REGIME_PHRASES: &[(&[&str], Regime)] = &[
    (&["back", "arc"], Regime::BackArc),
    (&["backarc"], Regime::BackArc),
    (&["subduction"], Regime::Subduction),
    (&["convergent"], Regime::Subduction),
    (&["arc"], Regime::Subduction),
    (&["rift"], Regime::Rift),
    (&["spreading"], Regime::Rift),
    (&["ridge"], Regime::Rift),
    (&["divergent"], Regime::Rift),
    (&["intraplate"], Regime::Intraplate),
    (&["intra", "plate"], Regime::Intraplate),
    (&["hotspot"], Regime::Intraplate),
    (&["hot", "spot"], Regime::Intraplate),
    (&["ocean", "island"], Regime::Intraplate),
    (&["flood", "basalt"], Regime::Intraplate),
    (&["oceanic", "plateau"], Regime::Intraplate),
    (&["craton"], Regime::Intraplate),
];

const CRUST_PHRASES: &[(&str, Crust)] = &[
    ("continental", Crust::Continental),
    ("intermediate", Crust::Intermediate),
    ("oceanic", Crust::Oceanic),
    ("ocean", Crust::Oceanic),
];

fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn contains_phrase(words: &[String], phrase: &[&str]) -> bool {
    words
        .windows(phrase.len())
        .any(|window| window.iter().zip(phrase).all(|(w, p)| w == p))
}

/// Parse a tectonic label from either catalog
pub fn parse_label(label: Option<&str>) -> TectonicLabel {
    let Some(label) = label.filter(|l| !l.trim().is_empty()) else {
        return TectonicLabel::Missing;
    };
    let words = tokens(label);

    let regime = REGIME_PHRASES
        .iter()
        .find(|(phrase, _)| contains_phrase(&words, phrase))
        .map(|(_, regime)| *regime);

    let Some(regime) = regime else {
        return TectonicLabel::Unrecognized;
    };

    let crust = CRUST_PHRASES
        .iter()
        .find(|(word, _)| words.iter().any(|w| w == word))
        .map(|(_, crust)| *crust);

    TectonicLabel::Known(TectonicClass { regime, crust })
}

fn crust_compatibility(a: Option<Crust>, b: Option<Crust>) -> f64 {
    match (a, b) {
        (None, None) => 1.0,
        (None, Some(_)) | (Some(_), None) => 0.85,
        (Some(x), Some(y)) if x == y => 1.0,
        (Some(Crust::Intermediate), Some(_)) | (Some(_), Some(Crust::Intermediate)) => 0.8,
        _ => 0.6,
    }
}

/// Compatibility of two parsed classes
pub fn compatibility(a: &TectonicClass, b: &TectonicClass) -> f64 {
    if a.regime == b.regime {
        return crust_compatibility(a.crust, b.crust);
    }
    match (a.regime, b.regime) {
        (Regime::BackArc, Regime::Subduction)
        | (Regime::Subduction, Regime::BackArc)
        | (Regime::BackArc, Regime::Rift)
        | (Regime::Rift, Regime::BackArc) => 0.5,
        _ => 0.0,
    }
}

/// Score a sample label against a candidate label
///
/// No data unless both labels parsed to a known class.
pub fn score(sample: &TectonicLabel, candidate: &TectonicLabel) -> Option<Score> {
    let a = sample.class()?;
    let b = candidate.class()?;
    Some(Score::new(compatibility(&a, &b)))
}
