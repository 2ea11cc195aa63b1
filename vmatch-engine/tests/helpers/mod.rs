//! Test Helper Utilities
//!
//! Shared fixtures for the vmatch-engine integration tests

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use std::sync::Arc;
use vmatch_common::config::MatchingConfig;
use vmatch_common::geo::km_per_degree_lat;
use vmatch_common::models::{
    EruptionDate, EruptionRecord, Sample, SourceDatabase, VolcanoCandidate,
};
use vmatch_common::GeoPoint;
use vmatch_engine::{MatchingEngine, VolcanoIndex};

/// Fixed run timestamp
pub fn ts() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Point `km` kilometres due north (negative: south) of `origin`
pub fn north_of(origin: GeoPoint, km: f64) -> GeoPoint {
    GeoPoint {
        lon: origin.lon,
        lat: origin.lat + km / km_per_degree_lat(),
    }
}

pub fn st_helens() -> VolcanoCandidate {
    let mut v = VolcanoCandidate::new(
        "321050",
        "St. Helens",
        GeoPoint {
            lon: -122.18,
            lat: 46.20,
        },
    );
    v.tectonic_setting = Some("Subduction zone / Continental crust (>25 km)".to_string());
    v.major_rock_types = vec![
        "Dacite".to_string(),
        "Andesite / Basaltic Andesite".to_string(),
    ];
    v.eruptions = vec![EruptionRecord {
        start: EruptionDate::ymd(1980, 3, 27),
        end: Some(EruptionDate::ymd(1986, 10, 28)),
        vei: Some(5),
    }];
    v.aliases = vec!["Mount St. Helens".to_string()];
    v.region = Some("Cascade Range".to_string());
    v.country = Some("United States".to_string());
    v
}

pub fn villarrica() -> VolcanoCandidate {
    let mut v = VolcanoCandidate::new(
        "357120",
        "Villarrica",
        GeoPoint {
            lon: -71.93,
            lat: -39.42,
        },
    );
    v.tectonic_setting = Some("Subduction zone / Continental crust (>25 km)".to_string());
    v.major_rock_types = vec!["Basalt / Picro-Basalt".to_string()];
    v.eruptions = vec![EruptionRecord::starting(EruptionDate::ymd(2015, 3, 3))];
    v
}

pub fn sample(id: &str, location: GeoPoint) -> Sample {
    Sample::new(id, SourceDatabase::Georoc, location)
}

pub fn engine_with(volcanoes: Vec<VolcanoCandidate>, config: MatchingConfig) -> MatchingEngine {
    let index = Arc::new(VolcanoIndex::build(volcanoes).unwrap());
    MatchingEngine::new(index, config).unwrap()
}

pub fn engine(volcanoes: Vec<VolcanoCandidate>) -> MatchingEngine {
    engine_with(volcanoes, MatchingConfig::default())
}
