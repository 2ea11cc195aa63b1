//! Candidate Locator
//!
//! Immutable spatial index over the volcano catalog. Volcanoes are bucketed
//! into one-degree latitude/longitude cells; a radius query visits only the
//! cells the radius can reach (plus one cell of padding) and confirms each
//! hit with the exact great-circle distance.
//!
//! The index also carries the candidate-side parsing every scorer needs
//! (tectonic class, ranked rock kinds, name forms), so each catalog entry is
//! parsed once no matter how many samples it is compared against.

use crate::scorers::literature::NameForms;
use crate::scorers::rock_type::{self, RockKind};
use crate::scorers::tectonic::{self, TectonicLabel};
use std::collections::HashMap;
use tracing::debug;
use vmatch_common::geo::{haversine_km, km_per_degree_lat};
use vmatch_common::models::VolcanoCandidate;
use vmatch_common::{GeoPoint, Result};

/// Default candidate search radius (km)
pub const DEFAULT_SEARCH_RADIUS_KM: f64 = 80.0;

/// Latitude beyond which a query scans every longitude cell
const POLAR_LATITUDE: f64 = 89.0;

/// Catalog entry with its pre-parsed scoring inputs
#[derive(Debug, Clone)]
pub struct IndexedVolcano {
    pub candidate: VolcanoCandidate,
    pub tectonic: TectonicLabel,
    pub rock_ranks: Vec<Vec<RockKind>>,
    pub names: NameForms,
}

impl IndexedVolcano {
    fn new(candidate: VolcanoCandidate) -> Self {
        Self {
            tectonic: tectonic::parse_label(candidate.tectonic_setting.as_deref()),
            rock_ranks: rock_type::parse_ranked_types(&candidate.major_rock_types),
            names: NameForms::from_candidate(&candidate),
            candidate,
        }
    }
}

/// Candidate found within the search radius
#[derive(Debug, Clone, Copy)]
pub struct LocatedCandidate<'a> {
    pub volcano: &'a IndexedVolcano,
    /// Great-circle distance from the sample (km)
    pub distance_km: f64,
}

impl LocatedCandidate<'_> {
    pub fn id(&self) -> &str {
        &self.volcano.candidate.id
    }
}

type Cell = (i32, i32);

fn lat_cell(lat: f64) -> i32 {
    (lat.floor() as i32).clamp(-90, 89)
}

fn lon_cell(lon: f64) -> i32 {
    (lon.floor() as i32).rem_euclid(360)
}

/// Spatial index over volcano candidates
#[derive(Debug, Default)]
pub struct VolcanoIndex {
    volcanoes: Vec<IndexedVolcano>,
    cells: HashMap<Cell, Vec<usize>>,
}

impl VolcanoIndex {
    /// Build the index from catalog entries
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` for the first malformed entry
    /// (empty id, coordinates out of range, more than three rock types).
    pub fn build(candidates: Vec<VolcanoCandidate>) -> Result<Self> {
        let mut volcanoes = Vec::with_capacity(candidates.len());
        let mut cells: HashMap<Cell, Vec<usize>> = HashMap::new();

        for candidate in candidates {
            candidate.validate()?;
            let cell = (
                lat_cell(candidate.location.lat),
                lon_cell(candidate.location.lon),
            );
            cells.entry(cell).or_default().push(volcanoes.len());
            volcanoes.push(IndexedVolcano::new(candidate));
        }

        debug!(
            volcanoes = volcanoes.len(),
            cells = cells.len(),
            "Volcano index built"
        );

        Ok(Self { volcanoes, cells })
    }

    pub fn len(&self) -> usize {
        self.volcanoes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volcanoes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedVolcano> {
        self.volcanoes.iter()
    }

    /// Longitude cells a query must visit
    fn lon_cells(point: &GeoPoint, radius_deg: f64) -> Vec<i32> {
        let max_abs_lat = point.lat.abs() + radius_deg;
        if max_abs_lat >= POLAR_LATITUDE {
            return (0..360).collect();
        }

        let lon_deg = radius_deg / max_abs_lat.to_radians().cos();
        let lo = (point.lon - lon_deg).floor() as i32 - 1;
        let hi = (point.lon + lon_deg).floor() as i32 + 1;
        if hi - lo + 1 >= 360 {
            return (0..360).collect();
        }
        (lo..=hi).map(|c| c.rem_euclid(360)).collect()
    }

    /// All candidates within `radius_km` of `point`, in no particular order
    pub fn within_radius(&self, point: &GeoPoint, radius_km: f64) -> Vec<LocatedCandidate<'_>> {
        if !radius_km.is_finite() || radius_km < 0.0 || self.volcanoes.is_empty() {
            return Vec::new();
        }

        let radius_deg = radius_km / km_per_degree_lat();
        let lat_lo = lat_cell(point.lat - radius_deg - 1.0);
        let lat_hi = lat_cell(point.lat + radius_deg + 1.0);
        let lon_cells = Self::lon_cells(point, radius_deg);

        let mut found = Vec::new();
        for lat in lat_lo..=lat_hi {
            for &lon in &lon_cells {
                let Some(members) = self.cells.get(&(lat, lon)) else {
                    continue;
                };
                for &idx in members {
                    let volcano = &self.volcanoes[idx];
                    let distance_km = haversine_km(point, &volcano.candidate.location);
                    if distance_km <= radius_km {
                        found.push(LocatedCandidate {
                            volcano,
                            distance_km,
                        });
                    }
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volcano(id: &str, lon: f64, lat: f64) -> VolcanoCandidate {
        VolcanoCandidate::new(id, format!("Volcano {}", id), GeoPoint { lon, lat })
    }

    fn ids(found: &[LocatedCandidate<'_>]) -> Vec<String> {
        let mut ids: Vec<String> = found.iter().map(|c| c.id().to_string()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_radius_filter_is_exact() {
        let index = VolcanoIndex::build(vec![
            volcano("near", 0.0, 0.5),   // ~55.6 km
            volcano("far", 0.0, 0.8),    // ~89 km
            volcano("other", 10.0, 10.0),
        ])
        .unwrap();

        let found = index.within_radius(&GeoPoint { lon: 0.0, lat: 0.0 }, 80.0);
        assert_eq!(ids(&found), vec!["near"]);
        assert!((found[0].distance_km - 55.6).abs() < 0.1);
    }

    #[test]
    fn test_antimeridian_wrap() {
        let index = VolcanoIndex::build(vec![
            volcano("east", 179.9, -17.0),
            volcano("west", -179.9, -17.0),
        ])
        .unwrap();

        let found = index.within_radius(&GeoPoint { lon: 179.95, lat: -17.0 }, 50.0);
        assert_eq!(ids(&found), vec!["east", "west"]);
    }

    #[test]
    fn test_polar_query_scans_all_longitudes() {
        let index = VolcanoIndex::build(vec![volcano("pole", 120.0, 89.8)]).unwrap();
        let found = index.within_radius(&GeoPoint { lon: -60.0, lat: 89.8 }, 80.0);
        assert_eq!(ids(&found), vec!["pole"]);
    }

    #[test]
    fn test_empty_index_and_nothing_in_range() {
        let empty = VolcanoIndex::build(Vec::new()).unwrap();
        assert!(empty.is_empty());
        assert!(empty.within_radius(&GeoPoint { lon: 0.0, lat: 0.0 }, 80.0).is_empty());

        let index = VolcanoIndex::build(vec![volcano("a", 50.0, 50.0)]).unwrap();
        assert!(index.within_radius(&GeoPoint { lon: 0.0, lat: 0.0 }, 80.0).is_empty());
    }

    #[test]
    fn test_build_rejects_invalid_entry() {
        assert!(VolcanoIndex::build(vec![volcano("bad", 0.0, 95.0)]).is_err());
    }

    #[test]
    fn test_candidate_side_parsed_once() {
        let mut v = volcano("1", 0.0, 0.0);
        v.tectonic_setting = Some("Rift zone / Oceanic crust (< 15 km)".to_string());
        v.major_rock_types = vec!["Basalt / Picro-Basalt".to_string()];
        let index = VolcanoIndex::build(vec![v]).unwrap();

        let indexed = index.iter().next().unwrap();
        assert!(indexed.tectonic.class().is_some());
        assert_eq!(
            indexed.rock_ranks,
            vec![vec![RockKind::Basalt, RockKind::Picrobasalt]]
        );
    }
}
