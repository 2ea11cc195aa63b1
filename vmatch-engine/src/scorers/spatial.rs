//! Spatial proximity scorer
//!
//! Piecewise-linear decay out to 50 km, exponential tail beyond. The curve
//! is continuous and strictly decreasing so a closer candidate always
//! scores higher.

use super::Score;

/// Score a great-circle distance in kilometres
///
/// Returns `None` only for a distance that is not a real non-negative
/// number; every located candidate has spatial data.
pub fn score(distance_km: f64) -> Option<Score> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return None;
    }
    Some(Score::new(proximity(distance_km)))
}

fn proximity(d: f64) -> f64 {
    if d < 5.0 {
        1.0 - 0.02 * d
    } else if d < 25.0 {
        0.90 - 0.015 * (d - 5.0)
    } else if d <= 50.0 {
        0.60 - 0.012 * (d - 25.0)
    } else {
        0.30 * (-(d - 50.0) / 50.0).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(d: f64) -> f64 {
        score(d).unwrap().value
    }

    #[test]
    fn test_band_values() {
        assert_eq!(value(0.0), 1.0);
        assert!((value(2.0) - 0.96).abs() < 1e-12);
        assert!((value(24.3) - 0.6105).abs() < 1e-12);
        assert!((value(50.0) - 0.30).abs() < 1e-12);
        assert!((value(100.0) - 0.30 * (-1.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_continuous_at_band_edges() {
        for edge in [5.0, 25.0, 50.0] {
            let below = value(edge - 1e-9);
            let above = value(edge + 1e-9);
            assert!((below - above).abs() < 1e-6, "jump at {} km", edge);
        }
    }

    #[test]
    fn test_strictly_decreasing() {
        let mut previous = value(0.0);
        let mut d = 0.25;
        while d < 200.0 {
            let current = value(d);
            assert!(current < previous, "not decreasing at {} km", d);
            previous = current;
            d += 0.25;
        }
    }

    #[test]
    fn test_invalid_distance_has_no_data() {
        assert!(score(f64::NAN).is_none());
        assert!(score(-1.0).is_none());
    }
}
