//! Aggregation of weighted points into H3 cells.

use h3o::{CellIndex, LatLng, Resolution};
use rustc_hash::FxHashMap;

use crate::data::PointDatum;
use crate::error::GlobeError;

/// One hexagonal (or pentagonal) cell with the points that fell into it.
#[derive(Debug, Clone, PartialEq)]
pub struct HexBin {
    /// H3 cell index.
    pub cell: CellIndex,
    /// Indices into the point slice that was binned, in input order.
    pub points: Vec<usize>,
    /// Sum of the weights of `points`.
    pub sum_weight: f64,
}

impl HexBin {
    /// Cell center as `(lat, lng)` degrees.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        let ll = LatLng::from(self.cell);
        (ll.lat(), ll.lng())
    }

    /// Cell boundary vertices as `(lat, lng)` degrees, counter-clockwise.
    #[must_use]
    pub fn boundary(&self) -> Vec<(f64, f64)> {
        self.cell
            .boundary()
            .iter()
            .map(|ll| (ll.lat(), ll.lng()))
            .collect()
    }
}

/// Result of binning a point set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HexBins {
    /// Bins in order of first appearance in the input.
    pub bins: Vec<HexBin>,
    /// Points dropped because a coordinate or the weight was not finite,
    /// or the coordinate was outside the valid range.
    pub skipped: usize,
}

impl HexBins {
    /// Largest summed weight among the bins (0 when empty).
    #[must_use]
    pub fn max_weight(&self) -> f64 {
        self.bins.iter().map(|b| b.sum_weight).fold(0.0, f64::max)
    }
}

/// Validate a configured resolution.
pub fn resolution(level: u8) -> Result<Resolution, GlobeError> {
    Resolution::try_from(level).map_err(|e| {
        GlobeError::OptionsParse(format!("hex bin resolution {level}: {e}"))
    })
}

/// Group `points` by the H3 cell containing them and sum their weights.
#[must_use]
pub fn bin_points(points: &[PointDatum], resolution: Resolution) -> HexBins {
    let mut index: FxHashMap<CellIndex, usize> = FxHashMap::default();
    let mut out = HexBins::default();

    for (i, p) in points.iter().enumerate() {
        if !p.weight.is_finite() {
            out.skipped += 1;
            continue;
        }
        let Ok(ll) = LatLng::new(p.lat, p.lng) else {
            out.skipped += 1;
            continue;
        };
        let cell = ll.to_cell(resolution);
        let slot = *index.entry(cell).or_insert_with(|| {
            out.bins.push(HexBin {
                cell,
                points: Vec::new(),
                sum_weight: 0.0,
            });
            out.bins.len() - 1
        });
        let bin = &mut out.bins[slot];
        bin.points.push(i);
        bin.sum_weight += p.weight;
    }

    if out.skipped > 0 {
        log::warn!("skipped {} points with invalid values", out.skipped);
    }
    log::debug!(
        "binned {} points into {} cells at resolution {}",
        points.len() - out.skipped,
        out.bins.len(),
        u8::from(resolution)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lng: f64, weight: f64) -> PointDatum {
        PointDatum { lat, lng, weight }
    }

    #[test]
    fn nearby_points_share_a_bin() {
        let points = [pt(48.8566, 2.3522, 100.0), pt(48.8570, 2.3530, 50.0)];
        let bins = bin_points(&points, Resolution::Three);
        assert_eq!(bins.bins.len(), 1);
        assert_eq!(bins.bins[0].sum_weight, 150.0);
        assert_eq!(bins.bins[0].points, vec![0, 1]);
        assert_eq!(bins.skipped, 0);
    }

    #[test]
    fn distant_points_keep_first_seen_order() {
        let points = [
            pt(-33.87, 151.21, 1.0),
            pt(40.71, -74.0, 2.0),
            pt(-33.87, 151.21, 3.0),
        ];
        let bins = bin_points(&points, Resolution::Three);
        assert_eq!(bins.bins.len(), 2);
        assert_eq!(bins.bins[0].sum_weight, 4.0);
        assert_eq!(bins.bins[1].sum_weight, 2.0);
        assert_eq!(bins.max_weight(), 4.0);
    }

    #[test]
    fn invalid_points_are_skipped() {
        let points = [
            pt(f64::NAN, 0.0, 1.0),
            pt(0.0, f64::INFINITY, 1.0),
            pt(0.0, 0.0, f64::NAN),
            pt(0.0, 0.0, 1.0),
        ];
        let bins = bin_points(&points, Resolution::Three);
        assert_eq!(bins.skipped, 3);
        assert_eq!(bins.bins.len(), 1);
        assert_eq!(bins.bins[0].points, vec![3]);
    }

    #[test]
    fn bin_geometry_surrounds_points() {
        let points = [pt(10.0, 20.0, 1.0)];
        let bins = bin_points(&points, Resolution::Three);
        let bin = &bins.bins[0];
        let (lat, lng) = bin.center();
        assert!((lat - 10.0).abs() < 2.0 && (lng - 20.0).abs() < 2.0);
        assert!(bin.boundary().len() >= 5);
    }

    #[test]
    fn resolution_bounds() {
        assert_eq!(resolution(3).unwrap(), Resolution::Three);
        assert!(resolution(16).is_err());
    }

    #[test]
    fn empty_input() {
        let bins = bin_points(&[], Resolution::Three);
        assert!(bins.bins.is_empty());
        assert_eq!(bins.max_weight(), 0.0);
    }
}
