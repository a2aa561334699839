//! Extruded hexagon geometry for the bin layer.
//!
//! Every bin becomes a prism standing on the globe surface: a fan-shaped
//! cap at the bin's altitude plus one quad per boundary edge. Caps use
//! radial normals, sides use flat outward normals. Geometry is in the
//! globe's local frame (before its model transform).

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::bin::{HexBin, HexBins};
use super::color::WeightColorScale;
use crate::geo::{geo_interpolate, polar_to_cartesian};
use crate::options::HexBinOptions;
use crate::util::color::srgb_to_linear;

/// Vertex layout shared with `hexbin.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct HexVertex {
    /// Position in globe-local space.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// Linear RGBA color.
    pub color: [f32; 4],
}

/// Index range and facing direction of one bin inside a [`HexLayerMesh`].
#[derive(Debug, Clone, PartialEq)]
pub struct BinRange {
    /// Indices belonging to this bin.
    pub indices: Range<u32>,
    /// Unit vector from the globe center to the bin center.
    pub direction: Vec3,
}

/// CPU-side geometry for the whole bin layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HexLayerMesh {
    /// All prism vertices.
    pub vertices: Vec<HexVertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
    /// Per-bin index ranges, in bin order.
    pub ranges: Vec<BinRange>,
}

impl HexLayerMesh {
    /// Whether the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Parameters that turn bins into prisms.
#[derive(Debug, Clone, PartialEq)]
pub struct HexStyle {
    /// Globe radius in world units.
    pub radius: f64,
    /// Fraction of each cell shrunk toward its center.
    pub margin: f64,
    /// Relative altitude per unit of summed weight.
    pub altitude_per_weight: f64,
    /// Lowest relative altitude of a prism cap.
    pub min_altitude: f64,
    /// Weight to color mapping.
    pub colors: WeightColorScale,
    /// Alpha of every vertex.
    pub opacity: f32,
}

impl HexStyle {
    /// Style from the hex bin options for a globe of `radius`.
    #[must_use]
    pub fn from_options(options: &HexBinOptions, radius: f32) -> Self {
        Self {
            radius: f64::from(radius),
            margin: f64::from(options.margin.clamp(0.0, 0.99)),
            altitude_per_weight: options.altitude_per_weight,
            min_altitude: options.min_altitude,
            colors: WeightColorScale::yl_or_rd(
                options.color_domain_min,
                options.color_domain_max,
            ),
            opacity: options.opacity.clamp(0.0, 1.0),
        }
    }

    /// Cap altitude (relative to the radius) for a summed weight.
    #[must_use]
    pub fn altitude(&self, sum_weight: f64) -> f64 {
        (sum_weight * self.altitude_per_weight).max(self.min_altitude)
    }
}

/// Build prisms for every bin.
#[must_use]
pub fn build_hex_mesh(bins: &HexBins, style: &HexStyle) -> HexLayerMesh {
    let mut mesh = HexLayerMesh::default();
    for bin in &bins.bins {
        push_bin(&mut mesh, bin, style);
    }
    log::debug!(
        "hex mesh: {} bins, {} vertices, {} triangles",
        mesh.ranges.len(),
        mesh.vertices.len(),
        mesh.indices.len() / 3
    );
    mesh
}

fn push_bin(mesh: &mut HexLayerMesh, bin: &HexBin, style: &HexStyle) {
    let srgb = style.colors.color(bin.sum_weight);
    let [r, g, b] = srgb_to_linear(srgb);
    let color = [r, g, b, style.opacity];
    push_prism(
        mesh,
        bin.center(),
        &bin.boundary(),
        style.altitude(bin.sum_weight),
        color,
        style,
    );
}

/// Append one prism. `center` and `boundary` are `(lat, lng)` degrees.
pub fn push_prism(
    mesh: &mut HexLayerMesh,
    center: (f64, f64),
    boundary: &[(f64, f64)],
    altitude: f64,
    color: [f32; 4],
    style: &HexStyle,
) {
    let n = boundary.len();
    if n < 3 {
        return;
    }
    let start = mesh.indices.len() as u32;
    let keep = 1.0 - style.margin;
    let ring: Vec<(f64, f64)> = boundary
        .iter()
        .map(|&vertex| geo_interpolate(center, vertex, keep))
        .collect();

    let at = |(lat, lng): (f64, f64), alt: f64| {
        polar_to_cartesian(lat, lng, alt, style.radius)
    };
    let direction = at(center, 0.0).normalize_or_zero();

    // Cap: center + ring, fanned.
    let cap_base = mesh.vertices.len() as u32;
    let cap_center = at(center, altitude);
    mesh.vertices.push(HexVertex {
        position: cap_center.to_array(),
        normal: direction.to_array(),
        color,
    });
    for &v in &ring {
        let p = at(v, altitude);
        mesh.vertices.push(HexVertex {
            position: p.to_array(),
            normal: p.normalize_or_zero().to_array(),
            color,
        });
    }
    for k in 0..n as u32 {
        let next = (k + 1) % n as u32;
        mesh.indices
            .extend_from_slice(&[
                cap_base,
                cap_base + 1 + k,
                cap_base + 1 + next,
            ]);
    }

    // Sides: one flat-shaded quad per edge.
    for k in 0..n {
        let a = ring[k];
        let b = ring[(k + 1) % n];
        let corners =
            [at(a, 0.0), at(b, 0.0), at(b, altitude), at(a, altitude)];
        let mut normal = (corners[1] - corners[0])
            .cross(corners[3] - corners[0])
            .normalize_or_zero();
        let mid = (corners[0] + corners[1]) * 0.5;
        if normal.dot(mid - direction * mid.dot(direction)) < 0.0 {
            normal = -normal;
        }
        let base = mesh.vertices.len() as u32;
        for p in corners {
            mesh.vertices.push(HexVertex {
                position: p.to_array(),
                normal: normal.to_array(),
                color,
            });
        }
        mesh.indices.extend_from_slice(&[
            base,
            base + 1,
            base + 2,
            base,
            base + 2,
            base + 3,
        ]);
    }

    mesh.ranges.push(BinRange {
        indices: start..mesh.indices.len() as u32,
        direction,
    });
}

#[cfg(test)]
mod tests {
    use h3o::Resolution;

    use super::*;
    use crate::data::PointDatum;
    use crate::hexbin::bin::bin_points;

    fn style() -> HexStyle {
        HexStyle::from_options(&HexBinOptions::default(), 100.0)
    }

    fn hexagon() -> Vec<(f64, f64)> {
        vec![
            (1.0, 0.0),
            (0.5, 0.866),
            (-0.5, 0.866),
            (-1.0, 0.0),
            (-0.5, -0.866),
            (0.5, -0.866),
        ]
    }

    #[test]
    fn prism_counts() {
        let mut mesh = HexLayerMesh::default();
        push_prism(&mut mesh, (0.0, 0.0), &hexagon(), 0.1, [1.0; 4], &style());
        let n = 6;
        assert_eq!(mesh.vertices.len(), 5 * n + 1);
        assert_eq!(mesh.indices.len(), 9 * n);
        assert_eq!(mesh.ranges.len(), 1);
        assert_eq!(mesh.ranges[0].indices, 0..(9 * n) as u32);
        let count = mesh.vertices.len();
        assert!(mesh.indices.iter().all(|&i| (i as usize) < count));
    }

    #[test]
    fn cap_sits_at_altitude() {
        let mut mesh = HexLayerMesh::default();
        push_prism(&mut mesh, (0.0, 0.0), &hexagon(), 0.25, [1.0; 4], &style());
        let cap = Vec3::from_array(mesh.vertices[0].position);
        assert!((cap.length() - 125.0).abs() < 1e-3);
        let side_base = Vec3::from_array(mesh.vertices[7].position);
        assert!((side_base.length() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn margin_shrinks_ring_toward_center() {
        let mut tight = style();
        tight.margin = 0.5;
        let mut mesh = HexLayerMesh::default();
        let triangle = [(2.0, 0.0), (0.0, 2.0), (-2.0, 0.0)];
        push_prism(&mut mesh, (0.0, 0.0), &triangle, 0.0, [1.0; 4], &tight);
        let ring0 = Vec3::from_array(mesh.vertices[1].position);
        let expected = polar_to_cartesian(1.0, 0.0, 0.0, 100.0);
        assert!((ring0 - expected).length() < 1e-3);
    }

    #[test]
    fn polar_cell_shrinks_evenly() {
        let mut mesh = HexLayerMesh::default();
        let boundary: Vec<(f64, f64)> =
            (0..6).map(|k| (88.0, -180.0 + 60.0 * f64::from(k))).collect();
        push_prism(&mut mesh, (90.0, 0.0), &boundary, 0.0, [1.0; 4], &style());
        for (k, &(_, lng)) in boundary.iter().enumerate() {
            let ring = Vec3::from_array(mesh.vertices[1 + k].position);
            let expected = polar_to_cartesian(88.4, lng, 0.0, 100.0);
            assert!((ring - expected).length() < 1e-3, "vertex {k}: {ring:?}");
        }
    }

    #[test]
    fn side_normals_point_outward() {
        let mut mesh = HexLayerMesh::default();
        push_prism(&mut mesh, (0.0, 0.0), &hexagon(), 0.1, [1.0; 4], &style());
        let axis = Vec3::Z;
        for quad in mesh.vertices[7..].chunks(4) {
            let n = Vec3::from_array(quad[0].normal);
            let p = Vec3::from_array(quad[0].position);
            let lateral = p - axis * p.dot(axis);
            assert!(n.dot(lateral) >= 0.0);
        }
    }

    #[test]
    fn antimeridian_cell_stays_compact() {
        let mut mesh = HexLayerMesh::default();
        let boundary =
            [(1.0, 179.0), (1.0, -179.0), (-1.0, -179.0), (-1.0, 179.0)];
        push_prism(&mut mesh, (0.0, 180.0), &boundary, 0.0, [1.0; 4], &style());
        let center = Vec3::from_array(mesh.vertices[0].position);
        for v in &mesh.vertices[1..5] {
            let d = (Vec3::from_array(v.position) - center).length();
            assert!(d < 5.0, "ring vertex {d} away from center");
        }
    }

    #[test]
    fn degenerate_boundary_is_ignored() {
        let mut mesh = HexLayerMesh::default();
        let line = [(0.0, 0.0), (1.0, 1.0)];
        push_prism(&mut mesh, (0.0, 0.0), &line, 0.1, [1.0; 4], &style());
        assert!(mesh.is_empty());
        assert!(mesh.ranges.is_empty());
    }

    #[test]
    fn altitude_follows_weight() {
        let s = style();
        assert!((s.altitude(5e6) - 0.15).abs() < 1e-12);
        assert_eq!(s.altitude(0.0), s.min_altitude);
    }

    #[test]
    fn real_cells_triangulate() {
        let points = [
            PointDatum { lat: 10.0, lng: 20.0, weight: 5e6 },
            PointDatum { lat: -45.0, lng: 170.0, weight: 1e6 },
        ];
        let bins = bin_points(&points, Resolution::Three);
        let mesh = build_hex_mesh(&bins, &style());
        assert_eq!(mesh.ranges.len(), 2);
        let expected: usize =
            bins.bins.iter().map(|b| 9 * b.boundary().len()).sum();
        assert_eq!(mesh.indices.len(), expected);
        // Heavier bin sits further along the ramp, so less green.
        let heavy = mesh.vertices[0].color;
        let light_first = mesh.indices[mesh.ranges[1].indices.start as usize];
        let light = mesh.vertices[light_first as usize].color;
        assert!(heavy[1] < light[1]);
    }
}
