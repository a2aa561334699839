//! Sequential color scale for bin weights.
//!
//! Weights map through a square-root scale onto `[0, 1]`, which then
//! samples the 9-class YlOrRd ramp with uniform B-spline interpolation
//! between the class colors.

/// The 9-class YlOrRd ramp, light yellow to dark red.
const YL_OR_RD: [u32; 9] = [
    0xffffcc, 0xffeda0, 0xfed976, 0xfeb24c, 0xfd8d3c, 0xfc4e2a, 0xe31a1c,
    0xbd0026, 0x800026,
];

/// Square-root sequential scale from a weight domain into a color ramp.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightColorScale {
    sqrt_min: f64,
    sqrt_max: f64,
    stops: Vec<[f64; 3]>,
}

impl WeightColorScale {
    /// YlOrRd scale over `[domain_min, domain_max]`.
    #[must_use]
    pub fn yl_or_rd(domain_min: f64, domain_max: f64) -> Self {
        Self {
            sqrt_min: signed_sqrt(domain_min),
            sqrt_max: signed_sqrt(domain_max),
            stops: YL_OR_RD
                .iter()
                .map(|&hex| {
                    [
                        f64::from((hex >> 16) & 0xff) / 255.0,
                        f64::from((hex >> 8) & 0xff) / 255.0,
                        f64::from(hex & 0xff) / 255.0,
                    ]
                })
                .collect(),
        }
    }

    /// Position of `weight` along the ramp, clamped to `[0, 1]`.
    ///
    /// A degenerate domain maps everything to 0.5.
    #[must_use]
    pub fn normalize(&self, weight: f64) -> f64 {
        let span = self.sqrt_max - self.sqrt_min;
        if span == 0.0 || !span.is_finite() {
            return 0.5;
        }
        let t = (signed_sqrt(weight) - self.sqrt_min) / span;
        if t.is_nan() {
            return 0.0;
        }
        t.clamp(0.0, 1.0)
    }

    /// sRGB color (channels in `[0, 1]`) for a ramp position.
    #[must_use]
    pub fn sample(&self, t: f64) -> [f32; 3] {
        let n = self.stops.len() - 1;
        let t = t.clamp(0.0, 1.0);
        let i = if t >= 1.0 { n - 1 } else { (t * n as f64).floor() as usize };
        let local = (t - i as f64 / n as f64) * n as f64;

        let v1 = self.stops[i];
        let v2 = self.stops[i + 1];
        let v0 = if i > 0 {
            self.stops[i - 1]
        } else {
            std::array::from_fn(|c| 2.0 * v1[c] - v2[c])
        };
        let v3 = if i < n - 1 {
            self.stops[i + 2]
        } else {
            std::array::from_fn(|c| 2.0 * v2[c] - v1[c])
        };

        std::array::from_fn(|c| {
            basis(local, v0[c], v1[c], v2[c], v3[c]).clamp(0.0, 1.0) as f32
        })
    }

    /// sRGB color for a summed bin weight.
    #[must_use]
    pub fn color(&self, weight: f64) -> [f32; 3] {
        self.sample(self.normalize(weight))
    }
}

/// Square root that keeps the sign, so negative weights order correctly.
fn signed_sqrt(x: f64) -> f64 {
    if x < 0.0 {
        -(-x).sqrt()
    } else {
        x.sqrt()
    }
}

/// Uniform cubic B-spline basis.
fn basis(t1: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}
