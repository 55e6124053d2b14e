/// Upper bound on any acceptance weight.
pub const MAX_WEIGHT: f64 = 512.0;

const MIN_SPAN: f64 = 1e-6;

/// Intensity-to-acceptance-weight lookup for one parameter set.
///
/// For `i > black`: `z = (i - black) / (white - black)`, shaped as `z^(2^curve)`, then mapped to
/// `boost + (255 - boost) * z` and clamped to `[0, 512]`. Intensities at or below `black` weigh 0.
#[derive(Clone, Debug)]
pub struct WeightTable {
    weights: [f64; 256],
}

impl WeightTable {
    /// Precompute the weight of every intensity.
    pub fn new(black: u8, white: u8, boost: f64, curve: f64) -> Self {
        let span = (f64::from(white) - f64::from(black)).max(MIN_SPAN);
        let exponent = curve.exp2();
        // Above 255 the affine map would run backwards and break monotonicity.
        let boost = boost.min(255.0);

        let mut weights = [0.0; 256];
        for (i, w) in weights.iter_mut().enumerate() {
            if i <= usize::from(black) {
                continue;
            }
            let z = (i as f64 - f64::from(black)) / span;
            let z = z.powf(exponent);
            *w = (boost + (255.0 - boost) * z).clamp(0.0, MAX_WEIGHT);
        }
        Self { weights }
    }

    /// Acceptance weight of `intensity`.
    pub fn weight(&self, intensity: u8) -> f64 {
        self.weights[usize::from(intensity)]
    }

    /// All 256 weights, indexed by intensity.
    pub fn as_slice(&self) -> &[f64; 256] {
        &self.weights
    }
}

#[cfg(test)]
#[path = "../../tests/unit/select/weights.rs"]
mod tests;
