use crate::orbit::StateVector;

pub const SYNTHETIC_SAMPLES: usize = 100;
const TIME_STEP: f64 = 0.1;

/// Semi-axes of the sample ellipse (km). The out-of-plane term runs at half rate.
const SEMI_AXES: [f64; 3] = [20000.0, 15000.0, 5000.0];
const SPEED_SCALE: [f64; 3] = [2000.0, 1500.0, 500.0];

/// Deterministic elliptical path used when no trajectory log is available.
pub fn sample_ellipse() -> Vec<StateVector> {
    (0..SYNTHETIC_SAMPLES)
        .map(|k| {
            let t = k as f64 * TIME_STEP;
            let half = t * 0.5;
            StateVector {
                position: [
                    SEMI_AXES[0] * t.cos(),
                    SEMI_AXES[1] * t.sin(),
                    SEMI_AXES[2] * half.sin(),
                ],
                velocity: [
                    -SPEED_SCALE[0] * t.sin(),
                    SPEED_SCALE[1] * t.cos(),
                    SPEED_SCALE[2] * half.cos(),
                ],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_major_axis() {
        let states = sample_ellipse();
        assert_eq!(states.len(), SYNTHETIC_SAMPLES);
        assert_eq!(states[0].to_array(), [20000.0, 0.0, 0.0, 0.0, 1500.0, 500.0]);
    }

    #[test]
    fn is_reproducible() {
        let a: Vec<[u64; 6]> = sample_ellipse()
            .iter()
            .map(|s| s.to_array().map(f64::to_bits))
            .collect();
        let b: Vec<[u64; 6]> = sample_ellipse()
            .iter()
            .map(|s| s.to_array().map(f64::to_bits))
            .collect();
        assert_eq!(a, b);
    }
}
