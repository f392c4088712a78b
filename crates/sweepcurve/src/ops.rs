//! Fast numeric helpers used by the sampling planner.

use glam::DVec3;

/// Bit offset of the IEEE-754 binary64 exponent field.
const EXPONENT_SHIFT: u32 = 52;

/// Approximate square root by halving the exponent of `d`.
///
/// Works directly on the binary64 representation: subtracting one exponent
/// unit, halving the whole bit pattern and re-biasing yields a value within
/// 12.5% of `d.sqrt()` for positive normal inputs. Exact at even powers of
/// two. Zero maps to a tiny positive value instead of `0.0`.
#[inline]
pub fn sqrt_approx(d: f64) -> f64 {
    let bits = d.to_bits() as i64;
    let approx = ((bits - (1i64 << EXPONENT_SHIFT)) >> 1) + (1i64 << 61);
    f64::from_bits(approx as u64)
}

/// Approximate Euclidean distance between two vectors using [`sqrt_approx`].
#[inline]
pub fn distance_approx(a: DVec3, b: DVec3) -> f64 {
    sqrt_approx(a.distance_squared(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_at_even_powers_of_two() {
        for exp in [-10, -2, 0, 2, 4, 10, 20] {
            let d = 2f64.powi(exp);
            assert_eq!(sqrt_approx(d), d.sqrt());
        }
    }

    #[test]
    fn close_to_sqrt() {
        let mut d = 1e-6;
        while d < 1e9 {
            let rel = (sqrt_approx(d) - d.sqrt()).abs() / d.sqrt();
            assert!(rel < 0.13, "sqrt_approx({d}) off by {rel}");
            d *= 1.37;
        }
    }

    #[test]
    fn zero_is_tiny() {
        let z = sqrt_approx(0.0);
        assert!(z >= 0.0 && z < 1e-150);
    }

    #[test]
    fn distance() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        let b = DVec3::new(1.0, 2.0, 7.0);
        assert_eq!(distance_approx(a, b), 4.0);
    }
}
