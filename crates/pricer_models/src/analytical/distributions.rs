//! Standard normal cumulative distribution function.
//!
//! `Φ(x) = ½·erfc(−x/√2)`, with erfc from Abramowitz and Stegun 7.1.26
//! (absolute error below 1.5e-7). The reflection `erfc(−y) = 2 − erfc(y)` is
//! applied to the same polynomial value, so for `x ≠ 0` the identity
//! `Φ(x) + Φ(−x) = 1` holds up to rounding. Put-call parity of the
//! Black-Scholes prices relies on it.

use num_traits::Float;

const SQRT_2: f64 = std::f64::consts::SQRT_2;

// Abramowitz and Stegun 7.1.26
const P: f64 = 0.327_591_1;
const A1: f64 = 0.254_829_592;
const A2: f64 = -0.284_496_736;
const A3: f64 = 1.421_413_741;
const A4: f64 = -1.453_152_027;
const A5: f64 = 1.061_405_429;

#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    let t = one / (one + T::from(P).unwrap() * abs_x);
    let poly = T::from(A1).unwrap()
        + t * (T::from(A2).unwrap()
            + t * (T::from(A3).unwrap()
                + t * (T::from(A4).unwrap() + t * T::from(A5).unwrap())));
    let tail = t * poly * (-abs_x * abs_x).exp();

    if x < T::zero() {
        T::from(2.0).unwrap() - tail
    } else {
        tail
    }
}

/// Standard normal cumulative distribution function `Φ(x) = P(X ≤ x)`.
///
/// Accurate to about 1e-7 for every finite `x`; the result always lies in
/// `[0, 1]`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    T::from(0.5).unwrap() * erfc_approx(-x / T::from(SQRT_2).unwrap())
}
