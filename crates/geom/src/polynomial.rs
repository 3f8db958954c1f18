//! Power-basis polynomials of bézier segments and their real roots.
//!
//! Coefficient arrays are ordered from the highest degree down to the
//! constant term, so `[a, b, c]` is `a * t² + b * t + c`.
//!
//! The conversion functions are generic over the coefficient type: they work
//! on scalars (one coordinate of the control points) as well as on vectors
//! (whole control points converted with `to_vector()`).

use crate::scalar::Scalar;
use crate::Vector;
use arrayvec::ArrayVec;

use core::ops::{Add, Sub};

/// Values that can be used as polynomial coefficients: scalars and vectors.
pub trait Coefficient: Copy + Add<Output = Self> + Sub<Output = Self> {
    type Scalar: Scalar;

    fn scale(self, s: Self::Scalar) -> Self;
}

impl<S: Scalar> Coefficient for S {
    type Scalar = S;

    #[inline]
    fn scale(self, s: S) -> S {
        self * s
    }
}

impl<S: Scalar> Coefficient for Vector<S> {
    type Scalar = S;

    #[inline]
    fn scale(self, s: S) -> Self {
        self * s
    }
}

/// `B(t) = (p2 - p1) * t + p1`
#[inline]
pub fn linear_bezier_coefficients<T: Coefficient>(p1: T, p2: T) -> [T; 2] {
    [p2 - p1, p1]
}

/// `B(t) = (p1 - 2c + p2) * t² + 2(c - p1) * t + p1`
#[inline]
pub fn quadratic_bezier_coefficients<T: Coefficient>(p1: T, c: T, p2: T) -> [T; 3] {
    let two = <T::Scalar as Scalar>::TWO;
    [p1 - c.scale(two) + p2, (c - p1).scale(two), p1]
}

/// `B(t) = (-p1 + 3c1 - 3c2 + p2) * t³ + (3p1 - 6c1 + 3c2) * t² + (-3p1 + 3c1) * t + p1`
#[inline]
pub fn cubic_bezier_coefficients<T: Coefficient>(p1: T, c1: T, c2: T, p2: T) -> [T; 4] {
    let three = <T::Scalar as Scalar>::THREE;
    [
        p2 - p1 + (c1 - c2).scale(three),
        (p1 + c2).scale(three) - c1.scale(<T::Scalar as Scalar>::SIX),
        (c1 - p1).scale(three),
        p1,
    ]
}

/// Evaluate a polynomial at `t` using Horner's scheme.
///
/// The coefficients are ordered from the highest degree to the constant term.
#[inline]
pub fn evaluate<T: Coefficient, const N: usize>(coefficients: &[T; N], t: T::Scalar) -> T {
    let mut result = coefficients[0];
    for &c in &coefficients[1..] {
        result = result.scale(t) + c;
    }

    result
}

/// Real root of `a * t + b = 0`.
///
/// Returns nothing when `a` is zero, which covers both the "no solution" and
/// the "every t is a solution" cases.
pub fn solve_linear<S: Scalar>(a: S, b: S) -> ArrayVec<S, 1> {
    let mut result = ArrayVec::new();
    if a != S::ZERO {
        result.push(-b / a);
    }

    result
}

/// Real roots of `a * t² + b * t + c = 0`.
///
/// Falls back to the linear solution when `a` is zero. A double root is
/// reported once.
pub fn solve_quadratic<S: Scalar>(a: S, b: S, c: S) -> ArrayVec<S, 2> {
    let mut result = ArrayVec::new();

    if a == S::ZERO {
        result.extend(solve_linear(b, c));
        return result;
    }

    let discriminant = b * b - S::FOUR * a * c;
    if discriminant < S::ZERO {
        return result;
    }

    if discriminant == S::ZERO {
        result.push(-b / (S::TWO * a));
        return result;
    }

    // Avoid the cancellation in `-b ± sqrt(discriminant)` by computing the
    // root with the larger magnitude first.
    let sign = if b < S::ZERO { -S::ONE } else { S::ONE };
    let q = -S::HALF * (b + sign * discriminant.sqrt());
    result.push(q / a);
    result.push(c / q);

    result
}

/// Real roots of `a * t³ + b * t² + c * t + d = 0`.
///
/// Falls back to the quadratic solution when `a` is zero. Roots are not
/// sorted and repeated roots may be reported more than once.
pub fn solve_cubic<S: Scalar>(a: S, b: S, c: S, d: S) -> ArrayVec<S, 3> {
    let mut result = ArrayVec::new();

    if a == S::ZERO {
        result.extend(solve_quadratic(b, c, d));
        return result;
    }

    // t = 0 is an exact root, keep it exact.
    if d == S::ZERO {
        result.push(S::ZERO);
        result.extend(solve_quadratic(a, b, c).into_iter().filter(|&t| t != S::ZERO));
        return result;
    }

    // Depressed cubic u³ + p * u + q = 0 with t = u - b / 3a.
    let bn = b / a;
    let cn = c / a;
    let dn = d / a;

    let offset = -bn / S::THREE;
    let p = cn - bn * bn / S::THREE;
    let q = S::TWO * bn * bn * bn / S::TWENTY_SEVEN - bn * cn / S::THREE + dn;

    let half_q = q * S::HALF;
    let third_p = p / S::THREE;
    let discriminant = half_q * half_q + third_p * third_p * third_p;

    if discriminant > S::ZERO {
        let sqrt_discriminant = discriminant.sqrt();
        let u = (-half_q + sqrt_discriminant).cbrt();
        let v = (-half_q - sqrt_discriminant).cbrt();
        result.push(u + v + offset);
    } else if discriminant == S::ZERO {
        if p == S::ZERO {
            result.push(offset);
        } else {
            result.push(S::THREE * q / p + offset);
            result.push(-S::THREE * q / (S::TWO * p) + offset);
        }
    } else {
        // Three distinct real roots, p is negative here.
        let r = S::TWO * (-third_p).sqrt();
        let cos_phi = (S::THREE * q / (S::TWO * p) * (-S::THREE / p).sqrt())
            .max(-S::ONE)
            .min(S::ONE);
        let phi = cos_phi.acos() / S::THREE;
        let step = S::TWO * S::PI() / S::THREE;

        result.push(r * phi.cos() + offset);
        result.push(r * (phi - step).cos() + offset);
        result.push(r * (phi - S::TWO * step).cos() + offset);
    }

    result
}

/// Parameters at which a linear bézier with end values `p1`, `p2` reaches `value`.
#[inline]
pub fn linear_bezier_find_t<S: Scalar>(p1: S, p2: S, value: S) -> ArrayVec<S, 1> {
    let [a, b] = linear_bezier_coefficients(p1, p2);
    solve_linear(a, b - value)
}

/// Parameters at which a quadratic bézier with values `p1`, `c`, `p2` reaches `value`.
#[inline]
pub fn quadratic_bezier_find_t<S: Scalar>(p1: S, c: S, p2: S, value: S) -> ArrayVec<S, 2> {
    let [a, b, k] = quadratic_bezier_coefficients(p1, c, p2);
    solve_quadratic(a, b, k - value)
}

/// Parameters at which a cubic bézier with values `p1`, `c1`, `c2`, `p2` reaches `value`.
#[inline]
pub fn cubic_bezier_find_t<S: Scalar>(p1: S, c1: S, c2: S, p2: S, value: S) -> ArrayVec<S, 3> {
    let [a, b, c, d] = cubic_bezier_coefficients(p1, c1, c2, p2);
    solve_cubic(a, b, c, d - value)
}

#[cfg(test)]
fn assert_roots(mut roots: std::vec::Vec<f64>, expected: &[f64], epsilon: f64) {
    roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(roots.len(), expected.len(), "{:?} != {:?}", roots, expected);
    for (root, expected) in roots.iter().zip(expected) {
        assert!((root - expected).abs() <= epsilon, "{:?} != {:?}", roots, expected);
    }
}

#[test]
fn coefficients_reproduce_end_points() {
    use crate::vector;

    let p1 = vector(1.0f32, 2.0);
    let c1 = vector(3.0, 7.0);
    let c2 = vector(-4.0, 5.0);
    let p2 = vector(8.0, -1.0);

    let linear = linear_bezier_coefficients(p1, p2);
    assert_eq!(evaluate(&linear, 0.0), p1);
    assert_eq!(evaluate(&linear, 1.0), p2);

    let quadratic = quadratic_bezier_coefficients(p1, c1, p2);
    assert_eq!(evaluate(&quadratic, 0.0), p1);
    assert_eq!(evaluate(&quadratic, 1.0), p2);

    let cubic = cubic_bezier_coefficients(p1, c1, c2, p2);
    assert_eq!(evaluate(&cubic, 0.0), p1);
    assert_eq!(evaluate(&cubic, 1.0), p2);
}

#[test]
fn scalar_coefficients() {
    assert_eq!(linear_bezier_coefficients(2.0f32, 5.0), [3.0, 2.0]);
    assert_eq!(quadratic_bezier_coefficients(0.0f32, 10.0, 0.0), [-20.0, 20.0, 0.0]);
    assert_eq!(
        cubic_bezier_coefficients(0.0f32, 1.0, 2.0, 3.0),
        [0.0, 0.0, 3.0, 0.0]
    );
}

#[test]
fn linear_roots() {
    assert_eq!(solve_linear(2.0f32, -4.0).as_slice(), &[2.0]);
    assert!(solve_linear(0.0f32, 1.0).is_empty());
    // Infinitely many solutions are also reported as nothing.
    assert!(solve_linear(0.0f32, 0.0).is_empty());
}

#[test]
fn quadratic_roots() {
    // (t - 1)(t - 3)
    assert_roots(solve_quadratic(1.0, -4.0, 3.0).to_vec(), &[1.0, 3.0], 1e-12);
    // (t + 2)²
    assert_roots(solve_quadratic(1.0, 4.0, 4.0).to_vec(), &[-2.0], 1e-12);
    // t² + 1
    assert!(solve_quadratic(1.0f64, 0.0, 1.0).is_empty());
    // 2t - 1, degenerated.
    assert_roots(solve_quadratic(0.0, 2.0, -1.0).to_vec(), &[0.5], 1e-12);
    // t² - 4t, root at zero with b != 0.
    assert_roots(solve_quadratic(1.0, -4.0, 0.0).to_vec(), &[0.0, 4.0], 1e-12);
}

#[test]
fn cubic_roots() {
    // (t - 1)(t - 2)(t - 3)
    assert_roots(solve_cubic(1.0, -6.0, 11.0, -6.0).to_vec(), &[1.0, 2.0, 3.0], 1e-9);
    // t³ - t² + t - 1 = (t - 1)(t² + 1)
    assert_roots(solve_cubic(-1.0, 1.0, -1.0, 1.0).to_vec(), &[1.0], 1e-9);
    // -2t³ + 2t² - t + 10
    assert_roots(solve_cubic(-2.0, 2.0, -1.0, 10.0).to_vec(), &[2.0], 1e-9);
    // t³
    assert_roots(solve_cubic(1.0, 0.0, 0.0, 0.0).to_vec(), &[0.0], 1e-9);
    // (t - 1)²(t + 2) = t³ - 3t + 2
    assert_roots(solve_cubic(1.0, 0.0, -3.0, 2.0).to_vec(), &[-2.0, 1.0], 1e-9);
    // t(t - 1)(t - 2)
    let roots = solve_cubic(1.0, -3.0, 2.0, 0.0);
    assert!(roots.contains(&0.0));
    assert_roots(roots.to_vec(), &[0.0, 1.0, 2.0], 1e-12);
    // t(t² + 1)
    assert_eq!(solve_cubic(1.0, 0.0, 1.0, 0.0).as_slice(), &[0.0]);
    // t²(t - 1)
    assert_roots(solve_cubic(1.0, -1.0, 0.0, 0.0).to_vec(), &[0.0, 1.0], 1e-12);
    // Degenerated into (t - 1)(t - 3).
    assert_roots(solve_cubic(0.0, 1.0, -4.0, 3.0).to_vec(), &[1.0, 3.0], 1e-12);
}

#[test]
fn cubic_roots_f32() {
    let roots = solve_cubic(2.0f32, -3.0, 1.0, 0.0);
    let roots: std::vec::Vec<f64> = roots.iter().map(|&r| r as f64).collect();
    // 2t³ - 3t² + t = t(2t - 1)(t - 1)
    assert_roots(roots.clone(), &[0.0, 0.5, 1.0], 1e-5);
    assert!(roots.contains(&0.0));
}

#[test]
fn find_t_for_value() {
    assert_eq!(linear_bezier_find_t(0.0f32, 10.0, 5.0).as_slice(), &[0.5]);
    assert!(linear_bezier_find_t(3.0f32, 3.0, 5.0).is_empty());

    let quadratic: std::vec::Vec<f64> = quadratic_bezier_find_t(0.0, 10.0, 0.0, 2.5).to_vec();
    let half_sqrt_2 = 0.5 * core::f64::consts::FRAC_1_SQRT_2;
    assert_roots(quadratic, &[0.5 - half_sqrt_2, 0.5 + half_sqrt_2], 1e-12);

    // A straight cubic with evenly spaced control points is linear in t.
    assert_roots(cubic_bezier_find_t(0.0, 1.0, 2.0, 3.0, 1.5).to_vec(), &[0.5], 1e-12);
}
