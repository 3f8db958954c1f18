//! Entry point for outline data stored as homogeneous coordinates.
//!
//! The kernel's geometry is affine: a homogeneous point is only meaningful
//! here if its weight `w` is exactly one. Passing anything else is a bug in
//! the caller, so [`affine`] treats it as a precondition and never tries to
//! fix the point up by dividing by `w`.

use crate::scalar::{cast, Scalar};
use crate::{point, Point};

use thiserror::Error;

/// Alias for `euclid::HomogeneousVector` in the default unit.
pub type HomogeneousPoint<S> = euclid::HomogeneousVector<S, euclid::UnknownUnit>;

/// A homogeneous point did not have a weight of one.
#[derive(Error, Copy, Clone, Debug, PartialEq)]
#[error("expected a point with a homogeneous weight of 1, got {weight}")]
pub struct WeightError {
    pub weight: f64,
}

/// Converts a homogeneous point with a weight of one into an affine point.
///
/// The weight is checked with a debug assertion: release builds skip the
/// check and ignore `w`.
#[inline]
pub fn affine<S: Scalar>(p: HomogeneousPoint<S>) -> Point<S> {
    debug_assert!(
        p.w == S::ONE,
        "expected a point with a homogeneous weight of 1, got {:?}",
        p.w
    );

    point(p.x, p.y)
}

/// Same as `affine` but reports a wrong weight as an error.
pub fn try_affine<S: Scalar>(p: HomogeneousPoint<S>) -> Result<Point<S>, WeightError> {
    if p.w != S::ONE {
        return Err(WeightError {
            weight: cast(p.w).unwrap_or(f64::NAN),
        });
    }

    Ok(point(p.x, p.y))
}

/// Converts an affine point into a homogeneous point with a weight of one.
#[inline]
pub fn homogeneous<S: Scalar>(p: Point<S>) -> HomogeneousPoint<S> {
    HomogeneousPoint::new(p.x, p.y, S::ZERO, S::ONE)
}

#[test]
fn affine_round_trip() {
    let p = point(3.0f32, -2.5);
    let h = homogeneous(p);
    assert_eq!(h.w, 1.0);
    assert_eq!(affine(h), p);
    assert_eq!(try_affine(h), Ok(p));
}

#[test]
fn try_affine_rejects_other_weights() {
    let h = HomogeneousPoint::new(4.0f32, 2.0, 0.0, 2.0);
    assert_eq!(try_affine(h), Err(WeightError { weight: 2.0 }));

    let h = HomogeneousPoint::new(4.0f64, 2.0, 0.0, 0.0);
    assert_eq!(try_affine(h), Err(WeightError { weight: 0.0 }));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
fn affine_asserts_unit_weight() {
    affine(HomogeneousPoint::new(4.0f32, 2.0, 0.0, 2.0));
}
