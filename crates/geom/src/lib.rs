#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::let_and_return)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Bézier curve kernel for outline rasterization, on top of euclid.
//!
//! This crate is reexported in `glyph_curves`.
//!
//! # Overview.
//!
//! The kernel answers point-level geometric queries about individual curve
//! segments of a glyph or vector outline:
//!
//! - conversion of linear, quadratic and cubic bézier segments into
//!   power-basis polynomials, and closed-form real roots of those
//!   polynomials (see the [`polynomial`] module),
//! - position and tangent at a parameter `t`,
//! - parameters at which a coordinate reaches a given value,
//! - scanline queries: the `x` positions where a segment crosses a
//!   horizontal line, used to build fill spans,
//! - flatness of a segment, used to decide whether to subdivide further,
//! - offset (parallel) lines and line/line intersections, bounded or
//!   extrapolated.
//!
//! Everything operates on small `Copy` values. Nothing allocates: root sets
//! are returned in fixed-capacity `ArrayVec`s whose capacity is the degree
//! of the polynomial.
//!
//! # Points and weights
//!
//! Outline data coming from a projective pipeline is often stored as
//! homogeneous points `(x, y, z, w)`. The kernel only deals with affine
//! geometry, so such points must have a weight of exactly one. [`affine`]
//! checks this in debug builds, [`try_affine`] reports it as an error.
//!
//! # Scanlines and anchors
//!
//! In a closed contour the end anchor of a segment is the start anchor of
//! the next one. See [`AnchorPolicy`] for how scanline queries treat a
//! crossing that lands exactly on an anchor.

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

#[macro_use]
mod segment;
pub mod cubic_bezier;
pub mod homogeneous;
mod line;
pub mod polynomial;
pub mod quadratic_bezier;
pub mod utils;

#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::homogeneous::{affine, homogeneous, try_affine, HomogeneousPoint, WeightError};
#[doc(inline)]
pub use crate::line::LineSegment;
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;
#[doc(inline)]
pub use crate::segment::{AnchorPolicy, BezierSegment, BoundingBox, Segment};

pub use crate::scalar::Scalar;

mod scalar {
    pub(crate) use num_traits::cast::cast;
    pub(crate) use num_traits::{Float, FloatConst, NumCast};

    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

    pub trait Scalar:
        Float
        + NumCast
        + FloatConst
        + Sized
        + Display
        + Debug
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
    {
        const HALF: Self;
        const ZERO: Self;
        const ONE: Self;
        const TWO: Self;
        const THREE: Self;
        const FOUR: Self;
        const SIX: Self;
        const NINE: Self;
        const TWENTY_SEVEN: Self;

        fn value(v: f32) -> Self;
    }

    impl Scalar for f32 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
        const FOUR: Self = 4.0;
        const SIX: Self = 6.0;
        const NINE: Self = 9.0;
        const TWENTY_SEVEN: Self = 27.0;

        #[inline]
        fn value(v: f32) -> Self {
            v
        }
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
        const FOUR: Self = 4.0;
        const SIX: Self = 6.0;
        const NINE: Self = 9.0;
        const TWENTY_SEVEN: Self = 27.0;

        #[inline]
        fn value(v: f32) -> Self {
            v as f64
        }
    }
}

/// Alias for `euclid::default::Point2D`.
pub use euclid::default::Point2D as Point;

/// Alias for `euclid::default::Vector2D`.
pub use euclid::default::Vector2D as Vector;

/// Alias for `euclid::default::Box2D`
pub use euclid::default::Box2D;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector<S>(x: S, y: S) -> Vector<S> {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point<S>(x: S, y: S) -> Point<S> {
    Point::new(x, y)
}

#[cfg(test)]
pub(crate) fn fuzzy_eq_f32(a: f32, b: f32, epsilon: f32) -> bool {
    f32::abs(a - b) <= epsilon
}

#[cfg(test)]
pub(crate) fn fuzzy_eq_point(a: Point<f32>, b: Point<f32>, epsilon: f32) -> bool {
    fuzzy_eq_f32(a.x, b.x, epsilon) && fuzzy_eq_f32(a.y, b.y, epsilon)
}
