#![deny(bare_trait_objects)]
#![no_std]

//! Point-level geometry for glyph and vector outline rasterizers.
//!
//! This crate is a thin facade: the kernel lives in [`geom`] and the `f32`
//! aliases most callers want are in [`math`].
//!
//! # Example
//!
//! ```
//! use glyph_curves::geom::{AnchorPolicy, QuadraticBezierSegment, Segment};
//! use glyph_curves::math::point;
//!
//! let curve = QuadraticBezierSegment {
//!     from: point(0.0, 0.0),
//!     ctrl: point(5.0, 10.0),
//!     to: point(10.0, 0.0),
//! };
//!
//! // The scanline at y = 5 touches the top of the arch.
//! assert_eq!(curve.find_x(5.0).as_slice(), &[5.0]);
//!
//! // Only the start anchor is reported.
//! assert_eq!(curve.find_x_with(0.0, AnchorPolicy::ExcludeEnd).as_slice(), &[0.0]);
//! ```

pub extern crate glyph_curves_geom;

pub use glyph_curves_geom as geom;

pub mod math {
    //! f32 version of the geometry types used by the kernel.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f32>```.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for ```euclid::default::Vector2D<f32>```.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Alias for ```euclid::default::Box2D<f32>```.
    pub type Box2D = euclid::default::Box2D<f32>;

    /// Alias for ```euclid::HomogeneousVector<f32, euclid::UnknownUnit>```.
    pub type HomogeneousPoint = crate::geom::HomogeneousPoint<f32>;

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }
}
