use crate::homogeneous::{affine, HomogeneousPoint};
use crate::polynomial::{evaluate, linear_bezier_coefficients, linear_bezier_find_t};
use crate::scalar::Scalar;
use crate::segment::{AnchorPolicy, BoundingBox, Segment};
use crate::utils::min_max;
use crate::{point, vector, Box2D, Point, Vector};
use arrayvec::ArrayVec;
use num_traits::NumCast;

/// A linear segment.
///
/// The segment is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (to - from) * t + from```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment<S> {
    pub from: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> LineSegment<S> {
    pub fn cast<NewS: NumCast>(self) -> LineSegment<NewS> {
        LineSegment {
            from: self.from.cast(),
            to: self.to.cast(),
        }
    }

    /// Builds a segment out of homogeneous points with a weight of one.
    pub fn from_homogeneous([from, to]: [HomogeneousPoint<S>; 2]) -> Self {
        LineSegment {
            from: affine(from),
            to: affine(to),
        }
    }

    /// The power-basis coefficients of the segment, highest degree first.
    #[inline]
    pub fn polynomial(&self) -> [Vector<S>; 2] {
        linear_bezier_coefficients(self.from.to_vector(), self.to.to_vector())
    }

    /// Sample the segment at t.
    ///
    /// Values of t outside of `[0, 1]` extrapolate along the line.
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        evaluate(&self.polynomial(), t).to_point()
    }

    /// Sample the x coordinate of the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn x(&self, t: S) -> S {
        evaluate(&linear_bezier_coefficients(self.from.x, self.to.x), t)
    }

    /// Sample the y coordinate of the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn y(&self, t: S) -> S {
        evaluate(&linear_bezier_coefficients(self.from.y, self.to.y), t)
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    /// The derivative, which is the same everywhere on the segment.
    #[inline]
    pub fn derivative(&self, _t: S) -> Vector<S> {
        self.to_vector()
    }

    #[inline]
    pub fn dx(&self, _t: S) -> S {
        self.to.x - self.from.x
    }

    #[inline]
    pub fn dy(&self, _t: S) -> S {
        self.to.y - self.from.y
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        LineSegment {
            from: self.to,
            to: self.from,
        }
    }

    /// Parameter at which the segment's x coordinate is equal to `x`.
    ///
    /// Returns nothing for a vertical segment.
    pub fn solve_t_for_x(&self, x: S) -> ArrayVec<S, 1> {
        linear_bezier_find_t(self.from.x, self.to.x, x)
    }

    /// Parameter at which the segment's y coordinate is equal to `y`.
    ///
    /// Returns nothing for a horizontal segment.
    pub fn solve_t_for_y(&self, y: S) -> ArrayVec<S, 1> {
        linear_bezier_find_t(self.from.y, self.to.y, y)
    }

    /// The x coordinate at which the segment crosses the horizontal line at `y`.
    ///
    /// The end point is excluded so that a scanline going through the anchor
    /// shared by two consecutive segments of a contour is only counted once.
    pub fn find_x(&self, y: S) -> ArrayVec<S, 1> {
        self.find_x_with(y, AnchorPolicy::ExcludeLineEnd)
    }

    /// Same as `find_x` with an explicit treatment of the end anchor.
    pub fn find_x_with(&self, y: S, policy: AnchorPolicy) -> ArrayVec<S, 1> {
        let mut result = ArrayVec::new();

        let (min, max) = self.fast_bounding_range_y();
        if y < min || y > max {
            return result;
        }

        for t in self.solve_t_for_y(y) {
            if policy.accepts(t, true) {
                result.push(self.x(t));
            }
        }

        result
    }

    /// A straight segment is perfectly flat.
    #[inline]
    pub fn flatness(&self) -> S {
        S::ONE
    }

    /// Returns a segment parallel to this one, offset by `distance`.
    ///
    /// The offset goes along the segment's direction rotated by 90 degrees
    /// counter-clockwise in a y-up coordinate system, a negative distance
    /// goes the other way. The normal is undefined for a zero-length segment,
    /// which produces NaN coordinates.
    pub fn parallel(&self, distance: S) -> Self {
        let v = self.to_vector();
        let offset = vector(-v.y, v.x).normalize() * distance;

        LineSegment {
            from: self.from + offset,
            to: self.to + offset,
        }
    }

    /// Computes the intersection (if any) between this segment and another one.
    ///
    /// The result is provided in the form of the `t` parameter of each
    /// segment. To get the intersection point, sample one of the segments
    /// at the corresponding value.
    ///
    /// Parallel segments never intersect, overlapping colinear segments
    /// included. The parallel test is an exact comparison.
    pub fn intersection_t(&self, other: &Self) -> Option<(S, S)> {
        let (t, u) = self.extrapolated_intersection_tu(other)?;

        if t < S::ZERO || t > S::ONE || u < S::ZERO || u > S::ONE {
            // The lines intersect outside of one or both of the segments.
            return None;
        }

        Some((t, u))
    }

    /// The intersection point between this segment and another one.
    #[inline]
    pub fn intersection_point(&self, other: &Self) -> Option<Point<S>> {
        self.intersection_t(other).map(|(t, _)| self.sample(t))
    }

    /// The parameter on this segment where the infinite lines supporting both
    /// segments intersect.
    pub fn extrapolated_intersection_t(&self, other: &Self) -> Option<S> {
        self.extrapolated_intersection_tu(other).map(|(t, _)| t)
    }

    /// The intersection point between the infinite lines supporting this
    /// segment and another one.
    #[inline]
    pub fn extrapolated_intersection_point(&self, other: &Self) -> Option<Point<S>> {
        self.extrapolated_intersection_t(other).map(|t| self.sample(t))
    }

    // Solves self.from + t * r == other.from + u * s.
    fn extrapolated_intersection_tu(&self, other: &Self) -> Option<(S, S)> {
        let r = self.to_vector();
        let s = other.to_vector();

        let r_cross_s = r.cross(s);
        if r_cross_s == S::ZERO {
            return None;
        }

        let q_minus_p = other.from - self.from;
        let t = q_minus_p.cross(s) / r_cross_s;
        let u = q_minus_p.cross(r) / r_cross_s;

        Some((t, u))
    }

    /// The parameter of the point of the supporting line that is the closest
    /// to `p`, which is where the normal of the line goes through `p`.
    ///
    /// Returns nothing for a zero-length segment.
    pub fn normal_t(&self, p: Point<S>) -> ArrayVec<S, 1> {
        let mut result = ArrayVec::new();

        let v = self.to_vector();
        let below = v.dot(v);
        if below == S::ZERO {
            return result;
        }

        result.push((p - self.from).dot(v) / below);

        result
    }

    /// The parameter in `[0, 1]` of the point of the segment closest to `p`.
    pub fn closest_t(&self, p: Point<S>) -> S {
        match self.normal_t(p).first() {
            Some(&t) => t.max(S::ZERO).min(S::ONE),
            None => S::ZERO,
        }
    }

    #[inline]
    pub fn to_vector(&self) -> Vector<S> {
        self.to - self.from
    }

    /// Computes the length of this segment.
    #[inline]
    pub fn length(&self) -> S {
        self.to_vector().length()
    }

    /// Computes the squared length of this segment.
    #[inline]
    pub fn square_length(&self) -> S {
        self.to_vector().square_length()
    }

    /// Return the minimum bounding rectangle
    #[inline]
    pub fn bounding_box(&self) -> Box2D<S> {
        let (min_x, max_x) = self.fast_bounding_range_x();
        let (min_y, max_y) = self.fast_bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    #[inline]
    pub fn fast_bounding_range_x(&self) -> (S, S) {
        min_max(self.from.x, self.to.x)
    }

    #[inline]
    pub fn fast_bounding_range_y(&self) -> (S, S) {
        min_max(self.from.y, self.to.y)
    }

    #[inline]
    pub fn to_f32(&self) -> LineSegment<f32> {
        LineSegment {
            from: self.from.to_f32(),
            to: self.to.to_f32(),
        }
    }

    #[inline]
    pub fn to_f64(&self) -> LineSegment<f64> {
        LineSegment {
            from: self.from.to_f64(),
            to: self.to.to_f64(),
        }
    }
}

impl<S: Scalar> Segment for LineSegment<S> {
    impl_segment!(S);
}

impl<S: Scalar> BoundingBox for LineSegment<S> {
    type Scalar = S;
    fn fast_bounding_range_x(&self) -> (S, S) {
        self.fast_bounding_range_x()
    }
    fn fast_bounding_range_y(&self) -> (S, S) {
        self.fast_bounding_range_y()
    }
}

#[cfg(test)]
use crate::fuzzy_eq_point;

#[test]
fn end_points() {
    let l = LineSegment {
        from: point(1.0f32, 2.0),
        to: point(-7.0, 12.5),
    };

    assert_eq!(l.sample(0.0), l.from);
    assert_eq!(l.sample(1.0), l.to);
    assert_eq!(l.sample(0.5), point(-3.0, 7.25));
    // Extrapolation.
    assert_eq!(l.sample(2.0), point(-15.0, 23.0));
}

#[test]
fn constant_derivative() {
    let l = LineSegment {
        from: point(1.0f32, 2.0),
        to: point(4.0, -2.0),
    };

    for &t in &[0.0, 0.25, 1.0, 3.0] {
        assert_eq!(l.derivative(t), vector(3.0, -4.0));
    }
}

#[test]
fn find_x_diagonal() {
    let l = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(10.0, 10.0),
    };

    assert_eq!(l.find_x(5.0).as_slice(), &[5.0]);
    assert_eq!(l.find_x(0.0).as_slice(), &[0.0]);
    assert!(l.find_x(-1.0).is_empty());
    assert!(l.find_x(11.0).is_empty());
}

#[test]
fn find_x_excludes_end_anchor() {
    let l = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(10.0, 10.0),
    };

    assert!(l.find_x(10.0).is_empty());
    assert_eq!(l.find_x_with(10.0, AnchorPolicy::IncludeEnd).as_slice(), &[10.0]);

    // Going down.
    let l = l.flip();
    assert_eq!(l.find_x(10.0).as_slice(), &[10.0]);
    assert!(l.find_x(0.0).is_empty());
}

#[test]
fn find_x_horizontal() {
    // A horizontal segment has either no solution or infinitely many,
    // neither of which produce a scanline crossing.
    let l = LineSegment {
        from: point(0.0f32, 3.0),
        to: point(10.0, 3.0),
    };

    assert!(l.find_x(3.0).is_empty());
    assert!(l.solve_t_for_y(3.0).is_empty());
}

#[test]
fn solve_t() {
    let l = LineSegment {
        from: point(2.0f32, 0.0),
        to: point(6.0, 8.0),
    };

    // Unlike find_x, no filtering on the parameter range.
    assert_eq!(l.solve_t_for_x(4.0).as_slice(), &[0.5]);
    assert_eq!(l.solve_t_for_x(10.0).as_slice(), &[2.0]);
    assert_eq!(l.solve_t_for_y(-8.0).as_slice(), &[-1.0]);
}

#[test]
fn flatness_of_a_line() {
    let l = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(0.0, 0.0),
    };

    assert_eq!(l.flatness(), 1.0);
}

#[test]
fn parallel_line() {
    let l = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(10.0, 0.0),
    };

    assert_eq!(
        l.parallel(2.0),
        LineSegment {
            from: point(0.0, 2.0),
            to: point(10.0, 2.0),
        }
    );
    assert_eq!(
        l.parallel(-2.0),
        LineSegment {
            from: point(0.0, -2.0),
            to: point(10.0, -2.0),
        }
    );
}

#[test]
fn parallel_line_round_trip() {
    let segments = [
        LineSegment {
            from: point(1.0f32, 2.0),
            to: point(4.0, 6.0),
        },
        LineSegment {
            from: point(-3.0, 7.0),
            to: point(-3.0, -1.0),
        },
        LineSegment {
            from: point(100.0, 0.5),
            to: point(0.0, 20.0),
        },
    ];

    for segment in &segments {
        for &d in &[0.5, 3.0, -7.25] {
            let back = segment.parallel(d).parallel(-d);
            assert!(fuzzy_eq_point(back.from, segment.from, 0.0001));
            assert!(fuzzy_eq_point(back.to, segment.to, 0.0001));
        }
    }
}

#[test]
fn intersection_crossing() {
    let a = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(10.0, 10.0),
    };
    let b = LineSegment {
        from: point(0.0, 10.0),
        to: point(10.0, 0.0),
    };

    assert_eq!(a.intersection_t(&b), Some((0.5, 0.5)));
    assert_eq!(a.intersection_point(&b), Some(point(5.0, 5.0)));
    assert_eq!(a.extrapolated_intersection_point(&b), Some(point(5.0, 5.0)));
}

#[test]
fn intersection_outside_of_segments() {
    let a = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(1.0, 1.0),
    };
    let b = LineSegment {
        from: point(0.0, 10.0),
        to: point(10.0, 0.0),
    };

    assert_eq!(a.intersection_point(&b), None);
    assert_eq!(a.extrapolated_intersection_t(&b), Some(5.0));
    assert_eq!(a.extrapolated_intersection_point(&b), Some(point(5.0, 5.0)));

    // Only the other segment is too short.
    let c = LineSegment {
        from: point(0.0, 10.0),
        to: point(1.0, 9.0),
    };
    let d = LineSegment {
        from: point(0.0, 0.0),
        to: point(10.0, 10.0),
    };
    assert_eq!(d.intersection_point(&c), None);
}

#[test]
fn intersection_touching() {
    // Unlike a strict test, touching end points count as an intersection.
    let a = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(10.0, 10.0),
    };
    let b = LineSegment {
        from: point(10.0, 10.0),
        to: point(10.0, 0.0),
    };

    assert_eq!(a.intersection_point(&b), Some(point(10.0, 10.0)));
}

#[test]
fn intersection_parallel() {
    let a = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(10.0, 0.0),
    };
    let b = LineSegment {
        from: point(0.0, 5.0),
        to: point(10.0, 5.0),
    };

    assert_eq!(a.intersection_point(&b), None);
    assert_eq!(a.extrapolated_intersection_point(&b), None);

    // Overlapping colinear segments are treated as parallel.
    let c = LineSegment {
        from: point(5.0, 0.0),
        to: point(15.0, 0.0),
    };
    assert_eq!(a.intersection_point(&c), None);
    assert_eq!(a.extrapolated_intersection_point(&c), None);
}

#[test]
fn closest_point_on_line() {
    let l = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(10.0, 0.0),
    };

    assert_eq!(l.normal_t(point(5.0, 3.0)).as_slice(), &[0.5]);
    assert_eq!(l.normal_t(point(-5.0, 3.0)).as_slice(), &[-0.5]);
    assert_eq!(l.closest_t(point(-5.0, 3.0)), 0.0);
    assert_eq!(l.closest_t(point(15.0, -3.0)), 1.0);

    let degenerate = LineSegment {
        from: point(1.0f32, 1.0),
        to: point(1.0, 1.0),
    };
    assert!(degenerate.normal_t(point(5.0, 3.0)).is_empty());
    assert_eq!(degenerate.closest_t(point(5.0, 3.0)), 0.0);
}

#[test]
fn from_homogeneous_points() {
    let l = LineSegment::from_homogeneous([
        HomogeneousPoint::new(1.0f32, 2.0, 0.0, 1.0),
        HomogeneousPoint::new(3.0, 4.0, 0.0, 1.0),
    ]);

    assert_eq!(l.from, point(1.0, 2.0));
    assert_eq!(l.to, point(3.0, 4.0));
    assert_eq!(l.cast::<f64>().to, point(3.0f64, 4.0));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
fn from_homogeneous_points_with_weight() {
    LineSegment::from_homogeneous([
        HomogeneousPoint::new(1.0f32, 2.0, 0.0, 1.0),
        HomogeneousPoint::new(3.0, 4.0, 0.0, 0.5),
    ]);
}
