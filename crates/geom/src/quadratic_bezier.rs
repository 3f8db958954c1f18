use crate::homogeneous::{affine, HomogeneousPoint};
use crate::polynomial::{
    evaluate, quadratic_bezier_coefficients, quadratic_bezier_find_t, solve_cubic,
};
use crate::scalar::Scalar;
use crate::segment::{AnchorPolicy, BoundingBox, Segment};
use crate::utils::hull_range;
use crate::{point, Box2D, LineSegment, Point, Vector};
use arrayvec::ArrayVec;
use num_traits::NumCast;

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
///
/// or in power basis:
/// ```P(t) = (from - 2 * ctrl + to) * t² + 2 * (ctrl - from) * t + from```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> QuadraticBezierSegment<S> {
    pub fn cast<NewS: NumCast>(self) -> QuadraticBezierSegment<NewS> {
        QuadraticBezierSegment {
            from: self.from.cast(),
            ctrl: self.ctrl.cast(),
            to: self.to.cast(),
        }
    }

    /// Builds a curve out of homogeneous points with a weight of one.
    pub fn from_homogeneous([from, ctrl, to]: [HomogeneousPoint<S>; 3]) -> Self {
        QuadraticBezierSegment {
            from: affine(from),
            ctrl: affine(ctrl),
            to: affine(to),
        }
    }

    /// The power-basis coefficients of the curve, highest degree first.
    #[inline]
    pub fn polynomial(&self) -> [Vector<S>; 3] {
        quadratic_bezier_coefficients(
            self.from.to_vector(),
            self.ctrl.to_vector(),
            self.to.to_vector(),
        )
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        evaluate(&self.polynomial(), t).to_point()
    }

    /// Sample the x coordinate of the curve at t (expecting t between 0 and 1).
    pub fn x(&self, t: S) -> S {
        evaluate(
            &quadratic_bezier_coefficients(self.from.x, self.ctrl.x, self.to.x),
            t,
        )
    }

    /// Sample the y coordinate of the curve at t (expecting t between 0 and 1).
    pub fn y(&self, t: S) -> S {
        evaluate(
            &quadratic_bezier_coefficients(self.from.y, self.ctrl.y, self.to.y),
            t,
        )
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    #[inline]
    fn derivative_coefficients(&self, t: S) -> (S, S, S) {
        (S::TWO * t - S::TWO, -S::FOUR * t + S::TWO, S::TWO * t)
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    ///
    /// The result is not normalized.
    pub fn derivative(&self, t: S) -> Vector<S> {
        let (c0, c1, c2) = self.derivative_coefficients(t);
        self.from.to_vector() * c0 + self.ctrl.to_vector() * c1 + self.to.to_vector() * c2
    }

    /// Sample the x coordinate of the curve's derivative at t (expecting t between 0 and 1).
    pub fn dx(&self, t: S) -> S {
        let (c0, c1, c2) = self.derivative_coefficients(t);
        self.from.x * c0 + self.ctrl.x * c1 + self.to.x * c2
    }

    /// Sample the y coordinate of the curve's derivative at t (expecting t between 0 and 1).
    pub fn dy(&self, t: S) -> S {
        let (c0, c1, c2) = self.derivative_coefficients(t);
        self.from.y * c0 + self.ctrl.y * c1 + self.to.y * c2
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        QuadraticBezierSegment {
            from: self.to,
            ctrl: self.ctrl,
            to: self.from,
        }
    }

    /// All parameters at which the curve's x coordinate is equal to `x`.
    ///
    /// The parameters are not restricted to `[0, 1]`.
    pub fn solve_t_for_x(&self, x: S) -> ArrayVec<S, 2> {
        quadratic_bezier_find_t(self.from.x, self.ctrl.x, self.to.x, x)
    }

    /// All parameters at which the curve's y coordinate is equal to `y`.
    ///
    /// The parameters are not restricted to `[0, 1]`.
    pub fn solve_t_for_y(&self, y: S) -> ArrayVec<S, 2> {
        quadratic_bezier_find_t(self.from.y, self.ctrl.y, self.to.y, y)
    }

    /// The x coordinates at which the curve crosses the horizontal line at `y`.
    ///
    /// Both end points are included. The results follow the order of the
    /// roots and are not sorted.
    pub fn find_x(&self, y: S) -> ArrayVec<S, 2> {
        self.find_x_with(y, AnchorPolicy::ExcludeLineEnd)
    }

    /// Same as `find_x` with an explicit treatment of the end anchor.
    pub fn find_x_with(&self, y: S, policy: AnchorPolicy) -> ArrayVec<S, 2> {
        let mut result = ArrayVec::new();

        let (min, max) = self.fast_bounding_range_y();
        if y < min || y > max {
            return result;
        }

        for t in self.solve_t_for_y(y) {
            if policy.accepts(t, false) {
                result.push(self.x(t));
            }
        }

        result
    }

    /// Ratio between the distance from `from` to `to` and the length of the
    /// control polygon.
    ///
    /// Returns 1.0 when the curve is flat or when both end points are at
    /// the same position, and something smaller otherwise.
    pub fn flatness(&self) -> S {
        let baseline = (self.to - self.from).length();
        if baseline == S::ZERO {
            return S::ONE;
        }

        let polygon = (self.ctrl - self.from).length() + (self.to - self.ctrl).length();

        (baseline / polygon).min(S::ONE)
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: S) -> (QuadraticBezierSegment<S>, QuadraticBezierSegment<S>) {
        let split_point = self.sample(t);

        (
            QuadraticBezierSegment {
                from: self.from,
                ctrl: self.from.lerp(self.ctrl, t),
                to: split_point,
            },
            QuadraticBezierSegment {
                from: split_point,
                ctrl: self.ctrl.lerp(self.to, t),
                to: self.to,
            },
        )
    }

    #[inline]
    pub fn baseline(&self) -> LineSegment<S> {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Parameters at which the normal of the curve goes through `p`.
    ///
    /// The point of the curve closest to `p` is at one of these parameters
    /// or at one of the end points. The parameters are not restricted to
    /// `[0, 1]`.
    pub fn normals_t(&self, p: Point<S>) -> ArrayVec<S, 3> {
        let p = p - self.from;
        let p1 = self.ctrl - self.from;
        let p2 = self.to.to_vector() - self.ctrl.to_vector() * S::TWO + self.from.to_vector();

        let a = p2.dot(p2);
        let b = S::THREE * p1.dot(p2);
        let c = S::TWO * p1.dot(p1) - p2.dot(p);
        let d = -p1.dot(p);

        solve_cubic(a, b, c, d)
    }

    /// The parameter in `[0, 1]` of the point of the curve closest to `p`.
    pub fn closest_t(&self, p: Point<S>) -> S {
        let mut best_t = S::ZERO;
        let mut best_distance = (self.from - p).square_length();

        let end_distance = (self.to - p).square_length();
        if end_distance < best_distance {
            best_t = S::ONE;
            best_distance = end_distance;
        }

        for t in self.normals_t(p) {
            if t <= S::ZERO || t >= S::ONE {
                continue;
            }

            let distance = (self.sample(t) - p).square_length();
            if distance < best_distance {
                best_t = t;
                best_distance = distance;
            }
        }

        best_t
    }

    /// Returns a conservative rectangle that contains the curve.
    pub fn fast_bounding_box(&self) -> Box2D<S> {
        let (min_x, max_x) = self.fast_bounding_range_x();
        let (min_y, max_y) = self.fast_bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    /// Returns a conservative range of x that contains this curve.
    pub fn fast_bounding_range_x(&self) -> (S, S) {
        hull_range([self.from.x, self.ctrl.x, self.to.x])
    }

    /// Returns a conservative range of y that contains this curve.
    pub fn fast_bounding_range_y(&self) -> (S, S) {
        hull_range([self.from.y, self.ctrl.y, self.to.y])
    }

    /// Cast this curve into a `f32` curve.
    pub fn to_f32(&self) -> QuadraticBezierSegment<f32> {
        QuadraticBezierSegment {
            from: self.from.to_f32(),
            ctrl: self.ctrl.to_f32(),
            to: self.to.to_f32(),
        }
    }

    /// Cast this curve into a `f64` curve.
    pub fn to_f64(&self) -> QuadraticBezierSegment<f64> {
        QuadraticBezierSegment {
            from: self.from.to_f64(),
            ctrl: self.ctrl.to_f64(),
            to: self.to.to_f64(),
        }
    }
}

impl<S: Scalar> Segment for QuadraticBezierSegment<S> {
    impl_segment!(S);
}

impl<S: Scalar> BoundingBox for QuadraticBezierSegment<S> {
    type Scalar = S;
    fn fast_bounding_range_x(&self) -> (S, S) {
        self.fast_bounding_range_x()
    }
    fn fast_bounding_range_y(&self) -> (S, S) {
        self.fast_bounding_range_y()
    }
}

#[cfg(test)]
use crate::{fuzzy_eq_f32, fuzzy_eq_point, vector};

#[cfg(test)]
fn arch() -> QuadraticBezierSegment<f32> {
    QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(5.0, 10.0),
        to: point(10.0, 0.0),
    }
}

#[cfg(test)]
fn sorted(values: &[f32]) -> std::vec::Vec<f32> {
    let mut values = values.to_vec();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    values
}

#[test]
fn end_points() {
    let curve = QuadraticBezierSegment {
        from: point(1.0f32, -3.0),
        ctrl: point(7.0, 12.0),
        to: point(-4.0, 2.0),
    };

    assert_eq!(curve.sample(0.0), curve.from);
    assert_eq!(curve.sample(1.0), curve.to);
    assert_eq!(arch().sample(0.5), point(5.0, 5.0));
}

#[test]
fn sample_matches_bernstein_form() {
    let curve = QuadraticBezierSegment {
        from: point(1.0f32, -3.0),
        ctrl: point(7.0, 12.0),
        to: point(-4.0, 2.0),
    };

    for i in 0..=10 {
        let t = i as f32 / 10.0;
        let one_t = 1.0 - t;
        let expected = point(
            curve.from.x * one_t * one_t + 2.0 * curve.ctrl.x * one_t * t + curve.to.x * t * t,
            curve.from.y * one_t * one_t + 2.0 * curve.ctrl.y * one_t * t + curve.to.y * t * t,
        );
        assert!(fuzzy_eq_point(curve.sample(t), expected, 0.0001));
        assert!(fuzzy_eq_f32(curve.x(t), expected.x, 0.0001));
        assert!(fuzzy_eq_f32(curve.y(t), expected.y, 0.0001));
    }
}

#[test]
fn tangent() {
    let curve = arch();

    assert_eq!(curve.derivative(0.0), vector(10.0, 20.0));
    assert_eq!(curve.derivative(0.5), vector(10.0, 0.0));
    assert_eq!(curve.derivative(1.0), vector(10.0, -20.0));
    assert_eq!(curve.dx(0.25), 10.0);
    assert_eq!(curve.dy(0.25), 10.0);
}

#[test]
fn find_x_at_the_top() {
    // The scanline touches the top of the arch.
    assert_eq!(arch().find_x(5.0).as_slice(), &[5.0]);
}

#[test]
fn find_x_crossing_twice() {
    let x = sorted(&arch().find_x(2.5));
    let offset = 5.0 * core::f32::consts::FRAC_1_SQRT_2;

    assert_eq!(x.len(), 2);
    assert!(fuzzy_eq_f32(x[0], 5.0 - offset, 0.0001));
    assert!(fuzzy_eq_f32(x[1], 5.0 + offset, 0.0001));
}

#[test]
fn find_x_outside() {
    // Above the control hull, rejected early.
    assert!(arch().find_x(11.0).is_empty());
    assert!(arch().find_x(-1.0).is_empty());
    // Inside the control hull but above the curve.
    assert!(arch().find_x(7.0).is_empty());
}

#[test]
fn find_x_includes_both_anchors() {
    // Curves keep the end anchor, unlike line segments.
    assert_eq!(sorted(&arch().find_x(0.0)), &[0.0, 10.0]);
    assert_eq!(
        sorted(&arch().find_x_with(0.0, AnchorPolicy::IncludeEnd)),
        &[0.0, 10.0]
    );
    assert_eq!(arch().find_x_with(0.0, AnchorPolicy::ExcludeEnd).as_slice(), &[0.0]);
}

#[test]
fn solve_t_is_not_filtered() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(5.0, 0.0),
        to: point(10.0, 0.0),
    };

    assert_eq!(curve.solve_t_for_x(20.0).as_slice(), &[2.0]);
    assert!(curve.solve_t_for_y(1.0).is_empty());
}

#[test]
fn flatness() {
    let flat = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(5.0, 0.0),
        to: point(10.0, 0.0),
    };
    assert_eq!(flat.flatness(), 1.0);

    let f = arch().flatness();
    assert!(fuzzy_eq_f32(f, 10.0 / (2.0 * 125.0f32.sqrt()), 0.00001));
    assert!(f > 0.0 && f < 1.0);

    // A control point going backwards along the baseline isn't flat.
    let reversing = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(-5.0, 0.0),
        to: point(10.0, 0.0),
    };
    assert!(reversing.flatness() < 1.0);

    // Coincident anchors.
    let loop_curve = QuadraticBezierSegment {
        from: point(3.0f32, 3.0),
        ctrl: point(5.0, 8.0),
        to: point(3.0, 3.0),
    };
    assert_eq!(loop_curve.flatness(), 1.0);
}

#[test]
fn flatness_of_collinear_control_points() {
    // Rounding can make the baseline a bit longer than the control polygon.
    for i in 1..40 {
        for j in 1..40 {
            let k = i as f32 * 0.37;
            let d = j as f32 * 0.53;
            let curve = QuadraticBezierSegment {
                from: point(0.0f32, 0.0),
                ctrl: point(k, 0.7 * k),
                to: point(k + d, 0.7 * (k + d)),
            };
            let f = curve.flatness();
            assert!(f <= 1.0, "{:?} {}", curve, f);
            assert!(fuzzy_eq_f32(f, 1.0, 0.0001));
        }
    }
}

#[test]
fn split_increases_flatness() {
    let (a, b) = arch().split(0.5);

    assert_eq!(a.from, point(0.0, 0.0));
    assert_eq!(a.ctrl, point(2.5, 5.0));
    assert_eq!(a.to, point(5.0, 5.0));
    assert_eq!(b.from, point(5.0, 5.0));
    assert_eq!(b.ctrl, point(7.5, 5.0));
    assert_eq!(b.to, point(10.0, 0.0));

    assert!(a.flatness() > arch().flatness());
    assert!(b.flatness() > arch().flatness());
}

#[test]
fn closest_point() {
    let curve = arch();

    let candidates = curve.normals_t(point(5.0, 10.0));
    assert!(candidates.iter().any(|&t| fuzzy_eq_f32(t, 0.5, 0.0001)));
    assert!(fuzzy_eq_f32(curve.closest_t(point(5.0, 10.0)), 0.5, 0.0001));

    // Beyond the end points.
    assert_eq!(curve.closest_t(point(-3.0, -1.0)), 0.0);
    assert_eq!(curve.closest_t(point(13.0, -1.0)), 1.0);
}

#[test]
fn fast_bounding_box_for_quadratic_bezier_segment() {
    let expected_aabb = Box2D {
        min: point(0.0, 0.0),
        max: point(10.0, 10.0),
    };

    assert_eq!(arch().fast_bounding_box(), expected_aabb);
}

#[test]
fn from_homogeneous_points() {
    let curve = QuadraticBezierSegment::from_homogeneous([
        HomogeneousPoint::new(0.0f32, 0.0, 0.0, 1.0),
        HomogeneousPoint::new(5.0, 10.0, 0.0, 1.0),
        HomogeneousPoint::new(10.0, 0.0, 0.0, 1.0),
    ]);

    assert_eq!(curve, arch());
}
