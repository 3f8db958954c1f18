use crate::homogeneous::{affine, HomogeneousPoint};
use crate::polynomial::{cubic_bezier_coefficients, cubic_bezier_find_t, evaluate};
use crate::scalar::Scalar;
use crate::segment::{AnchorPolicy, BoundingBox, Segment};
use crate::utils::hull_range;
use crate::{point, Box2D, LineSegment, Point, Vector};
use arrayvec::ArrayVec;
use num_traits::NumCast;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> CubicBezierSegment<S> {
    pub fn cast<NewS: NumCast>(self) -> CubicBezierSegment<NewS> {
        CubicBezierSegment {
            from: self.from.cast(),
            ctrl1: self.ctrl1.cast(),
            ctrl2: self.ctrl2.cast(),
            to: self.to.cast(),
        }
    }

    /// Builds a curve out of homogeneous points with a weight of one.
    pub fn from_homogeneous([from, ctrl1, ctrl2, to]: [HomogeneousPoint<S>; 4]) -> Self {
        CubicBezierSegment {
            from: affine(from),
            ctrl1: affine(ctrl1),
            ctrl2: affine(ctrl2),
            to: affine(to),
        }
    }

    /// The power-basis coefficients of the curve, highest degree first.
    #[inline]
    pub fn polynomial(&self) -> [Vector<S>; 4] {
        cubic_bezier_coefficients(
            self.from.to_vector(),
            self.ctrl1.to_vector(),
            self.ctrl2.to_vector(),
            self.to.to_vector(),
        )
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        evaluate(&self.polynomial(), t).to_point()
    }

    /// Sample the x coordinate of the curve at t (expecting t between 0 and 1).
    pub fn x(&self, t: S) -> S {
        let coefficients =
            cubic_bezier_coefficients(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x);
        evaluate(&coefficients, t)
    }

    /// Sample the y coordinate of the curve at t (expecting t between 0 and 1).
    pub fn y(&self, t: S) -> S {
        let coefficients =
            cubic_bezier_coefficients(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y);
        evaluate(&coefficients, t)
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
    fn derivative_coefficients(&self, t: S) -> (S, S, S, S) {
        let t2 = t * t;
        (
            -S::THREE * t2 + S::SIX * t - S::THREE,
            S::NINE * t2 - S::value(12.0) * t + S::THREE,
            -S::NINE * t2 + S::SIX * t,
            S::THREE * t2,
        )
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    ///
    /// The result is not normalized.
    pub fn derivative(&self, t: S) -> Vector<S> {
        let (c0, c1, c2, c3) = self.derivative_coefficients(t);
        self.from.to_vector() * c0
            + self.ctrl1.to_vector() * c1
            + self.ctrl2.to_vector() * c2
            + self.to.to_vector() * c3
    }

    /// Sample the x coordinate of the curve's derivative at t (expecting t between 0 and 1).
    pub fn dx(&self, t: S) -> S {
        let (c0, c1, c2, c3) = self.derivative_coefficients(t);
        self.from.x * c0 + self.ctrl1.x * c1 + self.ctrl2.x * c2 + self.to.x * c3
    }

    /// Sample the y coordinate of the curve's derivative at t (expecting t between 0 and 1).
    pub fn dy(&self, t: S) -> S {
        let (c0, c1, c2, c3) = self.derivative_coefficients(t);
        self.from.y * c0 + self.ctrl1.y * c1 + self.ctrl2.y * c2 + self.to.y * c3
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicBezierSegment {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }

    /// Return the parameter values corresponding to a given x coordinate.
    ///
    /// The parameters are not restricted to `[0, 1]`.
    pub fn solve_t_for_x(&self, x: S) -> ArrayVec<S, 3> {
        cubic_bezier_find_t(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x, x)
    }

    /// Return the parameter values corresponding to a given y coordinate.
    ///
    /// The parameters are not restricted to `[0, 1]`.
    pub fn solve_t_for_y(&self, y: S) -> ArrayVec<S, 3> {
        cubic_bezier_find_t(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y, y)
    }

    /// The x coordinates at which the curve crosses the horizontal line at `y`.
    ///
    /// Both end points are included. The results follow the order of the
    /// roots and are not sorted.
    pub fn find_x(&self, y: S) -> ArrayVec<S, 3> {
        self.find_x_with(y, AnchorPolicy::ExcludeLineEnd)
    }

    /// Same as `find_x` with an explicit treatment of the end anchor.
    pub fn find_x_with(&self, y: S, policy: AnchorPolicy) -> ArrayVec<S, 3> {
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

        let polygon = (self.ctrl1 - self.from).length()
            + (self.ctrl2 - self.ctrl1).length()
            + (self.to - self.ctrl2).length();

        (baseline / polygon).min(S::ONE)
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: S) -> (CubicBezierSegment<S>, CubicBezierSegment<S>) {
        let ctrl1a = self.from + (self.ctrl1 - self.from) * t;
        let ctrl2a = self.ctrl1 + (self.ctrl2 - self.ctrl1) * t;
        let ctrl1aa = ctrl1a + (ctrl2a - ctrl1a) * t;
        let ctrl3a = self.ctrl2 + (self.to - self.ctrl2) * t;
        let ctrl2aa = ctrl2a + (ctrl3a - ctrl2a) * t;
        let ctrl1aaa = ctrl1aa + (ctrl2aa - ctrl1aa) * t;

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: ctrl1aaa,
            },
            CubicBezierSegment {
                from: ctrl1aaa,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
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

    /// Returns a conservative rectangle the curve is contained in.
    pub fn fast_bounding_box(&self) -> Box2D<S> {
        let (min_x, max_x) = self.fast_bounding_range_x();
        let (min_y, max_y) = self.fast_bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    /// Returns a conservative range of x that contains this curve.
    #[inline]
    pub fn fast_bounding_range_x(&self) -> (S, S) {
        hull_range([self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x])
    }

    /// Returns a conservative range of y that contains this curve.
    #[inline]
    pub fn fast_bounding_range_y(&self) -> (S, S) {
        hull_range([self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y])
    }

    /// Cast this curve into a `f32` curve.
    pub fn to_f32(&self) -> CubicBezierSegment<f32> {
        CubicBezierSegment {
            from: self.from.to_f32(),
            ctrl1: self.ctrl1.to_f32(),
            ctrl2: self.ctrl2.to_f32(),
            to: self.to.to_f32(),
        }
    }

    /// Cast this curve into a `f64` curve.
    pub fn to_f64(&self) -> CubicBezierSegment<f64> {
        CubicBezierSegment {
            from: self.from.to_f64(),
            ctrl1: self.ctrl1.to_f64(),
            ctrl2: self.ctrl2.to_f64(),
            to: self.to.to_f64(),
        }
    }
}

impl<S: Scalar> Segment for CubicBezierSegment<S> {
    impl_segment!(S);
}

impl<S: Scalar> BoundingBox for CubicBezierSegment<S> {
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
fn sorted(values: &[f32]) -> std::vec::Vec<f32> {
    let mut values = values.to_vec();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    values
}

#[cfg(test)]
fn arch() -> CubicBezierSegment<f32> {
    CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(0.0, 10.0),
        ctrl2: point(10.0, 10.0),
        to: point(10.0, 0.0),
    }
}

// y crosses zero three times, x = 3t.
#[cfg(test)]
fn wave() -> CubicBezierSegment<f32> {
    CubicBezierSegment {
        from: point(0.0, -1.0),
        ctrl1: point(1.0, 3.0),
        ctrl2: point(2.0, -3.0),
        to: point(3.0, 1.0),
    }
}

#[test]
fn end_points() {
    let curve = CubicBezierSegment {
        from: point(1.0f32, -3.0),
        ctrl1: point(7.0, 12.0),
        ctrl2: point(-2.0, 6.0),
        to: point(-4.0, 2.0),
    };

    assert_eq!(curve.sample(0.0), curve.from);
    assert_eq!(curve.sample(1.0), curve.to);
    assert_eq!(arch().sample(0.5), point(5.0, 7.5));
}

#[test]
fn sample_matches_bernstein_form() {
    let curve = wave();

    for i in 0..=10 {
        let t = i as f32 / 10.0;
        let one_t = 1.0 - t;
        let b0 = one_t * one_t * one_t;
        let b1 = 3.0 * one_t * one_t * t;
        let b2 = 3.0 * one_t * t * t;
        let b3 = t * t * t;
        let expected = point(
            curve.from.x * b0 + curve.ctrl1.x * b1 + curve.ctrl2.x * b2 + curve.to.x * b3,
            curve.from.y * b0 + curve.ctrl1.y * b1 + curve.ctrl2.y * b2 + curve.to.y * b3,
        );
        assert!(fuzzy_eq_point(curve.sample(t), expected, 0.0001));
    }
}

#[test]
fn tangent() {
    let curve = arch();

    assert_eq!(curve.derivative(0.0), vector(0.0, 30.0));
    assert_eq!(curve.derivative(1.0), vector(0.0, -30.0));
    assert_eq!(curve.derivative(0.5), vector(15.0, 0.0));
    assert_eq!(curve.dx(0.5), 15.0);
    assert_eq!(curve.dy(0.5), 0.0);
}

#[test]
fn find_x_three_crossings() {
    let x = sorted(&wave().find_x(0.0));
    let offset = 3.0 * 60.0f32.sqrt() / 20.0;

    assert_eq!(x.len(), 3);
    assert!(fuzzy_eq_f32(x[0], 1.5 - offset, 0.0001));
    assert!(fuzzy_eq_f32(x[1], 1.5, 0.0001));
    assert!(fuzzy_eq_f32(x[2], 1.5 + offset, 0.0001));
}

#[test]
fn find_x_includes_both_anchors() {
    // The y polynomial of this arch degenerates into a quadratic.
    assert_eq!(sorted(&arch().find_x(0.0)), &[0.0, 10.0]);
    assert_eq!(arch().find_x_with(0.0, AnchorPolicy::ExcludeEnd).as_slice(), &[0.0]);
    assert_eq!(arch().find_x(7.5).as_slice(), &[5.0]);
}

#[test]
fn find_x_at_the_start_anchor() {
    let curve = CubicBezierSegment {
        from: point(0.0f32, -0.673),
        ctrl1: point(1.0, 2.019),
        ctrl2: point(2.0, -2.019),
        to: point(3.0, 0.8749),
    };
    assert_eq!(curve.solve_t_for_y(-0.673).as_slice(), &[0.0]);
    assert_eq!(curve.find_x(-0.673).as_slice(), &[0.0]);
    assert_eq!(curve.find_x_with(-0.673, AnchorPolicy::ExcludeEnd).as_slice(), &[0.0]);

    assert_eq!(wave().find_x(-1.0).as_slice(), &[0.0]);
}

#[test]
fn find_x_outside() {
    assert!(arch().find_x(10.5).is_empty());
    assert!(arch().find_x(-0.5).is_empty());
    // Inside the control hull but above the curve.
    assert!(arch().find_x(9.0).is_empty());
}

#[test]
fn solve_t() {
    let straight = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(1.0, 1.0),
        ctrl2: point(2.0, 2.0),
        to: point(3.0, 3.0),
    };

    assert_eq!(straight.solve_t_for_x(1.5).as_slice(), &[0.5]);
    assert_eq!(straight.solve_t_for_y(6.0).as_slice(), &[2.0]);
    assert!(fuzzy_eq_f32(straight.flatness(), 1.0, 0.00001));
}

#[test]
fn flatness() {
    assert!(fuzzy_eq_f32(arch().flatness(), 1.0 / 3.0, 0.00001));

    let closed = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(5.0, 5.0),
        ctrl2: point(-5.0, 5.0),
        to: point(0.0, 0.0),
    };
    assert_eq!(closed.flatness(), 1.0);

    let f = wave().flatness();
    assert!(f > 0.0 && f < 1.0);
}

#[test]
fn flatness_of_collinear_control_points() {
    for i in 1..30 {
        for j in 1..30 {
            let k = i as f32 * 0.37;
            let d = j as f32 * 0.53;
            let curve = CubicBezierSegment {
                from: point(0.0f32, 0.0),
                ctrl1: point(k, 0.7 * k),
                ctrl2: point(k + d, 0.7 * (k + d)),
                to: point(k + 2.0 * d, 0.7 * (k + 2.0 * d)),
            };
            let f = curve.flatness();
            assert!(f <= 1.0, "{:?} {}", curve, f);
            assert!(fuzzy_eq_f32(f, 1.0, 0.0001));
        }
    }
}

#[test]
fn split() {
    let (a, b) = arch().split(0.5);

    assert_eq!(a.from, point(0.0, 0.0));
    assert_eq!(a.to, point(5.0, 7.5));
    assert_eq!(b.from, point(5.0, 7.5));
    assert_eq!(b.to, point(10.0, 0.0));

    for i in 0..=10 {
        let t = i as f32 / 10.0;
        assert!(fuzzy_eq_point(a.sample(t), arch().sample(t * 0.5), 0.0001));
        assert!(fuzzy_eq_point(b.sample(t), arch().sample(0.5 + t * 0.5), 0.0001));
    }

    assert!(a.flatness() > arch().flatness());
}

#[test]
fn flip() {
    let curve = wave();
    let flipped = curve.flip();

    for i in 0..=10 {
        let t = i as f32 / 10.0;
        assert!(fuzzy_eq_point(curve.sample(t), flipped.sample(1.0 - t), 0.0001));
    }
}

#[test]
fn from_homogeneous_points() {
    let curve = CubicBezierSegment::from_homogeneous([
        HomogeneousPoint::new(0.0f32, 0.0, 0.0, 1.0),
        HomogeneousPoint::new(0.0, 10.0, 0.0, 1.0),
        HomogeneousPoint::new(10.0, 10.0, 0.0, 1.0),
        HomogeneousPoint::new(10.0, 0.0, 0.0, 1.0),
    ]);

    assert_eq!(curve, arch());
}
