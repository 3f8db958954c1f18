use crate::scalar::Scalar;
use crate::{point, Box2D, CubicBezierSegment, LineSegment, Point, QuadraticBezierSegment, Vector};
use arrayvec::ArrayVec;

/// How scanline queries treat a crossing at the end anchor of a segment.
///
/// In a contour the end anchor of a segment is also the start anchor of the
/// next one. A scanline passing exactly through that anchor is found by both
/// segments unless one of them rejects it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum AnchorPolicy {
    /// Line segments reject `t == 1`, quadratic and cubic curves accept it.
    ///
    /// This is what `find_x` does. A contour mixing curves and lines can
    /// count a crossing twice when the scanline goes through the anchor that
    /// ends a curve.
    ExcludeLineEnd,
    /// Every segment rejects `t == 1`. Each anchor is reported once per
    /// closed contour.
    ExcludeEnd,
    /// Every segment accepts `t == 1`.
    IncludeEnd,
}

impl Default for AnchorPolicy {
    fn default() -> Self {
        AnchorPolicy::ExcludeLineEnd
    }
}

impl AnchorPolicy {
    /// Whether a parameter found by a scanline query belongs to the segment.
    #[inline]
    pub fn accepts<S: Scalar>(self, t: S, is_line: bool) -> bool {
        let include_end = match self {
            AnchorPolicy::ExcludeLineEnd => !is_line,
            AnchorPolicy::ExcludeEnd => false,
            AnchorPolicy::IncludeEnd => true,
        };

        if include_end {
            t >= S::ZERO && t <= S::ONE
        } else {
            t >= S::ZERO && t < S::ONE
        }
    }
}

/// Common APIs to segment types.
pub trait Segment: Copy + Sized {
    type Scalar: Scalar;

    /// Start of the curve.
    fn from(&self) -> Point<Self::Scalar>;

    /// End of the curve.
    fn to(&self) -> Point<Self::Scalar>;

    /// Sample the curve at t (expecting t between 0 and 1).
    fn sample(&self, t: Self::Scalar) -> Point<Self::Scalar>;

    /// Sample x at t (expecting t between 0 and 1).
    fn x(&self, t: Self::Scalar) -> Self::Scalar {
        self.sample(t).x
    }

    /// Sample y at t (expecting t between 0 and 1).
    fn y(&self, t: Self::Scalar) -> Self::Scalar {
        self.sample(t).y
    }

    /// Sample the derivative at t (expecting t between 0 and 1).
    fn derivative(&self, t: Self::Scalar) -> Vector<Self::Scalar>;

    /// Sample x derivative at t (expecting t between 0 and 1).
    fn dx(&self, t: Self::Scalar) -> Self::Scalar {
        self.derivative(t).x
    }

    /// Sample y derivative at t (expecting t between 0 and 1).
    fn dy(&self, t: Self::Scalar) -> Self::Scalar {
        self.derivative(t).y
    }

    /// Swap the direction of the segment.
    fn flip(&self) -> Self;

    /// Ratio between the length of the baseline and the length of the
    /// control polygon, in `(0, 1]`.
    fn flatness(&self) -> Self::Scalar;

    /// All parameters at which the curve's x coordinate is equal to `x`.
    fn solve_t_for_x(&self, x: Self::Scalar) -> ArrayVec<Self::Scalar, 3>;

    /// All parameters at which the curve's y coordinate is equal to `y`.
    fn solve_t_for_y(&self, y: Self::Scalar) -> ArrayVec<Self::Scalar, 3>;

    /// The x coordinates at which the segment crosses the horizontal line at `y`.
    fn find_x(&self, y: Self::Scalar) -> ArrayVec<Self::Scalar, 3> {
        self.find_x_with(y, AnchorPolicy::ExcludeLineEnd)
    }

    /// Same as `find_x` with an explicit treatment of the end anchor.
    fn find_x_with(&self, y: Self::Scalar, policy: AnchorPolicy) -> ArrayVec<Self::Scalar, 3>;
}

pub trait BoundingBox {
    type Scalar: Scalar;

    /// Returns a conservative rectangle that contains the curve.
    ///
    /// This does not necessarily return the smallest possible bounding rectangle.
    fn fast_bounding_box(&self) -> Box2D<Self::Scalar> {
        let (min_x, max_x) = self.fast_bounding_range_x();
        let (min_y, max_y) = self.fast_bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    /// Returns a range of x values that contains the curve.
    fn fast_bounding_range_x(&self) -> (Self::Scalar, Self::Scalar);

    /// Returns a range of y values that contains the curve.
    fn fast_bounding_range_y(&self) -> (Self::Scalar, Self::Scalar);
}

macro_rules! impl_segment {
    ($S:ty) => {
        type Scalar = $S;
        fn from(&self) -> Point<$S> {
            self.from()
        }
        fn to(&self) -> Point<$S> {
            self.to()
        }
        fn sample(&self, t: $S) -> Point<$S> {
            self.sample(t)
        }
        fn x(&self, t: $S) -> $S {
            self.x(t)
        }
        fn y(&self, t: $S) -> $S {
            self.y(t)
        }
        fn derivative(&self, t: $S) -> Vector<$S> {
            self.derivative(t)
        }
        fn dx(&self, t: $S) -> $S {
            self.dx(t)
        }
        fn dy(&self, t: $S) -> $S {
            self.dy(t)
        }
        fn flip(&self) -> Self {
            self.flip()
        }
        fn flatness(&self) -> $S {
            self.flatness()
        }
        fn solve_t_for_x(&self, x: $S) -> ArrayVec<$S, 3> {
            self.solve_t_for_x(x).into_iter().collect()
        }
        fn solve_t_for_y(&self, y: $S) -> ArrayVec<$S, 3> {
            self.solve_t_for_y(y).into_iter().collect()
        }
        fn find_x_with(&self, y: $S, policy: AnchorPolicy) -> ArrayVec<$S, 3> {
            self.find_x_with(y, policy).into_iter().collect()
        }
    };
}

/// A linear, quadratic or cubic segment, tagged by its degree.
///
/// This is how a contour walker typically hands segments over to the
/// kernel when it doesn't know their degree statically.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum BezierSegment<S> {
    Linear(LineSegment<S>),
    Quadratic(QuadraticBezierSegment<S>),
    Cubic(CubicBezierSegment<S>),
}

impl<S: Scalar> BezierSegment<S> {
    /// Builds a segment out of 2, 3 or 4 points.
    ///
    /// Returns `None` for any other number of points.
    pub fn from_points(points: &[Point<S>]) -> Option<Self> {
        match *points {
            [from, to] => Some(BezierSegment::Linear(LineSegment { from, to })),
            [from, ctrl, to] => Some(BezierSegment::Quadratic(QuadraticBezierSegment {
                from,
                ctrl,
                to,
            })),
            [from, ctrl1, ctrl2, to] => Some(BezierSegment::Cubic(CubicBezierSegment {
                from,
                ctrl1,
                ctrl2,
                to,
            })),
            _ => None,
        }
    }

    /// Degree of the curve: 1, 2 or 3.
    pub fn degree(&self) -> u32 {
        match self {
            BezierSegment::Linear(..) => 1,
            BezierSegment::Quadratic(..) => 2,
            BezierSegment::Cubic(..) => 3,
        }
    }

    /// The anchors and control points of the segment, in order.
    pub fn points(&self) -> ArrayVec<Point<S>, 4> {
        let mut points = ArrayVec::new();
        match *self {
            BezierSegment::Linear(s) => points.extend([s.from, s.to]),
            BezierSegment::Quadratic(s) => points.extend([s.from, s.ctrl, s.to]),
            BezierSegment::Cubic(s) => points.extend([s.from, s.ctrl1, s.ctrl2, s.to]),
        }

        points
    }

    pub fn to_f32(&self) -> BezierSegment<f32> {
        match *self {
            BezierSegment::Linear(s) => BezierSegment::Linear(s.to_f32()),
            BezierSegment::Quadratic(s) => BezierSegment::Quadratic(s.to_f32()),
            BezierSegment::Cubic(s) => BezierSegment::Cubic(s.to_f32()),
        }
    }

    pub fn to_f64(&self) -> BezierSegment<f64> {
        match *self {
            BezierSegment::Linear(s) => BezierSegment::Linear(s.to_f64()),
            BezierSegment::Quadratic(s) => BezierSegment::Quadratic(s.to_f64()),
            BezierSegment::Cubic(s) => BezierSegment::Cubic(s.to_f64()),
        }
    }
}

impl<S: Scalar> From<LineSegment<S>> for BezierSegment<S> {
    fn from(s: LineSegment<S>) -> Self {
        BezierSegment::Linear(s)
    }
}

impl<S: Scalar> From<QuadraticBezierSegment<S>> for BezierSegment<S> {
    fn from(s: QuadraticBezierSegment<S>) -> Self {
        BezierSegment::Quadratic(s)
    }
}

impl<S: Scalar> From<CubicBezierSegment<S>> for BezierSegment<S> {
    fn from(s: CubicBezierSegment<S>) -> Self {
        BezierSegment::Cubic(s)
    }
}

macro_rules! dispatch {
    ($segment:expr, $s:ident => $e:expr) => {
        match $segment {
            BezierSegment::Linear($s) => $e,
            BezierSegment::Quadratic($s) => $e,
            BezierSegment::Cubic($s) => $e,
        }
    };
}

impl<S: Scalar> Segment for BezierSegment<S> {
    type Scalar = S;

    fn from(&self) -> Point<S> {
        dispatch!(self, s => s.from)
    }

    fn to(&self) -> Point<S> {
        dispatch!(self, s => s.to)
    }

    fn sample(&self, t: S) -> Point<S> {
        dispatch!(self, s => s.sample(t))
    }

    fn x(&self, t: S) -> S {
        dispatch!(self, s => s.x(t))
    }

    fn y(&self, t: S) -> S {
        dispatch!(self, s => s.y(t))
    }

    fn derivative(&self, t: S) -> Vector<S> {
        dispatch!(self, s => s.derivative(t))
    }

    fn flip(&self) -> Self {
        match self {
            BezierSegment::Linear(s) => BezierSegment::Linear(s.flip()),
            BezierSegment::Quadratic(s) => BezierSegment::Quadratic(s.flip()),
            BezierSegment::Cubic(s) => BezierSegment::Cubic(s.flip()),
        }
    }

    fn flatness(&self) -> S {
        dispatch!(self, s => s.flatness())
    }

    fn solve_t_for_x(&self, x: S) -> ArrayVec<S, 3> {
        dispatch!(self, s => s.solve_t_for_x(x).into_iter().collect())
    }

    fn solve_t_for_y(&self, y: S) -> ArrayVec<S, 3> {
        dispatch!(self, s => s.solve_t_for_y(y).into_iter().collect())
    }

    fn find_x_with(&self, y: S, policy: AnchorPolicy) -> ArrayVec<S, 3> {
        dispatch!(self, s => s.find_x_with(y, policy).into_iter().collect())
    }
}

impl<S: Scalar> BoundingBox for BezierSegment<S> {
    type Scalar = S;

    fn fast_bounding_range_x(&self) -> (S, S) {
        dispatch!(self, s => s.fast_bounding_range_x())
    }

    fn fast_bounding_range_y(&self) -> (S, S) {
        dispatch!(self, s => s.fast_bounding_range_y())
    }
}

#[test]
fn anchor_policy() {
    assert!(AnchorPolicy::ExcludeLineEnd.accepts(0.0f32, true));
    assert!(!AnchorPolicy::ExcludeLineEnd.accepts(1.0f32, true));
    assert!(AnchorPolicy::ExcludeLineEnd.accepts(1.0f32, false));
    assert!(!AnchorPolicy::ExcludeEnd.accepts(1.0f32, false));
    assert!(AnchorPolicy::IncludeEnd.accepts(1.0f32, true));
    assert!(!AnchorPolicy::IncludeEnd.accepts(-0.1f32, false));
    assert!(!AnchorPolicy::IncludeEnd.accepts(1.1f32, false));
    assert_eq!(AnchorPolicy::default(), AnchorPolicy::ExcludeLineEnd);
}

#[test]
fn bezier_segment_from_points() {
    let points = [
        point(0.0f32, 0.0),
        point(1.0, 2.0),
        point(3.0, 2.0),
        point(4.0, 0.0),
    ];

    assert_eq!(BezierSegment::from_points(&points[..1]), None);
    assert_eq!(BezierSegment::from_points(&points[..2]).map(|s| s.degree()), Some(1));
    assert_eq!(BezierSegment::from_points(&points[..3]).map(|s| s.degree()), Some(2));

    let cubic = BezierSegment::from_points(&points).unwrap();
    assert_eq!(cubic.degree(), 3);
    assert_eq!(cubic.points().as_slice(), &points);
    assert_eq!(Segment::from(&cubic), points[0]);
    assert_eq!(Segment::to(&cubic), points[3]);
}

#[test]
fn bezier_segment_dispatch() {
    let line: BezierSegment<f32> = LineSegment {
        from: point(0.0, 0.0),
        to: point(10.0, 10.0),
    }
    .into();

    let quadratic: BezierSegment<f32> = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(5.0, 10.0),
        to: point(10.0, 0.0),
    }
    .into();

    assert_eq!(line.find_x(5.0).as_slice(), &[5.0]);
    assert_eq!(line.flatness(), 1.0);
    assert!(quadratic.flatness() < 1.0);
    assert_eq!(quadratic.sample(0.5), point(5.0, 5.0));
    assert_eq!(quadratic.fast_bounding_box().max, point(10.0, 10.0));
    assert_eq!(quadratic.flip().sample(0.0), point(10.0, 0.0));
}
