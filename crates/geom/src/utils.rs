//! Small helpers shared by the segment types.

use crate::scalar::Scalar;

#[inline]
pub fn min_max<S: Scalar>(a: S, b: S) -> (S, S) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Smallest and largest of a set of values, used for the control hull of a curve.
#[inline]
pub fn hull_range<S: Scalar, const N: usize>(values: [S; N]) -> (S, S) {
    let mut min = values[0];
    let mut max = values[0];
    for &v in &values[1..] {
        min = min.min(v);
        max = max.max(v);
    }

    (min, max)
}

#[test]
fn ranges() {
    assert_eq!(min_max(3.0f32, -1.0), (-1.0, 3.0));
    assert_eq!(hull_range([0.0f32, 10.0, -2.0, 4.0]), (-2.0, 10.0));
    assert_eq!(hull_range([5.0f64]), (5.0, 5.0));
}
