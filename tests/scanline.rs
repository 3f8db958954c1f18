use glyph_curves::geom::{AnchorPolicy, BezierSegment, Segment};
use glyph_curves::math::{point, Point};

fn contour(segments: &[&[Point]]) -> Vec<BezierSegment<f32>> {
    segments
        .iter()
        .map(|points| BezierSegment::from_points(points).unwrap())
        .collect()
}

// A closed contour with a curve ending at (10, 5), followed by lines.
//
//        (5, 10)
//         /  \
//        /    (10, 5)
//       /     )
// (0, 0)------(10, 0)
fn kite() -> Vec<BezierSegment<f32>> {
    contour(&[
        &[point(0.0, 0.0), point(10.0, 0.0)],
        &[point(10.0, 0.0), point(12.0, 2.5), point(10.0, 5.0)],
        &[point(10.0, 5.0), point(5.0, 10.0)],
        &[point(5.0, 10.0), point(0.0, 0.0)],
    ])
}

fn crossings(segments: &[BezierSegment<f32>], y: f32, policy: AnchorPolicy) -> Vec<f32> {
    let mut xs: Vec<f32> = segments
        .iter()
        .flat_map(|segment| segment.find_x_with(y, policy))
        .collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());

    xs
}

#[test]
fn contour_is_closed() {
    let segments = kite();
    for (i, segment) in segments.iter().enumerate() {
        let next = &segments[(i + 1) % segments.len()];
        assert_eq!(segment.to(), next.from());
    }
}

#[test]
fn scanline_between_anchors() {
    for policy in [
        AnchorPolicy::ExcludeLineEnd,
        AnchorPolicy::ExcludeEnd,
        AnchorPolicy::IncludeEnd,
    ] {
        assert_eq!(crossings(&kite(), 2.5, policy), vec![1.25, 11.0]);
    }

    assert!(crossings(&kite(), 11.0, AnchorPolicy::IncludeEnd).is_empty());
    assert!(crossings(&kite(), -1.0, AnchorPolicy::IncludeEnd).is_empty());
}

#[test]
fn scanline_through_the_end_of_a_curve() {
    let segments = kite();

    // Rejecting every end anchor counts the shared anchor once.
    assert_eq!(crossings(&segments, 5.0, AnchorPolicy::ExcludeEnd), vec![2.5, 10.0]);

    // `find_x` keeps the end anchor of curves (AnchorPolicy::ExcludeLineEnd),
    // so the anchor shows up as the end of the curve and the start of the line.
    let mut xs: Vec<f32> = segments.iter().flat_map(|s| s.find_x(5.0)).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(xs, vec![2.5, 10.0, 10.0]);
    assert_eq!(crossings(&segments, 5.0, AnchorPolicy::ExcludeLineEnd), xs);
}

#[test]
fn scanline_through_the_end_of_a_line() {
    let segments = kite();

    assert_eq!(crossings(&segments, 10.0, AnchorPolicy::ExcludeLineEnd), vec![5.0]);
    assert_eq!(crossings(&segments, 10.0, AnchorPolicy::ExcludeEnd), vec![5.0]);
    assert_eq!(crossings(&segments, 10.0, AnchorPolicy::IncludeEnd), vec![5.0, 5.0]);
}

#[test]
fn cubic_contour_spans() {
    // A wave closed by two lines. The wave crosses y = 0 three times.
    let segments = contour(&[
        &[point(0.0, -1.0), point(1.0, 3.0), point(2.0, -3.0), point(3.0, 1.0)],
        &[point(3.0, 1.0), point(3.0, -5.0)],
        &[point(3.0, -5.0), point(0.0, -1.0)],
    ]);

    let xs = crossings(&segments, 0.0, AnchorPolicy::ExcludeEnd);
    assert_eq!(xs.len(), 4);
    assert_eq!(xs[3], 3.0);

    let spans: Vec<(f32, f32)> = xs.chunks(2).map(|pair| (pair[0], pair[1])).collect();
    assert_eq!(spans.len(), 2);
    for (start, end) in spans {
        assert!(start < end);
    }
}

#[test]
fn scanline_through_the_start_of_a_cubic() {
    let segments = contour(&[
        &[point(0.0, -1.0), point(1.0, 3.0), point(2.0, -3.0), point(3.0, 1.0)],
        &[point(3.0, 1.0), point(3.0, -5.0)],
        &[point(3.0, -5.0), point(0.0, -1.0)],
    ]);

    assert_eq!(crossings(&segments, -1.0, AnchorPolicy::ExcludeLineEnd), vec![0.0, 3.0]);
    assert_eq!(crossings(&segments, -1.0, AnchorPolicy::ExcludeEnd), vec![0.0, 3.0]);
    assert_eq!(crossings(&segments, -1.0, AnchorPolicy::IncludeEnd), vec![0.0, 0.0, 3.0]);
}

#[test]
fn flatness_drives_subdivision() {
    use glyph_curves::geom::QuadraticBezierSegment;

    let mut pending = vec![QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(5.0, 10.0),
        to: point(10.0, 0.0),
    }];
    let mut flat = Vec::new();

    while let Some(curve) = pending.pop() {
        if curve.flatness() >= 0.99 {
            flat.push(curve);
        } else {
            let (a, b) = curve.split(0.5);
            pending.push(b);
            pending.push(a);
        }
    }

    assert!(flat.len() > 2);
    assert_eq!(flat[0].from, point(0.0, 0.0));
    assert_eq!(flat[flat.len() - 1].to, point(10.0, 0.0));
    for pair in flat.windows(2) {
        assert_eq!(pair[0].to, pair[1].from);
    }
}
