#[macro_use]
extern crate bencher;

use bencher::{black_box, Bencher};

use glyph_curves::geom::{
    AnchorPolicy, BezierSegment, CubicBezierSegment, LineSegment, QuadraticBezierSegment, Segment,
};
use glyph_curves::math::*;

const SCANLINES: usize = 64;

fn scanlines(segment: &dyn Fn(f32) -> usize) -> usize {
    let mut count = 0;
    for i in 0..SCANLINES {
        let y = -1.0 + 12.0 * i as f32 / SCANLINES as f32;
        count += segment(black_box(y));
    }

    count
}

fn find_x_quadratic(bench: &mut Bencher) {
    let curve = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(5.0, 10.0),
        to: point(10.0, 0.0),
    };

    bench.iter(|| scanlines(&|y| curve.find_x(y).len()));
}

fn find_x_cubic(bench: &mut Bencher) {
    let curve = CubicBezierSegment {
        from: point(0.0, 5.0),
        ctrl1: point(3.0, 15.0),
        ctrl2: point(7.0, -5.0),
        to: point(10.0, 5.0),
    };

    bench.iter(|| scanlines(&|y| curve.find_x(y).len()));
}

fn find_x_contour(bench: &mut Bencher) {
    let contour: [BezierSegment<f32>; 4] = [
        LineSegment { from: point(0.0, 0.0), to: point(10.0, 0.0) }.into(),
        QuadraticBezierSegment {
            from: point(10.0, 0.0),
            ctrl: point(12.0, 2.5),
            to: point(10.0, 5.0),
        }
        .into(),
        CubicBezierSegment {
            from: point(10.0, 5.0),
            ctrl1: point(9.0, 8.0),
            ctrl2: point(6.0, 10.0),
            to: point(5.0, 10.0),
        }
        .into(),
        LineSegment { from: point(5.0, 10.0), to: point(0.0, 0.0) }.into(),
    ];

    bench.iter(|| {
        scanlines(&|y| {
            contour
                .iter()
                .map(|segment| segment.find_x_with(y, AnchorPolicy::ExcludeEnd).len())
                .sum()
        })
    });
}

fn flatness(bench: &mut Bencher) {
    let curve = CubicBezierSegment {
        from: point(0.0, 5.0),
        ctrl1: point(3.0, 15.0),
        ctrl2: point(7.0, -5.0),
        to: point(10.0, 5.0),
    };

    bench.iter(|| {
        let mut pending = vec![curve];
        let mut count = 0;
        while let Some(curve) = pending.pop() {
            if curve.flatness() >= 0.999 {
                count += 1;
            } else {
                let (a, b) = curve.split(0.5);
                pending.push(a);
                pending.push(b);
            }
        }
        count
    });
}

fn intersections(bench: &mut Bencher) {
    let a = LineSegment { from: point(0.0, 0.0), to: point(10.0, 10.0) };
    let b = LineSegment { from: point(0.0, 10.0), to: point(10.0, 0.0) };

    bench.iter(|| {
        let mut found = 0;
        for i in 0..SCANLINES {
            let b = b.parallel(black_box(i as f32 * 0.25));
            if a.intersection_point(&b).is_some() {
                found += 1;
            }
        }
        found
    });
}

benchmark_group!(scanline, find_x_quadratic, find_x_cubic, find_x_contour);
benchmark_group!(subdivision, flatness);
benchmark_group!(lines, intersections);

benchmark_main!(scanline, subdivision, lines);
