use glyph_curves::geom::{BezierSegment, LineSegment, Segment};
use glyph_curves::math::{Point, Vector};

use crate::commands::{Axis, CommandError, Query, QueryCmd};
use crate::parse::{segment, ParseError};

use log::{debug, warn};
use std::io::Write;

fn write_point(output: &mut dyn Write, p: Point) -> Result<(), CommandError> {
    writeln!(output, "{},{}", p.x, p.y)?;
    Ok(())
}

fn write_vector(output: &mut dyn Write, v: Vector) -> Result<(), CommandError> {
    writeln!(output, "{},{}", v.x, v.y)?;
    Ok(())
}

fn write_values(output: &mut dyn Write, values: &[f32]) -> Result<(), CommandError> {
    for value in values {
        writeln!(output, "{}", value)?;
    }
    Ok(())
}

fn unsupported(query: &Query, expected: &'static str, count: usize) -> CommandError {
    CommandError::Unsupported {
        command: query.name(),
        expected,
        count,
    }
}

/// Runs a query and writes its results to `output`, one value or `x,y`
/// point per line.
pub fn run(cmd: &QueryCmd, output: &mut dyn Write) -> Result<(), CommandError> {
    let curve = || -> Result<BezierSegment<f32>, ParseError> {
        let curve = segment(&cmd.points)?;
        debug!("{}: {:?} on {:?}", cmd.query.name(), cmd.query, curve);
        Ok(curve)
    };

    match cmd.query {
        Query::PointAt { t } => write_point(output, curve()?.sample(t)),
        Query::TangentAt { t } => write_vector(output, curve()?.derivative(t)),
        Query::FindT { axis, value } => {
            let roots = match axis {
                Axis::X => curve()?.solve_t_for_x(value),
                Axis::Y => curve()?.solve_t_for_y(value),
            };
            write_values(output, &roots)
        }
        Query::FindX { y, policy } => write_values(output, &curve()?.find_x_with(y, policy)),
        Query::Flatness => {
            writeln!(output, "{}", curve()?.flatness())?;
            Ok(())
        }
        Query::Closest { point } => {
            let curve = curve()?;
            let t = match curve {
                BezierSegment::Linear(line) => line.closest_t(point),
                BezierSegment::Quadratic(quadratic) => quadratic.closest_t(point),
                BezierSegment::Cubic(..) => {
                    return Err(unsupported(&cmd.query, "2 or 3 points", cmd.points.len()));
                }
            };
            writeln!(output, "{}", t)?;
            write_point(output, curve.sample(t))
        }
        Query::Parallel { distance } => {
            let line = match curve()? {
                BezierSegment::Linear(line) => line,
                _ => return Err(unsupported(&cmd.query, "2 points", cmd.points.len())),
            };
            if line.square_length() == 0.0 {
                warn!("parallel line of a zero-length segment {:?}", line);
            }
            let parallel = line.parallel(distance);
            write_point(output, parallel.from)?;
            write_point(output, parallel.to)
        }
        Query::Intersect { extrapolate } => intersect(cmd, extrapolate, output),
    }
}

fn intersect(cmd: &QueryCmd, extrapolate: bool, output: &mut dyn Write) -> Result<(), CommandError> {
    let (a, b) = match *cmd.points.as_slice() {
        [p1, p2, p3, p4] => (
            LineSegment { from: p1, to: p2 },
            LineSegment { from: p3, to: p4 },
        ),
        _ => return Err(unsupported(&cmd.query, "4 points", cmd.points.len())),
    };
    debug!("intersect {:?} with {:?} (extrapolate: {})", a, b, extrapolate);

    let result = if extrapolate {
        a.extrapolated_intersection_point(&b)
    } else {
        a.intersection_point(&b)
    };

    match result {
        Some(p) => write_point(output, p),
        None => {
            if a.to_vector().cross(b.to_vector()) == 0.0 {
                warn!("parallel lines {:?} and {:?}", a, b);
            }
            writeln!(output, "none")?;
            Ok(())
        }
    }
}

#[cfg(test)]
fn run_to_string(points: &[&str], query: Query) -> Result<String, CommandError> {
    let cmd = QueryCmd {
        points: crate::parse::parse_points(points.iter().cloned())?,
        query,
    };
    let mut output: Vec<u8> = Vec::new();
    run(&cmd, &mut output)?;

    Ok(String::from_utf8(output).unwrap())
}

#[test]
fn point_and_tangent() {
    let arch = ["0,0", "5,10", "10,0"];

    assert_eq!(run_to_string(&arch, Query::PointAt { t: 0.5 }).unwrap(), "5,5\n");
    assert_eq!(run_to_string(&arch, Query::TangentAt { t: 0.0 }).unwrap(), "10,20\n");
    assert_eq!(run_to_string(&arch, Query::TangentAt { t: 0.5 }).unwrap(), "10,0\n");
}

#[test]
fn find_t_and_find_x() {
    let line = ["0,0", "10,20"];

    let find_t = Query::FindT {
        axis: Axis::Y,
        value: 5.0,
    };
    assert_eq!(run_to_string(&line, find_t).unwrap(), "0.25\n");

    let find_t = Query::FindT {
        axis: Axis::X,
        value: 20.0,
    };
    assert_eq!(run_to_string(&line, find_t).unwrap(), "2\n");

    let find_x = |y, policy| Query::FindX { y, policy };
    assert_eq!(
        run_to_string(&line, find_x(10.0, AnchorPolicy::ExcludeLineEnd)).unwrap(),
        "5\n"
    );
    assert_eq!(
        run_to_string(&line, find_x(20.0, AnchorPolicy::ExcludeLineEnd)).unwrap(),
        ""
    );
    assert_eq!(
        run_to_string(&line, find_x(20.0, AnchorPolicy::IncludeEnd)).unwrap(),
        "10\n"
    );
}

#[test]
fn flatness() {
    assert_eq!(run_to_string(&["0,0", "3,4"], Query::Flatness).unwrap(), "1\n");
    assert_eq!(
        run_to_string(&["0,0", "0,10", "10,10", "10,0"], Query::Flatness)
            .unwrap()
            .trim()
            .parse::<f32>()
            .map(|f| (f - 1.0 / 3.0).abs() < 0.0001),
        Ok(true)
    );
}

#[test]
fn closest() {
    let query = Query::Closest {
        point: glyph_curves::math::point(5.0, 3.0),
    };
    assert_eq!(run_to_string(&["0,0", "10,0"], query).unwrap(), "0.5\n5,0\n");

    let err = run_to_string(&["0,0", "0,10", "10,10", "10,0"], query).unwrap_err();
    assert!(matches!(err, CommandError::Unsupported { count: 4, .. }));
}

#[test]
fn parallel() {
    let query = Query::Parallel { distance: 2.0 };
    assert_eq!(run_to_string(&["0,0", "10,0"], query).unwrap(), "0,2\n10,2\n");
    assert!(run_to_string(&["0,0", "5,5", "10,0"], query).is_err());
}

#[test]
fn intersections() {
    let crossing = ["0,0", "10,10", "0,10", "10,0"];
    let apart = ["0,0", "1,1", "0,10", "10,0"];
    let parallel = ["0,0", "10,0", "0,5", "10,5"];
    let bounded = Query::Intersect { extrapolate: false };
    let extrapolated = Query::Intersect { extrapolate: true };

    assert_eq!(run_to_string(&crossing, bounded).unwrap(), "5,5\n");
    assert_eq!(run_to_string(&crossing, extrapolated).unwrap(), "5,5\n");
    assert_eq!(run_to_string(&apart, bounded).unwrap(), "none\n");
    assert_eq!(run_to_string(&apart, extrapolated).unwrap(), "5,5\n");
    assert_eq!(run_to_string(&parallel, extrapolated).unwrap(), "none\n");
    assert!(run_to_string(&crossing[..2], bounded).is_err());
}

#[test]
fn bad_point_count() {
    let err = run_to_string(&["0,0"], Query::Flatness).unwrap_err();
    assert_eq!(err.to_string(), "Expected 2, 3 or 4 points, got 1.");
}

#[cfg(test)]
use glyph_curves::geom::AnchorPolicy;
