use glyph_curves::geom::{AnchorPolicy, BezierSegment};
use glyph_curves::math::{point, Point};

use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseError {
    #[error("Point {index}: Expected \"x,y\", got {src:?}.")]
    Point { src: String, index: usize },
    #[error("Expected number for {name}, got {src:?}.")]
    Number { src: String, name: &'static str },
    #[error("Invalid anchor policy {src:?}, expected one of exclude-line-end, exclude-end, include-end.")]
    AnchorPolicy { src: String },
    #[error("Expected 2, 3 or 4 points, got {count}.")]
    PointCount { count: usize },
    #[error("Expected a subcommand.")]
    MissingSubcommand,
}

pub fn parse_number(name: &'static str, src: &str) -> Result<f32, ParseError> {
    src.trim().parse().map_err(|_| ParseError::Number {
        src: src.to_string(),
        name,
    })
}

/// Parses a point written as `x,y`.
pub fn parse_point(index: usize, src: &str) -> Result<Point, ParseError> {
    let err = || ParseError::Point {
        src: src.to_string(),
        index,
    };

    let mut coords = src.split(',');
    let (x, y) = match (coords.next(), coords.next(), coords.next()) {
        (Some(x), Some(y), None) => (x.trim(), y.trim()),
        _ => return Err(err()),
    };

    match (x.parse(), y.parse()) {
        (Ok(x), Ok(y)) => Ok(point(x, y)),
        _ => Err(err()),
    }
}

pub fn parse_points<'l, I>(tokens: I) -> Result<Vec<Point>, ParseError>
where
    I: IntoIterator<Item = &'l str>,
{
    tokens
        .into_iter()
        .enumerate()
        .map(|(index, src)| parse_point(index, src))
        .collect()
}

/// Builds a segment out of 2, 3 or 4 points.
pub fn segment(points: &[Point]) -> Result<BezierSegment<f32>, ParseError> {
    BezierSegment::from_points(points).ok_or(ParseError::PointCount {
        count: points.len(),
    })
}

pub fn parse_anchor_policy(src: &str) -> Result<AnchorPolicy, ParseError> {
    match src {
        "exclude-line-end" => Ok(AnchorPolicy::ExcludeLineEnd),
        "exclude-end" => Ok(AnchorPolicy::ExcludeEnd),
        "include-end" => Ok(AnchorPolicy::IncludeEnd),
        _ => Err(ParseError::AnchorPolicy {
            src: src.to_string(),
        }),
    }
}

#[test]
fn points() {
    assert_eq!(parse_point(0, "1,2"), Ok(point(1.0, 2.0)));
    assert_eq!(parse_point(0, " -1.5 , 2e1"), Ok(point(-1.5, 20.0)));
    assert_eq!(
        parse_point(3, "1;2"),
        Err(ParseError::Point {
            src: "1;2".to_string(),
            index: 3
        })
    );
    assert!(parse_point(0, "1,2,3").is_err());
    assert!(parse_point(0, "1,").is_err());

    let points = parse_points(vec!["0,0", "5,10", "10,0"]).unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(
        parse_points(vec!["0,0", "oops"]),
        Err(ParseError::Point {
            src: "oops".to_string(),
            index: 1
        })
    );
}

#[test]
fn segments() {
    let points = parse_points(vec!["0,0", "1,2", "3,2", "4,0", "5,5"]).unwrap();

    assert_eq!(segment(&points[..2]).map(|s| s.degree()), Ok(1));
    assert_eq!(segment(&points[..3]).map(|s| s.degree()), Ok(2));
    assert_eq!(segment(&points[..4]).map(|s| s.degree()), Ok(3));
    assert_eq!(segment(&points), Err(ParseError::PointCount { count: 5 }));
    assert_eq!(segment(&points[..1]), Err(ParseError::PointCount { count: 1 }));
}

#[test]
fn numbers_and_policies() {
    assert_eq!(parse_number("t", "0.25"), Ok(0.25));
    assert_eq!(
        parse_number("t", "half"),
        Err(ParseError::Number {
            src: "half".to_string(),
            name: "t"
        })
    );

    assert_eq!(parse_anchor_policy("exclude-end"), Ok(AnchorPolicy::ExcludeEnd));
    assert_eq!(parse_anchor_policy("include-end"), Ok(AnchorPolicy::IncludeEnd));
    assert!(parse_anchor_policy("both").is_err());
}
