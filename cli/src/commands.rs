use glyph_curves::geom::AnchorPolicy;
use glyph_curves::math::Point;

use crate::parse::ParseError;

use std::io;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Query {
    PointAt { t: f32 },
    TangentAt { t: f32 },
    FindT { axis: Axis, value: f32 },
    FindX { y: f32, policy: AnchorPolicy },
    Flatness,
    Closest { point: Point },
    Parallel { distance: f32 },
    Intersect { extrapolate: bool },
}

impl Query {
    pub fn name(&self) -> &'static str {
        match self {
            Query::PointAt { .. } => "point-at",
            Query::TangentAt { .. } => "tangent-at",
            Query::FindT { .. } => "find-t",
            Query::FindX { .. } => "find-x",
            Query::Flatness => "flatness",
            Query::Closest { .. } => "closest",
            Query::Parallel { .. } => "parallel",
            Query::Intersect { .. } => "intersect",
        }
    }
}

pub struct QueryCmd {
    pub points: Vec<Point>,
    pub query: Query,
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{command} expects {expected}, got {count} points.")]
    Unsupported {
        command: &'static str,
        expected: &'static str,
        count: usize,
    },
}
