extern crate clap;
extern crate glyph_curves;

mod commands;
mod parse;
mod query;

use clap::{App, AppSettings, Arg, ArgGroup, ArgMatches, SubCommand};
use commands::*;
use parse::*;

use std::fs::File;
use std::io::{self, stdout, Write};
use std::process;

fn points_arg() -> Arg<'static, 'static> {
    Arg::with_name("POINTS")
        .value_name("X,Y")
        .help("Anchors and control points of the segment: 2, 3 or 4 \"x,y\" pairs")
        .multiple(true)
        .required(true)
        .allow_hyphen_values(true)
}

fn t_arg() -> Arg<'static, 'static> {
    Arg::with_name("T")
        .short("t")
        .long("t")
        .help("Curve parameter, usually between 0 and 1")
        .value_name("T")
        .takes_value(true)
        .required(true)
        .allow_hyphen_values(true)
}

fn app() -> App<'static, 'static> {
    App::new("glyph_curves command-line interface")
        .version("0.1")
        .author("The glyph_curves developers")
        .about("Queries on bézier segments of glyph outlines")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(SubCommand::with_name("point-at")
            .about("Prints the position of the segment at t")
            .arg(t_arg())
            .arg(points_arg())
        )
        .subcommand(SubCommand::with_name("tangent-at")
            .about("Prints the derivative of the segment at t")
            .arg(t_arg())
            .arg(points_arg())
        )
        .subcommand(SubCommand::with_name("find-t")
            .about("Prints the parameters at which a coordinate reaches a value")
            .arg(Arg::with_name("X")
                .short("x")
                .help("Solves for this x coordinate")
                .value_name("X")
                .takes_value(true)
                .allow_hyphen_values(true)
            )
            .arg(Arg::with_name("Y")
                .short("y")
                .help("Solves for this y coordinate")
                .value_name("Y")
                .takes_value(true)
                .allow_hyphen_values(true)
            )
            .group(ArgGroup::with_name("AXIS")
                .args(&["X", "Y"])
                .required(true)
            )
            .arg(points_arg())
        )
        .subcommand(SubCommand::with_name("find-x")
            .about("Prints the x coordinates where the segment crosses a horizontal line")
            .arg(Arg::with_name("Y")
                .short("y")
                .help("Height of the scanline")
                .value_name("Y")
                .takes_value(true)
                .required(true)
                .allow_hyphen_values(true)
            )
            .arg(Arg::with_name("ANCHORS")
                .short("a")
                .long("anchors")
                .help("How crossings at the end anchor are counted")
                .value_name("POLICY")
                .possible_values(&["exclude-line-end", "exclude-end", "include-end"])
                .default_value("exclude-line-end")
            )
            .arg(points_arg())
        )
        .subcommand(SubCommand::with_name("flatness")
            .about("Prints the ratio between the baseline and the control polygon")
            .arg(points_arg())
        )
        .subcommand(SubCommand::with_name("closest")
            .about("Prints the parameter and position of the closest point of a line or quadratic segment")
            .arg(Arg::with_name("POINT")
                .short("p")
                .long("point")
                .help("The point to project, as \"x,y\"")
                .value_name("X,Y")
                .takes_value(true)
                .required(true)
                .allow_hyphen_values(true)
            )
            .arg(points_arg())
        )
        .subcommand(SubCommand::with_name("parallel")
            .about("Prints a line parallel to a line segment")
            .arg(Arg::with_name("DISTANCE")
                .short("d")
                .long("distance")
                .help("Signed distance along the normal of the segment")
                .value_name("DISTANCE")
                .takes_value(true)
                .required(true)
                .allow_hyphen_values(true)
            )
            .arg(points_arg())
        )
        .subcommand(SubCommand::with_name("intersect")
            .about("Prints the intersection of two line segments given as four points")
            .arg(Arg::with_name("EXTRAPOLATE")
                .short("e")
                .long("extrapolate")
                .help("Intersects the infinite lines instead of the segments")
            )
            .arg(points_arg())
        )
        .arg(Arg::with_name("OUTPUT")
            .help("Sets the output file to use")
            .value_name("FILE")
            .short("o")
            .long("output")
            .takes_value(true)
            .required(false)
            .global(true)
        )
}

fn number(matches: &ArgMatches, arg: &'static str, name: &'static str) -> Result<f32, ParseError> {
    parse_number(name, matches.value_of(arg).unwrap_or_default())
}

fn query_cmd(matches: &ArgMatches) -> Result<QueryCmd, ParseError> {
    let (name, sub) = match matches.subcommand() {
        (name, Some(sub)) => (name, sub),
        _ => return Err(ParseError::MissingSubcommand),
    };

    let query = match name {
        "point-at" => Query::PointAt { t: number(sub, "T", "t")? },
        "tangent-at" => Query::TangentAt { t: number(sub, "T", "t")? },
        "find-t" => {
            if sub.is_present("X") {
                Query::FindT { axis: Axis::X, value: number(sub, "X", "x")? }
            } else {
                Query::FindT { axis: Axis::Y, value: number(sub, "Y", "y")? }
            }
        }
        "find-x" => Query::FindX {
            y: number(sub, "Y", "y")?,
            policy: parse_anchor_policy(sub.value_of("ANCHORS").unwrap_or("exclude-line-end"))?,
        },
        "flatness" => Query::Flatness,
        "closest" => Query::Closest {
            point: parse_point(0, sub.value_of("POINT").unwrap_or_default())?,
        },
        "parallel" => Query::Parallel { distance: number(sub, "DISTANCE", "distance")? },
        _ => Query::Intersect { extrapolate: sub.is_present("EXTRAPOLATE") },
    };

    let points = parse_points(sub.values_of("POINTS").into_iter().flatten())?;

    Ok(QueryCmd { points, query })
}

fn output(matches: &ArgMatches) -> Result<Box<dyn Write>, io::Error> {
    let file = matches
        .subcommand()
        .1
        .and_then(|sub| sub.value_of("OUTPUT"))
        .or_else(|| matches.value_of("OUTPUT"));

    let mut output: Box<dyn Write> = Box::new(stdout());
    if let Some(path) = file {
        output = Box::new(File::create(path)?);
    }

    Ok(output)
}

fn execute(matches: &ArgMatches) -> Result<(), CommandError> {
    let cmd = query_cmd(matches)?;
    let mut output = output(matches)?;
    query::run(&cmd, &mut *output)?;
    output.flush()?;

    Ok(())
}

fn main() {
    env_logger::init();

    let matches = app().get_matches();

    if let Err(e) = execute(&matches) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
fn cmd_from_args(args: &[&str]) -> Result<QueryCmd, ParseError> {
    let matches = app().get_matches_from_safe(args).unwrap();
    query_cmd(&matches)
}

#[test]
fn subcommands() {
    use glyph_curves::geom::AnchorPolicy;
    use glyph_curves::math::point;

    let cmd = cmd_from_args(&["glyph-curves", "point-at", "-t", "0.5", "0,0", "5,10", "10,0"]).unwrap();
    assert_eq!(cmd.query, Query::PointAt { t: 0.5 });
    assert_eq!(cmd.points, vec![point(0.0, 0.0), point(5.0, 10.0), point(10.0, 0.0)]);

    let cmd = cmd_from_args(&["glyph-curves", "find-t", "-x", "-2", "0,1", "4,1"]).unwrap();
    assert_eq!(cmd.query, Query::FindT { axis: Axis::X, value: -2.0 });
    assert_eq!(cmd.points[1], point(4.0, 1.0));

    let cmd = cmd_from_args(&["glyph-curves", "find-x", "-y", "5", "0,0", "10,10"]).unwrap();
    assert_eq!(cmd.query, Query::FindX { y: 5.0, policy: AnchorPolicy::ExcludeLineEnd });

    let cmd = cmd_from_args(&["glyph-curves", "find-x", "-y", "5", "--anchors", "exclude-end", "0,0", "10,10"]).unwrap();
    assert_eq!(cmd.query, Query::FindX { y: 5.0, policy: AnchorPolicy::ExcludeEnd });

    let cmd = cmd_from_args(&["glyph-curves", "closest", "-p", "5,3", "0,0", "10,0"]).unwrap();
    assert_eq!(cmd.query, Query::Closest { point: point(5.0, 3.0) });

    let cmd = cmd_from_args(&["glyph-curves", "parallel", "-d", "-1.5", "0,0", "10,0"]).unwrap();
    assert_eq!(cmd.query, Query::Parallel { distance: -1.5 });

    let cmd = cmd_from_args(&["glyph-curves", "intersect", "-e", "0,0", "1,1", "0,10", "10,0"]).unwrap();
    assert_eq!(cmd.query, Query::Intersect { extrapolate: true });
    assert_eq!(cmd.points.len(), 4);

    let cmd = cmd_from_args(&["glyph-curves", "flatness", "0,0", "3,4"]).unwrap();
    assert_eq!(cmd.query, Query::Flatness);
}

#[test]
fn invalid_arguments() {
    assert_eq!(
        cmd_from_args(&["glyph-curves", "point-at", "-t", "half", "0,0", "1,1"]).err(),
        Some(ParseError::Number { src: "half".to_string(), name: "t" })
    );
    assert!(cmd_from_args(&["glyph-curves", "flatness", "0,0", "1"]).is_err());
    assert!(app().get_matches_from_safe(&["glyph-curves", "flatness"]).is_err());
    assert!(app().get_matches_from_safe(&["glyph-curves", "find-t", "0,0", "1,1"]).is_err());
}

#[test]
fn execute_converts_errors() {
    let matches = app()
        .get_matches_from_safe(&["glyph-curves", "point-at", "-t", "half", "0,0", "1,1"])
        .unwrap();
    let err = execute(&matches).unwrap_err();
    assert!(matches!(err, CommandError::Parse(ParseError::Number { name: "t", .. })));

    let matches = app()
        .get_matches_from_safe(&["glyph-curves", "intersect", "0,0", "1,1"])
        .unwrap();
    assert!(matches!(
        execute(&matches),
        Err(CommandError::Unsupported { command: "intersect", count: 2, .. })
    ));
}
