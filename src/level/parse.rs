//! # Level Description Parsing
//!
//! A level description is a small tab-separated text format:
//!
//! ```text
//! level.png
//! player	x:12	y:40
//! objective	x:300	y:210
//! enemy	x:80	y:80	color:red	view:64.5	route:80,80,(30),120,80,[10]
//! enemy	color:Blue
//! ```
//!
//! The first line names the image holding the tiles. Every other line is a record:
//! a kind followed by `key:value` fields. Parsing is forgiving: a malformed field is
//! dropped with a warning and the rest of the record is kept.

use crate::game::{Position, RouteNode, Tile};
use log::{debug, warn};

/// How strictly waypoint wait times are recognised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RouteSyntax {
    /// A wait must be its own comma-separated field: `1,1,(5)`.
    #[default]
    Strict,
    /// Also accepts a wait glued to the y coordinate: `1,1(5)`.
    Lenient,
}

/// Why a route string was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteParseError {
    #[error("invalid route coordinate {0:?}")]
    InvalidCoordinate(String),

    #[error("invalid route wait time {0:?}")]
    InvalidWait(String),
}

/// Record kinds understood by the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Objective,
    Enemy,
}

impl EntityKind {
    /// Parses a kind, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "player" => Some(EntityKind::Player),
            "objective" => Some(EntityKind::Objective),
            "enemy" => Some(EntityKind::Enemy),
            _ => None,
        }
    }
}

/// One parsed entity line. Fields that were absent or malformed are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub kind: EntityKind,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub color: Option<Tile>,
    /// Enemy view distance; only enemies use it
    pub view_distance: Option<f64>,
    pub route: Option<Vec<RouteNode>>,
}

impl EntityRecord {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            x: None,
            y: None,
            color: None,
            view_distance: None,
            route: None,
        }
    }

    /// The record's position, when both coordinates are present.
    pub fn position(&self) -> Option<Position> {
        Some(Position::new(self.x?, self.y?))
    }
}

/// A parsed level description.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelDescription {
    /// Image path from the first line
    pub image: String,
    pub records: Vec<EntityRecord>,
}

/// Parses the lines of a description file.
///
/// Returns `None` when there is no image line; that is the only fatal defect.
pub fn parse_description<S: AsRef<str>>(lines: &[S], syntax: RouteSyntax) -> Option<LevelDescription> {
    let (first, rest) = lines.split_first()?;
    let image = first.as_ref().trim().to_string();
    if image.is_empty() {
        return None;
    }

    let records = rest
        .iter()
        .filter_map(|line| parse_record(line.as_ref(), syntax))
        .collect();
    Some(LevelDescription { image, records })
}

/// Parses a single record line. Blank lines and unknown kinds yield `None`.
///
/// # Examples
///
/// ```
/// use tilecarve::{parse_record, EntityKind, RouteSyntax, Tile};
///
/// let record = parse_record("enemy\tx:2\ty:2\tcolor:red", RouteSyntax::Strict).unwrap();
/// assert_eq!(record.kind, EntityKind::Enemy);
/// assert_eq!((record.x, record.y), (Some(2), Some(2)));
/// assert_eq!(record.color, Some(Tile::RED));
/// assert!(record.route.is_none());
/// ```
pub fn parse_record(line: &str, syntax: RouteSyntax) -> Option<EntityRecord> {
    if line.trim().is_empty() {
        return None;
    }

    let mut parts = line.split('\t');
    let kind_name = parts.next().unwrap_or_default();
    let Some(kind) = EntityKind::from_name(kind_name) else {
        debug!("Ignoring record of unknown kind {:?}", kind_name.trim());
        return None;
    };

    let mut record = EntityRecord::new(kind);
    for part in parts {
        let Some((key, value)) = part.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim().to_ascii_lowercase().as_str() {
            "x" => record.x = parse_coordinate_field("x", value),
            "y" => record.y = parse_coordinate_field("y", value),
            "color" => {
                record.color = Tile::from_name(value).filter(|tile| tile.is_floor());
                if record.color.is_none() {
                    warn!("Unknown color {:?}, a random one will be used", value);
                }
            }
            "view" => record.view_distance = parse_view_field(value),
            "route" | "path" => {
                record.route = match parse_route(value, syntax) {
                    Ok(route) if route.is_empty() => None,
                    Ok(route) => Some(route),
                    Err(e) => {
                        warn!("Dropping route {:?}: {}", value, e);
                        None
                    }
                }
            }
            other => debug!("Ignoring unknown field {:?}", other),
        }
    }
    Some(record)
}

fn parse_coordinate_field(name: &str, value: &str) -> Option<i32> {
    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Dropping malformed {} coordinate {:?}", name, value);
            None
        }
    }
}

fn parse_view_field(value: &str) -> Option<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
        _ => {
            warn!("Dropping malformed view distance {:?}", value);
            None
        }
    }
}

/// Splits `inner` out of `(inner)` or `[inner]`.
fn unwrap_wait(field: &str) -> Option<&str> {
    field
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .or_else(|| field.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')))
}

fn is_wait_field(field: &str) -> bool {
    field.starts_with('(') || field.starts_with('[')
}

fn parse_wait(field: &str) -> Result<u32, RouteParseError> {
    unwrap_wait(field)
        .and_then(|inner| inner.trim().parse().ok())
        .ok_or_else(|| RouteParseError::InvalidWait(field.to_string()))
}

fn parse_coordinate(field: &str) -> Result<i32, RouteParseError> {
    field
        .parse()
        .map_err(|_| RouteParseError::InvalidCoordinate(field.to_string()))
}

/// Parses a patrol route of `x,y` pairs, each optionally followed by a wait time in
/// parentheses or brackets.
///
/// A trailing lone x coordinate is ignored. Any malformed number rejects the whole
/// route.
///
/// # Examples
///
/// ```
/// use tilecarve::{parse_route, Position, RouteNode, RouteSyntax};
///
/// let route = parse_route("0,0,(3),4,0,[10],4,4", RouteSyntax::Strict).unwrap();
/// assert_eq!(route, vec![
///     RouteNode::new(Position::new(0, 0), 3),
///     RouteNode::new(Position::new(4, 0), 10),
///     RouteNode::new(Position::new(4, 4), 0),
/// ]);
///
/// assert!(parse_route("0,0,1,1(5)", RouteSyntax::Strict).is_err());
/// assert_eq!(parse_route("0,0,1,1(5)", RouteSyntax::Lenient).unwrap().len(), 2);
/// ```
pub fn parse_route(text: &str, syntax: RouteSyntax) -> Result<Vec<RouteNode>, RouteParseError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    let mut route = Vec::with_capacity(fields.len() / 2);
    let mut i = 0;

    while i < fields.len() {
        let x = parse_coordinate(fields[i])?;
        i += 1;
        if i >= fields.len() {
            break;
        }

        let y_field = fields[i];
        i += 1;
        let (y, mut wait) = match (syntax, y_field.find(['(', '['])) {
            (RouteSyntax::Lenient, Some(split)) => {
                let (y, glued) = y_field.split_at(split);
                (parse_coordinate(y.trim())?, Some(parse_wait(glued)?))
            }
            _ => (parse_coordinate(y_field)?, None),
        };

        if wait.is_none() && i < fields.len() && is_wait_field(fields[i]) {
            wait = Some(parse_wait(fields[i])?);
            i += 1;
        }

        route.push(RouteNode::new(Position::new(x, y), wait.unwrap_or(0)));
    }

    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: i32, y: i32, wait: u32) -> RouteNode {
        RouteNode::new(Position::new(x, y), wait)
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(EntityKind::from_name("Player"), Some(EntityKind::Player));
        assert_eq!(EntityKind::from_name(" OBJECTIVE"), Some(EntityKind::Objective));
        assert_eq!(EntityKind::from_name("enemy"), Some(EntityKind::Enemy));
        assert_eq!(EntityKind::from_name("door"), None);
    }

    #[test]
    fn test_record_with_all_fields() {
        let record = parse_record(
            "Enemy\tX: 5\ty:7\tCOLOR:Cyan\tpath:5,7,(2),9,7",
            RouteSyntax::Strict,
        )
        .unwrap();
        assert_eq!(record.position(), Some(Position::new(5, 7)));
        assert_eq!(record.color, Some(Tile::CYAN));
        assert_eq!(record.route, Some(vec![node(5, 7, 2), node(9, 7, 0)]));
    }

    #[test]
    fn test_malformed_coordinate_is_dropped() {
        let record = parse_record("player\tx:abc\ty:3", RouteSyntax::Strict).unwrap();
        assert_eq!(record.x, None);
        assert_eq!(record.y, Some(3));
        assert_eq!(record.position(), None);
    }

    #[test]
    fn test_view_distance_field() {
        let record = parse_record("enemy\tview:64.5", RouteSyntax::Strict).unwrap();
        assert_eq!(record.view_distance, Some(64.5));

        for bad in ["far", "-3", "NaN", "inf"] {
            let line = format!("enemy\tview:{}", bad);
            let record = parse_record(&line, RouteSyntax::Strict).unwrap();
            assert_eq!(record.view_distance, None, "{:?} should be dropped", bad);
        }
    }

    #[test]
    fn test_invalid_color_is_dropped() {
        let record = parse_record("enemy\tcolor:plaid", RouteSyntax::Strict).unwrap();
        assert_eq!(record.color, None);
        let record = parse_record("enemy\tcolor:none", RouteSyntax::Strict).unwrap();
        assert_eq!(record.color, None);
    }

    #[test]
    fn test_fields_without_separator_are_skipped() {
        let record = parse_record("enemy\tx5\ty:1\tspeed:3", RouteSyntax::Strict).unwrap();
        assert_eq!(record.x, None);
        assert_eq!(record.y, Some(1));
    }

    #[test]
    fn test_blank_and_unknown_lines() {
        assert!(parse_record("", RouteSyntax::Strict).is_none());
        assert!(parse_record("   ", RouteSyntax::Strict).is_none());
        assert!(parse_record("torch\tx:1\ty:1", RouteSyntax::Strict).is_none());
    }

    #[test]
    fn test_route_waits_in_both_bracket_styles() {
        assert_eq!(
            parse_route("1,2,( 4 ),3,4,[6]", RouteSyntax::Strict).unwrap(),
            vec![node(1, 2, 4), node(3, 4, 6)]
        );
    }

    #[test]
    fn test_route_ignores_trailing_lone_x() {
        assert_eq!(
            parse_route("1,2,3", RouteSyntax::Strict).unwrap(),
            vec![node(1, 2, 0)]
        );
    }

    #[test]
    fn test_route_rejects_bad_numbers() {
        assert_eq!(
            parse_route("1,a", RouteSyntax::Strict),
            Err(RouteParseError::InvalidCoordinate("a".to_string()))
        );
        assert_eq!(
            parse_route("1,2,(x)", RouteSyntax::Strict),
            Err(RouteParseError::InvalidWait("(x)".to_string()))
        );
        assert_eq!(
            parse_route("1,2,(-3)", RouteSyntax::Strict),
            Err(RouteParseError::InvalidWait("(-3)".to_string()))
        );
        assert!(parse_route("1,2,(3", RouteSyntax::Strict).is_err());
    }

    #[test]
    fn test_glued_wait_depends_on_syntax() {
        let line = "enemy\troute:0,0,1,1(5)";

        let strict = parse_record(line, RouteSyntax::Strict).unwrap();
        assert_eq!(strict.route, None);

        let lenient = parse_record(line, RouteSyntax::Lenient).unwrap();
        assert_eq!(lenient.route, Some(vec![node(0, 0, 0), node(1, 1, 5)]));
    }

    #[test]
    fn test_lenient_still_accepts_separate_waits() {
        assert_eq!(
            parse_route("0,0,[2],1,1[5]", RouteSyntax::Lenient).unwrap(),
            vec![node(0, 0, 2), node(1, 1, 5)]
        );
        assert!(parse_route("0,0,1,1(5", RouteSyntax::Lenient).is_err());
    }

    #[test]
    fn test_empty_route_is_absent() {
        let record = parse_record("enemy\troute:", RouteSyntax::Strict).unwrap();
        assert_eq!(record.route, None);
    }

    #[test]
    fn test_description_requires_image_line() {
        let empty: [&str; 0] = [];
        assert!(parse_description(&empty, RouteSyntax::Strict).is_none());
        assert!(parse_description(&["  ", "player\tx:1\ty:1"], RouteSyntax::Strict).is_none());

        let description = parse_description(
            &["map.png", "player\tx:1\ty:1", "", "enemy", "crate\tx:1"],
            RouteSyntax::Strict,
        )
        .unwrap();
        assert_eq!(description.image, "map.png");
        assert_eq!(description.records.len(), 2);
        assert_eq!(description.records[1].kind, EntityKind::Enemy);
    }
}
