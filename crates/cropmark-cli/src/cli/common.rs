//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read};

use cropmark::{AxisAlignedBox, Boundary, BoundaryPolygon, Point};

/// Which clipping routine to use.
#[derive(Clone, Copy, PartialEq)]
pub enum Algorithm {
    /// Liang-Barsky axis-aligned box clip (default).
    Box,
    /// Cyrus-Beck convex polygon clip over the window's corners.
    Convex,
}

impl Algorithm {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "box" => Some(Algorithm::Box),
            "convex" => Some(Algorithm::Convex),
            _ => None,
        }
    }
}

/// Read SVG content from a file path, or stdin for "-".
pub fn read_input(path: &str) -> String {
    if path == "-" {
        eprintln!("Reading SVG from stdin...");
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .expect("Failed to read from stdin");
        buffer
    } else {
        eprintln!("Loading: {}", path);
        fs::read_to_string(path).expect("Failed to read SVG file")
    }
}

/// Parse a crop window: "minx miny maxx maxy", comma or space separated.
pub fn parse_window(value: &str) -> Option<(f64, f64, f64, f64)> {
    let parts: Vec<&str> = value
        .split(|c| c == ',' || c == ' ')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    if parts.len() == 4 {
        Some((
            parts[0].parse().ok()?,
            parts[1].parse().ok()?,
            parts[2].parse().ok()?,
            parts[3].parse().ok()?,
        ))
    } else {
        None
    }
}

/// Build a boundary over a rectangular window with the chosen algorithm.
pub fn window_boundary(
    window: (f64, f64, f64, f64),
    algorithm: Algorithm,
) -> Result<Boundary, cropmark::GeometryError> {
    let (min_x, min_y, max_x, max_y) = window;
    match algorithm {
        Algorithm::Box => {
            AxisAlignedBox::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
                .map(Boundary::Box)
        }
        Algorithm::Convex => BoundaryPolygon::new(vec![
            Point::new(min_x, min_y),
            Point::new(max_x, min_y),
            Point::new(max_x, max_y),
            Point::new(min_x, max_y),
        ])
        .map(Boundary::Convex),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_window_forms() {
        assert_eq!(parse_window("0 0 100 200"), Some((0.0, 0.0, 100.0, 200.0)));
        assert_eq!(parse_window("0, 0, 100, 200"), Some((0.0, 0.0, 100.0, 200.0)));
        assert_eq!(parse_window("0 0 100"), None);
        assert_eq!(parse_window("a b c d"), None);
    }

    #[test]
    fn window_boundary_rejects_inverted() {
        assert!(window_boundary((100.0, 0.0, 0.0, 100.0), Algorithm::Box).is_err());
    }
}
