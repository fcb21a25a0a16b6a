//! Core geometry types for cropmark.
//!
//! Points, segments and the two boundary representations the clipper
//! accepts. Coordinates compare by exact numeric equality - the cropper
//! classifies "unchanged" and "collapsed to a point" on bitwise-stable
//! results, not tolerances.

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A 3D point as produced by upstream geometry tools.
///
/// The clipper is strictly 2D; `z` is dropped on conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A directed line segment between two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// Error type for boundary construction.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Fewer than 3 polygon vertices, collinear vertices, or an
    /// inverted/zero-area box.
    DegenerateBoundary(String),
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::DegenerateBoundary(msg) => {
                write!(f, "degenerate boundary: {}", msg)
            }
        }
    }
}

impl std::error::Error for GeometryError {}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product, treating the point as a vector from the origin.
    #[inline]
    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Point3 {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<Point3> for Point {
    #[inline]
    fn from(p: Point3) -> Self {
        Point::new(p.x, p.y)
    }
}

impl Segment {
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// The point at parameter `t` along the segment (0 = start, 1 = end).
    #[inline]
    pub fn at(&self, t: f64) -> Point {
        Point::new(
            self.start.x + t * (self.end.x - self.start.x),
            self.start.y + t * (self.end.y - self.start.y),
        )
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

// ============================================================================
// BOUNDARIES
// ============================================================================

/// A convex clipping boundary: >= 3 vertices, consistent winding.
///
/// Construction validates the vertex count and rejects zero-area
/// (collinear) vertex lists. The signed area is kept so the clipper can
/// orient edge normals consistently for either winding direction.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPolygon {
    vertices: Vec<Point>,
    signed_area: f64,
}

impl BoundaryPolygon {
    /// Build a boundary polygon from an ordered vertex list.
    pub fn new(vertices: Vec<Point>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::DegenerateBoundary(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        let signed_area = signed_area_of_points(&vertices);
        if signed_area == 0.0 {
            return Err(GeometryError::DegenerateBoundary(
                "polygon vertices are collinear".to_string(),
            ));
        }
        Ok(Self {
            vertices,
            signed_area,
        })
    }

    /// The four corners of a canvas: (0,0)-(w,0)-(w,h)-(0,h).
    pub fn canvas_corners(width: f64, height: f64) -> Result<Self, GeometryError> {
        Self::new(vec![
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ])
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Shoelace signed area. Positive for one winding, negative for the
    /// other; never zero for a constructed boundary.
    #[inline]
    pub fn signed_area(&self) -> f64 {
        self.signed_area
    }
}

/// An axis-aligned clipping box, `min` strictly below `max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAlignedBox {
    min: Point,
    max: Point,
}

impl AxisAlignedBox {
    /// Build a box from its min/max corners.
    pub fn new(min: Point, max: Point) -> Result<Self, GeometryError> {
        if min.x >= max.x || min.y >= max.y {
            return Err(GeometryError::DegenerateBoundary(format!(
                "inverted or zero-area box ({}, {}) - ({}, {})",
                min.x, min.y, max.x, max.y
            )));
        }
        Ok(Self { min, max })
    }

    /// The canvas box (0,0)-(w,h).
    pub fn canvas(width: f64, height: f64) -> Result<Self, GeometryError> {
        Self::new(Point::new(0.0, 0.0), Point::new(width, height))
    }

    #[inline]
    pub fn min(&self) -> Point {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Point {
        self.max
    }

    /// The box's corners as a boundary polygon, same winding as the
    /// canvas convention.
    pub fn corners(&self) -> BoundaryPolygon {
        // A constructed box always has positive extent on both axes, so
        // the corner polygon cannot be degenerate.
        BoundaryPolygon {
            vertices: vec![
                Point::new(self.min.x, self.min.y),
                Point::new(self.max.x, self.min.y),
                Point::new(self.max.x, self.max.y),
                Point::new(self.min.x, self.max.y),
            ],
            signed_area: (self.max.x - self.min.x) * (self.max.y - self.min.y),
        }
    }
}

/// Calculate signed area of a point sequence using the shoelace formula.
pub fn signed_area_of_points(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(p2), 5.0);
    }

    #[test]
    fn point3_drops_z() {
        let p: Point = Point3::new(1.0, 2.0, 3.0).into();
        assert_eq!(p, Point::new(1.0, 2.0));
    }

    #[test]
    fn segment_parameterization() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        assert_eq!(seg.at(0.0), seg.start);
        assert_eq!(seg.at(1.0), seg.end);
        assert_eq!(seg.at(0.5), Point::new(5.0, 10.0));
    }

    #[test]
    fn polygon_needs_three_vertices() {
        let result = BoundaryPolygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert!(matches!(
            result,
            Err(GeometryError::DegenerateBoundary(_))
        ));
    }

    #[test]
    fn polygon_rejects_collinear_vertices() {
        let result = BoundaryPolygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ]);
        assert!(matches!(
            result,
            Err(GeometryError::DegenerateBoundary(_))
        ));
    }

    #[test]
    fn canvas_corners_winding() {
        let poly = BoundaryPolygon::canvas_corners(100.0, 50.0).unwrap();
        assert_eq!(poly.vertices().len(), 4);
        assert_eq!(poly.signed_area(), 5000.0);
    }

    #[test]
    fn box_rejects_inverted_corners() {
        let result = AxisAlignedBox::new(Point::new(10.0, 10.0), Point::new(0.0, 20.0));
        assert!(matches!(
            result,
            Err(GeometryError::DegenerateBoundary(_))
        ));

        // Zero-area box is just as degenerate.
        let result = AxisAlignedBox::new(Point::new(5.0, 5.0), Point::new(5.0, 20.0));
        assert!(result.is_err());
    }

    #[test]
    fn box_corners_match_polygon() {
        let bbox = AxisAlignedBox::canvas(100.0, 100.0).unwrap();
        let from_box = bbox.corners();
        let direct = BoundaryPolygon::canvas_corners(100.0, 100.0).unwrap();
        assert_eq!(from_box.vertices(), direct.vertices());
        assert_eq!(from_box.signed_area(), direct.signed_area());
    }
}
