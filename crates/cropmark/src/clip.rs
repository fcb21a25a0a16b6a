//! Line clipping against convex boundaries.
//!
//! Two interchangeable routines: a generalized convex-polygon clip
//! (Cyrus-Beck form) and an axis-aligned specialization (Liang-Barsky
//! form). Both are pure and total - every input yields a clipped
//! segment or `None`, never an error - and run in time proportional to
//! the boundary's vertex count.

use crate::geometry::{AxisAlignedBox, BoundaryPolygon, Point, Segment};

/// A clipping boundary in either representation.
///
/// The box form is a cheaper specialization; for axis-aligned
/// rectangles the two are semantically equivalent.
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    Convex(BoundaryPolygon),
    Box(AxisAlignedBox),
}

impl Boundary {
    /// The default boundary: the canvas box (0,0)-(w,h).
    pub fn canvas(width: f64, height: f64) -> Result<Self, crate::geometry::GeometryError> {
        AxisAlignedBox::canvas(width, height).map(Boundary::Box)
    }

    /// Clip a segment with the algorithm matching this representation.
    #[inline]
    pub fn clip(&self, segment: Segment) -> Option<Segment> {
        match self {
            Boundary::Convex(polygon) => clip_convex(segment, polygon),
            Boundary::Box(bbox) => clip_box(segment, bbox),
        }
    }
}

// ============================================================================
// CONVEX POLYGON CLIP (Cyrus-Beck)
// ============================================================================

/// Clip a segment against a convex polygon boundary.
///
/// For each boundary edge, the parametric intersection of the segment's
/// supporting line with the edge's supporting line tightens an
/// entering/leaving interval; the segment restricted to that interval
/// survives. Returns `None` for a segment entirely outside, or one that
/// collapses to a single point (corner tangency).
pub fn clip_convex(segment: Segment, boundary: &BoundaryPolygon) -> Option<Segment> {
    let dx = segment.end.x - segment.start.x;
    let dy = segment.end.y - segment.start.y;

    // Flip the edge perpendicular so normals point inward for either
    // winding direction.
    let sign = if boundary.signed_area() > 0.0 { 1.0 } else { -1.0 };

    let vertices = boundary.vertices();
    let n = vertices.len();

    let mut t_enter = 0.0_f64;
    let mut t_leave = 1.0_f64;

    for i in 0..n {
        let j = (i + 1) % n;
        let ex = vertices[j].x - vertices[i].x;
        let ey = vertices[j].y - vertices[i].y;
        let nx = -ey * sign;
        let ny = ex * sign;

        let denom = nx * dx + ny * dy;
        let num = nx * (vertices[i].x - segment.start.x) + ny * (vertices[i].y - segment.start.y);

        if denom == 0.0 {
            // Parallel to this edge: no parametric constraint, but a
            // line wholly on the outward side can never re-enter.
            if num > 0.0 {
                return None;
            }
            continue;
        }

        let t = num / denom;
        if denom > 0.0 {
            // Heading into the boundary across this edge.
            if t > t_enter {
                t_enter = t;
            }
        } else {
            // Heading out of the boundary across this edge.
            if t < t_leave {
                t_leave = t;
            }
        }
    }

    if t_enter > t_leave {
        return None;
    }

    collapse_check(segment.at(t_enter), segment.at(t_leave))
}

// ============================================================================
// AXIS-ALIGNED BOX CLIP (Liang-Barsky)
// ============================================================================

/// Clip a segment against an axis-aligned box.
///
/// Walks the four half-plane tests (left, right, bottom, top) tightening
/// the running interval [t0, t1]. Semantically equivalent to
/// [`clip_convex`] over the box's corners, without the per-edge normal
/// arithmetic.
pub fn clip_box(segment: Segment, bbox: &AxisAlignedBox) -> Option<Segment> {
    let dx = segment.end.x - segment.start.x;
    let dy = segment.end.y - segment.start.y;
    let min = bbox.min();
    let max = bbox.max();

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    // (p, q) per edge: p is the directional coefficient, q the offset.
    // q < 0 puts the start point outside that edge.
    let edges = [
        (-dx, segment.start.x - min.x), // left
        (dx, max.x - segment.start.x),  // right
        (-dy, segment.start.y - min.y), // bottom
        (dy, max.y - segment.start.y),  // top
    ];

    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to this edge; outside means no intersection.
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            if r > t0 {
                t0 = r;
            }
        } else {
            if r < t0 {
                return None;
            }
            if r < t1 {
                t1 = r;
            }
        }
    }

    if t0 > t1 {
        return None;
    }

    collapse_check(segment.at(t0), segment.at(t1))
}

/// A surviving interval whose endpoints coincide exactly is a corner
/// tangency, not a segment.
#[inline]
fn collapse_check(a: Point, b: Point) -> Option<Segment> {
    if a == b {
        None
    } else {
        Some(Segment::new(a, b))
    }
}

// ============================================================================
// TESTS
// ============================================================================
