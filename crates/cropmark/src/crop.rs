//! Single-path cropping: parse, clip, classify, re-serialize.

use crate::clip::Boundary;
use crate::geometry::Segment;
use crate::path::{self, PathError};

/// What cropping did to a path.
#[derive(Debug, Clone, PartialEq)]
pub enum CropOutcome {
    /// The segment lies entirely inside the boundary; nothing to rewrite.
    Unchanged,
    /// The segment crossed the boundary; carries the rewritten
    /// description.
    Clipped { d: String },
    /// The segment lies entirely outside the boundary, or collapsed to
    /// a single point; the path should be removed.
    Discarded,
}

/// Error type for path cropping.
#[derive(Debug, Clone, PartialEq)]
pub enum CropError {
    /// The path description failed to parse; the parser's error,
    /// unmodified.
    Parse(PathError),
    /// Fewer than two vertices - no segment to clip.
    TooShort(usize),
}

impl std::fmt::Display for CropError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropError::Parse(e) => write!(f, "{}", e),
            CropError::TooShort(n) => {
                write!(f, "path has {} vertices, need at least 2", n)
            }
        }
    }
}

impl std::error::Error for CropError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CropError::Parse(e) => Some(e),
            CropError::TooShort(_) => None,
        }
    }
}

impl From<PathError> for CropError {
    fn from(e: PathError) -> Self {
        CropError::Parse(e)
    }
}

/// Crop a path description against a boundary.
///
/// The first two vertices form the clipped segment; any further
/// vertices are ignored. This is a single-segment cropper, not a
/// general polyline clipper.
///
/// The `Unchanged` classification uses exact endpoint equality with the
/// input segment, matching the clipper's exact collapse rule.
pub fn crop_path(d: &str, boundary: &Boundary) -> Result<CropOutcome, CropError> {
    let vertices = path::parse(d)?;
    if vertices.len() < 2 {
        return Err(CropError::TooShort(vertices.len()));
    }

    let segment = Segment::new(vertices[0], vertices[1]);
    Ok(match boundary.clip(segment) {
        None => CropOutcome::Discarded,
        Some(clipped) if clipped == segment => CropOutcome::Unchanged,
        Some(clipped) => CropOutcome::Clipped {
            d: path::serialize(&[clipped.start, clipped.end], false),
        },
    })
}

// ============================================================================
// TESTS
// ============================================================================
