//! # cropmark
//!
//! Canvas cropping for plotter SVG output: parse straight-line path
//! descriptions, clip them against a canvas boundary, and rewrite the
//! surviving geometry.
//!
//! The pipeline, leaves first:
//! - [`geometry`] - points, segments and boundary types
//! - [`path`] - the M/L/H/V path mini-language parser/serializer
//! - [`clip`] - convex-polygon and axis-aligned-box line clipping
//! - [`crop`] - per-path clip-and-classify
//! - [`document`] - editable SVG tree the batch processor works on
//! - [`process`] - whole-document cropping with summary tallies

pub mod clip;
pub mod crop;
pub mod document;
pub mod geometry;
pub mod path;
pub mod process;

// Re-export common types at crate root for convenience.
pub use clip::{Boundary, clip_box, clip_convex};
pub use crop::{CropError, CropOutcome, crop_path};
pub use document::{DocError, Element, Node, SvgDocument};
pub use geometry::{
    AxisAlignedBox, BoundaryPolygon, GeometryError, Point, Point3, Segment,
};
pub use path::{PathCommand, PathError, parse, serialize};
pub use process::{ErrorPolicy, ProcessError, Summary, process_document};
