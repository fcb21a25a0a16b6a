//! Batch processing: crop every path in a document.

use log::debug;

use crate::clip::Boundary;
use crate::crop::{self, CropError, CropOutcome};
use crate::document::{DocError, Element, Node, SvgDocument};
use crate::geometry::GeometryError;

/// Tallies from one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    /// Paths visited, in document order.
    pub processed: usize,
    /// Paths removed (entirely outside the boundary).
    pub discarded: usize,
    /// Paths rewritten (crossed the boundary).
    pub clipped: usize,
    /// Paths remaining in the document: processed - discarded.
    pub exported: usize,
    /// Paths left untouched after a per-path error. Always 0 under
    /// [`ErrorPolicy::FailFast`].
    pub skipped: usize,
}

/// What to do when a single path fails to parse mid-batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Abort on the first per-path error. Mutations already applied to
    /// earlier paths are not rolled back.
    #[default]
    FailFast,
    /// Leave the failing path untouched, count it as skipped, and keep
    /// going.
    ContinueOnError,
}

/// Error type for batch processing.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessError {
    Document(DocError),
    Boundary(GeometryError),
    /// A path failed to crop; `index` is its document-order position.
    Crop { index: usize, source: CropError },
}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessError::Document(e) => write!(f, "{}", e),
            ProcessError::Boundary(e) => write!(f, "{}", e),
            ProcessError::Crop { index, source } => {
                write!(f, "path {}: {}", index, source)
            }
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Document(e) => Some(e),
            ProcessError::Boundary(e) => Some(e),
            ProcessError::Crop { source, .. } => Some(source),
        }
    }
}

impl From<DocError> for ProcessError {
    fn from(e: DocError) -> Self {
        ProcessError::Document(e)
    }
}

impl From<GeometryError> for ProcessError {
    fn from(e: GeometryError) -> Self {
        ProcessError::Boundary(e)
    }
}

/// Crop every path in a document against a boundary.
///
/// Steps:
/// 1. Best-effort removal of a full-canvas background rectangle (the
///    first child of the document's first group, when its width/height
///    exactly equal the canvas's). Idempotent; absence is not an error.
/// 2. Every remaining `path` descendant, in document order, goes
///    through [`crop::crop_path`]: discarded paths are removed, clipped
///    paths get their `d` attribute overwritten.
/// 3. Tallies are returned, with `exported = processed - discarded`.
///
/// `boundary` defaults to the canvas box (0,0)-(w,h). Under the default
/// fail-fast policy the first per-path error aborts the batch;
/// mutations already applied are not rolled back.
pub fn process_document(
    doc: &mut SvgDocument,
    boundary: Option<&Boundary>,
    policy: ErrorPolicy,
) -> Result<Summary, ProcessError> {
    let (width, height) = doc.canvas_size()?;

    let canvas_boundary;
    let boundary = match boundary {
        Some(b) => b,
        None => {
            canvas_boundary = Boundary::canvas(width, height)?;
            &canvas_boundary
        }
    };

    if remove_background_rect(doc.root_mut(), width, height) {
        debug!("removed full-canvas background rect ({}x{})", width, height);
    }

    let mut summary = Summary::default();
    process_children(doc.root_mut(), boundary, policy, &mut summary)?;
    summary.exported = summary.processed - summary.discarded;

    debug!(
        "processed {} paths: {} clipped, {} discarded, {} skipped",
        summary.processed, summary.clipped, summary.discarded, summary.skipped
    );
    Ok(summary)
}

/// Remove a background rectangle: the first element child of the first
/// group, if it is a `rect` whose width/height exactly equal the
/// canvas's. Returns whether a rect was removed.
fn remove_background_rect(root: &mut Element, width: f64, height: f64) -> bool {
    let Some(group) = root.children.iter_mut().find_map(|n| match n {
        Node::Element(e) if e.tag == "g" => Some(e),
        _ => None,
    }) else {
        return false;
    };

    let Some(first) = group.children.iter().position(|n| matches!(n, Node::Element(_))) else {
        return false;
    };

    let is_background = match &group.children[first] {
        Node::Element(e) => {
            e.tag == "rect"
                && attr_number(e, "width") == Some(width)
                && attr_number(e, "height") == Some(height)
        }
        Node::Text(_) => false,
    };

    if is_background {
        group.children.remove(first);
    }
    is_background
}

// Same length parsing as the canvas size, so a unit-suffixed rect
// matches a unit-suffixed canvas.
fn attr_number(el: &Element, name: &str) -> Option<f64> {
    el.attr(name).and_then(crate::document::parse_user_length)
}

/// Walk an element's children depth-first, cropping every `path`.
fn process_children(
    parent: &mut Element,
    boundary: &Boundary,
    policy: ErrorPolicy,
    summary: &mut Summary,
) -> Result<(), ProcessError> {
    let mut i = 0;
    while i < parent.children.len() {
        let remove = match &mut parent.children[i] {
            Node::Element(child) if child.tag == "path" => {
                let index = summary.processed;
                summary.processed += 1;
                let d = child.attr("d").unwrap_or("");
                match crop::crop_path(d, boundary) {
                    Ok(CropOutcome::Unchanged) => false,
                    Ok(CropOutcome::Clipped { d }) => {
                        debug!("path {}: clipped to {:?}", index, d);
                        summary.clipped += 1;
                        child.set_attr("d", &d);
                        false
                    }
                    Ok(CropOutcome::Discarded) => {
                        debug!("path {}: discarded", index);
                        summary.discarded += 1;
                        true
                    }
                    Err(source) => match policy {
                        ErrorPolicy::FailFast => {
                            return Err(ProcessError::Crop { index, source });
                        }
                        ErrorPolicy::ContinueOnError => {
                            debug!("path {}: skipped ({})", index, source);
                            summary.skipped += 1;
                            false
                        }
                    },
                }
            }
            Node::Element(child) => {
                process_children(child, boundary, policy, summary)?;
                false
            }
            Node::Text(_) => false,
        };

        if remove {
            parent.children.remove(i);
        } else {
            i += 1;
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
