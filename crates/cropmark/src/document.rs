//! Editable SVG document tree.
//!
//! The batch processor needs more than a read-only resolved tree
//! (usvg-style): it removes children and rewrites `d` attributes. This
//! is a minimal element tree built with quick-xml events and written
//! back out as text.
//!
//! Attribute and text values are kept in their source (escaped) form
//! and written back verbatim, so documents round-trip without an
//! unescape/re-escape cycle. Values set programmatically (rewritten
//! path data) contain no XML-special characters.

use std::str::FromStr;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use svgtypes::{Length, LengthUnit, ViewBox};

/// Error type for document parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum DocError {
    /// Malformed XML, with position information.
    Xml(String),
    /// The root element is not `<svg>`.
    NotSvg,
    /// Neither usable width/height attributes nor a viewBox.
    MissingDimensions,
}

impl std::fmt::Display for DocError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocError::Xml(msg) => write!(f, "{}", msg),
            DocError::NotSvg => write!(f, "document root is not an <svg> element"),
            DocError::MissingDimensions => {
                write!(f, "SVG has no usable width/height or viewBox")
            }
        }
    }
}

impl std::error::Error for DocError {}

/// A child of an element: either a nested element or a text run.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with its attributes and children, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any existing value and preserving
    /// attribute order.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    /// All attributes in document order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Child elements only, skipping text runs.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }
}

/// An SVG document parsed into an editable tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    root: Element,
}

impl SvgDocument {
    /// Parse SVG text into a document tree.
    ///
    /// Declarations, comments and processing instructions are dropped;
    /// elements, attributes and text survive.
    pub fn parse(content: &str) -> Result<Self, DocError> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    stack.push(element_from(e));
                }
                Ok(Event::Empty(ref e)) => {
                    attach(element_from(e), &mut stack, &mut root);
                }
                Ok(Event::End(_)) => {
                    if let Some(el) = stack.pop() {
                        attach(el, &mut stack, &mut root);
                    }
                }
                Ok(Event::Text(ref t)) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = std::str::from_utf8(t.as_ref()).unwrap_or("");
                        if !text.is_empty() {
                            parent.children.push(Node::Text(text.to_string()));
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(DocError::Xml(format!(
                        "XML parse error at position {}: {}",
                        reader.error_position(),
                        e
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        let root = root.ok_or(DocError::NotSvg)?;
        if root.tag != "svg" {
            return Err(DocError::NotSvg);
        }
        Ok(Self { root })
    }

    #[inline]
    pub fn root(&self) -> &Element {
        &self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Canvas dimensions: `width`/`height` attributes when usable, the
    /// viewBox otherwise.
    ///
    /// Percentage dimensions defer to the viewBox; they describe the
    /// embedding context rather than the canvas.
    pub fn canvas_size(&self) -> Result<(f64, f64), DocError> {
        let width = self.root.attr("width").and_then(parse_user_length);
        let height = self.root.attr("height").and_then(parse_user_length);
        if let (Some(w), Some(h)) = (width, height) {
            if w > 0.0 && h > 0.0 {
                return Ok((w, h));
            }
        }

        if let Some(vb) = self
            .root
            .attr("viewBox")
            .and_then(|v| ViewBox::from_str(v).ok())
        {
            return Ok((vb.w, vb.h));
        }

        Err(DocError::MissingDimensions)
    }

}

/// Writes the tree back out as SVG text, XML declaration included.
impl std::fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        write_element(&self.root, &mut out, 0);
        f.write_str(&out)
    }
}

/// Attach a completed element to its parent, or claim it as the root.
fn attach(el: Element, stack: &mut Vec<Element>, root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(el)),
        None => {
            if root.is_none() {
                *root = Some(el);
            }
        }
    }
}

fn element_from(e: &quick_xml::events::BytesStart) -> Element {
    let name_bytes = e.name();
    let tag = std::str::from_utf8(name_bytes.as_ref()).unwrap_or("");

    let mut element = Element::new(tag);
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref()).unwrap_or("");
        let value = std::str::from_utf8(&attr.value).unwrap_or("");
        element.attrs.push((key.to_string(), value.to_string()));
    }
    element
}

fn write_element(el: &Element, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(&el.tag);
    for (key, value) in &el.attrs {
        out.push_str(&format!(" {}=\"{}\"", key, value));
    }

    if el.children.is_empty() {
        out.push_str("/>\n");
        return;
    }

    out.push_str(">\n");
    for child in &el.children {
        match child {
            Node::Element(e) => write_element(e, out, depth + 1),
            Node::Text(t) => {
                out.push_str(&"  ".repeat(depth + 1));
                out.push_str(t);
                out.push('\n');
            }
        }
    }
    out.push_str(&format!("{}</{}>\n", indent, el.tag));
}

/// Parse a length attribute in user units. Percentages are not a
/// canvas size.
pub(crate) fn parse_user_length(value: &str) -> Option<f64> {
    let length = Length::from_str(value).ok()?;
    match length.unit {
        LengthUnit::Percent => None,
        _ => Some(length.number),
    }
}

// ============================================================================
// TESTS
// ============================================================================
