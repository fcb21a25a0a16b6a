//! Path mini-language parsing and serialization.
//!
//! The cropper works on a straight-line subset of SVG path syntax:
//! uppercase M/L/H/V commands, each followed by one or two decimal
//! operands separated by whitespace and/or commas. Any other command
//! letter (lowercase forms included) is rejected - parsing is
//! all-or-nothing, never a partial vertex list.

use crate::geometry::Point;

/// One command of the path mini-language.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    HorizontalTo(f64),
    VerticalTo(f64),
}

/// Error type for path parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// Command letters outside M/L/H/V, in source order, deduplicated.
    UnsupportedCommand(Vec<char>),
    /// A token whose operands are missing, extra, or non-numeric.
    MalformedToken(String),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::UnsupportedCommand(letters) => {
                let list: String = letters
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "unsupported path command(s): {}", list)
            }
            PathError::MalformedToken(token) => {
                write!(f, "malformed path token: {:?}", token)
            }
        }
    }
}

impl std::error::Error for PathError {}

impl PathCommand {
    /// The vertex this command contributes.
    ///
    /// H and V are absolute-axis forms: `H x` lands on the x axis at
    /// (x, 0) and `V y` on the y axis at (0, y).
    #[inline]
    pub fn vertex(&self) -> Point {
        match *self {
            PathCommand::MoveTo(x, y) | PathCommand::LineTo(x, y) => Point::new(x, y),
            PathCommand::HorizontalTo(x) => Point::new(x, 0.0),
            PathCommand::VerticalTo(y) => Point::new(0.0, y),
        }
    }
}

/// Parse a path description into its vertex list, one vertex per
/// command, in source order.
pub fn parse(text: &str) -> Result<Vec<Point>, PathError> {
    Ok(parse_commands(text)?.iter().map(|c| c.vertex()).collect())
}

/// Parse a path description into its command list.
pub fn parse_commands(text: &str) -> Result<Vec<PathCommand>, PathError> {
    let mut commands = Vec::new();
    let mut unsupported: Vec<char> = Vec::new();
    let mut malformed: Option<PathError> = None;

    // Operands before any command letter have nothing to attach to.
    let leading = leading_text(text);
    if !leading.is_empty() {
        malformed = Some(PathError::MalformedToken(leading.to_string()));
    }

    for (letter, args) in tokens(text) {
        match letter {
            'M' | 'L' | 'H' | 'V' => {
                // Unsupported letters take precedence over operand
                // errors, so keep scanning even after a bad token.
                match parse_operands(letter, args) {
                    Ok(cmd) => commands.push(cmd),
                    Err(e) => {
                        if malformed.is_none() {
                            malformed = Some(e);
                        }
                    }
                }
            }
            other => {
                if !unsupported.contains(&other) {
                    unsupported.push(other);
                }
            }
        }
    }

    if !unsupported.is_empty() {
        return Err(PathError::UnsupportedCommand(unsupported));
    }
    if let Some(e) = malformed {
        return Err(e);
    }
    Ok(commands)
}

/// Text before the first command letter, trimmed of the whitespace and
/// commas that legitimately separate tokens.
fn leading_text(text: &str) -> &str {
    let first = text
        .char_indices()
        .find(|(_, c)| c.is_ascii_alphabetic())
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..first].trim_matches(|c: char| c == ',' || c.is_whitespace())
}

/// Split a path description into (command letter, operand text) tokens.
///
/// A token starts at each alphabetic character and runs to the next one.
fn tokens(text: &str) -> impl Iterator<Item = (char, &str)> {
    let starts: Vec<usize> = text
        .char_indices()
        .filter(|(_, c)| c.is_ascii_alphabetic())
        .map(|(i, _)| i)
        .collect();

    let mut result = Vec::with_capacity(starts.len());
    for (n, &start) in starts.iter().enumerate() {
        let end = starts.get(n + 1).copied().unwrap_or(text.len());
        let letter = text[start..].chars().next().unwrap_or('\0');
        let args = &text[start + letter.len_utf8()..end];
        result.push((letter, args));
    }
    result.into_iter()
}

/// Parse the operand text of a supported command.
fn parse_operands(letter: char, args: &str) -> Result<PathCommand, PathError> {
    let numbers: Result<Vec<f64>, _> = args
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse::<f64>)
        .collect();

    let malformed = || PathError::MalformedToken(format!("{} {}", letter, args.trim()));
    let numbers = numbers.map_err(|_| malformed())?;

    match (letter, numbers.as_slice()) {
        ('M', &[x, y]) => Ok(PathCommand::MoveTo(x, y)),
        ('L', &[x, y]) => Ok(PathCommand::LineTo(x, y)),
        ('H', &[x]) => Ok(PathCommand::HorizontalTo(x)),
        ('V', &[y]) => Ok(PathCommand::VerticalTo(y)),
        _ => Err(malformed()),
    }
}

/// Fractional digits written per coordinate. Six decimal places keeps at
/// least six significant digits at canvas scales and bounds round-trip
/// drift.
const COORD_DIGITS: usize = 6;

/// Serialize a vertex list back to path text: `M x y` for the first
/// vertex, `L x y` for the rest, a trailing ` Z` when `closed`.
pub fn serialize(vertices: &[Point], closed: bool) -> String {
    let mut out = String::new();
    for (i, v) in vertices.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let letter = if i == 0 { 'M' } else { 'L' };
        out.push_str(&format!(
            "{} {:.digits$} {:.digits$}",
            letter,
            v.x,
            v.y,
            digits = COORD_DIGITS
        ));
    }
    if closed && !out.is_empty() {
        out.push_str(" Z");
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
