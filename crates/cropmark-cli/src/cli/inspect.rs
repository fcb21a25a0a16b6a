//! Inspect command - report what cropping would do, without mutating.

use cropmark::{Boundary, CropOutcome, Element, SvgDocument, crop_path};

use super::common::read_input;

#[derive(Default)]
struct ElementCounts {
    paths: usize,
    groups: usize,
    rects: usize,
    other: usize,
}

/// Execute the inspect command.
pub fn cmd_inspect(args: &[String]) {
    let mut input: Option<&str> = None;

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-" => {
                if input.is_none() {
                    input = Some("-");
                }
            }
            path if !path.starts_with('-') => {
                if input.is_none() {
                    input = Some(path);
                }
            }
            unknown => {
                eprintln!("Unknown option: {}", unknown);
            }
        }
    }

    let input = input.unwrap_or_else(|| {
        eprintln!("Error: SVG file required (use '-' for stdin)");
        print_usage();
        std::process::exit(1);
    });

    let content = read_input(input);
    let doc = SvgDocument::parse(&content).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let (width, height) = doc.canvas_size().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let boundary = Boundary::canvas(width, height).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let mut counts = ElementCounts::default();
    count_elements(doc.root(), &mut counts);

    println!("Canvas: {} x {}", width, height);
    println!(
        "Elements: {} paths, {} groups, {} rects, {} other",
        counts.paths, counts.groups, counts.rects, counts.other
    );

    if has_background_rect(doc.root(), width, height) {
        println!("Background rect: present (full canvas, would be removed)");
    } else {
        println!("Background rect: none");
    }

    let mut processed = 0;
    let mut discarded = 0;
    let mut clipped = 0;
    let mut failed = 0;
    report_paths(
        doc.root(),
        &boundary,
        &mut processed,
        &mut discarded,
        &mut clipped,
        &mut failed,
    );

    println!(
        "Would process {} paths: {} clipped, {} discarded, {} failed, {} exported",
        processed,
        clipped,
        discarded,
        failed,
        processed - discarded
    );
}

fn count_elements(el: &Element, counts: &mut ElementCounts) {
    for child in el.child_elements() {
        match child.tag.as_str() {
            "path" => counts.paths += 1,
            "g" => counts.groups += 1,
            "rect" => counts.rects += 1,
            _ => counts.other += 1,
        }
        count_elements(child, counts);
    }
}

/// Same qualification as the batch processor's removal step: a `rect`
/// that is the first element child of the first group, full canvas size.
fn has_background_rect(root: &Element, width: f64, height: f64) -> bool {
    let Some(group) = root.child_elements().find(|e| e.tag == "g") else {
        return false;
    };
    let Some(first) = group.child_elements().next() else {
        return false;
    };
    first.tag == "rect"
        && first.attr("width").and_then(|v| v.parse::<f64>().ok()) == Some(width)
        && first.attr("height").and_then(|v| v.parse::<f64>().ok()) == Some(height)
}

fn report_paths(
    el: &Element,
    boundary: &Boundary,
    processed: &mut usize,
    discarded: &mut usize,
    clipped: &mut usize,
    failed: &mut usize,
) {
    for child in el.child_elements() {
        if child.tag == "path" {
            let index = *processed;
            *processed += 1;
            let label = child
                .attr("id")
                .map(|id| format!("path {} (#{})", index, id))
                .unwrap_or_else(|| format!("path {}", index));

            match crop_path(child.attr("d").unwrap_or(""), boundary) {
                Ok(CropOutcome::Unchanged) => println!("  {}: unchanged", label),
                Ok(CropOutcome::Clipped { d }) => {
                    *clipped += 1;
                    println!("  {}: clipped -> {}", label, d);
                }
                Ok(CropOutcome::Discarded) => {
                    *discarded += 1;
                    println!("  {}: discarded", label);
                }
                Err(e) => {
                    *failed += 1;
                    println!("  {}: error ({})", label, e);
                }
            }
        } else {
            report_paths(child, boundary, processed, discarded, clipped, failed);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: cropmark inspect <input.svg>");
    eprintln!();
    eprintln!("Prints canvas size, element counts and the would-be outcome of");
    eprintln!("cropping each path against the canvas. Mutates nothing.");
    eprintln!();
    eprintln!("Use '-' as input to read from stdin");
}
