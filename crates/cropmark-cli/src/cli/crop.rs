//! Crop command implementation.

use std::fs;

use serde::Serialize;

use cropmark::{Boundary, ErrorPolicy, Summary, SvgDocument, process_document};

use super::common::{Algorithm, parse_window, read_input, window_boundary};

/// Summary in JSON output format.
#[derive(Serialize)]
struct JsonSummary {
    processed: usize,
    discarded: usize,
    clipped: usize,
    exported: usize,
    skipped: usize,
}

impl From<Summary> for JsonSummary {
    fn from(s: Summary) -> Self {
        Self {
            processed: s.processed,
            discarded: s.discarded,
            clipped: s.clipped,
            exported: s.exported,
            skipped: s.skipped,
        }
    }
}

/// Execute the crop command.
pub fn cmd_crop(args: &[String]) {
    let mut input: Option<&str> = None;
    let mut output_path: Option<&str> = None;
    let mut window: Option<(f64, f64, f64, f64)> = None;
    let mut algorithm = Algorithm::Box;
    let mut policy = ErrorPolicy::FailFast;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    missing_value("-o/--output");
                }
                output_path = Some(&args[i]);
            }
            "--bounds" => {
                i += 1;
                if i >= args.len() {
                    missing_value("--bounds");
                }
                window = Some(parse_window(&args[i]).unwrap_or_else(|| {
                    eprintln!("Invalid bounds: {:?}. Use \"minx miny maxx maxy\".", args[i]);
                    std::process::exit(1);
                }));
            }
            "--algorithm" => {
                i += 1;
                if i >= args.len() {
                    missing_value("--algorithm");
                }
                algorithm = Algorithm::from_name(&args[i]).unwrap_or_else(|| {
                    eprintln!("Unknown algorithm: {}. Use 'box' or 'convex'.", args[i]);
                    std::process::exit(1);
                });
            }
            "--keep-going" => {
                policy = ErrorPolicy::ContinueOnError;
            }
            "--json" => {
                json = true;
            }
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
        i += 1;
    }

    let input = input.unwrap_or_else(|| {
        eprintln!("Error: SVG file required (use '-' for stdin)");
        print_usage();
        std::process::exit(1);
    });

    let content = read_input(input);
    let mut doc = SvgDocument::parse(&content).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    // An explicit window always wins; the convex algorithm with no
    // window clips against the canvas corners instead of the canvas box.
    let boundary: Option<Boundary> = match (window, algorithm) {
        (Some(w), algo) => Some(window_boundary(w, algo).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        })),
        (None, Algorithm::Box) => None,
        (None, Algorithm::Convex) => {
            let (width, height) = doc.canvas_size().unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            Some(
                window_boundary((0.0, 0.0, width, height), Algorithm::Convex)
                    .unwrap_or_else(|e| {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }),
            )
        }
    };

    let summary = process_document(&mut doc, boundary.as_ref(), policy).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    eprintln!(
        "Processed {} paths: {} clipped, {} discarded, {} skipped, {} exported",
        summary.processed, summary.clipped, summary.discarded, summary.skipped, summary.exported
    );

    let svg = doc.to_string();

    if json {
        let payload = serde_json::to_string(&JsonSummary::from(summary))
            .expect("Failed to serialize JSON");
        println!("{}", payload);

        // SVG still goes to a file when one was asked for.
        if let Some(path) = output_path {
            if path != "-" {
                fs::write(path, &svg).expect("Failed to write output file");
                eprintln!("Wrote: {}", path);
            }
        }
        return;
    }

    match output_path {
        Some("-") | None => {
            println!("{}", svg);
        }
        Some(path) => {
            fs::write(path, &svg).expect("Failed to write output file");
            eprintln!("Wrote: {}", path);
        }
    }
}

fn missing_value(option: &str) -> ! {
    eprintln!("Option {} requires a value", option);
    std::process::exit(1);
}

fn print_usage() {
    eprintln!("Usage: cropmark crop <input.svg> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>       Output file (default: stdout)");
    eprintln!("  --bounds \"x0 y0 x1 y1\"    Crop window (default: the canvas)");
    eprintln!("  --algorithm <box|convex>  Clipping routine (default: box)");
    eprintln!("  --keep-going              Skip unparseable paths instead of aborting");
    eprintln!("  --json                    Print the summary as JSON on stdout");
    eprintln!();
    eprintln!("Use '-' as input to read from stdin");
}
