//! cropmark - crop plotter SVG paths to the canvas
//!
//! Usage:
//!   cropmark crop <input.svg> [options]    Crop paths to the canvas boundary
//!   cropmark inspect <input.svg>           Dry-run report, mutates nothing

use std::env;

mod cli;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("crop") => cli::cmd_crop(&args[2..]),
        Some("inspect") => cli::cmd_inspect(&args[2..]),
        Some("-h") | Some("--help") | None => print_usage(),
        Some(unknown) => {
            eprintln!("Unknown command: {}", unknown);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: cropmark <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  crop <input.svg>     Crop paths to the canvas boundary");
    eprintln!("  inspect <input.svg>  Report what cropping would do, without mutating");
    eprintln!();
    eprintln!("Use '-' as input to read from stdin.");
    eprintln!("Run 'cropmark <command> --help' for command options.");
}
