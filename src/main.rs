use std::env;
use std::path::Path;
use std::process;

use cardstock::{Pipeline, PipelineError};

/// A simple CLI to generate an index-card PDF from a folder of Markdown notes.
fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Renders a folder of Markdown notes onto Avery 5388 index-card sheets.");
        eprintln!();
        eprintln!("Usage: {} <path/to/notes-dir> <path/to/output.pdf>", args[0]);
        process::exit(1);
    }

    let input_dir = Path::new(&args[1]);
    let output = Path::new(&args[2]);

    let pipeline = Pipeline::builder().build()?;
    let summary = pipeline.generate_to_file(input_dir, output)?;

    println!(
        "Generated {} ({} cards, {} records skipped)",
        output.display(),
        summary.rendered,
        summary.skipped
    );
    Ok(())
}
