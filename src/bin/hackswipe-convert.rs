//! HackSwipe dataset converter.
//!
//! One-shot transform from the scraper's raw output to the application's
//! static dataset. Reads and writes the paths configured in the environment;
//! malformed or missing input aborts the run without partial output.

use tracing_subscriber::EnvFilter;

use hackswipe::{convert, ConvertConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ConvertConfig::from_env();
    let projects = convert::run(&config.raw_path, &config.dataset_path)?;

    println!("Converted {} projects for HackSwipe", projects.len());
    println!("Saved to: {}", config.dataset_path.display());

    if let Some(sample) = projects.first() {
        println!("\nSample project:");
        println!("{}", serde_json::to_string_pretty(sample)?);
    }
    Ok(())
}
