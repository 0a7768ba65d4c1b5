use anyhow::{Context, Result};
use climate_insight::config::{PERSISTENCE, cleaned_climate_path};
use climate_insight::data::ClimateTable;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    build_processed_climate()
}

fn build_processed_climate() -> Result<()> {
    let source_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(PERSISTENCE.raw.daily_climate));

    let raw = ClimateTable::load(&source_path)
        .with_context(|| format!("Failed to load raw climate export {:?}", source_path))?;
    println!("Loaded {} rows from {:?}", raw.len(), source_path);

    let cleaned = raw.clean();
    let output_path = cleaned_climate_path();
    cleaned.save(&output_path)?;

    let (first, last) = match (cleaned.dates().first(), cleaned.dates().last()) {
        (Some(first), Some(last)) => (first.to_string(), last.to_string()),
        _ => (String::from("-"), String::from("-")),
    };
    println!(
        "✅ Cleaned climate table written to {:?}: {} rows, {} to {}, columns {}",
        output_path,
        cleaned.len(),
        first,
        last,
        cleaned.headers().join(", ")
    );
    Ok(())
}
