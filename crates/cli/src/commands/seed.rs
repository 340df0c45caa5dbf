//! Seed catalog commands.
//!
//! Runs the same validation pass the server runs at startup, so a catalog
//! that validates here will load there.

use std::path::Path;

use saree_server::store::seed::SeedData;

/// Parse and validate a YAML seed catalog, reporting every finding.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed, or when
/// validation finds any issue.
pub fn validate(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let data: SeedData = serde_yaml::from_str(&content)
        .map_err(|e| format!("cannot parse {}: {e}", file.display()))?;

    let issues = data.validate();
    if issues.is_empty() {
        println!(
            "{}: ok ({} categories, {} products, {} testimonials)",
            file.display(),
            data.categories.len(),
            data.products.len(),
            data.testimonials.len()
        );
        return Ok(());
    }

    for issue in &issues {
        eprintln!("{}: {issue}", file.display());
    }
    Err(format!("{} issue(s) found", issues.len()).into())
}

/// Write the built-in demo catalog as YAML, to a file or stdout.
///
/// # Errors
///
/// Returns an error when serialization or the write fails.
pub fn generate(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let yaml = serde_yaml::to_string(&SeedData::demo())?;

    match output {
        Some(path) => {
            std::fs::write(path, &yaml)?;
            println!("wrote demo catalog to {}", path.display());
        }
        None => print!("{yaml}"),
    }

    Ok(())
}
