use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// On-disk list of seed keywords, e.g.
///
/// ```yaml
/// keywords:
///   - coffee
///   - 커피 머신
/// ```
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    pub keywords: Vec<String>,
}

/// Split user input on commas and newlines, trim each entry, and drop the
/// empty ones. Order and duplicates are preserved.
#[must_use]
pub fn parse_seed_keywords(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load seed keywords from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, or if it
/// contains no usable keywords.
pub fn load_seed_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SeedFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let seed_file: SeedFile = serde_yaml::from_str(&content)?;

    let keywords: Vec<String> = seed_file
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();

    if keywords.is_empty() {
        return Err(ConfigError::Validation(format!(
            "seed file {} lists no keywords",
            path.display()
        )));
    }

    Ok(keywords)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn splits_trims_and_drops_empties() {
        let seeds = parse_seed_keywords(" coffee , ,tea\n\n 커피 머신 ,");
        assert_eq!(seeds, vec!["coffee", "tea", "커피 머신"]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let seeds = parse_seed_keywords("b,a,b");
        assert_eq!(seeds, vec!["b", "a", "b"]);
    }

    #[test]
    fn blank_input_yields_nothing() {
        assert!(parse_seed_keywords("  ,\n, ").is_empty());
    }

    #[test]
    fn loads_yaml_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "keywords:\n  - coffee\n  - '  '\n  - 커피").unwrap();
        let seeds = load_seed_file(file.path()).unwrap();
        assert_eq!(seeds, vec!["coffee", "커피"]);
    }

    #[test]
    fn empty_seed_file_is_a_validation_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "keywords: []").unwrap();
        let err = load_seed_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn missing_seed_file_is_an_io_error() {
        let err = load_seed_file(Path::new("/nonexistent/kwlens/seeds.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::SeedFileIo { .. }));
    }
}
