use super::errors::ConfigError;
use crate::filter_set::{FilterSet, FilterSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Names whose AAAA answers are suppressed.
///
/// `domains` holds inline rules. Each file in `domain_files` holds one rule
/// per line; blank lines and lines starting with `#` are skipped.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub domains: Vec<String>,

    #[serde(default)]
    pub domain_files: Vec<PathBuf>,
}

impl FilterConfig {
    /// Builds the filter set from every configured source. Any invalid rule
    /// rejects the whole load.
    pub fn load_rules(&self) -> Result<FilterSet, ConfigError> {
        let mut builder = FilterSet::builder();

        for (idx, rule) in self.domains.iter().enumerate() {
            builder
                .add(rule)
                .map_err(|source| ConfigError::InvalidRule {
                    rule: rule.clone(),
                    origin: format!("filter.domains[{}]", idx),
                    source,
                })?;
        }

        for path in &self.domain_files {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::FileRead(path.display().to_string(), e.to_string()))?;
            add_rules_from_text(&mut builder, &contents, &path.display().to_string())?;
        }

        Ok(builder.build())
    }
}

fn add_rules_from_text(
    builder: &mut FilterSetBuilder,
    contents: &str,
    source: &str,
) -> Result<(), ConfigError> {
    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        builder.add(line).map_err(|e| ConfigError::InvalidRule {
            rule: line.to_string(),
            origin: format!("{} line {}", source, line_no + 1),
            source: e,
        })?;
    }
    Ok(())
}
