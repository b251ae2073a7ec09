//! Project naming conventions derived from the target directory name.
//!
//! A target directory such as `acme-widget-kit` yields:
//!
//! | Field       | Value                  |
//! |-------------|------------------------|
//! | `repo_name` | `acme/widget-kit`      |
//! | `repo_uri`  | `acme-widget-kit`      |
//! | `repo_page` | `widget-kit`           |
//! | `name`      | `Acme Widget Kit`      |
//! | `namespace` | `Acme\\Widget\\Kit\\`  |
//!
//! The namespace carries doubled backslashes because it is substituted into
//! JSON documents.

use std::path::Path;

use serde::Serialize;

use crate::domain::entities::replacements::Replacements;
use crate::domain::error::DomainError;

const WORD_SEPARATOR: char = '-';
const NAMESPACE_SEPARATOR: &str = "\\\\";

/// Explicit values that win over the derived ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingOverrides {
    pub repo_name: Option<String>,
    pub repo_uri: Option<String>,
    pub repo_page: Option<String>,
    pub name: Option<String>,
    pub namespace: Option<String>,
}

/// Resolved naming for one install run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectNaming {
    pub repo_name: String,
    pub repo_uri: String,
    pub repo_page: String,
    pub name: String,
    pub namespace: String,
    pub year: String,
}

impl ProjectNaming {
    /// Derive every field from the last component of `target`.
    pub fn derive(target: &Path, year: i32) -> Result<Self, DomainError> {
        let base = target
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DomainError::InvalidTargetName {
                path: target.display().to_string(),
            })?;

        let lower = base.to_lowercase();
        let words: Vec<String> = lower.split(WORD_SEPARATOR).map(capitalize).collect();

        Ok(Self {
            repo_name: lower.splitn(2, WORD_SEPARATOR).collect::<Vec<_>>().join("/"),
            repo_uri: lower.clone(),
            repo_page: lower
                .split(WORD_SEPARATOR)
                .skip(1)
                .collect::<Vec<_>>()
                .join("-"),
            name: words.join(" "),
            namespace: format!("{}{}", words.join(NAMESPACE_SEPARATOR), NAMESPACE_SEPARATOR),
            year: year.to_string(),
        })
    }

    pub fn with_overrides(mut self, overrides: &NamingOverrides) -> Self {
        let pick = |field: &mut String, value: &Option<String>| {
            if let Some(value) = value {
                *field = value.clone();
            }
        };
        pick(&mut self.repo_name, &overrides.repo_name);
        pick(&mut self.repo_uri, &overrides.repo_uri);
        pick(&mut self.repo_page, &overrides.repo_page);
        pick(&mut self.name, &overrides.name);
        pick(&mut self.namespace, &overrides.namespace);
        self
    }

    /// Placeholder map handed to every template of an install run.
    pub fn replacements(&self) -> Replacements {
        Replacements::new()
            .with("repo.name", &self.repo_name)
            .with("repo.uri", &self.repo_uri)
            .with("repo.page", &self.repo_page)
            .with("name", &self.name)
            .with("namespace", &self.namespace)
            .with("year", &self.year)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
