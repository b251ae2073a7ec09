use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// Everything an install run materializes, as paths relative to the source
/// and target roots.
///
/// This is the output of manifest loading or source-tree discovery. It
/// contains no I/O, only data.
#[derive(Debug, Clone, Default)]
pub struct InstallPlan {
    pub(crate) entries: Vec<PlanEntry>,
}

impl InstallPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        self.entries.push(PlanEntry::Directory(path));
    }

    pub fn add_copy(&mut self, source: RelativePath, target: RelativePath) {
        self.entries
            .push(PlanEntry::Copy(FileMapping { source, target }));
    }

    pub fn add_template(&mut self, source: RelativePath, target: RelativePath) {
        self.entries
            .push(PlanEntry::Template(FileMapping { source, target }));
    }

    pub fn with_directory(mut self, path: RelativePath) -> Self {
        self.add_directory(path);
        self
    }

    pub fn with_copy(mut self, source: RelativePath, target: RelativePath) -> Self {
        self.add_copy(source, target);
        self
    }

    pub fn with_template(mut self, source: RelativePath, target: RelativePath) -> Self {
        self.add_template(source, target);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyPlan);
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            let target = entry.target().to_string();
            if !seen.insert(target.clone()) {
                return Err(DomainError::DuplicateTarget { path: target });
            }
        }

        Ok(())
    }

    pub fn directories(&self) -> impl Iterator<Item = &RelativePath> {
        self.entries.iter().filter_map(|e| match e {
            PlanEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    pub fn copies(&self) -> impl Iterator<Item = &FileMapping> {
        self.entries.iter().filter_map(|e| match e {
            PlanEntry::Copy(m) => Some(m),
            _ => None,
        })
    }

    pub fn templates(&self) -> impl Iterator<Item = &FileMapping> {
        self.entries.iter().filter_map(|e| match e {
            PlanEntry::Template(m) => Some(m),
            _ => None,
        })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub enum PlanEntry {
    Directory(RelativePath),
    Copy(FileMapping),
    Template(FileMapping),
}

impl PlanEntry {
    pub fn target(&self) -> &RelativePath {
        match self {
            Self::Directory(path) => path,
            Self::Copy(m) | Self::Template(m) => &m.target,
        }
    }
}

/// Source file (relative to the source root) and where it lands (relative to
/// the target root).
#[derive(Debug, Clone, Serialize)]
pub struct FileMapping {
    #[serde(serialize_with = "serialize_display")]
    pub source: RelativePath,
    #[serde(serialize_with = "serialize_display")]
    pub target: RelativePath,
}

fn serialize_display<S: serde::Serializer>(
    path: &RelativePath,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(p: &str) -> RelativePath {
        RelativePath::try_new(p).unwrap()
    }

    #[test]
    fn groups_entries_by_kind() {
        let plan = InstallPlan::new()
            .with_directory(rel("docs"))
            .with_copy(rel(".gitignore"), rel(".gitignore"))
            .with_template(rel("templates/README.md"), rel("README.md"))
            .with_directory(rel("src"));

        assert_eq!(plan.entry_count(), 4);
        assert_eq!(plan.directories().count(), 2);
        assert_eq!(plan.copies().count(), 1);
        assert_eq!(
            plan.templates().next().unwrap().target.as_path(),
            std::path::Path::new("README.md")
        );
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn empty_plan_is_invalid() {
        assert!(matches!(
            InstallPlan::new().validate(),
            Err(DomainError::EmptyPlan)
        ));
    }

    #[test]
    fn duplicate_targets_are_invalid() {
        let plan = InstallPlan::new()
            .with_copy(rel("a/LICENSE"), rel("LICENSE"))
            .with_template(rel("templates/LICENSE"), rel("LICENSE"));
        assert!(matches!(
            plan.validate(),
            Err(DomainError::DuplicateTarget { .. })
        ));
    }
}
