// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Devkit.
//!
//! This module contains pure logic with no I/O. Every disk interaction goes
//! through the `Filesystem` port defined in the application layer.
//!
//! - **No I/O**: no filesystem, network, or clock access
//! - **Value types**: `CheckKind`, `Offset`, `Replacements`, `RelativePath`
//! - **Entities**: `InstallPlan`, `ProjectNaming`
//!
// Public API - what the world sees
pub mod common;
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use common::positional_relative;
pub use entities::{
    common::RelativePath,
    install_plan::{FileMapping, InstallPlan, PlanEntry},
    naming::{NamingOverrides, ProjectNaming},
    replacements::Replacements,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{CheckKind, Offset};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    // ========================================================================
    // Naming feeds templates
    // ========================================================================

    #[test]
    fn naming_replacements_render_composer_manifest() {
        let naming = ProjectNaming::derive(Path::new("/tmp/acme-widgets"), 2026).unwrap();
        let template = r#"{"name": "{repo.name}", "autoload": {"psr-4": {"{namespace}": "src/"}}}"#;

        let rendered = String::from_utf8(naming.replacements().apply(template)).unwrap();

        assert_eq!(
            rendered,
            r#"{"name": "acme/widgets", "autoload": {"psr-4": {"Acme\\Widgets\\": "src/"}}}"#
        );
    }

    #[test]
    fn naming_replacements_are_valid_placeholders() {
        let naming = ProjectNaming::derive(Path::new("a-b-c"), 2026).unwrap();
        assert!(DomainValidator::validate_replacements(&naming.replacements()).is_ok());
    }

    // ========================================================================
    // Plan construction
    // ========================================================================

    #[test]
    fn plan_rejects_escaping_paths_at_construction() {
        assert!(RelativePath::try_new("../outside").is_err());
        assert!(RelativePath::try_new("/abs").is_err());
    }

    #[test]
    fn plan_validation_through_validator() {
        let plan = InstallPlan::new().with_directory(RelativePath::try_new("src").unwrap());
        assert!(DomainValidator::validate_plan(&plan).is_ok());
        assert!(DomainValidator::validate_plan(&InstallPlan::new()).is_err());
    }

    #[test]
    fn relative_is_reexported() {
        assert_eq!(positional_relative("a/b/c/d", "a/b"), "c/d");
    }
}
