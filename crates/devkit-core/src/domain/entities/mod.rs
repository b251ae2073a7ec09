pub mod common;
pub mod install_plan;
pub mod naming;
pub mod replacements;

pub use crate::domain::DomainError;
pub use install_plan::InstallPlan;
pub use naming::ProjectNaming;
pub use replacements::Replacements;
