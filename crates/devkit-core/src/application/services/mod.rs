//! Application services - orchestrate use cases.
//!
//! `FileHandler` owns every disk interaction and its validation rules;
//! `InstallService` sequences handler calls into an install run.

pub mod file_handler;
pub mod install_service;

pub use file_handler::FileHandler;
pub use install_service::{InstallReport, InstallRequest, InstallService, InstallStep};
