//! Devkit Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Devkit, the
//! project setup tool that materializes a template tree into a new project,
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           devkit-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (InstallService, FileHandler)       │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │          (Driven: Filesystem)           │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     devkit-adapters (Infrastructure)    │
//! │   (LocalFilesystem, MemoryFilesystem)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (InstallPlan, ProjectNaming, Offset...) │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use devkit_core::prelude::*;
//!
//! // 1. Wrap a filesystem adapter
//! let files = FileHandler::new(Box::new(filesystem));
//!
//! // 2. Validated operations
//! files.is_directory("templates", true)?;
//! files.put_contents("out/notes.txt", "A", false)?;
//! files.put_contents("out/notes.txt", "B", true)?;
//!
//! // 3. Or run a whole install plan
//! let report = InstallService::new(files).install(request)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, FileHandler, InstallReport, InstallRequest, InstallService, InstallStep,
        ports::Filesystem,
    };
    pub use crate::domain::{
        CheckKind, DomainError, FileMapping, InstallPlan, NamingOverrides, Offset, PlanEntry,
        ProjectNaming, RelativePath, Replacements,
    };
    pub use crate::error::{DevkitError, DevkitResult, ErrorCategory};
}

