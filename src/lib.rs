//! # ZMX Compiler
//!
//! Deterministic compiler that turns a directory of `.zmx` single-file
//! components into one registry module (`components.js`) and one host
//! document (`index.html`).
//!
//! Pipeline: discovery → section extraction → prop extraction → registry
//! → style aggregation + module assembly → host document → write.
//!
//! Output ordering is a function of component names only. Directory listing
//! order never leaks into the artifacts, so two runs over an unchanged input
//! directory produce byte-identical files.

pub mod codegen;
pub mod compiler;
pub mod config;
pub mod discovery;
pub mod html;
pub mod parse;
pub mod registry;
pub mod style;
pub mod utils;

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

pub use compiler::{compile_sources, Artifacts, Compiler, RunReport, RunState};
pub use config::CompilerConfig;
pub use parse::render_template;
pub use registry::Registry;

/// Identifier of the root container the host document mounts components into.
pub const ROOT_CONTAINER_ID: &str = "app";

/// Attribute carrying the component name on each placeholder container.
pub const COMPONENT_ATTR: &str = "data-component";

/// Error thrown by the generated `render` / `initializeComponents` when the
/// container argument is not an element.
pub const CONTAINER_PRECONDITION_MESSAGE: &str = "A valid container element must be provided.";

// ---------------------------------------------------------------------------
// Component Source
// ---------------------------------------------------------------------------

/// The raw sections of one source unit.
///
/// Absent sections are empty strings, never errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSource {
    /// File name without the source suffix.
    pub name: String,
    pub template_text: String,
    pub style_text: String,
    /// Extracted but not emitted.
    pub script_text: String,
}

// ---------------------------------------------------------------------------
// Component Descriptor
// ---------------------------------------------------------------------------

/// A component as it enters the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    pub name: String,
    pub template_text: String,
    pub style_text: String,
    /// Placeholder names in first-appearance order. Duplicates are kept.
    pub prop_names: Vec<String>,
}

impl ComponentDescriptor {
    /// Build a descriptor from extracted sections.
    pub fn from_source(source: &ComponentSource) -> Self {
        Self {
            name: source.name.clone(),
            template_text: source.template_text.clone(),
            style_text: source.style_text.clone(),
            prop_names: parse::extract_props(&source.template_text),
        }
    }
}

// ---------------------------------------------------------------------------
// CompileError
// ---------------------------------------------------------------------------

/// Errors that abort a compile run.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to read source directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read source unit '{}': {source}", path.display())]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create output directory '{}': {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write artifact '{}': {source}", path.display())]
    WriteArtifact {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read config '{}': {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("compiler run cannot {action} from state {state:?}")]
    InvalidState {
        action: &'static str,
        state: RunState,
    },
}

impl CompileError {
    /// True for the filesystem class of errors (directory, read, write).
    pub fn is_filesystem(&self) -> bool {
        matches!(
            self,
            CompileError::ReadDir { .. }
                | CompileError::ReadSource { .. }
                | CompileError::CreateOutputDir { .. }
                | CompileError::WriteArtifact { .. }
                | CompileError::ReadConfig { .. }
        )
    }
}
