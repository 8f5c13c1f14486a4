//! One compile run.
//!
//! A [`Compiler`] owns the registry for its lifetime and walks
//! `Idle → Discovering → ExtractingComponents → BuildingRegistry →
//! WritingArtifacts → Done`. The first error moves it to `Failed`. There is
//! no way back to an earlier state; a new run needs a new `Compiler`.
//!
//! Writes are not transactional: if the module is written and the document
//! write fails, the module stays on disk.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::codegen::generate_module;
use crate::config::CompilerConfig;
use crate::discovery::{component_name, discover_sources, processing_cmp, ENTRY_COMPONENT};
use crate::html::generate_html;
use crate::parse::extract_sections;
use crate::registry::Registry;
use crate::{CompileError, ComponentDescriptor, ComponentSource};

// ---------------------------------------------------------------------------
// Run State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Discovering,
    ExtractingComponents,
    BuildingRegistry,
    WritingArtifacts,
    Done,
    Failed,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// The generated text of a run, before anything touches the disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Registry module (`components.js`).
    pub module: String,
    /// Host document (`index.html`).
    pub html: String,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Component names in registry order.
    pub components: Vec<String>,
    /// Artifact paths in write order.
    pub written: Vec<PathBuf>,
}

// ---------------------------------------------------------------------------
// Compiler
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Compiler {
    config: CompilerConfig,
    state: RunState,
    registry: Registry,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            state: RunState::Idle,
            registry: Registry::new(),
        }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Discover, extract and generate. Leaves the run in `BuildingRegistry`.
    pub fn compile(&mut self) -> Result<Artifacts, CompileError> {
        self.require(RunState::Idle, "compile")?;
        let result = self.compile_sources_from_disk();
        self.track(result)
    }

    /// Write both artifacts, module first. Leaves the run in `Done`.
    pub fn write(&mut self, artifacts: &Artifacts) -> Result<RunReport, CompileError> {
        self.require(RunState::BuildingRegistry, "write artifacts")?;
        self.state = RunState::WritingArtifacts;
        let result = self.write_artifacts(artifacts);
        let report = self.track(result)?;
        self.state = RunState::Done;
        Ok(report)
    }

    /// Full run: compile, then write.
    pub fn run(mut self) -> Result<RunReport, CompileError> {
        let artifacts = self.compile()?;
        self.write(&artifacts)
    }

    fn compile_sources_from_disk(&mut self) -> Result<Artifacts, CompileError> {
        self.state = RunState::Discovering;
        let files = discover_sources(&self.config.source_dir, &self.config.suffix)?;
        debug!(count = files.len(), dir = %self.config.source_dir.display(), "discovery finished");

        self.state = RunState::ExtractingComponents;
        let mut sources = Vec::with_capacity(files.len());
        for file in &files {
            let path = self.config.source_dir.join(file);
            let text = fs::read_to_string(&path)
                .map_err(|source| CompileError::ReadSource { path, source })?;
            let name = component_name(file, &self.config.suffix);
            debug!(component = name, "extracting sections");
            sources.push(extract_sections(name, &text));
        }

        self.state = RunState::BuildingRegistry;
        Ok(self.build(&sources))
    }

    fn build(&mut self, sources: &[ComponentSource]) -> Artifacts {
        for source in sources {
            self.registry.insert(ComponentDescriptor::from_source(source));
        }
        Artifacts {
            module: generate_module(&self.registry),
            html: generate_html(&self.registry, &self.config.module_file, &self.config.title),
        }
    }

    fn write_artifacts(&self, artifacts: &Artifacts) -> Result<RunReport, CompileError> {
        let out_dir = &self.config.out_dir;
        fs::create_dir_all(out_dir).map_err(|source| CompileError::CreateOutputDir {
            path: out_dir.clone(),
            source,
        })?;

        let mut written = Vec::with_capacity(2);
        for (path, content) in [
            (self.config.module_path(), &artifacts.module),
            (self.config.html_path(), &artifacts.html),
        ] {
            fs::write(&path, content).map_err(|source| CompileError::WriteArtifact {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), "generated");
            written.push(path);
        }

        Ok(RunReport {
            components: self.registry.names(),
            written,
        })
    }

    fn require(&self, expected: RunState, action: &'static str) -> Result<(), CompileError> {
        if self.state != expected {
            return Err(CompileError::InvalidState {
                action,
                state: self.state,
            });
        }
        Ok(())
    }

    fn track<T>(&mut self, result: Result<T, CompileError>) -> Result<T, CompileError> {
        if result.is_err() {
            self.state = RunState::Failed;
        }
        result
    }
}

// ---------------------------------------------------------------------------
// In-memory compile
// ---------------------------------------------------------------------------

/// Compile already-loaded `(name, source)` units without touching the disk.
///
/// Units are ordered by their file name (`name` + configured suffix), the
/// same key discovery sorts on, so the caller's order does not matter.
pub fn compile_sources(
    units: &[(&str, &str)],
    config: &CompilerConfig,
) -> (Registry, Artifacts) {
    let entry_file = format!("{ENTRY_COMPONENT}{}", config.suffix);
    let mut ordered: Vec<(String, &str, &str)> = units
        .iter()
        .map(|&(name, text)| (format!("{name}{}", config.suffix), name, text))
        .collect();
    ordered.sort_by(|a, b| processing_cmp(&a.0, &b.0, &entry_file));

    let sources: Vec<ComponentSource> = ordered
        .into_iter()
        .map(|(_, name, text)| extract_sections(name, text))
        .collect();

    let mut compiler = Compiler::new(config.clone());
    compiler.state = RunState::BuildingRegistry;
    let artifacts = compiler.build(&sources);
    (compiler.registry, artifacts)
}
