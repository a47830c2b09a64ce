//! scaffold
//!
//! The template materialization pipeline.
//!
//! # Lifecycle
//!
//! ```text
//! ResolveIdentity -> AcquireScratch -> FetchTemplate -> StripMetadata
//!     -> RewriteIdentity -> CreateTargetDir -> Materialize -> ReleaseScratch
//! ```
//!
//! Each step runs once, in order. The first failure ends the run and is
//! returned as a [`CreateError`] naming the step.
//!
//! # Invariants
//!
//! - Inputs are validated before anything touches the filesystem
//! - The scratch directory is removed on every exit path once acquired
//! - The target directory is never removed, even after a failure
//!
//! # Modules
//!
//! - [`fetch`] - Template retrieval (`git clone`)
//! - [`strip`] - Version-control metadata removal
//! - [`rewrite`] - Module path substitution
//! - [`materialize`] - Copy into the target directory
//! - [`walk`] - Shared tree traversal

pub mod fetch;
pub mod materialize;
pub mod rewrite;
pub mod strip;
pub mod walk;

pub use fetch::{FetchError, GitCliFetcher, TemplateSource, TreeFetcher};
pub use materialize::{materialize, MaterializeSummary};
pub use rewrite::{rewrite_identity, RewriteSummary, MANIFEST_FILE};
pub use strip::strip_vcs_metadata;
pub use walk::IoFailure;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::identity::{self, IdentityError, ModulePath, TEMPLATE_MODULE};
use crate::ui::output::{self, Verbosity};

/// Prefix of scratch directory names.
pub const SCRATCH_PREFIX: &str = "goth-template-";

/// Execution context for the pipeline.
///
/// Process-wide state is passed in explicitly so the pipeline can run
/// against temporary directories in tests.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory the project is created in.
    pub cwd: PathBuf,
    /// Directory scratch space is created under.
    pub scratch_parent: PathBuf,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

impl Context {
    /// Context for `cwd` with scratch space in the system temp directory.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            scratch_parent: std::env::temp_dir(),
            verbosity: Verbosity::Normal,
        }
    }
}

/// Pipeline step, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolveIdentity,
    AcquireScratch,
    FetchTemplate,
    StripMetadata,
    RewriteIdentity,
    CreateTargetDir,
    Materialize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::ResolveIdentity => "resolving module path",
            Stage::AcquireScratch => "creating scratch directory",
            Stage::FetchTemplate => "cloning template",
            Stage::StripMetadata => "removing .git directory",
            Stage::RewriteIdentity => "updating import paths",
            Stage::CreateTargetDir => "creating target directory",
            Stage::Materialize => "copying template",
        };
        f.write_str(label)
    }
}

/// Errors from creating a project.
#[derive(Debug, Error)]
pub enum CreateError {
    /// Project name or account was unusable.
    #[error("{} failed", Stage::ResolveIdentity)]
    InvalidInput(#[from] IdentityError),

    /// The template could not be fetched.
    #[error("cloning template from {url} failed")]
    FetchFailure {
        url: String,
        #[source]
        source: FetchError,
    },

    /// A filesystem operation failed.
    #[error("{stage} failed")]
    Io {
        stage: Stage,
        #[source]
        failure: IoFailure,
    },
}

impl CreateError {
    fn io(stage: Stage) -> impl FnOnce(IoFailure) -> Self {
        move |failure| CreateError::Io { stage, failure }
    }

    /// The step that failed.
    pub fn stage(&self) -> Stage {
        match self {
            CreateError::InvalidInput(_) => Stage::ResolveIdentity,
            CreateError::FetchFailure { .. } => Stage::FetchTemplate,
            CreateError::Io { stage, .. } => *stage,
        }
    }

    /// The path an I/O failure happened on, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            CreateError::Io { failure, .. } => Some(&failure.path),
            _ => None,
        }
    }

    /// Whether the failure may have left a tree partially written.
    ///
    /// True for I/O failures while rewriting the scratch tree or copying
    /// into the target directory. The scratch tree is discarded anyway; the
    /// target directory is left as is.
    pub fn may_leave_partial_tree(&self) -> bool {
        matches!(
            self,
            CreateError::Io {
                stage: Stage::RewriteIdentity | Stage::Materialize,
                ..
            }
        )
    }

    /// Whether the user-visible project directory may be incomplete.
    pub fn target_may_be_partial(&self) -> bool {
        self.may_leave_partial_tree() && self.stage() == Stage::Materialize
    }
}

/// What to create.
#[derive(Debug, Clone)]
pub struct CreateRequest {
    /// Project name; also the target directory name.
    pub project_name: String,
    /// Account the new module path lives under.
    pub account: String,
    /// Where the template comes from.
    pub source: TemplateSource,
}

/// A successfully created project.
#[derive(Debug, Clone)]
pub struct CreatedProject {
    /// Trimmed project name.
    pub name: String,
    /// New module path.
    pub module: ModulePath,
    /// Directory the project was written to.
    pub target: PathBuf,
    /// Rewrite statistics.
    pub rewrite: RewriteSummary,
    /// Copy statistics.
    pub materialize: MaterializeSummary,
}

/// Run the full pipeline.
///
/// # Errors
///
/// Returns the first failure. Nothing is written when the request is
/// invalid. Scratch space is always released before returning; the target
/// directory is left in whatever state the failing step reached.
pub fn create_project(
    ctx: &Context,
    request: &CreateRequest,
    fetcher: &dyn TreeFetcher,
) -> Result<CreatedProject, CreateError> {
    let v = ctx.verbosity;

    output::debug(format!("Stage: {}", Stage::ResolveIdentity), v);
    let module = identity::resolve(&request.account, &request.project_name)?;
    let name = identity::project_dir_name(&request.project_name)?.to_string();
    let target = ctx.cwd.join(&name);
    output::debug(format!("Module path: {}", module), v);

    output::debug(format!("Stage: {}", Stage::AcquireScratch), v);
    let scratch = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempdir_in(&ctx.scratch_parent)
        .map_err(|e| CreateError::Io {
            stage: Stage::AcquireScratch,
            failure: IoFailure::new("create scratch directory in", &ctx.scratch_parent, e),
        })?;
    output::debug(format!("Scratch directory: {}", scratch.path().display()), v);

    let result = populate(ctx, request, fetcher, &module, scratch.path(), &target);

    let scratch_path = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        output::warn(
            format!(
                "could not remove scratch directory '{}': {}",
                scratch_path.display(),
                e
            ),
            v,
        );
    } else {
        output::debug("Scratch directory removed", v);
    }

    let (rewrite, materialized) = result?;
    Ok(CreatedProject {
        name,
        module,
        target,
        rewrite,
        materialize: materialized,
    })
}

/// Fetch, rewrite, and copy, using `scratch` as the staging area.
fn populate(
    ctx: &Context,
    request: &CreateRequest,
    fetcher: &dyn TreeFetcher,
    module: &ModulePath,
    scratch: &Path,
    target: &Path,
) -> Result<(RewriteSummary, MaterializeSummary), CreateError> {
    let v = ctx.verbosity;
    let staged = scratch.join("template");

    output::print("Cloning template repository...", v);
    output::debug(format!("Stage: {} ({})", Stage::FetchTemplate, request.source.url), v);
    fetcher
        .fetch(&request.source, &staged)
        .map_err(|source| CreateError::FetchFailure {
            url: request.source.url.clone(),
            source,
        })?;

    output::debug(format!("Stage: {}", Stage::StripMetadata), v);
    if strip_vcs_metadata(&staged).map_err(CreateError::io(Stage::StripMetadata))? {
        output::debug("Removed .git directory", v);
    }

    output::print("Updating module path...", v);
    output::debug(format!("Stage: {}", Stage::RewriteIdentity), v);
    let rewrite = rewrite_identity(&staged, TEMPLATE_MODULE, module.as_str())
        .map_err(CreateError::io(Stage::RewriteIdentity))?;
    if !rewrite.manifest_rewritten {
        return Err(CreateError::Io {
            stage: Stage::RewriteIdentity,
            failure: IoFailure::new(
                "read",
                staged.join(MANIFEST_FILE),
                io::Error::new(io::ErrorKind::NotFound, "template has no go.mod"),
            ),
        });
    }
    output::debug(
        format!(
            "Rewrote {} file(s), {} replacement(s)",
            rewrite.files_visited, rewrite.replacements
        ),
        v,
    );

    output::debug(format!("Stage: {}", Stage::CreateTargetDir), v);
    if target.is_dir() {
        output::warn(
            format!(
                "directory '{}' already exists; template files will overwrite existing ones",
                target.display()
            ),
            v,
        );
    }
    std::fs::create_dir_all(target).map_err(|e| CreateError::Io {
        stage: Stage::CreateTargetDir,
        failure: IoFailure::new("create directory", target, e),
    })?;

    output::print(format!("Copying files to {}...", target.display()), v);
    let materialized =
        materialize(&staged, target).map_err(CreateError::io(Stage::Materialize))?;
    output::debug(
        format!(
            "Copied {} file(s), skipped {} hidden entries",
            materialized.files_copied, materialized.hidden_skipped
        ),
        v,
    );

    Ok((rewrite, materialized))
}
