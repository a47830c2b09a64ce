//! Integration tests for the create pipeline.
//!
//! These run the whole pipeline against temporary directories, with fake
//! fetchers standing in for the network and a local repository standing
//! in for the real template.

mod support;

use std::fs;
use std::io::Cursor;
use std::path::Path;

use tempfile::TempDir;

use goth::cli::commands;
use goth::core::identity::{IdentityError, TEMPLATE_MODULE};
use goth::scaffold::{
    create_project, Context, CreateError, CreateRequest, GitCliFetcher, Stage, TemplateSource,
    TreeFetcher,
};
use goth::ui::output::Verbosity;

use support::{FailingFetcher, FixtureFetcher, RecordingFetcher};

// =============================================================================
// Test Fixtures
// =============================================================================

/// A working directory plus a separate scratch parent.
struct Workspace {
    cwd: TempDir,
    scratch: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            cwd: TempDir::new().expect("failed to create cwd"),
            scratch: TempDir::new().expect("failed to create scratch parent"),
        }
    }

    fn context(&self) -> Context {
        Context {
            cwd: self.cwd.path().to_path_buf(),
            scratch_parent: self.scratch.path().to_path_buf(),
            verbosity: Verbosity::Quiet,
        }
    }

    fn target(&self, name: &str) -> std::path::PathBuf {
        self.cwd.path().join(name)
    }

    fn scratch_is_empty(&self) -> bool {
        support::entries(self.scratch.path()).is_empty()
    }

    fn create(
        &self,
        project: &str,
        account: &str,
        fetcher: &dyn TreeFetcher,
    ) -> Result<goth::scaffold::CreatedProject, CreateError> {
        let request = CreateRequest {
            project_name: project.to_string(),
            account: account.to_string(),
            source: TemplateSource::new("https://example.invalid/template.git"),
        };
        create_project(&self.context(), &request, fetcher)
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

// =============================================================================
// Successful runs
// =============================================================================

#[test]
fn rewrites_module_path_everywhere() {
    let ws = Workspace::new();

    let project = ws.create("myapp", "alice", &FixtureFetcher).unwrap();

    let target = ws.target("myapp");
    assert_eq!(project.target, target);
    assert_eq!(project.module.as_str(), "github.com/alice/myapp");

    let go_mod = read(&target.join("go.mod"));
    assert!(go_mod.starts_with("module github.com/alice/myapp\n"));
    assert!(read(&target.join("main.go")).contains("\"github.com/alice/myapp/handlers\""));
    assert!(read(&target.join("handlers/home.go")).contains("\"github.com/alice/myapp/views\""));
    assert!(read(&target.join("views/home.templ"))
        .contains("\"github.com/alice/myapp/views/layout\""));

    for file in ["go.mod", "main.go", "handlers/home.go", "views/home.templ"] {
        assert!(
            !read(&target.join(file)).contains(TEMPLATE_MODULE),
            "{file} still mentions the template module"
        );
    }
}

#[test]
fn copies_other_files_verbatim() {
    let ws = Workspace::new();

    ws.create("myapp", "alice", &FixtureFetcher).unwrap();

    assert_eq!(
        read(&ws.target("myapp").join("Makefile")),
        "setup:\n\tgo mod tidy\n\ndev:\n\tair\n"
    );
}

#[test]
fn hidden_entries_and_git_never_reach_target() {
    let ws = Workspace::new();

    ws.create("myapp", "alice", &FixtureFetcher).unwrap();

    let target = ws.target("myapp");
    for hidden in [".git", ".github", ".env.example", ".gitignore"] {
        assert!(
            !target.join(hidden).exists(),
            "{hidden} should not be materialized"
        );
    }
}

#[test]
fn trims_inputs() {
    let ws = Workspace::new();

    let project = ws.create("  myapp\n", " alice ", &FixtureFetcher).unwrap();

    assert_eq!(project.name, "myapp");
    assert!(ws.target("myapp").join("go.mod").exists());
    assert_eq!(project.module.as_str(), "github.com/alice/myapp");
}

#[test]
fn reports_rewrite_and_copy_counts() {
    let ws = Workspace::new();

    let project = ws.create("myapp", "alice", &FixtureFetcher).unwrap();

    assert!(project.rewrite.manifest_rewritten);
    assert_eq!(project.rewrite.files_visited, 4);
    assert_eq!(project.rewrite.replacements, 4);
    assert_eq!(project.materialize.files_copied, 5);
}

#[test]
fn scratch_removed_after_success() {
    let ws = Workspace::new();

    ws.create("myapp", "alice", &FixtureFetcher).unwrap();

    assert!(ws.scratch_is_empty());
}

#[test]
fn existing_target_is_reused() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.target("myapp")).unwrap();
    fs::write(ws.target("myapp").join("notes.txt"), "keep me").unwrap();

    ws.create("myapp", "alice", &FixtureFetcher).unwrap();

    assert_eq!(read(&ws.target("myapp").join("notes.txt")), "keep me");
    assert!(ws.target("myapp").join("go.mod").exists());
}

// =============================================================================
// Invalid input
// =============================================================================

#[test]
fn empty_account_touches_nothing() {
    let ws = Workspace::new();
    let fetcher = RecordingFetcher::default();

    let err = ws.create("myapp", "", &fetcher).unwrap_err();

    assert!(matches!(err, CreateError::InvalidInput(_)));
    assert_eq!(err.stage(), Stage::ResolveIdentity);
    assert!(!fetcher.called.get());
    assert!(!ws.target("myapp").exists());
    assert!(ws.scratch_is_empty());
}

#[test]
fn whitespace_only_inputs_touch_nothing() {
    let ws = Workspace::new();
    let fetcher = RecordingFetcher::default();

    assert!(ws.create("myapp", " \t\n", &fetcher).is_err());
    assert!(ws.create("   ", "alice", &fetcher).is_err());

    assert!(!fetcher.called.get());
    assert!(support::entries(ws.cwd.path()).is_empty());
    assert!(ws.scratch_is_empty());
}

#[test]
fn absolute_project_name_never_leaves_cwd() {
    let ws = Workspace::new();
    let elsewhere = TempDir::new().unwrap();
    let escaped = elsewhere.path().join("escaped");
    let fetcher = RecordingFetcher::default();

    let err = ws
        .create(&escaped.to_string_lossy(), "alice", &fetcher)
        .unwrap_err();

    assert!(matches!(
        err,
        CreateError::InvalidInput(IdentityError::NotADirectoryName { .. })
    ));
    assert!(!fetcher.called.get());
    assert!(!escaped.exists());
    assert!(support::entries(ws.cwd.path()).is_empty());
    assert!(ws.scratch_is_empty());
}

#[test]
fn relative_escapes_rejected() {
    let ws = Workspace::new();

    for name in ["../sibling", "nested/app", ".."] {
        let err = ws.create(name, "alice", &FixtureFetcher).unwrap_err();
        assert_eq!(err.stage(), Stage::ResolveIdentity, "{name}");
    }
    assert!(!ws.cwd.path().parent().unwrap().join("sibling").exists());
    assert!(support::entries(ws.cwd.path()).is_empty());
}

#[test]
fn created_target_is_under_cwd() {
    let ws = Workspace::new();

    let project = ws.create("  myapp ", "alice", &FixtureFetcher).unwrap();

    assert!(project.target.starts_with(ws.cwd.path()));
    assert_eq!(project.target.parent(), Some(ws.cwd.path()));
}

// =============================================================================
// Failures after scratch acquisition
// =============================================================================

#[test]
fn fetch_failure_materializes_nothing() {
    let ws = Workspace::new();

    let err = ws.create("myapp", "alice", &FailingFetcher).unwrap_err();

    assert!(matches!(err, CreateError::FetchFailure { .. }));
    assert_eq!(err.stage(), Stage::FetchTemplate);
    assert!(!err.may_leave_partial_tree());
    assert!(!ws.target("myapp").exists());
    assert!(ws.scratch_is_empty());
}

#[test]
fn missing_manifest_fails_before_target_created() {
    struct NoManifest;
    impl TreeFetcher for NoManifest {
        fn fetch(
            &self,
            source: &TemplateSource,
            dest: &Path,
        ) -> Result<(), goth::scaffold::FetchError> {
            FixtureFetcher.fetch(source, dest)?;
            fs::remove_file(dest.join("go.mod")).unwrap();
            Ok(())
        }
    }

    let ws = Workspace::new();

    let err = ws.create("myapp", "alice", &NoManifest).unwrap_err();

    assert_eq!(err.stage(), Stage::RewriteIdentity);
    assert!(err.path().unwrap().ends_with("go.mod"));
    assert!(!ws.target("myapp").exists());
    assert!(ws.scratch_is_empty());
}

#[test]
fn materialize_failure_leaves_partial_target_and_no_scratch() {
    let ws = Workspace::new();
    // A regular file where the template needs a directory.
    fs::create_dir_all(ws.target("myapp")).unwrap();
    fs::write(ws.target("myapp").join("handlers"), "blocking file").unwrap();

    let err = ws.create("myapp", "alice", &FixtureFetcher).unwrap_err();

    assert_eq!(err.stage(), Stage::Materialize);
    assert!(err.may_leave_partial_tree());
    assert!(err.target_may_be_partial());
    assert_eq!(err.path(), Some(ws.target("myapp").join("handlers").as_path()));
    // The target directory is left for the user to inspect.
    assert!(ws.target("myapp").exists());
    assert!(ws.scratch_is_empty());
}

#[test]
fn target_creation_failure_is_reported() {
    let ws = Workspace::new();
    fs::write(ws.target("myapp"), "a file, not a directory").unwrap();

    let err = ws.create("myapp", "alice", &FixtureFetcher).unwrap_err();

    assert_eq!(err.stage(), Stage::CreateTargetDir);
    assert!(!err.may_leave_partial_tree());
    assert!(ws.scratch_is_empty());
}

#[test]
fn unusable_scratch_parent_is_reported() {
    let ws = Workspace::new();
    let mut ctx = ws.context();
    ctx.scratch_parent = ws.scratch.path().join("does-not-exist");
    let request = CreateRequest {
        project_name: "myapp".into(),
        account: "alice".into(),
        source: TemplateSource::new("unused"),
    };
    let fetcher = RecordingFetcher::default();

    let err = create_project(&ctx, &request, &fetcher).unwrap_err();

    assert_eq!(err.stage(), Stage::AcquireScratch);
    assert!(!fetcher.called.get());
    assert!(!ws.target("myapp").exists());
}

// =============================================================================
// Command handler with injected input
// =============================================================================

#[test]
fn command_prompts_for_account() {
    let ws = Workspace::new();
    let mut input = Cursor::new("alice\n");
    let mut output = Vec::new();

    let project = commands::create_with(
        &ws.context(),
        "myapp",
        TemplateSource::new("unused"),
        &mut input,
        &mut output,
        &FixtureFetcher,
    )
    .unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), commands::ACCOUNT_PROMPT);
    assert_eq!(project.module.as_str(), "github.com/alice/myapp");
    assert!(ws.target("myapp").join("go.mod").exists());
}

#[test]
fn command_rejects_empty_name_before_prompting() {
    let ws = Workspace::new();
    let mut input = Cursor::new("alice\n");
    let mut output = Vec::new();

    let result = commands::create_with(
        &ws.context(),
        "",
        TemplateSource::new("unused"),
        &mut input,
        &mut output,
        &FixtureFetcher,
    );

    assert!(result.is_err());
    assert!(output.is_empty());
    assert!(support::entries(ws.cwd.path()).is_empty());
}

#[test]
fn command_rejects_blank_account_line() {
    let ws = Workspace::new();
    let mut input = Cursor::new("   \n");
    let mut output = Vec::new();

    let err = commands::create_with(
        &ws.context(),
        "myapp",
        TemplateSource::new("unused"),
        &mut input,
        &mut output,
        &FixtureFetcher,
    )
    .unwrap_err();

    assert!(format!("{:#}", err).contains("GitHub username cannot be empty"));
    assert!(!ws.target("myapp").exists());
    assert!(ws.scratch_is_empty());
}

// =============================================================================
// Real git clone from a local repository
// =============================================================================

#[test]
fn git_fetcher_clones_local_template() {
    if !support::git_available() {
        eprintln!("skipping: git not available");
        return;
    }

    let repo = TempDir::new().unwrap();
    support::init_template_repo(repo.path());
    let ws = Workspace::new();
    let request = CreateRequest {
        project_name: "myapp".into(),
        account: "alice".into(),
        source: TemplateSource::new(repo.path().to_string_lossy()),
    };

    create_project(&ws.context(), &request, &GitCliFetcher::new()).unwrap();

    let target = ws.target("myapp");
    assert!(read(&target.join("go.mod")).starts_with("module github.com/alice/myapp\n"));
    assert!(!target.join(".git").exists());
    assert!(!target.join(".gitignore").exists());
    assert!(ws.scratch_is_empty());
}

#[test]
fn git_fetcher_failure_for_missing_repository() {
    if !support::git_available() {
        eprintln!("skipping: git not available");
        return;
    }

    let ws = Workspace::new();
    let missing = ws.scratch.path().join("no-such-repo");
    let request = CreateRequest {
        project_name: "myapp".into(),
        account: "alice".into(),
        source: TemplateSource::new(missing.to_string_lossy()),
    };

    let err = create_project(&ws.context(), &request, &GitCliFetcher::new()).unwrap_err();

    assert!(matches!(err, CreateError::FetchFailure { .. }));
    assert!(!ws.target("myapp").exists());
    assert!(ws.scratch_is_empty());
}
