//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use goth::core::identity::TEMPLATE_MODULE;
use goth::scaffold::{FetchError, TemplateSource, TreeFetcher};

/// Write a miniature copy of the starter template under `root`.
pub fn write_template(root: &Path) {
    fs::create_dir_all(root.join("handlers")).unwrap();
    fs::create_dir_all(root.join("views")).unwrap();
    fs::create_dir_all(root.join(".git/refs")).unwrap();
    fs::create_dir_all(root.join(".github/workflows")).unwrap();

    fs::write(
        root.join("go.mod"),
        format!("module {TEMPLATE_MODULE}\n\ngo 1.22\n\nrequire github.com/a-h/templ v0.2.543\n"),
    )
    .unwrap();
    fs::write(
        root.join("main.go"),
        format!(
            "package main\n\nimport (\n\t\"{TEMPLATE_MODULE}/handlers\"\n)\n\nfunc main() {{ handlers.Serve() }}\n"
        ),
    )
    .unwrap();
    fs::write(
        root.join("handlers/home.go"),
        format!("package handlers\n\nimport \"{TEMPLATE_MODULE}/views\"\n\nfunc Serve() {{ _ = views.Home }}\n"),
    )
    .unwrap();
    fs::write(
        root.join("views/home.templ"),
        format!("package views\n\nimport \"{TEMPLATE_MODULE}/views/layout\"\n\ntempl Home() {{}}\n"),
    )
    .unwrap();
    fs::write(root.join("Makefile"), "setup:\n\tgo mod tidy\n\ndev:\n\tair\n").unwrap();
    fs::write(root.join(".env.example"), "PORT=3000\n").unwrap();
    fs::write(root.join(".gitignore"), "tmp/\n").unwrap();
    fs::write(root.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
    fs::write(root.join(".github/workflows/ci.yml"), "on: push\n").unwrap();
}

/// Fetcher that copies nothing from the network and writes the fixture template.
pub struct FixtureFetcher;

impl TreeFetcher for FixtureFetcher {
    fn fetch(&self, _source: &TemplateSource, dest: &Path) -> Result<(), FetchError> {
        fs::create_dir_all(dest).map_err(|source| FetchError::Spawn {
            program: "fixture".into(),
            source,
        })?;
        write_template(dest);
        Ok(())
    }
}

/// Fetcher that always fails after leaving debris in the destination.
pub struct FailingFetcher;

impl TreeFetcher for FailingFetcher {
    fn fetch(&self, _source: &TemplateSource, dest: &Path) -> Result<(), FetchError> {
        fs::create_dir_all(dest).map_err(|source| FetchError::Spawn {
            program: "fixture".into(),
            source,
        })?;
        fs::write(dest.join("partial"), "half a clone").unwrap();
        Err(FetchError::Failed {
            program: "git clone".into(),
            status: "exit status: 128".into(),
            detail: Some("fatal: repository not found".into()),
        })
    }
}

/// Fetcher that records whether it ran.
#[derive(Default)]
pub struct RecordingFetcher {
    pub called: std::cell::Cell<bool>,
}

impl TreeFetcher for RecordingFetcher {
    fn fetch(&self, source: &TemplateSource, dest: &Path) -> Result<(), FetchError> {
        self.called.set(true);
        FixtureFetcher.fetch(source, dest)
    }
}

/// Names of the entries directly under `dir`.
pub fn entries(dir: &Path) -> Vec<PathBuf> {
    match fs::read_dir(dir) {
        Ok(read) => read.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

/// Whether a usable `git` is on PATH.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Run git in `dir`, panicking on failure.
pub fn run_git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}

/// Turn `dir` into a git repository whose single commit holds the fixture template.
pub fn init_template_repo(dir: &Path) {
    write_template(dir);
    // The fixture's fake .git would confuse `git init`.
    fs::remove_dir_all(dir.join(".git")).unwrap();

    run_git(dir, &["init", "-q"]);
    run_git(dir, &["config", "user.email", "test@example.com"]);
    run_git(dir, &["config", "user.name", "Test User"]);
    run_git(dir, &["config", "commit.gpgsign", "false"]);
    run_git(dir, &["add", "-A"]);
    run_git(dir, &["commit", "-q", "-m", "Initial template"]);
}
