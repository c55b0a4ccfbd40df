//! Shared testing utilities for ngenv CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Testing harness providing an isolated project directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the project directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `ngenv` binary within the project.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("ngenv").expect("Failed to locate ngenv binary");
        cmd.current_dir(self.work_dir()).env_remove("NGENV_LOG");
        cmd
    }

    /// Write a file relative to the project, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.work_dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(path, content).expect("Failed to write fixture");
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.work_dir.join(rel)).expect("Failed to read project file")
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.work_dir.join(rel).exists()
    }

    /// Parse a JSON file relative to the project.
    pub fn read_json(&self, rel: &str) -> serde_json::Value {
        serde_json::from_str(&self.read(rel)).expect("Project file is not valid JSON")
    }

    /// Write a single-project `angular.json` using the given targets key.
    pub fn write_angular_json(&self, targets_key: &str) {
        let targets = serde_json::json!({
            "build": {
                "builder": "@angular-devkit/build-angular:browser",
                "configurations": {
                    "production": { "optimization": true }
                }
            },
            "serve": {
                "builder": "@angular-devkit/build-angular:dev-server",
                "options": { "buildTarget": "shop:build" }
            }
        });
        let mut project = serde_json::json!({
            "projectType": "application",
            "root": "",
            "sourceRoot": "src"
        });
        project[targets_key] = targets;
        let manifest = serde_json::json!({
            "$schema": "./node_modules/@angular/cli/lib/config/schema.json",
            "version": 1,
            "projects": { "shop": project }
        });
        let content = serde_json::to_string_pretty(&manifest).expect("serializable manifest");
        self.write("angular.json", &format!("{}\n", content));
    }

    /// Every file under the project with its bytes, sorted by path.
    pub fn snapshot(&self) -> Vec<(String, Vec<u8>)> {
        let mut entries: Vec<_> = WalkDir::new(&self.work_dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = e.path().strip_prefix(&self.work_dir).unwrap();
                (rel.to_string_lossy().into_owned(), fs::read(e.path()).unwrap())
            })
            .collect();
        entries.sort();
        entries
    }

    /// File names in the project root that look like manifest backups.
    pub fn backups(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.work_dir)
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.contains(".bak."))
            .collect();
        names.sort();
        names
    }
}
