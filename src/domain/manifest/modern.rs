use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};

use super::{object_entry, parse_object};
use crate::domain::AppError;
use crate::domain::paths::DEFAULT_SOURCE_ROOT;

/// Which key a project keeps its build targets under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetsKey {
    Targets,
    Architect,
}

impl TargetsKey {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetsKey::Targets => "targets",
            TargetsKey::Architect => "architect",
        }
    }

    /// `targets` if present, else `architect` (the Angular CLI default).
    fn detect(project: &Map<String, Value>) -> Self {
        if project.contains_key("targets") { TargetsKey::Targets } else { TargetsKey::Architect }
    }
}

/// A project entry resolved from the workspace manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    /// Source root relative to the workspace root, forward slashes.
    pub source_root: String,
    pub targets_key: TargetsKey,
    /// Names of the targets declared under `targets_key`.
    pub targets: Vec<String>,
}

/// What happened to the `fileReplacements` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementChange {
    Appended,
    Updated,
    Unchanged,
}

/// Parsed `angular.json`.
#[derive(Debug, Clone)]
pub struct WorkspaceManifest {
    path: PathBuf,
    document: Value,
}

impl WorkspaceManifest {
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, AppError> {
        let path = path.into();
        let document = parse_object(&path, content)?;
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    fn projects(&self) -> Option<&Map<String, Value>> {
        self.document.get("projects").and_then(Value::as_object)
    }

    /// Declared project names in document order.
    pub fn project_names(&self) -> Vec<String> {
        self.projects().map(|p| p.keys().cloned().collect()).unwrap_or_default()
    }

    /// Resolve the requested project, else `defaultProject`, else the first
    /// declared project.
    pub fn resolve_project(&self, requested: Option<&str>) -> Result<ProjectInfo, AppError> {
        let projects = match self.projects() {
            Some(p) if !p.is_empty() => p,
            _ => return Err(AppError::NoProjects(self.path.clone())),
        };

        let name = match requested {
            Some(name) => name.to_string(),
            None => self
                .document
                .get("defaultProject")
                .and_then(Value::as_str)
                .filter(|n| projects.contains_key(*n))
                .map(str::to_string)
                .or_else(|| projects.keys().next().cloned())
                .ok_or_else(|| AppError::NoProjects(self.path.clone()))?,
        };

        let project = projects.get(&name).and_then(Value::as_object).ok_or_else(|| {
            AppError::ProjectNotFound {
                name: name.clone(),
                available: self.project_names().join(", "),
            }
        })?;

        let targets_key = TargetsKey::detect(project);
        let targets = project
            .get(targets_key.as_str())
            .and_then(Value::as_object)
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default();

        Ok(ProjectInfo { source_root: source_root_of(project), name, targets_key, targets })
    }

    /// Register `env_name` so that `replace` is swapped for `with` at build
    /// time, and link the serve target to the new build configuration.
    pub fn register_environment(
        &mut self,
        project: &ProjectInfo,
        env_name: &str,
        replace: &str,
        with: &str,
    ) -> Result<ReplacementChange, AppError> {
        let path = self.path.clone();
        let project_map = self
            .document
            .get_mut("projects")
            .and_then(Value::as_object_mut)
            .and_then(|p| p.get_mut(&project.name))
            .and_then(Value::as_object_mut)
            .ok_or_else(|| {
                AppError::manifest_shape(&path, format!("project '{}' is missing", project.name))
            })?;

        let targets = object_entry(&path, project_map, project.targets_key.as_str())?;

        let change = {
            let build = object_entry(&path, targets, "build")?;
            let configurations = object_entry(&path, build, "configurations")?;
            let configuration = object_entry(&path, configurations, env_name)?;
            upsert_replacement(&path, configuration, replace, with)?
        };

        if let Some(serve) = targets.get_mut("serve").and_then(Value::as_object_mut) {
            let mut reference = Map::new();
            reference.insert(
                serve_reference_key(serve).to_string(),
                Value::String(format!("{}:build:{}", project.name, env_name)),
            );
            let configurations = object_entry(&path, serve, "configurations")?;
            configurations.insert(env_name.to_string(), Value::Object(reference));
        }

        Ok(change)
    }
}

fn source_root_of(project: &Map<String, Value>) -> String {
    if let Some(source_root) = project.get("sourceRoot").and_then(Value::as_str) {
        return source_root.trim_end_matches('/').to_string();
    }
    match project.get("root").and_then(Value::as_str).map(|r| r.trim_end_matches('/')) {
        Some(root) if !root.is_empty() => format!("{}/{}", root, DEFAULT_SOURCE_ROOT),
        _ => DEFAULT_SOURCE_ROOT.to_string(),
    }
}

fn upsert_replacement(
    path: &Path,
    configuration: &mut Map<String, Value>,
    replace: &str,
    with: &str,
) -> Result<ReplacementChange, AppError> {
    let entries = configuration
        .entry("fileReplacements".to_string())
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| AppError::manifest_shape(path, "'fileReplacements' is not an array"))?;

    let existing = entries
        .iter_mut()
        .filter_map(Value::as_object_mut)
        .find(|entry| entry.get("replace").and_then(Value::as_str) == Some(replace));

    match existing {
        Some(entry) if entry.get("with").and_then(Value::as_str) == Some(with) => {
            Ok(ReplacementChange::Unchanged)
        }
        Some(entry) => {
            entry.insert("with".to_string(), Value::String(with.to_string()));
            Ok(ReplacementChange::Updated)
        }
        None => {
            entries.push(json!({ "replace": replace, "with": with }));
            Ok(ReplacementChange::Appended)
        }
    }
}

/// `browserTarget` when the serve target already uses it, else `buildTarget`.
fn serve_reference_key(serve: &Map<String, Value>) -> &'static str {
    let uses_browser_target = |v: &Value| v.get("browserTarget").is_some();
    let in_options = serve.get("options").is_some_and(uses_browser_target);
    let in_configurations = serve
        .get("configurations")
        .and_then(Value::as_object)
        .is_some_and(|c| c.values().any(uses_browser_target));
    if in_options || in_configurations { "browserTarget" } else { "buildTarget" }
}
