//! `package.json` dependency evidence for project-kind detection.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;
use serde::Deserialize;
use serde_json::Value;

use super::ProjectKind;

pub const PACKAGE_JSON: &str = "package.json";

static VERSION_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,16})(?:\.([0-9]{1,16}))?(?:\.([0-9]{1,16}))?")
        .expect("version pattern is valid")
});

/// The dependency fields of a `package.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    dependencies: BTreeMap<String, Value>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, Value>,
}

impl PackageManifest {
    /// Parse `package.json` content; anything malformed yields no dependencies.
    pub fn parse_lenient(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_default()
    }

    /// Dependency entry by name; `devDependencies` wins over `dependencies`.
    pub fn dependency(&self, name: &str) -> Option<&Value> {
        self.dev_dependencies.get(name).or_else(|| self.dependencies.get(name))
    }

    /// Classify from dependencies alone. `None` means no evidence.
    pub fn infer_kind(&self) -> Option<ProjectKind> {
        if let Some(core) = self.dependency("@angular/core").and_then(Value::as_str)
            && let Some(version) = coerce_version(core)
        {
            let kind = if version >= Version::new(6, 0, 0) {
                ProjectKind::AngularModern
            } else {
                ProjectKind::NgCliLegacy
            };
            return Some(kind);
        }

        if self.dependency("angular").is_some_and(Value::is_string) {
            return Some(ProjectKind::LegacyAngularJs);
        }

        None
    }
}

/// Pull the first `major[.minor[.patch]]` run out of a version range.
/// Missing components default to zero.
pub fn coerce_version(range: &str) -> Option<Version> {
    let caps = VERSION_RUN.captures(range)?;
    let part = |i: usize| -> Option<u64> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };
    Some(Version::new(part(1)?, part(2)?, part(3)?))
}
