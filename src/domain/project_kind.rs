use std::fmt;

/// Schema generation of the hosting front-end project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectKind {
    /// AngularJS 1.x: no manifest, browser-global env scripts.
    LegacyAngularJs,
    /// Angular CLI before 6: `.angular-cli.json` with an `apps` array.
    NgCliLegacy,
    /// Angular 6+: `angular.json` workspace with per-project targets.
    AngularModern,
}

impl ProjectKind {
    /// Whether this kind uses TypeScript descriptors and a JSON manifest.
    pub fn uses_descriptors(self) -> bool {
        !matches!(self, ProjectKind::LegacyAngularJs)
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectKind::LegacyAngularJs => "AngularJS (browser globals)",
            ProjectKind::NgCliLegacy => "Angular CLI legacy (.angular-cli.json)",
            ProjectKind::AngularModern => "Angular workspace (angular.json)",
        }
    }

    /// Shell commands that build and serve the given configuration.
    pub fn usage_hint(self, env_name: &str) -> Vec<String> {
        match self {
            ProjectKind::AngularModern => vec![
                format!("ng build --configuration {}", env_name),
                format!("ng serve --configuration {}", env_name),
            ],
            ProjectKind::NgCliLegacy => {
                vec![format!("ng build --env={}", env_name), format!("ng serve --env={}", env_name)]
            }
            ProjectKind::LegacyAngularJs => {
                vec![format!("<script src=\"env.{}.js\"></script>", env_name)]
            }
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
