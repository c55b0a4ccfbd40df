//! `list`: enumerate descriptor files under the environments directory.

use serde::Serialize;

use crate::app::AppContext;
use crate::app::config::{effective_project, resolve_source_root};
use crate::app::detect::detect_project_kind;
use crate::domain::paths::{environments_dir, is_descriptor_file_name, to_slash_relative};
use crate::domain::AppError;
use crate::ports::{ProjectFilesystem, Reporter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub project: Option<String>,
    pub source_root: Option<String>,
    pub format: ListFormat,
}

/// Descriptor files found, relative to the environments directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListOutcome {
    pub count: usize,
    pub files: Vec<String>,
}

/// Execute `list`.
pub fn execute<F, R>(ctx: &AppContext<F, R>, options: ListOptions) -> Result<ListOutcome, AppError>
where
    F: ProjectFilesystem,
    R: Reporter,
{
    let kind = detect_project_kind(ctx.filesystem(), ctx.root());
    if !kind.uses_descriptors() {
        let outcome = ListOutcome::default();
        match options.format {
            ListFormat::Text => ctx
                .reporter()
                .info(&format!("Listing descriptors is not applicable to {} projects", kind)),
            ListFormat::Json => ctx.reporter().raw(&serde_json::to_string_pretty(&outcome)?),
        }
        return Ok(outcome);
    }

    let project = effective_project(ctx, options.project.as_deref());
    let source_root = resolve_source_root(ctx, kind, options.source_root.as_deref(), project)?;
    let dir = environments_dir(&source_root, None);

    let files = if ctx.filesystem().is_dir(&dir) {
        let mut files: Vec<String> = ctx
            .filesystem()
            .walk_files(&dir)?
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(is_descriptor_file_name)
            })
            .map(|path| to_slash_relative(&path, &dir))
            .collect();
        files.sort();
        files
    } else {
        if options.format == ListFormat::Text {
            let shown = ctx.display_path(&dir);
            ctx.reporter().warn(&format!("No environments directory at {}", shown));
        }
        Vec::new()
    };

    let outcome = ListOutcome { count: files.len(), files };
    match options.format {
        ListFormat::Text => {
            ctx.reporter().info(&format!(
                "Found {} environment file(s) in {}",
                outcome.count,
                ctx.display_path(&dir)
            ));
            for file in &outcome.files {
                ctx.reporter().item(file);
            }
        }
        ListFormat::Json => ctx.reporter().raw(&serde_json::to_string_pretty(&outcome)?),
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestProject;

    #[test]
    fn lists_only_descriptors_sorted() {
        let project = TestProject::new();
        project.write("src/environments/environment.ts", "");
        project.write("src/environments/f1/environment.sit.ts", "");
        project.write("src/environments/notes.txt", "");
        project.write("src/environments/environment.a.b.ts", "");
        let ctx = project.context();

        let outcome = execute(&ctx, ListOptions::default()).unwrap();

        assert_eq!(outcome.files, vec!["environment.ts", "f1/environment.sit.ts"]);
        assert_eq!(outcome.count, 2);
        assert!(ctx.reporter().lines().contains(&"item: f1/environment.sit.ts".to_string()));
    }

    #[test]
    fn missing_directory_warns_with_zero_count() {
        let project = TestProject::new();
        let ctx = project.context();

        let outcome = execute(&ctx, ListOptions::default()).unwrap();

        assert_eq!(outcome.count, 0);
        assert!(ctx.reporter().lines()[0].starts_with("warn: No environments directory"));
    }

    #[test]
    fn json_format_prints_machine_readable_output() {
        let project = TestProject::new();
        project.write("src/environments/environment.prod.ts", "");
        let ctx = project.context();
        let options = ListOptions { format: ListFormat::Json, ..Default::default() };

        execute(&ctx, options).unwrap();

        let lines = ctx.reporter().lines();
        assert_eq!(lines.len(), 1);
        let json: serde_json::Value =
            serde_json::from_str(lines[0].strip_prefix("raw: ").unwrap()).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["files"][0], "environment.prod.ts");
    }

    #[test]
    fn angularjs_projects_are_not_applicable() {
        let project = TestProject::new();
        project.write("package.json", r#"{"dependencies": {"angular": "1.6.0"}}"#);
        project.write("src/environments/environment.ts", "");
        let ctx = project.context();

        let outcome = execute(&ctx, ListOptions::default()).unwrap();

        assert_eq!(outcome.count, 0);
        assert!(ctx.reporter().lines()[0].contains("not applicable"));
    }
}
