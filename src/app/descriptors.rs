//! Descriptor file creation, cloning and templating.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::descriptor::{render_browser_global, render_descriptor, render_minimal};
use crate::domain::paths::{PROD_ENV, browser_global_path, descriptor_path};
use crate::domain::{AppError, EnvironmentValues};
use crate::ports::{ProjectFilesystem, Reporter};

use super::AppContext;

/// How the root baseline descriptor is (or would be) brought into existence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaselineStep {
    Present,
    CopyFromProd(PathBuf),
    Synthesize,
}

/// Creates descriptor files, honouring dry-run at every write.
///
/// Files written during the run (or that a dry run would have written) count
/// as existing for later probes, so a preview makes the same decisions as a
/// real run.
pub struct DescriptorGenerator<'a, F: ProjectFilesystem, R: Reporter> {
    ctx: &'a AppContext<F, R>,
    dry_run: bool,
    pending: Vec<PathBuf>,
}

impl<'a, F: ProjectFilesystem, R: Reporter> DescriptorGenerator<'a, F, R> {
    pub fn new(ctx: &'a AppContext<F, R>, dry_run: bool) -> Self {
        Self { ctx, dry_run, pending: Vec::new() }
    }

    fn exists(&self, path: &Path) -> bool {
        self.pending.iter().any(|p| p == path) || self.ctx.filesystem().file_exists(path)
    }

    /// Treat `path` as existing for subsequent probes.
    pub fn expect_file(&mut self, path: PathBuf) {
        if !self.pending.contains(&path) {
            self.pending.push(path);
        }
    }

    /// Whether the descriptor at `path` exists (or will, within this run).
    pub fn descriptor_exists(&self, path: &Path) -> bool {
        self.exists(path)
    }

    /// What `ensure_baseline` will do, without doing it.
    pub fn baseline_step(&self, source_root: &Path) -> BaselineStep {
        let fs = self.ctx.filesystem();
        if fs.file_exists(&descriptor_path(source_root, None, None)) {
            return BaselineStep::Present;
        }
        let prod = descriptor_path(source_root, Some(PROD_ENV), None);
        if fs.file_exists(&prod) {
            BaselineStep::CopyFromProd(prod)
        } else {
            BaselineStep::Synthesize
        }
    }

    /// Guarantee the root unnamed descriptor exists.
    pub fn ensure_baseline(&mut self, source_root: &Path) -> Result<BaselineStep, AppError> {
        let baseline = descriptor_path(source_root, None, None);
        let step = self.baseline_step(source_root);
        match &step {
            BaselineStep::Present => {
                debug!(path = %baseline.display(), "baseline present");
            }
            BaselineStep::CopyFromProd(prod) => {
                self.copy(prod, &baseline)?;
            }
            BaselineStep::Synthesize => {
                let content = render_minimal()?;
                self.write_content(&baseline, &content)?;
            }
        }
        Ok(step)
    }

    /// First existing clone template: prod then base in `folder`, then prod
    /// then base at the root.
    pub fn find_clone_source(&self, source_root: &Path, folder: Option<&str>) -> Option<PathBuf> {
        let candidates = [
            descriptor_path(source_root, Some(PROD_ENV), folder),
            descriptor_path(source_root, None, folder),
            descriptor_path(source_root, Some(PROD_ENV), None),
            descriptor_path(source_root, None, None),
        ];
        candidates.into_iter().find(|p| self.exists(p))
    }

    /// The explicitly named descriptor (in `folder`, then at the root) if it
    /// exists, else [`Self::find_clone_source`].
    pub fn resolve_clone_source(
        &self,
        source_root: &Path,
        folder: Option<&str>,
        explicit: Option<&str>,
    ) -> Option<PathBuf> {
        if let Some(name) = explicit {
            let named = [
                descriptor_path(source_root, Some(name), folder),
                descriptor_path(source_root, Some(name), None),
            ];
            if let Some(found) = named.into_iter().find(|p| self.exists(p)) {
                return Some(found);
            }
            debug!(name, "explicit clone source missing");
        }
        self.find_clone_source(source_root, folder)
    }

    /// Render and write `environment.<name>.ts`. Returns the (would-be) path.
    pub fn write(
        &mut self,
        name: &str,
        values: &EnvironmentValues,
        source_root: &Path,
        folder: Option<&str>,
    ) -> Result<PathBuf, AppError> {
        let target = descriptor_path(source_root, Some(name), folder);
        let content = render_descriptor(Some(name), values)?;
        self.write_content(&target, &content)?;
        Ok(target)
    }

    /// Byte-copy a template to `environment.<dest_name>.ts`. `None` when no
    /// template exists; the caller falls back to [`Self::write`].
    pub fn clone_descriptor(
        &mut self,
        source_root: &Path,
        dest_name: &str,
        folder: Option<&str>,
        explicit: Option<&str>,
    ) -> Result<Option<PathBuf>, AppError> {
        let Some(source) = self.resolve_clone_source(source_root, folder, explicit) else {
            return Ok(None);
        };
        let target = descriptor_path(source_root, Some(dest_name), folder);
        self.copy(&source, &target)?;
        Ok(Some(target))
    }

    /// Write the browser-global `env.<name>.js` script.
    pub fn write_browser_global(
        &mut self,
        name: &str,
        namespace: &str,
        values: &EnvironmentValues,
        source_root: &Path,
    ) -> Result<PathBuf, AppError> {
        let target = browser_global_path(source_root, name);
        let content = render_browser_global(namespace, values)?;
        self.write_content(&target, &content)?;
        Ok(target)
    }

    fn write_content(&mut self, path: &Path, content: &str) -> Result<(), AppError> {
        let shown = self.ctx.display_path(path);
        if self.dry_run {
            self.ctx.reporter().info(&format!("[dry-run] would write {}", shown));
        } else {
            self.ctx.filesystem().write_file(path, content)?;
            self.ctx.reporter().success(&format!("Wrote {}", shown));
        }
        self.expect_file(path.to_path_buf());
        Ok(())
    }

    fn copy(&mut self, from: &Path, to: &Path) -> Result<(), AppError> {
        let (from_shown, to_shown) = (self.ctx.display_path(from), self.ctx.display_path(to));
        if self.dry_run {
            let message = format!("[dry-run] would copy {} -> {}", from_shown, to_shown);
            self.ctx.reporter().info(&message);
        } else {
            self.ctx.filesystem().copy_file(from, to)?;
            self.ctx.reporter().success(&format!("Copied {} -> {}", from_shown, to_shown));
        }
        self.expect_file(to.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_pairs;
    use crate::testing::TestProject;
    use std::fs;

    #[test]
    fn baseline_is_synthesized_when_nothing_exists() {
        let project = TestProject::new();
        let ctx = project.context();
        let mut generator = DescriptorGenerator::new(&ctx, false);

        let step = generator.ensure_baseline(&project.src()).unwrap();

        assert_eq!(step, BaselineStep::Synthesize);
        let content = project.read("src/environments/environment.ts");
        assert!(content.contains("production: false"));
    }

    #[test]
    fn baseline_copies_prod_verbatim() {
        let project = TestProject::new();
        project.write(
            "src/environments/environment.prod.ts",
            "// prod\nexport const environment = { production: true };\n",
        );
        let ctx = project.context();
        let mut generator = DescriptorGenerator::new(&ctx, false);

        let step = generator.ensure_baseline(&project.src()).unwrap();

        assert!(matches!(step, BaselineStep::CopyFromProd(_)));
        assert_eq!(
            project.read("src/environments/environment.ts"),
            project.read("src/environments/environment.prod.ts")
        );
    }

    #[test]
    fn existing_baseline_is_untouched() {
        let project = TestProject::new();
        project.write("src/environments/environment.ts", "custom");
        let ctx = project.context();
        let mut generator = DescriptorGenerator::new(&ctx, false);

        assert_eq!(generator.ensure_baseline(&project.src()).unwrap(), BaselineStep::Present);
        assert_eq!(project.read("src/environments/environment.ts"), "custom");
    }

    #[test]
    fn dry_run_baseline_writes_nothing_but_counts_as_present() {
        let project = TestProject::new();
        let ctx = project.context();
        let mut generator = DescriptorGenerator::new(&ctx, true);

        generator.ensure_baseline(&project.src()).unwrap();

        assert!(!project.path("src/environments").exists());
        let source = generator.find_clone_source(&project.src(), None).unwrap();
        assert!(source.ends_with("environments/environment.ts"));
        assert!(ctx.reporter().lines().iter().any(|l| l.contains("[dry-run] would write")));
    }

    #[test]
    fn clone_source_prefers_folder_prod() {
        let project = TestProject::new();
        project.write("src/environments/environment.ts", "root base");
        project.write("src/environments/environment.prod.ts", "root prod");
        project.write("src/environments/t1/environment.ts", "folder base");
        let ctx = project.context();
        let generator = DescriptorGenerator::new(&ctx, false);

        let src = project.src();
        let found = generator.find_clone_source(&src, Some("t1")).unwrap();
        assert!(found.ends_with("environments/t1/environment.ts"));

        project.write("src/environments/t1/environment.prod.ts", "folder prod");
        let found = generator.find_clone_source(&src, Some("t1")).unwrap();
        assert!(found.ends_with("environments/t1/environment.prod.ts"));

        let found = generator.find_clone_source(&src, Some("t2")).unwrap();
        assert!(found.ends_with("environments/environment.prod.ts"));
    }

    #[test]
    fn no_clone_source_in_empty_tree() {
        let project = TestProject::new();
        let ctx = project.context();
        let mut generator = DescriptorGenerator::new(&ctx, false);
        assert_eq!(generator.find_clone_source(&project.src(), None), None);
        assert_eq!(generator.clone_descriptor(&project.src(), "qa", None, None).unwrap(), None);
    }

    #[test]
    fn clone_uses_explicit_source_when_present() {
        let project = TestProject::new();
        project.write("src/environments/environment.prod.ts", "prod");
        project.write("src/environments/environment.sit.ts", "sit");
        let ctx = project.context();
        let mut generator = DescriptorGenerator::new(&ctx, false);

        let dest = generator.clone_descriptor(&project.src(), "uat", None, Some("sit")).unwrap();

        assert!(dest.unwrap().ends_with("environment.uat.ts"));
        assert_eq!(project.read("src/environments/environment.uat.ts"), "sit");
    }

    #[test]
    fn missing_explicit_source_falls_back_to_default_template() {
        let project = TestProject::new();
        project.write("src/environments/environment.prod.ts", "prod");
        let ctx = project.context();
        let mut generator = DescriptorGenerator::new(&ctx, false);

        generator.clone_descriptor(&project.src(), "uat", None, Some("nope")).unwrap();

        assert_eq!(project.read("src/environments/environment.uat.ts"), "prod");
    }

    #[test]
    fn write_renders_values_into_folder() {
        let project = TestProject::new();
        let ctx = project.context();
        let mut generator = DescriptorGenerator::new(&ctx, false);
        let values = parse_pairs(&["apiUrl=/api"]);

        let path = generator.write("qa", &values, &project.src(), Some("t1")).unwrap();

        assert!(path.ends_with("src/environments/t1/environment.qa.ts"));
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("apiUrl: \"/api\""));
    }

    #[test]
    fn browser_global_is_written_under_source_root() {
        let project = TestProject::new();
        let ctx = project.context();
        let mut generator = DescriptorGenerator::new(&ctx, false);
        let values = parse_pairs(&["debug=true"]);

        let path = generator.write_browser_global("dev", "__env", &values, &project.src()).unwrap();

        assert!(path.ends_with("src/env.dev.js"));
        let script = project.read("src/env.dev.js");
        assert!(script.contains("Object.assign(window.__env, {\"debug\":true})"));
    }
}
