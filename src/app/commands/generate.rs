//! `gen`: create an environment descriptor and register it in the manifest.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::adapters::load_env_file;
use crate::app::config::{effective_project, resolve_source_root};
use crate::app::descriptors::{BaselineStep, DescriptorGenerator};
use crate::app::detect::detect_project_kind;
use crate::app::manifest_store::{ManifestUpdate, update_legacy_manifest, update_modern_manifest};
use crate::app::{AppContext, WriteOptions};
use crate::domain::descriptor::DEFAULT_GLOBAL_NAMESPACE;
use crate::domain::paths::{browser_global_path, descriptor_file_name, descriptor_path};
use crate::domain::{AppError, EnvironmentValues, ProjectKind, parse_pairs, sanitize_folder};
use crate::ports::{ProjectFilesystem, Reporter};

/// Inputs for `gen`. Unset options fall back to `.ngenv.toml`, then to
/// built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub env_name: String,
    pub folder: Option<String>,
    pub project: Option<String>,
    pub source_root: Option<String>,
    /// Dotenv file; must exist when given.
    pub env_file: Option<PathBuf>,
    /// Inline `key=value` pairs, applied over the dotenv values.
    pub set: Vec<String>,
    /// Descriptor to clone instead of the default template.
    pub copy_from: Option<String>,
    pub dry_run: bool,
    pub backup: Option<bool>,
}

/// How the target descriptor came to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorAction {
    /// Already present; left untouched.
    Reused,
    /// Rendered from the provided values.
    Templated,
    /// Byte-copied from an existing descriptor.
    Cloned(PathBuf),
    /// Rendered with no values.
    Synthesized,
    /// Browser-global script for AngularJS projects.
    BrowserGlobal,
}

#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub kind: ProjectKind,
    /// Descriptor (or browser-global script) for the environment.
    pub path: PathBuf,
    pub action: DescriptorAction,
    /// `None` for AngularJS projects.
    pub manifest: Option<ManifestUpdate>,
}

/// Execute `gen`.
pub fn execute<F, R>(
    ctx: &AppContext<F, R>,
    options: GenerateOptions,
) -> Result<GenerateOutcome, AppError>
where
    F: ProjectFilesystem,
    R: Reporter,
{
    let env_name = validate_env_name(&options.env_name)?;
    let defaults = &ctx.config().defaults;

    let kind = detect_project_kind(ctx.filesystem(), ctx.root());
    ctx.reporter().info(&format!("Detected {}", kind));

    let project = effective_project(ctx, options.project.as_deref());
    let source_root = resolve_source_root(ctx, kind, options.source_root.as_deref(), project)?;
    let folder = sanitize_folder(options.folder.as_deref().or(defaults.folder.as_deref()));
    let values = collect_values(ctx, env_name, options.env_file.as_deref(), &options.set)?;
    let write = WriteOptions {
        dry_run: options.dry_run,
        backup: options.backup.or(defaults.backup).unwrap_or(true),
    };
    debug!(?kind, source_root = %source_root.display(), ?folder, values = values.len(), "gen");

    if write.dry_run {
        ctx.reporter().info("Dry run: no files will be changed");
    }

    let mut generator = DescriptorGenerator::new(ctx, write.dry_run);

    if !kind.uses_descriptors() {
        let namespace =
            defaults.global_namespace.as_deref().unwrap_or(DEFAULT_GLOBAL_NAMESPACE);
        ctx.reporter().info("Plan:");
        ctx.reporter().item(&format!(
            "write {} assigning {} value(s) onto window.{}",
            ctx.display_path(&browser_global_path(&source_root, env_name)),
            values.len(),
            namespace
        ));
        let path = generator.write_browser_global(env_name, namespace, &values, &source_root)?;
        report_completion(ctx, kind, env_name);
        return Ok(GenerateOutcome {
            kind,
            path,
            action: DescriptorAction::BrowserGlobal,
            manifest: None,
        });
    }

    let folder = folder.as_deref();
    let target = descriptor_path(&source_root, Some(env_name), folder);
    let baseline = generator.baseline_step(&source_root);
    generator.expect_file(descriptor_path(&source_root, None, None));
    let action = plan_descriptor(
        &generator,
        &target,
        &values,
        &source_root,
        folder,
        options.copy_from.as_deref(),
    );

    print_plan(ctx, kind, &baseline, &action, &target, &source_root);
    if action == DescriptorAction::Reused && !values.is_empty() {
        ctx.reporter().warn(&format!(
            "{} already exists; ignoring {} provided value(s)",
            ctx.display_path(&target),
            values.len()
        ));
    }
    if let (Some(name), DescriptorAction::Cloned(source)) = (&options.copy_from, &action)
        && !source.ends_with(descriptor_file_name(Some(name.as_str())))
    {
        ctx.reporter().warn(&format!(
            "Descriptor '{}' not found; cloning {} instead",
            name,
            ctx.display_path(source)
        ));
    }

    generator.ensure_baseline(&source_root)?;
    let path = match &action {
        DescriptorAction::Reused => target,
        DescriptorAction::Templated => generator.write(env_name, &values, &source_root, folder)?,
        DescriptorAction::Cloned(_) => match generator.clone_descriptor(
            &source_root,
            env_name,
            folder,
            options.copy_from.as_deref(),
        )? {
            Some(path) => path,
            None => generator.write(env_name, &EnvironmentValues::new(), &source_root, folder)?,
        },
        DescriptorAction::Synthesized | DescriptorAction::BrowserGlobal => {
            generator.write(env_name, &EnvironmentValues::new(), &source_root, folder)?
        }
    };

    let manifest = match kind {
        ProjectKind::NgCliLegacy => update_legacy_manifest(ctx, env_name, &path, write)?,
        _ => update_modern_manifest(ctx, project, env_name, &source_root, &path, write)?,
    };

    info!(env_name, path = %path.display(), "environment generated");
    report_completion(ctx, kind, env_name);
    Ok(GenerateOutcome { kind, path, action, manifest: Some(manifest) })
}

/// Reject names that are empty, would escape the environments directory, or
/// contain a dot (`environment.a.b.ts` is not a descriptor file name).
fn validate_env_name(name: &str) -> Result<&str, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '\\', '.']) {
        return Err(AppError::InvalidEnvironmentName(name.to_string()));
    }
    Ok(trimmed)
}

/// Dotenv values (explicit file, else `.env.<name>`, else `.env`) overlaid
/// with inline pairs.
fn collect_values<F, R>(
    ctx: &AppContext<F, R>,
    env_name: &str,
    env_file: Option<&Path>,
    inline: &[String],
) -> Result<EnvironmentValues, AppError>
where
    F: ProjectFilesystem,
    R: Reporter,
{
    let source = match env_file {
        Some(path) => Some(ctx.root().join(path)),
        None => [ctx.root().join(format!(".env.{}", env_name)), ctx.root().join(".env")]
            .into_iter()
            .find(|p| ctx.filesystem().file_exists(p)),
    };

    let mut values = match &source {
        Some(path) => {
            let loaded = load_env_file(path)?;
            ctx.reporter()
                .info(&format!("Loaded {} value(s) from {}", loaded.len(), ctx.display_path(path)));
            loaded
        }
        None => EnvironmentValues::new(),
    };
    values.merge(parse_pairs(inline));
    Ok(values)
}

/// Reuse, then template, then clone, then synthesize.
fn plan_descriptor<F, R>(
    generator: &DescriptorGenerator<'_, F, R>,
    target: &Path,
    values: &EnvironmentValues,
    source_root: &Path,
    folder: Option<&str>,
    copy_from: Option<&str>,
) -> DescriptorAction
where
    F: ProjectFilesystem,
    R: Reporter,
{
    if generator.descriptor_exists(target) {
        return DescriptorAction::Reused;
    }
    if !values.is_empty() {
        return DescriptorAction::Templated;
    }
    match generator.resolve_clone_source(source_root, folder, copy_from) {
        Some(source) => DescriptorAction::Cloned(source),
        None => DescriptorAction::Synthesized,
    }
}

fn print_plan<F, R>(
    ctx: &AppContext<F, R>,
    kind: ProjectKind,
    baseline: &BaselineStep,
    action: &DescriptorAction,
    target: &Path,
    source_root: &Path,
) where
    F: ProjectFilesystem,
    R: Reporter,
{
    let reporter = ctx.reporter();
    let shown_target = ctx.display_path(target);
    reporter.info("Plan:");

    let baseline_path = ctx.display_path(&descriptor_path(source_root, None, None));
    match baseline {
        BaselineStep::Present => {}
        BaselineStep::CopyFromProd(prod) => reporter
            .item(&format!("create {} from {}", baseline_path, ctx.display_path(prod))),
        BaselineStep::Synthesize => reporter.item(&format!("create minimal {}", baseline_path)),
    }

    match action {
        DescriptorAction::Reused => reporter.item(&format!("keep existing {}", shown_target)),
        DescriptorAction::Templated => {
            reporter.item(&format!("render {} from provided values", shown_target))
        }
        DescriptorAction::Cloned(source) => reporter
            .item(&format!("clone {} -> {}", ctx.display_path(source), shown_target)),
        DescriptorAction::Synthesized | DescriptorAction::BrowserGlobal => {
            reporter.item(&format!("create minimal {}", shown_target))
        }
    }

    let manifest = match kind {
        ProjectKind::NgCliLegacy => ".angular-cli.json",
        _ => "angular.json",
    };
    reporter.item(&format!("register {} in {}", shown_target, manifest));
}

fn report_completion<F, R>(ctx: &AppContext<F, R>, kind: ProjectKind, env_name: &str)
where
    F: ProjectFilesystem,
    R: Reporter,
{
    ctx.reporter().success(&format!("Environment '{}' is ready", env_name));
    let hint = kind.usage_hint(env_name);
    let label = if kind.uses_descriptors() { "Next:" } else { "Include in index.html:" };
    ctx.reporter().info(label);
    for line in hint {
        ctx.reporter().item(&line);
    }
}
