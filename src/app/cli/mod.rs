//! CLI Adapter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::adapters::ConsoleReporter;
use crate::app::api::{self, GenerateOptions, ListFormat, ListOptions};
use crate::app::logging;
use crate::domain::AppError;
use crate::ports::Reporter;

#[derive(Parser, Debug)]
#[command(name = "ngenv")]
#[command(version)]
#[command(
    about = "Generate Angular environment files and register them in the workspace manifest",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    cwd: Option<PathBuf>,
    /// Increase diagnostic output (-v, -vv, -vvv); NGENV_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an environment file and register it with the build
    #[clap(visible_alias = "g")]
    Gen(GenArgs),
    /// List environment files under <source-root>/environments
    #[clap(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
struct GenArgs {
    /// Environment name, e.g. uat
    env: String,
    /// Subfolder under environments/
    #[arg(short, long)]
    folder: Option<String>,
    /// Workspace project to patch
    #[arg(short, long)]
    project: Option<String>,
    /// Source root relative to the project root
    #[arg(long)]
    source_root: Option<String>,
    /// Dotenv file to read values from (must exist)
    #[arg(long)]
    env_file: Option<PathBuf>,
    /// Inline value, repeatable: --set apiUrl=https://example.com
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
    /// Existing environment to clone, e.g. prod
    #[arg(long, value_name = "NAME")]
    copy_from: Option<String>,
    /// Print what would change without writing
    #[arg(long)]
    dry_run: bool,
    /// Skip the manifest backup
    #[arg(long)]
    no_backup: bool,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Workspace project whose source root is listed
    #[arg(short, long)]
    project: Option<String>,
    /// Source root relative to the project root
    #[arg(long)]
    source_root: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ListFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ListFormat::Text,
            OutputFormat::Json => ListFormat::Json,
        }
    }
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    debug!(?cli, "parsed arguments");

    if let Err(e) = dispatch(cli) {
        ConsoleReporter::new().error(&e.to_string());
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), AppError> {
    let root = match cli.cwd {
        Some(dir) => std::env::current_dir()?.join(dir),
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Gen(args) => {
            let options = GenerateOptions {
                env_name: args.env,
                folder: args.folder,
                project: args.project,
                source_root: args.source_root,
                env_file: args.env_file,
                set: args.set,
                copy_from: args.copy_from,
                dry_run: args.dry_run,
                backup: args.no_backup.then_some(false),
            };
            api::generate_at(root, options).map(|_| ())
        }
        Commands::List(args) => {
            let options = ListOptions {
                project: args.project,
                source_root: args.source_root,
                format: args.format.into(),
            };
            api::list_at(root, options).map(|_| ())
        }
    }
}
