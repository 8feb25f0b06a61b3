//! notion2md: CLI tool to convert changed Notion block exports to Markdown

mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use config::{CONFIG_FILE_NAME, Config};
use notion2md_batch::{
    BatchOptions, Outcome, convert_batch, read_changed_list, read_changed_list_from,
};
use notion2md_core::DocumentOptions;

#[derive(Parser, Debug)]
#[command(name = "notion2md")]
#[command(about = "Convert changed Notion block exports to Markdown")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
#[command(after_help = "Examples:
  notion2md changed_files.txt           # Convert listed _raw/**/*.json files
  git diff --name-only | notion2md -    # Read the list from stdin
  notion2md changed.txt -o docs/ -j4    # Write under docs/ with 4 parallel jobs
  notion2md init                        # Write a sample _notion2md.toml")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    convert: ConvertArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a sample configuration file
    Init(InitArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// File listing changed export files, one per line ("-" reads stdin)
    #[arg(required = true)]
    changed_list: Option<PathBuf>,

    /// Configuration file (defaults to ./_notion2md.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prefix stripped from export paths [default: _raw]
    #[arg(long)]
    input_root: Option<PathBuf>,

    /// Extension of export files [default: json]
    #[arg(long)]
    input_extension: Option<String>,

    /// Directory to write Markdown files under [default: working directory]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Extension for Markdown files [default: md]
    #[arg(long)]
    output_extension: Option<String>,

    /// Omit the auto-generated notice at the top of each file
    #[arg(long)]
    no_notice: bool,

    /// Number of parallel jobs (0 uses all CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Args, Debug)]
struct InitArgs {
    /// Output path for the configuration file
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    output: PathBuf,

    /// Print the JSON schema for the configuration file instead
    #[arg(long)]
    schema: bool,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Init(args)) => run_init(&args),
        None => {
            init_logging(cli.convert.verbose, cli.convert.quiet);
            run_convert(&cli.convert)
        }
    }
}

/// Install the stderr diagnostics subscriber (`RUST_LOG` overrides the flags)
fn init_logging(verbose: bool, quiet: bool) {
    let default_directive = if verbose {
        "notion2md=debug,notion2md_batch=debug"
    } else if quiet {
        "off"
    } else {
        "error"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Convert every export named in the changed list
fn run_convert(args: &ConvertArgs) -> Result<()> {
    let list = args
        .changed_list
        .as_deref()
        .context("No changed list given")?;

    let config = load_config(args.config.as_deref())?;
    let options = resolve_options(args, &config);
    tracing::debug!("Batch options: {:?}", options);

    let files = if list == Path::new("-") {
        read_changed_list_from(io::stdin().lock(), &options.input_extension)
            .context("Failed to read changed list from stdin")?
    } else {
        read_changed_list(list, &options.input_extension)
            .with_context(|| format!("Failed to read changed list: {}", list.display()))?
    };

    if files.is_empty() {
        if !args.quiet {
            println!(
                "No {} files to convert.",
                options.input_extension.to_uppercase()
            );
        }
        return Ok(());
    }

    let result = convert_batch(&files, &options);

    for outcome in &result.outcomes {
        match outcome {
            Outcome::Converted { input, output } => {
                if !args.quiet {
                    println!("Converted: {} \u{2192} {}", input.display(), output.display());
                }
            }
            Outcome::Skipped(path) => {
                if !args.quiet {
                    println!("Skipped (not found): {}", path.display());
                }
            }
            Outcome::Failed { input, message } => {
                eprintln!("Error converting {}: {}", input.display(), message);
            }
        }
    }

    let failed_count = result.failed_count();

    if args.verbose {
        eprintln!(
            "Converted {} files, {} skipped, {} failed",
            result.converted_count(),
            result.skipped_count(),
            failed_count
        );
    }

    if failed_count > 0 {
        anyhow::bail!("{} files failed to convert", failed_count);
    }

    Ok(())
}

/// Load the explicit config file, or `_notion2md.toml` from the working directory
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            Ok(Config::load_from_dir(&cwd)?.unwrap_or_default())
        }
    }
}

/// Merge CLI flags over config values over built-in defaults
fn resolve_options(args: &ConvertArgs, config: &Config) -> BatchOptions {
    let defaults = BatchOptions::default();

    BatchOptions {
        input_root: args
            .input_root
            .clone()
            .or_else(|| config.input.root.clone())
            .unwrap_or(defaults.input_root),
        input_extension: args
            .input_extension
            .clone()
            .or_else(|| config.input.extension.clone())
            .unwrap_or(defaults.input_extension),
        output_dir: args
            .output_dir
            .clone()
            .or_else(|| config.output.dir.clone())
            .unwrap_or(defaults.output_dir),
        output_extension: args
            .output_extension
            .clone()
            .or_else(|| config.output.extension.clone())
            .unwrap_or(defaults.output_extension),
        document: DocumentOptions {
            notice: !args.no_notice && config.output.notice.unwrap_or(defaults.document.notice),
        },
        parallel_jobs: args.jobs.or(config.batch.jobs),
    }
}

/// Write a sample config, or print the config JSON schema
fn run_init(args: &InitArgs) -> Result<()> {
    if args.schema {
        println!("{}", Config::json_schema_string()?);
        return Ok(());
    }

    if args.output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        );
    }

    let content = Config::sample().to_toml_with_schema()?;
    fs::write(&args.output, content)
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;

    println!("{}", args.output.display());
    Ok(())
}
