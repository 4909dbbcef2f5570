use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use modscaffold::config::DEFAULT_CONFIG_FILE;
use modscaffold::generator::write_if_absent;
use modscaffold::{
    defaults, BatchRunner, FileGenerator, GenerationOutcome, TemplateSet, WriteResult,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a YAML or JSON configuration file (default: ./modgen.yaml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base output directory (overrides config if provided)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Dry run mode - don't write files
    #[arg(long, global = true)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default templates and config, keeping files that already exist
    Init,
    /// Generate the files of one or more modules
    Generate {
        /// Module names, e.g. `users` or `userProfile`
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Generate the predefined module list
    Batch,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut template_set = TemplateSet::load(cli.config.as_deref());
    if let Some(output) = cli.output {
        template_set.output_dir = output;
    }

    match cli.command {
        Commands::Init => {
            let config_path = cli
                .config
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            init_project(&template_set, &config_path)?;
        }
        Commands::Generate { names } => {
            generate(&template_set, &names, cli.dry_run)?;
        }
        Commands::Batch => {
            generate(&template_set, &defaults::BATCH_MODULES, cli.dry_run)?;
        }
    }

    Ok(())
}

fn init_project(template_set: &TemplateSet, config_path: &Path) -> Result<()> {
    info!("Initializing template store at {:?}", template_set.templates_dir);

    for (path, result) in defaults::bootstrap_store(template_set)? {
        report_write(&path, result);
    }

    let config_content =
        serde_yaml::to_string(template_set).context("Failed to serialize config")?;
    let result = write_if_absent(config_path, &config_content)?;
    report_write(config_path, result);

    info!("✓ Template store ready!");
    info!("  Run: modgen generate <names...>");
    Ok(())
}

fn report_write(path: &Path, result: WriteResult) {
    match result {
        WriteResult::Written => info!("✓ created {:?}", path),
        WriteResult::Skipped => info!("  kept {:?}", path),
    }
}

fn generate<S: AsRef<str>>(
    template_set: &TemplateSet,
    names: &[S],
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        info!("=== DRY RUN MODE ===");
    }

    let generator = FileGenerator::new(template_set).with_dry_run(dry_run);
    let report = BatchRunner::new(generator)
        .run(names)
        .context("Cannot generate modules")?;

    for (module, unit) in report.outcomes() {
        match unit.outcome {
            GenerationOutcome::Failed(_) => {
                error!("✗ {}/{}: {}", module, unit.template, unit.outcome)
            }
            GenerationOutcome::Generated(_) | GenerationOutcome::Planned(_) => {
                info!("✓ {}/{}: {}", module, unit.template, unit.outcome)
            }
            _ => info!("  {}/{}: {}", module, unit.template, unit.outcome),
        }
    }

    let summary = report.summary();
    info!(
        "{} generated, {} planned, {} skipped, {} failed",
        summary.generated, summary.planned, summary.skipped, summary.failed
    );

    if dry_run {
        info!("=== DRY RUN COMPLETE ===");
    }
    Ok(())
}
