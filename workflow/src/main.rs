//! Project folder scaffolding for design-software templates.
//!
//! Reads per-profile directories from `config.json`, builds the dated project
//! folder, copies the chosen template into it and opens the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};

use workflow::core::types::{Category, WorkflowRequest};
use workflow::error::WorkflowError;
use workflow::exit_codes;
use workflow::io::config::{DEFAULT_CONFIG_PATH, load_config};
use workflow::io::confirm::{AssumeYes, Confirm, StdinConfirm};
use workflow::io::opener::SystemOpener;
use workflow::io::templates::{TemplateListing, list_templates};
use workflow::logging;
use workflow::materialize::{ExecuteOutcome, OpenStatus, execute};
use workflow::profiles::{
    Profile, ProfileCatalog, clear_template_directory, persist, set_base_directory,
    set_template_directory,
};

#[derive(Parser)]
#[command(
    name = "workflow",
    version,
    about = "Create dated project folders from design-software templates"
)]
struct Cli {
    /// Configuration file holding per-profile directories.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show every profile with its base and template directories.
    Profiles,
    /// Select the base directory of a profile.
    SetBase { profile: String, dir: PathBuf },
    /// Select a template directory instead of `<base>/Modelos`.
    SetTemplates { profile: String, dir: PathBuf },
    /// Go back to the automatic `<base>/Modelos` template directory.
    ClearTemplates { profile: String },
    /// List the templates available to a profile.
    Templates { profile: String },
    /// Create the project folder, copy a template into it and open the copy.
    New(NewArgs),
}

#[derive(clap::Args)]
struct NewArgs {
    profile: String,
    /// Client or project name (folder under the month).
    #[arg(long)]
    name: String,
    /// Output filename without extension.
    #[arg(long)]
    file: String,
    /// Template filename as listed by `workflow templates`.
    #[arg(long)]
    template: Option<String>,
    #[arg(long, value_enum, default_value_t = CategoryArg::Client)]
    category: CategoryArg,
    /// Nested folders below the project folder, e.g. `Kitchen/Cabinet`.
    #[arg(long)]
    subpath: Option<String>,
    /// Overwrite an existing file without asking.
    #[arg(short, long)]
    yes: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Client,
    Other,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Client => Category::Client,
            CategoryArg::Other => Category::Other,
        }
    }
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = cli.config.as_path();
    match cli.command {
        Command::Profiles => cmd_profiles(config),
        Command::SetBase { profile, dir } => cmd_set_base(config, &profile, &dir),
        Command::SetTemplates { profile, dir } => cmd_set_templates(config, &profile, &dir),
        Command::ClearTemplates { profile } => cmd_clear_templates(config, &profile),
        Command::Templates { profile } => cmd_templates(config, &profile),
        Command::New(args) => cmd_new(config, args),
    }
}

fn cmd_profiles(config: &Path) -> Result<i32> {
    let doc = load_config(config);
    let catalog = ProfileCatalog::from_document(&doc);
    for profile in catalog.resolve_all(&doc) {
        let spec = &profile.spec;
        println!(
            "{} ({}): templates={} output={}",
            spec.name, spec.label, spec.template_extension, spec.output_extension
        );
        match &profile.base_directory {
            Some(base) => println!("  base: {}", base.display()),
            None => println!("  base: not selected"),
        }
        match profile.template_directory() {
            Some(dir) => {
                let mode = if profile.uses_automatic_templates() {
                    "automatic"
                } else {
                    "override"
                };
                let state = if dir.is_dir() { "" } else { " (not found)" };
                println!("  templates: {} [{}]{}", dir.display(), mode, state);
            }
            None => println!("  templates: automatic"),
        }
    }
    Ok(exit_codes::OK)
}

fn cmd_set_base(config: &Path, profile: &str, dir: &Path) -> Result<i32> {
    let mut doc = load_config(config);
    let catalog = ProfileCatalog::from_document(&doc);
    let base = set_base_directory(&catalog, &mut doc, profile, dir)?;
    persist(config, &mut doc)?;
    println!("base: {}", base.display());
    let profile = catalog.resolve(profile, &doc)?;
    print_templates(&profile)?;
    Ok(exit_codes::OK)
}

fn cmd_set_templates(config: &Path, profile: &str, dir: &Path) -> Result<i32> {
    let mut doc = load_config(config);
    let catalog = ProfileCatalog::from_document(&doc);
    let templates = set_template_directory(&catalog, &mut doc, profile, dir)?;
    persist(config, &mut doc)?;
    println!("templates: {}", templates.display());
    let profile = catalog.resolve(profile, &doc)?;
    print_templates(&profile)?;
    Ok(exit_codes::OK)
}

fn cmd_clear_templates(config: &Path, profile: &str) -> Result<i32> {
    let mut doc = load_config(config);
    let catalog = ProfileCatalog::from_document(&doc);
    clear_template_directory(&catalog, &mut doc, profile)?;
    persist(config, &mut doc)?;
    println!("templates: automatic");
    Ok(exit_codes::OK)
}

fn cmd_templates(config: &Path, profile: &str) -> Result<i32> {
    let doc = load_config(config);
    let catalog = ProfileCatalog::from_document(&doc);
    let profile = catalog.resolve(profile, &doc)?;
    print_templates(&profile)?;
    Ok(exit_codes::OK)
}

fn print_templates(profile: &Profile) -> Result<()> {
    let Some(dir) = profile.template_directory() else {
        eprintln!(
            "warning: no base directory selected for profile {}",
            profile.spec.name
        );
        return Ok(());
    };
    let listing = list_templates(&dir, &profile.spec.template_extension)
        .with_context(|| format!("list templates for {}", profile.spec.name))?;
    match listing {
        TemplateListing::Available(names) => {
            for name in names {
                println!("{name}");
            }
        }
        TemplateListing::MissingDirectory(dir) => {
            eprintln!("warning: template folder not found: {}", dir.display());
        }
    }
    Ok(())
}

fn cmd_new(config: &Path, args: NewArgs) -> Result<i32> {
    let doc = load_config(config);
    let catalog = ProfileCatalog::from_document(&doc);
    let profile = catalog.resolve(&args.profile, &doc)?;
    let request = WorkflowRequest {
        profile: profile.spec.name.clone(),
        category: args.category.into(),
        project_name: args.name,
        subpath: args.subpath,
        template_filename: args.template,
        output_filename: args.file,
    };
    let today = Local::now().date_naive();

    let confirm: &dyn Confirm = if args.yes { &AssumeYes } else { &StdinConfirm };
    match execute(&request, &profile, today, confirm, &SystemOpener) {
        Ok(ExecuteOutcome::Created {
            directory,
            file,
            open,
        }) => {
            println!("directory: {}", directory.display());
            println!("created: {}", file.display());
            match open {
                OpenStatus::Opened => Ok(exit_codes::OK),
                OpenStatus::Failed(message) => {
                    eprintln!("warning: {message}");
                    Ok(exit_codes::OPEN_FAILED)
                }
            }
        }
        Ok(ExecuteOutcome::Cancelled { file }) => {
            println!("cancelled: {} left unchanged", file.display());
            Ok(exit_codes::OK)
        }
        Err(err) => {
            let code = match err {
                WorkflowError::Validation(_) => exit_codes::INVALID,
                WorkflowError::Filesystem { .. } => exit_codes::FILESYSTEM,
            };
            eprintln!("{:#}", anyhow::Error::from(err));
            Ok(code)
        }
    }
}
