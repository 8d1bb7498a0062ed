mod fetch;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use svcgen_core::config::{self, CONFIG_FILE_NAME, GenConfig};
use svcgen_core::parse;
use svcgen_core::transform::{self, BuildOptions, DescriptorSet};
use svcgen_core::{CodeGenerator, GeneratedFile};
use svcgen_typescript::{TypeScriptConfig, TypeScriptGenerator};

#[derive(Parser)]
#[command(
    name = "svcgen",
    about = "Generate TypeScript service clients from OpenAPI v3 documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the services and types modules
    Generate {
        /// Path to the config file (defaults to .svcgen.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the document URL from the config
        #[arg(long)]
        doc_url: Option<String>,
    },

    /// Print the parsed operation descriptors
    Inspect {
        /// Path to the config file (defaults to .svcgen.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the document URL from the config
        #[arg(long)]
        doc_url: Option<String>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Write a starter .svcgen.yaml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { config, doc_url } => cmd_generate(config, doc_url),

        Commands::Inspect {
            config,
            doc_url,
            format,
        } => cmd_inspect(config, doc_url, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "svcgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the config file (explicit path or `.svcgen.yaml`), apply CLI
/// overrides, and check it is usable before any I/O happens.
fn load_effective_config(path: Option<PathBuf>, doc_url: Option<String>) -> Result<GenConfig> {
    let path = path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let mut cfg = config::load_config(&path)?.unwrap_or_default();
    if let Some(doc_url) = doc_url {
        cfg.doc_url = doc_url;
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Fetch, parse, and transform the configured document.
fn load_descriptors(cfg: &GenConfig) -> Result<DescriptorSet> {
    let raw = fetch::fetch_document(&cfg.doc_url)?;
    let doc = parse::from_json(&raw)?;

    let options = BuildOptions {
        base_url: if cfg.base_url.is_empty() {
            None
        } else {
            Some(cfg.base_url.clone())
        },
        include_paths: cfg.include_paths.clone(),
        exclude_paths: cfg.exclude_paths.clone(),
    };
    let set = transform::build(&doc, &options)?;
    Ok(set)
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn cmd_generate(config_path: Option<PathBuf>, doc_url: Option<String>) -> Result<()> {
    let cfg = load_effective_config(config_path, doc_url)?;
    let set = load_descriptors(&cfg)?;

    let ts_config = TypeScriptConfig {
        template_dir: cfg.template_dir.as_ref().map(PathBuf::from),
        services_file_name: cfg.services_file_name.clone(),
        types_file_name: cfg.types_file_name.clone(),
    };
    let files = TypeScriptGenerator.generate(&set, &ts_config)?;

    let output_dir = PathBuf::from(&cfg.output_dir);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    write_files(&output_dir, &files)?;

    eprintln!(
        "Generated {} operations into {}",
        set.services.len(),
        output_dir.display()
    );
    Ok(())
}

fn cmd_inspect(
    config_path: Option<PathBuf>,
    doc_url: Option<String>,
    format: InspectFormat,
) -> Result<()> {
    let cfg = load_effective_config(config_path, doc_url)?;
    let set = load_descriptors(&cfg)?;

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&set.services)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&set.services)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
