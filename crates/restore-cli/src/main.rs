//! Restore CLI - state-restoration goal compiler.
//!
//! Single binary that provides:
//! - `restore compile <domain>` - compile a bundled domain and print its goals
//! - `restore count <domain>` - instance counts before grounding
//! - `restore check <domain>` - does the empty plan already reach the goals
//! - `restore domains` - list bundled domains
//! - `restore init` - write a default config

mod config;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use restore_compiler::{
    compile, CompileReceipt, CompiledModel, Compiler, EmptyPlanCheck, SolveOutcome, Solver,
};
use restore_domains::DomainsConfig;
use restore_model::{Domain, Model};

use crate::config::{config_path, RestoreConfig, DEFAULT_CONFIG};

#[derive(Parser)]
#[command(name = "restore")]
#[command(about = "State-restoration goal compiler", version)]
struct Cli {
    /// Project root directory
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Config file (defaults to .restore/config.yaml under the project root)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a domain and print its goal set
    Compile {
        /// Bundled domain name
        domain: String,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Include the compile receipt
        #[arg(long)]
        receipt: bool,

        /// Override the shadow fluent prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Refuse to ground more than this many instances
        #[arg(long)]
        max_instances: Option<u64>,
    },

    /// Show candidate instance counts without grounding
    Count {
        domain: String,
    },

    /// Check whether the initial state already satisfies every goal
    Check {
        domain: String,
    },

    /// List bundled domains
    Domains,

    /// Initialize a new project
    Init,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct CompileOutput<'a> {
    domain: &'a str,
    restoration_goals: Vec<String>,
    success_goals: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt: Option<&'a CompileReceipt>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let project_root = match cli.project {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Compile {
            domain,
            format,
            receipt,
            prefix,
            max_instances,
        } => {
            let mut config = RestoreConfig::resolve(cli.config.as_deref(), &project_root)?;
            if let Some(prefix) = prefix {
                config.compile.shadow_prefix = prefix;
            }
            if max_instances.is_some() {
                config.compile.max_instances = max_instances;
            }
            compile_domain(&config, &domain, format, receipt)
        }
        Commands::Count { domain } => {
            let config = RestoreConfig::resolve(cli.config.as_deref(), &project_root)?;
            count_instances(&config, &domain)
        }
        Commands::Check { domain } => {
            let config = RestoreConfig::resolve(cli.config.as_deref(), &project_root)?;
            check_domain(&config, &domain)
        }
        Commands::Domains => {
            list_domains();
            Ok(())
        }
        Commands::Init => init_project(&project_root),
    }
}

fn lookup(name: &str, config: &DomainsConfig) -> Result<Box<dyn Domain>> {
    restore_domains::by_name(name, config).ok_or_else(|| {
        anyhow!(
            "Unknown domain '{}' (available: {})",
            name,
            restore_domains::NAMES.join(", ")
        )
    })
}

fn compile_with(config: &RestoreConfig, name: &str) -> Result<CompiledModel> {
    let domain = lookup(name, &config.domains)?;
    tracing::info!(domain = %name, restoration = ?config.compile.restoration, "Compiling domain");
    compile(domain.as_ref(), &config.compile)
        .with_context(|| format!("Failed to compile domain {}", name))
}

fn compile_domain(config: &RestoreConfig, name: &str, format: Format, receipt: bool) -> Result<()> {
    let compiled = compile_with(config, name)?;
    let render = |goals: &[restore_model::Formula]| -> Vec<String> {
        goals.iter().map(|g| g.to_string()).collect()
    };

    match format {
        Format::Json => {
            let output = CompileOutput {
                domain: compiled.domain(),
                restoration_goals: render(compiled.restoration_goals()),
                success_goals: render(compiled.success_goals()),
                receipt: receipt.then(|| compiled.receipt()),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Text => {
            println!("Domain: {}", compiled.domain());
            println!();
            println!("Restoration goals: {}", compiled.restoration_goals().len());
            for goal in compiled.restoration_goals() {
                println!("  {}", goal);
            }
            println!();
            println!("Success goals: {}", compiled.success_goals().len());
            for goal in compiled.success_goals() {
                println!("  {}", goal);
            }
            if receipt {
                print_receipt(compiled.receipt());
            }
        }
    }

    Ok(())
}

fn print_receipt(receipt: &CompileReceipt) {
    println!();
    println!("Receipt");
    println!("=======");
    println!("Goal hash: {}", receipt.goal_hash);
    println!("Generated: {}", receipt.generated_at.to_rfc3339());
    println!("Compile time: {} ms", receipt.compile_time_ms);
    for schema in &receipt.schemas {
        println!(
            "  {} -> {}: {} defined of {} candidates",
            schema.fluent, schema.shadow, schema.defined, schema.candidates
        );
    }
}

fn count_instances(config: &RestoreConfig, name: &str) -> Result<()> {
    let domain = lookup(name, &config.domains)?;
    let mut model = Model::new(domain.name());
    let setup = domain
        .author(&mut model)
        .with_context(|| format!("Failed to author domain {}", name))?;

    let counts = Compiler::new(config.compile.clone()).count(&model, &setup)?;
    let total: u128 = counts.iter().map(|(_, n)| *n).fold(0, u128::saturating_add);

    println!("Tracked fluents in {}:", name);
    for (fluent, n) in &counts {
        println!("  {:<24} {}", fluent, n);
    }
    println!("Total: {}", total);
    if let Some(limit) = config.compile.max_instances {
        if total > u128::from(limit) {
            println!("Exceeds max_instances ({})", limit);
        }
    }

    Ok(())
}

fn check_domain(config: &RestoreConfig, name: &str) -> Result<()> {
    let compiled = compile_with(config, name)?;
    let solver = EmptyPlanCheck;

    match solver.solve(&compiled)? {
        SolveOutcome::Plan(_) => {
            println!("{}: initial state satisfies all {} goals", name, compiled.goals().len());
        }
        SolveOutcome::NoPlan => {
            let state = compiled.initial_state();
            let open: Vec<String> = compiled
                .goals()
                .iter()
                .filter(|g| g.evaluate(&state) != Some(true))
                .map(|g| g.to_string())
                .collect();
            println!("{}: {} of {} goals open in the initial state", name, open.len(), compiled.goals().len());
            for goal in open {
                println!("  {}", goal);
            }
        }
    }

    Ok(())
}

fn list_domains() {
    println!("Bundled domains:");
    for name in restore_domains::NAMES {
        println!("  {}", name);
    }
}

fn init_project(project_root: &Path) -> Result<()> {
    let config_path = config_path(project_root);
    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    if !config_path.exists() {
        std::fs::write(&config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
    }

    println!("Initialized restore project at {}", project_root.display());
    println!();
    println!("Created:");
    println!("  .restore/config.yaml - compiler configuration");
    println!();
    println!("Next steps:");
    println!("  1. Edit .restore/config.yaml");
    println!("  2. Run: restore compile museum");

    Ok(())
}
