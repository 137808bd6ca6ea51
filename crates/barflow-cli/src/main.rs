use std::path::PathBuf;

use barflow::barflow_config::PresetStoreConfig;
use barflow::modules::permissions::{PresetManager, store_from_config};
use barflow_cli::inspect;
use barflow_models::EmployeeRole;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::debug;

#[derive(Parser)]
#[command(name = "barflow-cli")]
#[command(about = "Inspect Barflow roles, presets and permission sets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every role with its rank, access level and manageable roles
    Roles,
    /// Show the default permissions of a role, one module per line
    Defaults {
        /// Role key, e.g. cashier_attendant
        #[arg(short, long)]
        role: String,
    },
    /// Check whether a role may perform an action on a module
    Check {
        #[arg(short, long)]
        role: String,

        #[arg(short, long)]
        module: String,

        #[arg(short, long)]
        action: String,

        /// JSON file with per-user overrides
        #[arg(short, long)]
        overrides: Option<PathBuf>,
    },
    /// Summarize the default permission set of a role
    Summary {
        #[arg(short, long)]
        role: String,
    },
    /// Validate a permission set stored as JSON
    Validate {
        /// JSON object keyed by module
        file: PathBuf,

        /// Role the set is meant for
        #[arg(short, long, default_value = "waiter")]
        role: String,

        /// Print a repaired copy of the set
        #[arg(short, long)]
        sanitize: bool,
    },
    /// List built-in and custom presets from the configured store
    Presets,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    barflow_observability::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Roles => {
            print!("{}", inspect::render_roles(&PresetManager::new()));
        }
        Commands::Defaults { role } => handle_defaults(&role),
        Commands::Check {
            role,
            module,
            action,
            overrides,
        } => handle_check(&role, &module, &action, overrides),
        Commands::Summary { role } => handle_summary(&role),
        Commands::Validate {
            file,
            role,
            sanitize,
        } => handle_validate(file, &role, sanitize)?,
        Commands::Presets => handle_presets()?,
    }

    Ok(())
}

fn handle_defaults(role: &str) {
    match role.parse::<EmployeeRole>() {
        Ok(role) => print!("{}", inspect::render_defaults(&PresetManager::new(), role)),
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_check(role: &str, module: &str, action: &str, overrides: Option<PathBuf>) {
    let overrides = match overrides.map(|path| inspect::read_permissions(&path)).transpose() {
        Ok(overrides) => overrides,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    match inspect::check(&PresetManager::new(), role, module, action, overrides.as_ref()) {
        Ok(true) => println!("✅ {} may {} on {}", role, action, module),
        Ok(false) => {
            println!("❌ {} may not {} on {}", role, action, module);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_summary(role: &str) {
    match inspect::summary(&PresetManager::new(), role) {
        Ok(summary) => println!("{}: {}", role, summary),
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_validate(file: PathBuf, role: &str, sanitize: bool) -> anyhow::Result<()> {
    let permissions = inspect::read_permissions(&file)?;
    let (result, repaired) = inspect::validate(&permissions, role, sanitize)?;

    if result.is_valid {
        println!("✅ {} is consistent", file.display());
    } else {
        for error in &result.errors {
            println!("❌ {}", error);
        }
    }

    if let Some(repaired) = repaired {
        println!("{}", serde_json::to_string_pretty(&repaired)?);
    }

    if !result.is_valid && !sanitize {
        std::process::exit(1);
    }
    Ok(())
}

fn handle_presets() -> anyhow::Result<()> {
    let config = PresetStoreConfig::from_env();
    debug!(persistent = config.is_persistent(), "Loading presets");

    let manager = PresetManager::with_store(store_from_config(&config))?;
    print!("{}", inspect::render_presets(&manager));
    Ok(())
}
