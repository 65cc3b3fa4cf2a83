use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cuttle::query::{compose, FieldConfig, Operator, QueryOptions};
use cuttle::schema::MappingRoot;
use cuttle::store::{
    ExportBundle, FileRepository, Repository, SavedMapping, SavedQuery,
};
use cuttle::{format, StoreConfig};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

#[derive(Parser)]
#[command(name = "cuttle")]
#[command(about = "Compose Elasticsearch query documents from index mappings", long_about = None)]
struct Args {
    /// Data directory for saved mappings and queries
    #[arg(long, env = "CUTTLE_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the searchable field paths of a mapping
    Fields {
        /// Mapping JSON file
        #[arg(short, long)]
        mapping: PathBuf,
    },

    /// List the nested group paths of a mapping
    Nested {
        /// Mapping JSON file
        #[arg(short, long)]
        mapping: PathBuf,
    },

    /// Show the operators available for a field path
    Operators {
        /// Mapping JSON file
        #[arg(short, long)]
        mapping: PathBuf,

        /// Dot-separated field path
        #[arg(short, long)]
        field: String,
    },

    /// Compose a query document from a build spec
    Build {
        /// Mapping JSON file
        #[arg(short, long)]
        mapping: PathBuf,

        /// Build spec JSON file: { "configs": [...], "options": {...} }
        #[arg(short, long)]
        spec: PathBuf,

        /// Print compact JSON instead of pretty
        #[arg(long)]
        compact: bool,
    },

    /// Saved query operations
    #[command(subcommand)]
    Query(QueryCommand),

    /// Saved mapping operations
    #[command(subcommand)]
    Mapping(MappingCommand),

    /// Write all saved data to a bundle file
    Export {
        /// Bundle file to write
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Replace all saved data from a bundle file
    Import {
        /// Bundle file to read
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum QueryCommand {
    /// List saved queries
    List,

    /// Print a saved query
    Show { name: String },

    /// Compose a query and save it under a name
    Save {
        name: String,

        /// Mapping JSON file
        #[arg(short, long)]
        mapping: PathBuf,

        /// Build spec JSON file
        #[arg(short, long)]
        spec: PathBuf,
    },

    /// Delete a saved query
    Delete { name: String },
}

#[derive(Subcommand)]
enum MappingCommand {
    /// List saved mappings
    List,

    /// Save a mapping file under a name
    Save {
        name: String,

        /// Mapping JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Delete a saved mapping
    Delete { name: String },
}

/// Build spec read from disk: the clauses plus the query-level options
#[derive(Debug, Deserialize)]
struct BuildSpec {
    #[serde(default)]
    configs: Vec<FieldConfig>,
    #[serde(default)]
    options: Option<QueryOptions>,
}

fn read_json(path: &Path) -> Result<Value> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn read_mapping_root(path: &Path) -> Result<MappingRoot> {
    let value = read_json(path)?;
    MappingRoot::extract(&value).with_context(|| {
        format!(
            "{} matches neither accepted mapping envelope",
            path.display()
        )
    })
}

fn read_build_spec(path: &Path) -> Result<BuildSpec> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid build spec {}", path.display()))
}

fn compose_from_files(mapping: &Path, spec: &Path) -> Result<String> {
    // Composition is gated on a recognized mapping, like the interactive flow
    let _root = read_mapping_root(mapping)?;
    let spec = read_build_spec(spec)?;
    let options = spec.options.unwrap_or_default();
    let document = compose(&spec.configs, &options);
    Ok(document.to_json_pretty()?)
}

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("name must not be empty");
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let store = StoreConfig::new(args.data_dir);

    match args.command {
        Command::Fields { mapping } => {
            let root = read_mapping_root(&mapping)?;
            for path in root.field_paths() {
                let field_type = root.resolve_type(&path);
                let operators: Vec<&str> = Operator::for_field_type(&field_type)
                    .iter()
                    .map(Operator::as_str)
                    .collect();
                println!("{:<40} {:<10} [{}]", path, field_type, operators.join(", "));
            }
        }

        Command::Nested { mapping } => {
            let root = read_mapping_root(&mapping)?;
            for path in root.nested_paths() {
                println!("{}", path);
            }
        }

        Command::Operators { mapping, field } => {
            let root = read_mapping_root(&mapping)?;
            let field_type = root.resolve_type(&field);
            println!("{} resolves to `{}`", field, field_type);
            for (position, operator) in Operator::for_field_type(&field_type).iter().enumerate() {
                let mut notes = Vec::new();
                if position == 0 {
                    notes.push("default");
                }
                if !operator.takes_value() {
                    notes.push("no value");
                }
                if notes.is_empty() {
                    println!("  {}", operator);
                } else {
                    println!("  {} ({})", operator, notes.join(", "));
                }
            }
        }

        Command::Build {
            mapping,
            spec,
            compact,
        } => {
            let rendered = compose_from_files(&mapping, &spec)?;
            if compact {
                // Round-trip through serde to drop the indentation
                let value: Value = serde_json::from_str(&rendered)?;
                println!("{}", serde_json::to_string(&value)?);
            } else {
                println!("{}", rendered);
            }
        }

        Command::Query(command) => {
            let repo = FileRepository::<SavedQuery>::open(store.queries_path());
            match command {
                QueryCommand::List => {
                    for entry in repo.list()? {
                        println!("{:<30} {}", entry.name, entry.saved_at.to_rfc3339());
                    }
                }
                QueryCommand::Show { name } => {
                    let Some(entry) = repo.get(&name)? else {
                        bail!("no saved query named '{}'", name);
                    };
                    println!("{}", format::prettify(&entry.query));
                }
                QueryCommand::Save {
                    name,
                    mapping,
                    spec,
                } => {
                    require_name(&name)?;
                    let rendered = compose_from_files(&mapping, &spec)?;
                    repo.put(SavedQuery::new(name.as_str(), rendered))?;
                    info!(name = %name, "query saved");
                    println!("saved query '{}'", name);
                }
                QueryCommand::Delete { name } => {
                    if repo.delete(&name)? {
                        println!("deleted query '{}'", name);
                    } else {
                        bail!("no saved query named '{}'", name);
                    }
                }
            }
        }

        Command::Mapping(command) => {
            let repo = FileRepository::<SavedMapping>::open(store.mappings_path());
            match command {
                MappingCommand::List => {
                    for entry in repo.list()? {
                        println!("{:<30} {}", entry.name, entry.saved_at.to_rfc3339());
                    }
                }
                MappingCommand::Save { name, file } => {
                    require_name(&name)?;
                    let value = read_json(&file)?;
                    if MappingRoot::extract(&value).is_none() {
                        bail!(
                            "{} matches neither accepted mapping envelope",
                            file.display()
                        );
                    }
                    repo.put(SavedMapping::new(name.as_str(), value))?;
                    println!("saved mapping '{}'", name);
                }
                MappingCommand::Delete { name } => {
                    if repo.delete(&name)? {
                        println!("deleted mapping '{}'", name);
                    } else {
                        bail!("no saved mapping named '{}'", name);
                    }
                }
            }
        }

        Command::Export { out } => {
            let mappings = FileRepository::<SavedMapping>::open(store.mappings_path());
            let queries = FileRepository::<SavedQuery>::open(store.queries_path());
            let bundle = ExportBundle::collect(&mappings, &queries)?;
            bundle.write_to(&out)?;
            println!(
                "exported {} mappings and {} queries to {}",
                bundle.mappings.len(),
                bundle.queries.len(),
                out.display()
            );
        }

        Command::Import { file } => {
            let mappings = FileRepository::<SavedMapping>::open(store.mappings_path());
            let queries = FileRepository::<SavedQuery>::open(store.queries_path());
            let bundle = ExportBundle::read_from(&file)?;
            let (mapping_count, query_count) = (bundle.mappings.len(), bundle.queries.len());
            bundle.apply(&mappings, &queries)?;
            println!(
                "imported {} mappings and {} queries",
                mapping_count, query_count
            );
        }
    }

    Ok(())
}
