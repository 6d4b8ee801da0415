//! Docshelf CLI

use clap::{Parser, Subcommand};
use docshelf::prelude::*;
use docshelf_core::StoreConfig;
use std::path::PathBuf;

/// Docshelf - versioned documentation file store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the documentation root directory
    #[arg(short, long, env = "DOCSHELF_ROOT")]
    root: Option<String>,

    /// Path to a YAML configuration file (flags override its root)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long, action = clap::ArgAction::SetTrue)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List version namespaces
    Versions,
    /// List documents, grouped by category
    List {
        /// Restrict the listing to one version
        #[arg(short, long)]
        version: Option<String>,
    },
    /// Read a single document
    Read { version: String, path: String },
    /// Create a document from a metadata stub
    Create {
        version: String,
        file_name: String,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        order: Option<i64>,
    },
    /// Save (overwrite) a document's frontmatter and content
    Save {
        version: String,
        path: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        order: Option<i64>,
        /// Document body, inline
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,
        /// Document body, read from a file
        #[arg(long)]
        content_file: Option<PathBuf>,
        /// Fail if the document changed since this hash was read
        #[arg(long)]
        expected_hash: Option<String>,
    },
    /// Delete a document and prune empty category directories
    Delete { version: String, path: String },
    /// Rename a document within its version
    Rename {
        version: String,
        old_path: String,
        new_path: String,
    },
    /// Duplicate a document within its version
    Duplicate {
        version: String,
        old_path: String,
        new_path: String,
    },
    /// Create a category directory
    CreateCategory { version: String, name: String },
}

fn fields(
    title: Option<String>,
    description: Option<String>,
    icon: Option<String>,
    order: Option<i64>,
) -> Fields {
    Fields {
        title,
        description,
        icon,
        order,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the JSON response.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Configuration file first, --root/env override on top.
    let tools = match (&args.config, &args.root) {
        (Some(config_path), root) => {
            let mut config = StoreConfig::load(config_path).await?;
            if let Some(root) = root {
                config.root = PathBuf::from(shellexpand::tilde(root).as_ref());
            }
            config.validate()?;
            DocTools::from_config(config)?
        }
        (None, Some(root)) => DocTools::open(root)?,
        (None, None) => {
            anyhow::bail!("no documentation root: pass --root, set DOCSHELF_ROOT, or use --config")
        }
    };

    log::debug!("Docshelf v{}", env!("CARGO_PKG_VERSION"));

    let result = match args.command {
        Command::Versions => tools.list_versions().await,
        Command::List { version } => tools.list_documents(version.as_deref()).await,
        Command::Read { version, path } => tools.read_document(&version, &path).await,
        Command::Create {
            version,
            file_name,
            category,
            title,
            description,
            icon,
            order,
        } => {
            tools
                .create_document(
                    &version,
                    category.as_deref(),
                    &file_name,
                    fields(title, description, icon, order),
                )
                .await
        }
        Command::Save {
            version,
            path,
            title,
            description,
            icon,
            order,
            content,
            content_file,
            expected_hash,
        } => {
            let body = match (content, content_file) {
                (Some(text), _) => text,
                (None, Some(file)) => tokio::fs::read_to_string(&file).await?,
                (None, None) => String::new(),
            };
            tools
                .save_document(
                    &version,
                    &path,
                    fields(title, description, icon, order),
                    &body,
                    expected_hash.as_deref(),
                )
                .await
        }
        Command::Delete { version, path } => tools.delete_document(&version, &path).await,
        Command::Rename {
            version,
            old_path,
            new_path,
        } => tools.rename_document(&version, &old_path, &new_path).await,
        Command::Duplicate {
            version,
            old_path,
            new_path,
        } => {
            tools
                .duplicate_document(&version, &old_path, &new_path)
                .await
        }
        Command::CreateCategory { version, name } => {
            tools.create_category(&version, &name).await
        }
    };

    let failed = result.is_err();
    let envelope = response::to_json(result);

    let rendered = if args.compact {
        serde_json::to_string(&envelope)?
    } else {
        serde_json::to_string_pretty(&envelope)?
    };
    println!("{}", rendered);

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
