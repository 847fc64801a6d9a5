//! CLI entry point for draftpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use draftpress::commands::{self, draft::DraftSlot};
use draftpress::Workspace;

#[derive(Parser)]
#[command(name = "draftpress")]
#[command(author = "Omar Rocha")]
#[command(version)]
#[command(about = "Markdown authoring toolkit for a developer blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown file
    Render {
        /// Markdown file with optional front-matter
        file: PathBuf,

        /// Output format (html, page, json)
        #[arg(short, long, default_value = "html")]
        format: String,
    },

    /// Parse Markdown files and stage them for publishing
    Import {
        /// Files or directories to import
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Show the staging list
    Staged,

    /// Remove a post from the staging list
    Unstage {
        /// Index as shown by `staged`
        index: usize,
    },

    /// Publish every staged post
    Publish {
        /// Author id (defaults to author_id in draftpress.yml)
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Generate a complete post about a topic
    #[command(alias = "g")]
    Generate {
        /// What the post should be about
        topic: String,
    },

    /// Write the body of a post from its title and excerpt
    Write {
        /// Markdown file whose front-matter describes the post
        file: PathBuf,
    },

    /// One-line insight for a search query
    Insight {
        query: String,
    },

    /// Review autosaved drafts
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },

    /// List stored posts
    List {
        /// Only posts with this status (draft, published)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Create a new post file
    New {
        /// Title of the new post
        title: String,
    },

    /// Start the preview server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Show draft posts too
        #[arg(long)]
        drafts: bool,
    },

    /// Remove the staging list and autosaved drafts
    Clean,

    /// Display version information
    Version,
}

#[derive(Subcommand)]
enum DraftAction {
    /// Print a draft
    Show {
        /// The editor draft instead of the generated one
        #[arg(long)]
        editor: bool,
    },

    /// Stage a draft for publishing
    Approve {
        #[arg(long)]
        editor: bool,
    },

    /// Drop a draft
    Discard {
        #[arg(long)]
        editor: bool,
    },

    /// Keep a Markdown file as the editor draft
    Save { file: PathBuf },
}

fn slot(editor: bool) -> DraftSlot {
    if editor {
        DraftSlot::Editor
    } else {
        DraftSlot::Review
    }
}

/// Relative paths on the command line are relative to the base directory
fn resolve(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "draftpress=debug,info"
    } else {
        "draftpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    let workspace = Workspace::new(&base_dir)?;

    match cli.command {
        Commands::Render { file, format } => {
            commands::render::run(&workspace, &resolve(&base_dir, file), &format)?;
        }

        Commands::Import { paths } => {
            let paths: Vec<PathBuf> = paths.into_iter().map(|p| resolve(&base_dir, p)).collect();
            tracing::info!("Importing {} path(s)...", paths.len());
            commands::import::run(&workspace, &paths)?;
        }

        Commands::Staged => commands::import::list_staged(&workspace)?,

        Commands::Unstage { index } => commands::import::unstage(&workspace, index)?,

        Commands::Publish { author } => {
            tracing::info!("Publishing staged posts...");
            commands::publish::run(&workspace, author.as_deref())?;
        }

        Commands::Generate { topic } => commands::generate::run(&workspace, &topic).await?,

        Commands::Write { file } => {
            commands::generate::run_write(&workspace, &resolve(&base_dir, file)).await?
        }

        Commands::Insight { query } => commands::generate::run_insight(&workspace, &query).await?,

        Commands::Draft { action } => match action {
            DraftAction::Show { editor } => commands::draft::show(&workspace, slot(editor))?,
            DraftAction::Approve { editor } => {
                commands::draft::approve(&workspace, slot(editor))?;
            }
            DraftAction::Discard { editor } => commands::draft::discard(&workspace, slot(editor))?,
            DraftAction::Save { file } => {
                commands::draft::save_file(&workspace, &resolve(&base_dir, file))?;
            }
        },

        Commands::List { status } => commands::list::run(&workspace, status.as_deref())?,

        Commands::New { title } => {
            tracing::info!("Creating new post: {}", title);
            commands::new::create_post(&workspace, &title)?;
        }

        Commands::Serve { port, ip, drafts } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            draftpress::server::start(&workspace, &ip, port, drafts).await?;
        }

        Commands::Clean => {
            tracing::info!("Cleaning staging list and autosave...");
            commands::clean::run(&workspace)?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("draftpress version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
