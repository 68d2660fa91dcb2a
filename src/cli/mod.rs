//! Command-line interface for medialib.
//!
//! Seeds a catalog from the configured manifest and runs a single query
//! against it.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;

use crate::config;
use crate::library::{Catalog, Item, ItemType, Manifest, DEFAULT_LABEL_WIDTH};

/// medialib - Media catalog with keyword, member, creator and type lookups
#[derive(Parser, Debug)]
#[command(name = "medialib")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Manifest to load (overrides MEDIALIB_MANIFEST and the config file)
    #[arg(short, long, global = true)]
    pub manifest: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List items in the catalog
    List {
        /// Only list items of this type
        #[arg(short = 't', long = "type", value_enum)]
        media: Option<MediaArg>,
    },

    /// Find items tagged with a keyword
    Keyword {
        /// Keyword to look up
        keyword: String,
    },

    /// Find items of a type by creator (author, director or band)
    Creator {
        /// Creator name
        name: String,

        /// Item type
        #[arg(short = 't', long = "type", value_enum)]
        media: MediaArg,
    },

    /// Find items of a type by member (actor or band member)
    Member {
        /// Member name
        name: String,

        /// Item type
        #[arg(short = 't', long = "type", value_enum)]
        media: MediaArg,
    },

    /// Show a single item by title
    Show {
        /// Item title
        title: String,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Item type for CLI (maps to ItemType)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MediaArg {
    /// Book
    Book,

    /// Movie
    Movie,

    /// Music album
    #[value(alias = "album")]
    MusicAlbum,
}

impl From<MediaArg> for ItemType {
    fn from(m: MediaArg) -> Self {
        match m {
            MediaArg::Book => ItemType::Book,
            MediaArg::Movie => ItemType::Movie,
            MediaArg::MusicAlbum => ItemType::MusicAlbum,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let (manifest, width) = match self.manifest {
            Some(path) => (path, configured_width()),
            None => {
                let cfg = config::config()?;
                (cfg.manifest.clone(), cfg.label_width)
            }
        };
        let mut out = io::stdout();

        match self.command {
            Commands::List { media } => {
                let catalog = load_catalog(&manifest).await?;
                let items = match media {
                    Some(m) => catalog.by_type(m.into()),
                    None => catalog.iter().collect(),
                };
                write_items(&mut out, &items, width)?;
            }
            Commands::Keyword { keyword } => {
                let catalog = load_catalog(&manifest).await?;
                write_items(&mut out, &catalog.by_keyword(&keyword), width)?;
            }
            Commands::Creator { name, media } => {
                let catalog = load_catalog(&manifest).await?;
                write_items(
                    &mut out,
                    &catalog.by_creator_and_type(media.into(), &name),
                    width,
                )?;
            }
            Commands::Member { name, media } => {
                let catalog = load_catalog(&manifest).await?;
                write_items(
                    &mut out,
                    &catalog.by_member_and_type(media.into(), &name),
                    width,
                )?;
            }
            Commands::Show { title } => {
                let catalog = load_catalog(&manifest).await?;
                write_item(&mut out, &catalog, &title, width)?;
            }
            Commands::Config => show_config(&manifest)?,
        }

        Ok(())
    }
}

/// Label width from config, or the default if config cannot be resolved
fn configured_width() -> usize {
    match config::config() {
        Ok(cfg) => cfg.label_width,
        Err(e) => {
            warn!("Using default label width: {:#}", e);
            DEFAULT_LABEL_WIDTH
        }
    }
}

/// Load the manifest and build a catalog from it
async fn load_catalog(manifest: &Path) -> Result<Catalog> {
    Manifest::load(manifest)
        .await?
        .into_catalog()
        .with_context(|| format!("Failed to build catalog from {}", manifest.display()))
}

/// Write rendered items separated by blank lines, followed by a total
fn write_items(out: &mut impl Write, items: &[&Item], width: usize) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "No items found.");
    }

    for item in items {
        writeln!(out, "{}", item.render(width))?;
    }

    writeln!(out, "Total: {} item(s)", items.len())
}

/// Write a single item looked up by title
fn write_item(out: &mut impl Write, catalog: &Catalog, title: &str, width: usize) -> Result<()> {
    let item = catalog
        .get(title)
        .ok_or_else(|| anyhow::anyhow!("Item not found: {}", title))?;

    write!(out, "{}", item.render(width))?;
    Ok(())
}

/// Show resolved configuration
fn show_config(manifest: &Path) -> Result<()> {
    let cfg = config::config()?;

    println!("medialib configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Manifest:    {}", manifest.display());
    println!("Label width: {}", cfg.label_width);

    Ok(())
}
