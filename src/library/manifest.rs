//! Seed manifest for building a catalog from a file.
//!
//! The manifest is a read-only list of items in YAML (or JSON, chosen by
//! file extension). Entries are added in file order, so a later entry with
//! the same title replaces an earlier one.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use super::catalog::Catalog;
use super::item::ItemType;

/// Manifest file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub items: Vec<ManifestEntry>,
}

/// A single item description in the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(rename = "type")]
    pub item_type: ItemType,

    pub title: String,

    pub creator: String,

    /// Pages, scenes or songs depending on type
    pub divisions: i64,

    #[serde(default)]
    pub keywords: Vec<String>,

    /// Cast or band members (movies and music albums only)
    #[serde(default)]
    pub members: Vec<String>,
}

impl Manifest {
    /// Load a manifest from disk.
    ///
    /// A missing file yields an empty manifest.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "Manifest not found, starting with an empty catalog");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        Self::parse(&content, path)
    }

    /// Parse manifest text, using `path` to pick the format
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse manifest JSON: {}", path.display()))
        } else {
            serde_yaml::from_str(content)
                .with_context(|| format!("Failed to parse manifest YAML: {}", path.display()))
        }
    }

    /// Build a catalog from the manifest entries
    pub fn into_catalog(self) -> Result<Catalog> {
        let mut catalog = Catalog::new();

        for entry in self.items {
            let title = entry.title.clone();
            catalog
                .add(
                    entry.item_type,
                    entry.title,
                    entry.creator,
                    entry.divisions,
                    entry.keywords,
                )
                .with_context(|| format!("Invalid manifest entry: {}", title))?;

            if !entry.members.is_empty() {
                catalog
                    .add_members(&title, entry.members)
                    .with_context(|| format!("Invalid manifest entry: {}", title))?;
            }
        }

        debug!(items = catalog.len(), "Catalog built from manifest");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::CatalogError;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
items:
  - type: book
    title: Dune
    creator: Herbert
    divisions: 412
    keywords: [scifi, desert]
  - type: movie
    title: Arrival
    creator: Villeneuve
    divisions: 3
    keywords: [scifi]
    members: [Adams, Renner]
  - type: music_album
    title: Blue
    creator: Joni Mitchell
    divisions: 10
"#;

    #[test]
    fn test_parse_yaml_manifest() {
        let manifest = Manifest::parse(SAMPLE, Path::new("library.yaml")).unwrap();
        assert_eq!(manifest.items.len(), 3);
        assert_eq!(manifest.items[1].item_type, ItemType::Movie);
        assert_eq!(manifest.items[1].members, vec!["Adams", "Renner"]);
        assert!(manifest.items[2].keywords.is_empty());
    }

    #[test]
    fn test_parse_json_manifest() {
        let json = r#"{"items": [{"type": "book", "title": "Emma", "creator": "Austen", "divisions": 474}]}"#;
        let manifest = Manifest::parse(json, Path::new("library.JSON")).unwrap();
        assert_eq!(manifest.items[0].title, "Emma");
    }

    #[test]
    fn test_into_catalog() {
        let catalog = Manifest::parse(SAMPLE, Path::new("library.yaml"))
            .unwrap()
            .into_catalog()
            .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.by_keyword("scifi").len(), 2);
        assert_eq!(catalog.movies_by_actor("Renner").len(), 1);
        assert_eq!(catalog.music_by_band("Joni Mitchell").len(), 1);
    }

    #[test]
    fn test_members_on_book_rejected() {
        let yaml = r#"
items:
  - type: book
    title: Dune
    creator: Herbert
    divisions: 412
    members: [Someone]
"#;
        let err = Manifest::parse(yaml, Path::new("m.yaml"))
            .unwrap()
            .into_catalog()
            .unwrap_err();

        assert!(err.to_string().contains("Dune"));
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_negative_divisions_rejected() {
        let yaml = "items:\n  - {type: movie, title: X, creator: Y, divisions: -2}\n";
        let result = Manifest::parse(yaml, Path::new("m.yaml"))
            .unwrap()
            .into_catalog();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_divisions_rejected() {
        let yaml = "items:\n  - {type: book, title: Emma, creator: Austen}\n";
        let err = Manifest::parse(yaml, Path::new("m.yaml")).unwrap_err();

        assert!(format!("{:#}", err).contains("divisions"));
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("library.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        let manifest = Manifest::load(&path).await.unwrap();
        assert_eq!(manifest.items.len(), 3);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::load(&temp.path().join("absent.yaml")).await.unwrap();
        assert!(manifest.items.is_empty());
    }
}
