//! medialib - In-memory media catalog
//!
//! Stores books, movies and music albums by title and keeps four secondary
//! indices (keyword, member, creator, type) consistent with the store.
//!
//! # Modules
//!
//! - `library`: Items, secondary indices, the catalog and seed manifests
//! - `config`: Layered configuration (env, config file, defaults)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Everything tagged "scifi"
//! medialib keyword scifi
//!
//! # Movies featuring an actor
//! medialib member Chalamet --type movie
//!
//! # Books by an author, from a specific manifest
//! medialib --manifest ./library.yaml creator Herbert --type book
//! ```

pub mod cli;
pub mod config;
pub mod library;

// Re-export main types at crate root for convenience
pub use library::{Catalog, CatalogError, Item, ItemError, ItemType, Manifest, Media};
