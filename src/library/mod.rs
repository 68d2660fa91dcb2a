//! Media library: items, indices and the catalog that ties them together.
//!
//! # Indices
//!
//! ```text
//! Catalog
//! ├── items       title    → Item      (primary store)
//! ├── keywords    keyword  → {title}
//! ├── members     member   → {title}   (cast / band members)
//! ├── creators    creator  → {title}   (author / director / band)
//! └── types       type     → {title}
//! ```

pub mod catalog;
pub mod index;
pub mod item;
pub mod manifest;

pub use catalog::{Catalog, CatalogError};
pub use index::SecondaryIndex;
pub use item::{Item, ItemError, ItemType, Media, DEFAULT_LABEL_WIDTH};
pub use manifest::{Manifest, ManifestEntry};
