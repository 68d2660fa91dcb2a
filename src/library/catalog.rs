//! Catalog of media items with secondary indices.
//!
//! Items are stored by title. Four secondary indices (keyword, member,
//! creator, type) map lookup keys back to titles and are kept consistent
//! with the primary store on every add, member update and remove.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;
use tracing::{debug, warn};

use super::index::SecondaryIndex;
use super::item::{Item, ItemError, ItemType};

/// Errors returned by catalog operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Operation not supported for {item_type} item: {title}")]
    InvalidOperation { title: String, item_type: ItemType },

    #[error("Invalid item: {0}")]
    InvalidItem(#[from] ItemError),
}

/// In-memory catalog of books, movies and music albums
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Primary store, keyed by title
    items: BTreeMap<String, Item>,

    keywords: SecondaryIndex<String>,
    members: SecondaryIndex<String>,
    creators: SecondaryIndex<String>,
    types: SecondaryIndex<ItemType>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an item and add it to the catalog
    pub fn add(
        &mut self,
        item_type: ItemType,
        title: impl Into<String>,
        creator: impl Into<String>,
        divisions: i64,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<&Item, CatalogError> {
        let item = Item::new(item_type, title, creator, divisions, keywords)?;
        Ok(self.add_item(item))
    }

    /// Add an item, replacing any item with the same title.
    ///
    /// A replaced item's index entries are purged before the new item is
    /// indexed.
    pub fn add_item(&mut self, item: Item) -> &Item {
        let title = item.title().to_string();

        if self.items.contains_key(&title) {
            debug!(title = %title, "Replacing existing item");
            self.purge_indices(&title);
        }

        for keyword in item.keywords() {
            self.keywords.insert(keyword.clone(), &title);
        }
        if let Some(members) = item.members() {
            for member in members {
                self.members.insert(member.clone(), &title);
            }
        }
        self.creators.insert(item.creator().to_string(), &title);
        self.types.insert(item.item_type(), &title);

        debug!(title = %title, item_type = %item.item_type(), "Item added");

        match self.items.entry(title) {
            Entry::Occupied(mut entry) => {
                entry.insert(item);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(item),
        }
    }

    /// Add members (cast or band members) to an existing item.
    ///
    /// Fails with `NotFound` if no item has `title`, and with
    /// `InvalidOperation` if the item's type has no member set. The catalog
    /// is unchanged on failure.
    pub fn add_members(
        &mut self,
        title: &str,
        names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<&Item, CatalogError> {
        self.add_members_checked(title, None, names)
    }

    /// Add cast members to a movie
    pub fn add_cast(
        &mut self,
        title: &str,
        actors: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<&Item, CatalogError> {
        self.add_members_checked(title, Some(ItemType::Movie), actors)
    }

    /// Add band members to a music album
    pub fn add_band_members(
        &mut self,
        title: &str,
        musicians: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<&Item, CatalogError> {
        self.add_members_checked(title, Some(ItemType::MusicAlbum), musicians)
    }

    fn add_members_checked(
        &mut self,
        title: &str,
        expected: Option<ItemType>,
        names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<&Item, CatalogError> {
        let item = self
            .items
            .get_mut(title)
            .ok_or_else(|| CatalogError::NotFound(title.to_string()))?;

        let item_type = item.item_type();
        let type_matches = expected.map_or(true, |t| t == item_type);

        let members = match item.members_mut() {
            Some(members) if type_matches => members,
            _ => {
                warn!(title = %title, item_type = %item_type, "Rejected member update");
                return Err(CatalogError::InvalidOperation {
                    title: title.to_string(),
                    item_type,
                });
            }
        };

        for name in names {
            let name = name.into();
            self.members.insert(name.clone(), title);
            members.insert(name);
        }

        debug!(title = %title, "Members updated");
        Ok(item)
    }

    /// Remove an item by title.
    ///
    /// Returns `false` if no item had that title.
    pub fn remove(&mut self, title: &str) -> bool {
        if self.items.remove(title).is_none() {
            return false;
        }

        self.purge_indices(title);
        debug!(title = %title, "Item removed");
        true
    }

    fn purge_indices(&mut self, title: &str) {
        self.keywords.purge(title);
        self.members.purge(title);
        self.creators.purge(title);
        self.types.purge(title);
    }

    /// Get an item by title
    pub fn get(&self, title: &str) -> Option<&Item> {
        self.items.get(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.items.contains_key(title)
    }

    /// Iterate over all items in title order
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Get the number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every title referenced by any secondary index
    pub fn indexed_titles(&self) -> BTreeSet<&str> {
        self.keywords
            .titles()
            .chain(self.members.titles())
            .chain(self.creators.titles())
            .chain(self.types.titles())
            .collect()
    }

    /// Items having `keyword`, ordered by title
    pub fn by_keyword(&self, keyword: &str) -> Vec<&Item> {
        self.resolve(self.keywords.get(keyword))
    }

    /// Items of `item_type`, ordered by title
    pub fn by_type(&self, item_type: ItemType) -> Vec<&Item> {
        self.resolve(self.types.get(&item_type))
    }

    /// Items of `item_type` whose creator is `creator`
    pub fn by_creator_and_type(&self, item_type: ItemType, creator: &str) -> Vec<&Item> {
        self.resolve_both(self.types.get(&item_type), self.creators.get(creator))
    }

    /// Items of `item_type` that list `member` as a member
    pub fn by_member_and_type(&self, item_type: ItemType, member: &str) -> Vec<&Item> {
        self.resolve_both(self.types.get(&item_type), self.members.get(member))
    }

    pub fn books(&self) -> Vec<&Item> {
        self.by_type(ItemType::Book)
    }

    pub fn movies(&self) -> Vec<&Item> {
        self.by_type(ItemType::Movie)
    }

    pub fn music_albums(&self) -> Vec<&Item> {
        self.by_type(ItemType::MusicAlbum)
    }

    pub fn books_by_author(&self, author: &str) -> Vec<&Item> {
        self.by_creator_and_type(ItemType::Book, author)
    }

    pub fn movies_by_director(&self, director: &str) -> Vec<&Item> {
        self.by_creator_and_type(ItemType::Movie, director)
    }

    pub fn movies_by_actor(&self, actor: &str) -> Vec<&Item> {
        self.by_member_and_type(ItemType::Movie, actor)
    }

    pub fn music_by_band(&self, band: &str) -> Vec<&Item> {
        self.by_creator_and_type(ItemType::MusicAlbum, band)
    }

    pub fn music_by_musician(&self, musician: &str) -> Vec<&Item> {
        self.by_member_and_type(ItemType::MusicAlbum, musician)
    }

    fn resolve(&self, titles: Option<&BTreeSet<String>>) -> Vec<&Item> {
        titles
            .into_iter()
            .flatten()
            .filter_map(|title| self.items.get(title))
            .collect()
    }

    fn resolve_both(
        &self,
        left: Option<&BTreeSet<String>>,
        right: Option<&BTreeSet<String>>,
    ) -> Vec<&Item> {
        match (left, right) {
            (Some(left), Some(right)) => left
                .intersection(right)
                .filter_map(|title| self.items.get(title))
                .collect(),
            _ => Vec::new(),
        }
    }
}
