//! Catalog items and their media kinds.
//!
//! An [`Item`] carries the fields every media kind shares. The
//! kind-specific part lives in [`Media`], which is also where the member set
//! (cast or band members) is held for the kinds that have one.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of the label column when rendering an item
pub const DEFAULT_LABEL_WIDTH: usize = 10;

/// Errors raised while constructing an item
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("Item title must not be empty")]
    EmptyTitle,

    #[error("Division count must not be negative: {0}")]
    NegativeDivisions(i64),

    #[error("Division count too large: {0}")]
    TooManyDivisions(i64),

    #[error("Unknown item type: {0}")]
    UnknownType(String),
}

/// Type tag of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Book (divisions are pages)
    Book,

    /// Movie (divisions are scenes, members are the cast)
    Movie,

    /// Music album (divisions are songs, members are the band)
    MusicAlbum,
}

impl ItemType {
    /// All item types, in tag order
    pub const ALL: [ItemType; 3] = [ItemType::Book, ItemType::Movie, ItemType::MusicAlbum];

    /// Whether items of this type carry a member set
    pub fn has_members(self) -> bool {
        self.member_label().is_some()
    }

    /// Header shown at the top of a rendered record
    pub fn header(self) -> &'static str {
        match self {
            ItemType::Book => "Book",
            ItemType::Movie => "Movie",
            ItemType::MusicAlbum => "Music Album",
        }
    }

    /// What the creator is called for this type
    pub fn creator_label(self) -> &'static str {
        match self {
            ItemType::Book => "author",
            ItemType::Movie => "director",
            ItemType::MusicAlbum => "band",
        }
    }

    /// What one content division is called for this type
    pub fn division_label(self) -> &'static str {
        match self {
            ItemType::Book => "pages",
            ItemType::Movie => "scenes",
            ItemType::MusicAlbum => "songs",
        }
    }

    /// What the member set is called, if this type has one
    pub fn member_label(self) -> Option<&'static str> {
        match self {
            ItemType::Book => None,
            ItemType::Movie => Some("cast"),
            ItemType::MusicAlbum => Some("members"),
        }
    }

    /// Empty media payload for this type.
    fn empty_media(self) -> Media {
        match self {
            ItemType::Book => Media::Book,
            ItemType::Movie => Media::Movie {
                cast: BTreeSet::new(),
            },
            ItemType::MusicAlbum => Media::MusicAlbum {
                members: BTreeSet::new(),
            },
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Book => write!(f, "book"),
            ItemType::Movie => write!(f, "movie"),
            ItemType::MusicAlbum => write!(f, "music_album"),
        }
    }
}

impl std::str::FromStr for ItemType {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "book" => Ok(ItemType::Book),
            "movie" | "film" => Ok(ItemType::Movie),
            "music_album" | "music-album" | "musicalbum" | "album" | "music" => {
                Ok(ItemType::MusicAlbum)
            }
            _ => Err(ItemError::UnknownType(s.to_string())),
        }
    }
}

/// Kind-specific part of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Media {
    Book,
    Movie { cast: BTreeSet<String> },
    MusicAlbum { members: BTreeSet<String> },
}

impl Media {
    /// Type tag of this payload
    pub fn item_type(&self) -> ItemType {
        match self {
            Media::Book => ItemType::Book,
            Media::Movie { .. } => ItemType::Movie,
            Media::MusicAlbum { .. } => ItemType::MusicAlbum,
        }
    }

    fn members(&self) -> Option<&BTreeSet<String>> {
        match self {
            Media::Book => None,
            Media::Movie { cast } => Some(cast),
            Media::MusicAlbum { members } => Some(members),
        }
    }

    fn members_mut(&mut self) -> Option<&mut BTreeSet<String>> {
        match self {
            Media::Book => None,
            Media::Movie { cast } => Some(cast),
            Media::MusicAlbum { members } => Some(members),
        }
    }
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawItem")]
pub struct Item {
    title: String,
    creator: String,
    keywords: BTreeSet<String>,
    divisions: u32,
    #[serde(flatten)]
    media: Media,
}

/// Unvalidated serde form of [`Item`]
#[derive(Deserialize)]
struct RawItem {
    title: String,
    creator: String,
    #[serde(default)]
    keywords: BTreeSet<String>,
    divisions: i64,
    #[serde(flatten)]
    media: Media,
}

impl TryFrom<RawItem> for Item {
    type Error = ItemError;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        let mut item = Item::new(
            raw.media.item_type(),
            raw.title,
            raw.creator,
            raw.divisions,
            raw.keywords,
        )?;
        item.media = raw.media;
        Ok(item)
    }
}

impl Item {
    /// Build an item of the given type.
    ///
    /// Fails if the title is blank or the division count does not fit a
    /// `u32`. Items of member-bearing types start with an empty member set.
    pub fn new(
        item_type: ItemType,
        title: impl Into<String>,
        creator: impl Into<String>,
        divisions: i64,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ItemError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ItemError::EmptyTitle);
        }

        if divisions < 0 {
            return Err(ItemError::NegativeDivisions(divisions));
        }
        let divisions =
            u32::try_from(divisions).map_err(|_| ItemError::TooManyDivisions(divisions))?;

        Ok(Self {
            title,
            creator: creator.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
            divisions,
            media: item_type.empty_media(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    pub fn item_type(&self) -> ItemType {
        self.media.item_type()
    }

    pub fn media(&self) -> &Media {
        &self.media
    }

    /// Member names, or `None` for types without a member set
    pub fn members(&self) -> Option<&BTreeSet<String>> {
        self.media.members()
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members().is_some_and(|m| m.contains(name))
    }

    /// Member set for in-crate mutation; the catalog keeps the member index
    /// in step with it.
    pub(crate) fn members_mut(&mut self) -> Option<&mut BTreeSet<String>> {
        self.media.members_mut()
    }

    /// Render as a labeled multi-line record.
    ///
    /// Each row is `label:` padded to `label_width` followed by the value.
    /// The returned string ends with a newline.
    pub fn render(&self, label_width: usize) -> String {
        let item_type = self.item_type();
        let mut out = format!("-{}-\n", item_type.header());

        let mut row = |label: &str, value: &str| {
            let label = format!("{}:", label);
            out.push_str(&format!("{:<width$}{}\n", label, value, width = label_width));
        };

        row(item_type.creator_label(), &self.creator);
        row(
            &format!("# {}", item_type.division_label()),
            &self.divisions.to_string(),
        );
        if let (Some(label), Some(members)) = (item_type.member_label(), self.members()) {
            row(label, &join(members));
        }
        row("title", &self.title);
        row("keywords", &join(&self.keywords));

        out
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_LABEL_WIDTH))
    }
}

fn join(values: &BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_from_str() {
        assert_eq!("book".parse::<ItemType>().unwrap(), ItemType::Book);
        assert_eq!("Movie".parse::<ItemType>().unwrap(), ItemType::Movie);
        assert_eq!("film".parse::<ItemType>().unwrap(), ItemType::Movie);
        assert_eq!(
            "music_album".parse::<ItemType>().unwrap(),
            ItemType::MusicAlbum
        );
        assert_eq!("album".parse::<ItemType>().unwrap(), ItemType::MusicAlbum);
        assert_eq!(
            "podcast".parse::<ItemType>(),
            Err(ItemError::UnknownType("podcast".to_string()))
        );
    }

    #[test]
    fn test_item_type_display_round_trips() {
        for item_type in ItemType::ALL {
            assert_eq!(item_type.to_string().parse::<ItemType>().unwrap(), item_type);
        }
    }

    #[test]
    fn test_member_capability() {
        assert!(!ItemType::Book.has_members());
        assert!(ItemType::Movie.has_members());
        assert!(ItemType::MusicAlbum.has_members());

        let book = Item::new(ItemType::Book, "Dune", "Herbert", 412, ["scifi"]).unwrap();
        assert!(book.members().is_none());

        let album = Item::new(ItemType::MusicAlbum, "Blue", "Mitchell", 10, ["folk"]).unwrap();
        assert_eq!(album.members().map(|m| m.len()), Some(0));
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert_eq!(
            Item::new(ItemType::Book, "  ", "Someone", 1, Vec::<String>::new()),
            Err(ItemError::EmptyTitle)
        );
        assert_eq!(
            Item::new(ItemType::Book, "Dune", "Herbert", -5, Vec::<String>::new()),
            Err(ItemError::NegativeDivisions(-5))
        );
        let too_many = i64::from(u32::MAX) + 1;
        assert_eq!(
            Item::new(ItemType::Movie, "Dune", "Lynch", too_many, Vec::<String>::new()),
            Err(ItemError::TooManyDivisions(too_many))
        );
    }

    #[test]
    fn test_keywords_deduplicated_and_sorted() {
        let item = Item::new(
            ItemType::Book,
            "Dune",
            "Herbert",
            412,
            ["scifi", "desert", "scifi"],
        )
        .unwrap();

        let keywords: Vec<_> = item.keywords().iter().cloned().collect();
        assert_eq!(keywords, vec!["desert".to_string(), "scifi".to_string()]);
        assert!(item.has_keyword("desert"));
        assert!(!item.has_keyword("fantasy"));
    }

    #[test]
    fn test_render_book() {
        let item = Item::new(ItemType::Book, "Dune", "Herbert", 412, ["scifi", "desert"]).unwrap();

        let expected = "-Book-\n\
                        author:   Herbert\n\
                        # pages:  412\n\
                        title:    Dune\n\
                        keywords: desert, scifi\n";
        assert_eq!(item.to_string(), expected);
    }

    #[test]
    fn test_render_movie_includes_cast() {
        let mut item = Item::new(ItemType::Movie, "Dune", "Villeneuve", 3, ["scifi"]).unwrap();
        if let Some(cast) = item.members_mut() {
            cast.insert("Zendaya".to_string());
            cast.insert("Chalamet".to_string());
        }

        let expected = "-Movie-\n\
                        director: Villeneuve\n\
                        # scenes: 3\n\
                        cast:     Chalamet, Zendaya\n\
                        title:    Dune\n\
                        keywords: scifi\n";
        assert_eq!(item.to_string(), expected);
        assert!(item.has_member("Zendaya"));
    }

    #[test]
    fn test_render_custom_width() {
        let item = Item::new(ItemType::MusicAlbum, "Blue", "Mitchell", 10, ["folk"]).unwrap();
        let rendered = item.render(12);

        assert!(rendered.starts_with("-Music Album-\n"));
        assert!(rendered.contains("band:       Mitchell\n"));
        assert!(rendered.contains("members:    \n"));
    }

    #[test]
    fn test_item_serde_shape() {
        let item = Item::new(ItemType::Movie, "Alien", "Scott", 40, ["horror"]).unwrap();
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["type"], "movie");
        assert_eq!(json["title"], "Alien");
        assert!(json["cast"].as_array().unwrap().is_empty());

        let parsed: Item = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, item);
    }

    #[test]
    fn test_deserialize_validates_item() {
        let blank = r#"{"title": "   ", "creator": "Herbert", "keywords": [], "divisions": 412, "type": "book"}"#;
        let err = serde_json::from_str::<Item>(blank).unwrap_err();
        assert!(err.to_string().contains("title must not be empty"));

        let negative = r#"{"title": "Dune", "creator": "Herbert", "divisions": -3, "type": "book"}"#;
        assert!(serde_json::from_str::<Item>(negative).is_err());
    }

    #[test]
    fn test_deserialize_keeps_members() {
        let json = r#"{"title": "Heat", "creator": "Mann", "divisions": 50, "type": "movie", "cast": ["Pacino"]}"#;
        let item: Item = serde_json::from_str(json).unwrap();

        assert_eq!(item.item_type(), ItemType::Movie);
        assert!(item.has_member("Pacino"));
        assert!(item.keywords().is_empty());
    }
}
