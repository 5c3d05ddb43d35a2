//! Catalog store
//!
//! Holds the three fixed prompt collections. The catalog is built once at
//! process start and never mutated afterwards, so it can be shared behind an
//! `Arc` by every request handler without locking.
//!
//! Any problem with the static data (missing file, malformed JSON, unknown
//! enum value, decade that disagrees with the year, duplicate id) fails the
//! load. Callers treat that as fatal.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::models::{
    Category, CategorySelector, Decade, Industry, Item, ItemDetails, TitleComplexity,
};
use crate::{Error, Result};

const BUNDLED_MOVIES: &str = include_str!("../data/movies.json");
const BUNDLED_SONGS: &str = include_str!("../data/songs.json");
const BUNDLED_DIALOGUES: &str = include_str!("../data/dialogues.json");

/// Data file names expected inside a catalog directory
pub const MOVIES_FILE: &str = "movies.json";
pub const SONGS_FILE: &str = "songs.json";
pub const DIALOGUES_FILE: &str = "dialogues.json";

#[derive(Debug, Deserialize)]
struct MovieRecord {
    id: u32,
    title: String,
    year: i32,
    industry: Industry,
    #[serde(default)]
    decade: Option<Decade>,
    #[serde(default)]
    title_complexity: TitleComplexity,
    #[serde(default)]
    actors: Vec<String>,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct SongRecord {
    id: u32,
    title: String,
    year: i32,
    industry: Industry,
    #[serde(default)]
    decade: Option<Decade>,
    #[serde(default)]
    title_complexity: TitleComplexity,
    #[serde(default)]
    artist: String,
}

#[derive(Debug, Deserialize)]
struct DialogueRecord {
    id: u32,
    dialogue: String,
    year: i32,
    industry: Industry,
    #[serde(default)]
    decade: Option<Decade>,
    #[serde(default)]
    title_complexity: TitleComplexity,
    #[serde(default)]
    movie: String,
}

#[derive(Debug, Deserialize)]
struct MoviesFile {
    movies: Vec<MovieRecord>,
}

#[derive(Debug, Deserialize)]
struct SongsFile {
    songs: Vec<SongRecord>,
}

#[derive(Debug, Deserialize)]
struct DialoguesFile {
    dialogues: Vec<DialogueRecord>,
}

/// Per-category item counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub movie: usize,
    pub song: usize,
    pub dialogue: usize,
}

impl CatalogCounts {
    pub fn total(&self) -> usize {
        self.movie + self.song + self.dialogue
    }
}

/// Immutable prompt collections
#[derive(Debug, Default)]
pub struct Catalog {
    movies: Vec<Arc<Item>>,
    songs: Vec<Arc<Item>>,
    dialogues: Vec<Arc<Item>>,
}

impl Catalog {
    /// Load the dataset compiled into the binary
    pub fn load_bundled() -> Result<Self> {
        let catalog = Self::from_json(BUNDLED_MOVIES, BUNDLED_SONGS, BUNDLED_DIALOGUES)?;
        info!("Loaded bundled catalog: {} items", catalog.len());
        Ok(catalog)
    }

    /// Load `movies.json`, `songs.json` and `dialogues.json` from a directory
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let read = |name: &str| -> Result<String> {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|e| {
                Error::CatalogLoad(format!("failed to read {}: {}", path.display(), e))
            })
        };

        let catalog = Self::from_json(&read(MOVIES_FILE)?, &read(SONGS_FILE)?, &read(DIALOGUES_FILE)?)?;
        info!("Loaded catalog from {}: {} items", dir.display(), catalog.len());
        Ok(catalog)
    }

    /// Parse the three collection documents
    pub fn from_json(movies: &str, songs: &str, dialogues: &str) -> Result<Self> {
        let movies: MoviesFile = parse_document(movies, MOVIES_FILE)?;
        let songs: SongsFile = parse_document(songs, SONGS_FILE)?;
        let dialogues: DialoguesFile = parse_document(dialogues, DIALOGUES_FILE)?;

        let mut items = Vec::with_capacity(
            movies.movies.len() + songs.songs.len() + dialogues.dialogues.len(),
        );

        for m in movies.movies {
            items.push(Item {
                id: m.id,
                category: Category::Movie,
                decade: resolve_decade(Category::Movie, m.id, m.year, m.decade)?,
                display_text: m.title,
                year: m.year,
                industry: m.industry,
                title_complexity: m.title_complexity,
                details: ItemDetails::Movie {
                    actors: m.actors,
                    description: m.description,
                },
            });
        }

        for s in songs.songs {
            items.push(Item {
                id: s.id,
                category: Category::Song,
                decade: resolve_decade(Category::Song, s.id, s.year, s.decade)?,
                display_text: s.title,
                year: s.year,
                industry: s.industry,
                title_complexity: s.title_complexity,
                details: ItemDetails::Song { artist: s.artist },
            });
        }

        for d in dialogues.dialogues {
            items.push(Item {
                id: d.id,
                category: Category::Dialogue,
                decade: resolve_decade(Category::Dialogue, d.id, d.year, d.decade)?,
                display_text: d.dialogue,
                year: d.year,
                industry: d.industry,
                title_complexity: d.title_complexity,
                details: ItemDetails::Dialogue { movie: d.movie },
            });
        }

        Self::from_items(items)
    }

    /// Build a catalog from already-typed items, grouped by their category
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self> {
        let mut catalog = Catalog::default();
        let mut seen = HashSet::new();

        for item in items {
            if !seen.insert(item.key()) {
                return Err(Error::CatalogLoad(format!("duplicate item {}", item.key())));
            }
            let item = Arc::new(item);
            match item.category {
                Category::Movie => catalog.movies.push(item),
                Category::Song => catalog.songs.push(item),
                Category::Dialogue => catalog.dialogues.push(item),
            }
        }

        debug!(
            movies = catalog.movies.len(),
            songs = catalog.songs.len(),
            dialogues = catalog.dialogues.len(),
            "Catalog assembled"
        );
        Ok(catalog)
    }

    /// Backing collection for one category
    pub fn collection(&self, category: Category) -> &[Arc<Item>] {
        match category {
            Category::Movie => &self.movies,
            Category::Song => &self.songs,
            Category::Dialogue => &self.dialogues,
        }
    }

    /// Items for a selector; Mix is movies, then songs, then dialogues
    pub fn all(&self, selector: CategorySelector) -> Vec<&Arc<Item>> {
        selector
            .categories()
            .iter()
            .flat_map(|&category| self.collection(category).iter())
            .collect()
    }

    /// Point lookup by category and id
    pub fn by_id(&self, category: Category, id: u32) -> Result<Arc<Item>> {
        self.collection(category)
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("{} {} not found", category.display_name(), id)))
    }

    pub fn counts(&self) -> CatalogCounts {
        CatalogCounts {
            movie: self.movies.len(),
            song: self.songs.len(),
            dialogue: self.dialogues.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.counts().total()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_document<T: serde::de::DeserializeOwned>(raw: &str, name: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| Error::CatalogLoad(format!("{}: {}", name, e)))
}

/// Decade from the record, checked against the year, or derived when absent
fn resolve_decade(category: Category, id: u32, year: i32, declared: Option<Decade>) -> Result<Decade> {
    let derived = Decade::from_year(year);
    match (declared, derived) {
        (Some(declared), Some(derived)) if declared != derived => Err(Error::CatalogLoad(format!(
            "{}:{} declares decade {} but year {} falls in {}",
            category, id, declared, year, derived
        ))),
        (Some(declared), _) => Ok(declared),
        (None, Some(derived)) => Ok(derived),
        (None, None) => Err(Error::CatalogLoad(format!(
            "{}:{} has year {} outside every decade bucket",
            category, id, year
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_MOVIE: &str = r#"{"movies": [
        {"id": 1, "title": "Jaws", "year": 1975, "industry": "hollywood", "decade": "70s"}
    ]}"#;
    const NO_SONGS: &str = r#"{"songs": []}"#;
    const NO_DIALOGUES: &str = r#"{"dialogues": []}"#;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = Catalog::load_bundled().expect("bundled data should be valid");
        let counts = catalog.counts();
        assert!(counts.movie > 0);
        assert!(counts.song > 0);
        assert!(counts.dialogue > 0);
        assert_eq!(catalog.len(), counts.total());
    }

    #[test]
    fn test_bundled_catalog_normalizes_hollywood() {
        let catalog = Catalog::load_bundled().unwrap();
        let inception = catalog.by_id(Category::Movie, 1).unwrap();
        assert_eq!(inception.industry, Industry::International);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let catalog = Catalog::from_json(ONE_MOVIE, NO_SONGS, NO_DIALOGUES).unwrap();
        let jaws = catalog.by_id(Category::Movie, 1).unwrap();
        assert_eq!(jaws.title_complexity, TitleComplexity::Simple);
        assert_eq!(jaws.display_text, "Jaws");
        assert_eq!(
            jaws.details,
            ItemDetails::Movie {
                actors: vec![],
                description: String::new()
            }
        );
    }

    #[test]
    fn test_decade_derived_when_absent() {
        let songs = r#"{"songs": [{"id": 4, "title": "Yesterday", "year": 1965, "industry": "international"}]}"#;
        let catalog = Catalog::from_json(ONE_MOVIE, songs, NO_DIALOGUES).unwrap();
        assert_eq!(catalog.by_id(Category::Song, 4).unwrap().decade, Decade::Sixties);
    }

    #[test]
    fn test_decade_year_mismatch_fails_load() {
        let movies = r#"{"movies": [{"id": 1, "title": "Jaws", "year": 1975, "industry": "hollywood", "decade": "90s"}]}"#;
        let err = Catalog::from_json(movies, NO_SONGS, NO_DIALOGUES).unwrap_err();
        assert!(matches!(err, Error::CatalogLoad(_)));
    }

    #[test]
    fn test_unknown_enum_value_fails_load() {
        let movies = r#"{"movies": [{"id": 1, "title": "X", "year": 2001, "industry": "tollywood"}]}"#;
        assert!(matches!(
            Catalog::from_json(movies, NO_SONGS, NO_DIALOGUES),
            Err(Error::CatalogLoad(_))
        ));
    }

    #[test]
    fn test_duplicate_id_within_collection_fails_load() {
        let movies = r#"{"movies": [
            {"id": 1, "title": "A", "year": 2001, "industry": "bollywood"},
            {"id": 1, "title": "B", "year": 2002, "industry": "bollywood"}
        ]}"#;
        assert!(Catalog::from_json(movies, NO_SONGS, NO_DIALOGUES).is_err());
    }

    #[test]
    fn test_same_id_across_collections_is_allowed() {
        let songs = r#"{"songs": [{"id": 1, "title": "Happy", "year": 2013, "industry": "international"}]}"#;
        let catalog = Catalog::from_json(ONE_MOVIE, songs, NO_DIALOGUES).unwrap();
        assert_eq!(catalog.by_id(Category::Movie, 1).unwrap().display_text, "Jaws");
        assert_eq!(catalog.by_id(Category::Song, 1).unwrap().display_text, "Happy");
    }

    #[test]
    fn test_by_id_not_found() {
        let catalog = Catalog::from_json(ONE_MOVIE, NO_SONGS, NO_DIALOGUES).unwrap();
        assert!(matches!(catalog.by_id(Category::Movie, 99), Err(Error::NotFound(_))));
        assert!(matches!(catalog.by_id(Category::Song, 1), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_all_is_stable_across_calls() {
        let catalog = Catalog::load_bundled().unwrap();
        for selector in [
            CategorySelector::Mix,
            CategorySelector::Movies,
            CategorySelector::Songs,
            CategorySelector::Dialogues,
        ] {
            let first: Vec<Item> = catalog.all(selector).into_iter().map(|i| (**i).clone()).collect();
            let second: Vec<Item> = catalog.all(selector).into_iter().map(|i| (**i).clone()).collect();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_mix_is_union_in_catalog_order() {
        let catalog = Catalog::load_bundled().unwrap();
        let mix = catalog.all(CategorySelector::Mix);
        assert_eq!(mix.len(), catalog.len());
        assert_eq!(mix.first().unwrap().category, Category::Movie);
        assert_eq!(mix.last().unwrap().category, Category::Dialogue);
    }
}
