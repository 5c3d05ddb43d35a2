//! Catalog item model and filter value types
//!
//! Every filterable field is a closed enum. Loosely-typed strings coming from
//! HTTP query parameters or JSON bodies are parsed here, at the boundary, so the
//! selection engine only ever sees validated values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Item variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Movie,
    Song,
    Dialogue,
}

impl Category {
    /// Parse a category tag (case-insensitive, singular or plural)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "movies" => Some(Category::Movie),
            "song" | "songs" => Some(Category::Song),
            "dialogue" | "dialogues" => Some(Category::Dialogue),
            _ => None,
        }
    }

    /// Canonical lowercase tag, as used in composite keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movie => "movie",
            Category::Song => "song",
            Category::Dialogue => "dialogue",
        }
    }

    /// Human-readable label for the category badge
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Movie => "Movie",
            Category::Song => "Song",
            Category::Dialogue => "Dialogue",
        }
    }

    pub fn all_variants() -> &'static [Category] {
        &[Category::Movie, Category::Song, Category::Dialogue]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which collections a game draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategorySelector {
    #[default]
    Mix,
    Movies,
    Songs,
    Dialogues,
}

impl CategorySelector {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mix" | "all" => Some(CategorySelector::Mix),
            other => Category::from_str(other).map(CategorySelector::from),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategorySelector::Mix => "mix",
            CategorySelector::Movies => "movies",
            CategorySelector::Songs => "songs",
            CategorySelector::Dialogues => "dialogues",
        }
    }

    /// Collections covered by this selector, in catalog order
    pub fn categories(&self) -> &'static [Category] {
        match self {
            CategorySelector::Mix => Category::all_variants(),
            CategorySelector::Movies => &[Category::Movie],
            CategorySelector::Songs => &[Category::Song],
            CategorySelector::Dialogues => &[Category::Dialogue],
        }
    }
}

impl From<Category> for CategorySelector {
    fn from(category: Category) -> Self {
        match category {
            Category::Movie => CategorySelector::Movies,
            Category::Song => CategorySelector::Songs,
            Category::Dialogue => CategorySelector::Dialogues,
        }
    }
}

/// Content origin
///
/// `hollywood` is the legacy spelling of `international` and is accepted
/// both in data files and in requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    #[serde(alias = "hollywood")]
    International,
    Bollywood,
}

impl Industry {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "international" | "hollywood" => Some(Industry::International),
            "bollywood" => Some(Industry::Bollywood),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::International => "international",
            Industry::Bollywood => "bollywood",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Industry::International => "International",
            Industry::Bollywood => "Bollywood",
        }
    }
}

/// Requested difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Difficult,
}

impl Difficulty {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "difficult" => Some(Difficulty::Difficult),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Difficult => "difficult",
        }
    }
}

/// How hard a title is to act out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleComplexity {
    #[default]
    Simple,
    Complex,
}

/// Release era bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Decade {
    #[serde(rename = "60s")]
    Sixties,
    #[serde(rename = "70s")]
    Seventies,
    #[serde(rename = "80s")]
    Eighties,
    #[serde(rename = "90s")]
    Nineties,
    #[serde(rename = "2000s")]
    TwoThousands,
    #[serde(rename = "2010s")]
    TwentyTens,
    #[serde(rename = "2020s")]
    TwentyTwenties,
}

impl Decade {
    pub fn from_str(s: &str) -> Option<Self> {
        Self::all_variants()
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decade::Sixties => "60s",
            Decade::Seventies => "70s",
            Decade::Eighties => "80s",
            Decade::Nineties => "90s",
            Decade::TwoThousands => "2000s",
            Decade::TwentyTens => "2010s",
            Decade::TwentyTwenties => "2020s",
        }
    }

    /// Bucket a release year, `None` outside 1960..=2029
    pub fn from_year(year: i32) -> Option<Self> {
        match year {
            1960..=1969 => Some(Decade::Sixties),
            1970..=1979 => Some(Decade::Seventies),
            1980..=1989 => Some(Decade::Eighties),
            1990..=1999 => Some(Decade::Nineties),
            2000..=2009 => Some(Decade::TwoThousands),
            2010..=2019 => Some(Decade::TwentyTens),
            2020..=2029 => Some(Decade::TwentyTwenties),
            _ => None,
        }
    }

    pub fn all_variants() -> &'static [Decade] {
        &[
            Decade::Sixties,
            Decade::Seventies,
            Decade::Eighties,
            Decade::Nineties,
            Decade::TwoThousands,
            Decade::TwentyTens,
            Decade::TwentyTwenties,
        ]
    }
}

impl fmt::Display for Decade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite exclusion key: `category:id`
///
/// Ids are only unique within one collection, so `movie:1` and `song:1` are
/// distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub category: Category,
    pub id: u32,
}

impl ItemKey {
    pub fn new(category: Category, id: u32) -> Self {
        Self { category, id }
    }

    /// Parse a comma-separated key list, ignoring blank entries
    pub fn parse_list(s: &str) -> Result<Vec<ItemKey>> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<ItemKey>())
            .collect()
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.id)
    }
}

impl FromStr for ItemKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (category, id) = s
            .split_once(':')
            .ok_or_else(|| Error::Validation(format!("exclusion key '{}' is not category:id", s)))?;

        let category = Category::from_str(category)
            .ok_or_else(|| Error::Validation(format!("unknown category in key '{}'", s)))?;
        let id = id
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::Validation(format!("invalid id in key '{}'", s)))?;

        Ok(ItemKey::new(category, id))
    }
}

impl Serialize for ItemKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Variant-specific display metadata, never used for filtering
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemDetails {
    Movie {
        actors: Vec<String>,
        description: String,
    },
    Song {
        artist: String,
    },
    Dialogue {
        movie: String,
    },
}

/// A single playable prompt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: u32,
    pub category: Category,
    pub display_text: String,
    pub year: i32,
    pub decade: Decade,
    pub industry: Industry,
    pub title_complexity: TitleComplexity,
    pub details: ItemDetails,
}

impl Item {
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.category, self.id)
    }

    pub fn is_complex(&self) -> bool {
        self.title_complexity == TitleComplexity::Complex
    }

    /// Label/value pairs for the reveal panel, empty values skipped
    pub fn reveal_details(&self) -> Vec<(&'static str, String)> {
        let year = ("Year", self.year.to_string());
        let industry = ("Industry", self.industry.display_name().to_string());

        let rows = match &self.details {
            ItemDetails::Movie { actors, description } => vec![
                year,
                industry,
                ("Actors", actors.join(", ")),
                ("Description", description.clone()),
            ],
            ItemDetails::Song { artist } => vec![year, ("Artist", artist.clone()), industry],
            ItemDetails::Dialogue { movie } => vec![year, ("Movie", movie.clone()), industry],
        };

        rows.into_iter().filter(|(_, value)| !value.is_empty()).collect()
    }
}

/// Active filters for a draw
///
/// `None` means "no constraint".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FilterConfig {
    pub category: CategorySelector,
    pub industry: Option<Industry>,
    pub difficulty: Option<Difficulty>,
    pub decade: Option<Decade>,
}

impl FilterConfig {
    /// Build a configuration from raw request strings
    ///
    /// Blank values and the `any` sentinel (also "I don't care" for industry)
    /// mean unset. Anything else must name a known enum member.
    pub fn from_params(
        category: Option<&str>,
        industry: Option<&str>,
        difficulty: Option<&str>,
        decade: Option<&str>,
    ) -> Result<Self> {
        let category = match non_blank(category) {
            Some(raw) => CategorySelector::from_str(raw)
                .ok_or_else(|| invalid("category", raw))?,
            None => CategorySelector::Mix,
        };

        let industry = match non_blank(industry) {
            Some(raw) if is_any(raw) || raw.eq_ignore_ascii_case("i don't care") => None,
            Some(raw) => Some(Industry::from_str(raw).ok_or_else(|| invalid("industry", raw))?),
            None => None,
        };

        let difficulty = match non_blank(difficulty) {
            Some(raw) => Some(Difficulty::from_str(raw).ok_or_else(|| invalid("difficulty", raw))?),
            None => None,
        };

        let decade = match non_blank(decade) {
            Some(raw) if is_any(raw) => None,
            Some(raw) => Some(Decade::from_str(raw).ok_or_else(|| invalid("decade", raw))?),
            None => None,
        };

        Ok(FilterConfig {
            category,
            industry,
            difficulty,
            decade,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn is_any(value: &str) -> bool {
    value.eq_ignore_ascii_case("any")
}

fn invalid(field: &str, value: &str) -> Error {
    Error::Validation(format!("unrecognized {} '{}'", field, value))
}
