//! # Charades Common Library
//!
//! Core of the charades prompt service:
//! - Catalog store (static movie, song and dialogue collections)
//! - Filter & selection engine (filter chain + weighted random draw)
//! - Session tracker (history and no-repeat exclusion for one player)
//! - Shared model types, error taxonomy and configuration loading

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod session;

pub use catalog::{Catalog, CatalogCounts};
pub use engine::SelectionEngine;
pub use error::{Error, Result};
pub use models::{
    Category, CategorySelector, Decade, Difficulty, FilterConfig, Industry, Item, ItemDetails,
    ItemKey, TitleComplexity,
};
pub use session::{Draw, GameSession, SessionStatus};
