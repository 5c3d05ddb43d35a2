//! Filter & selection engine
//!
//! Picks the next prompt for a filter configuration and an exclusion set.
//!
//! # Algorithm
//!
//! 1. Start from the catalog collection(s) named by the category selector
//! 2. Industry filter (exact enum match)
//! 3. Difficulty filter:
//!    - easy: `year >= 2010 && simple`
//!    - difficult: `year < 2010 || complex`
//! 4. Decade filter (exact enum match)
//! 5. Drop items whose `category:id` key is excluded
//! 6. Empty survivor set → `None` (exhaustion, not an error)
//! 7. difficult → weighted draw, complex titles weigh 3, simple titles 1
//! 8. otherwise → uniform draw
//!
//! Difficulty is not a partition of the catalog: only recent simple titles are
//! "easy", and an older simple title counts as "difficult". This split is kept
//! as-is pending a product decision.

use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::catalog::Catalog;
use crate::models::{Decade, Difficulty, FilterConfig, Industry, Item, ItemKey, TitleComplexity};

/// First year that can count as "easy"
pub const EASY_MIN_YEAR: i32 = 2010;

/// Draw weight of a complex title under the difficult setting
pub const COMPLEX_WEIGHT: u32 = 3;

/// Draw weight of a simple title under the difficult setting
pub const SIMPLE_WEIGHT: u32 = 1;

/// One predicate in the filter chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStep {
    Industry(Industry),
    Difficulty(Difficulty),
    Decade(Decade),
}

impl FilterStep {
    pub fn matches(&self, item: &Item) -> bool {
        match *self {
            FilterStep::Industry(industry) => item.industry == industry,
            FilterStep::Difficulty(difficulty) => matches_difficulty(item, difficulty),
            FilterStep::Decade(decade) => item.decade == decade,
        }
    }

    /// Active steps for a configuration, in application order
    pub fn chain(config: &FilterConfig) -> Vec<FilterStep> {
        config
            .industry
            .map(FilterStep::Industry)
            .into_iter()
            .chain(config.difficulty.map(FilterStep::Difficulty))
            .chain(config.decade.map(FilterStep::Decade))
            .collect()
    }
}

pub fn matches_difficulty(item: &Item, difficulty: Difficulty) -> bool {
    let simple = item.title_complexity == TitleComplexity::Simple;
    match difficulty {
        Difficulty::Easy => item.year >= EASY_MIN_YEAR && simple,
        Difficulty::Difficult => item.year < EASY_MIN_YEAR || !simple,
    }
}

/// Weight used by the difficult-mode draw
pub fn draw_weight(item: &Item) -> u32 {
    if item.is_complex() {
        COMPLEX_WEIGHT
    } else {
        SIMPLE_WEIGHT
    }
}

/// Stateless selector over a shared catalog
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    catalog: Arc<Catalog>,
}

impl SelectionEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Items matching the configuration, in catalog order (steps 1-4)
    pub fn filter(&self, config: &FilterConfig) -> Vec<&Arc<Item>> {
        let mut survivors = self.catalog.all(config.category);

        for step in FilterStep::chain(config) {
            survivors.retain(|item| step.matches(item));
            debug!(?step, remaining = survivors.len(), "Applied filter step");
        }

        survivors
    }

    /// Draw the next unseen item, or `None` when nothing survives
    pub fn select_next<R: Rng + ?Sized>(
        &self,
        config: &FilterConfig,
        excluded: &HashSet<ItemKey>,
        rng: &mut R,
    ) -> Option<Arc<Item>> {
        let mut survivors = self.filter(config);
        if !excluded.is_empty() {
            survivors.retain(|item| !excluded.contains(&item.key()));
        }

        if survivors.is_empty() {
            debug!(excluded = excluded.len(), "No survivors left for draw");
            return None;
        }

        let picked = if config.difficulty == Some(Difficulty::Difficult) {
            weighted_pick(&survivors, rng)
        } else {
            survivors[rng.gen_range(0..survivors.len())]
        };

        debug!(
            key = %picked.key(),
            survivors = survivors.len(),
            "Selected item"
        );
        Some(Arc::clone(picked))
    }
}

/// Cumulative-weight draw: one uniform number in `[0, total)` then a binary search
fn weighted_pick<'a, R: Rng + ?Sized>(items: &[&'a Arc<Item>], rng: &mut R) -> &'a Arc<Item> {
    let cumulative: Vec<u32> = items
        .iter()
        .scan(0u32, |total, item| {
            *total += draw_weight(item);
            Some(*total)
        })
        .collect();

    let total = cumulative.last().copied().unwrap_or(0);
    let roll = rng.gen_range(0..total);
    let index = cumulative.partition_point(|&upper| upper <= roll);
    items[index]
}
