//! Session tracker
//!
//! Owns the state of one player's game: the active filters, the ordered
//! history of served prompts and the set of keys that must not be served again.
//!
//! # State machine
//!
//! ```text
//! NotStarted --start--> Active --advance--> Active
//!                         |  ^
//!                        end  start
//!                         v  |
//!                        Ended
//! ```
//!
//! `start` is accepted from every state. `advance` requires an active game.
//! An exhausted draw keeps the game active and leaves the current item alone.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::engine::SelectionEngine;
use crate::models::{FilterConfig, Item, ItemKey};
use crate::{Error, Result};

/// Coarse session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    NotStarted,
    Active,
    Ended,
}

/// Outcome of a draw
#[derive(Debug, Clone, PartialEq)]
pub enum Draw {
    /// A new item was served and is now current
    Drawn(Arc<Item>),
    /// No unseen item matches the filters
    Exhausted,
}

impl Draw {
    pub fn item(&self) -> Option<&Arc<Item>> {
        match self {
            Draw::Drawn(item) => Some(item),
            Draw::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Draw::Exhausted)
    }
}

/// One player's game
#[derive(Debug)]
pub struct GameSession {
    engine: SelectionEngine,
    rng: StdRng,
    status: SessionStatus,
    session_id: Option<Uuid>,
    started_at: Option<DateTime<Utc>>,
    current_item: Option<Arc<Item>>,
    history: Vec<Arc<Item>>,
    excluded: HashSet<ItemKey>,
    filters: FilterConfig,
    show_history: bool,
    last_draw_exhausted: bool,
}

impl GameSession {
    /// New session with an entropy-seeded random source
    pub fn new(engine: SelectionEngine) -> Self {
        Self::with_rng(engine, StdRng::from_entropy())
    }

    /// New session with a fixed seed, for reproducible draws
    pub fn with_seed(engine: SelectionEngine, seed: u64) -> Self {
        Self::with_rng(engine, StdRng::seed_from_u64(seed))
    }

    fn with_rng(engine: SelectionEngine, rng: StdRng) -> Self {
        Self {
            engine,
            rng,
            status: SessionStatus::NotStarted,
            session_id: None,
            started_at: None,
            current_item: None,
            history: Vec::new(),
            excluded: HashSet::new(),
            filters: FilterConfig::default(),
            show_history: false,
            last_draw_exhausted: false,
        }
    }

    /// Begin a fresh game with the given filters and serve the first item
    ///
    /// Returns [`Draw::Exhausted`] when nothing matches; the game is still
    /// active but has no current item.
    pub fn start(&mut self, filters: FilterConfig) -> Draw {
        self.history.clear();
        self.excluded.clear();
        self.current_item = None;
        self.show_history = false;
        self.filters = filters;
        self.status = SessionStatus::Active;
        self.session_id = Some(Uuid::new_v4());
        self.started_at = Some(Utc::now());

        info!(
            session_id = ?self.session_id,
            filters = ?self.filters,
            "Game started"
        );

        let draw = self.draw();
        if draw.is_exhausted() {
            warn!("No items available for the selected filters");
        }
        draw
    }

    /// Serve the next unseen item
    ///
    /// On exhaustion the current item is left unchanged.
    pub fn advance(&mut self) -> Result<Draw> {
        if self.status != SessionStatus::Active {
            return Err(Error::InvalidState(
                "cannot advance: no game in progress".to_string(),
            ));
        }

        let draw = self.draw();
        if draw.is_exhausted() {
            warn!(
                served = self.history.len(),
                "No more items available with the selected filters"
            );
        }
        Ok(draw)
    }

    /// Finish the game; history stays readable until the next start
    pub fn end(&mut self) {
        if self.status == SessionStatus::Active {
            info!(
                session_id = ?self.session_id,
                served = self.history.len(),
                "Game ended"
            );
        }
        self.status = match self.status {
            SessionStatus::NotStarted => SessionStatus::NotStarted,
            _ => SessionStatus::Ended,
        };
        self.current_item = None;
        self.show_history = false;
    }

    /// Replace the filters used by subsequent draws without clearing history
    pub fn set_filters(&mut self, filters: FilterConfig) {
        debug!(?filters, "Filters updated");
        self.filters = filters;
        self.last_draw_exhausted = false;
    }

    /// Flip between the game view and the history view
    pub fn toggle_history(&mut self) -> Result<bool> {
        if self.status != SessionStatus::Active {
            return Err(Error::InvalidState(
                "history view is only available during a game".to_string(),
            ));
        }
        self.show_history = !self.show_history;
        Ok(self.show_history)
    }

    fn draw(&mut self) -> Draw {
        match self
            .engine
            .select_next(&self.filters, &self.excluded, &mut self.rng)
        {
            Some(item) => {
                self.excluded.insert(item.key());
                self.history.push(Arc::clone(&item));
                self.current_item = Some(Arc::clone(&item));
                self.last_draw_exhausted = false;
                Draw::Drawn(item)
            }
            None => {
                self.last_draw_exhausted = true;
                Draw::Exhausted
            }
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_started(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn current_item(&self) -> Option<&Arc<Item>> {
        self.current_item.as_ref()
    }

    /// Served items, most recent last
    pub fn history(&self) -> &[Arc<Item>] {
        &self.history
    }

    pub fn excluded_keys(&self) -> &HashSet<ItemKey> {
        &self.excluded
    }

    pub fn filters(&self) -> &FilterConfig {
        &self.filters
    }

    pub fn show_history(&self) -> bool {
        self.show_history
    }

    pub fn last_draw_exhausted(&self) -> bool {
        self.last_draw_exhausted
    }

    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }
}
