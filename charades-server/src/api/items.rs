//! Stateless item endpoints
//!
//! Each request carries its own filters and, for random draws, its own
//! exclusion list. Nothing is remembered between requests.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use charades_common::{Category, FilterConfig, ItemKey};
use rand::thread_rng;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::debug;

use crate::api::views::ItemView;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Filter query parameters
///
/// Kept as raw strings so unknown values produce a 400 with a clear message
/// instead of a generic extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ItemQuery {
    pub category: Option<String>,
    pub industry: Option<String>,
    pub difficulty: Option<String>,
    pub decade: Option<String>,
    /// Comma-separated composite keys, e.g. `movie:3,song:1`
    pub exclude: Option<String>,
}

impl ItemQuery {
    pub fn filters(&self) -> Result<FilterConfig, ApiError> {
        Ok(FilterConfig::from_params(
            self.category.as_deref(),
            self.industry.as_deref(),
            self.difficulty.as_deref(),
            self.decade.as_deref(),
        )?)
    }

    pub fn excluded_keys(&self) -> Result<HashSet<ItemKey>, ApiError> {
        match self.exclude.as_deref() {
            Some(raw) => Ok(ItemKey::parse_list(raw)?.into_iter().collect()),
            None => Ok(HashSet::new()),
        }
    }
}

/// GET /items
///
/// Filtered list in catalog order; no randomness, no exclusion.
pub async fn list_items(
    State(state): State<AppState>,
    query: Result<Query<ItemQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ItemView>>> {
    let Query(query) = query?;
    let filters = query.filters()?;
    let items: Vec<ItemView> = state
        .engine
        .filter(&filters)
        .into_iter()
        .map(|item| ItemView::from(&**item))
        .collect();

    debug!(?filters, count = items.len(), "Listed items");
    Ok(Json(items))
}

/// GET /items/random
///
/// 404 when the filters and exclusions leave nothing to draw.
pub async fn random_item(
    State(state): State<AppState>,
    query: Result<Query<ItemQuery>, QueryRejection>,
) -> ApiResult<Json<ItemView>> {
    let Query(query) = query?;
    let filters = query.filters()?;
    let excluded = query.excluded_keys()?;

    let item = state
        .engine
        .select_next(&filters, &excluded, &mut thread_rng())
        .ok_or_else(|| ApiError::NotFound("No items found matching criteria".to_string()))?;

    Ok(Json(ItemView::from(&*item)))
}

/// GET /items/:category/:id
pub async fn get_item(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, String)>,
) -> ApiResult<Json<ItemView>> {
    let category = Category::from_str(&category)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown category '{}'", category)))?;
    let id: u32 = id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid id '{}'", id)))?;

    let item = state.catalog().by_id(category, id)?;
    Ok(Json(ItemView::from(&*item)))
}
