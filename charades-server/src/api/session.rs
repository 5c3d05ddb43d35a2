//! Single-player session endpoints
//!
//! Button-style actions over the one server-held [`GameSession`]. Each action
//! takes the session lock for a single state transition.

use axum::{body::Bytes, extract::State, Json};
use charades_common::{FilterConfig, GameSession, SessionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::views::ItemView;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

const NO_ITEMS_MESSAGE: &str = "No items available with the selected filters!";
const NO_MORE_ITEMS_MESSAGE: &str = "No more items available with the selected filters!";

/// Filter selection from the setup screen
#[derive(Debug, Default, Deserialize)]
pub struct FiltersRequest {
    pub category: Option<String>,
    pub industry: Option<String>,
    pub difficulty: Option<String>,
    pub decade: Option<String>,
}

impl FiltersRequest {
    /// Parse a request body; an empty body selects the default filters
    fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let Json(request) = Json::<Self>::from_bytes(body)?;
        Ok(request)
    }

    fn filters(&self) -> charades_common::Result<FilterConfig> {
        FilterConfig::from_params(
            self.category.as_deref(),
            self.industry.as_deref(),
            self.difficulty.as_deref(),
            self.decade.as_deref(),
        )
    }
}

/// Everything the UI needs to render the current screen
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub session_id: Option<Uuid>,
    pub started_at: Option<DateTime<Utc>>,
    pub filters: FilterConfig,
    pub current_item: Option<ItemView>,
    pub history_len: usize,
    pub show_history: bool,
    pub exhausted: bool,
    pub message: Option<String>,
}

impl SessionSnapshot {
    fn capture(session: &GameSession) -> Self {
        let exhausted = session.is_started() && session.last_draw_exhausted();
        let message = match (exhausted, session.current_item()) {
            (false, _) => None,
            (true, None) => Some(NO_ITEMS_MESSAGE.to_string()),
            (true, Some(_)) => Some(NO_MORE_ITEMS_MESSAGE.to_string()),
        };
        Self {
            status: session.status(),
            session_id: session.session_id(),
            started_at: session.started_at(),
            filters: *session.filters(),
            current_item: session.current_item().map(|item| ItemView::from(&**item)),
            history_len: session.history().len(),
            show_history: session.show_history(),
            exhausted,
            message,
        }
    }
}

/// Ordered list of served items, most recent last
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub count: usize,
    pub items: Vec<ItemView>,
}

/// GET /session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let session = state.session.lock().await;
    Json(SessionSnapshot::capture(&session))
}

/// POST /session/start
///
/// A bare POST starts with the default filters.
pub async fn start_session(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<SessionSnapshot>> {
    let filters = FiltersRequest::from_body(&body)?.filters()?;

    let mut session = state.session.lock().await;
    session.start(filters);
    Ok(Json(SessionSnapshot::capture(&session)))
}

/// POST /session/next
///
/// Exhaustion is a normal response with `exhausted: true`; the current item
/// is unchanged.
pub async fn next_item(State(state): State<AppState>) -> ApiResult<Json<SessionSnapshot>> {
    let mut session = state.session.lock().await;
    session.advance()?;
    Ok(Json(SessionSnapshot::capture(&session)))
}

/// POST /session/end
pub async fn end_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let mut session = state.session.lock().await;
    session.end();
    Json(SessionSnapshot::capture(&session))
}

/// PUT /session/filters
///
/// Changes the filters for later draws without resetting history.
pub async fn update_filters(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<SessionSnapshot>> {
    let filters = FiltersRequest::from_body(&body)?.filters()?;

    let mut session = state.session.lock().await;
    session.set_filters(filters);
    Ok(Json(SessionSnapshot::capture(&session)))
}

/// GET /session/history
pub async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let session = state.session.lock().await;
    let items: Vec<ItemView> = session
        .history()
        .iter()
        .map(|item| ItemView::from(&**item))
        .collect();

    Json(HistoryResponse {
        count: items.len(),
        items,
    })
}

/// POST /session/history/toggle
pub async fn toggle_history(State(state): State<AppState>) -> ApiResult<Json<SessionSnapshot>> {
    let mut session = state.session.lock().await;
    session.toggle_history()?;
    Ok(Json(SessionSnapshot::capture(&session)))
}
