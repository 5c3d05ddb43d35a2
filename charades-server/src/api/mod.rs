//! HTTP API handlers for charades-server

pub mod buildinfo;
pub mod health;
pub mod items;
pub mod session;
pub mod ui;
pub mod views;

pub use buildinfo::{get_build_info, BuildInfo};
pub use health::health_routes;
pub use items::{get_item, list_items, random_item};
pub use session::{
    end_session, get_history, get_session, next_item, start_session, toggle_history,
    update_filters,
};
pub use ui::serve_index;
