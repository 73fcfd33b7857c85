//! HTTP routes for entry endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    analyze_entry, create_entry, delete_all_entries, delete_entry, get_entry, list_entries,
    update_entry, EntryAppState,
};

/// Creates the entry router. Apply state with `.with_state(...)`.
pub fn entry_router() -> Router<EntryAppState> {
    Router::new()
        .route(
            "/entries",
            post(create_entry).get(list_entries).delete(delete_all_entries),
        )
        .route(
            "/entries/:id",
            get(get_entry).patch(update_entry).delete(delete_entry),
        )
        .route("/entries/:id/analyze", post(analyze_entry))
}
