//! HTTP adapter for entry endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnalysisResponse, CreateEntryRequest, CreateEntryResponse, DeleteAllResponse,
    EntryListResponse, EntryResponse, ErrorResponse, UpdateEntryRequest,
};
pub use handlers::EntryAppState;
pub use routes::entry_router;
