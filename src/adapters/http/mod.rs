//! HTTP Adapter
//!
//! The inbound edge of the relay: axum router, request handlers, shared
//! state, and the error envelope served to clients.

mod error;
mod routes;
mod server;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use server::{run_server, ServerError};
pub use state::AppState;
