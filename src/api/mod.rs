//! HTTP API module for the salary engine.
//!
//! This module provides the REST endpoint that calculates net salary and
//! employer cost for a single employee and month.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
