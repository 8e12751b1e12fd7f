use crate::state::AppState;
use axum::Router;

pub mod csv;
mod dto;
pub mod handlers;
pub mod model;
mod services;
pub mod source;
pub mod webhook;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::sheet_routes())
}
