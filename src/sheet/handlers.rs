use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{instrument, warn};

use super::dto::{Action, SheetRequest};
use super::services::{read_sheet, update_row};
use crate::{auth::AuthUser, error::AppError, state::AppState};

pub fn sheet_routes() -> Router<AppState> {
    Router::new().route("/sheet", post(handle_sheet))
}

/// POST /sheet {action: "read" | "update", row?, data?}
#[instrument(skip(state, body))]
pub async fn handle_sheet(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    body: Bytes,
) -> Result<Response, AppError> {
    let request: SheetRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "unreadable request body");
        AppError::Validation(format!("Invalid request body: {e}"))
    })?;

    match Action::from_value(request.action.as_ref()) {
        Some(Action::Read) => Ok(Json(read_sheet(&state, &identity).await?).into_response()),
        Some(Action::Update) => {
            let reply = update_row(&state, &identity, request.row, request.data).await?;
            Ok(Json(reply).into_response())
        }
        None => {
            warn!(action = ?request.action, "invalid action");
            Err(AppError::InvalidAction)
        }
    }
}
