use tracing::{info, warn};

use super::dto::{ReadResponse, RowData, UpdateResponse};
use super::model::{Sheet, SheetRow};
use super::webhook::RowUpdate;
use crate::{auth::Identity, error::AppError, state::AppState};

pub async fn read_sheet(state: &AppState, identity: &Identity) -> Result<ReadResponse, AppError> {
    let sheet = fetch_sheet(state).await?;
    let rows = sheet.into_rows();
    info!(user_id = %identity.user_id, rows = rows.len(), "sheet read");
    Ok(ReadResponse {
        data: rows,
        user_email: identity.email.clone(),
    })
}

pub async fn update_row(
    state: &AppState,
    identity: &Identity,
    row: Option<SheetRow>,
    data: Option<RowData>,
) -> Result<UpdateResponse, AppError> {
    let (Some(row), Some(data)) = (row, data) else {
        return Err(AppError::Validation("Missing row or data".into()));
    };
    let webhook = state.webhook.as_ref().ok_or(AppError::Config)?;

    if state.config.enforce_row_ownership {
        let sheet = fetch_sheet(state).await?;
        check_ownership(&sheet, identity, row, &data)?;
    }

    let update = RowUpdate::new(row, data, identity.email.clone());
    let reply = webhook.forward(&update).await.map_err(AppError::internal)?;

    if !reply.success {
        warn!(user_id = %identity.user_id, row = row.0, error = ?reply.error, "webhook refused update");
        return Err(AppError::update(reply.error));
    }

    info!(user_id = %identity.user_id, email = %identity.email, row = row.0, "row updated");
    Ok(UpdateResponse { success: true })
}

/// Rejects updates that touch unknown columns, someone else's row, or that
/// would hand the row to another email.
pub fn check_ownership(
    sheet: &Sheet,
    identity: &Identity,
    row: SheetRow,
    data: &RowData,
) -> Result<(), AppError> {
    let header = sheet.header();
    if let Some(unknown) = data.keys().find(|k| !header.contains(k)) {
        return Err(AppError::Validation(format!("Unknown column: {unknown}")));
    }

    let target = sheet
        .row(row)
        .ok_or_else(|| AppError::Forbidden("Row does not exist".into()))?;
    let owner = target.first().map(String::as_str).unwrap_or_default();
    if !identity.owns(owner) {
        warn!(user_id = %identity.user_id, row = row.0, "update of foreign row blocked");
        return Err(AppError::Forbidden("You can only edit your own row".into()));
    }

    let new_owner = header.first().and_then(|email_col| data.get(email_col));
    if new_owner.is_some_and(|email| !identity.owns(email)) {
        return Err(AppError::Forbidden("You cannot reassign row ownership".into()));
    }
    Ok(())
}

async fn fetch_sheet(state: &AppState) -> Result<Sheet, AppError> {
    let text = state.sheet.fetch_csv().await.map_err(AppError::fetch)?;
    Ok(Sheet::parse(&text))
}
