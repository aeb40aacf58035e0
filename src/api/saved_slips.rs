use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::IntoParams;

use crate::error::AppError;
use crate::model::{SalaryRecord, SavedSlip};
use crate::slips::{Confirmation, SlipOutcome};
use crate::state::AppState;

#[derive(Deserialize, IntoParams)]
pub struct ConfirmQuery {
    /// Must be present; `false` cancels the operation.
    pub confirm: Option<bool>,
}

impl ConfirmQuery {
    fn confirmation(&self, action: &str) -> Result<Confirmation, AppError> {
        self.confirm.map(Confirmation::from).ok_or_else(|| {
            AppError::ConfirmationRequired(format!("{action} requires ?confirm=true"))
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/saved",
    responses(
        (status = 200, description = "Saved slips, most recent first", body = [SavedSlip])
    ),
    tag = "Saved Slips"
)]
pub async fn list_saved(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let saved = state.session().saved().to_vec();
    Ok(HttpResponse::Ok().json(saved))
}

#[utoipa::path(
    post,
    path = "/api/v1/saved",
    responses(
        (status = 201, description = "Snapshot of the live record saved", body = SavedSlip)
    ),
    tag = "Saved Slips"
)]
pub async fn save_slip(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let slip = state.session().save_slip(Utc::now().timestamp_millis());

    info!(id = %slip.id, title = %slip.title, "Slip saved");
    Ok(HttpResponse::Created().json(slip))
}

#[utoipa::path(
    post,
    path = "/api/v1/saved/{id}/load",
    params(
        ("id" = String, Path, description = "Saved slip id"),
        ConfirmQuery
    ),
    responses(
        (status = 200, description = "Live record replaced, or load cancelled", body = SalaryRecord),
        (status = 404, description = "No such saved slip"),
        (status = 428, description = "Confirmation missing")
    ),
    tag = "Saved Slips"
)]
pub async fn load_slip(
    state: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<ConfirmQuery>,
) -> actix_web::Result<impl Responder> {
    let confirmation = query.confirmation("Loading a saved slip")?;

    match state.session().load_slip(&id, confirmation) {
        SlipOutcome::Done(record) => {
            info!(id = %id, "Saved slip loaded");
            Ok(HttpResponse::Ok().json(record))
        }
        SlipOutcome::Cancelled => Ok(HttpResponse::Ok().json(json!({
            "message": "Load cancelled"
        }))),
        SlipOutcome::NotFound => Err(AppError::NotFound(format!("Saved slip {id} not found")).into()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/saved/{id}",
    params(
        ("id" = String, Path, description = "Saved slip id"),
        ConfirmQuery
    ),
    responses(
        (status = 200, description = "Saved slip deleted, or delete cancelled"),
        (status = 404, description = "No such saved slip"),
        (status = 428, description = "Confirmation missing")
    ),
    tag = "Saved Slips"
)]
pub async fn delete_slip(
    state: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<ConfirmQuery>,
) -> actix_web::Result<impl Responder> {
    let confirmation = query.confirmation("Deleting a saved slip")?;

    match state.session().delete_slip(&id, confirmation) {
        SlipOutcome::Done(removed) => {
            info!(id = %removed.id, title = %removed.title, "Saved slip deleted");
            Ok(HttpResponse::Ok().json(json!({
                "message": "Saved slip deleted"
            })))
        }
        SlipOutcome::Cancelled => Ok(HttpResponse::Ok().json(json!({
            "message": "Delete cancelled"
        }))),
        SlipOutcome::NotFound => Err(AppError::NotFound(format!("Saved slip {id} not found")).into()),
    }
}
