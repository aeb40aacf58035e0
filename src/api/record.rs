use actix_web::{HttpResponse, Responder, web};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::AppError;
use crate::model::{RecordPatch, SalaryRecord};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/record",
    responses(
        (status = 200, description = "The live salary record", body = SalaryRecord)
    ),
    tag = "Record"
)]
pub async fn get_record(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let record = state.session().record().clone();
    Ok(HttpResponse::Ok().json(record))
}

/// Replace the whole record. The body goes through the same default merge as
/// persisted data, so omitted fields keep their defaults.
#[utoipa::path(
    put,
    path = "/api/v1/record",
    request_body = SalaryRecord,
    responses(
        (status = 200, description = "Record replaced", body = SalaryRecord),
        (status = 400, description = "Body is not a record")
    ),
    tag = "Record"
)]
pub async fn replace_record(
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> actix_web::Result<impl Responder> {
    let decoded = SalaryRecord::decode_stored(&SalaryRecord::default(), payload.into_inner()).map_err(|e| {
        warn!(error = %e, "Rejected record body");
        AppError::BadRequest(format!("Invalid salary record: {e}"))
    })?;
    if !decoded.complete {
        warn!("Dropped unreadable line items from record body");
    }
    let record = decoded.value;

    state.session().replace_record(record.clone());
    info!(employee = %record.employee_name, period = %record.period, "Record replaced");

    Ok(HttpResponse::Ok().json(record))
}

#[utoipa::path(
    patch,
    path = "/api/v1/record",
    request_body = RecordPatch,
    responses(
        (status = 200, description = "Record updated", body = SalaryRecord)
    ),
    tag = "Record"
)]
pub async fn patch_record(
    state: web::Data<AppState>,
    payload: web::Json<RecordPatch>,
) -> actix_web::Result<impl Responder> {
    let record = state.session().patch_record(&payload);
    Ok(HttpResponse::Ok().json(record))
}
