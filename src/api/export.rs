use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use serde_json::json;
use std::fs;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::api::preview::totals_for;
use crate::error::AppError;
use crate::export::{ExportStatus, export_filename, spawn_export};
use crate::render::SlipView;
use crate::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct ExportStatusResponse {
    pub status: ExportStatus,

    #[schema(example = "Slip_Gaji_Budi_Santoso_Januari_2026.pdf")]
    pub last_file: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/export",
    responses(
        (status = 202, description = "Export started"),
        (status = 409, description = "An export is already running")
    ),
    tag = "Export"
)]
pub async fn start_export(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    if !state.export.try_begin() {
        return Err(AppError::Conflict("An export is already in progress".to_string()).into());
    }

    let record = state.session().record().clone();
    let totals = totals_for(&record).await;
    let view = SlipView::build(&record, &totals);
    let filename = export_filename(&record);

    info!(file = %filename, "Export started");
    spawn_export(
        state.exporter.clone(),
        state.export.clone(),
        view,
        filename.clone(),
        state.export_delay,
    );

    Ok(HttpResponse::Accepted().json(json!({
        "message": "Export started",
        "filename": filename,
        "status": ExportStatus::InProgress,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/export/status",
    responses(
        (status = 200, description = "Current export status", body = ExportStatusResponse)
    ),
    tag = "Export"
)]
pub async fn export_status(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let last_file = state
        .export
        .last_file()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()));

    Ok(HttpResponse::Ok().json(ExportStatusResponse {
        status: state.export.status(),
        last_file,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/export/latest",
    responses(
        (status = 200, description = "The most recently exported PDF", content_type = "application/pdf"),
        (status = 404, description = "Nothing exported yet")
    ),
    tag = "Export"
)]
pub async fn download_latest(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let path = state
        .export
        .last_file()
        .ok_or_else(|| AppError::NotFound("No slip has been exported yet".to_string()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "slip.pdf".to_string());

    let read_path = path.clone();
    let bytes = web::block(move || fs::read(read_path))
        .await
        .map_err(|e| {
            error!(error = %e, "Export read task failed");
            AppError::Internal
        })?
        .map_err(|e| {
            error!(error = %e, file = %path.display(), "Exported file unreadable");
            AppError::NotFound(format!("Exported file {name} is no longer available"))
        })?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(name)],
        })
        .body(bytes))
}
