use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::model::ImageSlot;
use crate::state::AppState;
use crate::utils::data_uri::{encode_image, validate_image};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataUriUpload {
    #[schema(example = "data:image/png;base64,iVBORw0KGgo=")]
    pub data_uri: String,
}

#[utoipa::path(
    put,
    path = "/api/v1/record/images/{slot}",
    request_body(content = Vec<u8>, content_type = "image/*", description = "Raw image bytes"),
    params(
        ("slot" = ImageSlot, Path, description = "`logo`, `signature` or `stamp`")
    ),
    responses(
        (status = 200, description = "Image stored as a data URI"),
        (status = 400, description = "Not an image"),
        (status = 409, description = "Superseded by a newer upload"),
        (status = 413, description = "Payload too large")
    ),
    tag = "Images"
)]
pub async fn upload_image(
    req: HttpRequest,
    state: web::Data<AppState>,
    slot: web::Path<ImageSlot>,
    body: web::Bytes,
) -> actix_web::Result<impl Responder> {
    let slot = slot.into_inner();
    let mime = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .unwrap_or_default()
        .to_string();

    let ticket = state.uploads.begin(slot);
    let size = body.len();

    let data_uri = web::block(move || encode_image(&mime, &body))
        .await
        .map_err(|e| {
            error!(error = %e, slot = %slot, "Image encoding task failed");
            AppError::Internal
        })?
        .map_err(AppError::BadRequest)?;

    state.commit_upload(ticket, data_uri)?;
    info!(slot = %slot, bytes = size, "Image uploaded");

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("{slot} image updated")
    })))
}

#[utoipa::path(
    put,
    path = "/api/v1/record/images/{slot}/data-uri",
    request_body = DataUriUpload,
    params(
        ("slot" = ImageSlot, Path, description = "`logo`, `signature` or `stamp`")
    ),
    responses(
        (status = 200, description = "Image stored"),
        (status = 400, description = "Not a base64 image data URI"),
        (status = 409, description = "Superseded by a newer upload")
    ),
    tag = "Images"
)]
pub async fn set_image_data_uri(
    state: web::Data<AppState>,
    slot: web::Path<ImageSlot>,
    payload: web::Json<DataUriUpload>,
) -> actix_web::Result<impl Responder> {
    let slot = slot.into_inner();
    let DataUriUpload { data_uri } = payload.into_inner();
    validate_image(&data_uri).map_err(AppError::BadRequest)?;

    let ticket = state.uploads.begin(slot);
    state.commit_upload(ticket, data_uri)?;
    info!(slot = %slot, "Image set from data URI");

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("{slot} image updated")
    })))
}

#[utoipa::path(
    delete,
    path = "/api/v1/record/images/{slot}",
    params(
        ("slot" = ImageSlot, Path, description = "`logo`, `signature` or `stamp`")
    ),
    responses(
        (status = 200, description = "Image removed")
    ),
    tag = "Images"
)]
pub async fn clear_image(
    state: web::Data<AppState>,
    slot: web::Path<ImageSlot>,
) -> actix_web::Result<impl Responder> {
    let slot = slot.into_inner();
    state.clear_image(slot);
    info!(slot = %slot, "Image cleared");

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("{slot} image removed")
    })))
}
