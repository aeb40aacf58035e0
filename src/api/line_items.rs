use actix_web::{HttpResponse, Responder, web};
use tracing::info;

use crate::model::{LineItem, LineItemKind, LineItemPatch};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/record/{kind}",
    params(
        ("kind" = LineItemKind, Path, description = "`allowances` or `deductions`")
    ),
    responses(
        (status = 201, description = "Line item appended with default name and zero amount", body = LineItem),
        (status = 404, description = "Unknown kind")
    ),
    tag = "Line Items"
)]
pub async fn add_item(
    state: web::Data<AppState>,
    kind: web::Path<LineItemKind>,
) -> actix_web::Result<impl Responder> {
    let kind = kind.into_inner();
    let item = state.session().add_item(kind, &state.ids);

    info!(kind = %kind, id = %item.id, "Line item added");
    Ok(HttpResponse::Created().json(item))
}

#[utoipa::path(
    put,
    path = "/api/v1/record/{kind}/{id}",
    request_body = LineItemPatch,
    params(
        ("kind" = LineItemKind, Path, description = "`allowances` or `deductions`"),
        ("id" = String, Path, description = "Line item id")
    ),
    responses(
        (status = 200, description = "Line item updated", body = LineItem),
        (status = 404, description = "No such line item")
    ),
    tag = "Line Items"
)]
pub async fn update_item(
    state: web::Data<AppState>,
    path: web::Path<(LineItemKind, String)>,
    payload: web::Json<LineItemPatch>,
) -> actix_web::Result<impl Responder> {
    let (kind, id) = path.into_inner();
    let item = state.session().update_item(kind, &id, &payload)?;
    Ok(HttpResponse::Ok().json(item))
}

#[utoipa::path(
    delete,
    path = "/api/v1/record/{kind}/{id}",
    params(
        ("kind" = LineItemKind, Path, description = "`allowances` or `deductions`"),
        ("id" = String, Path, description = "Line item id")
    ),
    responses(
        (status = 200, description = "Line item removed", body = LineItem),
        (status = 404, description = "No such line item")
    ),
    tag = "Line Items"
)]
pub async fn remove_item(
    state: web::Data<AppState>,
    path: web::Path<(LineItemKind, String)>,
) -> actix_web::Result<impl Responder> {
    let (kind, id) = path.into_inner();
    let item = state.session().remove_item(kind, &id)?;

    info!(kind = %kind, id = %item.id, "Line item removed");
    Ok(HttpResponse::Ok().json(item))
}
