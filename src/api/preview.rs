use actix_web::{HttpResponse, Responder, web};

use crate::model::SalaryRecord;
use crate::render::SlipView;
use crate::state::AppState;
use crate::totals::{self, Totals};
use crate::utils::totals_cache;

/// Totals for a record snapshot, with the line-item sums served from cache.
pub async fn totals_for(record: &SalaryRecord) -> Totals {
    let sums = totals_cache::line_item_sums(&record.allowances, &record.other_deductions).await;
    totals::compute_with(record, sums)
}

#[utoipa::path(
    get,
    path = "/api/v1/totals",
    responses(
        (status = 200, description = "Derived totals of the live record", body = Totals)
    ),
    tag = "Preview"
)]
pub async fn get_totals(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let record = state.session().record().clone();
    Ok(HttpResponse::Ok().json(totals_for(&record).await))
}

#[utoipa::path(
    get,
    path = "/api/v1/preview",
    responses(
        (status = 200, description = "Rendered slip layout of the live record", body = SlipView)
    ),
    tag = "Preview"
)]
pub async fn get_preview(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let record = state.session().record().clone();
    let totals = totals_for(&record).await;
    Ok(HttpResponse::Ok().json(SlipView::build(&record, &totals)))
}
