use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::format::{amount_in_words, format_currency, format_number, words_from_number};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct FormatQuery {
    #[schema(example = 5650000)]
    pub value: i64,
}

#[derive(Serialize, ToSchema)]
pub struct CurrencyResponse {
    pub value: i64,

    #[schema(example = "Rp\u{a0}5.650.000")]
    pub formatted: String,

    #[schema(example = "5.650.000")]
    pub grouped: String,
}

#[derive(Serialize, ToSchema)]
pub struct WordsResponse {
    pub value: i64,

    #[schema(example = "Lima Juta Enam Ratus Lima Puluh Ribu")]
    pub words: String,

    #[schema(example = "Lima Juta Enam Ratus Lima Puluh Ribu Rupiah")]
    pub amount_in_words: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/format/currency",
    params(FormatQuery),
    responses(
        (status = 200, description = "Rupiah formatting", body = CurrencyResponse)
    ),
    tag = "Format"
)]
pub async fn currency(query: web::Query<FormatQuery>) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(CurrencyResponse {
        value: query.value,
        formatted: format_currency(query.value),
        grouped: format_number(query.value),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/format/words",
    params(FormatQuery),
    responses(
        (status = 200, description = "Indonesian amount in words", body = WordsResponse)
    ),
    tag = "Format"
)]
pub async fn words(query: web::Query<FormatQuery>) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(WordsResponse {
        value: query.value,
        words: words_from_number(query.value),
        amount_in_words: amount_in_words(query.value),
    }))
}
