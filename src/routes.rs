use crate::{
    api::{export, format, images, line_items, preview, record, saved_slips},
    config::Config,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/record")
                    // /record, room for three base64 images
                    .service(
                        web::resource("")
                            .app_data(web::JsonConfig::default().limit(config.upload_limit_bytes.saturating_mul(4)))
                            .route(web::get().to(record::get_record))
                            .route(web::put().to(record::replace_record))
                            .route(web::patch().to(record::patch_record)),
                    )
                    // /record/images/{slot} must win over /record/{kind}/{id}
                    .service(
                        web::resource("/images/{slot}")
                            .app_data(web::PayloadConfig::new(config.upload_limit_bytes))
                            .route(web::put().to(images::upload_image))
                            .route(web::delete().to(images::clear_image)),
                    )
                    // /record/images/{slot}/data-uri
                    .service(
                        web::resource("/images/{slot}/data-uri")
                            .app_data(web::JsonConfig::default().limit(config.upload_limit_bytes))
                            .route(web::put().to(images::set_image_data_uri)),
                    )
                    // /record/{kind}
                    .service(web::resource("/{kind}").route(web::post().to(line_items::add_item)))
                    // /record/{kind}/{id}
                    .service(
                        web::resource("/{kind}/{id}")
                            .route(web::put().to(line_items::update_item))
                            .route(web::delete().to(line_items::remove_item)),
                    ),
            )
            .service(web::resource("/totals").route(web::get().to(preview::get_totals)))
            .service(web::resource("/preview").route(web::get().to(preview::get_preview)))
            .service(
                web::scope("/format")
                    .service(web::resource("/currency").route(web::get().to(format::currency)))
                    .service(web::resource("/words").route(web::get().to(format::words))),
            )
            .service(
                web::scope("/saved")
                    // /saved
                    .service(
                        web::resource("")
                            .route(web::get().to(saved_slips::list_saved))
                            .route(web::post().to(saved_slips::save_slip)),
                    )
                    // /saved/{id}
                    .service(web::resource("/{id}").route(web::delete().to(saved_slips::delete_slip)))
                    // /saved/{id}/load
                    .service(web::resource("/{id}/load").route(web::post().to(saved_slips::load_slip))),
            )
            .service(
                web::scope("/export")
                    .service(web::resource("").route(web::post().to(export::start_export)))
                    .service(web::resource("/status").route(web::get().to(export::export_status)))
                    .service(web::resource("/latest").route(web::get().to(export::download_latest))),
            ),
    );
}
