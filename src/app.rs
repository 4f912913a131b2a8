//! app.rs
use crate::handlers::{
    catalog_handler, health_handler, pricing_handler, quote_handler, webhook_handler,
};
use actix_web::web;

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_handler::health_endpoint))
        .service(
            web::scope("/api")
                .route(
                    "/calculate",
                    web::post().to(pricing_handler::calculate_endpoint),
                )
                .route("/exchange", web::post().to(pricing_handler::exchange_endpoint))
                .route(
                    "/exchange-rates",
                    web::get().to(pricing_handler::exchange_rates_endpoint),
                )
                .route(
                    "/pricing/defaults",
                    web::get().to(pricing_handler::pricing_defaults_endpoint),
                )
                .service(
                    web::scope("/shipping")
                        .route("", web::post().to(pricing_handler::freight_endpoint))
                        .route(
                            "/dispatch",
                            web::post().to(pricing_handler::shipping_dispatch_endpoint),
                        ),
                )
                .service(
                    web::scope("/products")
                        .route(
                            "",
                            web::get().to(catalog_handler::list_products_endpoint),
                        )
                        .route(
                            "/{model}/optionals",
                            web::get().to(catalog_handler::model_optionals_endpoint),
                        ),
                )
                .route(
                    "/optionals",
                    web::get().to(catalog_handler::list_optionals_endpoint),
                )
                .service(
                    web::scope("/quotes")
                        .route("", web::post().to(quote_handler::create_quote_endpoint))
                        .route("", web::get().to(quote_handler::list_quotes_endpoint))
                        .route(
                            "/preview",
                            web::post().to(quote_handler::preview_quote_endpoint),
                        )
                        .route("/stats", web::get().to(quote_handler::quote_stats_endpoint))
                        .route("/{id}", web::get().to(quote_handler::get_quote_endpoint))
                        .route(
                            "/{id}/export",
                            web::get().to(quote_handler::export_quote_endpoint),
                        ),
                )
                .service(
                    web::resource("/webhook-proxy/{kind}")
                        .route(web::get().to(webhook_handler::webhook_proxy_endpoint))
                        .route(web::post().to(webhook_handler::webhook_proxy_endpoint)),
                ),
        );
}
