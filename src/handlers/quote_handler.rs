//! handlers/quote_handler.rs
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::errors::error_response;
use crate::models::quote_model::{Quote, QuoteRequest, QuoteResponse};
use crate::services::{
    exchange_service::ExchangeService,
    export_service::{export_file_name, quote_to_csv},
    pricing_service::PricingService,
    quote_service::QuoteService,
};

#[derive(Deserialize)]
pub struct PaginationQuery {
    page: Option<u64>,
    page_size: Option<u64>,
}

/// Resuelve la tasa de cambio y calcula la cotización
async fn build_quote(
    pricing: &PricingService,
    exchange: &ExchangeService,
    req: &QuoteRequest,
) -> anyhow::Result<Quote> {
    let (rate, source) = exchange.resolve_rate(req.exchange_rate).await?;
    log::debug!("Cotizando {} con tasa {} ({:?})", req.principal.code, rate, source);
    Ok(pricing.quote(req, rate)?)
}

/// POST /api/quotes/preview
pub async fn preview_quote_endpoint(
    pricing: web::Data<PricingService>,
    exchange: web::Data<ExchangeService>,
    body: web::Json<QuoteRequest>,
) -> HttpResponse {
    match build_quote(&pricing, &exchange, &body).await {
        Ok(quote) => HttpResponse::Ok().json(QuoteResponse {
            status: "success".to_string(),
            quote,
        }),
        Err(e) => error_response(&e),
    }
}

/// POST /api/quotes
pub async fn create_quote_endpoint(
    pricing: web::Data<PricingService>,
    exchange: web::Data<ExchangeService>,
    quotes: web::Data<QuoteService>,
    body: web::Json<QuoteRequest>,
) -> HttpResponse {
    let quote = match build_quote(&pricing, &exchange, &body).await {
        Ok(q) => q,
        Err(e) => return error_response(&e),
    };

    match quotes.save_quote(&quote).await {
        Ok(()) => HttpResponse::Created().json(QuoteResponse {
            status: "success".to_string(),
            quote,
        }),
        Err(e) => error_response(&e),
    }
}

/// GET /api/quotes
pub async fn list_quotes_endpoint(
    quotes: web::Data<QuoteService>,
    query: web::Query<PaginationQuery>,
) -> HttpResponse {
    let page = query.page.unwrap_or(1);
    let page_size = query.page_size.unwrap_or(10).min(100);

    match quotes.list_quotes(page, page_size).await {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(&e),
    }
}

/// GET /api/quotes/stats
pub async fn quote_stats_endpoint(quotes: web::Data<QuoteService>) -> HttpResponse {
    match quotes.stats().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(&e),
    }
}

/// GET /api/quotes/{id}
pub async fn get_quote_endpoint(
    quotes: web::Data<QuoteService>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    match quotes.get_quote(&id).await {
        Ok(quote) => HttpResponse::Ok().json(quote),
        Err(e) => error_response(&e),
    }
}

/// GET /api/quotes/{id}/export
/// Descarga el resumen en CSV.
pub async fn export_quote_endpoint(
    quotes: web::Data<QuoteService>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    let csv = match quotes.get_quote(&id).await.and_then(|q| quote_to_csv(&q)) {
        Ok(csv) => csv,
        Err(e) => return error_response(&e),
    };

    HttpResponse::Ok()
        .append_header(("Content-Type", "text/csv; charset=utf-8"))
        .append_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", export_file_name(&id)),
        ))
        .body(csv)
}
