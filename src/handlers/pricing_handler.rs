//! handlers/pricing_handler.rs
//! Cálculos sueltos: precio con margen, conversión de moneda, flete y parámetros.

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::errors::error_response;
use crate::models::quote_model::{
    CalculateRequest, CalculateResponse, ExchangeRequest, ExchangeResponse,
};
use crate::models::shipping_model::{
    FreightRequest, ShippingDispatchRequest, ShippingDispatchResponse,
};
use crate::services::{
    exchange_service::ExchangeService,
    pricing_service::{apply_exchange_rate, validate_price, PricingService},
    shipping_service::ShippingService,
    webhook_service::WebhookService,
};

/// POST /api/calculate
pub async fn calculate_endpoint(
    pricing: web::Data<PricingService>,
    body: web::Json<CalculateRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    let markup = req.markup.unwrap_or(pricing.config().markup_pct);
    let discount = req.discount.unwrap_or(pricing.config().discount_pct);

    match pricing.price(req.base_price, Some(markup), Some(discount)) {
        Ok(final_price) => HttpResponse::Ok().json(CalculateResponse {
            base_price: req.base_price,
            markup_percentage: markup,
            discount_percentage: discount,
            final_price,
        }),
        Err(e) => error_response(&anyhow::Error::from(e)),
    }
}

/// POST /api/exchange
pub async fn exchange_endpoint(
    exchange: web::Data<ExchangeService>,
    body: web::Json<ExchangeRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    if let Err(e) = validate_price("price_eur", req.price_eur) {
        return error_response(&anyhow::Error::from(e));
    }

    match exchange.resolve_rate(req.exchange_rate).await {
        Ok((rate, source)) => {
            log::debug!("Conversión con tasa {} ({:?})", rate, source);
            HttpResponse::Ok().json(ExchangeResponse {
                price_eur: req.price_eur,
                exchange_rate: rate,
                local_price: apply_exchange_rate(req.price_eur, rate),
            })
        }
        Err(e) => error_response(&e),
    }
}

/// GET /api/exchange-rates
pub async fn exchange_rates_endpoint(exchange: web::Data<ExchangeService>) -> HttpResponse {
    match exchange.current_rates().await {
        Ok(rates) => HttpResponse::Ok().json(rates),
        Err(e) => error_response(&e),
    }
}

/// POST /api/shipping
pub async fn freight_endpoint(
    shipping: web::Data<ShippingService>,
    body: web::Json<FreightRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    let estimate = shipping.estimate_freight(
        &req.producto_principal,
        &req.opcionales,
        req.puerto_origen.as_deref(),
        req.puerto_destino.as_deref(),
    );
    HttpResponse::Ok().json(estimate)
}

/// POST /api/shipping/dispatch
pub async fn shipping_dispatch_endpoint(
    webhooks: web::Data<WebhookService>,
    body: web::Json<ShippingDispatchRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    if req.products.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "error": "No hay productos para enviar"
        }));
    }

    match webhooks.dispatch_shipping(&req).await {
        Ok(status) => HttpResponse::Ok().json(ShippingDispatchResponse {
            success: true,
            upstream_status: status,
        }),
        Err(e) => error_response(&e),
    }
}

/// GET /api/pricing/defaults
pub async fn pricing_defaults_endpoint(pricing: web::Data<PricingService>) -> HttpResponse {
    HttpResponse::Ok().json(pricing.config())
}
