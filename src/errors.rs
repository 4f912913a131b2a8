//! errors.rs
//! Errores tipados que los handlers traducen a códigos HTTP.

use actix_web::{http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Entradas inválidas para el cálculo de precios (HTTP 400)
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("el precio de '{item}' no puede ser negativo: {value}")]
    NegativePrice { item: String, value: f64 },
    #[error("el valor de '{field}' no es un número finito")]
    NotFinite { field: &'static str },
    #[error("el margen no puede ser negativo: {0}")]
    NegativeMarkup(f64),
    #[error("el porcentaje de '{field}' debe estar entre 0 y 100: {value}")]
    PercentOutOfRange { field: &'static str, value: f64 },
    #[error("la tasa de cambio debe ser mayor que cero: {0}")]
    InvalidExchangeRate(f64),
    #[error("el parámetro de envío '{field}' no puede ser negativo: {value}")]
    NegativeShipping { field: &'static str, value: f64 },
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("cotización no encontrada: {0}")]
    QuoteNotFound(String),
    #[error("tipo de webhook inválido: {0}")]
    UnknownWebhook(String),
    #[error("el webhook {kind} respondió {status}")]
    UpstreamStatus { kind: String, status: u16 },
    #[error("respuesta no-JSON del webhook {kind}: {snippet}")]
    UpstreamNotJson { kind: String, snippet: String },
    #[error("error de conexión con el webhook {kind}: {message}")]
    UpstreamUnavailable { kind: String, message: String },
}

/// Status HTTP según el error de dominio que haya en la cadena de anyhow
pub fn status_for(err: &anyhow::Error) -> StatusCode {
    for cause in err.chain() {
        if cause.downcast_ref::<PricingError>().is_some() {
            return StatusCode::BAD_REQUEST;
        }
        if let Some(svc) = cause.downcast_ref::<ServiceError>() {
            return match svc {
                ServiceError::QuoteNotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::UnknownWebhook(_) => StatusCode::BAD_REQUEST,
                ServiceError::UpstreamStatus { .. }
                | ServiceError::UpstreamNotJson { .. }
                | ServiceError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            };
        }
    }
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Respuesta JSON uniforme `{ "success": false, "error": ... }`
pub fn error_response(err: &anyhow::Error) -> HttpResponse {
    let status = status_for(err);
    if status.is_server_error() {
        log::error!("{:#}", err);
    } else {
        log::warn!("{:#}", err);
    }
    HttpResponse::build(status).json(json!({
        "success": false,
        "error": format!("{:#}", err)
    }))
}
