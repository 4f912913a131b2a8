//! handlers/webhook_handler.rs
//! Proxy hacia los webhooks existentes.

use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};

use crate::errors::error_response;
use crate::models::webhook_model::WebhookKind;
use crate::services::webhook_service::WebhookService;

/// GET|POST /api/webhook-proxy/{kind}
/// GET reenvía el query string; POST reenvía el cuerpo JSON (cuerpo inválido => `{}`).
pub async fn webhook_proxy_endpoint(
    webhooks: web::Data<WebhookService>,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let kind = match path.into_inner().parse::<WebhookKind>() {
        Ok(kind) => kind,
        Err(e) => return error_response(&anyhow::Error::from(e)),
    };

    let (method, payload) = if req.method() == actix_web::http::Method::POST {
        let json = serde_json::from_slice::<serde_json::Value>(&body)
            .unwrap_or_else(|_| serde_json::json!({}));
        (reqwest::Method::POST, Some(json))
    } else {
        (reqwest::Method::GET, None)
    };

    match webhooks
        .forward(kind, method, req.query_string(), payload)
        .await
    {
        Ok(upstream) => {
            let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let mut resp = HttpResponse::build(status);
            if let Some(ct) = upstream.content_type {
                resp.insert_header(("Content-Type", ct));
            }
            resp.body(upstream.body)
        }
        Err(e) => error_response(&e),
    }
}
