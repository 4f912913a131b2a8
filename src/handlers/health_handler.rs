//! handlers/health_handler.rs
use actix_web::HttpResponse;
use chrono::Utc;
use serde_json::json;

/// GET /health
pub async fn health_endpoint() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
