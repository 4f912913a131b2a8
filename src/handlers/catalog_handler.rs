//! handlers/catalog_handler.rs
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::errors::error_response;
use crate::services::catalog_service::CatalogService;

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    q: Option<String>,
    page: Option<u64>,
    page_size: Option<u64>,
}

/// GET /api/products
pub async fn list_products_endpoint(
    catalog: web::Data<CatalogService>,
    query: web::Query<CatalogQuery>,
) -> HttpResponse {
    match catalog
        .products_page(query.q.as_deref(), query.page, query.page_size)
        .await
    {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => error_response(&e),
    }
}

/// GET /api/optionals
pub async fn list_optionals_endpoint(
    catalog: web::Data<CatalogService>,
    query: web::Query<CatalogQuery>,
) -> HttpResponse {
    match catalog
        .optionals_page(query.q.as_deref(), query.page, query.page_size)
        .await
    {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => error_response(&e),
    }
}

/// GET /api/products/{model}/optionals
pub async fn model_optionals_endpoint(
    catalog: web::Data<CatalogService>,
    path: web::Path<String>,
) -> HttpResponse {
    let model = path.into_inner();
    match catalog.optionals_for_model(&model).await {
        Ok(items) => HttpResponse::Ok().json(json!({
            "model": model,
            "total": items.len(),
            "items": items
        })),
        Err(e) => error_response(&e),
    }
}
