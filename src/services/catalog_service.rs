//! services/catalog_service.rs
//! Búsqueda y paginación sobre equipos y opcionales obtenidos de los webhooks.

use anyhow::Result;

use crate::models::product_model::{CatalogPage, Product};
use crate::services::webhook_service::WebhookService;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Clone, Debug)]
pub struct CatalogService {
    webhooks: WebhookService,
}

impl CatalogService {
    pub fn new(webhooks: WebhookService) -> Self {
        CatalogService { webhooks }
    }

    pub async fn products_page(
        &self,
        term: Option<&str>,
        page: Option<u64>,
        page_size: Option<u64>,
    ) -> Result<CatalogPage<Product>> {
        let products = self.webhooks.fetch_products().await?;
        Ok(paginate(search(products, term.unwrap_or_default()), page, page_size))
    }

    pub async fn optionals_page(
        &self,
        term: Option<&str>,
        page: Option<u64>,
        page_size: Option<u64>,
    ) -> Result<CatalogPage<Product>> {
        let optionals = self.webhooks.fetch_optionals().await?;
        Ok(paginate(search(optionals, term.unwrap_or_default()), page, page_size))
    }

    pub async fn optionals_for_model(&self, model: &str) -> Result<Vec<Product>> {
        let optionals = self.webhooks.fetch_optionals().await?;
        Ok(optionals_for_model(optionals, model))
    }
}

/// Coincidencia parcial, sin distinguir mayúsculas, en código, nombre, descripción o modelo
pub fn search(items: Vec<Product>, term: &str) -> Vec<Product> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|p| {
            [&p.code, &p.name, &p.description, &p.model]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Páginas desde 1. Una página fuera de rango vuelve vacía.
pub fn paginate<T>(items: Vec<T>, page: Option<u64>, page_size: Option<u64>) -> CatalogPage<T> {
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let total = items.len() as u64;
    let total_pages = total.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size);
    let items: Vec<T> = if start >= total {
        Vec::new()
    } else {
        items
            .into_iter()
            .skip(start as usize)
            .take(page_size as usize)
            .collect()
    };

    CatalogPage {
        total,
        page,
        page_size,
        total_pages,
        items,
    }
}

pub fn optionals_for_model(optionals: Vec<Product>, model: &str) -> Vec<Product> {
    let wanted = model.trim().to_lowercase();
    optionals
        .into_iter()
        .filter(|o| o.model.trim().to_lowercase() == wanted)
        .collect()
}
