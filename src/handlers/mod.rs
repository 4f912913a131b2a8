//! handlers/mod.rs
//! Módulo que agrupa los distintos handlers (precios, catálogo, cotizaciones, webhooks).

pub mod catalog_handler;
pub mod health_handler;
pub mod pricing_handler;
pub mod quote_handler;
pub mod webhook_handler;
