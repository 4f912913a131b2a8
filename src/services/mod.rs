//! services/mod.rs
//! Módulo que agrupa distintos "servicios" o "capas de negocio" de la app.

pub mod catalog_service;
pub mod exchange_service;
pub mod export_service;
pub mod pricing_service;
pub mod quote_service;
pub mod shipping_service;
pub mod webhook_service;
