//! config/mod.rs
//! Configuración de la aplicación (servidor, webhooks, parámetros de precios).

pub mod app_config;
pub mod pricing_config;
