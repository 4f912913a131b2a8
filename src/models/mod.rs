//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod product_model;
pub mod quote_model;
pub mod shipping_model;
pub mod webhook_model;
