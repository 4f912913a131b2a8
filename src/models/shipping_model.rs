//! models/shipping_model.rs
//! Estimación de flete por ruta y envío de datos al webhook de cálculo de envío.

use serde::{Deserialize, Serialize};

use crate::models::product_model::Product;

/// POST /api/shipping
#[derive(Debug, Clone, Deserialize)]
pub struct FreightRequest {
    #[serde(alias = "productoPrincipal")]
    pub producto_principal: Product,
    #[serde(default, alias = "opcionalesSeleccionados")]
    pub opcionales: Vec<Product>,
    #[serde(default, alias = "puertoOrigen")]
    pub puerto_origen: Option<String>,
    #[serde(default, alias = "puertoDestino")]
    pub puerto_destino: Option<String>,
}

/// Desglose del flete marítimo (EUR)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreightEstimate {
    pub route: String,
    pub costo_base: f64,
    pub costo_variable: f64,
    pub seguro: f64,
    pub impuestos: f64,
    pub costo_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchItem {
    #[serde(alias = "codigo")]
    pub code: String,
    /// "principal" u "opcional"
    #[serde(alias = "tipo")]
    pub kind: String,
    #[serde(alias = "precioEur")]
    pub price_eur: f64,
}

/// POST /api/shipping/dispatch
#[derive(Debug, Clone, Deserialize)]
pub struct ShippingDispatchRequest {
    pub products: Vec<DispatchItem>,
    #[serde(alias = "puertoOrigen")]
    pub origin_port: String,
    #[serde(alias = "puertoDestino")]
    pub destination_port: String,
    #[serde(default, alias = "descuento")]
    pub discount_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShippingDispatchResponse {
    pub success: bool,
    pub upstream_status: u16,
}
