//! models/quote_model.rs
//! Estructuras de requests/responses para cálculos y cotizaciones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::product_model::Product;

/// Modelo de envío por tasa: costo fijo + % variable + % seguro sobre el neto
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShippingParams {
    #[serde(alias = "costoBaseEnvio")]
    pub base_cost_eur: f64,
    /// Fracción del neto (0.05 = 5%)
    #[serde(alias = "costoVariableEnvio")]
    pub variable_rate: f64,
    /// Fracción del neto (0.01 = 1%)
    #[serde(alias = "seguro")]
    pub insurance_rate: f64,
}

/// Régimen tributario. Exento y exportación no pagan IVA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxRegime {
    #[default]
    #[serde(alias = "nacional")]
    National,
    #[serde(alias = "exento")]
    Exempt,
    #[serde(alias = "exportacion")]
    Export,
}

impl TaxRegime {
    pub fn effective_rate(&self, tax_pct: f64) -> f64 {
        match self {
            TaxRegime::National => tax_pct,
            TaxRegime::Exempt | TaxRegime::Export => 0.0,
        }
    }
}

/// POST /api/quotes y /api/quotes/preview
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    #[serde(alias = "productoPrincipal")]
    pub principal: Product,
    #[serde(default, alias = "opcionalesSeleccionados")]
    pub optionals: Vec<Product>,
    #[serde(default, alias = "markup")]
    pub markup_pct: Option<f64>,
    #[serde(default, alias = "descuento")]
    pub discount_pct: Option<f64>,
    /// Si no viene, se usa el tipo de cambio del webhook (o el default)
    #[serde(default, alias = "tasaCambio")]
    pub exchange_rate: Option<f64>,
    #[serde(default, alias = "tipoIva")]
    pub tax_regime: Option<TaxRegime>,
    #[serde(default, alias = "iva")]
    pub tax_pct: Option<f64>,
    #[serde(default)]
    pub shipping: Option<ShippingParams>,
    #[serde(default, alias = "puertoOrigen")]
    pub origin_port: Option<String>,
    #[serde(default, alias = "puertoDestino")]
    pub destination_port: Option<String>,
}

/// Parámetros ya resueltos (request + defaults) con los que se calculó la cotización
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteParams {
    pub markup_pct: f64,
    pub discount_pct: f64,
    pub tax_regime: TaxRegime,
    pub tax_pct: f64,
    pub exchange_rate: f64,
    pub local_currency: String,
    pub shipping: ShippingParams,
    pub origin_port: Option<String>,
    pub destination_port: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub code: String,
    pub name: String,
    pub base_eur: f64,
    pub margin_eur: f64,
    pub with_margin_eur: f64,
    pub discount_eur: f64,
    pub final_eur: f64,
    pub final_local: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub subtotal_base_eur: f64,
    pub subtotal_with_margin_eur: f64,
    pub discount_total_eur: f64,
    pub net_eur: f64,
    pub net_local: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingBreakdown {
    pub fixed_eur: f64,
    pub variable_eur: f64,
    pub insurance_eur: f64,
    pub total_eur: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub regime: TaxRegime,
    pub rate_pct: f64,
    pub taxable_base_eur: f64,
    pub tax_eur: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub principal: QuoteLine,
    pub optionals: Vec<QuoteLine>,
    pub totals: QuoteTotals,
    pub shipping: ShippingBreakdown,
    pub tax: TaxBreakdown,
    pub grand_total_eur: f64,
    pub grand_total_local: f64,
    pub params: QuoteParams,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub status: String,
    pub quote: Quote,
}

/// Fila resumida para el listado
#[derive(Debug, Clone, Serialize)]
pub struct QuoteSummary {
    pub id: String,
    pub created_at: String,
    pub principal_code: String,
    pub principal_name: String,
    pub optional_count: i64,
    pub grand_total_eur: f64,
    pub grand_total_local: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListQuotesResponse {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub items: Vec<QuoteSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductQuoteCount {
    pub code: String,
    pub name: String,
    pub quotes: i64,
}

/// Indicadores del dashboard
#[derive(Debug, Clone, Serialize)]
pub struct QuoteStats {
    pub total_quotes: i64,
    pub quotes_this_month: i64,
    pub average_total_eur: f64,
    pub top_products: Vec<ProductQuoteCount>,
}

// ----------------------------------------------------------------------------
// Cálculos sueltos
// ----------------------------------------------------------------------------

/// POST /api/calculate
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateRequest {
    pub base_price: f64,
    #[serde(default)]
    pub markup: Option<f64>,
    #[serde(default)]
    pub discount: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculateResponse {
    pub base_price: f64,
    pub markup_percentage: f64,
    pub discount_percentage: f64,
    pub final_price: f64,
}

/// POST /api/exchange
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeRequest {
    pub price_eur: f64,
    #[serde(default)]
    pub exchange_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExchangeResponse {
    pub price_eur: f64,
    pub exchange_rate: f64,
    pub local_price: f64,
}
