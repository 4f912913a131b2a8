//! config/pricing_config.rs
//! Parámetros por defecto para cotizaciones y estimación de flete.

use serde::{Deserialize, Serialize};

use crate::config::app_config::env_or;
use crate::models::quote_model::ShippingParams;

/// Valores por defecto del panel de administración
/// (se pueden sobreescribir con PRICESYNC_DEFAULT_*)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    pub markup_pct: f64,
    pub discount_pct: f64,
    pub tax_pct: f64,
    /// CLP por 1 EUR
    pub exchange_rate: f64,
    pub local_currency: String,
    pub shipping: ShippingParams,
    pub freight: FreightConfig,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            markup_pct: 20.0,
            discount_pct: 5.0,
            tax_pct: 19.0,
            exchange_rate: 950.0,
            local_currency: "CLP".to_string(),
            shipping: ShippingParams {
                base_cost_eur: 2500.0,
                variable_rate: 0.05,
                insurance_rate: 0.01,
            },
            freight: FreightConfig::default(),
        }
    }
}

impl PricingConfig {
    pub fn from_env() -> Self {
        let d = PricingConfig::default();
        PricingConfig {
            markup_pct: env_or("PRICESYNC_DEFAULT_MARKUP", d.markup_pct),
            discount_pct: env_or("PRICESYNC_DEFAULT_DISCOUNT", d.discount_pct),
            tax_pct: env_or("PRICESYNC_DEFAULT_TAX", d.tax_pct),
            exchange_rate: env_or("PRICESYNC_DEFAULT_EXCHANGE_RATE", d.exchange_rate),
            local_currency: std::env::var("PRICESYNC_LOCAL_CURRENCY").unwrap_or(d.local_currency),
            shipping: ShippingParams {
                base_cost_eur: env_or("PRICESYNC_DEFAULT_SHIPPING_BASE", d.shipping.base_cost_eur),
                variable_rate: env_or(
                    "PRICESYNC_DEFAULT_SHIPPING_VARIABLE",
                    d.shipping.variable_rate,
                ),
                insurance_rate: env_or(
                    "PRICESYNC_DEFAULT_INSURANCE",
                    d.shipping.insurance_rate,
                ),
            },
            freight: d.freight,
        }
    }
}

/// Tabla de fletes por ruta (puerto origen - puerto destino) y tarifas por peso/volumen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreightConfig {
    pub routes: Vec<(String, f64)>,
    pub default_route_cost: f64,
    pub eur_per_kg: f64,
    pub eur_per_m3: f64,
    pub insurance_rate: f64,
    pub duty_rate: f64,
    pub default_origin: String,
    pub default_destination: String,
}

impl Default for FreightConfig {
    fn default() -> Self {
        FreightConfig {
            routes: vec![
                ("valencia-valparaiso".to_string(), 2500.0),
                ("valencia-sanantonio".to_string(), 2400.0),
                ("barcelona-valparaiso".to_string(), 2600.0),
                ("barcelona-sanantonio".to_string(), 2500.0),
            ],
            default_route_cost: 3000.0,
            eur_per_kg: 5.0,
            eur_per_m3: 100.0,
            insurance_rate: 0.01,
            duty_rate: 0.19,
            default_origin: "valencia".to_string(),
            default_destination: "valparaiso".to_string(),
        }
    }
}

impl FreightConfig {
    pub fn route_cost(&self, route_key: &str) -> f64 {
        self.routes
            .iter()
            .find(|(key, _)| key == route_key)
            .map(|(_, cost)| *cost)
            .unwrap_or(self.default_route_cost)
    }
}
