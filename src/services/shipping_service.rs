//! services/shipping_service.rs
//! Estimación de flete marítimo según ruta, peso y volumen.

use crate::config::pricing_config::FreightConfig;
use crate::models::product_model::Product;
use crate::models::shipping_model::FreightEstimate;
use crate::services::pricing_service::round2;

#[derive(Debug, Clone)]
pub struct ShippingService {
    freight: FreightConfig,
}

impl ShippingService {
    pub fn new(freight: FreightConfig) -> Self {
        ShippingService { freight }
    }

    pub fn estimate_freight(
        &self,
        principal: &Product,
        optionals: &[Product],
        origin_port: Option<&str>,
        destination_port: Option<&str>,
    ) -> FreightEstimate {
        let cfg = &self.freight;
        let origin = normalize_port(origin_port.unwrap_or(&cfg.default_origin));
        let destination = normalize_port(destination_port.unwrap_or(&cfg.default_destination));
        let route = format!("{}-{}", origin, destination);

        let items = || std::iter::once(principal).chain(optionals.iter());
        let weight: f64 = items().map(|p| p.weight_kg.unwrap_or(0.0)).sum();
        let volume: f64 = items().map(|p| p.volume_m3.unwrap_or(0.0)).sum();
        let goods_value: f64 = items().map(Product::price_or_zero).sum();

        let base = cfg.route_cost(&route);
        // se cobra lo que resulte mayor: peso o volumen
        let variable = (weight * cfg.eur_per_kg).max(volume * cfg.eur_per_m3);
        let insurance = goods_value * cfg.insurance_rate;
        let duties = (base + variable) * cfg.duty_rate;

        log::debug!(
            "Flete {}: {:.1} kg, {:.2} m3, valor {:.2} EUR",
            route,
            weight,
            volume,
            goods_value
        );

        FreightEstimate {
            route,
            costo_base: round2(base),
            costo_variable: round2(variable),
            seguro: round2(insurance),
            impuestos: round2(duties),
            costo_total: round2(base + variable + insurance + duties),
        }
    }
}

/// "San Antonio" -> "sanantonio", "Valparaíso" -> "valparaiso"
pub fn normalize_port(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .filter(char::is_ascii_alphanumeric)
        .collect()
}
