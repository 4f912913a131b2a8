//! models/product_model.rs
//! Registros de productos/opcionales tal como llegan desde los webhooks.

use serde::{Deserialize, Deserializer, Serialize};

/// Equipo principal u opcional. Los webhooks usan las mismas claves para ambos.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "codigo_producto", default)]
    pub code: String,
    #[serde(rename = "nombre_del_producto", default)]
    pub name: String,
    #[serde(rename = "Descripcion", default)]
    pub description: String,
    #[serde(rename = "Modelo", default)]
    pub model: String,
    #[serde(
        rename = "pf_eur",
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_eur: Option<f64>,
    #[serde(
        rename = "transporte_nacional",
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub domestic_transport_eur: Option<f64>,
    #[serde(
        rename = "peso_kg",
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight_kg: Option<f64>,
    #[serde(
        rename = "volumen_m3",
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume_m3: Option<f64>,
}

impl Product {
    pub fn price_or_zero(&self) -> f64 {
        self.price_eur.unwrap_or(0.0)
    }

    /// true si el registro es un opcional colado en el listado de equipos
    pub fn is_optional_listing(&self) -> bool {
        self.model.to_lowercase().contains("opcionales")
    }
}

/// Respuesta del webhook de tipo de cambio (primer elemento del arreglo)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRates {
    #[serde(rename = "Fecha", default)]
    pub date: String,
    #[serde(rename = "Valor_Dolar", default, deserialize_with = "lenient_f64")]
    pub usd_clp: Option<f64>,
    #[serde(rename = "Valor_Euro", default, deserialize_with = "lenient_f64")]
    pub eur_clp: Option<f64>,
}

/// Página de resultados para tablas con búsqueda
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage<T> {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub items: Vec<T>,
}

/// Acepta números como número JSON o como string ("22500", "4,5", "35.400,00").
/// String vacío o null se tratan como ausentes.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => Ok(n.as_f64()),
        Some(serde_json::Value::String(s)) => parse_decimal(&s)
            .map_err(|_| serde::de::Error::custom(format!("número inválido: '{}'", s))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "se esperaba número, se recibió {}",
            other
        ))),
    }
}

/// Parsea un decimal escrito con punto o coma.
/// Si aparecen ambos, el último separador es el decimal. Sin coma, puntos seguidos de
/// grupos de tres dígitos ("35.400", "1.250.000") son separadores de miles.
pub fn parse_decimal(raw: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    let s: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€')
        .collect();
    if s.is_empty() {
        return Ok(None);
    }

    let normalized = match (s.rfind(','), s.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s.replace(',', ""),
        (Some(_), None) => s.replace(',', "."),
        (None, Some(_)) if is_dot_grouped(&s) => s.replace('.', ""),
        _ => s,
    };

    normalized.parse::<f64>().map(Some)
}

fn is_dot_grouped(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let mut groups = digits.split('.');
    let head = groups.next().unwrap_or_default();
    (1..=3).contains(&head.len())
        && !head.starts_with('0')
        && head.chars().all(|c| c.is_ascii_digit())
        && groups.all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}
