//! tests/mod.rs
//! Pruebas unitarias y de integración de los servicios y endpoints.

mod pricing_tests;
mod product_model_tests;
mod quote_service_tests;

use crate::models::product_model::Product;

/// Producto mínimo para pruebas
pub fn product(code: &str, model: &str, price: f64) -> Product {
    Product {
        code: code.to_string(),
        name: format!("Producto {}", code),
        description: format!("Descripción de {}", code),
        model: model.to_string(),
        price_eur: Some(price),
        ..Product::default()
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "se esperaba {}, se obtuvo {}",
        expected,
        actual
    );
}
