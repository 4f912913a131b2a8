//! tests/product_model_tests.rs
//! Pruebas de deserialización de registros de los webhooks.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::models::product_model::{parse_decimal, ExchangeRates, Product};
    use crate::models::quote_model::{QuoteRequest, TaxRegime};

    #[test]
    fn test_product_accepts_strings_and_numbers() {
        let p: Product = serde_json::from_value(json!({
            "codigo_producto": "A141XL",
            "nombre_del_producto": "Chipeadora PTO A141XL",
            "Descripcion": "Chipeadora profesional",
            "Modelo": "A141XL",
            "pf_eur": "22500",
            "transporte_nacional": 1200,
            "peso_kg": "850",
            "volumen_m3": "4,5"
        }))
        .unwrap();

        assert_eq!(p.code, "A141XL");
        assert_eq!(p.price_eur, Some(22500.0));
        assert_eq!(p.domestic_transport_eur, Some(1200.0));
        assert_eq!(p.weight_kg, Some(850.0));
        assert_eq!(p.volume_m3, Some(4.5));
    }

    #[test]
    fn test_product_missing_and_empty_fields() {
        let p: Product = serde_json::from_value(json!({
            "codigo_producto": "X",
            "pf_eur": "",
            "peso_kg": null
        }))
        .unwrap();

        assert_eq!(p.price_eur, None);
        assert_eq!(p.weight_kg, None);
        assert_eq!(p.volume_m3, None);
        assert_eq!(p.model, "");
        assert!(!p.is_optional_listing());
    }

    #[test]
    fn test_product_rejects_garbage_price() {
        let res: Result<Product, _> = serde_json::from_value(json!({ "pf_eur": "abc" }));
        assert!(res.is_err());
        let res: Result<Product, _> = serde_json::from_value(json!({ "pf_eur": [1] }));
        assert!(res.is_err());
    }

    #[test]
    fn test_parse_decimal_formats() {
        assert_eq!(parse_decimal("35.400,00").unwrap(), Some(35400.0));
        assert_eq!(parse_decimal("1,250.50").unwrap(), Some(1250.5));
        assert_eq!(parse_decimal("792,30 €").unwrap(), Some(792.3));
        assert_eq!(parse_decimal(" 950 ").unwrap(), Some(950.0));
        assert_eq!(parse_decimal("35.400").unwrap(), Some(35400.0));
        assert_eq!(parse_decimal("1.250.000").unwrap(), Some(1_250_000.0));
        assert_eq!(parse_decimal("4.5").unwrap(), Some(4.5));
        assert_eq!(parse_decimal("12.34").unwrap(), Some(12.34));
        assert_eq!(parse_decimal("0.500").unwrap(), Some(0.5));
        assert_eq!(parse_decimal("").unwrap(), None);
        assert!(parse_decimal("n/a").is_err());
    }

    #[test]
    fn test_exchange_rates_from_webhook() {
        let r: ExchangeRates = serde_json::from_value(json!({
            "Fecha": "2025-04-11",
            "Valor_Dolar": "940,5",
            "Valor_Euro": 1020.25
        }))
        .unwrap();
        assert_eq!(r.date, "2025-04-11");
        assert_eq!(r.usd_clp, Some(940.5));
        assert_eq!(r.eur_clp, Some(1020.25));
    }

    #[test]
    fn test_quote_request_accepts_original_keys() {
        let req: QuoteRequest = serde_json::from_value(json!({
            "productoPrincipal": { "codigo_producto": "A141XL", "pf_eur": "22500" },
            "opcionalesSeleccionados": [
                { "codigo_producto": "16521", "pf_eur": "1250" }
            ],
            "markup": 18.5,
            "descuento": 3,
            "tasaCambio": 950,
            "tipoIva": "exento",
            "puertoOrigen": "valencia",
            "puertoDestino": "valparaiso"
        }))
        .unwrap();

        assert_eq!(req.principal.code, "A141XL");
        assert_eq!(req.optionals.len(), 1);
        assert_eq!(req.markup_pct, Some(18.5));
        assert_eq!(req.discount_pct, Some(3.0));
        assert_eq!(req.exchange_rate, Some(950.0));
        assert_eq!(req.tax_regime, Some(TaxRegime::Exempt));
        assert_eq!(req.origin_port.as_deref(), Some("valencia"));
    }

    #[test]
    fn test_quote_request_snake_case_and_defaults() {
        let req: QuoteRequest = serde_json::from_value(json!({
            "principal": { "codigo_producto": "P" },
            "tax_regime": "export",
            "shipping": { "base_cost_eur": 100.0, "variable_rate": 0.0, "insurance_rate": 0.0 }
        }))
        .unwrap();

        assert!(req.optionals.is_empty());
        assert_eq!(req.markup_pct, None);
        assert_eq!(req.tax_regime, Some(TaxRegime::Export));
        assert_eq!(req.shipping.map(|s| s.base_cost_eur), Some(100.0));
    }
}
