//! tests/pricing_tests.rs
//! Pruebas del pipeline de cálculo de cotizaciones.

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::config::pricing_config::PricingConfig;
    use crate::errors::PricingError;
    use crate::models::quote_model::{QuoteParams, ShippingParams, TaxRegime};
    use crate::services::pricing_service::{
        apply_exchange_rate, compute_quote, new_quote_id, price_with_markup_and_discount,
        round2, PricingService,
    };
    use crate::tests::{assert_close, product};

    fn params(markup: f64, discount: f64, tax: f64, rate: f64, shipping: ShippingParams) -> QuoteParams {
        QuoteParams {
            markup_pct: markup,
            discount_pct: discount,
            tax_regime: TaxRegime::National,
            tax_pct: tax,
            exchange_rate: rate,
            local_currency: "CLP".to_string(),
            shipping,
            origin_port: None,
            destination_port: None,
        }
    }

    fn admin_defaults() -> QuoteParams {
        params(
            20.0,
            5.0,
            19.0,
            950.0,
            ShippingParams {
                base_cost_eur: 2500.0,
                variable_rate: 0.05,
                insurance_rate: 0.01,
            },
        )
    }

    #[test]
    fn test_price_with_markup_and_discount() {
        assert_close(price_with_markup_and_discount(100.0, 20.0, 5.0), 114.0);
        assert_close(price_with_markup_and_discount(100.0, 0.0, 0.0), 100.0);
        assert_close(price_with_markup_and_discount(0.0, 20.0, 5.0), 0.0);
    }

    #[test]
    fn test_apply_exchange_rate_rounds_to_cents() {
        assert_close(apply_exchange_rate(44186.4, 950.0), 41_977_080.0);
        assert_close(apply_exchange_rate(1.2345, 1.0), 1.23);
        assert_close(round2(2.499), 2.5);
    }

    #[test]
    fn test_quote_principal_only() {
        let principal = product("A141XL", "A141XL", 35400.0);
        let quote = compute_quote(&principal, &[], admin_defaults(), "COT-1".into(), Utc::now())
            .expect("cotización válida");

        let line = &quote.principal;
        assert_close(line.margin_eur, 7080.0);
        assert_close(line.with_margin_eur, 42480.0);
        assert_close(line.discount_eur, 2124.0);
        assert_close(line.final_eur, 40356.0);
        assert_close(line.final_local, 38_338_200.0);

        assert_close(quote.totals.net_eur, 40356.0);
        assert_close(quote.shipping.fixed_eur, 2500.0);
        assert_close(quote.shipping.variable_eur, 2017.8);
        assert_close(quote.shipping.insurance_eur, 403.56);
        assert_close(quote.shipping.total_eur, 4921.36);
        assert_close(quote.tax.tax_eur, 7667.64);
        assert_close(quote.grand_total_eur, 52945.0);
        assert_close(quote.grand_total_local, 50_297_750.0);
        assert!(quote.optionals.is_empty());
    }

    #[test]
    fn test_quote_with_optionals() {
        let principal = product("P1", "M1", 1000.0);
        let optionals = vec![product("O1", "M1", 500.0), product("O2", "M1", 250.0)];
        let p = params(
            10.0,
            10.0,
            20.0,
            1000.0,
            ShippingParams {
                base_cost_eur: 100.0,
                variable_rate: 0.1,
                insurance_rate: 0.0,
            },
        );

        let quote = compute_quote(&principal, &optionals, p, "COT-2".into(), Utc::now()).unwrap();

        assert_eq!(quote.optionals.len(), 2);
        assert_close(quote.optionals[0].final_eur, 495.0);
        assert_close(quote.optionals[1].final_eur, 247.5);
        assert_close(quote.totals.subtotal_base_eur, 1750.0);
        assert_close(quote.totals.subtotal_with_margin_eur, 1925.0);
        assert_close(quote.totals.discount_total_eur, 192.5);
        assert_close(quote.totals.net_eur, 1732.5);
        assert_close(quote.totals.net_local, 1_732_500.0);
        assert_close(quote.shipping.total_eur, 273.25);
        assert_close(quote.tax.tax_eur, 346.5);
        assert_close(quote.grand_total_eur, 2352.25);
        assert_close(quote.grand_total_local, 2_352_250.0);
    }

    #[test]
    fn test_exempt_and_export_pay_no_tax() {
        for regime in [TaxRegime::Exempt, TaxRegime::Export] {
            let mut p = admin_defaults();
            p.tax_regime = regime;
            let quote =
                compute_quote(&product("P", "M", 35400.0), &[], p, "COT-3".into(), Utc::now()).unwrap();
            assert_close(quote.tax.rate_pct, 0.0);
            assert_close(quote.tax.tax_eur, 0.0);
            assert_close(quote.grand_total_eur, 40356.0 + 4921.36);
        }
    }

    #[test]
    fn test_grand_total_is_sum_of_parts() {
        let cases = [(12345.67, 17.5, 3.0), (999.99, 0.0, 0.0), (50000.0, 35.0, 12.5)];
        for (price, markup, discount) in cases {
            let mut p = admin_defaults();
            p.markup_pct = markup;
            p.discount_pct = discount;
            let q = compute_quote(
                &product("P", "M", price),
                &[product("O", "M", price / 3.0)],
                p,
                "COT-4".into(),
                Utc::now(),
            )
            .unwrap();

            assert_close(
                q.grand_total_eur,
                round2(q.totals.net_eur + q.shipping.total_eur + q.tax.tax_eur),
            );
            for line in std::iter::once(&q.principal).chain(q.optionals.iter()) {
                assert!(line.final_eur <= line.with_margin_eur);
            }
        }
    }

    #[test]
    fn test_lines_and_totals_add_up_to_the_cent() {
        let mut p = admin_defaults();
        p.markup_pct = 17.5;
        p.discount_pct = 3.0;

        for i in 1..=20_000 {
            let base = i as f64 * 0.01;
            let q = compute_quote(
                &product("P", "M", base),
                &[product("O", "M", base * 7.0)],
                p.clone(),
                "COT-6".into(),
                Utc::now(),
            )
            .unwrap();

            for line in std::iter::once(&q.principal).chain(q.optionals.iter()) {
                assert!(
                    (line.with_margin_eur - line.discount_eur - line.final_eur).abs() < 1e-6,
                    "línea descuadrada para base {}: {:?}",
                    base,
                    line
                );
            }
            assert!(
                (q.totals.subtotal_with_margin_eur - q.totals.discount_total_eur - q.totals.net_eur)
                    .abs()
                    < 1e-6,
                "totales descuadrados para base {}",
                base
            );
        }
    }

    #[test]
    fn test_line_rounding_case() {
        let mut p = admin_defaults();
        p.markup_pct = 17.5;
        p.discount_pct = 3.0;
        let q = compute_quote(&product("P", "M", 0.71), &[], p, "COT-7".into(), Utc::now()).unwrap();

        assert_close(q.principal.with_margin_eur, 0.83);
        assert_close(q.principal.discount_eur, 0.03);
        assert_close(q.principal.final_eur, 0.80);
    }

    #[test]
    fn test_missing_price_counts_as_zero() {
        let mut principal = product("P", "M", 0.0);
        principal.price_eur = None;
        let q = compute_quote(&principal, &[], admin_defaults(), "COT-5".into(), Utc::now()).unwrap();
        assert_close(q.totals.net_eur, 0.0);
        // sólo queda el costo fijo de envío
        assert_close(q.grand_total_eur, 2500.0);
    }

    #[test]
    fn test_validation_errors() {
        let ok = product("P", "M", 100.0);

        let mut p = admin_defaults();
        p.discount_pct = 120.0;
        assert_eq!(
            compute_quote(&ok, &[], p, "x".into(), Utc::now()).unwrap_err(),
            PricingError::PercentOutOfRange {
                field: "discount",
                value: 120.0
            }
        );

        let mut p = admin_defaults();
        p.exchange_rate = 0.0;
        assert_eq!(
            compute_quote(&ok, &[], p, "x".into(), Utc::now()).unwrap_err(),
            PricingError::InvalidExchangeRate(0.0)
        );

        let mut p = admin_defaults();
        p.markup_pct = -1.0;
        assert_eq!(
            compute_quote(&ok, &[], p, "x".into(), Utc::now()).unwrap_err(),
            PricingError::NegativeMarkup(-1.0)
        );

        let mut p = admin_defaults();
        p.shipping.insurance_rate = -0.01;
        assert!(matches!(
            compute_quote(&ok, &[], p, "x".into(), Utc::now()),
            Err(PricingError::NegativeShipping { field: "insurance_rate", .. })
        ));

        let bad = product("NEG", "M", -5.0);
        assert!(matches!(
            compute_quote(&ok, &[bad], admin_defaults(), "x".into(), Utc::now()),
            Err(PricingError::NegativePrice { .. })
        ));

        let mut p = admin_defaults();
        p.tax_pct = f64::NAN;
        assert_eq!(
            compute_quote(&ok, &[], p, "x".into(), Utc::now()).unwrap_err(),
            PricingError::NotFinite { field: "tax" }
        );
    }

    #[test]
    fn test_service_uses_defaults() {
        let service = PricingService::new(PricingConfig::default());
        assert_close(service.price(100.0, None, None).unwrap(), 114.0);
        assert_close(service.price(100.0, Some(10.0), Some(0.0)).unwrap(), 110.0);
        assert!(service.price(-1.0, None, None).is_err());
    }

    #[test]
    fn test_quote_id_format() {
        let id = new_quote_id(Utc::now());
        assert!(id.starts_with("COT-"));
        assert_eq!(id.len(), "COT-".len() + 14 + 1 + 4);
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }
}
