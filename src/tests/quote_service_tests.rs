//! tests/quote_service_tests.rs
//! Pruebas de persistencia de cotizaciones (SQLite en memoria).

#[cfg(test)]
mod tests {
    use actix_rt::test;
    use chrono::{DateTime, TimeZone, Utc};
    use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

    use crate::config::pricing_config::PricingConfig;
    use crate::errors::{status_for, ServiceError};
    use crate::models::quote_model::{Quote, QuoteParams, TaxRegime};
    use crate::services::pricing_service::compute_quote;
    use crate::services::quote_service::{archive_quote, QuoteService};
    use crate::tests::{assert_close, product};

    async fn memory_pool() -> Pool<Sqlite> {
        // una sola conexión: cada conexión a :memory: es una base distinta
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("pool en memoria")
    }

    async fn service() -> QuoteService {
        let svc = QuoteService::new(memory_pool().await, None);
        svc.run_migrations().await.expect("migraciones");
        svc
    }

    fn quote_for(code: &str, price: f64, id: &str, created_at: DateTime<Utc>) -> Quote {
        let cfg = PricingConfig::default();
        let params = QuoteParams {
            markup_pct: cfg.markup_pct,
            discount_pct: cfg.discount_pct,
            tax_regime: TaxRegime::National,
            tax_pct: cfg.tax_pct,
            exchange_rate: cfg.exchange_rate,
            local_currency: cfg.local_currency,
            shipping: cfg.shipping,
            origin_port: Some("valencia".to_string()),
            destination_port: None,
        };
        compute_quote(
            &product(code, code, price),
            &[product("OPT", code, 100.0)],
            params,
            id.to_string(),
            created_at,
        )
        .unwrap()
    }

    #[test]
    async fn test_save_and_get_quote() {
        let svc = service().await;
        let quote = quote_for("A141XL", 35400.0, "COT-20250411122158-aaaa", Utc::now());

        svc.save_quote(&quote).await.expect("guardar");
        let loaded = svc.get_quote(&quote.id).await.expect("leer");

        assert_eq!(loaded.id, quote.id);
        assert_eq!(loaded.created_at, quote.created_at);
        assert_eq!(loaded.principal.code, "A141XL");
        assert_eq!(loaded.optionals.len(), 1);
        assert_eq!(loaded.params.origin_port.as_deref(), Some("valencia"));
        assert_close(loaded.grand_total_eur, quote.grand_total_eur);
        assert_close(loaded.totals.net_local, quote.totals.net_local);
    }

    #[test]
    async fn test_duplicate_id_is_rejected() {
        let svc = service().await;
        let quote = quote_for("A", 10.0, "COT-1-dup0", Utc::now());
        svc.save_quote(&quote).await.unwrap();
        assert!(svc.save_quote(&quote).await.is_err());
    }

    #[test]
    async fn test_get_missing_quote_is_not_found() {
        let svc = service().await;
        let err = svc.get_quote("COT-404").await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ServiceError>(),
            Some(ServiceError::QuoteNotFound(id)) if id == "COT-404"
        ));
        assert_eq!(status_for(&err), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    async fn test_list_quotes_newest_first_with_paging() {
        let svc = service().await;
        for day in 1..=3 {
            let created = Utc.with_ymd_and_hms(2025, 4, day, 10, 0, 0).unwrap();
            let q = quote_for("A", 1000.0 * day as f64, &format!("COT-2025040{}100000-0000", day), created);
            svc.save_quote(&q).await.unwrap();
        }

        let page1 = svc.list_quotes(1, 2).await.unwrap();
        assert_eq!(page1.total, 3);
        assert_eq!(page1.items.len(), 2);
        assert_eq!(page1.items[0].id, "COT-20250403100000-0000");
        assert_eq!(page1.items[1].id, "COT-20250402100000-0000");
        assert_eq!(page1.items[0].optional_count, 1);

        let page2 = svc.list_quotes(2, 2).await.unwrap();
        assert_eq!(page2.items.len(), 1);
        assert_eq!(page2.items[0].id, "COT-20250401100000-0000");

        let page0 = svc.list_quotes(0, 2).await.unwrap();
        assert_eq!(page0.page, 1);
    }

    #[test]
    async fn test_list_quotes_page_past_the_end_is_empty() {
        let svc = service().await;
        let q = quote_for("A", 1000.0, "COT-20250401100000-0001", Utc::now());
        svc.save_quote(&q).await.unwrap();

        let past = svc.list_quotes(2, 10).await.unwrap();
        assert_eq!(past.total, 1);
        assert!(past.items.is_empty());

        let huge = svc.list_quotes(u64::MAX / 2, 10).await.unwrap();
        assert!(huge.items.is_empty());

        let huge_size = svc.list_quotes(3, u64::MAX).await.unwrap();
        assert!(huge_size.items.is_empty());
    }

    #[test]
    async fn test_stats() {
        let svc = service().await;

        let empty = svc.stats().await.unwrap();
        assert_eq!(empty.total_quotes, 0);
        assert_eq!(empty.quotes_this_month, 0);
        assert_close(empty.average_total_eur, 0.0);
        assert!(empty.top_products.is_empty());

        let old = Utc.with_ymd_and_hms(2020, 1, 15, 9, 0, 0).unwrap();
        let quotes = vec![
            quote_for("A141XL", 1000.0, "COT-1-0001", Utc::now()),
            quote_for("A141XL", 2000.0, "COT-1-0002", Utc::now()),
            quote_for("B200", 3000.0, "COT-1-0003", old),
        ];
        for q in &quotes {
            svc.save_quote(q).await.unwrap();
        }

        let stats = svc.stats().await.unwrap();
        assert_eq!(stats.total_quotes, 3);
        assert_eq!(stats.quotes_this_month, 2);
        let expected_avg = quotes.iter().map(|q| q.grand_total_eur).sum::<f64>() / 3.0;
        assert!((stats.average_total_eur - expected_avg).abs() < 0.01);
        assert_eq!(stats.top_products[0].code, "A141XL");
        assert_eq!(stats.top_products[0].quotes, 2);
        assert_eq!(stats.top_products[1].code, "B200");
    }

    #[test]
    async fn test_archive_quote_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("cotizaciones");
        let quote = quote_for("A", 500.0, "COT-20250411000000-beef", Utc::now());

        let path = archive_quote(&nested, &quote).await.unwrap();

        assert_eq!(path, nested.join("COT-20250411000000-beef.json"));
        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Quote = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.id, quote.id);
    }

    #[test]
    async fn test_save_with_archive_dir() {
        let dir = tempfile::tempdir().unwrap();
        let svc = QuoteService::new(memory_pool().await, Some(dir.path().to_path_buf()));
        svc.run_migrations().await.unwrap();

        let quote = quote_for("A", 500.0, "COT-20250411000000-cafe", Utc::now());
        svc.save_quote(&quote).await.unwrap();

        assert!(dir.path().join("COT-20250411000000-cafe.json").exists());
    }
}
