use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Pool, Row, Sqlite};

use crate::errors::ServiceError;
use crate::models::quote_model::{
    ListQuotesResponse, ProductQuoteCount, Quote, QuoteStats, QuoteSummary,
};

/// Cantidad de productos en el ranking del dashboard
const TOP_PRODUCTS: i64 = 5;

#[derive(Clone, Debug)]
pub struct QuoteService {
    db_pool: Pool<Sqlite>,
    archive_dir: Option<PathBuf>,
}

impl QuoteService {
    pub fn new(db_pool: Pool<Sqlite>, archive_dir: Option<PathBuf>) -> Self {
        QuoteService {
            db_pool,
            archive_dir,
        }
    }

    /// Corre migraciones con sqlx
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db_pool)
            .await
            .context("Fallo en migraciones de 'quotes'")?;
        Ok(())
    }

    /// Guarda la cotización (resumen + JSON completo) y la respalda en disco si corresponde.
    pub async fn save_quote(&self, quote: &Quote) -> Result<()> {
        let payload = serde_json::to_string(quote).context("No se pudo serializar la cotización")?;
        let optional_count = quote.optionals.len() as i64;

        sqlx::query(
            r#"
            INSERT INTO quotes (
                id, created_at, principal_code, principal_name,
                optional_count, grand_total_eur, grand_total_local, payload
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&quote.id)
        .bind(quote.created_at.to_rfc3339())
        .bind(&quote.principal.code)
        .bind(&quote.principal.name)
        .bind(optional_count)
        .bind(quote.grand_total_eur)
        .bind(quote.grand_total_local)
        .bind(&payload)
        .execute(&self.db_pool)
        .await
        .context("Fallo al insertar cotización")?;

        log::info!(
            "Cotización generada: {} ({} opcionales, {:.2} EUR)",
            quote.id,
            optional_count,
            quote.grand_total_eur
        );

        if let Some(dir) = &self.archive_dir {
            // un respaldo fallido sólo se registra
            if let Err(e) = archive_quote(dir, quote).await {
                log::error!("No se pudo respaldar {} en {:?}: {:#}", quote.id, dir, e);
            }
        }
        Ok(())
    }

    pub async fn get_quote(&self, id: &str) -> Result<Quote> {
        let row = sqlx::query("SELECT payload FROM quotes WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await
            .context("Fallo al consultar cotización")?
            .ok_or_else(|| ServiceError::QuoteNotFound(id.to_string()))?;

        let payload: String = row.try_get("payload")?;
        serde_json::from_str(&payload)
            .with_context(|| format!("Payload corrupto para cotización {}", id))
    }

    /// Lista cotizaciones con paginación, más recientes primero
    pub async fn list_quotes(&self, page: u64, page_size: u64) -> Result<ListQuotesResponse> {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let limit = i64::try_from(page_size).unwrap_or(i64::MAX);
        let offset = i64::try_from((page - 1).saturating_mul(page_size)).unwrap_or(i64::MAX);

        let total: i64 = sqlx::query("SELECT COUNT(*) AS cnt FROM quotes")
            .fetch_one(&self.db_pool)
            .await?
            .try_get("cnt")?;

        let rows = sqlx::query(
            r#"
            SELECT
                id, created_at, principal_code, principal_name,
                optional_count, grand_total_eur, grand_total_local
            FROM quotes
            ORDER BY created_at DESC, id DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db_pool)
        .await?;

        let items = rows
            .into_iter()
            .map(|r| {
                Ok(QuoteSummary {
                    id: r.try_get("id")?,
                    created_at: r.try_get("created_at")?,
                    principal_code: r.try_get("principal_code")?,
                    principal_name: r.try_get("principal_name")?,
                    optional_count: r.try_get("optional_count")?,
                    grand_total_eur: r.try_get("grand_total_eur")?,
                    grand_total_local: r.try_get("grand_total_local")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(ListQuotesResponse {
            total: total as u64,
            page,
            page_size,
            items,
        })
    }

    /// Indicadores para el dashboard: totales, mes actual, promedio y más cotizados
    pub async fn stats(&self) -> Result<QuoteStats> {
        let month_prefix = Utc::now().format("%Y-%m").to_string();

        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN substr(created_at, 1, 7) = ?1 THEN 1 ELSE 0 END), 0) AS this_month,
                COALESCE(AVG(grand_total_eur), 0.0) AS average
            FROM quotes
            "#,
        )
        .bind(&month_prefix)
        .fetch_one(&self.db_pool)
        .await
        .context("Fallo al calcular estadísticas")?;

        let top_rows = sqlx::query(
            r#"
            SELECT principal_code, MAX(principal_name) AS principal_name, COUNT(*) AS quotes
            FROM quotes
            GROUP BY principal_code
            ORDER BY quotes DESC, principal_code ASC
            LIMIT ?1
            "#,
        )
        .bind(TOP_PRODUCTS)
        .fetch_all(&self.db_pool)
        .await?;

        let top_products = top_rows
            .into_iter()
            .map(|r| {
                Ok(ProductQuoteCount {
                    code: r.try_get("principal_code")?,
                    name: r.try_get("principal_name")?,
                    quotes: r.try_get("quotes")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        let average: f64 = row.try_get("average")?;
        Ok(QuoteStats {
            total_quotes: row.try_get("total")?,
            quotes_this_month: row.try_get("this_month")?,
            average_total_eur: crate::services::pricing_service::round2(average),
            top_products,
        })
    }
}

/// Escribe `<dir>/<id>.json` con la cotización indentada
pub async fn archive_quote(dir: &std::path::Path, quote: &Quote) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("No se pudo crear {:?}", dir))?;
    let path = dir.join(format!("{}.json", quote.id));
    let json = serde_json::to_vec_pretty(quote)?;
    tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("No se pudo escribir {:?}", path))?;
    Ok(path)
}
